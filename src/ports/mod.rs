//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the mirroring domain and the outside world. Adapters implement these ports.
//!
//! - `PatternRepository` - per-user theme history
//! - `Scorer` - sentiment/challenge scoring and theme classification
//! - `RandomSource` - template selection

mod pattern_repository;
mod random_source;
mod scorer;

pub use pattern_repository::{
    PatternRepository, PatternSignals, PatternStoreError, RecordedQuery,
};
pub use random_source::RandomSource;
pub use scorer::Scorer;
