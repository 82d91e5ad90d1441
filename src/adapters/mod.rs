//! Adapters - Implementations of port interfaces.
//!
//! - `scoring` - keyword-based `Scorer`
//! - `storage` - in-memory `PatternRepository`
//! - `random` - `RandomSource` implementations

pub mod random;
pub mod scoring;
pub mod storage;

pub use random::{SeededRandom, ThreadRandom};
pub use scoring::LexicalScorer;
pub use storage::InMemoryPatternRepository;
