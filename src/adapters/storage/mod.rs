//! Storage Adapters
//!
//! Implementations of the PatternRepository port.
//!
//! ## Available Adapters
//!
//! - **InMemoryPatternRepository** - per-user patterns in process memory
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemoryPatternRepository;
//!
//! let repository = Arc::new(InMemoryPatternRepository::new());
//! ```

mod in_memory_pattern_repository;

pub use in_memory_pattern_repository::InMemoryPatternRepository;
