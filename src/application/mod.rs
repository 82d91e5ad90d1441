//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (mirror a turn, prune idle patterns) are kept apart from
//! the reflection query; `MirrorEngine` wires all three from configuration.

mod engine;
pub mod handlers;

pub use engine::MirrorEngine;
pub use handlers::{
    MirrorResponseCommand, MirrorResponseHandler, MirrorResponseResult,
    PruneIdlePatternsCommand, PruneIdlePatternsHandler, PruneIdlePatternsResult,
    WeeklyReflectionHandler, WeeklyReflectionQuery,
};
