//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

mod mirror_response;
mod prune_idle_patterns;
mod weekly_reflection;

pub use mirror_response::{MirrorResponseCommand, MirrorResponseHandler, MirrorResponseResult};
pub use prune_idle_patterns::{
    PruneIdlePatternsCommand, PruneIdlePatternsHandler, PruneIdlePatternsResult,
};
pub use weekly_reflection::{WeeklyReflectionHandler, WeeklyReflectionQuery};
