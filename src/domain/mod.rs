//! Domain layer containing the mirroring logic and its types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `mirror` - Evaluation, transformation, and reflection of responses

pub mod foundation;
pub mod mirror;
