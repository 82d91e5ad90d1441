//! MirrorContext - borrowed per-turn input to the evaluator and transformer.

use super::{MirrorIntensity, UserPattern};
use crate::domain::foundation::UserId;

/// Everything the engine needs to judge and rewrite one response.
///
/// All text is borrowed; the engine never mutates the caller's response.
#[derive(Debug, Clone, Copy)]
pub struct MirrorContext<'a> {
    pub user_id: &'a UserId,
    pub original_query: &'a str,
    pub base_response_text: &'a str,
    pub user_pattern: &'a UserPattern,
    pub intensity: MirrorIntensity,
}

impl<'a> MirrorContext<'a> {
    pub fn new(
        user_id: &'a UserId,
        original_query: &'a str,
        base_response_text: &'a str,
        user_pattern: &'a UserPattern,
        intensity: MirrorIntensity,
    ) -> Self {
        Self {
            user_id,
            original_query,
            base_response_text,
            user_pattern,
            intensity,
        }
    }

    /// Same turn, viewed against a different pattern snapshot.
    pub fn with_pattern(self, user_pattern: &'a UserPattern) -> Self {
        Self {
            user_pattern,
            ..self
        }
    }
}
