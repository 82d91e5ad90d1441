//! Scorer Port - lexical or learned text scoring.
//!
//! The evaluator depends only on this trait, so a learned classifier can
//! replace the keyword scorer without touching evaluation or rewriting.

use crate::domain::mirror::ThemeLabel;

/// Scores response text and classifies query text.
///
/// Implementations must be pure: the same input always yields the same output.
pub trait Scorer: Send + Sync {
    /// How agreeable the text reads, in `[0, 1]`.
    fn score_sentiment(&self, text: &str) -> f64;

    /// How much challenge the text carries, in `[0, 1]`.
    fn score_challenge(&self, text: &str) -> f64;

    /// Assigns a query to one theme of the closed vocabulary.
    fn classify_theme(&self, query: &str) -> ThemeLabel;
}
