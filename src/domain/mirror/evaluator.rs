//! DissonanceEvaluator - turns a response and user history into a decision record.
//!
//! ## Steps
//!
//! 1. Score the response text for sentiment and challenge
//! 2. Classify the query and look for an ego loop in the user's history
//! 3. Search query and response for shadow trigger phrases
//! 4. Derive sycophancy risk from the scores
//!
//! The history in the context must be the snapshot taken *before* the
//! current query is recorded; the current query counts as one occurrence.

use std::sync::Arc;
use tracing::{debug, warn};

use super::{DissonanceCheck, DissonanceThresholds, MirrorContext, ThemeLabel, UserPattern};
use crate::ports::Scorer;

/// Phrases that call for a shadow prompt when found in query or response.
pub const SHADOW_TRIGGERS: &[&str] = &[
    "pattern",
    "always",
    "never",
    "why do i",
    "i can't seem to",
    "everyone else",
    "not fair",
    "why me",
    "victim",
    "blame",
];

/// How far back to look for a repeating theme, and how many repeats make a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EgoLoopPolicy {
    /// Window size in themes, including the current query.
    pub window: usize,
    /// Occurrences of the same theme within the window that signal a loop.
    pub min_occurrences: usize,
}

impl Default for EgoLoopPolicy {
    fn default() -> Self {
        Self {
            window: 10,
            min_occurrences: 3,
        }
    }
}

/// Combines scoring, ego-loop detection, and shadow triggers.
pub struct DissonanceEvaluator {
    scorer: Arc<dyn Scorer>,
    thresholds: DissonanceThresholds,
    ego_loop: EgoLoopPolicy,
}

impl DissonanceEvaluator {
    pub fn new(scorer: Arc<dyn Scorer>) -> Self {
        Self {
            scorer,
            thresholds: DissonanceThresholds::default(),
            ego_loop: EgoLoopPolicy::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: DissonanceThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_ego_loop_policy(mut self, policy: EgoLoopPolicy) -> Self {
        self.ego_loop = policy;
        self
    }

    /// Evaluates one turn. Never fails; missing signals degrade to "no signal".
    pub fn evaluate(&self, ctx: &MirrorContext<'_>) -> DissonanceCheck {
        let theme = self.classify(ctx.original_query);
        self.evaluate_classified(ctx, theme)
    }

    /// Theme label for a query, as recorded into the user's history.
    pub fn classify(&self, query: &str) -> ThemeLabel {
        self.scorer.classify_theme(query)
    }

    /// Evaluates one turn whose query was already classified as `theme`.
    pub fn evaluate_classified(
        &self,
        ctx: &MirrorContext<'_>,
        theme: ThemeLabel,
    ) -> DissonanceCheck {
        let text = ctx.base_response_text;
        let sentiment = self.sanitized("sentiment", self.scorer.score_sentiment(text));
        let challenge = self.sanitized("challenge", self.scorer.score_challenge(text));

        let ego_loop = if ctx.user_pattern.is_well_formed() {
            self.detect_ego_loop(ctx.user_pattern, theme)
        } else {
            warn!(
                user_id = %ctx.user_id,
                "Pattern history is malformed; skipping ego-loop detection"
            );
            false
        };

        let triggers = shadow_triggers(ctx.original_query, ctx.base_response_text);

        let check = DissonanceCheck::new(
            sentiment,
            challenge,
            self.thresholds,
            ego_loop,
            theme,
            triggers,
        );

        debug!(
            user_id = %ctx.user_id,
            theme = %theme,
            sentiment = check.sentiment_score(),
            challenge = check.challenge_score(),
            sycophancy_risk = check.sycophancy_risk(),
            ego_loop = check.ego_loop_detected(),
            shadow_prompt = check.shadow_prompt_needed(),
            "Evaluated response"
        );

        check
    }

    /// True when `theme` fills at least `min_occurrences` of the window,
    /// counting the current query plus the most recent prior themes.
    pub fn detect_ego_loop(&self, history: &UserPattern, theme: ThemeLabel) -> bool {
        if self.ego_loop.window == 0 {
            return false;
        }
        let prior = history
            .last_themes(self.ego_loop.window - 1)
            .filter(|t| *t == theme)
            .count();
        prior + 1 >= self.ego_loop.min_occurrences
    }

    fn sanitized(&self, signal: &'static str, score: f64) -> f64 {
        if score.is_finite() {
            score
        } else {
            warn!(signal, "Scorer returned a non-finite score; treating as no signal");
            0.0
        }
    }
}

/// Trigger phrases present in either text, case-insensitive, in table order.
pub fn shadow_triggers(query: &str, response_text: &str) -> Vec<String> {
    let query = query.to_lowercase();
    let response_text = response_text.to_lowercase();
    SHADOW_TRIGGERS
        .iter()
        .filter(|phrase| query.contains(*phrase) || response_text.contains(*phrase))
        .map(|phrase| phrase.to_string())
        .collect()
}
