//! DissonanceCheck - the evaluator's decision record for one turn.

use serde::Serialize;

use super::ThemeLabel;

/// Sentiment above which a response counts as overly agreeable.
pub const SENTIMENT_THRESHOLD: f64 = 0.8;

/// Challenge below which a response counts as under-challenging.
pub const CHALLENGE_THRESHOLD: f64 = 0.3;

/// Thresholds that decide sycophancy risk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DissonanceThresholds {
    pub sentiment: f64,
    pub challenge: f64,
}

impl DissonanceThresholds {
    /// Strictly greater than the sentiment threshold and strictly below the challenge one.
    pub fn is_sycophantic(&self, sentiment: f64, challenge: f64) -> bool {
        sentiment > self.sentiment && challenge < self.challenge
    }
}

impl Default for DissonanceThresholds {
    fn default() -> Self {
        Self {
            sentiment: SENTIMENT_THRESHOLD,
            challenge: CHALLENGE_THRESHOLD,
        }
    }
}

/// Derived, per-turn assessment of a response.
///
/// `sycophancy_risk` is always computed from the two scores and the
/// thresholds, never set independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DissonanceCheck {
    sentiment_score: f64,
    challenge_score: f64,
    sycophancy_risk: bool,
    ego_loop_detected: bool,
    theme: ThemeLabel,
    shadow_triggers: Vec<String>,
}

impl DissonanceCheck {
    pub fn new(
        sentiment_score: f64,
        challenge_score: f64,
        thresholds: DissonanceThresholds,
        ego_loop_detected: bool,
        theme: ThemeLabel,
        shadow_triggers: Vec<String>,
    ) -> Self {
        let sentiment_score = unit_interval(sentiment_score);
        let challenge_score = unit_interval(challenge_score);
        Self {
            sentiment_score,
            challenge_score,
            sycophancy_risk: thresholds.is_sycophantic(sentiment_score, challenge_score),
            ego_loop_detected,
            theme,
            shadow_triggers,
        }
    }

    pub fn sentiment_score(&self) -> f64 {
        self.sentiment_score
    }

    pub fn challenge_score(&self) -> f64 {
        self.challenge_score
    }

    pub fn sycophancy_risk(&self) -> bool {
        self.sycophancy_risk
    }

    pub fn ego_loop_detected(&self) -> bool {
        self.ego_loop_detected
    }

    pub fn shadow_prompt_needed(&self) -> bool {
        !self.shadow_triggers.is_empty()
    }

    /// Theme the current query was classified into.
    pub fn theme(&self) -> ThemeLabel {
        self.theme
    }

    /// Trigger phrases found in the query or the response.
    pub fn shadow_triggers(&self) -> &[String] {
        &self.shadow_triggers
    }

    /// True when the response must go through the full transformation path.
    pub fn requires_transformation(&self) -> bool {
        self.sycophancy_risk || self.ego_loop_detected
    }
}

fn unit_interval(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(sentiment: f64, challenge: f64) -> DissonanceCheck {
        DissonanceCheck::new(
            sentiment,
            challenge,
            DissonanceThresholds::default(),
            false,
            ThemeLabel::GeneralInquiry,
            Vec::new(),
        )
    }

    #[test]
    fn risk_requires_high_sentiment_and_low_challenge() {
        assert!(check(0.9, 0.0).sycophancy_risk());
        assert!(!check(0.9, 0.3).sycophancy_risk());
        assert!(!check(0.8, 0.0).sycophancy_risk());
        assert!(!check(0.2, 0.0).sycophancy_risk());
    }

    #[test]
    fn scores_are_clamped_to_unit_interval() {
        let c = check(1.7, -0.4);
        assert_eq!(c.sentiment_score(), 1.0);
        assert_eq!(c.challenge_score(), 0.0);
    }

    #[test]
    fn non_finite_scores_count_as_no_signal() {
        let c = check(f64::NAN, f64::INFINITY);
        assert_eq!(c.sentiment_score(), 0.0);
        assert_eq!(c.challenge_score(), 0.0);
        assert!(!c.sycophancy_risk());
    }

    #[test]
    fn shadow_prompt_follows_triggers() {
        let c = DissonanceCheck::new(
            0.0,
            0.0,
            DissonanceThresholds::default(),
            false,
            ThemeLabel::Stagnation,
            vec!["blame".to_string()],
        );
        assert!(c.shadow_prompt_needed());
        assert!(!c.requires_transformation());
    }

    #[test]
    fn ego_loop_alone_requires_transformation() {
        let c = DissonanceCheck::new(
            0.0,
            0.0,
            DissonanceThresholds::default(),
            true,
            ThemeLabel::ValidationSeeking,
            Vec::new(),
        );
        assert!(c.requires_transformation());
        assert!(!c.sycophancy_risk());
    }

    #[test]
    fn custom_thresholds_apply() {
        let thresholds = DissonanceThresholds {
            sentiment: 0.5,
            challenge: 0.1,
        };
        assert!(thresholds.is_sycophantic(0.6, 0.05));
        assert!(!thresholds.is_sycophantic(0.6, 0.2));
    }
}
