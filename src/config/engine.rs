//! Mirroring engine configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::mirror::{
    DissonanceThresholds, EgoLoopPolicy, MirrorIntensity, ReflectionWindow, CHALLENGE_THRESHOLD,
    DEFAULT_REFLECTION_THRESHOLD, MAX_RECENT_THEMES, SENTIMENT_THRESHOLD,
};

/// Tunables for evaluation, transformation, and reflection
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Sentiment above which a response is considered overly agreeable
    #[serde(default = "default_sentiment_threshold")]
    pub sentiment_threshold: f64,

    /// Challenge below which a response is considered under-challenging
    #[serde(default = "default_challenge_threshold")]
    pub challenge_threshold: f64,

    /// Themes inspected for an ego loop, including the current query
    #[serde(default = "default_ego_loop_window")]
    pub ego_loop_window: usize,

    /// Repeats of one theme within the window that signal a loop
    #[serde(default = "default_ego_loop_min_occurrences")]
    pub ego_loop_min_occurrences: usize,

    /// Dominant-theme count that triggers a reflection
    #[serde(default = "default_reflection_threshold")]
    pub reflection_threshold: usize,

    /// Trailing window for reflections in days; unset means all stored history
    pub reflection_window_days: Option<u32>,

    /// Intensity used when the caller does not choose one
    #[serde(default)]
    pub default_intensity: MirrorIntensity,

    /// Seed for reproducible template selection; unset uses the thread RNG
    pub rng_seed: Option<u64>,
}

impl EngineConfig {
    pub fn thresholds(&self) -> DissonanceThresholds {
        DissonanceThresholds {
            sentiment: self.sentiment_threshold,
            challenge: self.challenge_threshold,
        }
    }

    pub fn ego_loop_policy(&self) -> EgoLoopPolicy {
        EgoLoopPolicy {
            window: self.ego_loop_window,
            min_occurrences: self.ego_loop_min_occurrences,
        }
    }

    pub fn reflection_window(&self) -> ReflectionWindow {
        match self.reflection_window_days {
            Some(days) => ReflectionWindow::TrailingDays(days),
            None => ReflectionWindow::AllTime,
        }
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.sentiment_threshold) {
            return Err(ValidationError::ThresholdOutOfRange("sentiment_threshold"));
        }
        if !(0.0..=1.0).contains(&self.challenge_threshold) {
            return Err(ValidationError::ThresholdOutOfRange("challenge_threshold"));
        }
        if self.ego_loop_window == 0 || self.ego_loop_window > MAX_RECENT_THEMES {
            return Err(ValidationError::InvalidEgoLoopWindow);
        }
        if self.ego_loop_min_occurrences == 0
            || self.ego_loop_min_occurrences > self.ego_loop_window
        {
            return Err(ValidationError::InvalidEgoLoopOccurrences);
        }
        if self.reflection_threshold == 0 || self.reflection_threshold > MAX_RECENT_THEMES {
            return Err(ValidationError::InvalidReflectionThreshold);
        }
        if self.reflection_window_days == Some(0) {
            return Err(ValidationError::InvalidReflectionWindow);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sentiment_threshold: default_sentiment_threshold(),
            challenge_threshold: default_challenge_threshold(),
            ego_loop_window: default_ego_loop_window(),
            ego_loop_min_occurrences: default_ego_loop_min_occurrences(),
            reflection_threshold: default_reflection_threshold(),
            reflection_window_days: None,
            default_intensity: MirrorIntensity::default(),
            rng_seed: None,
        }
    }
}

fn default_sentiment_threshold() -> f64 {
    SENTIMENT_THRESHOLD
}

fn default_challenge_threshold() -> f64 {
    CHALLENGE_THRESHOLD
}

fn default_ego_loop_window() -> usize {
    EgoLoopPolicy::default().window
}

fn default_ego_loop_min_occurrences() -> usize {
    EgoLoopPolicy::default().min_occurrences
}

fn default_reflection_threshold() -> usize {
    DEFAULT_REFLECTION_THRESHOLD
}
