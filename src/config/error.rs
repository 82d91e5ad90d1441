//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Threshold {0} must be within [0, 1]")]
    ThresholdOutOfRange(&'static str),

    #[error("Ego-loop window must be between 1 and the history cap (20)")]
    InvalidEgoLoopWindow,

    #[error("Ego-loop occurrences must be between 1 and the window size")]
    InvalidEgoLoopOccurrences,

    #[error("Reflection threshold must be between 1 and the history cap (20)")]
    InvalidReflectionThreshold,

    #[error("Reflection window must span at least one day")]
    InvalidReflectionWindow,

    #[error("Idle TTL must be at least one hour")]
    InvalidIdleTtl,
}
