//! Pattern retention configuration

use serde::Deserialize;

use super::error::ValidationError;

/// How long idle user patterns are kept
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RetentionConfig {
    /// Hours without activity before a pattern is evicted; unset keeps patterns forever
    pub idle_ttl_hours: Option<u64>,
}

impl RetentionConfig {
    /// Check if idle eviction is enabled
    pub fn evicts_idle(&self) -> bool {
        self.idle_ttl_hours.is_some()
    }

    /// Validate retention configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.idle_ttl_hours == Some(0) {
            return Err(ValidationError::InvalidIdleTtl);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retention_defaults_keep_forever() {
        let config = RetentionConfig::default();
        assert!(!config.evicts_idle());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let config = RetentionConfig {
            idle_ttl_hours: Some(0),
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidIdleTtl)));
    }

    #[test]
    fn test_ttl_enables_eviction() {
        let config = RetentionConfig {
            idle_ttl_hours: Some(72),
        };
        assert!(config.evicts_idle());
        assert!(config.validate().is_ok());
    }
}
