//! PatternRepository Port - per-user theme history.
//!
//! The single source of truth for `UserPattern` state. Implementations must
//! serialize concurrent writes for the same user so the FIFO cap and the
//! monotonic approval counter hold; different users need no coordination.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::mirror::{ThemeLabel, UserPattern};

/// Errors that can occur during pattern store operations
#[derive(Debug, thiserror::Error)]
pub enum PatternStoreError {
    #[error("Stored pattern for user {0} is corrupted")]
    Corrupted(UserId),

    #[error("Pattern store unavailable: {0}")]
    Unavailable(String),
}

impl From<PatternStoreError> for DomainError {
    fn from(err: PatternStoreError) -> Self {
        match &err {
            PatternStoreError::Corrupted(user_id) => {
                DomainError::new(ErrorCode::PatternCorrupted, err.to_string())
                    .with_detail("user_id", user_id.as_str())
            }
            PatternStoreError::Unavailable(_) => {
                DomainError::new(ErrorCode::StoreUnavailable, err.to_string())
            }
        }
    }
}

/// Observations from one evaluated turn, folded into the user's pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSignals {
    pub comfort_zone: Vec<String>,
    pub shadow_avoidance: Vec<String>,
}

impl PatternSignals {
    pub fn is_empty(&self) -> bool {
        self.comfort_zone.is_empty() && self.shadow_avoidance.is_empty()
    }

    /// Applies the signals to a pattern.
    pub fn apply_to(&self, pattern: &mut UserPattern) {
        for indicator in &self.comfort_zone {
            pattern.note_comfort_zone(indicator.as_str());
        }
        for theme in &self.shadow_avoidance {
            pattern.note_shadow_avoidance(theme.as_str());
        }
    }
}

/// Both sides of one recorded query, captured under the same per-user lock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedQuery {
    /// The pattern as it was before this query.
    pub prior: UserPattern,
    /// The pattern after recording this query.
    pub updated: UserPattern,
}

/// Port for reading and updating per-user patterns
#[async_trait]
pub trait PatternRepository: Send + Sync {
    /// Record a classified query theme, creating the pattern if absent.
    ///
    /// The snapshot and the write must be atomic per user: a concurrent
    /// record for the same user lands either entirely before or after.
    async fn record_query_with_prior(
        &self,
        user_id: &UserId,
        theme: ThemeLabel,
        at: Timestamp,
    ) -> Result<RecordedQuery, PatternStoreError>;

    /// Record a classified query theme, creating the pattern if absent.
    ///
    /// # Returns
    /// The pattern after recording.
    async fn record_query(
        &self,
        user_id: &UserId,
        theme: ThemeLabel,
        at: Timestamp,
    ) -> Result<UserPattern, PatternStoreError> {
        let recorded = self.record_query_with_prior(user_id, theme, at).await?;
        Ok(recorded.updated)
    }

    /// Current pattern for a user, or a fresh default if none exists.
    async fn get(&self, user_id: &UserId) -> Result<UserPattern, PatternStoreError>;

    /// Fold turn observations into an existing pattern.
    async fn note_signals(
        &self,
        user_id: &UserId,
        signals: &PatternSignals,
    ) -> Result<(), PatternStoreError>;

    /// Drop every pattern with no activity since `cutoff`.
    ///
    /// # Returns
    /// The number of evicted users.
    async fn evict_idle(&self, cutoff: Timestamp) -> Result<usize, PatternStoreError>;
}
