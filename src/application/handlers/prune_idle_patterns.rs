//! PruneIdlePatternsHandler - Command handler for idle pattern eviction.
//!
//! Patterns grow with every query and are never decayed, so long-lived
//! hosts call this periodically to drop users that went quiet.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::PatternRepository;

/// Command to evict patterns idle for longer than `idle_hours`.
#[derive(Debug, Clone)]
pub struct PruneIdlePatternsCommand {
    pub idle_hours: u64,
    /// Reference time; defaults to now.
    pub as_of: Option<Timestamp>,
}

impl PruneIdlePatternsCommand {
    pub fn from_hours(idle_hours: u64) -> Self {
        Self {
            idle_hours,
            as_of: None,
        }
    }
}

/// Result of a prune run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PruneIdlePatternsResult {
    pub evicted: usize,
}

/// Handler for idle pattern eviction.
pub struct PruneIdlePatternsHandler {
    repository: Arc<dyn PatternRepository>,
}

impl PruneIdlePatternsHandler {
    pub fn new(repository: Arc<dyn PatternRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: PruneIdlePatternsCommand,
    ) -> Result<PruneIdlePatternsResult, DomainError> {
        let now = cmd.as_of.unwrap_or_else(Timestamp::now);
        let cutoff = now.minus_hours(cmd.idle_hours);

        let evicted = self.repository.evict_idle(cutoff).await?;

        info!(evicted, idle_hours = cmd.idle_hours, "Pruned idle patterns");
        Ok(PruneIdlePatternsResult { evicted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryPatternRepository;
    use crate::domain::foundation::UserId;
    use crate::domain::mirror::ThemeLabel;

    const BASE: u64 = 1_705_276_800;

    #[tokio::test]
    async fn evicts_users_idle_past_ttl() {
        let repo = Arc::new(InMemoryPatternRepository::new());
        let stale = UserId::new("stale").unwrap();
        let fresh = UserId::new("fresh").unwrap();
        repo.record_query(&stale, ThemeLabel::Stagnation, Timestamp::from_unix_secs(BASE))
            .await
            .unwrap();
        repo.record_query(
            &fresh,
            ThemeLabel::Stagnation,
            Timestamp::from_unix_secs(BASE + 47 * 3_600),
        )
        .await
        .unwrap();

        let handler = PruneIdlePatternsHandler::new(repo.clone());
        let cmd = PruneIdlePatternsCommand {
            as_of: Some(Timestamp::from_unix_secs(BASE + 48 * 3_600)),
            ..PruneIdlePatternsCommand::from_hours(24)
        };
        let result = handler.handle(cmd).await.unwrap();

        assert_eq!(result.evicted, 1);
        assert_eq!(repo.user_count().await, 1);
        assert_eq!(repo.get(&fresh).await.unwrap().theme_count(), 1);
        assert_eq!(repo.get(&stale).await.unwrap().theme_count(), 0);
    }

    #[tokio::test]
    async fn nothing_to_prune_on_empty_store() {
        let handler = PruneIdlePatternsHandler::new(Arc::new(InMemoryPatternRepository::new()));
        let result = handler
            .handle(PruneIdlePatternsCommand::from_hours(1))
            .await
            .unwrap();
        assert_eq!(result.evicted, 0);
    }
}
