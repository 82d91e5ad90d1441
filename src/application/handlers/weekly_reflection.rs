//! WeeklyReflectionHandler - Query handler for a user's dominant-theme summary.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::mirror::ReflectionReporter;
use crate::ports::PatternRepository;

/// Query for a user's reflection.
#[derive(Debug, Clone)]
pub struct WeeklyReflectionQuery {
    pub user_id: UserId,
    /// Reference time for trailing windows; defaults to now.
    pub as_of: Option<Timestamp>,
}

impl WeeklyReflectionQuery {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            as_of: None,
        }
    }
}

/// Handler for reflection queries. Pure read.
pub struct WeeklyReflectionHandler {
    repository: Arc<dyn PatternRepository>,
    reporter: ReflectionReporter,
}

impl WeeklyReflectionHandler {
    pub fn new(repository: Arc<dyn PatternRepository>, reporter: ReflectionReporter) -> Self {
        Self {
            repository,
            reporter,
        }
    }

    pub async fn handle(
        &self,
        query: WeeklyReflectionQuery,
    ) -> Result<Option<String>, DomainError> {
        let pattern = self.repository.get(&query.user_id).await?;
        let now = query.as_of.unwrap_or_else(Timestamp::now);

        let reflection = self.reporter.weekly_reflection(&pattern, now);
        if reflection.is_some() {
            info!(user_id = %query.user_id, "Produced weekly reflection");
        }
        Ok(reflection)
    }
}
