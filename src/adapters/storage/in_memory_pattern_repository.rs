//! In-Memory Pattern Repository Adapter
//!
//! Keeps one `UserPattern` per user behind its own lock. Writes for the same
//! user are serialized; different users proceed in parallel.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::mirror::{ThemeLabel, UserPattern};
use crate::ports::{PatternRepository, PatternSignals, PatternStoreError, RecordedQuery};

type PatternSlot = Arc<Mutex<UserPattern>>;

/// In-memory storage for user patterns
#[derive(Debug, Clone, Default)]
pub struct InMemoryPatternRepository {
    users: Arc<RwLock<HashMap<UserId, PatternSlot>>>,
}

impl InMemoryPatternRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a pattern built elsewhere (e.g. from the host's durable history).
    ///
    /// Malformed patterns are accepted here and reset on first access.
    pub async fn hydrate(&self, user_id: UserId, pattern: UserPattern) {
        let slot = self.slot_or_insert(&user_id).await;
        *slot.lock().await = pattern;
    }

    /// Get the number of tracked users
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.users.write().await.clear();
    }

    async fn slot(&self, user_id: &UserId) -> Option<PatternSlot> {
        self.users.read().await.get(user_id).cloned()
    }

    async fn slot_or_insert(&self, user_id: &UserId) -> PatternSlot {
        if let Some(slot) = self.slot(user_id).await {
            return slot;
        }
        self.users
            .write()
            .await
            .entry(user_id.clone())
            .or_default()
            .clone()
    }
}

/// Resets a pattern that violates its invariants.
fn repair(user_id: &UserId, pattern: &mut UserPattern) {
    if !pattern.is_well_formed() {
        warn!(user_id = %user_id, "Stored pattern is malformed; resetting to default");
        *pattern = UserPattern::default();
    }
}

#[async_trait]
impl PatternRepository for InMemoryPatternRepository {
    async fn record_query_with_prior(
        &self,
        user_id: &UserId,
        theme: ThemeLabel,
        at: Timestamp,
    ) -> Result<RecordedQuery, PatternStoreError> {
        let slot = self.slot_or_insert(user_id).await;
        let mut pattern = slot.lock().await;
        repair(user_id, &mut pattern);
        let prior = pattern.clone();
        pattern.record(theme, at);
        Ok(RecordedQuery {
            prior,
            updated: pattern.clone(),
        })
    }

    async fn get(&self, user_id: &UserId) -> Result<UserPattern, PatternStoreError> {
        match self.slot(user_id).await {
            Some(slot) => {
                let mut pattern = slot.lock().await;
                repair(user_id, &mut pattern);
                Ok(pattern.clone())
            }
            None => Ok(UserPattern::default()),
        }
    }

    async fn note_signals(
        &self,
        user_id: &UserId,
        signals: &PatternSignals,
    ) -> Result<(), PatternStoreError> {
        if signals.is_empty() {
            return Ok(());
        }
        let slot = self.slot_or_insert(user_id).await;
        let mut pattern = slot.lock().await;
        repair(user_id, &mut pattern);
        signals.apply_to(&mut pattern);
        Ok(())
    }

    async fn evict_idle(&self, cutoff: Timestamp) -> Result<usize, PatternStoreError> {
        let mut users = self.users.write().await;

        // A slot cloned out of the map belongs to an in-flight call.
        let mut idle = Vec::new();
        for (user_id, slot) in users.iter() {
            if Arc::strong_count(slot) > 1 {
                continue;
            }
            if slot.lock().await.is_idle_since(&cutoff) {
                idle.push(user_id.clone());
            }
        }
        for user_id in &idle {
            users.remove(user_id);
        }

        if !idle.is_empty() {
            info!(evicted = idle.len(), "Evicted idle user patterns");
        }
        Ok(idle.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mirror::MAX_RECENT_THEMES;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn at(secs: u64) -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000 + secs)
    }

    #[tokio::test]
    async fn get_unknown_user_returns_default_without_creating() {
        let repo = InMemoryPatternRepository::new();

        let pattern = repo.get(&user("ghost")).await.unwrap();

        assert_eq!(pattern, UserPattern::default());
        assert_eq!(repo.user_count().await, 0);
    }

    #[tokio::test]
    async fn record_query_creates_pattern_lazily() {
        let repo = InMemoryPatternRepository::new();

        let pattern = repo
            .record_query(&user("u1"), ThemeLabel::ValidationSeeking, at(1))
            .await
            .unwrap();

        assert_eq!(pattern.theme_count(), 1);
        assert_eq!(pattern.approval_seeking_count(), 1);
        assert_eq!(repo.user_count().await, 1);
        assert_eq!(repo.get(&user("u1")).await.unwrap(), pattern);
    }

    #[tokio::test]
    async fn record_query_enforces_fifo_cap() {
        let repo = InMemoryPatternRepository::new();
        let id = user("u1");

        for i in 0..30 {
            repo.record_query(&id, ThemeLabel::Stagnation, at(i))
                .await
                .unwrap();
        }

        let pattern = repo.get(&id).await.unwrap();
        assert_eq!(pattern.theme_count(), MAX_RECENT_THEMES);
        assert_eq!(pattern.records().next().unwrap().recorded_at, at(10));
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let repo = InMemoryPatternRepository::new();

        repo.record_query(&user("a"), ThemeLabel::SelfWorth, at(1))
            .await
            .unwrap();
        repo.record_query(&user("b"), ThemeLabel::Stagnation, at(2))
            .await
            .unwrap();

        let a: Vec<_> = repo.get(&user("a")).await.unwrap().themes().collect();
        assert_eq!(a, vec![ThemeLabel::SelfWorth]);
    }

    #[tokio::test]
    async fn malformed_hydrated_pattern_is_reset_on_read() {
        let repo = InMemoryPatternRepository::new();
        let json = serde_json::json!({ "approval_seeking_count": 9, "growth_readiness": -2.0 });
        let broken: UserPattern = serde_json::from_value(json).unwrap();
        repo.hydrate(user("u1"), broken).await;

        let pattern = repo.get(&user("u1")).await.unwrap();

        assert_eq!(pattern, UserPattern::default());
    }

    #[tokio::test]
    async fn hydrated_pattern_is_extended_by_record() {
        let repo = InMemoryPatternRepository::new();
        let mut seeded = UserPattern::new();
        seeded.record(ThemeLabel::DecisionAvoidance, at(1));
        repo.hydrate(user("u1"), seeded).await;

        let pattern = repo
            .record_query(&user("u1"), ThemeLabel::DecisionAvoidance, at(2))
            .await
            .unwrap();

        assert_eq!(pattern.approval_seeking_count(), 2);
    }

    #[tokio::test]
    async fn note_signals_updates_sets() {
        let repo = InMemoryPatternRepository::new();
        let id = user("u1");
        repo.record_query(&id, ThemeLabel::Stagnation, at(1))
            .await
            .unwrap();

        let signals = PatternSignals {
            comfort_zone: vec!["stagnation".to_string()],
            shadow_avoidance: vec!["blame".to_string()],
        };
        repo.note_signals(&id, &signals).await.unwrap();

        let pattern = repo.get(&id).await.unwrap();
        assert!(pattern.comfort_zone_indicators().contains("stagnation"));
        assert!(pattern.shadow_avoidance_themes().contains("blame"));
    }

    #[tokio::test]
    async fn empty_signals_do_not_create_entries() {
        let repo = InMemoryPatternRepository::new();
        repo.note_signals(&user("u1"), &PatternSignals::default())
            .await
            .unwrap();
        assert_eq!(repo.user_count().await, 0);
    }

    #[tokio::test]
    async fn evict_idle_removes_only_stale_users() {
        let repo = InMemoryPatternRepository::new();
        repo.record_query(&user("stale"), ThemeLabel::Stagnation, at(10))
            .await
            .unwrap();
        repo.record_query(&user("fresh"), ThemeLabel::Stagnation, at(100))
            .await
            .unwrap();

        let evicted = repo.evict_idle(at(50)).await.unwrap();

        assert_eq!(evicted, 1);
        assert_eq!(repo.user_count().await, 1);
        assert_eq!(repo.get(&user("fresh")).await.unwrap().theme_count(), 1);
    }

    #[tokio::test]
    async fn evict_idle_skips_slots_in_use() {
        let repo = InMemoryPatternRepository::new();
        let stale = user("stale");
        repo.record_query(&stale, ThemeLabel::Stagnation, at(10))
            .await
            .unwrap();

        let in_flight = repo.slot(&stale).await.unwrap();
        assert_eq!(repo.evict_idle(at(50)).await.unwrap(), 0);

        in_flight.lock().await.record(ThemeLabel::SelfWorth, at(11));
        drop(in_flight);
        assert_eq!(repo.get(&stale).await.unwrap().theme_count(), 2);

        assert_eq!(repo.evict_idle(at(50)).await.unwrap(), 1);
        assert_eq!(repo.user_count().await, 0);
    }

    #[tokio::test]
    async fn hydrate_keeps_slots_held_by_writers() {
        let repo = InMemoryPatternRepository::new();
        let id = user("u1");
        repo.record_query(&id, ThemeLabel::Stagnation, at(1))
            .await
            .unwrap();
        let held = repo.slot(&id).await.unwrap();

        let mut replacement = UserPattern::new();
        replacement.record(ThemeLabel::SelfWorth, at(2));
        repo.hydrate(id.clone(), replacement).await;
        held.lock().await.record(ThemeLabel::SelfWorth, at(3));

        let pattern = repo.get(&id).await.unwrap();
        assert_eq!(pattern.theme_count(), 2);
        assert!(Arc::ptr_eq(&held, &repo.slot(&id).await.unwrap()));
    }

    #[tokio::test]
    async fn record_with_prior_returns_both_sides() {
        let repo = InMemoryPatternRepository::new();
        let id = user("u1");
        repo.record_query(&id, ThemeLabel::ValidationSeeking, at(1))
            .await
            .unwrap();

        let recorded = repo
            .record_query_with_prior(&id, ThemeLabel::ValidationSeeking, at(2))
            .await
            .unwrap();

        assert_eq!(recorded.prior.approval_seeking_count(), 1);
        assert_eq!(recorded.updated.approval_seeking_count(), 2);
        assert_eq!(recorded.updated.theme_count(), recorded.prior.theme_count() + 1);
    }

    #[tokio::test]
    async fn concurrent_records_for_same_user_are_serialized() {
        let repo = InMemoryPatternRepository::new();
        let id = user("busy");

        let mut handles = Vec::new();
        for i in 0..50u64 {
            let repo = repo.clone();
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                repo.record_query(&id, ThemeLabel::ValidationSeeking, at(i))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let pattern = repo.get(&id).await.unwrap();
        assert_eq!(pattern.approval_seeking_count(), 50);
        assert_eq!(pattern.theme_count(), MAX_RECENT_THEMES);
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let repo = InMemoryPatternRepository::new();
        repo.record_query(&user("u1"), ThemeLabel::Stagnation, at(1))
            .await
            .unwrap();
        repo.clear().await;
        assert_eq!(repo.user_count().await, 0);
    }
}
