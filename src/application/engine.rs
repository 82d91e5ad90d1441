//! MirrorEngine - configured facade over the application handlers.

use std::sync::Arc;

use tracing::{debug, info};

use crate::adapters::{InMemoryPatternRepository, LexicalScorer, SeededRandom, ThreadRandom};
use crate::config::{AppConfig, RetentionConfig};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::mirror::{
    AssistantResponse, DissonanceEvaluator, MirrorIntensity, MirrorTransformer,
    ReflectionReporter, TemplateLibrary,
};
use crate::ports::{PatternRepository, RandomSource, Scorer};

use super::handlers::{
    MirrorResponseCommand, MirrorResponseHandler, MirrorResponseResult, PruneIdlePatternsCommand,
    PruneIdlePatternsHandler, WeeklyReflectionHandler, WeeklyReflectionQuery,
};

/// Entry point for hosts: mirror turns, read reflections, prune idle users.
pub struct MirrorEngine {
    mirror: MirrorResponseHandler,
    reflection: WeeklyReflectionHandler,
    prune: PruneIdlePatternsHandler,
    repository: Arc<dyn PatternRepository>,
    default_intensity: MirrorIntensity,
    retention: RetentionConfig,
}

impl MirrorEngine {
    /// Builds an engine with the lexical scorer and standard templates.
    ///
    /// A configured `rng_seed` makes template selection reproducible.
    pub fn from_config(config: &AppConfig, repository: Arc<dyn PatternRepository>) -> Self {
        let random: Arc<dyn RandomSource> = match config.engine.rng_seed {
            Some(seed) => Arc::new(SeededRandom::new(seed)),
            None => Arc::new(ThreadRandom),
        };
        Self::new(
            config,
            repository,
            Arc::new(LexicalScorer::new()),
            random,
            TemplateLibrary::standard(),
        )
    }

    /// Builds an engine over a fresh in-memory store.
    pub fn in_memory(config: &AppConfig) -> Self {
        Self::from_config(config, Arc::new(InMemoryPatternRepository::new()))
    }

    pub fn new(
        config: &AppConfig,
        repository: Arc<dyn PatternRepository>,
        scorer: Arc<dyn Scorer>,
        random: Arc<dyn RandomSource>,
        templates: TemplateLibrary,
    ) -> Self {
        let engine = &config.engine;
        let evaluator = DissonanceEvaluator::new(scorer)
            .with_thresholds(engine.thresholds())
            .with_ego_loop_policy(engine.ego_loop_policy());
        let transformer = MirrorTransformer::new(templates, random);
        let reporter =
            ReflectionReporter::new(engine.reflection_threshold, engine.reflection_window());

        info!(
            sentiment_threshold = engine.sentiment_threshold,
            challenge_threshold = engine.challenge_threshold,
            ego_loop_window = engine.ego_loop_window,
            seeded = engine.rng_seed.is_some(),
            "Mirror engine initialized"
        );

        Self {
            mirror: MirrorResponseHandler::new(repository.clone(), evaluator, transformer),
            reflection: WeeklyReflectionHandler::new(repository.clone(), reporter),
            prune: PruneIdlePatternsHandler::new(repository.clone()),
            repository,
            default_intensity: engine.default_intensity,
            retention: config.retention.clone(),
        }
    }

    pub fn repository(&self) -> &Arc<dyn PatternRepository> {
        &self.repository
    }

    pub fn default_intensity(&self) -> MirrorIntensity {
        self.default_intensity
    }

    /// Mirrors one turn at the configured default intensity.
    pub async fn mirror(
        &self,
        user_id: &UserId,
        original_query: &str,
        response: &AssistantResponse,
    ) -> MirrorResponseResult {
        self.mirror_with_intensity(user_id, original_query, response, self.default_intensity)
            .await
    }

    pub async fn mirror_with_intensity(
        &self,
        user_id: &UserId,
        original_query: &str,
        response: &AssistantResponse,
        intensity: MirrorIntensity,
    ) -> MirrorResponseResult {
        self.mirror
            .handle(MirrorResponseCommand {
                user_id: user_id.clone(),
                original_query: original_query.to_string(),
                response: response.clone(),
                intensity,
            })
            .await
    }

    pub async fn weekly_reflection(&self, user_id: &UserId) -> Result<Option<String>, DomainError> {
        self.reflection
            .handle(WeeklyReflectionQuery::new(user_id.clone()))
            .await
    }

    /// Evicts idle patterns per the retention policy; a no-op when none is configured.
    pub async fn prune_idle(&self) -> Result<usize, DomainError> {
        let Some(hours) = self.retention.idle_ttl_hours else {
            debug!("No idle TTL configured; skipping prune");
            return Ok(0);
        };
        let result = self
            .prune
            .handle(PruneIdlePatternsCommand::from_hours(hours))
            .await?;
        Ok(result.evicted)
    }
}
