//! MirrorResponseHandler - Command handler for one conversational turn.
//!
//! Records the query theme, evaluates the base response against the
//! history as it stood just before that record, and returns the (possibly)
//! transformed response. Every failure along the way is recovered locally;
//! the turn always completes.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::mirror::{
    AssistantResponse, DissonanceCheck, DissonanceEvaluator, MirrorContext, MirrorIntensity,
    MirrorTransformer, ThemeLabel, UserPattern,
};
use crate::ports::{PatternRepository, PatternSignals, RecordedQuery};

/// Command to mirror one assistant response.
#[derive(Debug, Clone)]
pub struct MirrorResponseCommand {
    pub user_id: UserId,
    pub original_query: String,
    pub response: AssistantResponse,
    pub intensity: MirrorIntensity,
}

/// Result of a mirrored turn.
#[derive(Debug, Clone)]
pub struct MirrorResponseResult {
    pub response: AssistantResponse,
    pub check: DissonanceCheck,
}

/// Handler for mirroring responses.
pub struct MirrorResponseHandler {
    repository: Arc<dyn PatternRepository>,
    evaluator: DissonanceEvaluator,
    transformer: MirrorTransformer,
}

impl MirrorResponseHandler {
    pub fn new(
        repository: Arc<dyn PatternRepository>,
        evaluator: DissonanceEvaluator,
        transformer: MirrorTransformer,
    ) -> Self {
        Self {
            repository,
            evaluator,
            transformer,
        }
    }

    pub async fn handle(&self, cmd: MirrorResponseCommand) -> MirrorResponseResult {
        let now = Timestamp::now();

        // 1. Classify the query
        let theme = self.evaluator.classify(&cmd.original_query);

        // 2. Record the theme, keeping the history it was recorded on top of
        let RecordedQuery { prior, updated } = match self
            .repository
            .record_query_with_prior(&cmd.user_id, theme, now)
            .await
        {
            Ok(recorded) => recorded,
            Err(e) => {
                warn!(user_id = %cmd.user_id, error = %e, "Recording query theme failed");
                self.local_record(&cmd.user_id, theme, now).await
            }
        };

        // 3. Evaluate against the prior history
        let ctx = MirrorContext::new(
            &cmd.user_id,
            &cmd.original_query,
            &cmd.response.content,
            &prior,
            cmd.intensity,
        );
        let check = self.evaluator.evaluate_classified(&ctx, theme);

        // 4. Fold turn observations into the pattern
        let signals = signals_for(&check);
        if !signals.is_empty() {
            if let Err(e) = self.repository.note_signals(&cmd.user_id, &signals).await {
                warn!(user_id = %cmd.user_id, error = %e, "Noting pattern signals failed");
            }
        }

        // 5. Transform against the updated pattern
        let transformation = self.transformer.transform(&ctx.with_pattern(&updated), &check);

        debug!(
            user_id = %cmd.user_id,
            response_id = %cmd.response.id,
            mirror_active = transformation.flags.mirror_active,
            archetypal = transformation.flags.archetypal_challenge_added,
            "Mirrored response"
        );

        // 6. Build the outgoing response
        let response = cmd
            .response
            .mirrored(transformation.text, transformation.flags);

        MirrorResponseResult { response, check }
    }

    /// Best-effort stand-in when the store refuses the write.
    async fn local_record(
        &self,
        user_id: &UserId,
        theme: ThemeLabel,
        at: Timestamp,
    ) -> RecordedQuery {
        let prior = match self.repository.get(user_id).await {
            Ok(pattern) => pattern,
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    error = %e,
                    "Pattern lookup failed; evaluating without history"
                );
                UserPattern::new()
            }
        };
        let mut updated = prior.clone();
        updated.record(theme, at);
        RecordedQuery { prior, updated }
    }
}

fn signals_for(check: &DissonanceCheck) -> PatternSignals {
    PatternSignals {
        comfort_zone: if check.ego_loop_detected() {
            vec![check.theme().to_string()]
        } else {
            Vec::new()
        },
        shadow_avoidance: check.shadow_triggers().to_vec(),
    }
}
