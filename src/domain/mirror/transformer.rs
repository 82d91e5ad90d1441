//! MirrorTransformer - rewrites a response according to a DissonanceCheck.
//!
//! Two paths:
//!
//! - **Full transformation** (sycophancy risk or ego loop): intensity prefix,
//!   challenge body, softened original text, closing question if needed.
//! - **Enhancement only**: the original text plus one archetypal invitation.
//!
//! Any failure falls back to the untouched original with no flags set.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use super::templates::render_ego_loop_challenge;
use super::{DissonanceCheck, MirrorContext, MirrorMetadata, TemplateLibrary};
use crate::ports::RandomSource;

/// Ordered literal substitutions applied to agreeable tokens.
///
/// Case-sensitive; the trailing `!` is part of the token.
pub const SOFTENING_REPLACEMENTS: &[(&str, &str)] = &[
    ("Absolutely!", "Perhaps"),
    ("absolutely!", "perhaps"),
    ("Definitely!", "It's possible"),
    ("definitely!", "it's possible"),
    ("Amazing!", "Interesting"),
    ("amazing!", "interesting"),
    ("Perfect!", "Worth exploring"),
    ("perfect!", "worth exploring"),
];

/// Errors raised inside a transformation; never surfaced to callers.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("template pool '{0}' is empty")]
    EmptyPool(&'static str),

    #[error("random source picked index {index} from pool '{pool}' of size {len}")]
    IndexOutOfRange {
        pool: &'static str,
        index: usize,
        len: usize,
    },
}

/// Output text plus the flags describing what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformation {
    pub text: String,
    pub flags: MirrorMetadata,
}

impl Transformation {
    /// The original text with no flags set.
    pub fn untouched(text: &str) -> Self {
        Self {
            text: text.to_string(),
            flags: MirrorMetadata::default(),
        }
    }
}

/// Composes mirrored responses from a template library.
pub struct MirrorTransformer {
    templates: TemplateLibrary,
    random: Arc<dyn RandomSource>,
}

impl MirrorTransformer {
    pub fn new(templates: TemplateLibrary, random: Arc<dyn RandomSource>) -> Self {
        Self { templates, random }
    }

    pub fn templates(&self) -> &TemplateLibrary {
        &self.templates
    }

    /// Transforms a response. Never fails.
    pub fn transform(&self, ctx: &MirrorContext<'_>, check: &DissonanceCheck) -> Transformation {
        let result = if check.requires_transformation() {
            self.full_transformation(ctx, check)
        } else {
            self.enhancement(ctx)
        };

        match result {
            Ok(transformation) => {
                debug!(
                    user_id = %ctx.user_id,
                    mirror_active = transformation.flags.mirror_active,
                    intensity = %ctx.intensity,
                    "Transformed response"
                );
                transformation
            }
            Err(e) => {
                warn!(
                    user_id = %ctx.user_id,
                    error = %e,
                    "Mirror transformation failed; returning original response"
                );
                Transformation::untouched(ctx.base_response_text)
            }
        }
    }

    fn full_transformation(
        &self,
        ctx: &MirrorContext<'_>,
        check: &DissonanceCheck,
    ) -> Result<Transformation, TransformError> {
        let prefix = self.choose(self.templates.prefixes(ctx.intensity), "prefix")?;

        let challenge = if check.ego_loop_detected() {
            let template = self.choose(&self.templates.ego_loop_challenges, "ego_loop")?;
            render_ego_loop_challenge(
                template,
                ctx.user_pattern.approval_seeking_count(),
                check.theme(),
            )
        } else if check.shadow_prompt_needed() {
            self.choose(&self.templates.shadow_prompts, "shadow")?.clone()
        } else {
            self.choose(&self.templates.archetypal_challenges, "archetypal")?
                .clone()
        };

        let mut body = soften(ctx.base_response_text);
        if !body.contains('?') {
            let closing = self.choose(&self.templates.closing_questions, "closing")?;
            if !body.trim().is_empty() {
                body.push_str("\n\n");
            }
            body.push_str(closing);
        }

        let mut text = format!("{}\n\n{}\n\n{}", prefix, challenge, body);
        if let Some(signature) = &self.templates.signature {
            text.push_str("\n\n");
            text.push_str(signature);
        }

        Ok(Transformation {
            text,
            flags: MirrorMetadata::transformed(ctx.intensity),
        })
    }

    fn enhancement(&self, ctx: &MirrorContext<'_>) -> Result<Transformation, TransformError> {
        let invitation = self.choose(&self.templates.invitations, "invitation")?;
        Ok(Transformation {
            text: format!("{}\n\n{}", ctx.base_response_text, invitation.render()),
            flags: MirrorMetadata::enhanced(),
        })
    }

    fn choose<'t, T>(&self, pool: &'t [T], name: &'static str) -> Result<&'t T, TransformError> {
        if pool.is_empty() {
            return Err(TransformError::EmptyPool(name));
        }
        let index = self.random.pick(pool.len());
        pool.get(index).ok_or(TransformError::IndexOutOfRange {
            pool: name,
            index,
            len: pool.len(),
        })
    }
}

/// Applies [`SOFTENING_REPLACEMENTS`] in order.
pub fn soften(text: &str) -> String {
    SOFTENING_REPLACEMENTS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::mirror::{
        DissonanceThresholds, MirrorIntensity, ThemeLabel, UserPattern,
    };
    use proptest::prelude::*;

    /// Always picks the same index.
    struct FixedIndex(usize);

    impl RandomSource for FixedIndex {
        fn pick(&self, _len: usize) -> usize {
            self.0
        }
    }

    fn transformer(index: usize) -> MirrorTransformer {
        MirrorTransformer::new(TemplateLibrary::standard(), Arc::new(FixedIndex(index)))
    }

    fn check(sycophantic: bool, ego_loop: bool, triggers: &[&str]) -> DissonanceCheck {
        let sentiment = if sycophantic { 0.9 } else { 0.1 };
        DissonanceCheck::new(
            sentiment,
            0.0,
            DissonanceThresholds::default(),
            ego_loop,
            ThemeLabel::ValidationSeeking,
            triggers.iter().map(|t| t.to_string()).collect(),
        )
    }

    fn run(
        transformer: &MirrorTransformer,
        text: &str,
        pattern: &UserPattern,
        intensity: MirrorIntensity,
        check: &DissonanceCheck,
    ) -> Transformation {
        let user_id = UserId::new("user-1").unwrap();
        let ctx = MirrorContext::new(&user_id, "query", text, pattern, intensity);
        transformer.transform(&ctx, check)
    }

    #[test]
    fn soften_replaces_agreeable_tokens() {
        let softened = soften("Absolutely! That's definitely amazing! Perfect!");
        assert_eq!(softened, "Perhaps That's definitely interesting Worth exploring");
    }

    #[test]
    fn soften_requires_exact_token() {
        assert_eq!(soften("absolutely fine"), "absolutely fine");
        assert_eq!(soften("ABSOLUTELY!"), "ABSOLUTELY!");
    }

    #[test]
    fn full_path_composes_prefix_challenge_body() {
        let t = transformer(0);
        let lib = TemplateLibrary::standard();
        let out = run(
            &t,
            "Great plan.",
            &UserPattern::new(),
            MirrorIntensity::Intense,
            &check(true, false, &[]),
        );

        let expected = format!(
            "{}\n\n{}\n\nGreat plan.\n\n{}",
            lib.intense_prefixes[0], lib.archetypal_challenges[0], lib.closing_questions[0]
        );
        assert_eq!(out.text, expected);
        assert_eq!(out.flags, MirrorMetadata::transformed(MirrorIntensity::Intense));
    }

    #[test]
    fn prefix_pool_follows_intensity() {
        let lib = TemplateLibrary::standard();
        for intensity in [
            MirrorIntensity::Gentle,
            MirrorIntensity::Moderate,
            MirrorIntensity::Intense,
        ] {
            let out = run(
                &transformer(1),
                "Yes.",
                &UserPattern::new(),
                intensity,
                &check(true, false, &[]),
            );
            assert!(out.text.starts_with(&lib.prefixes(intensity)[1]));
        }
    }

    #[test]
    fn existing_question_suppresses_closing_question() {
        let out = run(
            &transformer(0),
            "Have you tried it?",
            &UserPattern::new(),
            MirrorIntensity::Moderate,
            &check(true, false, &[]),
        );
        assert!(out.text.ends_with("Have you tried it?"));
    }

    #[test]
    fn ego_loop_challenge_mentions_approval_count() {
        let mut pattern = UserPattern::new();
        for i in 0..4 {
            pattern.record(ThemeLabel::ValidationSeeking, Timestamp::from_unix_secs(i));
        }
        let lib = TemplateLibrary::standard();

        let out = run(
            &transformer(1),
            "Sure.",
            &pattern,
            MirrorIntensity::Gentle,
            &check(false, true, &["blame"]),
        );

        let expected = render_ego_loop_challenge(
            &lib.ego_loop_challenges[1],
            4,
            ThemeLabel::ValidationSeeking,
        );
        assert!(out.text.contains(&expected));
        assert!(out.text.contains("4 times"));
        assert!(out.flags.mirror_active);
    }

    #[test]
    fn shadow_prompt_used_when_no_ego_loop() {
        let lib = TemplateLibrary::standard();
        let out = run(
            &transformer(2),
            "Sure.",
            &UserPattern::new(),
            MirrorIntensity::Moderate,
            &check(true, false, &["victim"]),
        );
        assert!(out.text.contains(&lib.shadow_prompts[2]));
    }

    #[test]
    fn enhancement_path_appends_invitation_only() {
        let lib = TemplateLibrary::standard();
        let out = run(
            &transformer(3),
            "Here is a balanced answer.",
            &UserPattern::new(),
            MirrorIntensity::Intense,
            &check(false, false, &["blame"]),
        );

        assert_eq!(
            out.text,
            format!("Here is a balanced answer.\n\n{}", lib.invitations[3].render())
        );
        assert_eq!(out.flags, MirrorMetadata::enhanced());
    }

    #[test]
    fn signature_closes_full_transformation_only() {
        let lib = TemplateLibrary::standard().with_signature("-- the mirror");
        let t = MirrorTransformer::new(lib, Arc::new(FixedIndex(0)));

        let full = run(
            &t,
            "Great plan?",
            &UserPattern::new(),
            MirrorIntensity::Moderate,
            &check(true, false, &[]),
        );
        assert!(full.text.ends_with("Great plan?\n\n-- the mirror"));

        let enhanced = run(
            &t,
            "Great plan?",
            &UserPattern::new(),
            MirrorIntensity::Moderate,
            &check(false, false, &[]),
        );
        assert!(!enhanced.text.contains("-- the mirror"));
    }

    #[test]
    fn empty_pool_falls_back_to_original() {
        let mut lib = TemplateLibrary::standard();
        lib.moderate_prefixes.clear();
        let t = MirrorTransformer::new(lib, Arc::new(FixedIndex(0)));

        let out = run(
            &t,
            "Absolutely! Yes!",
            &UserPattern::new(),
            MirrorIntensity::Moderate,
            &check(true, false, &[]),
        );
        assert_eq!(out, Transformation::untouched("Absolutely! Yes!"));
        assert!(out.flags.is_untouched());
    }

    #[test]
    fn misbehaving_random_source_falls_back_to_original() {
        let out = run(
            &transformer(99),
            "Plain text",
            &UserPattern::new(),
            MirrorIntensity::Moderate,
            &check(false, false, &[]),
        );
        assert_eq!(out, Transformation::untouched("Plain text"));
    }

    #[test]
    fn empty_body_gets_closing_question_without_leading_gap() {
        let lib = TemplateLibrary::standard();
        let out = run(
            &transformer(0),
            "",
            &UserPattern::new(),
            MirrorIntensity::Moderate,
            &check(true, false, &[]),
        );
        assert!(out.text.ends_with(&format!("\n\n{}", lib.closing_questions[0])));
        assert!(!out.text.contains("\n\n\n"));
    }

    proptest! {
        #[test]
        fn transform_never_panics(
            text in ".{0,400}",
            sycophantic in any::<bool>(),
            ego_loop in any::<bool>(),
            index in 0usize..4,
        ) {
            let out = run(
                &transformer(index),
                &text,
                &UserPattern::new(),
                MirrorIntensity::Moderate,
                &check(sycophantic, ego_loop, &[]),
            );
            prop_assert!(out.text.contains(&soften(&text)) || out.text.contains(&text));
        }
    }
}
