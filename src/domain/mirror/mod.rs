//! Mirror module - response integrity and mirroring.
//!
//! Inspects an already-generated response together with the user's history,
//! decides whether it is too agreeable or feeds a repetition loop, and if so
//! rewrites it with a calibrated dose of challenge.
//!
//! # Components
//!
//! - `DissonanceEvaluator` - scores, ego-loop detection, shadow triggers
//! - `MirrorTransformer` - prefix/challenge/softening rewrite or archetypal invitation
//! - `ReflectionReporter` - summary once a theme dominates the stored history
//!
//! # Domain Invariants
//!
//! 1. `sycophancy_risk == sentiment > 0.8 && challenge < 0.3` (default thresholds)
//! 2. A user's stored history never exceeds 20 themes
//! 3. The approval-seeking counter never decreases
//! 4. Mirroring never fails a turn; every failure returns the original text

mod check;
mod context;
mod evaluator;
mod intensity;
mod pattern;
mod reflection;
mod response;
pub mod templates;
mod theme;
mod transformer;

pub use check::{DissonanceCheck, DissonanceThresholds, CHALLENGE_THRESHOLD, SENTIMENT_THRESHOLD};
pub use context::MirrorContext;
pub use evaluator::{shadow_triggers, DissonanceEvaluator, EgoLoopPolicy, SHADOW_TRIGGERS};
pub use intensity::MirrorIntensity;
pub use pattern::{ThemeRecord, UserPattern, MAX_RECENT_THEMES};
pub use reflection::{
    ReflectionReporter, ReflectionWindow, ThemeFrequency, DEFAULT_REFLECTION_THRESHOLD,
};
pub use response::{AssistantResponse, MirrorMetadata};
pub use templates::{ArchetypalInvitation, Archetype, TemplateLibrary};
pub use theme::ThemeLabel;
pub use transformer::{
    soften, MirrorTransformer, TransformError, Transformation, SOFTENING_REPLACEMENTS,
};
