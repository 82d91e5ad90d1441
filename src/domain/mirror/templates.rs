//! Template pools used to compose mirrored responses.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{MirrorIntensity, ThemeLabel};

/// Placeholder replaced by the user's approval-seeking count.
pub const COUNT_PLACEHOLDER: &str = "{count}";

/// Placeholder replaced by the looping theme, with underscores as spaces.
pub const THEME_PLACEHOLDER: &str = "{theme}";

/// The six archetypes behind the enhancement-path invitations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Hero,
    Sage,
    Lover,
    Magician,
    Sovereign,
    Fool,
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Archetype::Hero => "Hero",
            Archetype::Sage => "Sage",
            Archetype::Lover => "Lover",
            Archetype::Magician => "Magician",
            Archetype::Sovereign => "Sovereign",
            Archetype::Fool => "Fool",
        };
        f.write_str(name)
    }
}

/// A reflective question voiced by one archetype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchetypalInvitation {
    pub archetype: Archetype,
    pub question: String,
}

impl ArchetypalInvitation {
    pub fn new(archetype: Archetype, question: impl Into<String>) -> Self {
        Self {
            archetype,
            question: question.into(),
        }
    }

    /// Fixed single-line format appended to unmodified responses.
    pub fn render(&self) -> String {
        format!("Archetypal invitation ({}): {}", self.archetype, self.question)
    }
}

/// Every pool the transformer draws from.
///
/// [`TemplateLibrary::standard`] is the stock set; hosts may supply their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateLibrary {
    pub gentle_prefixes: Vec<String>,
    pub moderate_prefixes: Vec<String>,
    pub intense_prefixes: Vec<String>,
    /// May contain [`COUNT_PLACEHOLDER`] and [`THEME_PLACEHOLDER`].
    pub ego_loop_challenges: Vec<String>,
    pub shadow_prompts: Vec<String>,
    pub archetypal_challenges: Vec<String>,
    pub closing_questions: Vec<String>,
    pub invitations: Vec<ArchetypalInvitation>,
    /// Closing line appended after the body of a full transformation.
    #[serde(default)]
    pub signature: Option<String>,
}

impl TemplateLibrary {
    pub fn standard() -> Self {
        Self {
            gentle_prefixes: owned(&[
                "I want to offer a gentle reflection before we go on.",
                "Let me hold up a soft mirror for a moment.",
                "Before answering, something quietly worth noticing.",
                "A small observation, offered with care.",
            ]),
            moderate_prefixes: owned(&[
                "I notice something worth pausing on.",
                "Let me reflect something back to you honestly.",
                "Rather than simply agreeing, I want to add some friction here.",
                "There's a pattern here that deserves attention.",
            ]),
            intense_prefixes: owned(&[
                "I'm going to be direct with you, because agreement alone won't help.",
                "Let's stop circling and look at this squarely.",
                "Honest mirror, no cushioning.",
                "I won't just validate this. Here is what I see.",
            ]),
            ego_loop_challenges: owned(&[
                concat!(
                    "We keep returning to {theme}. I've counted {count} moments of seeking ",
                    "approval so far. What would change if you didn't need anyone's ",
                    "agreement on this?",
                ),
                concat!(
                    "Across our conversations you've looked for reassurance {count} times. ",
                    "What are you hoping I'll finally say?",
                ),
                concat!(
                    "This is familiar ground ({theme}), and {count} approval-seeking moments ",
                    "sit behind it. What is the question underneath the question?",
                ),
                concat!(
                    "I've noticed {count} requests for validation. ",
                    "What would you decide if nobody were watching?",
                ),
            ]),
            shadow_prompts: owned(&[
                "What part of this situation are you avoiding looking at directly?",
                "Where might you be giving your power away in this story?",
                "If this pattern were trying to teach you something, what would it be?",
                "What would you have to feel if you stopped blaming circumstances here?",
            ]),
            archetypal_challenges: owned(&[
                "What would the bravest version of you do with this?",
                "What truth are you not yet ready to say out loud?",
                "What are you assuming here that might not be true?",
                "Who would you be if this were already resolved?",
            ]),
            closing_questions: owned(&[
                "What feels true for you as you read this?",
                "What would you add, or push back on?",
                "Where does this land for you?",
                "What is one thing you might do differently?",
            ]),
            invitations: vec![
                ArchetypalInvitation::new(
                    Archetype::Hero,
                    "What challenge are you being called to meet right now?",
                ),
                ArchetypalInvitation::new(
                    Archetype::Sage,
                    "What would you see if you looked at this with complete honesty?",
                ),
                ArchetypalInvitation::new(
                    Archetype::Lover,
                    "What do you truly care about beneath this question?",
                ),
                ArchetypalInvitation::new(
                    Archetype::Magician,
                    "What could shift if you changed one belief here?",
                ),
                ArchetypalInvitation::new(
                    Archetype::Sovereign,
                    "What decision here is yours alone to make?",
                ),
                ArchetypalInvitation::new(
                    Archetype::Fool,
                    "What would you try if you weren't afraid of looking foolish?",
                ),
            ],
            signature: None,
        }
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn prefixes(&self, intensity: MirrorIntensity) -> &[String] {
        match intensity {
            MirrorIntensity::Gentle => &self.gentle_prefixes,
            MirrorIntensity::Moderate => &self.moderate_prefixes,
            MirrorIntensity::Intense => &self.intense_prefixes,
        }
    }

    /// Every prefix across all intensities.
    pub fn all_prefixes(&self) -> impl Iterator<Item = &String> {
        self.gentle_prefixes
            .iter()
            .chain(&self.moderate_prefixes)
            .chain(&self.intense_prefixes)
    }
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        Self::standard()
    }
}

/// Fills the ego-loop placeholders.
pub fn render_ego_loop_challenge(template: &str, approval_count: u32, theme: ThemeLabel) -> String {
    template
        .replace(COUNT_PLACEHOLDER, &approval_count.to_string())
        .replace(THEME_PLACEHOLDER, &theme.as_str().replace('_', " "))
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_pools_have_at_least_four_entries() {
        let lib = TemplateLibrary::standard();
        for intensity in [
            MirrorIntensity::Gentle,
            MirrorIntensity::Moderate,
            MirrorIntensity::Intense,
        ] {
            assert!(lib.prefixes(intensity).len() >= 4);
        }
        assert!(lib.ego_loop_challenges.len() >= 4);
        assert!(lib.shadow_prompts.len() >= 4);
        assert!(lib.archetypal_challenges.len() >= 4);
    }

    #[test]
    fn standard_library_has_no_signature() {
        assert_eq!(TemplateLibrary::standard().signature, None);

        let json = serde_json::to_value(TemplateLibrary::standard()).unwrap();
        let mut object = json.as_object().unwrap().clone();
        object.remove("signature");
        let parsed: TemplateLibrary = serde_json::from_value(object.into()).unwrap();
        assert_eq!(parsed, TemplateLibrary::standard());
    }

    #[test]
    fn standard_invitations_cover_six_archetypes() {
        let lib = TemplateLibrary::standard();
        let archetypes: std::collections::HashSet<_> =
            lib.invitations.iter().map(|i| i.archetype).collect();
        assert_eq!(lib.invitations.len(), 6);
        assert_eq!(archetypes.len(), 6);
    }

    #[test]
    fn every_ego_loop_challenge_mentions_the_count() {
        let lib = TemplateLibrary::standard();
        assert!(lib
            .ego_loop_challenges
            .iter()
            .all(|t| t.contains(COUNT_PLACEHOLDER)));
    }

    #[test]
    fn closing_questions_end_with_question_mark() {
        let lib = TemplateLibrary::standard();
        assert!(lib.closing_questions.iter().all(|q| q.ends_with('?')));
    }

    #[test]
    fn render_fills_placeholders() {
        let rendered = render_ego_loop_challenge(
            "{theme} came up; {count} approvals",
            7,
            ThemeLabel::ValidationSeeking,
        );
        assert_eq!(rendered, "validation seeking came up; 7 approvals");
    }

    #[test]
    fn invitation_renders_with_archetype_name() {
        let invitation = ArchetypalInvitation::new(Archetype::Sage, "What do you see?");
        assert_eq!(
            invitation.render(),
            "Archetypal invitation (Sage): What do you see?"
        );
    }
}
