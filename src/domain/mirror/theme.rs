//! Theme labels - the closed vocabulary queries are classified into.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Categorical tag assigned to a user query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeLabel {
    ValidationSeeking,
    SelfWorth,
    DecisionAvoidance,
    Stagnation,
    RelationshipLoop,
    GeneralInquiry,
}

impl ThemeLabel {
    /// Every label, in declaration order.
    pub const ALL: [ThemeLabel; 6] = [
        ThemeLabel::ValidationSeeking,
        ThemeLabel::SelfWorth,
        ThemeLabel::DecisionAvoidance,
        ThemeLabel::Stagnation,
        ThemeLabel::RelationshipLoop,
        ThemeLabel::GeneralInquiry,
    ];

    /// Returns the wire name of this label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeLabel::ValidationSeeking => "validation_seeking",
            ThemeLabel::SelfWorth => "self_worth",
            ThemeLabel::DecisionAvoidance => "decision_avoidance",
            ThemeLabel::Stagnation => "stagnation",
            ThemeLabel::RelationshipLoop => "relationship_loop",
            ThemeLabel::GeneralInquiry => "general_inquiry",
        }
    }

    /// Themes that count toward a user's approval-seeking tally.
    pub fn is_approval_seeking(&self) -> bool {
        matches!(
            self,
            ThemeLabel::ValidationSeeking | ThemeLabel::DecisionAvoidance
        )
    }
}

impl fmt::Display for ThemeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeLabel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("theme", format!("unknown theme '{}'", s))
            })
    }
}
