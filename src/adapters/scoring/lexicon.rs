//! Keyword tables for lexical scoring and theme classification.
//!
//! All entries are lower-case and matched as substrings of lower-cased text.

use crate::domain::mirror::ThemeLabel;

/// Agreeable words, +0.15 each.
pub const AGREEABLE: &[&str] = &[
    "absolutely",
    "perfect",
    "amazing",
    "wonderful",
    "brilliant",
    "fantastic",
    "incredible",
    "definitely",
    "exactly right",
    "you're right",
    "great idea",
    "love that",
];

/// Soft, validating words, +0.10 each.
///
/// Kept at five entries: soft words plus maximal punctuation top out at
/// exactly 0.8, so text without agreeable words never crosses the threshold.
pub const SOFT: &[&str] = &["gentle", "loving", "validated", "supportive", "beautiful"];

/// Hedging and counterpoint words, +0.10 each.
pub const CHALLENGE: &[&str] = &[
    "however",
    "consider",
    "perhaps",
    "what if",
    "on the other hand",
    "alternatively",
    "notice",
    "question",
    "examine",
    "challenge",
];

/// Avoidance vocabulary, +0.15 each.
pub const SHADOW: &[&str] = &[
    "shadow",
    "resistance",
    "friction",
    "avoid",
    "discomfort",
    "uncomfortable",
    "fear",
    "projection",
];

/// Depth vocabulary, +0.10 each.
pub const MIRROR: &[&str] = &[
    "truth",
    "deeper",
    "hidden",
    "reflect",
    "beneath",
    "underlying",
    "pattern",
];

/// Classification cues in priority order; the first matching theme wins.
pub const THEME_CUES: &[(ThemeLabel, &[&str])] = &[
    (
        ThemeLabel::ValidationSeeking,
        &[
            "am i right",
            "was i right",
            "is it okay",
            "is it ok",
            "do you agree",
            "tell me i",
            "am i doing",
            "did i do the right",
            "good enough",
            "approve",
            "validate",
        ],
    ),
    (
        ThemeLabel::SelfWorth,
        &[
            "worthless",
            "not worth",
            "deserve",
            "hate myself",
            "i'm a failure",
            "self-worth",
            "self worth",
            "not enough",
            "unlovable",
        ],
    ),
    (
        ThemeLabel::DecisionAvoidance,
        &[
            "should i",
            "can't decide",
            "cannot decide",
            "what should",
            "decide for me",
            "which one",
            "not sure whether",
            "torn between",
        ],
    ),
    (
        ThemeLabel::Stagnation,
        &[
            "stuck",
            "same thing",
            "nothing changes",
            "no progress",
            "going nowhere",
            "again and again",
            "procrastinat",
        ],
    ),
    (
        ThemeLabel::RelationshipLoop,
        &[
            "partner",
            "boyfriend",
            "girlfriend",
            "my ex",
            "relationship",
            "husband",
            "wife",
            "breakup",
            "break up",
        ],
    ),
];
