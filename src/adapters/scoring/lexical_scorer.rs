//! Lexical Scorer Adapter
//!
//! Weighted keyword and punctuation counting. Each keyword counts once no
//! matter how often it appears. Arithmetic runs in integer hundredths so
//! scores land exactly on the threshold values.

use super::lexicon::{AGREEABLE, CHALLENGE, MIRROR, SHADOW, SOFT, THEME_CUES};
use crate::domain::mirror::ThemeLabel;
use crate::ports::Scorer;

const AGREEABLE_WEIGHT: u32 = 15;
const SOFT_WEIGHT: u32 = 10;
const EXCLAMATION_WEIGHT: u32 = 10;
const EXCLAMATION_CAP: u32 = 30;

const CHALLENGE_WEIGHT: u32 = 10;
const SHADOW_WEIGHT: u32 = 15;
const MIRROR_WEIGHT: u32 = 10;
const QUESTION_WEIGHT: u32 = 5;
const QUESTION_CAP: u32 = 20;

/// Keyword scorer over fixed tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalScorer;

impl LexicalScorer {
    pub fn new() -> Self {
        Self
    }
}

impl Scorer for LexicalScorer {
    fn score_sentiment(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        let hundredths = AGREEABLE_WEIGHT * distinct_hits(&lower, AGREEABLE)
            + SOFT_WEIGHT * distinct_hits(&lower, SOFT)
            + capped(count_char(text, '!'), EXCLAMATION_WEIGHT, EXCLAMATION_CAP);
        to_unit(hundredths)
    }

    fn score_challenge(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        let hundredths = CHALLENGE_WEIGHT * distinct_hits(&lower, CHALLENGE)
            + SHADOW_WEIGHT * distinct_hits(&lower, SHADOW)
            + MIRROR_WEIGHT * distinct_hits(&lower, MIRROR)
            + capped(count_char(text, '?'), QUESTION_WEIGHT, QUESTION_CAP);
        to_unit(hundredths)
    }

    fn classify_theme(&self, query: &str) -> ThemeLabel {
        let lower = query.to_lowercase();
        THEME_CUES
            .iter()
            .find(|(_, cues)| cues.iter().any(|cue| lower.contains(cue)))
            .map(|(theme, _)| *theme)
            .unwrap_or(ThemeLabel::GeneralInquiry)
    }
}

fn distinct_hits(lower: &str, words: &[&str]) -> u32 {
    words.iter().filter(|w| lower.contains(*w)).count() as u32
}

fn count_char(text: &str, c: char) -> u32 {
    text.chars().filter(|ch| *ch == c).count().min(u32::MAX as usize) as u32
}

fn capped(count: u32, weight: u32, cap: u32) -> u32 {
    count.saturating_mul(weight).min(cap)
}

fn to_unit(hundredths: u32) -> f64 {
    f64::from(hundredths.min(100)) / 100.0
}
