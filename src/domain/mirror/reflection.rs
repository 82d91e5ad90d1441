//! ReflectionReporter - periodic summary of a user's dominant theme.
//!
//! Despite the "weekly" name the default window is all-time: it counts over
//! whatever history the pattern store currently holds. A trailing-days
//! window can be selected instead.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ThemeLabel, UserPattern};
use crate::domain::foundation::Timestamp;

/// Minimum count of the dominant theme before a reflection is produced.
pub const DEFAULT_REFLECTION_THRESHOLD: usize = 12;

/// Which part of the stored history is aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReflectionWindow {
    /// Every stored theme.
    #[default]
    AllTime,
    /// Themes recorded within the given number of days before `now`.
    TrailingDays(u32),
}

/// Count of one theme within the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeFrequency {
    pub theme: ThemeLabel,
    pub count: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct ReflectionReporter {
    threshold: usize,
    window: ReflectionWindow,
}

impl ReflectionReporter {
    pub fn new(threshold: usize, window: ReflectionWindow) -> Self {
        Self { threshold, window }
    }

    /// Theme counts within the window, most frequent first.
    ///
    /// Ties are ordered by theme label declaration order.
    pub fn theme_frequencies(&self, pattern: &UserPattern, now: Timestamp) -> Vec<ThemeFrequency> {
        let cutoff = match self.window {
            ReflectionWindow::AllTime => None,
            ReflectionWindow::TrailingDays(days) => Some(now.minus_days(days)),
        };

        let mut counts: BTreeMap<ThemeLabel, usize> = BTreeMap::new();
        for record in pattern.records() {
            if cutoff.is_some_and(|c| record.recorded_at.is_before(&c)) {
                continue;
            }
            *counts.entry(record.theme).or_insert(0) += 1;
        }

        let mut frequencies: Vec<_> = counts
            .into_iter()
            .map(|(theme, count)| ThemeFrequency { theme, count })
            .collect();
        frequencies.sort_by(|a, b| b.count.cmp(&a.count).then(a.theme.cmp(&b.theme)));
        frequencies
    }

    /// A summary naming the dominant theme, if it reaches the threshold.
    pub fn weekly_reflection(&self, pattern: &UserPattern, now: Timestamp) -> Option<String> {
        let dominant = self.theme_frequencies(pattern, now).into_iter().next()?;
        if dominant.count < self.threshold {
            return None;
        }
        Some(format!(
            "Reflection: the theme of {} came up {} times in your recent conversations. \
             When something returns this often it is usually asking for attention \
             rather than answers. What might it be inviting you to look at?",
            dominant.theme.as_str().replace('_', " "),
            dominant.count
        ))
    }
}

impl Default for ReflectionReporter {
    fn default() -> Self {
        Self::new(DEFAULT_REFLECTION_THRESHOLD, ReflectionWindow::AllTime)
    }
}
