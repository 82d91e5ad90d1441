//! UserPattern - rolling per-user history of classified query themes.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

use super::ThemeLabel;
use crate::domain::foundation::Timestamp;

/// Maximum number of themes retained per user; older entries are evicted first.
pub const MAX_RECENT_THEMES: usize = 20;

/// Readiness assigned before any theme has been recorded.
const INITIAL_GROWTH_READINESS: f64 = 0.5;

/// A classified query theme and when it was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeRecord {
    pub theme: ThemeLabel,
    pub recorded_at: Timestamp,
}

/// Per-user interaction pattern.
///
/// # Invariants
///
/// 1. `recent_themes` never holds more than [`MAX_RECENT_THEMES`] entries
/// 2. `approval_seeking_count` only increases
/// 3. `growth_readiness` stays within `[0, 1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPattern {
    #[serde(default)]
    recent_themes: VecDeque<ThemeRecord>,
    #[serde(default)]
    approval_seeking_count: u32,
    #[serde(default)]
    comfort_zone_indicators: BTreeSet<String>,
    #[serde(default)]
    shadow_avoidance_themes: BTreeSet<String>,
    #[serde(default = "initial_growth_readiness")]
    growth_readiness: f64,
    #[serde(default)]
    last_active: Option<Timestamp>,
}

fn initial_growth_readiness() -> f64 {
    INITIAL_GROWTH_READINESS
}

impl UserPattern {
    /// Creates an empty pattern for a user seen for the first time.
    pub fn new() -> Self {
        Self {
            recent_themes: VecDeque::with_capacity(MAX_RECENT_THEMES),
            approval_seeking_count: 0,
            comfort_zone_indicators: BTreeSet::new(),
            shadow_avoidance_themes: BTreeSet::new(),
            growth_readiness: INITIAL_GROWTH_READINESS,
            last_active: None,
        }
    }

    /// Appends a classified theme, evicting the oldest entries beyond the cap.
    pub fn record(&mut self, theme: ThemeLabel, at: Timestamp) {
        self.recent_themes.push_back(ThemeRecord {
            theme,
            recorded_at: at,
        });
        while self.recent_themes.len() > MAX_RECENT_THEMES {
            self.recent_themes.pop_front();
        }

        if theme.is_approval_seeking() {
            self.approval_seeking_count = self.approval_seeking_count.saturating_add(1);
        }

        self.last_active = Some(self.last_active.map_or(at, |prev| prev.max(at)));
        self.growth_readiness = self.readiness_from_window();
    }

    /// Share of the stored window that is *not* approval-seeking.
    fn readiness_from_window(&self) -> f64 {
        if self.recent_themes.is_empty() {
            return INITIAL_GROWTH_READINESS;
        }
        let approval = self
            .recent_themes
            .iter()
            .filter(|r| r.theme.is_approval_seeking())
            .count();
        1.0 - approval as f64 / self.recent_themes.len() as f64
    }

    /// Stored theme records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &ThemeRecord> {
        self.recent_themes.iter()
    }

    /// Stored theme labels, oldest first.
    pub fn themes(&self) -> impl Iterator<Item = ThemeLabel> + '_ {
        self.recent_themes.iter().map(|r| r.theme)
    }

    /// The last `n` recorded labels, oldest first.
    pub fn last_themes(&self, n: usize) -> impl Iterator<Item = ThemeLabel> + '_ {
        let skip = self.recent_themes.len().saturating_sub(n);
        self.recent_themes.iter().skip(skip).map(|r| r.theme)
    }

    pub fn theme_count(&self) -> usize {
        self.recent_themes.len()
    }

    pub fn approval_seeking_count(&self) -> u32 {
        self.approval_seeking_count
    }

    pub fn comfort_zone_indicators(&self) -> &BTreeSet<String> {
        &self.comfort_zone_indicators
    }

    pub fn shadow_avoidance_themes(&self) -> &BTreeSet<String> {
        &self.shadow_avoidance_themes
    }

    pub fn growth_readiness(&self) -> f64 {
        self.growth_readiness
    }

    pub fn last_active(&self) -> Option<Timestamp> {
        self.last_active
    }

    /// Notes a topic the user keeps retreating to. Returns true if it was new.
    pub fn note_comfort_zone(&mut self, indicator: impl Into<String>) -> bool {
        self.comfort_zone_indicators.insert(indicator.into())
    }

    /// Notes an avoidance theme surfaced by a shadow trigger. Returns true if it was new.
    pub fn note_shadow_avoidance(&mut self, theme: impl Into<String>) -> bool {
        self.shadow_avoidance_themes.insert(theme.into())
    }

    /// True if no theme has been recorded since `cutoff`.
    pub fn is_idle_since(&self, cutoff: &Timestamp) -> bool {
        match self.last_active {
            Some(at) => at.is_before(cutoff),
            None => true,
        }
    }

    /// Checks the structural invariants.
    ///
    /// Hydrated patterns come from outside the engine and may violate them.
    pub fn is_well_formed(&self) -> bool {
        self.recent_themes.len() <= MAX_RECENT_THEMES
            && self.growth_readiness.is_finite()
            && (0.0..=1.0).contains(&self.growth_readiness)
    }
}

impl Default for UserPattern {
    fn default() -> Self {
        Self::new()
    }
}
