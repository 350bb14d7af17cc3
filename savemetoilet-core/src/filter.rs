//! User-selected inclusion rules applied to ranked entries.
//!
//! Every rule is an independent predicate, so rules commute and the order in
//! which they are applied does not change the surviving set. Filtering never
//! fails; an empty output is a valid result.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entry::{Entry, EntryKind};

/// Filter settings supplied with a search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchFilters {
    /// Keep public facilities.
    pub include_public: bool,
    /// Keep commercial venues.
    pub include_commercial: bool,
    /// Keep only entries that are free to use.
    pub only_free: bool,
    /// Minimum public quality score.
    pub min_quality: u8,
    /// Maximum distance from the origin in metres.
    pub max_distance: f64,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            include_public: true,
            include_commercial: true,
            only_free: false,
            min_quality: 1,
            max_distance: 1000.0,
        }
    }
}

/// A single inclusion predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterRule {
    /// Drop entries of this kind.
    ExcludeKind(EntryKind),
    /// Drop entries that require a purchase.
    OnlyFree,
    /// Drop entries whose quality score is below the threshold.
    MinQuality(u8),
    /// Drop entries further away than the threshold in metres.
    MaxDistance(f64),
}

impl FilterRule {
    /// Whether `entry` passes this rule.
    #[must_use]
    pub fn admits(&self, entry: &Entry) -> bool {
        match *self {
            Self::ExcludeKind(kind) => entry.kind != kind,
            Self::OnlyFree => entry.is_free,
            Self::MinQuality(min) => entry.quality_score >= min,
            Self::MaxDistance(max) => entry.distance_meters <= max,
        }
    }
}

impl SearchFilters {
    /// Rules implied by these settings.
    ///
    /// # Examples
    /// ```
    /// use savemetoilet_core::{FilterRule, SearchFilters};
    ///
    /// let filters = SearchFilters { only_free: true, ..SearchFilters::default() };
    /// assert!(filters.rules().contains(&FilterRule::OnlyFree));
    /// ```
    #[must_use]
    pub fn rules(&self) -> Vec<FilterRule> {
        let mut rules = Vec::with_capacity(5);
        if !self.include_public {
            rules.push(FilterRule::ExcludeKind(EntryKind::PublicFacility));
        }
        if !self.include_commercial {
            rules.push(FilterRule::ExcludeKind(EntryKind::CommercialVenue));
        }
        if self.only_free {
            rules.push(FilterRule::OnlyFree);
        }
        rules.push(FilterRule::MinQuality(self.min_quality));
        if self.max_distance.is_finite() {
            rules.push(FilterRule::MaxDistance(self.max_distance));
        }
        rules
    }

    /// Keep the entries that pass every rule, preserving order.
    #[must_use]
    pub fn apply(&self, entries: Vec<Entry>) -> Vec<Entry> {
        apply_rules(entries, &self.rules())
    }
}

/// Keep the entries admitted by every rule in `rules`, preserving order.
#[must_use]
pub fn apply_rules(entries: Vec<Entry>, rules: &[FilterRule]) -> Vec<Entry> {
    entries
        .into_iter()
        .filter(|entry| rules.iter().all(|rule| rule.admits(entry)))
        .collect()
}
