//! Composite urgency scoring and final ordering.

use std::cmp::Ordering;

use crate::entry::Entry;
use crate::profile::UrgencyProfile;

/// Distance beyond which the proximity component contributes nothing.
pub const PROXIMITY_HORIZON_METERS: f64 = 1000.0;

/// Points awarded per quality step.
pub const QUALITY_POINTS: f64 = 100.0;

/// Scores and orders entries for one urgency profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UrgencyRanker {
    profile: UrgencyProfile,
}

impl UrgencyRanker {
    /// Create a ranker for `profile`.
    #[must_use]
    pub const fn new(profile: UrgencyProfile) -> Self {
        Self { profile }
    }

    /// Composite score for an entry at `distance_meters` with public quality
    /// `quality`.
    ///
    /// `max(0, 1000 - distance) * distance_weight + quality * 100 * quality_weight`
    ///
    /// # Examples
    /// ```
    /// use savemetoilet_core::{UrgencyLevel, UrgencyRanker};
    ///
    /// let ranker = UrgencyRanker::new(UrgencyLevel::Emergency.profile());
    /// assert!((ranker.score(200.0, 1) - 730.0).abs() < 1e-9);
    /// assert!((ranker.score(550.0, 3) - 435.0).abs() < 1e-9);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "weighted blend of proximity and quality"
    )]
    pub fn score(&self, distance_meters: f64, quality: u8) -> f64 {
        let proximity = (PROXIMITY_HORIZON_METERS - distance_meters).max(0.0);
        let quality_points = f64::from(quality) * QUALITY_POINTS;
        proximity * self.profile.distance_weight + quality_points * self.profile.quality_weight
    }

    /// Assign `urgency_score` to every entry and sort best first.
    ///
    /// Ties fall back to ascending distance, public facilities before
    /// commercial venues, then name and id.
    #[must_use]
    pub fn rank(&self, entries: Vec<Entry>) -> Vec<Entry> {
        let mut scored: Vec<Entry> = entries
            .into_iter()
            .map(|mut entry| {
                entry.urgency_score = self.score(entry.distance_meters, entry.quality_score);
                entry
            })
            .collect();
        scored.sort_by(compare_ranked);
        scored
    }
}

fn compare_ranked(a: &Entry, b: &Entry) -> Ordering {
    b.urgency_score
        .total_cmp(&a.urgency_score)
        .then_with(|| a.distance_meters.total_cmp(&b.distance_meters))
        .then_with(|| a.kind.priority().cmp(&b.kind.priority()))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}
