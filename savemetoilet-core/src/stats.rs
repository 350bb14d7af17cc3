//! Summary statistics over a result list.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::entry::{Entry, EntryKind, Source, UrgencyBucket};

/// Entries grouped by quality band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct QualityDistribution {
    /// Quality 3 or more.
    pub high: usize,
    /// Quality 2.
    pub medium: usize,
    /// Quality 1.
    pub low: usize,
}

/// Counts and averages describing a set of entries.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SearchStats {
    /// Number of entries.
    pub total: usize,
    /// Entries per kind.
    pub by_kind: BTreeMap<EntryKind, usize>,
    /// Entries per urgency bucket.
    pub by_bucket: BTreeMap<UrgencyBucket, usize>,
    /// Entries per source.
    pub by_source: BTreeMap<Source, usize>,
    /// Mean distance rounded to the nearest metre; `None` for no entries.
    pub average_distance_meters: Option<f64>,
    /// Entries per quality band.
    pub quality: QualityDistribution,
}

impl SearchStats {
    /// Summarise `entries`.
    ///
    /// # Examples
    /// ```
    /// use savemetoilet_core::SearchStats;
    ///
    /// let stats = SearchStats::from_entries(&[]);
    /// assert_eq!(stats.total, 0);
    /// assert!(stats.average_distance_meters.is_none());
    /// ```
    #[must_use]
    pub fn from_entries(entries: &[Entry]) -> Self {
        let mut stats = Self {
            total: entries.len(),
            ..Self::default()
        };
        for entry in entries {
            *stats.by_kind.entry(entry.kind).or_default() += 1;
            *stats.by_bucket.entry(entry.urgency_bucket).or_default() += 1;
            *stats.by_source.entry(entry.source).or_default() += 1;
            match entry.quality_score {
                3.. => stats.quality.high += 1,
                2 => stats.quality.medium += 1,
                _ => stats.quality.low += 1,
            }
        }
        stats.average_distance_meters = average_distance(entries);
        stats
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "mean of distances; list lengths are far below 2^52"
)]
fn average_distance(entries: &[Entry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let sum: f64 = entries.iter().map(|entry| entry.distance_meters).sum();
    Some((sum / entries.len() as f64).round())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::EntryBuilder;
    use rstest::rstest;

    #[rstest]
    fn groups_entries_by_kind_bucket_and_quality() {
        let entries = vec![
            EntryBuilder::public("a").distance(100.0).quality(1).build(),
            EntryBuilder::public("b").distance(400.0).quality(2).build(),
            EntryBuilder::venue("c").distance(701.0).quality(4).build(),
        ];

        let stats = SearchStats::from_entries(&entries);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_kind.get(&EntryKind::PublicFacility), Some(&2));
        assert_eq!(stats.by_kind.get(&EntryKind::CommercialVenue), Some(&1));
        assert_eq!(stats.by_bucket.get(&UrgencyBucket::High), Some(&1));
        assert_eq!(stats.by_bucket.get(&UrgencyBucket::Medium), Some(&1));
        assert_eq!(stats.by_bucket.get(&UrgencyBucket::Low), Some(&1));
        assert_eq!(stats.by_source.get(&Source::PublicRegistry), Some(&2));
        assert_eq!(
            stats.quality,
            QualityDistribution {
                high: 1,
                medium: 1,
                low: 1
            }
        );
        assert_eq!(stats.average_distance_meters, Some(400.0));
    }
}
