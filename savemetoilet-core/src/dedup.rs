//! Collapse near-identical entries across and within sources.
//!
//! The first-seen record wins, so callers must feed records in a stable
//! order. The proximity rule treats a candidate as a duplicate when a nearby
//! accepted record's name contains the candidate's first word. Two unrelated
//! venues sharing a leading word ("Central Bakery", "Central Pharmacy") within
//! the threshold are therefore merged; this is a known false positive.

use geo::Coord;

use crate::entry::Entry;
use crate::geo_math::distance_meters;
use crate::normalize::Candidate;

/// Records the deduplicator can compare.
pub trait Deduplicable {
    /// Display name.
    fn dedup_name(&self) -> &str;
    /// WGS84 position.
    fn dedup_location(&self) -> Coord<f64>;
}

impl Deduplicable for Candidate {
    fn dedup_name(&self) -> &str {
        &self.name
    }

    fn dedup_location(&self) -> Coord<f64> {
        self.location
    }
}

impl Deduplicable for Entry {
    fn dedup_name(&self) -> &str {
        &self.name
    }

    fn dedup_location(&self) -> Coord<f64> {
        self.location
    }
}

/// Deduplication tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DedupConfig {
    /// Records closer than this many metres are compared by name prefix.
    pub proximity_meters: f64,
}

impl DedupConfig {
    /// Default proximity threshold in metres.
    pub const DEFAULT_PROXIMITY_METERS: f64 = 50.0;
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            proximity_meters: Self::DEFAULT_PROXIMITY_METERS,
        }
    }
}

struct Accepted {
    key: String,
    location: Coord<f64>,
}

/// Remove duplicates from `records`, keeping the first occurrence.
///
/// A candidate is rejected when its trimmed, lowercased name equals an
/// accepted record's, or when an accepted record lies within
/// `config.proximity_meters` and its lowercased name contains the
/// candidate's first whitespace-delimited word.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use savemetoilet_core::dedup::{DedupConfig, Deduplicable, deduplicate};
///
/// struct Place(&'static str, Coord<f64>);
///
/// impl Deduplicable for Place {
///     fn dedup_name(&self) -> &str { self.0 }
///     fn dedup_location(&self) -> Coord<f64> { self.1 }
/// }
///
/// let here = Coord { x: 127.0276, y: 37.4979 };
/// let places = vec![
///     Place("Starbucks Gangnam", here),
///     Place("starbucks gangnam ", here),
///     Place("Starbucks", here),
/// ];
/// let unique = deduplicate(places, &DedupConfig::default());
/// assert_eq!(unique.len(), 1);
/// ```
#[must_use]
pub fn deduplicate<T: Deduplicable>(records: Vec<T>, config: &DedupConfig) -> Vec<T> {
    let mut accepted: Vec<Accepted> = Vec::with_capacity(records.len());
    let mut kept = Vec::with_capacity(records.len());
    for record in records {
        let key = name_key(record.dedup_name());
        let location = record.dedup_location();
        if is_duplicate(&key, location, &accepted, config) {
            log::debug!("dropping duplicate {:?}", record.dedup_name());
            continue;
        }
        accepted.push(Accepted { key, location });
        kept.push(record);
    }
    kept
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

fn is_duplicate(
    key: &str,
    location: Coord<f64>,
    accepted: &[Accepted],
    config: &DedupConfig,
) -> bool {
    if accepted.iter().any(|seen| seen.key == key) {
        return true;
    }
    let Some(first_word) = key.split_whitespace().next() else {
        return false;
    };
    accepted.iter().any(|seen| {
        distance_meters(seen.location, location) < config.proximity_meters
            && seen.key.contains(first_word)
    })
}
