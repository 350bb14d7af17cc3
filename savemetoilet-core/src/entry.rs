//! Canonical restroom entry shared by every pipeline stage.

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geo_math;

/// Placeholder used when an upstream record has no address.
pub const ADDRESS_UNAVAILABLE: &str = "address unavailable";

/// Broad classification of a restroom-providing location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EntryKind {
    /// Publicly operated restroom from the facility registry.
    PublicFacility,
    /// Café, department store or similar business.
    CommercialVenue,
}

impl EntryKind {
    /// Ordering used when every other ranking key ties; public sorts first.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::PublicFacility => 0,
            Self::CommercialVenue => 1,
        }
    }

    /// Whether entries of this kind are free to use by default.
    #[must_use]
    pub const fn free_by_default(self) -> bool {
        matches!(self, Self::PublicFacility)
    }
}

/// Adapter family an entry originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Source {
    /// Government public-toilet registry.
    PublicRegistry,
    /// Commercial place directory.
    VenueDirectory,
    /// Static sample list bundled with the engine.
    BuiltInSample,
}

impl Source {
    /// Prefix applied to provider identifiers to build entry ids.
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::PublicRegistry => "public",
            Self::VenueDirectory => "venue",
            Self::BuiltInSample => "sample",
        }
    }

    /// Stable key used in statistics and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PublicRegistry => "public_registry",
            Self::VenueDirectory => "venue_directory",
            Self::BuiltInSample => "built_in_sample",
        }
    }
}

/// Coarse proximity label derived only from distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UrgencyBucket {
    /// Closer than [`BucketThresholds::high_below`].
    High,
    /// Closer than [`BucketThresholds::medium_below`].
    Medium,
    /// Everything further away.
    Low,
}

/// Distance cut-offs for [`UrgencyBucket`] assignment, in metres.
///
/// The defaults of 300 m and 600 m are inherited product values that have
/// not been validated against user research.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BucketThresholds {
    /// Distances strictly below this are [`UrgencyBucket::High`].
    pub high_below: f64,
    /// Distances strictly below this are [`UrgencyBucket::Medium`].
    pub medium_below: f64,
}

impl BucketThresholds {
    /// Default high-urgency cut-off.
    pub const DEFAULT_HIGH_BELOW: f64 = 300.0;
    /// Default medium-urgency cut-off.
    pub const DEFAULT_MEDIUM_BELOW: f64 = 600.0;

    /// Assign a bucket to `distance_meters`.
    ///
    /// # Examples
    /// ```
    /// use savemetoilet_core::{BucketThresholds, UrgencyBucket};
    ///
    /// let thresholds = BucketThresholds::default();
    /// assert_eq!(thresholds.bucket_for(299.9), UrgencyBucket::High);
    /// assert_eq!(thresholds.bucket_for(300.0), UrgencyBucket::Medium);
    /// assert_eq!(thresholds.bucket_for(600.0), UrgencyBucket::Low);
    /// ```
    #[must_use]
    pub fn bucket_for(&self, distance_meters: f64) -> UrgencyBucket {
        if distance_meters < self.high_below {
            UrgencyBucket::High
        } else if distance_meters < self.medium_below {
            UrgencyBucket::Medium
        } else {
            UrgencyBucket::Low
        }
    }
}

impl Default for BucketThresholds {
    fn default() -> Self {
        Self {
            high_below: Self::DEFAULT_HIGH_BELOW,
            medium_below: Self::DEFAULT_MEDIUM_BELOW,
        }
    }
}

/// Accessibility and amenity flags. `None` means the source did not say.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Facilities {
    /// Step-free or wheelchair accessible cubicle.
    pub disabled_access: Option<bool>,
    /// Baby changing table available.
    pub baby_changing: Option<bool>,
    /// Separate facilities per gender.
    pub separate_gender: Option<bool>,
    /// Customer wifi.
    pub wifi: Option<bool>,
    /// On-site parking.
    pub parking: Option<bool>,
}

/// One normalized, rankable restroom-providing location.
///
/// Entries are built fresh for every search and are not mutated once the
/// ranking stage has run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entry {
    /// `"{source prefix}_{provider id}"`; stable for identical queries.
    pub id: String,
    /// Trimmed, non-empty display name.
    pub name: String,
    /// Public facility or commercial venue.
    pub kind: EntryKind,
    /// WGS84 position with `x = longitude` and `y = latitude`.
    pub location: Coord<f64>,
    /// Free-text address or [`ADDRESS_UNAVAILABLE`].
    pub address: String,
    /// Whether the restroom can be used without a purchase.
    pub is_free: bool,
    /// Rounded quality in `1..=5`.
    pub quality_score: u8,
    /// Unrounded quality in `1.0..=5.0`.
    pub quality_precise: f64,
    /// Great-circle distance from the query origin.
    pub distance_meters: f64,
    /// Proximity label derived from `distance_meters`.
    pub urgency_bucket: UrgencyBucket,
    /// Composite ranking value for the active urgency profile.
    pub urgency_score: f64,
    /// Originating adapter family.
    pub source: Source,
    /// Opening hours as reported upstream.
    pub hours: Option<String>,
    /// Contact number as reported upstream.
    pub phone: Option<String>,
    /// Accessibility flags as reported upstream.
    pub facilities: Facilities,
    /// Venue category key, e.g. `starbucks`; `None` for public facilities.
    pub category: Option<String>,
    /// Presentation hint for map markers.
    pub icon: String,
    /// Presentation colour as a hex string.
    pub color: String,
}

impl Entry {
    /// Estimated walking time from the query origin.
    #[must_use]
    pub fn walk_minutes(&self) -> u32 {
        geo_math::walk_minutes(self.distance_meters)
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, UrgencyBucket::High)]
    #[case(299.0, UrgencyBucket::High)]
    #[case(300.0, UrgencyBucket::Medium)]
    #[case(599.99, UrgencyBucket::Medium)]
    #[case(600.0, UrgencyBucket::Low)]
    #[case(5_000.0, UrgencyBucket::Low)]
    fn default_thresholds_split_at_300_and_600(
        #[case] distance: f64,
        #[case] expected: UrgencyBucket,
    ) {
        assert_eq!(BucketThresholds::default().bucket_for(distance), expected);
    }

    #[rstest]
    fn custom_thresholds_are_honoured() {
        let thresholds = BucketThresholds {
            high_below: 100.0,
            medium_below: 200.0,
        };
        assert_eq!(thresholds.bucket_for(150.0), UrgencyBucket::Medium);
    }

    #[rstest]
    fn public_facilities_sort_before_venues() {
        assert!(EntryKind::PublicFacility.priority() < EntryKind::CommercialVenue.priority());
        assert!(EntryKind::PublicFacility.free_by_default());
        assert!(!EntryKind::CommercialVenue.free_by_default());
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn enums_serialise_in_snake_case() {
        let json = serde_json::to_string(&Source::PublicRegistry).expect("serialise source");
        assert_eq!(json, "\"public_registry\"");
        let json = serde_json::to_string(&UrgencyBucket::Medium).expect("serialise bucket");
        assert_eq!(json, "\"medium\"");
    }
}
