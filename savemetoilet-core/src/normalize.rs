//! Map provider records onto the canonical candidate schema.
//!
//! One normalizer function exists per [`RawRecord`] variant. Records without
//! a usable name or position are rejected with a [`MalformedRecord`] reason;
//! the orchestrator logs and drops them rather than failing the search.

use geo::Coord;
use thiserror::Error;

use crate::category::{PUBLIC_FACILITY_COLOR, PUBLIC_FACILITY_ICON, VenueCategory};
use crate::entry::{
    ADDRESS_UNAVAILABLE, BucketThresholds, Entry, EntryKind, Facilities, Source, UrgencyBucket,
};
use crate::geo_math::distance_meters;
use crate::quality::{QualityScore, QualitySignals};
use crate::raw::{RawFacility, RawRecord, RawVenue};

/// Base quality of an ordinary public facility.
pub const PUBLIC_BASE_QUALITY: f64 = 1.0;

/// Base quality of a privately operated public facility.
pub const PRIVATE_OPERATED_BASE_QUALITY: f64 = 2.0;

const PRIVATE_OPERATED_MARKERS: [&str; 2] = ["민간", "private"];
const PUBLIC_DEFAULT_HOURS: &str = "24h";

/// Reasons a raw record cannot become a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRecord {
    /// The record has no non-blank name.
    #[error("record {provider_id} has no name")]
    MissingName {
        /// Upstream identifier of the rejected record.
        provider_id: String,
    },
    /// Latitude or longitude is absent.
    #[error("record {provider_id} has no coordinates")]
    MissingCoordinates {
        /// Upstream identifier of the rejected record.
        provider_id: String,
    },
    /// Coordinates are non-finite or outside the WGS84 range.
    #[error("record {provider_id} has invalid coordinates")]
    InvalidCoordinates {
        /// Upstream identifier of the rejected record.
        provider_id: String,
    },
}

/// A normalized record awaiting deduplication and quality scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// `"{source prefix}_{provider id}"`.
    pub id: String,
    /// Trimmed display name.
    pub name: String,
    /// Public facility or commercial venue.
    pub kind: EntryKind,
    /// WGS84 position with `x = longitude` and `y = latitude`.
    pub location: Coord<f64>,
    /// Address or placeholder.
    pub address: String,
    /// Whether the restroom can be used without a purchase.
    pub is_free: bool,
    /// Distance from the query origin in metres.
    pub distance_meters: f64,
    /// Proximity label.
    pub urgency_bucket: UrgencyBucket,
    /// Originating adapter family.
    pub source: Source,
    /// Opening hours.
    pub hours: Option<String>,
    /// Contact number.
    pub phone: Option<String>,
    /// Accessibility flags.
    pub facilities: Facilities,
    /// Venue category key.
    pub category: Option<String>,
    /// Marker icon.
    pub icon: String,
    /// Marker colour.
    pub color: String,
    /// Inputs for the quality scorer.
    pub signals: QualitySignals,
}

impl Candidate {
    /// Attach a quality score, producing an unranked entry.
    #[must_use]
    pub fn into_entry(self, quality: QualityScore) -> Entry {
        Entry {
            id: self.id,
            name: self.name,
            kind: self.kind,
            location: self.location,
            address: self.address,
            is_free: self.is_free,
            quality_score: quality.rounded,
            quality_precise: quality.precise,
            distance_meters: self.distance_meters,
            urgency_bucket: self.urgency_bucket,
            urgency_score: 0.0,
            source: self.source,
            hours: self.hours,
            phone: self.phone,
            facilities: self.facilities,
            category: self.category,
            icon: self.icon,
            color: self.color,
        }
    }
}

/// Converts raw records relative to one query origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    origin: Coord<f64>,
    thresholds: BucketThresholds,
}

impl Normalizer {
    /// Create a normalizer for `origin` using default bucket thresholds.
    #[must_use]
    pub fn new(origin: Coord<f64>) -> Self {
        Self::with_thresholds(origin, BucketThresholds::default())
    }

    /// Create a normalizer with explicit bucket thresholds.
    #[must_use]
    pub const fn with_thresholds(origin: Coord<f64>, thresholds: BucketThresholds) -> Self {
        Self { origin, thresholds }
    }

    /// Normalize any record, logging and discarding malformed ones.
    #[must_use]
    pub fn normalize(&self, record: RawRecord) -> Option<Candidate> {
        let result = match record {
            RawRecord::PublicFacility(facility) => self.normalize_facility(facility),
            RawRecord::Venue(venue) => self.normalize_venue(venue),
        };
        result
            .map_err(|reason| log::debug!("skipping record: {reason}"))
            .ok()
    }

    /// Normalize a public facility row.
    ///
    /// # Errors
    /// Returns [`MalformedRecord`] when the name or coordinates are unusable.
    pub fn normalize_facility(&self, raw: RawFacility) -> Result<Candidate, MalformedRecord> {
        let name = require_name(raw.name.as_deref(), &raw.provider_id)?;
        let location = require_location(raw.latitude, raw.longitude, &raw.provider_id)?;
        let base = if is_private_operated(raw.facility_type.as_deref()) {
            PRIVATE_OPERATED_BASE_QUALITY
        } else {
            PUBLIC_BASE_QUALITY
        };
        let distance = distance_meters(self.origin, location);
        Ok(Candidate {
            id: format!("{}_{}", Source::PublicRegistry.id_prefix(), raw.provider_id),
            name,
            kind: EntryKind::PublicFacility,
            location,
            address: address_or_placeholder(raw.address),
            is_free: EntryKind::PublicFacility.free_by_default(),
            distance_meters: distance,
            urgency_bucket: self.thresholds.bucket_for(distance),
            source: Source::PublicRegistry,
            hours: raw.hours.or_else(|| Some(PUBLIC_DEFAULT_HOURS.to_owned())),
            phone: raw.phone,
            facilities: raw.facilities.unwrap_or(Facilities {
                disabled_access: Some(true),
                separate_gender: Some(true),
                ..Facilities::default()
            }),
            category: None,
            icon: PUBLIC_FACILITY_ICON.to_owned(),
            color: PUBLIC_FACILITY_COLOR.to_owned(),
            signals: QualitySignals::base(base),
        })
    }

    /// Normalize a commercial venue result.
    ///
    /// Unknown category keys use the generic café configuration.
    ///
    /// # Errors
    /// Returns [`MalformedRecord`] when the name or coordinates are unusable.
    pub fn normalize_venue(&self, raw: RawVenue) -> Result<Candidate, MalformedRecord> {
        let name = require_name(raw.name.as_deref(), &raw.provider_id)?;
        let location = require_location(raw.latitude, raw.longitude, &raw.provider_id)?;
        let category = VenueCategory::lookup_or_fallback(&raw.category);
        let distance = distance_meters(self.origin, location);
        Ok(Candidate {
            id: format!("{}_{}", Source::VenueDirectory.id_prefix(), raw.provider_id),
            name,
            kind: EntryKind::CommercialVenue,
            location,
            address: address_or_placeholder(raw.address),
            is_free: category.is_free,
            distance_meters: distance,
            urgency_bucket: self.thresholds.bucket_for(distance),
            source: Source::VenueDirectory,
            hours: raw.hours,
            phone: raw.phone,
            facilities: raw.facilities.unwrap_or_default(),
            category: Some(category.key.to_owned()),
            icon: category.icon.to_owned(),
            color: category.color.to_owned(),
            signals: QualitySignals {
                base: category.base_quality,
                rating: raw.rating,
                price_level: raw.price_level,
            },
        })
    }
}

fn require_name(name: Option<&str>, provider_id: &str) -> Result<String, MalformedRecord> {
    name.map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| MalformedRecord::MissingName {
            provider_id: provider_id.to_owned(),
        })
}

fn require_location(
    latitude: Option<f64>,
    longitude: Option<f64>,
    provider_id: &str,
) -> Result<Coord<f64>, MalformedRecord> {
    let (Some(lat), Some(lng)) = (latitude, longitude) else {
        return Err(MalformedRecord::MissingCoordinates {
            provider_id: provider_id.to_owned(),
        });
    };
    if is_valid_wgs84(lat, lng) {
        Ok(Coord { x: lng, y: lat })
    } else {
        Err(MalformedRecord::InvalidCoordinates {
            provider_id: provider_id.to_owned(),
        })
    }
}

/// Whether `lat`/`lng` are finite and inside the WGS84 range.
#[must_use]
pub fn is_valid_wgs84(lat: f64, lng: f64) -> bool {
    lat.is_finite()
        && lng.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lng)
}

fn is_private_operated(facility_type: Option<&str>) -> bool {
    facility_type.is_some_and(|value| {
        let lowered = value.to_lowercase();
        PRIVATE_OPERATED_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
    })
}

fn address_or_placeholder(address: Option<String>) -> String {
    address
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| ADDRESS_UNAVAILABLE.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn normalizer() -> Normalizer {
        Normalizer::new(Coord {
            x: 126.9780,
            y: 37.5665,
        })
    }

    fn facility(name: Option<&str>, facility_type: Option<&str>) -> RawFacility {
        RawFacility {
            provider_id: "42".to_owned(),
            name: name.map(str::to_owned),
            facility_type: facility_type.map(str::to_owned),
            latitude: Some(37.5670),
            longitude: Some(126.9780),
            ..RawFacility::default()
        }
    }

    fn venue(category: &str) -> RawVenue {
        RawVenue {
            provider_id: "abc".to_owned(),
            category: category.to_owned(),
            name: Some("  Starbucks City Hall ".to_owned()),
            latitude: Some(37.5665),
            longitude: Some(126.9790),
            rating: Some(4.6),
            price_level: Some(2),
            ..RawVenue::default()
        }
    }

    #[rstest]
    fn public_facility_gets_registry_defaults(normalizer: Normalizer) {
        let candidate = normalizer
            .normalize_facility(facility(Some("Seoul Plaza Toilet"), None))
            .expect("facility should normalize");

        assert_eq!(candidate.id, "public_42");
        assert_eq!(candidate.kind, EntryKind::PublicFacility);
        assert!(candidate.is_free);
        assert_eq!(candidate.address, ADDRESS_UNAVAILABLE);
        assert_eq!(candidate.hours.as_deref(), Some("24h"));
        assert_eq!(candidate.facilities.disabled_access, Some(true));
        assert_eq!(candidate.signals.base, PUBLIC_BASE_QUALITY);
        assert_eq!(candidate.urgency_bucket, UrgencyBucket::High);
    }

    #[rstest]
    #[case(Some("민간개방화장실"))]
    #[case(Some("Private-operated"))]
    fn private_operated_facilities_score_higher(
        normalizer: Normalizer,
        #[case] facility_type: Option<&str>,
    ) {
        let candidate = normalizer
            .normalize_facility(facility(Some("Toilet"), facility_type))
            .expect("facility should normalize");
        assert_eq!(candidate.signals.base, PRIVATE_OPERATED_BASE_QUALITY);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("   "))]
    fn nameless_records_are_rejected(normalizer: Normalizer, #[case] name: Option<&str>) {
        let err = normalizer
            .normalize_facility(facility(name, None))
            .expect_err("nameless record should be rejected");
        assert!(matches!(err, MalformedRecord::MissingName { .. }));
    }

    #[rstest]
    fn records_without_coordinates_are_rejected(normalizer: Normalizer) {
        let mut raw = venue("starbucks");
        raw.longitude = None;
        let err = normalizer
            .normalize_venue(raw)
            .expect_err("record without longitude should be rejected");
        assert!(matches!(err, MalformedRecord::MissingCoordinates { .. }));
    }

    #[rstest]
    #[case(f64::NAN, 126.0)]
    #[case(91.0, 126.0)]
    #[case(37.0, f64::INFINITY)]
    fn out_of_range_coordinates_are_rejected(
        normalizer: Normalizer,
        #[case] lat: f64,
        #[case] lng: f64,
    ) {
        let mut raw = venue("starbucks");
        raw.latitude = Some(lat);
        raw.longitude = Some(lng);
        let err = normalizer
            .normalize_venue(raw)
            .expect_err("invalid coordinates should be rejected");
        assert!(matches!(err, MalformedRecord::InvalidCoordinates { .. }));
    }

    #[rstest]
    fn normalize_drops_malformed_records(normalizer: Normalizer) {
        let record = RawRecord::PublicFacility(facility(None, None));
        assert!(normalizer.normalize(record).is_none());
    }

    #[rstest]
    fn venue_carries_category_configuration(normalizer: Normalizer) {
        let candidate = normalizer
            .normalize_venue(venue("starbucks"))
            .expect("venue should normalize");

        assert_eq!(candidate.id, "venue_abc");
        assert_eq!(candidate.name, "Starbucks City Hall");
        assert!(!candidate.is_free);
        assert_eq!(candidate.color, "#00704A");
        assert_eq!(candidate.category.as_deref(), Some("starbucks"));
        assert_eq!(candidate.signals.rating, Some(4.6));
        assert_eq!(candidate.signals.price_level, Some(2));
    }

    #[rstest]
    fn department_store_overrides_free_flag(normalizer: Normalizer) {
        let candidate = normalizer
            .normalize_venue(venue("department_store"))
            .expect("venue should normalize");
        assert_eq!(candidate.kind, EntryKind::CommercialVenue);
        assert!(candidate.is_free);
    }

    #[rstest]
    fn unknown_category_uses_generic_cafe(normalizer: Normalizer) {
        let candidate = normalizer
            .normalize_venue(venue("bakery"))
            .expect("venue should normalize");
        assert_eq!(candidate.category.as_deref(), Some("cafe"));
        assert_eq!(candidate.signals.base, 2.0);
    }

    #[rstest]
    fn distance_is_measured_from_the_origin(normalizer: Normalizer) {
        let candidate = normalizer
            .normalize_facility(facility(Some("Toilet"), None))
            .expect("facility should normalize");
        assert!((55.0..56.5).contains(&candidate.distance_meters));
    }
}
