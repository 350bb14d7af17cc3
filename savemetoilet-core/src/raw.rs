//! Provider records as handed over by source adapters.
//!
//! Adapters translate their upstream payloads into one of these variants so
//! that every loosely typed field is checked at a single seam, the
//! [normalizer](crate::normalize).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entry::Facilities;

/// Record produced by a source adapter before normalization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum RawRecord {
    /// Row from a public-facility registry.
    PublicFacility(RawFacility),
    /// Result from a commercial place directory.
    Venue(RawVenue),
}

impl RawRecord {
    /// Upstream identifier of the record.
    #[must_use]
    pub fn provider_id(&self) -> &str {
        match self {
            Self::PublicFacility(facility) => &facility.provider_id,
            Self::Venue(venue) => &venue.provider_id,
        }
    }
}

/// Public facility row. Every field except the id may be missing upstream.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawFacility {
    /// Registry identifier.
    pub provider_id: String,
    /// Facility name.
    pub name: Option<String>,
    /// Registry classification, e.g. whether it is privately operated.
    pub facility_type: Option<String>,
    /// Latitude in WGS84 degrees.
    pub latitude: Option<f64>,
    /// Longitude in WGS84 degrees.
    pub longitude: Option<f64>,
    /// Street address.
    pub address: Option<String>,
    /// Opening hours.
    pub hours: Option<String>,
    /// Contact number.
    pub phone: Option<String>,
    /// Accessibility flags; registry defaults apply when absent.
    pub facilities: Option<Facilities>,
}

/// Commercial venue result from a place directory.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawVenue {
    /// Directory identifier.
    pub provider_id: String,
    /// Category key the venue was found under, e.g. `starbucks`.
    pub category: String,
    /// Venue name.
    pub name: Option<String>,
    /// Latitude in WGS84 degrees.
    pub latitude: Option<f64>,
    /// Longitude in WGS84 degrees.
    pub longitude: Option<f64>,
    /// Street address.
    pub address: Option<String>,
    /// Average user rating, typically on a 0–5 scale.
    pub rating: Option<f64>,
    /// Price tier on the directory's own scale, lower is cheaper.
    pub price_level: Option<u8>,
    /// Opening hours.
    pub hours: Option<String>,
    /// Contact number.
    pub phone: Option<String>,
    /// Accessibility flags.
    pub facilities: Option<Facilities>,
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn deserialises_tagged_venue_with_missing_fields() {
        let json = r#"{
            "kind": "venue",
            "provider_id": "123",
            "category": "starbucks",
            "name": "Starbucks City Hall",
            "latitude": 37.5665,
            "longitude": 126.978
        }"#;

        let record: RawRecord = serde_json::from_str(json).expect("should deserialise");

        match record {
            RawRecord::Venue(venue) => {
                assert_eq!(venue.category, "starbucks");
                assert!(venue.rating.is_none());
                assert!(venue.price_level.is_none());
            }
            RawRecord::PublicFacility(_) => panic!("expected a venue"),
        }
    }

    #[rstest]
    fn deserialises_public_facility_without_coordinates() {
        let json = r#"{"kind": "public_facility", "provider_id": "7", "name": "Toilet"}"#;

        let record: RawRecord = serde_json::from_str(json).expect("should deserialise");

        assert_eq!(record.provider_id(), "7");
        assert!(matches!(
            record,
            RawRecord::PublicFacility(RawFacility { latitude: None, .. })
        ));
    }
}
