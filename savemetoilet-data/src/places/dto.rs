//! Places Nearby Search response types.
//!
//! See: <https://developers.google.com/maps/documentation/places/web-service/search-nearby>

use savemetoilet_core::Facilities;
use serde::Deserialize;

/// Nearby search response. Failures still arrive with HTTP 200.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NearbySearchResponse {
    /// `OK`, `ZERO_RESULTS`, `REQUEST_DENIED`, `OVER_QUERY_LIMIT`, ...
    pub status: String,
    /// Matching places.
    pub results: Vec<PlaceResult>,
    /// Explanation accompanying a failing status.
    pub error_message: Option<String>,
}

/// One place.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct PlaceResult {
    /// Stable place identifier.
    pub place_id: String,
    /// Display name.
    pub name: String,
    /// Full address, only present on some responses.
    pub formatted_address: Option<String>,
    /// Short address near the place.
    pub vicinity: Option<String>,
    /// Location.
    pub geometry: Option<Geometry>,
    /// Average user rating, 1.0 to 5.0.
    pub rating: Option<f64>,
    /// Price tier, 0 (free) to 4 (very expensive).
    pub price_level: Option<u8>,
    /// Opening hours.
    pub opening_hours: Option<OpeningHours>,
    /// `OPERATIONAL`, `CLOSED_TEMPORARILY` or `CLOSED_PERMANENTLY`.
    pub business_status: Option<String>,
    /// Local phone number.
    pub formatted_phone_number: Option<String>,
    /// Whether the entrance is wheelchair accessible.
    pub wheelchair_accessible_entrance: Option<bool>,
    /// Place types, e.g. `cafe`, `parking`.
    pub types: Vec<String>,
}

/// Geometry wrapper.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Geometry {
    /// Point location.
    pub location: LatLng,
}

/// WGS84 point.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct LatLng {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

/// Opening hours block.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OpeningHours {
    /// Whether the place is open at request time.
    pub open_now: Option<bool>,
    /// One line per weekday, e.g. `Monday: 7:00 AM – 10:00 PM`.
    pub weekday_text: Vec<String>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
}

impl PlaceResult {
    /// Latitude when the geometry is present.
    #[must_use]
    pub fn latitude(&self) -> Option<f64> {
        self.geometry.as_ref().map(|geometry| geometry.location.lat)
    }

    /// Longitude when the geometry is present.
    #[must_use]
    pub fn longitude(&self) -> Option<f64> {
        self.geometry.as_ref().map(|geometry| geometry.location.lng)
    }

    /// Formatted address, falling back to the vicinity.
    #[must_use]
    pub fn address(&self) -> Option<String> {
        non_blank(self.formatted_address.as_deref()).or_else(|| non_blank(self.vicinity.as_deref()))
    }

    /// Weekday hours joined with `, `, falling back to the business status.
    #[must_use]
    pub fn hours(&self) -> Option<String> {
        let weekdays = self
            .opening_hours
            .as_ref()
            .map(|hours| hours.weekday_text.join(", "));
        non_blank(weekdays.as_deref()).or_else(|| non_blank(self.business_status.as_deref()))
    }

    /// Phone number when present.
    #[must_use]
    pub fn phone(&self) -> Option<String> {
        non_blank(self.formatted_phone_number.as_deref())
    }

    /// Rating when it is a finite number.
    #[must_use]
    pub fn rating(&self) -> Option<f64> {
        self.rating.filter(|value| value.is_finite())
    }

    /// Accessibility flags known from the listing.
    ///
    /// Commercial venues are assumed to have separate facilities.
    #[must_use]
    pub fn facilities(&self) -> Facilities {
        Facilities {
            disabled_access: self.wheelchair_accessible_entrance,
            baby_changing: None,
            separate_gender: Some(true),
            wifi: self.has_type("wifi").then_some(true),
            parking: self.has_type("parking").then_some(true),
        }
    }

    fn has_type(&self, wanted: &str) -> bool {
        self.types.iter().any(|kind| kind == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_nearby_response() {
        let json = r#"{
            "status": "OK",
            "html_attributions": [],
            "results": [{
                "place_id": "ChIJ-starbucks",
                "name": "Starbucks City Hall",
                "vicinity": "110 Sejong-daero, Jung-gu",
                "geometry": {"location": {"lat": 37.5662, "lng": 126.9779}},
                "rating": 4.3,
                "price_level": 2,
                "opening_hours": {
                    "open_now": true,
                    "weekday_text": ["Monday: 7:00 AM – 10:00 PM", "Tuesday: 7:00 AM – 10:00 PM"]
                },
                "business_status": "OPERATIONAL",
                "wheelchair_accessible_entrance": true,
                "types": ["cafe", "food", "parking"]
            }]
        }"#;

        let response: NearbySearchResponse =
            serde_json::from_str(json).expect("should deserialise");

        assert_eq!(response.status, "OK");
        let place = response.results.first().expect("one result");
        assert_eq!(place.latitude(), Some(37.5662));
        assert_eq!(place.longitude(), Some(126.9779));
        assert_eq!(place.address().as_deref(), Some("110 Sejong-daero, Jung-gu"));
        assert_eq!(
            place.hours().as_deref(),
            Some("Monday: 7:00 AM – 10:00 PM, Tuesday: 7:00 AM – 10:00 PM")
        );
        assert_eq!(place.price_level, Some(2));
        let facilities = place.facilities();
        assert_eq!(facilities.disabled_access, Some(true));
        assert_eq!(facilities.parking, Some(true));
        assert_eq!(facilities.wifi, None);
    }

    #[test]
    fn sparse_place_falls_back_to_status_and_nothing_else() {
        let place: PlaceResult = serde_json::from_str(
            r#"{"place_id": "p", "name": "x", "business_status": "CLOSED_TEMPORARILY"}"#,
        )
        .expect("should deserialise");

        assert_eq!(place.latitude(), None);
        assert_eq!(place.address(), None);
        assert_eq!(place.phone(), None);
        assert_eq!(place.rating(), None);
        assert_eq!(place.hours().as_deref(), Some("CLOSED_TEMPORARILY"));
    }

    #[test]
    fn error_statuses_carry_a_message() {
        let response: NearbySearchResponse = serde_json::from_str(
            r#"{"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid.", "results": []}"#,
        )
        .expect("should deserialise");
        assert_eq!(response.status, "REQUEST_DENIED");
        assert!(response.results.is_empty());
    }
}
