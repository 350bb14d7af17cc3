//! Kakao Local keyword-search response types.
//!
//! See: <https://developers.kakao.com/docs/latest/en/local/dev-guide#search-by-keyword>

use serde::Deserialize;

/// Keyword search response.
#[derive(Debug, Default, Deserialize)]
pub struct KeywordResponse {
    /// Matching places, nearest first when sorted by distance.
    #[serde(default)]
    pub documents: Vec<PlaceDocument>,
}

/// One place. Coordinates and distance arrive as strings.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct PlaceDocument {
    /// Kakao place identifier.
    pub id: String,
    /// Display name.
    pub place_name: String,
    /// Category path, e.g. `음식점 > 카페 > 커피전문점 > 스타벅스`.
    pub category_name: String,
    /// Lot-number address.
    pub address_name: String,
    /// Road-name address.
    pub road_address_name: String,
    /// Phone number.
    pub phone: String,
    /// Longitude.
    pub x: String,
    /// Latitude.
    pub y: String,
    /// Distance from the query point in metres, when requested with `x`/`y`.
    pub distance: String,
}

impl PlaceDocument {
    /// Longitude if it parses.
    #[must_use]
    pub fn longitude(&self) -> Option<f64> {
        self.x.trim().parse().ok()
    }

    /// Latitude if it parses.
    #[must_use]
    pub fn latitude(&self) -> Option<f64> {
        self.y.trim().parse().ok()
    }

    /// Lot-number address, falling back to the road address.
    #[must_use]
    pub fn address(&self) -> Option<String> {
        [&self.address_name, &self.road_address_name]
            .into_iter()
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
            .map(str::to_owned)
    }

    /// Phone number when present.
    #[must_use]
    pub fn phone(&self) -> Option<String> {
        Some(self.phone.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    }
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct KakaoErrorBody {
    /// Kakao error type, e.g. `AccessDeniedError`.
    #[serde(rename = "errorType")]
    pub error_type: String,
    /// Explanation.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_keyword_response() {
        let json = r#"{
            "meta": {"total_count": 1, "is_end": true},
            "documents": [{
                "id": "26338954",
                "place_name": "스타벅스 시청점",
                "category_name": "음식점 > 카페 > 커피전문점 > 스타벅스",
                "address_name": "",
                "road_address_name": "서울 중구 세종대로 100",
                "phone": "1522-3232",
                "x": "126.9779",
                "y": "37.5660",
                "distance": "55"
            }]
        }"#;

        let response: KeywordResponse = serde_json::from_str(json).expect("should deserialise");

        let place = response.documents.first().expect("one document");
        assert_eq!(place.longitude(), Some(126.9779));
        assert_eq!(place.latitude(), Some(37.5660));
        assert_eq!(place.address().as_deref(), Some("서울 중구 세종대로 100"));
        assert_eq!(place.phone().as_deref(), Some("1522-3232"));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let place: PlaceDocument =
            serde_json::from_str(r#"{"id": "1", "place_name": "x"}"#).expect("should deserialise");
        assert_eq!(place.latitude(), None);
        assert_eq!(place.address(), None);
        assert_eq!(place.phone(), None);
    }

    #[test]
    fn deserialise_error_body() {
        let body: KakaoErrorBody = serde_json::from_str(
            r#"{"errorType": "AccessDeniedError", "message": "wrong appKey format"}"#,
        )
        .expect("should deserialise");
        assert_eq!(body.error_type, "AccessDeniedError");
    }
}
