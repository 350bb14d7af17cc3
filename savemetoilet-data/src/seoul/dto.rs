//! Response types for the Seoul Open Data `SearchPublicToiletPOIService`.
//!
//! Successful payloads wrap rows in a service object; some failures return a
//! bare `RESULT` at the top level instead.

use serde::Deserialize;
use serde_json::Value;

/// Status code for a successful page.
pub const CODE_OK: &str = "INFO-000";
/// Status code for an invalid or unknown key.
pub const CODE_INVALID_KEY: &str = "INFO-100";
/// Status code when no rows match.
pub const CODE_NO_DATA: &str = "INFO-200";

/// Top-level response body.
#[derive(Debug, Default, Deserialize)]
pub struct ToiletResponse {
    /// Service envelope on success.
    #[serde(rename = "SearchPublicToiletPOIService")]
    pub service: Option<ToiletService>,
    /// Bare status on some failures.
    #[serde(rename = "RESULT")]
    pub result: Option<ResultStatus>,
}

impl ToiletResponse {
    /// Status reported wherever the service put it.
    #[must_use]
    pub fn status(&self) -> Option<&ResultStatus> {
        self.service
            .as_ref()
            .and_then(|service| service.result.as_ref())
            .or(self.result.as_ref())
    }
}

/// Page of registry rows.
#[derive(Debug, Default, Deserialize)]
pub struct ToiletService {
    /// Total rows across every page.
    #[serde(default)]
    pub list_total_count: u32,
    /// Page status.
    #[serde(rename = "RESULT")]
    pub result: Option<ResultStatus>,
    /// Rows in this page.
    #[serde(default)]
    pub row: Vec<ToiletRow>,
}

/// Service status code and message.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultStatus {
    /// Code such as `INFO-000`.
    #[serde(rename = "CODE")]
    pub code: String,
    /// Human-readable explanation.
    #[serde(rename = "MESSAGE", default)]
    pub message: String,
}

/// One public toilet.
#[derive(Debug, Default, Deserialize)]
pub struct ToiletRow {
    /// Registry identifier; numeric or textual.
    #[serde(rename = "POI_ID", default)]
    pub poi_id: Value,
    /// Facility name.
    #[serde(rename = "FNAME")]
    pub fname: Option<String>,
    /// Facility type, e.g. `민간개방화장실`.
    #[serde(rename = "ANAME")]
    pub aname: Option<String>,
    /// Category label.
    #[serde(rename = "CNAME")]
    pub cname: Option<String>,
    /// Longitude.
    #[serde(rename = "X_WGS84", default)]
    pub x_wgs84: Value,
    /// Latitude.
    #[serde(rename = "Y_WGS84", default)]
    pub y_wgs84: Value,
}

impl ToiletRow {
    /// Identifier as text; empty when absent.
    #[must_use]
    pub fn id(&self) -> String {
        match &self.poi_id {
            Value::String(text) => text.trim().to_owned(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Longitude if present and numeric.
    #[must_use]
    pub fn longitude(&self) -> Option<f64> {
        loose_f64(&self.x_wgs84)
    }

    /// Latitude if present and numeric.
    #[must_use]
    pub fn latitude(&self) -> Option<f64> {
        loose_f64(&self.y_wgs84)
    }
}

/// Read a number that may arrive as JSON text.
fn loose_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_success_page() {
        let json = r#"{
            "SearchPublicToiletPOIService": {
                "list_total_count": 2,
                "RESULT": {"CODE": "INFO-000", "MESSAGE": "정상 처리되었습니다"},
                "row": [
                    {"POI_ID": "101", "FNAME": "시청 화장실", "ANAME": "공중화장실",
                     "CNAME": "개방", "X_WGS84": 126.978, "Y_WGS84": 37.5665},
                    {"POI_ID": 102, "FNAME": "광장 화장실", "ANAME": "민간개방화장실",
                     "X_WGS84": "126.979", "Y_WGS84": "37.567"}
                ]
            }
        }"#;

        let response: ToiletResponse = serde_json::from_str(json).expect("should deserialise");

        assert_eq!(response.status().map(|s| s.code.as_str()), Some(CODE_OK));
        let service = response.service.expect("service body");
        assert_eq!(service.list_total_count, 2);
        let ids: Vec<String> = service.row.iter().map(ToiletRow::id).collect();
        assert_eq!(ids, vec!["101", "102"]);
        let second = service.row.get(1).expect("second row");
        assert_eq!(second.longitude(), Some(126.979));
        assert_eq!(second.latitude(), Some(37.567));
    }

    #[test]
    fn deserialise_top_level_error() {
        let json = r#"{"RESULT": {"CODE": "INFO-100", "MESSAGE": "인증키가 유효하지 않습니다."}}"#;

        let response: ToiletResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.service.is_none());
        assert_eq!(
            response.status().map(|s| s.code.as_str()),
            Some(CODE_INVALID_KEY)
        );
    }

    #[test]
    fn unparsable_coordinates_are_absent() {
        let json = r#"{"POI_ID": "1", "FNAME": "x", "X_WGS84": "", "Y_WGS84": null}"#;
        let row: ToiletRow = serde_json::from_str(json).expect("should deserialise");
        assert_eq!(row.longitude(), None);
        assert_eq!(row.latitude(), None);
    }
}
