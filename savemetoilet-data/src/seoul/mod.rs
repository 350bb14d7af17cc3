//! Seoul public-toilet registry adapter.
//!
//! The registry has no spatial query, so the adapter pages through the
//! dataset and keeps rows within the requested radius.
//!
//! # Example
//!
//! ```no_run
//! use savemetoilet_data::{HttpSourceConfig, SeoulRegistryAdapter};
//!
//! let config = HttpSourceConfig::new("http://openapi.seoul.go.kr:8088", "my-key");
//! let adapter = SeoulRegistryAdapter::new(config)?.with_page_size(500);
//! # Ok::<(), savemetoilet_data::HttpSourceBuildError>(())
//! ```

mod dto;

use async_trait::async_trait;
use geo::Coord;
use reqwest::Client;
use savemetoilet_core::{
    AdapterError, EntryKind, RawFacility, RawRecord, SourceAdapter, VenueCategory,
    distance_meters, normalize::is_valid_wgs84,
};

use crate::http::{HttpSourceBuildError, HttpSourceConfig};

pub use dto::{
    CODE_INVALID_KEY, CODE_NO_DATA, CODE_OK, ResultStatus, ToiletResponse, ToiletRow, ToiletService,
};

/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "http://openapi.seoul.go.kr:8088";

/// Registry service name in the request path.
pub const SERVICE_NAME: &str = "SearchPublicToiletPOIService";

/// Rows requested per page; the service caps pages at 1000.
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Upper bound on pages fetched per search.
pub const DEFAULT_MAX_PAGES: u32 = 10;

const ADAPTER_NAME: &str = "seoul-registry";

/// Source adapter for the Seoul public-toilet registry.
#[derive(Debug)]
pub struct SeoulRegistryAdapter {
    client: Client,
    config: HttpSourceConfig,
    page_size: u32,
    max_pages: u32,
}

impl SeoulRegistryAdapter {
    /// Create an adapter for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: HttpSourceConfig) -> Result<Self, HttpSourceBuildError> {
        Ok(Self {
            client: config.build_client()?,
            config,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        })
    }

    /// Rows requested per page, clamped to `1..=1000`.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, DEFAULT_PAGE_SIZE);
        self
    }

    /// Maximum pages fetched per search; at least one.
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// `{base}/{key}/json/SearchPublicToiletPOIService/{start}/{end}/`
    fn page_url(&self, start: u32, end: u32) -> String {
        format!(
            "{}/{}/json/{SERVICE_NAME}/{start}/{end}/",
            self.config.root(),
            self.config.key()
        )
    }

    async fn fetch_page(&self, start: u32, end: u32) -> Result<ToiletResponse, AdapterError> {
        let url = self.page_url(start, end);
        log::debug!("fetching {}", self.config.redact(&url));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.config.convert_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.config.convert_error(&err, &url))?;
        response
            .json::<ToiletResponse>()
            .await
            .map_err(|err| AdapterError::Parse {
                message: self.config.redact(&err.to_string()),
            })
    }

    /// Fetch every page up to the configured limit.
    async fn fetch_rows(&self) -> Result<Vec<ToiletRow>, AdapterError> {
        let mut rows = Vec::new();
        let mut start = 1_u32;
        for _ in 0..self.max_pages {
            let end = start.saturating_add(self.page_size - 1);
            let page = self.fetch_page(start, end).await?;
            let Some(service) = check_status(page)? else {
                break;
            };
            let fetched = service.row.len();
            rows.extend(service.row);
            let total = usize::try_from(service.list_total_count).unwrap_or(usize::MAX);
            if fetched == 0 || rows.len() >= total {
                break;
            }
            start = end.saturating_add(1);
        }
        Ok(rows)
    }
}

/// Interpret the service status, returning the page body when it has rows.
fn check_status(response: ToiletResponse) -> Result<Option<ToiletService>, AdapterError> {
    let Some(status) = response.status().cloned() else {
        return Err(AdapterError::Parse {
            message: "response carries no RESULT status".to_owned(),
        });
    };
    match status.code.as_str() {
        CODE_OK => Ok(response.service),
        CODE_NO_DATA => Ok(None),
        CODE_INVALID_KEY => Err(AdapterError::Unauthorized {
            message: status.message,
        }),
        _ => Err(AdapterError::Service {
            code: status.code,
            message: status.message,
        }),
    }
}

fn to_record(row: ToiletRow) -> RawRecord {
    RawRecord::PublicFacility(RawFacility {
        provider_id: row.id(),
        latitude: row.latitude(),
        longitude: row.longitude(),
        name: row.fname,
        facility_type: row.aname,
        ..RawFacility::default()
    })
}

/// Keep rows inside the radius; rows without usable coordinates pass through
/// for the normalizer to reject.
fn within_radius(record: &RawRecord, origin: Coord<f64>, radius_meters: f64) -> bool {
    let RawRecord::PublicFacility(facility) = record else {
        return true;
    };
    match (facility.latitude, facility.longitude) {
        (Some(lat), Some(lng)) if is_valid_wgs84(lat, lng) => {
            distance_meters(origin, Coord { x: lng, y: lat }) <= radius_meters
        }
        _ => true,
    }
}

#[async_trait(?Send)]
impl SourceAdapter for SeoulRegistryAdapter {
    fn name(&self) -> &str {
        ADAPTER_NAME
    }

    fn kind(&self) -> EntryKind {
        EntryKind::PublicFacility
    }

    async fn search_near(
        &self,
        origin: Coord<f64>,
        radius_meters: f64,
        _categories: &[&'static VenueCategory],
    ) -> Result<Vec<RawRecord>, AdapterError> {
        if !self.config.has_api_key() {
            return Err(self.config.missing_key(ADAPTER_NAME));
        }
        let rows = self.fetch_rows().await?;
        let scanned = rows.len();
        let records: Vec<RawRecord> = rows
            .into_iter()
            .map(to_record)
            .filter(|record| within_radius(record, origin, radius_meters))
            .collect();
        log::debug!(
            "{ADAPTER_NAME}: {} of {scanned} rows within {radius_meters}m",
            records.len()
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn adapter(base: &str) -> SeoulRegistryAdapter {
        SeoulRegistryAdapter::new(HttpSourceConfig::new(base, "key123"))
            .expect("adapter should build")
    }

    #[rstest]
    fn page_url_includes_key_and_range() {
        let url = adapter("http://openapi.seoul.go.kr:8088/").page_url(1, 1000);
        assert_eq!(
            url,
            "http://openapi.seoul.go.kr:8088/key123/json/SearchPublicToiletPOIService/1/1000/"
        );
    }

    #[rstest]
    fn padded_keys_never_reach_logged_urls() {
        let adapter = SeoulRegistryAdapter::new(HttpSourceConfig::new("http://h", "secret\n"))
            .expect("adapter should build");
        let url = adapter.page_url(1, 5);
        assert_eq!(url, "http://h/secret/json/SearchPublicToiletPOIService/1/5/");
        let logged = adapter.config.redact(&url);
        assert!(!logged.contains("secret"));
    }

    #[rstest]
    #[case(0, 1)]
    #[case(5000, 1000)]
    fn page_size_is_clamped(#[case] requested: u32, #[case] expected: u32) {
        let adapter = adapter("http://localhost").with_page_size(requested);
        assert_eq!(adapter.page_size, expected);
    }

    #[rstest]
    fn rows_outside_the_radius_are_dropped() {
        let origin = Coord {
            x: 126.9780,
            y: 37.5665,
        };
        let near = RawRecord::PublicFacility(RawFacility {
            latitude: Some(37.5670),
            longitude: Some(126.9780),
            ..RawFacility::default()
        });
        let far = RawRecord::PublicFacility(RawFacility {
            latitude: Some(37.6000),
            longitude: Some(126.9780),
            ..RawFacility::default()
        });
        let unknown = RawRecord::PublicFacility(RawFacility::default());

        assert!(within_radius(&near, origin, 500.0));
        assert!(!within_radius(&far, origin, 500.0));
        assert!(within_radius(&unknown, origin, 500.0));
    }

    #[rstest]
    #[case(CODE_INVALID_KEY, true)]
    #[case("ERROR-500", false)]
    fn error_codes_map_to_adapter_errors(#[case] code: &str, #[case] unauthorized: bool) {
        let response = ToiletResponse {
            service: None,
            result: Some(ResultStatus {
                code: code.to_owned(),
                message: "failed".to_owned(),
            }),
        };
        let err = check_status(response).expect_err("status should fail");
        assert_eq!(
            matches!(err, AdapterError::Unauthorized { .. }),
            unauthorized
        );
    }

    #[rstest]
    fn no_data_is_an_empty_page() {
        let response = ToiletResponse {
            service: None,
            result: Some(ResultStatus {
                code: CODE_NO_DATA.to_owned(),
                message: String::new(),
            }),
        };
        assert!(check_status(response).expect("no data is fine").is_none());
    }
}
