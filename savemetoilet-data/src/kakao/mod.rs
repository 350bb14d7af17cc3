//! Kakao Local keyword-search adapter for commercial venues.
//!
//! Each enabled category is searched by its keywords around the origin.
//! Results whose names do not match the category's brand keywords are
//! dropped, as are places outside the radius. A failing keyword is logged
//! and skipped; the adapter only fails when every keyword request fails.
//!
//! # Example
//!
//! ```no_run
//! use savemetoilet_data::{HttpSourceConfig, KakaoDirectoryAdapter};
//!
//! let config = HttpSourceConfig::new("https://dapi.kakao.com", "rest-api-key");
//! let adapter = KakaoDirectoryAdapter::new(config)?;
//! # Ok::<(), savemetoilet_data::HttpSourceBuildError>(())
//! ```

mod dto;

use async_trait::async_trait;
use futures_util::future::join_all;
use geo::Coord;
use reqwest::{Client, StatusCode};
use savemetoilet_core::{
    AdapterError, EntryKind, RawRecord, RawVenue, SourceAdapter, VenueCategory, distance_meters,
};

use crate::directory::{merge_by_id, settle};
use crate::http::{HttpSourceBuildError, HttpSourceConfig};

pub use dto::{KakaoErrorBody, KeywordResponse, PlaceDocument};

/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "https://dapi.kakao.com";

/// Keyword search path.
pub const KEYWORD_PATH: &str = "/v2/local/search/keyword.json";

/// Largest radius the service accepts, in metres.
pub const MAX_RADIUS_METERS: f64 = 20_000.0;

/// Largest page the service returns.
pub const MAX_PAGE_SIZE: u8 = 15;

const ADAPTER_NAME: &str = "kakao-directory";

/// Source adapter for the Kakao Local keyword search.
#[derive(Debug)]
pub struct KakaoDirectoryAdapter {
    client: Client,
    config: HttpSourceConfig,
    page_size: u8,
}

struct KeywordHit {
    category: &'static VenueCategory,
    places: Vec<PlaceDocument>,
}

impl KakaoDirectoryAdapter {
    /// Create an adapter for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: HttpSourceConfig) -> Result<Self, HttpSourceBuildError> {
        Ok(Self {
            client: config.build_client()?,
            config,
            page_size: MAX_PAGE_SIZE,
        })
    }

    /// Results requested per keyword, clamped to `1..=15`.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u8) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    fn keyword_url(&self) -> String {
        format!("{}{KEYWORD_PATH}", self.config.root())
    }

    async fn search_keyword(
        &self,
        category: &'static VenueCategory,
        keyword: &str,
        origin: Coord<f64>,
        radius_meters: f64,
    ) -> Result<KeywordHit, AdapterError> {
        let url = self.keyword_url();
        let radius = format!("{:.0}", radius_meters.clamp(1.0, MAX_RADIUS_METERS));
        let query = [
            ("query", keyword.to_owned()),
            ("x", origin.x.to_string()),
            ("y", origin.y.to_string()),
            ("radius", radius),
            ("sort", "distance".to_owned()),
            ("size", self.page_size.to_string()),
        ];
        let response = self
            .client
            .get(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("KakaoAK {}", self.config.key()),
            )
            .query(&query)
            .send()
            .await
            .map_err(|err| self.config.convert_error(&err, &url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<KakaoErrorBody>().await.unwrap_or_default();
            return Err(status_error(status, &url, body));
        }

        let body = response
            .json::<KeywordResponse>()
            .await
            .map_err(|err| AdapterError::Parse {
                message: err.to_string(),
            })?;
        Ok(KeywordHit {
            category,
            places: body.documents,
        })
    }
}

fn status_error(status: StatusCode, url: &str, body: KakaoErrorBody) -> AdapterError {
    let message = if body.message.is_empty() {
        status.to_string()
    } else {
        body.message
    };
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return AdapterError::Unauthorized { message };
    }
    AdapterError::Http {
        url: url.to_owned(),
        status: status.as_u16(),
        message,
    }
}

/// Convert a place if it is within the radius and matches the brand.
fn to_record(
    place: PlaceDocument,
    category: &VenueCategory,
    origin: Coord<f64>,
    radius_meters: f64,
) -> Option<RawRecord> {
    if !category.matches_name(&place.place_name) {
        log::debug!(
            "{ADAPTER_NAME}: {:?} is not a {} branch",
            place.place_name,
            category.key
        );
        return None;
    }
    let latitude = place.latitude();
    let longitude = place.longitude();
    if let (Some(lat), Some(lng)) = (latitude, longitude) {
        if distance_meters(origin, Coord { x: lng, y: lat }) > radius_meters {
            return None;
        }
    }
    Some(RawRecord::Venue(RawVenue {
        address: place.address(),
        phone: place.phone(),
        provider_id: place.id,
        category: category.key.to_owned(),
        name: Some(place.place_name),
        latitude,
        longitude,
        ..RawVenue::default()
    }))
}

/// Filter every hit, then keep one record per place id.
fn merge_hits(hits: Vec<KeywordHit>, origin: Coord<f64>, radius_meters: f64) -> Vec<RawRecord> {
    let accepted = hits.into_iter().flat_map(|hit| {
        let category = hit.category;
        hit.places.into_iter().filter_map(move |place| {
            to_record(place, category, origin, radius_meters).map(|record| (category, record))
        })
    });
    merge_by_id(accepted)
}

#[async_trait(?Send)]
impl SourceAdapter for KakaoDirectoryAdapter {
    fn name(&self) -> &str {
        ADAPTER_NAME
    }

    fn kind(&self) -> EntryKind {
        EntryKind::CommercialVenue
    }

    async fn search_near(
        &self,
        origin: Coord<f64>,
        radius_meters: f64,
        categories: &[&'static VenueCategory],
    ) -> Result<Vec<RawRecord>, AdapterError> {
        if !self.config.has_api_key() {
            return Err(self.config.missing_key(ADAPTER_NAME));
        }
        let requests = categories.iter().flat_map(|category| {
            category
                .search_keywords
                .iter()
                .map(move |keyword| (*category, *keyword))
        });
        let calls = requests.map(|(category, keyword)| async move {
            let result = self
                .search_keyword(category, keyword, origin, radius_meters)
                .await;
            if let Err(err) = &result {
                log::warn!("{ADAPTER_NAME}: search for {keyword:?} failed: {err}");
            }
            result
        });
        let settled = join_all(calls).await;

        let attempted = settled.len();
        let hits = settle(settled)?;
        let records = merge_hits(hits, origin, radius_meters);
        log::debug!(
            "{ADAPTER_NAME}: {} venues from {attempted} keyword searches",
            records.len()
        );
        Ok(records)
    }
}
