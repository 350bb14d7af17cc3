//! Places Nearby Search adapter for rated commercial venues.
//!
//! Unlike the Kakao directory, listings carry a user rating, a price tier,
//! weekday opening hours and wheelchair access, which feed the quality
//! adjustments in `savemetoilet-core`. One nearby search runs per category
//! using its first keyword; brand and radius checks match the Kakao adapter.
//!
//! # Example
//!
//! ```no_run
//! use savemetoilet_data::{HttpSourceConfig, PlacesDirectoryAdapter};
//!
//! let config = HttpSourceConfig::new("https://maps.googleapis.com", "places-key");
//! let adapter = PlacesDirectoryAdapter::new(config)?;
//! # Ok::<(), savemetoilet_data::HttpSourceBuildError>(())
//! ```

mod dto;

use async_trait::async_trait;
use futures_util::future::join_all;
use geo::Coord;
use reqwest::Client;
use savemetoilet_core::{
    AdapterError, EntryKind, RawRecord, RawVenue, SourceAdapter, VenueCategory, distance_meters,
};

use crate::directory::{merge_by_id, settle};
use crate::http::{HttpSourceBuildError, HttpSourceConfig};

pub use dto::{Geometry, LatLng, NearbySearchResponse, OpeningHours, PlaceResult};

/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

/// Nearby search path.
pub const NEARBY_PATH: &str = "/maps/api/place/nearbysearch/json";

/// Largest radius the service accepts, in metres.
pub const MAX_RADIUS_METERS: f64 = 50_000.0;

/// Successful response status.
pub const STATUS_OK: &str = "OK";

/// Successful response without matches.
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Status returned for missing, invalid or restricted keys.
pub const STATUS_REQUEST_DENIED: &str = "REQUEST_DENIED";

const ADAPTER_NAME: &str = "places-directory";

/// Source adapter for the Places Nearby Search.
#[derive(Debug)]
pub struct PlacesDirectoryAdapter {
    client: Client,
    config: HttpSourceConfig,
}

struct CategoryHit {
    category: &'static VenueCategory,
    places: Vec<PlaceResult>,
}

impl PlacesDirectoryAdapter {
    /// Create an adapter for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: HttpSourceConfig) -> Result<Self, HttpSourceBuildError> {
        Ok(Self {
            client: config.build_client()?,
            config,
        })
    }

    fn nearby_url(&self) -> String {
        format!("{}{NEARBY_PATH}", self.config.root())
    }

    async fn search_category(
        &self,
        category: &'static VenueCategory,
        origin: Coord<f64>,
        radius_meters: f64,
    ) -> Result<CategoryHit, AdapterError> {
        let url = self.nearby_url();
        let keyword = category
            .search_keywords
            .first()
            .copied()
            .unwrap_or(category.label);
        let query = [
            ("location", format!("{},{}", origin.y, origin.x)),
            (
                "radius",
                format!("{:.0}", radius_meters.clamp(1.0, MAX_RADIUS_METERS)),
            ),
            ("keyword", keyword.to_owned()),
            ("key", self.config.key().to_owned()),
        ];
        log::debug!("{ADAPTER_NAME}: nearby search for {keyword:?} at {url}");
        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|err| self.config.convert_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.config.convert_error(&err, &url))?;
        let body = response
            .json::<NearbySearchResponse>()
            .await
            .map_err(|err| AdapterError::Parse {
                message: self.config.redact(&err.to_string()),
            })?;
        Ok(CategoryHit {
            category,
            places: check_status(body)?,
        })
    }
}

/// Map the in-body status onto results or an adapter error.
fn check_status(body: NearbySearchResponse) -> Result<Vec<PlaceResult>, AdapterError> {
    let message = body.error_message.unwrap_or_default();
    match body.status.as_str() {
        STATUS_OK => Ok(body.results),
        STATUS_ZERO_RESULTS => Ok(Vec::new()),
        STATUS_REQUEST_DENIED => Err(AdapterError::Unauthorized { message }),
        _ => Err(AdapterError::Service {
            code: body.status,
            message,
        }),
    }
}

/// Convert a place if it is within the radius and matches the brand.
fn to_record(
    place: PlaceResult,
    category: &VenueCategory,
    origin: Coord<f64>,
    radius_meters: f64,
) -> Option<RawRecord> {
    if !category.matches_name(&place.name) {
        log::debug!(
            "{ADAPTER_NAME}: {:?} is not a {} branch",
            place.name,
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
        rating: place.rating(),
        price_level: place.price_level,
        hours: place.hours(),
        phone: place.phone(),
        facilities: Some(place.facilities()),
        category: category.key.to_owned(),
        name: Some(place.name),
        provider_id: place.place_id,
        latitude,
        longitude,
    }))
}

#[async_trait(?Send)]
impl SourceAdapter for PlacesDirectoryAdapter {
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
        let calls = categories.iter().copied().map(|category| async move {
            let result = self.search_category(category, origin, radius_meters).await;
            if let Err(err) = &result {
                log::warn!("{ADAPTER_NAME}: search for {} failed: {err}", category.key);
            }
            result
        });
        let hits = settle(join_all(calls).await)?;
        let accepted = hits.into_iter().flat_map(|hit| {
            let category = hit.category;
            hit.places.into_iter().filter_map(move |place| {
                to_record(place, category, origin, radius_meters).map(|record| (category, record))
            })
        });
        let records = merge_by_id(accepted);
        log::debug!(
            "{ADAPTER_NAME}: {} venues from {} categories",
            records.len(),
            categories.len()
        );
        Ok(records)
    }
}
