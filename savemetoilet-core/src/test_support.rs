//! Builders and stub adapters shared by unit and behaviour tests.

use std::cell::Cell;

use async_trait::async_trait;
use geo::Coord;

use crate::category::{PUBLIC_FACILITY_COLOR, PUBLIC_FACILITY_ICON, VenueCategory};
use crate::entry::{BucketThresholds, Entry, EntryKind, Facilities, Source};
use crate::raw::{RawFacility, RawRecord, RawVenue};
use crate::source::{AdapterError, SourceAdapter};

/// Fluent constructor for ranked-stage [`Entry`] values.
///
/// Location is fixed; only `distance_meters` matters to the pipeline stages
/// these entries are fed into.
#[derive(Debug, Clone)]
pub struct EntryBuilder {
    name: String,
    kind: EntryKind,
    distance: f64,
    quality: u8,
    free: Option<bool>,
}

impl EntryBuilder {
    /// Start a public facility named `name`.
    #[must_use]
    pub fn public(name: &str) -> Self {
        Self::new(name, EntryKind::PublicFacility)
    }

    /// Start a commercial venue named `name`.
    #[must_use]
    pub fn venue(name: &str) -> Self {
        Self::new(name, EntryKind::CommercialVenue)
    }

    fn new(name: &str, kind: EntryKind) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            distance: 100.0,
            quality: 1,
            free: None,
        }
    }

    /// Set the distance from the origin.
    #[must_use]
    pub const fn distance(mut self, meters: f64) -> Self {
        self.distance = meters;
        self
    }

    /// Set the public quality score.
    #[must_use]
    pub const fn quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Override the kind's default free flag.
    #[must_use]
    pub const fn free(mut self, free: bool) -> Self {
        self.free = Some(free);
        self
    }

    /// Finish the entry.
    #[must_use]
    pub fn build(self) -> Entry {
        let (source, category) = match self.kind {
            EntryKind::PublicFacility => (Source::PublicRegistry, None),
            EntryKind::CommercialVenue => (Source::VenueDirectory, Some(VenueCategory::fallback())),
        };
        let slug = self.name.to_lowercase().replace(' ', "_");
        Entry {
            id: format!("{}_{slug}", source.id_prefix()),
            name: self.name,
            kind: self.kind,
            location: Coord {
                x: 126.9780,
                y: 37.5665,
            },
            address: "test address".to_owned(),
            is_free: self.free.unwrap_or(self.kind.free_by_default()),
            quality_score: self.quality,
            quality_precise: f64::from(self.quality),
            distance_meters: self.distance,
            urgency_bucket: BucketThresholds::default().bucket_for(self.distance),
            urgency_score: 0.0,
            source,
            hours: None,
            phone: None,
            facilities: Facilities::default(),
            category: category.map(|c| c.key.to_owned()),
            icon: category.map_or(PUBLIC_FACILITY_ICON, |c| c.icon).to_owned(),
            color: category.map_or(PUBLIC_FACILITY_COLOR, |c| c.color).to_owned(),
        }
    }
}

/// A public facility row at `latitude`/`longitude`.
#[must_use]
pub fn raw_facility(provider_id: &str, name: &str, latitude: f64, longitude: f64) -> RawRecord {
    RawRecord::PublicFacility(RawFacility {
        provider_id: provider_id.to_owned(),
        name: Some(name.to_owned()),
        latitude: Some(latitude),
        longitude: Some(longitude),
        ..RawFacility::default()
    })
}

/// A venue result in `category` at `latitude`/`longitude`.
#[must_use]
pub fn raw_venue(
    provider_id: &str,
    category: &str,
    name: &str,
    latitude: f64,
    longitude: f64,
) -> RawRecord {
    RawRecord::Venue(RawVenue {
        provider_id: provider_id.to_owned(),
        category: category.to_owned(),
        name: Some(name.to_owned()),
        latitude: Some(latitude),
        longitude: Some(longitude),
        ..RawVenue::default()
    })
}

/// Adapter returning a canned response and counting calls.
#[derive(Debug)]
pub struct StubAdapter {
    name: String,
    kind: EntryKind,
    response: Result<Vec<RawRecord>, AdapterError>,
    calls: Cell<usize>,
}

impl StubAdapter {
    /// Adapter that succeeds with `records`.
    #[must_use]
    pub fn with_records(name: &str, kind: EntryKind, records: Vec<RawRecord>) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            response: Ok(records),
            calls: Cell::new(0),
        }
    }

    /// Adapter that always fails with `error`.
    #[must_use]
    pub fn with_error(name: &str, kind: EntryKind, error: AdapterError) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            response: Err(error),
            calls: Cell::new(0),
        }
    }

    /// Adapter that fails with a network error.
    #[must_use]
    pub fn failing(name: &str, kind: EntryKind) -> Self {
        Self::with_error(
            name,
            kind,
            AdapterError::Network {
                url: format!("https://{name}.invalid"),
                message: "connection refused".to_owned(),
            },
        )
    }

    /// Number of times `search_near` has been awaited.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

#[async_trait(?Send)]
impl SourceAdapter for StubAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntryKind {
        self.kind
    }

    async fn search_near(
        &self,
        _origin: Coord<f64>,
        _radius_meters: f64,
        _categories: &[&'static VenueCategory],
    ) -> Result<Vec<RawRecord>, AdapterError> {
        self.calls.set(self.calls.get() + 1);
        self.response.clone()
    }
}

/// Forwards to a shared adapter so tests can inspect it after the engine
/// takes ownership.
#[derive(Debug)]
pub struct SharedAdapter(
    /// Wrapped adapter.
    pub std::rc::Rc<StubAdapter>,
);

#[async_trait(?Send)]
impl SourceAdapter for SharedAdapter {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn kind(&self) -> EntryKind {
        self.0.kind()
    }

    async fn search_near(
        &self,
        origin: Coord<f64>,
        radius_meters: f64,
        categories: &[&'static VenueCategory],
    ) -> Result<Vec<RawRecord>, AdapterError> {
        self.0.search_near(origin, radius_meters, categories).await
    }
}
