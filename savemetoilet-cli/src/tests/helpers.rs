//! Test helpers for composing search arguments and stub sources.

use super::*;
use crate::search::{SearchConfig, SourceAdapterBuilder};
use savemetoilet_core::test_support::StubAdapter;
use savemetoilet_core::{EntryKind, RawRecord, SourceAdapter};

pub(super) const CITY_HALL_LAT: f64 = 37.5665;
pub(super) const CITY_HALL_LNG: f64 = 126.9780;

/// Minimal valid arguments: an origin and a registry key.
pub(super) fn city_hall_args() -> SearchArgs {
    SearchArgs {
        lat: Some(CITY_HALL_LAT),
        lng: Some(CITY_HALL_LNG),
        seoul_api_key: Some("registry-key".to_owned()),
        ..SearchArgs::default()
    }
}

/// Canned response for one stub source.
#[derive(Debug, Clone)]
pub(super) enum StubSource {
    Records(Vec<RawRecord>),
    Unreachable,
}

/// Builds stub adapters instead of HTTP clients.
#[derive(Debug, Clone, Default)]
pub(super) struct StubSourceBuilder {
    pub(super) registry: Option<StubSource>,
    pub(super) directory: Option<StubSource>,
}

fn stub(name: &str, kind: EntryKind, source: &StubSource) -> Box<dyn SourceAdapter> {
    match source {
        StubSource::Records(records) => {
            Box::new(StubAdapter::with_records(name, kind, records.clone()))
        }
        StubSource::Unreachable => Box::new(StubAdapter::failing(name, kind)),
    }
}

impl SourceAdapterBuilder for StubSourceBuilder {
    fn build(&self, _config: &SearchConfig) -> Result<Vec<Box<dyn SourceAdapter>>, CliError> {
        let registry = self
            .registry
            .iter()
            .map(|source| stub("registry", EntryKind::PublicFacility, source));
        let directory = self
            .directory
            .iter()
            .map(|source| stub("directory", EntryKind::CommercialVenue, source));
        Ok(registry.chain(directory).collect())
    }
}
