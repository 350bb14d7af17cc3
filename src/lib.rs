//! Facade crate for the SaveMeToilet search engine.
//!
//! This crate re-exports the core domain types and exposes the HTTP source
//! adapters behind the `http-sources` feature.

#![forbid(unsafe_code)]

pub use savemetoilet_core::{
    AdapterError, Entry, EntryKind, ResultEnvelope, SearchEngine, SearchError, SearchFilters,
    SearchOutcome, SearchQuery, SearchStats, SourceAdapter, UrgencyLevel, UrgencyProfile,
    VenueCategory,
};

#[cfg(feature = "http-sources")]
pub use savemetoilet_data::{
    HttpSourceBuildError, HttpSourceConfig, KakaoDirectoryAdapter, PlacesDirectoryAdapter,
    SeoulRegistryAdapter,
};

#[cfg(feature = "test-support")]
pub use savemetoilet_core::test_support;
