//! Core domain types and pipeline for the SaveMeToilet search engine.
//!
//! A search fans out to [`SourceAdapter`]s, normalizes their raw records
//! into [`Entry`] values, drops duplicates, scores quality, ranks by the
//! active [`UrgencyProfile`], and applies [`SearchFilters`]. The outcome is
//! always a [`ResultEnvelope`]; when every source fails it carries built-in
//! sample locations instead of an error.
//!
//! # Examples
//!
//! ```
//! use savemetoilet_core::{SearchEngine, SearchFilters, SearchQuery, SearchOutcome};
//!
//! let engine = SearchEngine::new(Vec::new());
//! let query = SearchQuery::new(
//!     37.5665,
//!     126.9780,
//!     "moderate",
//!     500.0,
//!     SearchFilters::default(),
//!     &["starbucks"],
//! );
//! let envelope = futures_util::FutureExt::now_or_never(engine.search(&query))
//!     .expect("no adapters means no awaiting");
//! assert_eq!(envelope.outcome(), SearchOutcome::Empty);
//! ```

#![forbid(unsafe_code)]

pub mod category;
pub mod dedup;
pub mod entry;
pub mod fallback;
pub mod filter;
pub mod geo_math;
pub mod normalize;
pub mod profile;
pub mod quality;
pub mod rank;
pub mod raw;
pub mod search;
pub mod source;
pub mod stats;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use category::{CATALOGUE, VenueCategory};
pub use dedup::{DedupConfig, Deduplicable, deduplicate};
pub use entry::{
    ADDRESS_UNAVAILABLE, BucketThresholds, Entry, EntryKind, Facilities, Source, UrgencyBucket,
};
pub use fallback::{DEFAULT_ORIGIN, sample_entries};
pub use filter::{FilterRule, SearchFilters, apply_rules};
pub use geo_math::{distance_meters, walk_minutes};
pub use normalize::{Candidate, MalformedRecord, Normalizer};
pub use profile::{UnknownUrgencyLevel, UrgencyLevel, UrgencyProfile};
pub use quality::{QualityScore, QualityScorer, QualitySignals, QualityTier};
pub use rank::UrgencyRanker;
pub use raw::{RawFacility, RawRecord, RawVenue};
pub use search::{
    EMPTY_MESSAGE, EngineConfig, FAILED_MESSAGE, ResultEnvelope, SearchEngine, SearchError,
    SearchOutcome, SearchPhase, SearchQuery, SourceCounts,
};
pub use source::{AdapterError, SourceAdapter};
pub use stats::{QualityDistribution, SearchStats};
