//! Search orchestration: query, engine, and result envelope.

use thiserror::Error;

mod engine;
mod envelope;
mod query;

pub use engine::{EngineConfig, SearchEngine};
pub use envelope::{EMPTY_MESSAGE, FAILED_MESSAGE, ResultEnvelope, SearchOutcome, SourceCounts};
pub use query::SearchQuery;

/// Reasons a search falls back to sample locations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// Origin coordinates are non-finite or out of range.
    #[error("invalid origin ({latitude}, {longitude})")]
    InvalidOrigin {
        /// Requested latitude.
        latitude: f64,
        /// Requested longitude.
        longitude: f64,
    },
    /// Radius is not a positive finite number.
    #[error("invalid search radius {radius_meters}")]
    InvalidRadius {
        /// Requested radius in metres.
        radius_meters: f64,
    },
    /// Every enabled adapter returned an error.
    #[error("all {attempted} sources failed")]
    AllSourcesFailed {
        /// Number of adapters that were called.
        attempted: usize,
    },
}

/// Stages of one search, logged at debug level as the engine moves through
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchPhase {
    /// Nothing has run yet.
    Idle,
    /// Adapters are being polled.
    Fetching,
    /// Raw records are being converted.
    Normalizing,
    /// Deduplication, scoring, ranking, and filtering.
    Ranking,
    /// The envelope is ready.
    Done,
    /// The search fell back to sample locations.
    Failed,
}
