//! Source adapter seam between the engine and upstream providers.

use async_trait::async_trait;
use geo::Coord;
use thiserror::Error;

use crate::category::VenueCategory;
use crate::entry::EntryKind;
use crate::raw::RawRecord;

/// Errors an adapter reports for a whole request.
///
/// Individually malformed records are not errors; adapters pass them through
/// and the normalizer rejects them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// The request did not complete within the adapter's timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL with credentials redacted.
        url: String,
        /// Configured timeout.
        timeout_secs: u64,
    },
    /// The upstream service answered with an HTTP error status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Request URL with credentials redacted.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The request could not be sent or the connection failed.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Request URL with credentials redacted.
        url: String,
        /// Error description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse response: {message}")]
    Parse {
        /// Error description.
        message: String,
    },
    /// The upstream service reported an application-level error.
    #[error("service returned {code}: {message}")]
    Service {
        /// Provider status code.
        code: String,
        /// Provider message.
        message: String,
    },
    /// Credentials were rejected or missing.
    #[error("authentication failed: {message}")]
    Unauthorized {
        /// Error description.
        message: String,
    },
}

/// Provider of raw restroom records near a coordinate.
///
/// Implementations own their HTTP clients and credentials; the engine only
/// sees this trait. A call must fail as a whole rather than return a
/// truncated list.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use geo::Coord;
/// use savemetoilet_core::{AdapterError, EntryKind, RawRecord, SourceAdapter, VenueCategory};
///
/// struct Empty;
///
/// #[async_trait(?Send)]
/// impl SourceAdapter for Empty {
///     fn name(&self) -> &str {
///         "empty"
///     }
///
///     fn kind(&self) -> EntryKind {
///         EntryKind::PublicFacility
///     }
///
///     async fn search_near(
///         &self,
///         _origin: Coord<f64>,
///         _radius_meters: f64,
///         _categories: &[&'static VenueCategory],
///     ) -> Result<Vec<RawRecord>, AdapterError> {
///         Ok(Vec::new())
///     }
/// }
/// ```
#[async_trait(?Send)]
pub trait SourceAdapter {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Kind of entries this adapter yields; public adapters are joined first.
    fn kind(&self) -> EntryKind;

    /// Fetch records within `radius_meters` of `origin`.
    ///
    /// Commercial adapters search only the given `categories`; public
    /// adapters ignore them.
    async fn search_near(
        &self,
        origin: Coord<f64>,
        radius_meters: f64,
        categories: &[&'static VenueCategory],
    ) -> Result<Vec<RawRecord>, AdapterError>;
}
