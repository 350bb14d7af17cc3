//! HTTP client settings shared by the source adapters.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use savemetoilet_core::AdapterError;
use thiserror::Error;

/// Default user agent for upstream requests.
pub const DEFAULT_USER_AGENT: &str = "SaveMeToilet/1.0";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

const REDACTED: &str = "***";

/// Error returned when an adapter's HTTP client cannot be built.
#[derive(Debug, Error)]
pub enum HttpSourceBuildError {
    /// `reqwest` rejected the client configuration.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(
        /// Underlying client error.
        #[source]
        reqwest::Error,
    ),
}

/// Connection settings for one upstream service.
#[derive(Clone)]
pub struct HttpSourceConfig {
    /// Service root, e.g. `"http://openapi.seoul.go.kr:8088"`.
    pub base_url: String,
    /// Credential sent with every request.
    pub api_key: String,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl fmt::Debug for HttpSourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSourceConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &REDACTED)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl HttpSourceConfig {
    /// Create a configuration with the default timeout and user agent.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl AsRef<str>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.as_ref().trim().to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Base URL without a trailing slash.
    pub(crate) fn root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// The API key as it is sent on the wire.
    pub(crate) fn key(&self) -> &str {
        self.api_key.trim()
    }

    /// Whether a non-blank key is configured.
    pub(crate) fn has_api_key(&self) -> bool {
        !self.key().is_empty()
    }

    /// `url` with the API key replaced, for logs and error messages.
    pub(crate) fn redact(&self, url: &str) -> String {
        if self.has_api_key() {
            url.replace(self.key(), REDACTED)
        } else {
            url.to_owned()
        }
    }

    pub(crate) fn build_client(&self) -> Result<Client, HttpSourceBuildError> {
        Client::builder()
            .user_agent(&self.user_agent)
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .build()
            .map_err(HttpSourceBuildError::HttpClient)
    }

    /// Map a `reqwest` failure onto the adapter error taxonomy.
    pub(crate) fn convert_error(&self, error: &reqwest::Error, url: &str) -> AdapterError {
        let url = self.redact(url);
        let message = self.redact(&error.to_string());
        if error.is_timeout() {
            return AdapterError::Timeout {
                url,
                timeout_secs: self.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return AdapterError::Unauthorized { message };
            }
            return AdapterError::Http {
                url,
                status: status.as_u16(),
                message,
            };
        }
        if error.is_decode() {
            return AdapterError::Parse { message };
        }
        AdapterError::Network { url, message }
    }

    pub(crate) fn missing_key(&self, adapter: &str) -> AdapterError {
        AdapterError::Unauthorized {
            message: format!("no API key configured for {adapter}"),
        }
    }
}
