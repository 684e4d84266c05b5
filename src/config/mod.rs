//! Configuration types for the Arsenal client.
//!
//! This module provides the configuration used to construct a client.
//!
//! # Overview
//!
//! - [`ArsenalConfig`]: connection target, API version and retry policy
//! - [`ArsenalConfigBuilder`]: a builder for [`ArsenalConfig`]
//! - [`Endpoint`]: a validated service URL
//! - [`ApiVersion`]: the Arsenal API version to request
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use arsenal_client::{ArsenalConfig, Endpoint};
//!
//! let config = ArsenalConfig::builder()
//!     .endpoint(Endpoint::new("http://127.0.0.1:6385").unwrap())
//!     .max_retries(3)
//!     .retry_interval(Duration::from_secs(1))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.max_retries(), 3);
//! ```

mod newtypes;
mod version;

use std::time::Duration;

pub use newtypes::Endpoint;
pub use version::ApiVersion;

use crate::error::ConfigError;

/// Default number of retries after an HTTP 409 Conflict.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Default pause between conflict retries.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(2);

/// How the API version of a client was chosen.
///
/// Only a `Default` selection is replaced by the version the server
/// announces and written back to the version cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionSelection {
    /// Explicitly requested by the user.
    User,
    /// Read from the on-disk version cache.
    Cached,
    /// Nothing was requested; the built-in default is used.
    Default,
}

/// Configuration for an Arsenal client.
///
/// # Thread Safety
///
/// `ArsenalConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Example
///
/// ```rust
/// use arsenal_client::{ArsenalConfig, ApiVersion, Endpoint};
///
/// let config = ArsenalConfig::builder()
///     .endpoint(Endpoint::new("http://127.0.0.1:6385").unwrap())
///     .api_version(ApiVersion::V1_0)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.api_version(), Some(&ApiVersion::V1_0));
/// ```
#[derive(Clone, Debug)]
pub struct ArsenalConfig {
    endpoint: Endpoint,
    api_version: Option<ApiVersion>,
    max_retries: u32,
    retry_interval: Duration,
    timeout: Option<Duration>,
    insecure: bool,
    user_agent_prefix: Option<String>,
}

impl ArsenalConfig {
    /// Creates a new builder for constructing an `ArsenalConfig`.
    #[must_use]
    pub fn builder() -> ArsenalConfigBuilder {
        ArsenalConfigBuilder::new()
    }

    /// Returns the service endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the explicitly requested API version, if any.
    #[must_use]
    pub const fn api_version(&self) -> Option<&ApiVersion> {
        self.api_version.as_ref()
    }

    /// Returns the number of retries after a conflict response.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the pause between conflict retries.
    #[must_use]
    pub const fn retry_interval(&self) -> Duration {
        self.retry_interval
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns whether TLS certificate verification is disabled.
    #[must_use]
    pub const fn insecure(&self) -> bool {
        self.insecure
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ArsenalConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ArsenalConfig>();
};

/// Builder for constructing [`ArsenalConfig`] instances.
///
/// `endpoint` is required. Everything else has a default:
///
/// - `api_version`: `None` (cached or built-in default is used)
/// - `max_retries`: [`DEFAULT_MAX_RETRIES`]
/// - `retry_interval`: [`DEFAULT_RETRY_INTERVAL`]
/// - `timeout`: `None`
/// - `insecure`: `false`
#[derive(Debug, Default)]
pub struct ArsenalConfigBuilder {
    endpoint: Option<Endpoint>,
    api_version: Option<ApiVersion>,
    max_retries: Option<u32>,
    retry_interval: Option<Duration>,
    timeout: Option<Duration>,
    insecure: Option<bool>,
    user_agent_prefix: Option<String>,
}

impl ArsenalConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the service endpoint (required).
    #[must_use]
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Requests a specific API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the number of retries after an HTTP 409. Zero disables retrying.
    #[must_use]
    pub const fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Sets the pause between conflict retries.
    #[must_use]
    pub const fn retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = Some(interval);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disables TLS certificate verification.
    #[must_use]
    pub const fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = Some(insecure);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ArsenalConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEndpoint`] if no endpoint was set and
    /// [`ConfigError::InvalidRetryInterval`] if the retry interval is
    /// shorter than one second.
    pub fn build(self) -> Result<ArsenalConfig, ConfigError> {
        let endpoint = self.endpoint.ok_or(ConfigError::MissingEndpoint)?;

        let retry_interval = self.retry_interval.unwrap_or(DEFAULT_RETRY_INTERVAL);
        if retry_interval < Duration::from_secs(1) {
            return Err(ConfigError::InvalidRetryInterval {
                seconds: retry_interval.as_secs(),
            });
        }

        Ok(ArsenalConfig {
            endpoint,
            api_version: self.api_version,
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            retry_interval,
            timeout: self.timeout,
            insecure: self.insecure.unwrap_or(false),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
