//! Error types for client configuration.
//!
//! This module contains the error type raised while building a client
//! configuration or constructing a client. These errors are always detected
//! before any request is sent.
//!
//! # Example
//!
//! ```rust
//! use arsenal_client::{ArsenalConfig, ConfigError};
//!
//! let result = ArsenalConfig::builder().build();
//! assert!(matches!(result, Err(ConfigError::MissingEndpoint)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant carries an actionable message so the command-line shell can
/// print it as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No endpoint was provided.
    #[error("Must provide an Arsenal endpoint, either via --arsenal-url or via env[ARSENAL_URL].")]
    MissingEndpoint,

    /// The endpoint URL could not be parsed.
    #[error("Invalid endpoint URL '{url}'. Expected an http or https URL (e.g., 'http://127.0.0.1:6385').")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected 'latest' or a 'MAJOR.MINOR' version such as '1.1'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// No client is registered for the requested major version.
    #[error("Unsupported API major version '{version}'. Supported versions: {supported}.")]
    UnsupportedApiVersion {
        /// The requested version.
        version: String,
        /// Comma separated list of registered versions.
        supported: String,
    },

    /// The retry interval is shorter than one second.
    #[error("You must provide a value >= 1 for the retry interval (got {seconds}s).")]
    InvalidRetryInterval {
        /// The rejected interval, in whole seconds.
        seconds: u64,
    },

    /// The HTTP transport could not be initialized.
    #[error("Failed to initialize the HTTP client: {reason}")]
    HttpClientInit {
        /// The underlying failure.
        reason: String,
    },
}
