//! HTTP-specific error types for the Arsenal client.
//!
//! The transport maps status codes onto typed variants so callers can
//! react to the common failures without inspecting numbers:
//!
//! - **401**: [`HttpError::Unauthorized`]
//! - **404**: [`HttpError::NotFound`]
//! - **409**: [`HttpError::Conflict`], once the conflict retries are spent
//! - **other non-2xx**: [`HttpError::Response`]
//!
//! # Example
//!
//! ```rust,ignore
//! use arsenal_client::clients::HttpError;
//!
//! match transport.request(HttpMethod::Get, "/v1/resources", None).await {
//!     Ok(response) => println!("{}", response.body),
//!     Err(HttpError::NotFound(e)) => println!("missing: {}", e.message),
//!     Err(HttpError::Conflict(e)) => println!("still locked: {}", e.message),
//!     Err(e) => println!("other error: {e}"),
//! }
//! ```

use thiserror::Error;

/// A non-successful response from the Arsenal API.
///
/// `message` holds the server's fault string when the body carried one,
/// otherwise the raw body or the status reason.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message} (HTTP {code})")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Human readable error message extracted from the body.
    pub message: String,
    /// Request id reported by the server (from `X-Openstack-Request-Id`).
    pub error_reference: Option<String>,
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// Request paths are absolute (`/v1/...`).
    #[error("Invalid request path '{path}'. Paths must start with '/'.")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },
}

/// Unified error type for the HTTP transport.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The server rejected the credentials (401).
    #[error("Unauthorized: {0}")]
    Unauthorized(HttpResponseError),

    /// The requested entity does not exist (404).
    #[error("Not found: {0}")]
    NotFound(HttpResponseError),

    /// The entity is locked by another operation (409).
    #[error("Conflict: {0}")]
    Conflict(HttpResponseError),

    /// Any other non-2xx response.
    #[error(transparent)]
    Response(HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Builds the typed variant for a non-2xx status.
    #[must_use]
    pub fn from_status(code: u16, message: String, error_reference: Option<String>) -> Self {
        let error = HttpResponseError {
            code,
            message,
            error_reference,
        };
        match code {
            401 => Self::Unauthorized(error),
            404 => Self::NotFound(error),
            409 => Self::Conflict(error),
            _ => Self::Response(error),
        }
    }

    /// Returns the HTTP status code, if the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(e) | Self::NotFound(e) | Self::Conflict(e) | Self::Response(e) => {
                Some(e.code)
            }
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }

    /// Returns the server request id, if one was reported.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Unauthorized(e) | Self::NotFound(e) | Self::Conflict(e) | Self::Response(e) => {
                e.error_reference.as_deref()
            }
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }
}

// Verify HttpError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
};
