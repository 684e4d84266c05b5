//! Error types for resource manager operations.
//!
//! [`ResourceError`] adds the client-side validation failures to the
//! transport's [`HttpError`], which is carried through unchanged:
//!
//! - [`ResourceError::InvalidAttribute`]: rejected before any request is sent
//! - [`ResourceError::UnexpectedResponse`]: the server answered 2xx with a
//!   body of the wrong shape
//! - [`ResourceError::Http`]: any transport failure, including
//!   `Unauthorized`, `NotFound` and `Conflict`
//!
//! # Example
//!
//! ```rust,ignore
//! use arsenal_client::clients::HttpError;
//! use arsenal_client::rest::ResourceError;
//!
//! match manager.get("abc", None).await {
//!     Ok(resource) => println!("{:?}", resource.description()),
//!     Err(ResourceError::Http(HttpError::NotFound(e))) => println!("{}", e.message),
//!     Err(e) => println!("{e}"),
//! }
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Errors returned by resource manager operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The caller asked for an invalid combination of arguments.
    #[error("{message}")]
    InvalidAttribute {
        /// What was wrong with the request.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("Unexpected response for {resource}: {reason}")]
    UnexpectedResponse {
        /// The resource type name.
        resource: &'static str,
        /// Description of the mismatch.
        reason: String,
    },

    /// A transport error, passed through unmodified.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    pub(crate) fn invalid_attribute(message: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            message: message.into(),
        }
    }

    /// Returns true when the server reported that the entity does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Http(HttpError::NotFound(_)))
    }

    /// Returns the server request id, if the error came from a response.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Http(e) => e.request_id(),
            _ => None,
        }
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_attribute_message_is_verbatim() {
        let error = ResourceError::invalid_attribute("Can't fetch a subset of fields with 'detail' set");
        assert_eq!(
            error.to_string(),
            "Can't fetch a subset of fields with 'detail' set"
        );
    }

    #[test]
    fn test_http_errors_pass_through() {
        let error: ResourceError =
            HttpError::from_status(404, "Resource x could not be found.".into(), Some("req-9".into()))
                .into();

        assert!(error.is_not_found());
        assert_eq!(error.request_id(), Some("req-9"));
        assert_eq!(
            error.to_string(),
            "Not found: Resource x could not be found. (HTTP 404)"
        );
    }

    #[test]
    fn test_unexpected_response_message() {
        let error = ResourceError::UnexpectedResponse {
            resource: "Resource",
            reason: "expected a JSON object".to_string(),
        };
        assert!(!error.is_not_found());
        assert_eq!(
            error.to_string(),
            "Unexpected response for Resource: expected a JSON object"
        );
    }
}
