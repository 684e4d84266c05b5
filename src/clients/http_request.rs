//! HTTP request types for the Arsenal client.
//!
//! This module provides the [`HttpRequest`] type and its builder. Request
//! paths are absolute (`/v1/resources/?limit=1`) and are sent verbatim,
//! query string included, so callers control the exact bytes on the wire.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the Arsenal API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET request for reading entities.
    Get,
    /// POST request for creating entities.
    Post,
    /// PATCH request carrying a JSON Patch document.
    Patch,
    /// DELETE request for removing entities.
    Delete,
}

impl HttpMethod {
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }

    /// Returns true for methods that must carry a body.
    #[must_use]
    pub const fn requires_body(self) -> bool {
        matches!(self, Self::Post | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A request to the Arsenal API.
///
/// # Example
///
/// ```rust
/// use arsenal_client::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Patch, "/v1/resources/abc")
///     .body(json!([{"op": "remove", "path": "/description"}]))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.http_method, HttpMethod::Patch);
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method.
    pub http_method: HttpMethod,
    /// Absolute path including any query string.
    pub path: String,
    /// Optional JSON body.
    pub body: Option<serde_json::Value>,
    /// Headers sent in addition to the client defaults.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequest {
    /// Creates a new builder for the given method and path.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the path is not absolute or a
    /// POST/PATCH request has no body.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if !self.path.starts_with('/') {
            return Err(InvalidHttpRequestError::InvalidPath {
                path: self.path.clone(),
            });
        }

        if self.http_method.requires_body() && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for [`HttpRequest`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<serde_json::Value>,
    extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            extra_headers: None,
        }
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets an optional JSON body.
    #[must_use]
    pub fn maybe_body(mut self, body: Option<serde_json::Value>) -> Self {
        self.body = body;
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Builds and validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if validation fails.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "/v1/resources/?limit=1")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.path, "/v1/resources/?limit=1");
        assert!(request.body.is_none());
        assert!(request.extra_headers.is_none());
    }

    #[test]
    fn test_verify_requires_body_for_post_and_patch() {
        for method in [HttpMethod::Post, HttpMethod::Patch] {
            let result = HttpRequest::builder(method, "/v1/resources").build();
            assert!(matches!(
                result,
                Err(InvalidHttpRequestError::MissingBody { .. })
            ));
        }
    }

    #[test]
    fn test_delete_does_not_require_body() {
        let request = HttpRequest::builder(HttpMethod::Delete, "/v1/resources/abc")
            .maybe_body(None)
            .build();
        assert!(request.is_ok());
    }

    #[test]
    fn test_verify_rejects_relative_path() {
        let result = HttpRequest::builder(HttpMethod::Get, "v1/resources").build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::InvalidPath { path }) if path == "v1/resources"
        ));
    }

    #[test]
    fn test_header_accumulates() {
        let request = HttpRequest::builder(HttpMethod::Post, "/v1/resources")
            .body(json!({"description": "rack"}))
            .header("X-Trace", "1")
            .header("X-Other", "2")
            .build()
            .unwrap();

        let headers = request.extra_headers.unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("X-Trace"), Some(&"1".to_string()));
    }
}
