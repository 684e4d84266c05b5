//! HTTP response type for the Arsenal client.

use std::collections::HashMap;

/// Header carrying the negotiated API version, in both directions.
pub const API_VERSION_HEADER: &str = "X-Arsenal-API-Version";

/// A decoded response from the Arsenal API.
///
/// Header names are lower-cased. An empty body decodes to
/// `serde_json::Value::Null`.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lower-cased name.
    pub headers: HashMap<String, Vec<String>>,
    /// Decoded JSON body.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new response.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns true for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the server request id, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-openstack-request-id")
            .or_else(|| self.header("x-request-id"))
    }

    /// Returns the API version the server used for this response.
    #[must_use]
    pub fn api_version(&self) -> Option<&str> {
        self.header(API_VERSION_HEADER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), vec![(*v).to_string()]))
            .collect()
    }

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(response.is_ok(), "Expected is_ok() for code {code}");
        }
    }

    #[test]
    fn test_is_ok_returns_false_otherwise() {
        for code in [100, 301, 400, 404, 409, 500] {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(!response.is_ok(), "Expected !is_ok() for code {code}");
        }
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = HttpResponse::new(
            200,
            headers(&[("x-arsenal-api-version", "1.1")]),
            serde_json::Value::Null,
        );
        assert_eq!(response.api_version(), Some("1.1"));
        assert_eq!(response.header("X-ARSENAL-API-VERSION"), Some("1.1"));
    }

    #[test]
    fn test_request_id_prefers_openstack_header() {
        let response = HttpResponse::new(
            200,
            headers(&[("x-openstack-request-id", "req-1"), ("x-request-id", "req-2")]),
            serde_json::Value::Null,
        );
        assert_eq!(response.request_id(), Some("req-1"));

        let response =
            HttpResponse::new(200, headers(&[("x-request-id", "req-2")]), serde_json::Value::Null);
        assert_eq!(response.request_id(), Some("req-2"));
    }
}
