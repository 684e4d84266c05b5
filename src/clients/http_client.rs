//! HTTP transport for the Arsenal API.
//!
//! This module provides the [`HttpClient`] type, the production
//! [`Transport`]. It retries requests that fail with HTTP 409 Conflict,
//! maps error statuses onto [`HttpError`] variants, and records the API
//! version the server negotiated.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde_json::Value;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::{HttpResponse, API_VERSION_HEADER};
use crate::clients::transport::Transport;
use crate::config::{ApiVersion, ArsenalConfig, VersionSelection};
use crate::error::ConfigError;
use crate::rest::next_link_path;
use crate::version_cache::VersionCache;

/// Client version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Arsenal API.
///
/// The client handles:
/// - URL construction from the configured endpoint
/// - Default headers, including the API version header
/// - Retrying HTTP 409 responses `max_retries` times, `retry_interval` apart
/// - Writing the negotiated version to the version cache
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use arsenal_client::{ArsenalConfig, ApiVersion, Endpoint};
/// use arsenal_client::clients::{HttpClient, HttpMethod, Transport};
/// use arsenal_client::config::VersionSelection;
///
/// let config = ArsenalConfig::builder()
///     .endpoint(Endpoint::new("http://127.0.0.1:6385").unwrap())
///     .build()?;
///
/// let client = HttpClient::new(&config, ApiVersion::V1_1, VersionSelection::User, None)?;
/// let response = client.request(HttpMethod::Get, "/v1/resources", None).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (e.g., `http://127.0.0.1:6385`).
    base_uri: String,
    /// Path component of the endpoint, empty at the host root.
    base_path: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    max_retries: u32,
    retry_interval: Duration,
    api_version: ApiVersion,
    selection: VersionSelection,
    version_cache: Option<VersionCache>,
    cache_key: String,
    version_recorded: AtomicBool,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoint, retry policy, timeout and TLS settings
    /// * `api_version` - The version sent in the negotiation header
    /// * `selection` - How `api_version` was chosen
    /// * `version_cache` - Where to record a negotiated version, if anywhere
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientInit`] if the underlying reqwest
    /// client cannot be created.
    pub fn new(
        config: &ArsenalConfig,
        api_version: ApiVersion,
        selection: VersionSelection,
        version_cache: Option<VersionCache>,
    ) -> Result<Self, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}arsenal-client/{CLIENT_VERSION}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(API_VERSION_HEADER.to_string(), api_version.to_string());

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .danger_accept_invalid_certs(config.insecure());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ConfigError::HttpClientInit {
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_uri: config.endpoint().as_ref().to_string(),
            base_path: config.endpoint().base_path().to_string(),
            default_headers,
            max_retries: config.max_retries(),
            retry_interval: config.retry_interval(),
            api_version,
            selection,
            version_cache,
            cache_key: config.endpoint().cache_key(),
            version_recorded: AtomicBool::new(false),
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the API version sent with every request.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns how the API version was selected.
    #[must_use]
    pub const fn version_selection(&self) -> VersionSelection {
        self.selection
    }

    /// Sends a request to the Arsenal API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A network error occurs (`Network`)
    /// - The server answers 401, 404 or any other non-2xx (`Unauthorized`,
    ///   `NotFound`, `Response`)
    /// - The server still answers 409 after all retries (`Conflict`)
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!("{}{}", self.base_uri, request.path);

        let mut headers = self.default_headers.clone();
        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;
            tracing::debug!(
                "{} {} (attempt {})",
                request.http_method,
                request.path,
                tries
            );

            let mut req_builder = self
                .client
                .request(request.http_method.as_reqwest(), &url);
            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }
            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.to_string());
            }

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await?;
            let body = Self::parse_body(&body_text);

            let response = HttpResponse::new(code, res_headers, body);

            if response.is_ok() {
                self.record_negotiated_version(&response);
                return Ok(response);
            }

            if code == 409 && tries <= self.max_retries {
                tracing::warn!(
                    "Conflict on {} {} (attempt {} of {}), retrying in {:?}",
                    request.http_method,
                    request.path,
                    tries,
                    self.max_retries + 1,
                    self.retry_interval
                );
                tokio::time::sleep(self.retry_interval).await;
                continue;
            }

            return Err(HttpError::from_status(
                code,
                Self::serialize_error(&response),
                response.request_id().map(String::from),
            ));
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Decodes a body. Empty bodies become `null`; non-JSON bodies are kept
    /// as a string so error messages can still be reported.
    fn parse_body(text: &str) -> Value {
        if text.trim().is_empty() {
            return Value::Null;
        }
        serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
    }

    /// Extracts a readable message from an error response.
    ///
    /// Arsenal reports failures as `{"error_message": "<json>"}` where the
    /// inner document carries a `faultstring`. The inner document may also
    /// arrive already decoded.
    fn serialize_error(response: &HttpResponse) -> String {
        if let Some(error_message) = response.body.get("error_message") {
            let inner = match error_message {
                Value::String(s) => {
                    serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.clone()))
                }
                other => other.clone(),
            };
            if let Some(fault) = inner.get("faultstring").and_then(Value::as_str) {
                return fault.to_string();
            }
            if let Value::String(s) = inner {
                return s;
            }
        }

        if let Some(fault) = response.body.get("faultstring").and_then(Value::as_str) {
            return fault.to_string();
        }

        match &response.body {
            Value::String(s) => s.clone(),
            Value::Null => reqwest::StatusCode::from_u16(response.code)
                .ok()
                .and_then(|status| status.canonical_reason())
                .unwrap_or("Unknown error")
                .to_string(),
            other => other.to_string(),
        }
    }

    fn record_negotiated_version(&self, response: &HttpResponse) {
        if self.selection != VersionSelection::Default {
            return;
        }
        let (Some(cache), Some(version)) = (&self.version_cache, response.api_version()) else {
            return;
        };
        if self.version_recorded.swap(true, Ordering::Relaxed) {
            return;
        }
        cache.store(&self.cache_key, version);
    }
}

impl Transport for HttpClient {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(method, path).maybe_body(body).build()?;
        self.send(request).await
    }

    /// Links echo the endpoint's base path, which `send` adds back.
    fn link_path(&self, link: &str) -> String {
        let path = next_link_path(link);
        match path.strip_prefix(self.base_path.as_str()) {
            Some(rest) if !self.base_path.is_empty() && rest.starts_with('/') => rest.to_string(),
            _ => path,
        }
    }
}
