//! Validated newtypes for client configuration.

use std::fmt;

use reqwest::Url;

use crate::error::ConfigError;

/// A validated Arsenal service endpoint.
///
/// The endpoint must be an `http` or `https` URL with a host. Any trailing
/// slash is dropped so request paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use arsenal_client::Endpoint;
///
/// let endpoint = Endpoint::new("http://127.0.0.1:6385/").unwrap();
/// assert_eq!(endpoint.as_ref(), "http://127.0.0.1:6385");
/// assert_eq!(endpoint.host(), "127.0.0.1");
/// assert_eq!(endpoint.port(), 6385);
/// assert_eq!(endpoint.cache_key(), "127.0.0.1:6385");
/// assert_eq!(endpoint.base_path(), "");
///
/// let proxied = Endpoint::new("https://infra.example.com/arsenal/").unwrap();
/// assert_eq!(proxied.base_path(), "/arsenal");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
    host: String,
    port: u16,
    base_path: String,
}

impl Endpoint {
    /// Creates a new validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEndpoint`] for a blank string and
    /// [`ConfigError::InvalidEndpoint`] if the URL cannot be parsed, is not
    /// http(s), or has no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }

        let invalid = || ConfigError::InvalidEndpoint {
            url: trimmed.to_string(),
        };

        let parsed = Url::parse(trimmed).map_err(|_| invalid())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid());
        }
        let host = parsed.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;
        let port = parsed.port_or_known_default().ok_or_else(invalid)?;
        let base_path = parsed.path().trim_end_matches('/').to_string();

        Ok(Self {
            url: trimmed.trim_end_matches('/').to_string(),
            host: host.to_string(),
            port,
            base_path,
        })
    }

    /// Returns the host name of the endpoint.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port, falling back to the scheme's default.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the path the endpoint is mounted under, without a trailing
    /// slash. Empty when the API sits at the root of the host.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the `host:port` key used by the version cache.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
