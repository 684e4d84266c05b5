//! Arsenal API client and the version registry.
//!
//! This module provides the [`ArsenalClient`] type, which picks the API
//! version to speak, owns the [`HttpClient`], and hands out resource
//! managers. Clients are constructed through a static registry keyed by
//! major version; see [`client_for_version`].

use crate::clients::HttpClient;
use crate::config::{ApiVersion, ArsenalConfig, VersionSelection};
use crate::error::ConfigError;
use crate::rest::resources::Resource;
use crate::rest::ResourceManager;
use crate::version_cache::VersionCache;

/// Constructor registered for one major API version.
pub type ClientConstructor =
    fn(&ArsenalConfig, Option<VersionCache>) -> Result<ArsenalClient, ConfigError>;

/// Major API versions this crate can speak, with their constructors.
pub const SUPPORTED_VERSIONS: &[(&str, ClientConstructor)] =
    &[("1", ArsenalClient::with_version_cache as ClientConstructor)];

/// Client for the Arsenal v1 API.
///
/// # Thread Safety
///
/// `ArsenalClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use arsenal_client::{ArsenalClient, ArsenalConfig, Endpoint};
/// use arsenal_client::rest::ListParams;
///
/// let config = ArsenalConfig::builder()
///     .endpoint(Endpoint::new("http://127.0.0.1:6385")?)
///     .build()?;
/// let client = ArsenalClient::new(&config)?;
///
/// for resource in client.resource().list(&ListParams::default()).await? {
///     println!("{:?}", resource.uuid());
/// }
/// ```
#[derive(Debug)]
pub struct ArsenalClient {
    http_client: HttpClient,
}

// Verify ArsenalClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ArsenalClient>();
};

impl ArsenalClient {
    /// Creates a client using the version cache in the user's cache
    /// directory.
    ///
    /// # Errors
    ///
    /// See [`ArsenalClient::with_version_cache`].
    pub fn new(config: &ArsenalConfig) -> Result<Self, ConfigError> {
        Self::with_version_cache(config, VersionCache::default_location())
    }

    /// Major API version this client speaks.
    pub const MAJOR: u32 = 1;

    /// Creates a client with an explicit version cache, or none.
    ///
    /// The API version is chosen in this order: the configured version, the
    /// version cached for this endpoint, the built-in default. A cached
    /// version of another major version is ignored. Only the default is
    /// later replaced by what the server announces.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedApiVersion`] if the configured
    /// version is not a v1 version, and [`ConfigError::HttpClientInit`] if
    /// the HTTP transport cannot be created.
    pub fn with_version_cache(
        config: &ArsenalConfig,
        version_cache: Option<VersionCache>,
    ) -> Result<Self, ConfigError> {
        if let Some(version) = config.api_version() {
            if version.major() != Self::MAJOR {
                return Err(ConfigError::UnsupportedApiVersion {
                    version: version.to_string(),
                    supported: Self::MAJOR.to_string(),
                });
            }
        }

        let (api_version, selection) = Self::select_version(config, version_cache.as_ref());
        tracing::debug!(
            "Using Arsenal API version {} ({:?}) for {}",
            api_version,
            selection,
            config.endpoint()
        );

        let http_client = HttpClient::new(config, api_version, selection, version_cache)?;
        Ok(Self { http_client })
    }

    fn select_version(
        config: &ArsenalConfig,
        version_cache: Option<&VersionCache>,
    ) -> (ApiVersion, VersionSelection) {
        if let Some(version) = config.api_version() {
            return (version.clone(), VersionSelection::User);
        }

        let cached = version_cache
            .and_then(|cache| cache.retrieve(&config.endpoint().cache_key()))
            .filter(|version| {
                let matches = version.major() == Self::MAJOR;
                if !matches {
                    tracing::warn!(
                        "Ignoring cached API version {} for {}: not a v{} version",
                        version,
                        config.endpoint(),
                        Self::MAJOR
                    );
                }
                matches
            });
        match cached {
            Some(version) => (version, VersionSelection::Cached),
            None => (ApiVersion::default(), VersionSelection::Default),
        }
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Returns the API version sent with every request.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        self.http_client.api_version()
    }

    /// Returns how the API version was selected.
    #[must_use]
    pub const fn version_selection(&self) -> VersionSelection {
        self.http_client.version_selection()
    }

    /// Returns the manager for `resources`.
    #[must_use]
    pub fn resource(&self) -> ResourceManager<'_, Resource, HttpClient> {
        ResourceManager::new(&self.http_client, self.api_version())
    }
}

/// Returns the registered major versions, comma separated.
#[must_use]
pub fn supported_versions() -> String {
    SUPPORTED_VERSIONS
        .iter()
        .map(|(major, _)| *major)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Constructs the client registered for `major`.
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedApiVersion`] when no client is
/// registered for `major`, or any error of the registered constructor.
///
/// # Example
///
/// ```rust
/// use arsenal_client::{client_for_version, ArsenalConfig, ConfigError, Endpoint};
///
/// let config = ArsenalConfig::builder()
///     .endpoint(Endpoint::new("http://127.0.0.1:6385").unwrap())
///     .build()
///     .unwrap();
///
/// assert!(matches!(
///     client_for_version("2", &config, None),
///     Err(ConfigError::UnsupportedApiVersion { .. })
/// ));
/// ```
pub fn client_for_version(
    major: &str,
    config: &ArsenalConfig,
    version_cache: Option<VersionCache>,
) -> Result<ArsenalClient, ConfigError> {
    let (_, constructor) = SUPPORTED_VERSIONS
        .iter()
        .find(|(registered, _)| *registered == major)
        .ok_or_else(|| ConfigError::UnsupportedApiVersion {
            version: major.to_string(),
            supported: supported_versions(),
        })?;
    constructor(config, version_cache)
}

/// Constructs the client matching the configured API version's major
/// number, or the default version's when none is configured.
///
/// # Errors
///
/// See [`client_for_version`].
pub fn connect(
    config: &ArsenalConfig,
    version_cache: Option<VersionCache>,
) -> Result<ArsenalClient, ConfigError> {
    let major = config
        .api_version()
        .map_or_else(|| ApiVersion::default().major(), ApiVersion::major);
    client_for_version(&major.to_string(), config, version_cache)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Endpoint;

    fn config(version: Option<ApiVersion>) -> ArsenalConfig {
        let mut builder =
            ArsenalConfig::builder().endpoint(Endpoint::new("http://127.0.0.1:6385").unwrap());
        if let Some(version) = version {
            builder = builder.api_version(version);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_user_version_wins_over_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = VersionCache::new(dir.path().join("versions.json"));
        cache.store("127.0.0.1:6385", "1.0");

        let client =
            ArsenalClient::with_version_cache(&config(Some(ApiVersion::V1_1)), Some(cache)).unwrap();

        assert_eq!(client.api_version(), &ApiVersion::V1_1);
        assert_eq!(client.version_selection(), VersionSelection::User);
    }

    #[test]
    fn test_cached_version_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let cache = VersionCache::new(dir.path().join("versions.json"));
        cache.store("127.0.0.1:6385", "1.0");

        let client = ArsenalClient::with_version_cache(&config(None), Some(cache)).unwrap();

        assert_eq!(client.api_version(), &ApiVersion::V1_0);
        assert_eq!(client.version_selection(), VersionSelection::Cached);
    }

    #[test]
    fn test_cached_version_of_other_major_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let cache = VersionCache::new(dir.path().join("versions.json"));
        cache.store("127.0.0.1:6385", "2.0");

        let client = connect(&config(None), Some(cache)).unwrap();

        assert_eq!(client.api_version(), &ApiVersion::V1_1);
        assert_eq!(client.version_selection(), VersionSelection::Default);
        assert_eq!(client.resource().paths().collection(), "/v1/resources");
    }

    #[test]
    fn test_constructor_rejects_configured_other_major() {
        let result = ArsenalClient::with_version_cache(&config(Some("2.0".parse().unwrap())), None);
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedApiVersion { ref version, .. }) if version == "2.0"
        ));
    }

    #[test]
    fn test_default_version_without_cache() {
        let client = ArsenalClient::with_version_cache(&config(None), None).unwrap();

        assert_eq!(client.api_version(), &ApiVersion::V1_1);
        assert_eq!(client.version_selection(), VersionSelection::Default);
        assert_eq!(client.resource().paths().collection(), "/v1/resources");
    }

    #[test]
    fn test_registry_lookup() {
        assert_eq!(supported_versions(), "1");
        assert!(client_for_version("1", &config(None), None).is_ok());

        let error = client_for_version("3", &config(None), None).unwrap_err();
        assert_eq!(
            error,
            ConfigError::UnsupportedApiVersion {
                version: "3".to_string(),
                supported: "1".to_string(),
            }
        );
    }

    #[test]
    fn test_connect_uses_configured_major() {
        assert!(connect(&config(Some(ApiVersion::V1_0)), None).is_ok());
        assert!(matches!(
            connect(&config(Some("2.0".parse().unwrap())), None),
            Err(ConfigError::UnsupportedApiVersion { .. })
        ));
    }
}
