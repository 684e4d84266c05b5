//! Arsenal API version definitions.
//!
//! This module provides the [`ApiVersion`] enum for selecting which version
//! of the Arsenal API a client speaks.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Arsenal API version.
///
/// Versions are `MAJOR.MINOR` pairs. The major version selects the URL
/// prefix (`/v1`) and the client implementation; the full version is sent to
/// the server in the version negotiation header. `Latest` asks the server to
/// use the newest version it supports.
///
/// # Example
///
/// ```rust
/// use arsenal_client::ApiVersion;
///
/// let version: ApiVersion = "1.1".parse().unwrap();
/// assert_eq!(version, ApiVersion::V1_1);
/// assert_eq!(version.major(), 1);
///
/// let future: ApiVersion = "1.7".parse().unwrap();
/// assert_eq!(future.to_string(), "1.7");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version 1.0
    V1_0,
    /// API version 1.1
    V1_1,
    /// The newest version the server supports.
    Latest,
    /// Any other `MAJOR.MINOR` version.
    Custom(String),
}

impl ApiVersion {
    /// Returns the version used when neither the user nor the cache picked one.
    #[must_use]
    pub const fn default_version() -> Self {
        Self::V1_1
    }

    /// Returns the major version number.
    ///
    /// `Latest` is resolved against the newest major version this crate has
    /// a client for.
    #[must_use]
    pub fn major(&self) -> u32 {
        match self {
            Self::V1_0 | Self::V1_1 | Self::Latest => 1,
            Self::Custom(s) => s
                .split('.')
                .next()
                .and_then(|major| major.parse().ok())
                .unwrap_or(1),
        }
    }

    /// Returns the URL prefix for this version (e.g. `/v1`).
    #[must_use]
    pub fn path_prefix(&self) -> String {
        format!("/v{}", self.major())
    }

    const fn ordinal(&self) -> u32 {
        match self {
            Self::V1_0 => 1,
            Self::V1_1 => 2,
            Self::Custom(_) => 50,
            Self::Latest => 100,
        }
    }

    fn numeric(s: &str) -> Option<(u32, u32)> {
        let (major, minor) = s.split_once('.')?;
        Some((major.parse().ok()?, minor.parse().ok()?))
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::default_version()
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (Self::Custom(a), Self::Custom(b)) => Self::numeric(a).cmp(&Self::numeric(b)),
            _ => self.ordinal().cmp(&other.ordinal()),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version_str = match self {
            Self::V1_0 => "1.0",
            Self::V1_1 => "1.1",
            Self::Latest => "latest",
            Self::Custom(s) => s,
        };
        f.write_str(version_str)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "1" | "1.0" => Ok(Self::V1_0),
            "1.1" => Ok(Self::V1_1),
            "latest" | "1.latest" => Ok(Self::Latest),
            _ => {
                if Self::numeric(&s).is_some() {
                    Ok(Self::Custom(s))
                } else {
                    Err(ConfigError::InvalidApiVersion { version: s })
                }
            }
        }
    }
}
