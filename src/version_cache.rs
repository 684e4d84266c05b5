//! On-disk cache of negotiated API versions.
//!
//! When a client runs without an explicit API version, the version the
//! server announced last time is reused. Entries are keyed by the
//! endpoint's `host:port` and stored as a small JSON object:
//!
//! ```json
//! { "127.0.0.1:6385": "1.1" }
//! ```
//!
//! The cache is best effort. Read and write failures are logged and
//! otherwise ignored; they never fail a request.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ApiVersion;

const CACHE_DIR_NAME: &str = "arsenal-client";
const CACHE_FILE_NAME: &str = "api-versions.json";

/// File-backed store of negotiated API versions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionCache {
    path: PathBuf,
}

impl VersionCache {
    /// Creates a cache backed by the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the cache in the user's cache directory, if one exists.
    #[must_use]
    pub fn default_location() -> Option<Self> {
        dirs::cache_dir().map(|dir| Self::new(dir.join(CACHE_DIR_NAME).join(CACHE_FILE_NAME)))
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached version for `host:port`, if any.
    #[must_use]
    pub fn retrieve(&self, key: &str) -> Option<ApiVersion> {
        let raw = self.read_entries().remove(key)?;
        match raw.parse() {
            Ok(version) => Some(version),
            Err(e) => {
                tracing::warn!("Ignoring cached API version for {}: {}", key, e);
                None
            }
        }
    }

    /// Stores the version for `host:port`, replacing any previous entry.
    pub fn store(&self, key: &str, version: &str) {
        let mut entries = self.read_entries();
        if entries.get(key).is_some_and(|current| current == version) {
            return;
        }
        entries.insert(key.to_string(), version.to_string());

        if let Err(e) = self.write_entries(&entries) {
            tracing::warn!(
                "Failed to write API version cache {}: {}",
                self.path.display(),
                e
            );
        } else {
            tracing::debug!("Cached API version {} for {}", version, key);
        }
    }

    fn read_entries(&self) -> BTreeMap<String, String> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(
                    "Failed to read API version cache {}: {}",
                    self.path.display(),
                    e
                );
                return BTreeMap::new();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!(
                "Discarding corrupt API version cache {}: {}",
                self.path.display(),
                e
            );
            BTreeMap::new()
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)
    }
}
