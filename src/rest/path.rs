//! Request path construction for REST resources.
//!
//! Paths are built relative to the endpoint and carry their query string:
//!
//! ```rust
//! use arsenal_client::ApiVersion;
//! use arsenal_client::rest::ResourcePath;
//!
//! let paths = ResourcePath::new(&ApiVersion::V1_1, "resources");
//!
//! assert_eq!(paths.list(false, &[]), "/v1/resources");
//! assert_eq!(paths.list(false, &["limit=1".to_string()]), "/v1/resources/?limit=1");
//! assert_eq!(paths.list(true, &[]), "/v1/resources/detail");
//! assert_eq!(paths.entity("abc", None), "/v1/resources/abc");
//! ```

use reqwest::Url;

use crate::config::ApiVersion;

/// Builds the paths of one resource collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourcePath {
    collection: String,
}

impl ResourcePath {
    /// Creates the path builder for `/v{major}/{plural}`.
    #[must_use]
    pub fn new(version: &ApiVersion, plural: &str) -> Self {
        Self {
            collection: format!("{}/{plural}", version.path_prefix()),
        }
    }

    /// Returns the bare collection path.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the list path.
    ///
    /// `detail` selects the `detail` sub-collection. A non-empty filter list
    /// is appended after `?`, joined by `&`.
    #[must_use]
    pub fn list(&self, detail: bool, filters: &[String]) -> String {
        let mut suffix = String::new();
        if detail {
            suffix.push_str("detail");
        }
        if !filters.is_empty() {
            suffix.push('?');
            suffix.push_str(&filters.join("&"));
        }

        if suffix.is_empty() {
            self.collection.clone()
        } else {
            format!("{}/{suffix}", self.collection)
        }
    }

    /// Returns the path of one entity, optionally restricted to `fields`.
    #[must_use]
    pub fn entity(&self, id: &str, fields: Option<&[String]>) -> String {
        let mut path = format!("{}/{}", self.collection, urlencoding::encode(id));
        if let Some(fields) = fields.filter(|f| !f.is_empty()) {
            path.push_str("?fields=");
            path.push_str(&fields.join(","));
        }
        path
    }
}

/// Converts a server-supplied `next` link into a request path.
///
/// Absolute links lose their scheme and host; path and query are kept
/// verbatim. Relative links are used as-is.
#[must_use]
pub fn next_link_path(link: &str) -> String {
    match Url::parse(link) {
        Ok(url) => match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_string(),
        },
        Err(_) if link.starts_with('/') => link.to_string(),
        Err(_) => format!("/{link}"),
    }
}
