//! Query-string construction for list requests.
//!
//! [`build_filters`] turns the list parameters into `key=value` strings in a
//! fixed order (marker, limit, sort_key, sort_dir, fields). Callers join
//! them with `&`; the fixed order makes the resulting query string
//! byte-for-byte reproducible.

use std::fmt;
use std::str::FromStr;

/// Sort direction for list requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDir {
    /// Ascending (the server default).
    Asc,
    /// Descending.
    Desc,
}

impl SortDir {
    /// All accepted values, as spelled on the wire.
    pub const CHOICES: &'static [&'static str] = &["asc", "desc"];

    /// Returns the wire spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDir {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!(
                "Invalid sort direction '{other}'. Valid values are: {}",
                Self::CHOICES.join(", ")
            )),
        }
    }
}

/// Builds the list filters.
///
/// A parameter is emitted only when it has a value. `limit` is emitted only
/// when positive, since zero means "no client limit". `fields` becomes one
/// comma-joined parameter.
///
/// # Example
///
/// ```rust
/// use arsenal_client::rest::{build_filters, SortDir};
///
/// let fields = vec!["uuid".to_string(), "type".to_string()];
/// let filters = build_filters(Some("abc"), Some(10), None, Some(SortDir::Desc), Some(fields.as_slice()));
///
/// assert_eq!(filters, vec!["marker=abc", "limit=10", "sort_dir=desc", "fields=uuid,type"]);
/// ```
#[must_use]
pub fn build_filters(
    marker: Option<&str>,
    limit: Option<u32>,
    sort_key: Option<&str>,
    sort_dir: Option<SortDir>,
    fields: Option<&[String]>,
) -> Vec<String> {
    let mut filters = Vec::new();

    if let Some(marker) = marker.filter(|m| !m.is_empty()) {
        filters.push(format!("marker={marker}"));
    }
    if let Some(limit) = limit.filter(|l| *l > 0) {
        filters.push(format!("limit={limit}"));
    }
    if let Some(sort_key) = sort_key.filter(|k| !k.is_empty()) {
        filters.push(format!("sort_key={sort_key}"));
    }
    if let Some(sort_dir) = sort_dir {
        filters.push(format!("sort_dir={sort_dir}"));
    }
    if let Some(fields) = fields.filter(|f| !f.is_empty()) {
        filters.push(format!("fields={}", fields.join(",")));
    }

    filters
}
