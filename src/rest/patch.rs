//! JSON Patch documents built from command-line style edits.
//!
//! [`build_patch`] converts an operation plus `path=value` entries into
//! [`PatchOperation`]s:
//!
//! ```rust
//! use arsenal_client::rest::{build_patch, PatchOp, PatchOperation};
//! use serde_json::json;
//!
//! let patch = build_patch(PatchOp::Add, &["description=rack 12", "attributes/slots=42"]).unwrap();
//! assert_eq!(
//!     serde_json::to_value(&patch).unwrap(),
//!     json!([
//!         {"op": "add", "path": "/description", "value": "rack 12"},
//!         {"op": "add", "path": "/attributes/slots", "value": 42},
//!     ])
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rest::ResourceError;

/// The kind of a patch operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatchOp {
    /// Add a member or array element.
    Add,
    /// Replace an existing value.
    Replace,
    /// Remove a value.
    Remove,
}

impl PatchOp {
    /// All accepted operation names.
    pub const CHOICES: &'static [&'static str] = &["add", "replace", "remove"];

    /// Returns the wire spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Replace => "replace",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Display for PatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatchOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "replace" => Ok(Self::Replace),
            "remove" => Ok(Self::Remove),
            other => Err(format!("Unknown PATCH operation: {other}")),
        }
    }
}

/// One JSON Patch operation.
///
/// `remove` never carries a value and `add`/`replace` always do; the enum
/// makes any other shape unrepresentable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase", deny_unknown_fields)]
pub enum PatchOperation {
    /// `{"op": "add", "path": ..., "value": ...}`
    Add {
        /// JSON Pointer to the target location.
        path: String,
        /// The value to add.
        value: Value,
    },
    /// `{"op": "replace", "path": ..., "value": ...}`
    Replace {
        /// JSON Pointer to the target location.
        path: String,
        /// The new value.
        value: Value,
    },
    /// `{"op": "remove", "path": ...}`
    Remove {
        /// JSON Pointer to the target location.
        path: String,
    },
}

impl PatchOperation {
    /// Returns the operation kind.
    #[must_use]
    pub const fn op(&self) -> PatchOp {
        match self {
            Self::Add { .. } => PatchOp::Add,
            Self::Replace { .. } => PatchOp::Replace,
            Self::Remove { .. } => PatchOp::Remove,
        }
    }

    /// Returns the target path.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Add { path, .. } | Self::Replace { path, .. } | Self::Remove { path } => path,
        }
    }

    /// Returns the value, absent for `remove`.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Add { value, .. } | Self::Replace { value, .. } => Some(value),
            Self::Remove { .. } => None,
        }
    }
}

/// Builds a patch document from `path=value` entries.
///
/// Paths without a leading `/` get one. For `add` and `replace`, the entry
/// is split at its first `=`; the value is decoded as JSON when it parses,
/// otherwise it is kept as a string. `remove` takes bare paths. Output order
/// follows input order.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidAttribute`] when an `add`/`replace` entry
/// has no `=` or an empty path, or when a `remove` entry carries a value.
pub fn build_patch<S: AsRef<str>>(
    op: PatchOp,
    entries: &[S],
) -> Result<Vec<PatchOperation>, ResourceError> {
    entries
        .iter()
        .map(|entry| build_operation(op, entry.as_ref()))
        .collect()
}

fn build_operation(op: PatchOp, entry: &str) -> Result<PatchOperation, ResourceError> {
    let entry = if entry.starts_with('/') {
        entry.to_string()
    } else {
        format!("/{entry}")
    };

    match op {
        PatchOp::Add | PatchOp::Replace => {
            let (path, raw_value) = entry.split_once('=').ok_or_else(|| {
                ResourceError::invalid_attribute(format!(
                    "Attributes must be a list of PATH=VALUE not \"{}\"",
                    entry.trim_start_matches('/')
                ))
            })?;
            let path = validated_path(path, &entry)?;
            let value = decode_value(raw_value);

            Ok(if op == PatchOp::Add {
                PatchOperation::Add { path, value }
            } else {
                PatchOperation::Replace { path, value }
            })
        }
        PatchOp::Remove => {
            if entry.contains('=') {
                return Err(ResourceError::invalid_attribute(format!(
                    "A 'remove' operation takes only a PATH, not \"{}\"",
                    entry.trim_start_matches('/')
                )));
            }
            let path = validated_path(&entry, &entry)?;
            Ok(PatchOperation::Remove { path })
        }
    }
}

fn validated_path(path: &str, entry: &str) -> Result<String, ResourceError> {
    if path.trim_start_matches('/').is_empty() {
        return Err(ResourceError::invalid_attribute(format!(
            "Missing attribute path in \"{entry}\""
        )));
    }
    Ok(path.to_string())
}

fn decode_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
