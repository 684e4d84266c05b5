//! Read-only view over a decoded JSON entity.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// A decoded JSON object as returned by the API.
///
/// Entities are never mutated client-side. Field lookups distinguish a
/// field that is absent from one that is explicitly `null`:
///
/// ```rust
/// use arsenal_client::rest::Entity;
/// use serde_json::json;
///
/// let entity = Entity::from_value(json!({"uuid": "abc", "description": null})).unwrap();
/// assert_eq!(entity.field("description"), Some(&json!(null)));
/// assert_eq!(entity.field("type"), None);
/// assert_eq!(entity.field_or("type", &json!("")), &json!(""));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entity {
    info: Map<String, Value>,
}

impl Entity {
    /// Wraps a JSON object.
    #[must_use]
    pub const fn new(info: Map<String, Value>) -> Self {
        Self { info }
    }

    /// Wraps a JSON value, returning `None` unless it is an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(info) => Some(Self::new(info)),
            _ => None,
        }
    }

    /// Returns a field, or `None` when the payload does not contain it.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.info.get(name)
    }

    /// Returns a field, or `default` when the payload does not contain it.
    #[must_use]
    pub fn field_or<'a>(&'a self, name: &str, default: &'a Value) -> &'a Value {
        self.info.get(name).unwrap_or(default)
    }

    /// Returns a string field. Absent, `null` and non-string values give `None`.
    #[must_use]
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.info.get(name).and_then(Value::as_str)
    }

    /// Returns an object field. Absent, `null` and non-object values give `None`.
    #[must_use]
    pub fn object_field(&self, name: &str) -> Option<&Map<String, Value>> {
        self.info.get(name).and_then(Value::as_object)
    }

    /// Parses an RFC 3339 timestamp field.
    #[must_use]
    pub fn timestamp_field(&self, name: &str) -> Option<DateTime<Utc>> {
        self.str_field(name)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Returns the names of all fields present in the payload.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.info.keys().map(String::as_str)
    }

    /// Returns the underlying object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.info
    }

    /// Consumes the entity, returning the underlying object.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.info
    }
}

impl Serialize for Entity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.info.serialize(serializer)
    }
}
