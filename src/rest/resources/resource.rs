//! The inventory `Resource` entity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::rest::{Entity, Field, RestResource};

/// Every field the server returns for a resource.
pub const DETAILED_RESOURCE_FIELDS: &[Field] = &[
    Field::new("uuid", "UUID"),
    Field::new("description", "Description"),
    Field::new("type", "Type"),
    Field::new("relations", "Relations"),
    Field::new("attributes", "Attributes"),
    Field::new("created_at", "Created At"),
    Field::new("updated_at", "Updated At"),
];

/// Fields shown by a plain `resource-list`.
pub const RESOURCE_LIST_FIELDS: &[Field] = &[
    Field::new("uuid", "UUID"),
    Field::new("type", "Type"),
    Field::new("description", "Description"),
];

/// Fields the server can sort resources on.
pub const RESOURCE_SORT_FIELDS: &[Field] = &[
    Field::new("uuid", "UUID"),
    Field::new("description", "Description"),
    Field::new("type", "Type"),
    Field::new("created_at", "Created At"),
    Field::new("updated_at", "Updated At"),
];

/// A datacenter inventory record.
///
/// Known fields have typed accessors. Anything else the server sends is
/// reachable through [`Resource::field`] and [`Resource::field_or`].
///
/// # Example
///
/// ```rust
/// use arsenal_client::rest::resources::Resource;
/// use arsenal_client::rest::RestResource;
/// use serde_json::json;
///
/// let resource = Resource::from_value(json!({
///     "uuid": "0b7d9d8f-2b1e-4c3f-8d3a-8c1c0b0f9a11",
///     "type": "switch",
///     "attributes": {"ports": 48},
/// }))
/// .unwrap();
///
/// assert_eq!(resource.resource_type(), Some("switch"));
/// assert_eq!(resource.attributes().unwrap()["ports"], json!(48));
/// assert_eq!(resource.description(), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Resource(Entity);

impl Resource {
    /// The stable identifier.
    #[must_use]
    pub fn uuid(&self) -> Option<&str> {
        self.0.str_field("uuid")
    }

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.0.str_field("description")
    }

    /// Resource type, e.g. `switch` or `rack`.
    #[must_use]
    pub fn resource_type(&self) -> Option<&str> {
        self.0.str_field("type")
    }

    /// Arbitrary key/value attributes.
    #[must_use]
    pub fn attributes(&self) -> Option<&Map<String, Value>> {
        self.0.object_field("attributes")
    }

    /// Links to related resources.
    #[must_use]
    pub fn relations(&self) -> Option<&Value> {
        self.0.field("relations").filter(|v| !v.is_null())
    }

    /// Creation time.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.0.timestamp_field("created_at")
    }

    /// Last update time; `None` if never updated.
    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.0.timestamp_field("updated_at")
    }

    /// Raw field lookup. `None` when the payload lacks the field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.field(name)
    }

    /// Raw field lookup with a default for absent fields.
    #[must_use]
    pub fn field_or<'a>(&'a self, name: &str, default: &'a Value) -> &'a Value {
        self.0.field_or(name, default)
    }
}

impl RestResource for Resource {
    const NAME: &'static str = "Resource";
    const PLURAL: &'static str = "resources";
    const CREATION_ATTRIBUTES: &'static [&'static str] =
        &["description", "type", "attributes", "uuid"];
    const DETAILED_FIELDS: &'static [Field] = DETAILED_RESOURCE_FIELDS;
    const LIST_FIELDS: &'static [Field] = RESOURCE_LIST_FIELDS;
    const SORT_FIELDS: &'static [Field] = RESOURCE_SORT_FIELDS;

    fn from_entity(entity: Entity) -> Self {
        Self(entity)
    }

    fn entity(&self) -> &Entity {
        &self.0
    }
}

/// Attributes for creating a resource.
///
/// ```rust
/// use arsenal_client::rest::resources::NewResource;
/// use serde_json::json;
///
/// let attrs = NewResource::new()
///     .description("top of rack")
///     .resource_type("switch")
///     .attribute("ports", json!(48))
///     .into_attributes();
///
/// assert_eq!(
///     serde_json::Value::Object(attrs),
///     json!({"description": "top of rack", "type": "switch", "attributes": {"ports": 48}})
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewResource {
    description: Option<String>,
    resource_type: Option<String>,
    attributes: Option<Map<String, Value>>,
    uuid: Option<String>,
}

impl NewResource {
    /// Creates an empty set of creation attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the resource type.
    #[must_use]
    pub fn resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    /// Adds one attribute. Later values for the same key win.
    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    /// Sets a client-chosen UUID.
    #[must_use]
    pub fn uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }

    /// Returns the request body for `create`. Unset attributes are omitted.
    #[must_use]
    pub fn into_attributes(self) -> Map<String, Value> {
        let mut body = Map::new();
        if let Some(description) = self.description {
            body.insert("description".to_string(), Value::String(description));
        }
        if let Some(resource_type) = self.resource_type {
            body.insert("type".to_string(), Value::String(resource_type));
        }
        if let Some(attributes) = self.attributes {
            body.insert("attributes".to_string(), Value::Object(attributes));
        }
        if let Some(uuid) = self.uuid {
            body.insert("uuid".to_string(), Value::String(uuid));
        }
        body
    }
}
