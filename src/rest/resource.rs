//! The trait describing a REST resource type.
//!
//! A type implementing [`RestResource`] tells a
//! [`ResourceManager`](crate::rest::ResourceManager) where its collection
//! lives, which attributes may be sent on creation, and which fields the
//! server knows. The manager supplies the CRUD operations.
//!
//! # Implementing a Resource
//!
//! ```rust
//! use arsenal_client::rest::{Entity, Field, RestResource};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! pub struct Rack(Entity);
//!
//! impl RestResource for Rack {
//!     const NAME: &'static str = "Rack";
//!     const PLURAL: &'static str = "racks";
//!     const CREATION_ATTRIBUTES: &'static [&'static str] = &["description", "uuid"];
//!     const DETAILED_FIELDS: &'static [Field] = &[
//!         Field::new("uuid", "UUID"),
//!         Field::new("description", "Description"),
//!     ];
//!     const LIST_FIELDS: &'static [Field] = &[Field::new("uuid", "UUID")];
//!     const SORT_FIELDS: &'static [Field] = &[Field::new("uuid", "UUID")];
//!
//!     fn from_entity(entity: Entity) -> Self {
//!         Self(entity)
//!     }
//!
//!     fn entity(&self) -> &Entity {
//!         &self.0
//!     }
//! }
//! ```

use serde_json::Value;

use crate::rest::{Entity, Field, ResourceError};

/// A resource type served under `/v{major}/{PLURAL}`.
pub trait RestResource: Sized + Send + Sync {
    /// The singular resource name (e.g., "Resource").
    const NAME: &'static str;

    /// The collection path segment, also the key of list responses.
    const PLURAL: &'static str;

    /// Attributes accepted by `create`; anything else is rejected.
    const CREATION_ATTRIBUTES: &'static [&'static str];

    /// Every field the server can return.
    const DETAILED_FIELDS: &'static [Field];

    /// Fields shown by a plain listing.
    const LIST_FIELDS: &'static [Field];

    /// Fields the server can sort on.
    const SORT_FIELDS: &'static [Field];

    /// Wraps a decoded entity.
    fn from_entity(entity: Entity) -> Self;

    /// Returns the underlying entity.
    fn entity(&self) -> &Entity;

    /// Returns the stable identifier.
    fn id(&self) -> Option<&str> {
        self.entity().str_field("uuid")
    }

    /// Decodes a single-entity response body.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedResponse`] unless the body is a
    /// JSON object.
    fn from_value(value: Value) -> Result<Self, ResourceError> {
        Entity::from_value(value)
            .map(Self::from_entity)
            .ok_or_else(|| ResourceError::UnexpectedResponse {
                resource: Self::NAME,
                reason: "expected a JSON object".to_string(),
            })
    }
}
