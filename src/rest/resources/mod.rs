//! Concrete resource types.
//!
//! Each type implements [`RestResource`](crate::rest::RestResource) and is
//! managed through a [`ResourceManager`](crate::rest::ResourceManager):
//!
//! ```rust,ignore
//! use arsenal_client::rest::resources::{NewResource, Resource};
//!
//! let manager = client.resource();
//! let created: Resource = manager
//!     .create(NewResource::new().description("rack 12").into_attributes())
//!     .await?;
//! let fetched = manager.get(created.uuid().unwrap_or_default(), None).await?;
//! ```

mod resource;

pub use resource::{
    NewResource, Resource, DETAILED_RESOURCE_FIELDS, RESOURCE_LIST_FIELDS, RESOURCE_SORT_FIELDS,
};
