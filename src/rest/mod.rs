//! REST resource infrastructure for the Arsenal API.
//!
//! This module provides:
//!
//! - **[`ResourceManager`]**: typed `list`/`get`/`create`/`update`/`delete`
//!   over any [`Transport`](crate::clients::Transport)
//! - **[`RestResource`] trait**: what a resource type declares about itself
//! - **[`Entity`]**: read-only view over a decoded JSON object
//! - **[`build_filters`]**: ordered query filters for list requests
//! - **[`build_patch`]**: JSON Patch documents from `path=value` edits
//! - **[`Page<T>`]**: one decoded list response with its `next` link
//! - **[`ResourceError`]**: client-side validation errors plus transport errors
//!
//! # Example
//!
//! ```rust,ignore
//! use arsenal_client::rest::{build_patch, ListParams, PatchOp};
//!
//! let manager = client.resource();
//!
//! // Every resource, following the server's `next` links
//! let all = manager.list(&ListParams { limit: Some(0), ..Default::default() }).await?;
//!
//! // Replace one description
//! let patch = build_patch(PatchOp::Replace, &["description=spare"])?;
//! let updated = manager.update("0b7d9d8f-2b1e-4c3f-8d3a-8c1c0b0f9a11", &patch).await?;
//! ```

mod entity;
mod errors;
mod fields;
mod filter;
mod manager;
mod page;
mod patch;
mod path;
mod resource;

pub mod resources;

// Public exports
pub use entity::Entity;
pub use errors::ResourceError;
pub use fields::{field_names, invalid_fields, label_for, resolve_field, Field};
pub use filter::{build_filters, SortDir};
pub use manager::{ListParams, ResourceManager};
pub use page::Page;
pub use patch::{build_patch, PatchOp, PatchOperation};
pub use path::{next_link_path, ResourcePath};
pub use resource::RestResource;
