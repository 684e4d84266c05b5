//! # Arsenal API Client
//!
//! A Rust client for the Arsenal datacenter inventory API, plus the
//! `arsenal` command-line shell built on it.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ArsenalConfig`] and [`ArsenalConfigBuilder`]
//! - API version selection with an on-disk cache of negotiated versions
//! - An async HTTP transport that retries on HTTP 409 Conflict
//! - Typed CRUD over REST collections with cursor pagination via
//!   [`rest::ResourceManager`]
//! - Query filter and JSON Patch construction
//!
//! ## Quick Start
//!
//! ```rust
//! use arsenal_client::{ArsenalConfig, ApiVersion, Endpoint};
//!
//! let config = ArsenalConfig::builder()
//!     .endpoint(Endpoint::new("http://127.0.0.1:6385").unwrap())
//!     .api_version(ApiVersion::V1_1)
//!     .max_retries(3)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.endpoint().cache_key(), "127.0.0.1:6385");
//! ```
//!
//! ## Managing Resources
//!
//! ```rust,ignore
//! use arsenal_client::{connect, ArsenalConfig, Endpoint, VersionCache};
//! use arsenal_client::rest::{build_patch, ListParams, PatchOp, SortDir};
//! use arsenal_client::rest::resources::NewResource;
//!
//! let client = connect(&config, VersionCache::default_location())?;
//! let resources = client.resource();
//!
//! // Create
//! let created = resources
//!     .create(NewResource::new().description("rack 12").resource_type("rack").into_attributes())
//!     .await?;
//!
//! // List everything, newest first
//! let all = resources
//!     .list(&ListParams {
//!         limit: Some(0),
//!         sort_key: Some("created_at".into()),
//!         sort_dir: Some(SortDir::Desc),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! // Patch and delete
//! let id = created.uuid().unwrap_or_default();
//! resources.update(id, &build_patch(PatchOp::Add, &["attributes/slots=42"])?).await?;
//! resources.delete(id).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Invalid arguments are rejected before any request
//! - **Thread-safe**: All public client types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;
pub mod shell;
pub mod version_cache;

// Re-export public types at crate root for convenience
pub use config::{ApiVersion, ArsenalConfig, ArsenalConfigBuilder, Endpoint, VersionSelection};
pub use error::ConfigError;
pub use version_cache::VersionCache;

// Re-export client types
pub use clients::{
    client_for_version, connect, ArsenalClient, HttpClient, HttpError, HttpMethod, HttpRequest,
    HttpRequestBuilder, HttpResponse, HttpResponseError, InvalidHttpRequestError, Transport,
};

// Re-export resource types
pub use rest::resources::{NewResource, Resource};
pub use rest::{ListParams, PatchOp, PatchOperation, ResourceError, ResourceManager, SortDir};
