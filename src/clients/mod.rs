//! HTTP transport layer for the Arsenal API.
//!
//! This module provides the transport that resource managers delegate to.
//! It handles request validation, conflict retries, error mapping and API
//! version negotiation.
//!
//! # Overview
//!
//! - [`ArsenalClient`]: Version selection and resource managers
//! - [`Transport`]: The seam the resource managers are generic over
//! - [`HttpClient`]: The reqwest-backed production transport
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A decoded response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PATCH, DELETE)
//! - [`HttpError`]: Typed transport failures
//!
//! # Example
//!
//! ```rust,ignore
//! use arsenal_client::clients::{HttpClient, HttpMethod, Transport};
//!
//! let response = client.request(HttpMethod::Get, "/v1/resources", None).await?;
//! println!("{}", response.body);
//! ```

mod arsenal;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use arsenal::{
    client_for_version, connect, supported_versions, ArsenalClient, ClientConstructor,
    SUPPORTED_VERSIONS,
};
pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, CLIENT_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, API_VERSION_HEADER};
pub use transport::Transport;
