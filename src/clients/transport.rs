//! The transport seam between resource managers and the network.

use serde_json::Value;

use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpMethod;
use crate::clients::http_response::HttpResponse;
use crate::rest::next_link_path;

/// Performs HTTP requests on behalf of a resource manager.
///
/// `path` is absolute and already carries its query string. Implementations
/// own authentication headers, timeouts and conflict retries; callers treat
/// every returned error as final.
///
/// [`HttpClient`](crate::clients::HttpClient) is the production
/// implementation. Tests substitute a recording fake.
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// Sends one logical request and returns the decoded response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for network failures and non-2xx responses.
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<HttpResponse, HttpError>;

    /// Converts a server-supplied pagination link into a path for
    /// [`request`](Transport::request).
    fn link_path(&self, link: &str) -> String {
        next_link_path(link)
    }
}
