//! Typed CRUD operations over one resource collection.
//!
//! A [`ResourceManager`] turns `list`, `get`, `create`, `update` and
//! `delete` calls into requests on a [`Transport`], validating arguments
//! before anything is sent.
//!
//! # Pagination
//!
//! [`ResourceManager::list`] has three modes, keyed off
//! [`ListParams::limit`]:
//!
//! - `None`: one request; the server decides the page size
//! - `Some(0)`: follow every `next` link and return all pages, in order
//! - `Some(n)`: one request with `limit=n`; the caller pages manually with
//!   [`ListParams::marker`]
//!
//! # Example
//!
//! ```rust,ignore
//! use arsenal_client::rest::{ListParams, SortDir};
//!
//! let manager = client.resource();
//! let everything = manager
//!     .list(&ListParams {
//!         limit: Some(0),
//!         sort_key: Some("created_at".to_string()),
//!         sort_dir: Some(SortDir::Desc),
//!         ..Default::default()
//!     })
//!     .await?;
//! ```

use std::collections::HashSet;
use std::marker::PhantomData;

use serde_json::{Map, Value};

use crate::clients::{HttpMethod, Transport};
use crate::config::ApiVersion;
use crate::rest::fields::invalid_fields;
use crate::rest::{
    build_filters, field_names, Page, PatchOperation, ResourceError, ResourcePath, RestResource,
    SortDir,
};

/// Parameters for [`ResourceManager::list`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Identifier of the last entity of the previous page.
    pub marker: Option<String>,
    /// Page size. `Some(0)` fetches every page.
    pub limit: Option<u32>,
    /// Field to sort on.
    pub sort_key: Option<String>,
    /// Sort direction.
    pub sort_dir: Option<SortDir>,
    /// Request the detailed representation.
    pub detail: bool,
    /// Restrict entities to these fields. Excludes `detail`.
    pub fields: Option<Vec<String>>,
}

impl ListParams {
    /// Returns the query filters for these parameters.
    #[must_use]
    pub fn filters(&self) -> Vec<String> {
        build_filters(
            self.marker.as_deref(),
            self.limit,
            self.sort_key.as_deref(),
            self.sort_dir,
            self.fields.as_deref(),
        )
    }

    fn has_fields(&self) -> bool {
        self.fields.as_ref().is_some_and(|f| !f.is_empty())
    }
}

/// CRUD operations for resources of type `R` over transport `T`.
///
/// The manager never retries: conflict retries belong to the transport, and
/// every transport error is returned unchanged.
#[derive(Debug)]
pub struct ResourceManager<'a, R, T> {
    transport: &'a T,
    paths: ResourcePath,
    _resource: PhantomData<fn() -> R>,
}

impl<'a, R: RestResource, T: Transport> ResourceManager<'a, R, T> {
    /// Creates a manager for `R`'s collection under `version`.
    #[must_use]
    pub fn new(transport: &'a T, version: &ApiVersion) -> Self {
        Self {
            transport,
            paths: ResourcePath::new(version, R::PLURAL),
            _resource: PhantomData,
        }
    }

    /// Returns the path builder of this manager's collection.
    #[must_use]
    pub const fn paths(&self) -> &ResourcePath {
        &self.paths
    }

    /// Lists entities.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidAttribute`] if both `detail` and
    /// `fields` are set, or a requested field is unknown. Transport errors
    /// are passed through. When a follow-up page fails, the pages already
    /// fetched are discarded.
    pub async fn list(&self, params: &ListParams) -> Result<Vec<R>, ResourceError> {
        if params.detail && params.has_fields() {
            return Err(ResourceError::invalid_attribute(
                "Can't fetch a subset of fields with 'detail' set",
            ));
        }
        if let Some(fields) = &params.fields {
            Self::check_fields(fields)?;
        }

        let path = self.paths.list(params.detail, &params.filters());

        if params.limit == Some(0) {
            return self.list_all(path).await;
        }

        let page = self.fetch_page(&path).await?;
        Ok(page.into_inner())
    }

    /// Fetches one entity.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidAttribute`] for an empty id or an
    /// unknown field, and [`HttpError::NotFound`](crate::clients::HttpError::NotFound)
    /// (wrapped in [`ResourceError::Http`]) when the entity does not exist.
    pub async fn get(&self, id: &str, fields: Option<&[String]>) -> Result<R, ResourceError> {
        Self::check_id(id)?;
        if let Some(fields) = fields {
            Self::check_fields(fields)?;
        }

        let path = self.paths.entity(id, fields);
        tracing::debug!("Fetching {} {}", R::NAME, id);
        let response = self.transport.request(HttpMethod::Get, &path, None).await?;
        R::from_value(response.body)
    }

    /// Creates an entity from `attributes`.
    ///
    /// Only the keys in `R::CREATION_ATTRIBUTES` are accepted. The server
    /// assigns a `uuid` when none is given.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidAttribute`] for a key outside the
    /// allow-list; nothing is sent in that case.
    pub async fn create(&self, attributes: Map<String, Value>) -> Result<R, ResourceError> {
        if let Some(key) = attributes
            .keys()
            .find(|key| !R::CREATION_ATTRIBUTES.contains(&key.as_str()))
        {
            return Err(ResourceError::invalid_attribute(format!(
                "Key must be in {}, not '{key}'",
                R::CREATION_ATTRIBUTES.join(",")
            )));
        }

        tracing::debug!("Creating {} with {} attribute(s)", R::NAME, attributes.len());
        let response = self
            .transport
            .request(
                HttpMethod::Post,
                self.paths.collection(),
                Some(Value::Object(attributes)),
            )
            .await?;
        R::from_value(response.body)
    }

    /// Applies a JSON Patch to an entity and returns the server's result.
    ///
    /// The patch is sent as-is; it is never applied locally.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidAttribute`] for an empty id, an empty
    /// patch, or an operation whose path does not start with `/`.
    pub async fn update(&self, id: &str, patch: &[PatchOperation]) -> Result<R, ResourceError> {
        Self::check_id(id)?;
        if patch.is_empty() {
            return Err(ResourceError::invalid_attribute(
                "A patch needs at least one operation",
            ));
        }
        if let Some(op) = patch.iter().find(|op| !op.path().starts_with('/')) {
            return Err(ResourceError::invalid_attribute(format!(
                "Patch path must start with '/': \"{}\"",
                op.path()
            )));
        }

        let body = serde_json::to_value(patch)
            .map_err(|e| ResourceError::invalid_attribute(e.to_string()))?;

        tracing::debug!("Updating {} {} with {} operation(s)", R::NAME, id, patch.len());
        let response = self
            .transport
            .request(HttpMethod::Patch, &self.paths.entity(id, None), Some(body))
            .await?;
        R::from_value(response.body)
    }

    /// Deletes an entity.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidAttribute`] for an empty id. Transport
    /// errors are passed through.
    pub async fn delete(&self, id: &str) -> Result<(), ResourceError> {
        Self::check_id(id)?;

        tracing::debug!("Deleting {} {}", R::NAME, id);
        self.transport
            .request(HttpMethod::Delete, &self.paths.entity(id, None), None)
            .await?;
        Ok(())
    }

    async fn fetch_page(&self, path: &str) -> Result<Page<R>, ResourceError> {
        tracing::debug!("Listing {} at {}", R::PLURAL, path);
        let response = self.transport.request(HttpMethod::Get, path, None).await?;
        Page::from_body(response.body)
    }

    async fn list_all(&self, mut path: String) -> Result<Vec<R>, ResourceError> {
        let mut entities = Vec::new();
        let mut visited = HashSet::new();
        loop {
            let page = self.fetch_page(&path).await?;
            let next = page.next().map(|link| self.transport.link_path(link));
            entities.extend(page);
            visited.insert(path);

            match next {
                Some(next) if visited.contains(&next) => {
                    return Err(ResourceError::UnexpectedResponse {
                        resource: R::NAME,
                        reason: format!("pagination revisited {next}"),
                    });
                }
                Some(next) => path = next,
                None => return Ok(entities),
            }
        }
    }

    fn check_id(id: &str) -> Result<(), ResourceError> {
        if id.trim().is_empty() {
            return Err(ResourceError::invalid_attribute(format!(
                "{} id must not be empty",
                R::NAME
            )));
        }
        Ok(())
    }

    fn check_fields(fields: &[String]) -> Result<(), ResourceError> {
        let invalid = invalid_fields(fields, R::DETAILED_FIELDS);
        if invalid.is_empty() {
            return Ok(());
        }
        Err(ResourceError::invalid_attribute(format!(
            "Invalid field(s) requested: {}. Valid fields are: {}.",
            invalid.join(", "),
            field_names(R::DETAILED_FIELDS).join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpError, HttpResponse};
    use crate::rest::resources::Resource;
    use crate::rest::{build_patch, PatchOp};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    type Recorded = (HttpMethod, String, Option<Value>);

    /// Serves canned bodies keyed by method and path, recording each call.
    #[derive(Default)]
    struct FakeTransport {
        responses: HashMap<(HttpMethod, String), Result<Value, u16>>,
        calls: Mutex<Vec<Recorded>>,
    }

    impl FakeTransport {
        fn respond(mut self, method: HttpMethod, path: &str, body: Value) -> Self {
            self.responses.insert((method, path.to_string()), Ok(body));
            self
        }

        fn fail(mut self, method: HttpMethod, path: &str, code: u16) -> Self {
            self.responses.insert((method, path.to_string()), Err(code));
            self
        }

        fn calls(&self) -> Vec<Recorded> {
            self.calls.lock().unwrap().clone()
        }

        fn paths(&self) -> Vec<String> {
            self.calls().into_iter().map(|(_, path, _)| path).collect()
        }
    }

    impl Transport for FakeTransport {
        async fn request(
            &self,
            method: HttpMethod,
            path: &str,
            body: Option<Value>,
        ) -> Result<HttpResponse, HttpError> {
            self.calls
                .lock()
                .unwrap()
                .push((method, path.to_string(), body));
            match self.responses.get(&(method, path.to_string())) {
                Some(Ok(body)) => Ok(HttpResponse::new(200, HashMap::new(), body.clone())),
                Some(Err(code)) => Err(HttpError::from_status(*code, "failed".to_string(), None)),
                None => Err(HttpError::from_status(404, format!("no route {path}"), None)),
            }
        }
    }

    fn manager(transport: &FakeTransport) -> ResourceManager<'_, Resource, FakeTransport> {
        ResourceManager::new(transport, &ApiVersion::V1_1)
    }

    fn uuids(resources: &[Resource]) -> Vec<&str> {
        resources.iter().filter_map(Resource::uuid).collect()
    }

    #[tokio::test]
    async fn test_list_without_limit_is_one_request() {
        let transport = FakeTransport::default().respond(
            HttpMethod::Get,
            "/v1/resources",
            json!({"resources": [{"uuid": "a"}], "next": "http://127.0.0.1:6385/v1/resources/?marker=a"}),
        );

        let resources = manager(&transport).list(&ListParams::default()).await.unwrap();

        assert_eq!(uuids(&resources), vec!["a"]);
        assert_eq!(transport.paths(), vec!["/v1/resources"]);
    }

    #[tokio::test]
    async fn test_list_limit_zero_follows_next_links() {
        let transport = FakeTransport::default()
            .respond(
                HttpMethod::Get,
                "/v1/resources",
                json!({"resources": [{"uuid": "a"}], "next": "http://127.0.0.1:6385/v1/resources/?limit=1"}),
            )
            .respond(
                HttpMethod::Get,
                "/v1/resources/?limit=1",
                json!({"resources": [{"uuid": "b"}]}),
            );

        let params = ListParams {
            limit: Some(0),
            ..Default::default()
        };
        let resources = manager(&transport).list(&params).await.unwrap();

        assert_eq!(uuids(&resources), vec!["a", "b"]);
        assert_eq!(
            transport.paths(),
            vec!["/v1/resources", "/v1/resources/?limit=1"]
        );
    }

    #[tokio::test]
    async fn test_list_positive_limit_ignores_next() {
        let transport = FakeTransport::default().respond(
            HttpMethod::Get,
            "/v1/resources/?limit=1",
            json!({"resources": [{"uuid": "a"}], "next": "http://127.0.0.1:6385/v1/resources/?limit=1&marker=a"}),
        );

        let params = ListParams {
            limit: Some(1),
            ..Default::default()
        };
        let resources = manager(&transport).list(&params).await.unwrap();

        assert_eq!(uuids(&resources), vec!["a"]);
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_list_with_marker_is_one_request() {
        let transport = FakeTransport::default().respond(
            HttpMethod::Get,
            "/v1/resources/?marker=a",
            json!({"resources": [{"uuid": "b"}], "next": "http://127.0.0.1:6385/v1/resources/?marker=b"}),
        );

        let params = ListParams {
            marker: Some("a".to_string()),
            ..Default::default()
        };
        let resources = manager(&transport).list(&params).await.unwrap();

        assert_eq!(uuids(&resources), vec!["b"]);
        assert_eq!(transport.paths(), vec!["/v1/resources/?marker=a"]);
    }

    #[tokio::test]
    async fn test_list_detail_and_fields_fails_before_request() {
        let transport = FakeTransport::default();
        let params = ListParams {
            detail: true,
            fields: Some(vec!["uuid".to_string()]),
            ..Default::default()
        };

        let result = manager(&transport).list(&params).await;

        assert!(matches!(result, Err(ResourceError::InvalidAttribute { .. })));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_list_unknown_field_fails_before_request() {
        let transport = FakeTransport::default();
        let params = ListParams {
            fields: Some(vec!["uuid".to_string(), "colour".to_string()]),
            ..Default::default()
        };

        let error = manager(&transport).list(&params).await.unwrap_err();

        assert!(error.to_string().starts_with("Invalid field(s) requested: colour."));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_list_sorted_detail_path() {
        let transport = FakeTransport::default().respond(
            HttpMethod::Get,
            "/v1/resources/detail?sort_key=created_at&sort_dir=desc",
            json!({"resources": []}),
        );
        let params = ListParams {
            detail: true,
            sort_key: Some("created_at".to_string()),
            sort_dir: Some(SortDir::Desc),
            ..Default::default()
        };

        let resources = manager(&transport).list(&params).await.unwrap();
        assert!(resources.is_empty());
    }

    #[tokio::test]
    async fn test_list_failing_second_page_discards_first() {
        let transport = FakeTransport::default()
            .respond(
                HttpMethod::Get,
                "/v1/resources",
                json!({"resources": [{"uuid": "a"}], "next": "/v1/resources/?marker=a"}),
            )
            .fail(HttpMethod::Get, "/v1/resources/?marker=a", 500);

        let params = ListParams {
            limit: Some(0),
            ..Default::default()
        };
        let result = manager(&transport).list(&params).await;

        assert!(matches!(result, Err(ResourceError::Http(HttpError::Response(_)))));
        assert_eq!(transport.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_list_stalled_pagination_is_an_error() {
        let transport = FakeTransport::default().respond(
            HttpMethod::Get,
            "/v1/resources",
            json!({"resources": [{"uuid": "a"}], "next": "http://127.0.0.1:6385/v1/resources"}),
        );
        let params = ListParams {
            limit: Some(0),
            ..Default::default()
        };

        let result = manager(&transport).list(&params).await;
        assert!(matches!(result, Err(ResourceError::UnexpectedResponse { .. })));
    }

    #[tokio::test]
    async fn test_list_cyclic_pagination_is_an_error() {
        let transport = FakeTransport::default()
            .respond(
                HttpMethod::Get,
                "/v1/resources",
                json!({"resources": [{"uuid": "a"}], "next": "http://127.0.0.1:6385/v1/resources/?marker=a"}),
            )
            .respond(
                HttpMethod::Get,
                "/v1/resources/?marker=a",
                json!({"resources": [{"uuid": "b"}], "next": "http://127.0.0.1:6385/v1/resources/?marker=b"}),
            )
            .respond(
                HttpMethod::Get,
                "/v1/resources/?marker=b",
                json!({"resources": [{"uuid": "c"}], "next": "http://127.0.0.1:6385/v1/resources/?marker=a"}),
            );
        let params = ListParams {
            limit: Some(0),
            ..Default::default()
        };

        let result = manager(&transport).list(&params).await;

        assert!(matches!(result, Err(ResourceError::UnexpectedResponse { .. })));
        assert_eq!(
            transport.paths(),
            vec!["/v1/resources", "/v1/resources/?marker=a", "/v1/resources/?marker=b"]
        );
    }

    #[tokio::test]
    async fn test_get_with_fields() {
        let transport = FakeTransport::default().respond(
            HttpMethod::Get,
            "/v1/resources/abc?fields=uuid,description",
            json!({"uuid": "abc", "description": "rack"}),
        );
        let fields = vec!["uuid".to_string(), "description".to_string()];

        let resource = manager(&transport)
            .get("abc", Some(fields.as_slice()))
            .await
            .unwrap();

        assert_eq!(resource.description(), Some("rack"));
    }

    #[tokio::test]
    async fn test_get_twice_returns_equal_entities() {
        let transport = FakeTransport::default().respond(
            HttpMethod::Get,
            "/v1/resources/abc",
            json!({"uuid": "abc", "attributes": {"slots": 4}}),
        );
        let m = manager(&transport);

        assert_eq!(m.get("abc", None).await.unwrap(), m.get("abc", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_not_found_passes_through() {
        let transport = FakeTransport::default().fail(HttpMethod::Get, "/v1/resources/gone", 404);
        let error = manager(&transport).get("gone", None).await.unwrap_err();
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected() {
        let transport = FakeTransport::default();
        let m = manager(&transport);

        assert!(matches!(m.get("", None).await, Err(ResourceError::InvalidAttribute { .. })));
        assert!(matches!(m.delete(" ").await, Err(ResourceError::InvalidAttribute { .. })));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_posts_allowed_attributes() {
        let transport = FakeTransport::default().respond(
            HttpMethod::Post,
            "/v1/resources",
            json!({"uuid": "new", "description": "d"}),
        );
        let mut attributes = Map::new();
        attributes.insert("description".to_string(), json!("d"));

        let resource = manager(&transport).create(attributes).await.unwrap();

        assert_eq!(resource.uuid(), Some("new"));
        assert_eq!(transport.calls()[0].2, Some(json!({"description": "d"})));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_attribute() {
        let transport = FakeTransport::default();
        let mut attributes = Map::new();
        attributes.insert("created_at".to_string(), json!("now"));

        let error = manager(&transport).create(attributes).await.unwrap_err();

        assert_eq!(
            error.to_string(),
            "Key must be in description,type,attributes,uuid, not 'created_at'"
        );
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_sends_patch_unmodified() {
        let transport = FakeTransport::default().respond(
            HttpMethod::Patch,
            "/v1/resources/abc",
            json!({"uuid": "abc", "description": "server says"}),
        );
        let patch = build_patch(PatchOp::Replace, &["/description=x"]).unwrap();

        let resource = manager(&transport).update("abc", &patch).await.unwrap();

        assert_eq!(resource.description(), Some("server says"));
        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].2,
            Some(json!([{"op": "replace", "path": "/description", "value": "x"}]))
        );
    }

    #[tokio::test]
    async fn test_update_rejects_bad_patches() {
        let transport = FakeTransport::default();
        let m = manager(&transport);

        assert!(matches!(m.update("abc", &[]).await, Err(ResourceError::InvalidAttribute { .. })));
        let relative = [PatchOperation::Remove {
            path: "description".to_string(),
        }];
        assert!(matches!(
            m.update("abc", &relative).await,
            Err(ResourceError::InvalidAttribute { .. })
        ));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_conflict_is_terminal() {
        let transport = FakeTransport::default().fail(HttpMethod::Patch, "/v1/resources/abc", 409);
        let patch = build_patch(PatchOp::Remove, &["/description"]).unwrap();

        let result = manager(&transport).update("abc", &patch).await;

        assert!(matches!(result, Err(ResourceError::Http(HttpError::Conflict(_)))));
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_issues_one_request() {
        let transport =
            FakeTransport::default().respond(HttpMethod::Delete, "/v1/resources/abc", Value::Null);

        manager(&transport).delete("abc").await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, HttpMethod::Delete);
        assert_eq!(calls[0].2, None);
    }
}
