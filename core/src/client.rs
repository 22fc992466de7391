//! Async CRUD operations for one resource.
//!
//! # Design
//! `CrudClient` pairs a `Resource` (request shaping) with a `Transport`
//! (execution). Every operation shapes one request, hands it to the transport
//! exactly once and decodes the response into the declared shape; nothing is
//! cached or retried, and no state survives between calls. Per-resource
//! customization is the optional error hook, which observes each failure
//! before it is returned unchanged.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::resource::Resource;
use crate::transport::{decode_response, Transport};
use crate::types::{JsonPatch, Page, Pagination};

/// Callback invoked with every failure a `CrudClient` returns.
pub type ErrorHook = Arc<dyn Fn(&ApiError) + Send + Sync>;

/// Typed CRUD client for a resource with identifier `I`, record `R` and
/// filter `F`, executing through transport `T`.
pub struct CrudClient<I, R, F, T> {
    resource: Resource<I, R, F>,
    transport: T,
    error_hook: Option<ErrorHook>,
}

impl<I, R, F, T> CrudClient<I, R, F, T> {
    pub fn new(resource_path: &str, transport: T) -> Self {
        Self {
            resource: Resource::new(resource_path),
            transport,
            error_hook: None,
        }
    }

    pub fn with_error_hook<H>(mut self, hook: H) -> Self
    where
        H: Fn(&ApiError) + Send + Sync + 'static,
    {
        self.error_hook = Some(Arc::new(hook));
        self
    }

    pub fn resource(&self) -> &Resource<I, R, F> {
        &self.resource
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<I, R, F, T> CrudClient<I, R, F, T>
where
    I: fmt::Display + DeserializeOwned,
    R: Serialize + DeserializeOwned,
    F: Serialize,
    T: Transport,
{
    async fn dispatch<V: DeserializeOwned>(&self, request: Result<HttpRequest, ApiError>) -> Result<V, ApiError> {
        let result = self.round_trip(request).await;
        if let (Err(err), Some(hook)) = (&result, &self.error_hook) {
            (**hook)(err);
        }
        result
    }

    async fn round_trip<V: DeserializeOwned>(&self, request: Result<HttpRequest, ApiError>) -> Result<V, ApiError> {
        let request = request?;
        tracing::debug!(method = request.method.as_str(), target = %request.target(), "dispatching request");
        let response = self.transport.execute(request).await?;
        decode_response(response)
    }

    pub async fn count(&self, filter: Option<&F>) -> Result<u64, ApiError> {
        self.dispatch(self.resource.build_count(filter)).await
    }

    pub async fn count_all(&self) -> Result<u64, ApiError> {
        self.dispatch(Ok(self.resource.build_count_all())).await
    }

    pub async fn get_by_id(&self, id: &I) -> Result<R, ApiError> {
        self.dispatch(Ok(self.resource.build_get_by_id(id))).await
    }

    pub async fn get_one(&self, filter: Option<&F>) -> Result<R, ApiError> {
        self.dispatch(self.resource.build_get_one(filter)).await
    }

    pub async fn get_many(&self, filter: Option<&F>) -> Result<Vec<R>, ApiError> {
        self.dispatch(self.resource.build_get_many(filter)).await
    }

    pub async fn get_page(&self, filter: Option<&F>, pagination: Option<&Pagination>) -> Result<Page<R>, ApiError> {
        self.dispatch(self.resource.build_get_page(filter, pagination)).await
    }

    pub async fn delete_by_id(&self, id: &I) -> Result<I, ApiError> {
        self.dispatch(Ok(self.resource.build_delete_by_id(id))).await
    }

    pub async fn delete(&self, filter: Option<&F>) -> Result<I, ApiError> {
        self.dispatch(self.resource.build_delete(filter)).await
    }

    pub async fn delete_many(&self, filter: Option<&F>) -> Result<Vec<I>, ApiError> {
        self.dispatch(self.resource.build_delete_many(filter)).await
    }

    pub async fn save(&self, record: &R) -> Result<R, ApiError> {
        self.dispatch(self.resource.build_save(record)).await
    }

    pub async fn save_many(&self, records: &[R]) -> Result<Vec<R>, ApiError> {
        self.dispatch(self.resource.build_save_many(records)).await
    }

    pub async fn update_by_id(&self, id: &I, record: &R) -> Result<R, ApiError> {
        self.dispatch(self.resource.build_update_by_id(id, record)).await
    }

    pub async fn update(&self, record: &R) -> Result<R, ApiError> {
        self.dispatch(self.resource.build_update(record)).await
    }

    pub async fn update_many(&self, records: &[R]) -> Result<Vec<R>, ApiError> {
        self.dispatch(self.resource.build_update_many(records)).await
    }

    pub async fn edit_by_id(&self, id: &I, patch: &JsonPatch) -> Result<R, ApiError> {
        self.dispatch(self.resource.build_edit_by_id(id, patch)).await
    }

    pub async fn edit(&self, patch: &JsonPatch, filter: Option<&F>) -> Result<R, ApiError> {
        self.dispatch(self.resource.build_edit(patch, filter)).await
    }

    pub async fn edit_many(&self, patch: &JsonPatch, filter: Option<&F>) -> Result<Vec<R>, ApiError> {
        self.dispatch(self.resource.build_edit_many(patch, filter)).await
    }
}

impl<I, R, F, T: Clone> Clone for CrudClient<I, R, F, T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
            transport: self.transport.clone(),
            error_hook: self.error_hook.clone(),
        }
    }
}

impl<I, R, F, T: fmt::Debug> fmt::Debug for CrudClient<I, R, F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrudClient")
            .field("resource", &self.resource)
            .field("transport", &self.transport)
            .field("error_hook", &self.error_hook.is_some())
            .finish()
    }
}
