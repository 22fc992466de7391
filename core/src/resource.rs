//! Stateless request shaping for one REST resource.
//!
//! # Design
//! `Resource` holds only the resource path and carries no mutable state
//! between calls. Each CRUD operation has a `build_*` method that produces an
//! `HttpRequest`: the path suffix (an operation segment or the identifier),
//! the query parameters derived from filter and pagination, the JSON body and
//! the token flag. Executing and decoding is left to `CrudClient` and its
//! transport, keeping this layer deterministic and free of I/O.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::operations;
use crate::params::{generate_params, QueryParams};
use crate::types::{JsonPatch, Pagination};

/// Request builder for a resource with identifier `I`, record `R` and
/// filter `F`.
pub struct Resource<I, R, F> {
    path: String,
    _types: PhantomData<fn() -> (I, R, F)>,
}

impl<I, R, F> Resource<I, R, F> {
    /// Bind the builder to a resource path such as `sample`. Surrounding
    /// slashes are stripped.
    pub fn new(path: &str) -> Self {
        Self {
            path: path.trim_matches('/').to_string(),
            _types: PhantomData,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn request(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            resource: self.path.clone(),
            path,
            query: QueryParams::new(),
            headers: Vec::new(),
            body: None,
            need_token: true,
        }
    }

    fn with_body<B: Serialize + ?Sized>(mut request: HttpRequest, body: &B) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        request.headers.push(("content-type".to_string(), "application/json".to_string()));
        request.body = Some(body);
        Ok(request)
    }
}

fn segment(name: &str) -> String {
    format!("/{name}")
}

impl<I, R, F> Resource<I, R, F>
where
    I: fmt::Display,
    R: Serialize,
    F: Serialize,
{
    fn keyed(&self, method: HttpMethod, id: &I) -> HttpRequest {
        self.request(method, format!("/{id}"))
    }

    fn filtered(
        &self,
        method: HttpMethod,
        name: &str,
        filter: Option<&F>,
        pagination: Option<&Pagination>,
    ) -> Result<HttpRequest, ApiError> {
        let mut request = self.request(method, segment(name));
        request.query = generate_params(filter, pagination)?;
        Ok(request)
    }

    pub fn build_count(&self, filter: Option<&F>) -> Result<HttpRequest, ApiError> {
        self.filtered(HttpMethod::Get, operations::COUNT, filter, None)
    }

    pub fn build_count_all(&self) -> HttpRequest {
        self.request(HttpMethod::Get, segment(operations::COUNT_ALL))
    }

    pub fn build_get_by_id(&self, id: &I) -> HttpRequest {
        self.keyed(HttpMethod::Get, id)
    }

    pub fn build_get_one(&self, filter: Option<&F>) -> Result<HttpRequest, ApiError> {
        self.filtered(HttpMethod::Get, operations::GET_ONE, filter, None)
    }

    pub fn build_get_many(&self, filter: Option<&F>) -> Result<HttpRequest, ApiError> {
        self.filtered(HttpMethod::Get, operations::GET_MANY, filter, None)
    }

    pub fn build_get_page(
        &self,
        filter: Option<&F>,
        pagination: Option<&Pagination>,
    ) -> Result<HttpRequest, ApiError> {
        self.filtered(HttpMethod::Get, operations::GET_PAGE, filter, pagination)
    }

    pub fn build_delete_by_id(&self, id: &I) -> HttpRequest {
        self.keyed(HttpMethod::Delete, id)
    }

    pub fn build_delete(&self, filter: Option<&F>) -> Result<HttpRequest, ApiError> {
        self.filtered(HttpMethod::Delete, operations::DELETE, filter, None)
    }

    pub fn build_delete_many(&self, filter: Option<&F>) -> Result<HttpRequest, ApiError> {
        self.filtered(HttpMethod::Delete, operations::DELETE_MANY, filter, None)
    }

    pub fn build_save(&self, record: &R) -> Result<HttpRequest, ApiError> {
        Self::with_body(self.request(HttpMethod::Post, segment(operations::SAVE)), record)
    }

    pub fn build_save_many(&self, records: &[R]) -> Result<HttpRequest, ApiError> {
        Self::with_body(self.request(HttpMethod::Post, segment(operations::SAVE_MANY)), records)
    }

    pub fn build_update_by_id(&self, id: &I, record: &R) -> Result<HttpRequest, ApiError> {
        Self::with_body(self.keyed(HttpMethod::Put, id), record)
    }

    pub fn build_update(&self, record: &R) -> Result<HttpRequest, ApiError> {
        Self::with_body(self.request(HttpMethod::Put, segment(operations::UPDATE)), record)
    }

    pub fn build_update_many(&self, records: &[R]) -> Result<HttpRequest, ApiError> {
        Self::with_body(self.request(HttpMethod::Put, segment(operations::UPDATE_MANY)), records)
    }

    pub fn build_edit_by_id(&self, id: &I, patch: &JsonPatch) -> Result<HttpRequest, ApiError> {
        Self::with_body(self.keyed(HttpMethod::Patch, id), patch)
    }

    pub fn build_edit(&self, patch: &JsonPatch, filter: Option<&F>) -> Result<HttpRequest, ApiError> {
        let request = self.filtered(HttpMethod::Patch, operations::EDIT, filter, None)?;
        Self::with_body(request, patch)
    }

    pub fn build_edit_many(&self, patch: &JsonPatch, filter: Option<&F>) -> Result<HttpRequest, ApiError> {
        let request = self.filtered(HttpMethod::Patch, operations::EDIT_MANY, filter, None)?;
        Self::with_body(request, patch)
    }
}

impl<I, R, F> Clone for Resource<I, R, F> {
    fn clone(&self) -> Self {
        Self::new(&self.path)
    }
}

impl<I, R, F> fmt::Debug for Resource<I, R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource").field("path", &self.path).finish()
    }
}
