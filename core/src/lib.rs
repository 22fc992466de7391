//! Typed CRUD access for REST resources.
//!
//! # Overview
//! Maps each logical CRUD operation (count, get a page, save many, edit by
//! JSON Patch, ...) onto an HTTP request shape and delegates execution to a
//! pluggable transport.
//!
//! # Design
//! - `Resource` is stateless: it holds only the resource path and turns
//!   operations into `HttpRequest` values (path suffix, query, body, token
//!   flag) without I/O.
//! - `CrudClient` runs each shaped request through a `Transport` exactly once
//!   and decodes the response; no caching, no retries.
//! - `HttpTransport` is the reqwest-backed default transport; hosts with their
//!   own HTTP stack implement `Transport` instead.
//! - Filters and pagination are flattened into one query namespace by
//!   `params::generate_params`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod operations;
pub mod params;
pub mod resource;
pub mod sample;
pub mod transport;
pub mod types;

pub use client::{CrudClient, ErrorHook};
pub use config::TransportConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use params::{generate_params, QueryParams};
pub use resource::Resource;
pub use transport::{decode_response, HttpTransport, Transport};
pub use types::{JsonPatch, Page, Pagination, PatchOp, PatchOperation};
