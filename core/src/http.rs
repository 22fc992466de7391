//! HTTP transport types exchanged with a [`Transport`](crate::Transport).
//!
//! # Design
//! Requests and responses are plain data. `Resource` builds `HttpRequest`
//! values without touching the network; whichever transport the host plugs in
//! executes them and hands back an `HttpResponse` for decoding. Keeping the
//! shaping step pure makes every CRUD operation testable without I/O.
//!
//! `path` is the suffix relative to the resource prefix (`/count`, `/{id}`),
//! so assertions stay independent of where the resource is mounted.

use crate::params::QueryParams;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `Resource::build_*` methods. `need_token` asks the transport to
/// attach an authorization credential; the shaping layer never holds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub resource: String,
    pub path: String,
    pub query: QueryParams,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub need_token: bool,
}

impl HttpRequest {
    /// Full path of the request: the resource prefix followed by `path`.
    pub fn target(&self) -> String {
        if self.resource.is_empty() {
            self.path.clone()
        } else {
            format!("/{}{}", self.resource, self.path)
        }
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
