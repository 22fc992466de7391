//! The transport seam and its reqwest-backed default.
//!
//! # Design
//! `Transport` is the only place I/O happens: it takes a shaped
//! `HttpRequest`, performs the round-trip (attaching the bearer token when
//! asked to) and returns the raw `HttpResponse`. Status interpretation and
//! JSON decoding live in `decode_response`, shared by every transport.
//! Neither retries nor caches.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::TransportConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes shaped requests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request).await
    }
}

/// Map the response status, then decode a 2xx body as JSON.
pub fn decode_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    match response.status {
        200..=299 => serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string())),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body,
        }),
    }
}

/// Transport over HTTP using a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: TransportConfig,
}

impl HttpTransport {
    pub fn new(config: TransportConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn url(&self, request: &HttpRequest) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), request.target())
    }
}

fn method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.client.request(method(request.method), self.url(&request));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if request.need_token {
            let token = self.config.token.as_deref().ok_or(ApiError::MissingToken)?;
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        tracing::debug!(status, "response received");

        Ok(HttpResponse { status, headers, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::QueryParams;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: body.to_string(),
        }
    }

    #[test]
    fn decode_success() {
        let count: u64 = decode_response(response(200, "7")).unwrap();
        assert_eq!(count, 7);
    }

    #[test]
    fn decode_accepts_any_2xx() {
        let ids: Vec<String> = decode_response(response(201, r#"["a","b"]"#)).unwrap();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn decode_not_found() {
        let err = decode_response::<u64>(response(404, "")).unwrap_err();
        assert_eq!(err, ApiError::NotFound);
    }

    #[test]
    fn decode_wrong_status_keeps_body() {
        let err = decode_response::<u64>(response(500, "internal error")).unwrap_err();
        assert_eq!(
            err,
            ApiError::HttpError {
                status: 500,
                body: "internal error".to_string()
            }
        );
    }

    #[test]
    fn decode_bad_json() {
        let err = decode_response::<u64>(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn url_joins_base_and_target() {
        let transport = HttpTransport::new(TransportConfig::new("http://localhost:3000/api/")).unwrap();
        let request = HttpRequest {
            method: HttpMethod::Get,
            resource: "sample".to_string(),
            path: "/count".to_string(),
            query: QueryParams::new(),
            headers: Vec::new(),
            body: None,
            need_token: true,
        };
        assert_eq!(transport.url(&request), "http://localhost:3000/api/sample/count");
    }

    #[tokio::test]
    async fn missing_token_fails_before_sending() {
        let transport = HttpTransport::new(TransportConfig::new("http://127.0.0.1:9")).unwrap();
        let request = HttpRequest {
            method: HttpMethod::Get,
            resource: "sample".to_string(),
            path: "/count-all".to_string(),
            query: QueryParams::new(),
            headers: Vec::new(),
            body: None,
            need_token: true,
        };
        let err = transport.execute(request).await.unwrap_err();
        assert_eq!(err, ApiError::MissingToken);
    }
}
