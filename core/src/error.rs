//! Error types for the CRUD client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the record does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `HttpError` with the raw
//! status code and body for debugging. The client never classifies or
//! recovers from these itself; they are returned as produced.

use thiserror::Error;

/// Errors returned by the request-shaping layer, the decoder and transports.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The filter or pagination could not be flattened into query parameters.
    #[error("invalid query parameters: {0}")]
    InvalidParams(String),

    /// The request needs a token but the transport has none configured.
    #[error("authorization token required but none is configured")]
    MissingToken,

    /// The transport failed before a response was received.
    #[error("transport failed: {0}")]
    Transport(String),

    /// Transport configuration is missing or malformed.
    #[error("invalid configuration: {0}")]
    Config(String),
}
