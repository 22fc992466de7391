//! Reference resource bound to the `sample` path.
//!
//! Shows the intended way to configure a resource: fixed path, concrete
//! record and filter types, and an error hook. The hook here only logs.

use serde::{Deserialize, Serialize};

use crate::client::CrudClient;
use crate::transport::Transport;

pub const SAMPLE_RESOURCE: &str = "sample";

/// A sample record. `id` is assigned by the server on save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub status: String,
}

impl SampleDto {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            status: status.into(),
        }
    }
}

/// Filter over sample records; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl SampleCriteria {
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

pub type SampleClient<T> = CrudClient<String, SampleDto, SampleCriteria, T>;

pub fn sample_client<T: Transport>(transport: T) -> SampleClient<T> {
    CrudClient::new(SAMPLE_RESOURCE, transport).with_error_hook(|err| {
        tracing::warn!(resource = SAMPLE_RESOURCE, error = %err, "sample request failed");
    })
}
