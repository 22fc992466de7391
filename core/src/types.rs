//! Shared value shapes: pagination, page envelopes and JSON Patch documents.
//!
//! # Design
//! Record and filter types belong to the caller; only the shapes that every
//! resource shares live here. `Page` mirrors the Spring Data page envelope the
//! server side emits (camelCase, every metadata field optional on the wire).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page number, size and sort order for `get_page`.
///
/// Fields that are `None` are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Sort expression, e.g. `name,desc`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl Pagination {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
            sort: None,
        }
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

/// A bounded slice of records plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

/// JSON Patch operation kind (RFC 6902).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Remove,
    Replace,
    Move,
    Copy,
    Test,
}

/// One step of a JSON Patch document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl PatchOperation {
    pub fn add(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_value(PatchOp::Add, path, value)
    }

    pub fn replace(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_value(PatchOp::Replace, path, value)
    }

    pub fn test(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_value(PatchOp::Test, path, value)
    }

    pub fn remove(path: impl Into<String>) -> Self {
        Self {
            op: PatchOp::Remove,
            path: path.into(),
            value: None,
            from: None,
        }
    }

    pub fn move_from(from: impl Into<String>, path: impl Into<String>) -> Self {
        Self::with_from(PatchOp::Move, from, path)
    }

    pub fn copy_from(from: impl Into<String>, path: impl Into<String>) -> Self {
        Self::with_from(PatchOp::Copy, from, path)
    }

    fn with_value(op: PatchOp, path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            op,
            path: path.into(),
            value: Some(value.into()),
            from: None,
        }
    }

    fn with_from(op: PatchOp, from: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            op,
            path: path.into(),
            value: None,
            from: Some(from.into()),
        }
    }
}

/// An ordered JSON Patch document. Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonPatch {
    pub operations: Vec<PatchOperation>,
}

impl JsonPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, operation: PatchOperation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl FromIterator<PatchOperation> for JsonPatch {
    fn from_iter<I: IntoIterator<Item = PatchOperation>>(iter: I) -> Self {
        Self {
            operations: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patch_serializes_as_rfc6902_array() {
        let patch = JsonPatch::new()
            .push(PatchOperation::replace("/name", "renamed"))
            .push(PatchOperation::remove("/status"))
            .push(PatchOperation::move_from("/a", "/b"));
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            value,
            json!([
                {"op": "replace", "path": "/name", "value": "renamed"},
                {"op": "remove", "path": "/status"},
                {"op": "move", "path": "/b", "from": "/a"}
            ])
        );
    }

    #[test]
    fn pagination_omits_absent_fields() {
        let value = serde_json::to_value(Pagination { page: Some(1), ..Default::default() }).unwrap();
        assert_eq!(value, json!({"page": 1}));
    }

    #[test]
    fn page_accepts_spring_envelope() {
        let raw = r#"{"content":[1,2],"totalElements":12,"totalPages":6,"number":0,"size":2,"first":true}"#;
        let page: Page<u32> = serde_json::from_str(raw).unwrap();
        assert_eq!(page.content, vec![1, 2]);
        assert_eq!(page.total_elements, 12);
        assert_eq!(page.total_pages, 6);
    }

    #[test]
    fn page_tolerates_missing_metadata() {
        let page: Page<String> = serde_json::from_str(r#"{"content":["a"]}"#).unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.total_elements, 0);
    }
}
