//! Flattening of filters and pagination into query parameters.
//!
//! # Design
//! Filters are arbitrary `Serialize` values, so the generator goes through
//! `serde_json::Value` rather than reflecting over fields. Nested objects
//! become dotted keys (`name.eq=x`) and arrays of scalars become
//! comma-separated values, which is how Spring binds criteria on the server.
//! Pagination is flattened after the filter into the same namespace, so on a
//! key collision the pagination value wins.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::types::Pagination;

/// Flat query parameter mapping. Keys are unique.
pub type QueryParams = BTreeMap<String, String>;

/// Build the query parameters for an optional filter and optional pagination.
///
/// Absent and `null` fields are omitted. A filter that does not serialize to
/// a JSON object (or `null`) is rejected.
pub fn generate_params<F>(
    filter: Option<&F>,
    pagination: Option<&Pagination>,
) -> Result<QueryParams, ApiError>
where
    F: Serialize + ?Sized,
{
    let mut params = QueryParams::new();
    if let Some(filter) = filter {
        merge(&mut params, to_value(filter)?)?;
    }
    if let Some(pagination) = pagination {
        merge(&mut params, to_value(pagination)?)?;
    }
    Ok(params)
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::InvalidParams(e.to_string()))
}

fn merge(params: &mut QueryParams, value: Value) -> Result<(), ApiError> {
    match value {
        Value::Null => Ok(()),
        Value::Object(fields) => {
            for (key, field) in fields {
                flatten(params, key, field)?;
            }
            Ok(())
        }
        other => Err(ApiError::InvalidParams(format!(
            "expected an object, got {}",
            kind(&other)
        ))),
    }
}

fn flatten(params: &mut QueryParams, key: String, value: Value) -> Result<(), ApiError> {
    match value {
        Value::Null => {}
        Value::Object(fields) => {
            for (child, field) in fields {
                flatten(params, format!("{key}.{child}"), field)?;
            }
        }
        Value::Array(items) => {
            let mut joined = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Null => {}
                    Value::Array(_) | Value::Object(_) => {
                        return Err(ApiError::InvalidParams(format!(
                            "`{key}` holds a nested {}",
                            kind(&item)
                        )));
                    }
                    scalar => joined.push(scalar_to_string(scalar)),
                }
            }
            if !joined.is_empty() {
                params.insert(key, joined.join(","));
            }
        }
        scalar => {
            params.insert(key, scalar_to_string(scalar));
        }
    }
    Ok(())
}

fn scalar_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn no_inputs_yield_empty_params() {
        let out = generate_params::<Value>(None, None).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn filter_fields_become_params() {
        let out = generate_params(Some(&json!({"status": "active"})), None).unwrap();
        assert_eq!(out, params(&[("status", "active")]));
    }

    #[test]
    fn null_fields_are_omitted() {
        let out = generate_params(Some(&json!({"status": null, "name": "a"})), None).unwrap();
        assert_eq!(out, params(&[("name", "a")]));
    }

    #[test]
    fn numbers_and_booleans_are_stringified() {
        let out = generate_params(Some(&json!({"age": 42, "enabled": true})), None).unwrap();
        assert_eq!(out, params(&[("age", "42"), ("enabled", "true")]));
    }

    #[test]
    fn nested_objects_use_dotted_keys() {
        let filter = json!({"name": {"eq": "x", "regex": null}, "id": {"in": ["a", "b"]}});
        let out = generate_params(Some(&filter), None).unwrap();
        assert_eq!(out, params(&[("id.in", "a,b"), ("name.eq", "x")]));
    }

    #[test]
    fn empty_arrays_are_omitted() {
        let out = generate_params(Some(&json!({"tags": []})), None).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn pagination_merges_into_filter_namespace() {
        let pagination = Pagination::new(2, 10);
        let out = generate_params(Some(&json!({"status": "active"})), Some(&pagination)).unwrap();
        assert_eq!(out, params(&[("page", "2"), ("size", "10"), ("status", "active")]));
    }

    #[test]
    fn pagination_wins_on_collision() {
        let pagination = Pagination::new(3, 5);
        let out = generate_params(Some(&json!({"page": "filter"})), Some(&pagination)).unwrap();
        assert_eq!(out["page"], "3");
    }

    #[test]
    fn pagination_sort_is_kept_verbatim() {
        let pagination = Pagination::new(0, 20).with_sort("name,desc");
        let out = generate_params::<Value>(None, Some(&pagination)).unwrap();
        assert_eq!(out["sort"], "name,desc");
    }

    #[test]
    fn scalar_filter_is_rejected() {
        let err = generate_params(Some(&json!("active")), None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidParams(_)));
    }

    #[test]
    fn nested_array_is_rejected() {
        let err = generate_params(Some(&json!({"ids": [[1]]})), None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidParams(_)));
    }
}
