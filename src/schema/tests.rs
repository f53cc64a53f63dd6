//! Schema inference and store tests

use super::*;
use crate::error::Error;
use crate::types::{JsonType, SchemaVersion};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_infer_scalars() {
    assert_eq!(infer_schema(&json!(1)), json!({"type": "integer"}));
    assert_eq!(infer_schema(&json!(1.5)), json!({"type": "number"}));
    assert_eq!(infer_schema(&json!("x")), json!({"type": "string"}));
    assert_eq!(infer_schema(&json!(false)), json!({"type": "boolean"}));
    assert_eq!(infer_schema(&json!(null)), json!({"type": "null"}));
}

#[test]
fn test_infer_simple_object() {
    let schema = infer_schema(&json!({
        "name": "John",
        "age": 30,
        "active": true
    }));

    assert_eq!(
        schema,
        json!({
            "type": "object",
            "properties": {
                "active": {"type": "boolean"},
                "age": {"type": "integer"},
                "name": {"type": "string"}
            },
            "required": ["active", "age", "name"]
        })
    );
}

#[test]
fn test_infer_nested_object() {
    let schema = infer_schema(&json!({"user": {"name": "John", "tags": []}}));

    assert_eq!(schema["properties"]["user"]["type"], "object");
    assert_eq!(
        schema["properties"]["user"]["properties"]["name"],
        json!({"type": "string"})
    );
    // Empty arrays carry no item schema
    assert_eq!(
        schema["properties"]["user"]["properties"]["tags"],
        json!({"type": "array"})
    );
}

#[test]
fn test_infer_array_generalizes_elements() {
    let schema = infer_schema(&json!([
        {"id": 1, "name": "a"},
        {"id": 2.5, "note": null}
    ]));

    assert_eq!(
        schema,
        json!({
            "type": "array",
            "items": {
                "type": "object",
                "properties": {
                    "id": {"type": "number"},
                    "name": {"type": "string"},
                    "note": {"type": "null"}
                },
                "required": ["id"]
            }
        })
    );
}

#[test]
fn test_infer_array_type_union() {
    let schema = infer_schema(&json!([1, "two", null]));
    assert_eq!(schema["items"]["type"], json!(["integer", "null", "string"]));
}

#[test]
fn test_infer_without_required() {
    let schema = SchemaInferrer::new()
        .with_required(false)
        .infer(&json!({"a": {"b": 1}}));
    assert!(schema.get("required").is_none());
    assert!(schema["properties"]["a"].get("required").is_none());
}

#[test]
fn test_infer_is_deterministic() {
    let value = json!({"z": [1, {"k": "v"}], "a": {"b": [true]}});
    assert_eq!(infer_schema(&value), infer_schema(&value));
}

#[test]
fn test_type_set_folds_integer_into_number() {
    let mut set = TypeSet::single(JsonType::Integer);
    set.insert(JsonType::Number);
    assert_eq!(set.len(), 1);
    assert!(set.contains(JsonType::Number));

    set.insert(JsonType::Integer);
    assert!(!set.contains(JsonType::Integer));
}

#[test]
fn test_merge_marks_missing_members_optional() {
    let inferrer = SchemaInferrer::new();
    let mut first = inferrer.infer_typed(&json!({"a": 1}));
    let second = inferrer.infer_typed(&json!({"a": 1, "b": 2}));
    first.merge(&second);

    assert!(first.property("b").is_some());
    assert!(first.is_required("a"));
    assert!(!first.is_required("b"));
}

// ============================================================================
// Keyword table
// ============================================================================

#[test]
fn test_keyword_lookup() {
    let minimum = lookup_keyword(JsonType::Integer, SchemaVersion::Draft04, "minimum").unwrap();
    assert_eq!(minimum.arg, ArgKind::Number);

    // Common keywords apply to every type
    assert!(lookup_keyword(JsonType::Null, SchemaVersion::Draft04, "description").is_ok());

    let err = lookup_keyword(JsonType::String, SchemaVersion::Draft04, "minimum").unwrap_err();
    assert!(matches!(err, Error::UnknownValidationKeyword { .. }));
}

#[test]
fn test_allowed_keywords_lists_common_first() {
    let names: Vec<_> = allowed_keywords(JsonType::String, SchemaVersion::Draft04)
        .map(|k| k.name)
        .collect();
    assert_eq!(names.first(), Some(&"title"));
    assert!(names.contains(&"pattern"));
    assert!(!names.contains(&"minItems"));
}

// ============================================================================
// Schema store
// ============================================================================

#[test]
fn test_store_from_document() {
    let store = SchemaStore::from_document(&json!({
        "version": "draft04",
        "exampled": true,
        "response": {"status": {"type": "integer"}}
    }))
    .unwrap();

    assert_eq!(store.version(), SchemaVersion::Draft04);
    assert!(store.exampled());
    assert!(store.request().is_empty());
    assert_eq!(store.response()["status"], json!({"type": "integer"}));
}

#[test]
fn test_store_rejects_unknown_version() {
    let err = SchemaStore::from_document(&json!({"version": "draft07"})).unwrap_err();
    assert!(matches!(err, Error::UnknownSchemaVersion { version } if version == "draft07"));
}

#[test]
fn test_store_rejects_non_object_section() {
    let err = SchemaStore::from_document(&json!({"request": []})).unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn test_store_expectations_merge() {
    let mut store = SchemaStore::default();
    let first = json!({"status": {"type": "integer"}});
    store.expect_response(first.as_object().unwrap().clone());
    let second = json!({"body": {"type": "object"}});
    let response = store.expect_response(second.as_object().unwrap().clone());

    assert_eq!(response.len(), 2);
}

#[test]
fn test_snapshot_is_independent_copy() {
    let mut store = SchemaStore::default();
    let snapshot = store.snapshot();
    store.expect_request(json!({"body": {"type": "object"}}).as_object().unwrap().clone());

    assert_eq!(snapshot["request"], json!({}));
    assert_eq!(store.snapshot()["request"]["body"]["type"], "object");
}

#[test]
fn test_observed_accumulates_union() {
    let inferrer = SchemaInferrer::new();
    let mut store = SchemaStore::default();
    store.observe(Slot::ResponseBody, &inferrer.infer_typed(&json!({"a": 1})));
    store.observe(Slot::ResponseBody, &inferrer.infer_typed(&json!({"a": 1, "b": 2})));

    let observed = store.observed();
    let body = &observed["response"]["body"];
    assert_eq!(body["properties"]["b"], json!({"type": "integer"}));
    assert_eq!(body["required"], json!(["a"]));
    assert!(observed["request"].as_object().unwrap().is_empty());
}
