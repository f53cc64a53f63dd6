//! Validator tests

use super::*;
use crate::error::Error;
use crate::schema::infer_schema;
use crate::types::SchemaVersion;
use serde_json::json;
use test_case::test_case;

fn validator() -> Validator {
    Validator::new(SchemaVersion::Draft04)
}

#[test]
fn test_assert_schema_passes() {
    let schema = json!({"type": "integer", "minimum": 200, "maximum": 299});
    assert!(validator().assert_schema(&schema, &json!(204)).is_ok());
}

#[test]
fn test_assert_schema_reports_mismatch() {
    let schema = json!({"type": "integer", "minimum": 200, "maximum": 299});
    let err = validator().assert_schema(&schema, &json!(404)).unwrap_err();

    match err {
        Error::SchemaValidation {
            message,
            schema: failed,
            value,
        } => {
            assert!(message.contains("299"));
            assert_eq!(failed, schema);
            assert_eq!(value, json!(404));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_assert_schema_reports_nested_location() {
    let schema = json!({
        "type": "object",
        "properties": {"id": {"type": "string"}}
    });
    let err = validator()
        .assert_schema(&schema, &json!({"id": 1}))
        .unwrap_err();
    assert!(err.to_string().contains("/id"));
}

#[test]
fn test_malformed_schema_is_config_error() {
    let err = validator()
        .assert_schema(&json!({"type": 12}), &json!(1))
        .unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn test_validate_schema_skips_absent_keys() {
    let schema_map = json!({
        "status": {"type": "integer"},
        "body": {"type": "object"}
    });
    let response = json!({"status": 200});

    assert!(validator()
        .validate_schema(
            schema_map.as_object().unwrap(),
            response.as_object().unwrap()
        )
        .is_ok());
}

#[test]
fn test_validate_schema_fails_on_first_mismatch() {
    let schema_map = json!({"status": {"enum": [200]}});
    let response = json!({"status": 500});

    let err = validator()
        .validate_schema(
            schema_map.as_object().unwrap(),
            response.as_object().unwrap(),
        )
        .unwrap_err();
    assert!(matches!(err, Error::SchemaValidation { .. }));
}

#[test_case(json!(null) ; "null")]
#[test_case(json!(-3) ; "integer")]
#[test_case(json!("text") ; "string")]
#[test_case(json!([1, "a", {"k": [true, null]}]) ; "mixed array")]
#[test_case(json!({"a": [{"b": 1}, {"c": 2.5}], "d": {}}) ; "nested object")]
#[test_case(json!([[], [1], [[2]]]) ; "nested arrays")]
fn test_inferred_schema_accepts_source(value: serde_json::Value) {
    let schema = infer_schema(&value);
    assert!(validator().assert_schema(&schema, &value).is_ok());
}
