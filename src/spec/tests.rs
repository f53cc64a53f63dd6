//! API spec validation tests

use super::*;
use crate::error::Error;
use crate::http::{Headers, RawExchange};
use crate::types::Method;
use std::io::Write;
use url::Url;

const SWAGGER: &str = r#"
swagger: "2.0"
basePath: /v1
paths:
  /users:
    get:
      responses:
        "200":
          description: ok
  /users/{id}:
    get:
      responses:
        "200":
          description: ok
        "404":
          description: missing
    delete:
      responses:
        default:
          description: anything
"#;

const OPENAPI: &str = r#"{
  "openapi": "3.0.0",
  "servers": [{"url": "https://api.example.com/v2/"}],
  "paths": {
    "/items": {
      "post": {"responses": {"2XX": {"description": "created"}}}
    }
  }
}"#;

fn exchange(method: Method, url: &str, status: u16) -> RawExchange {
    RawExchange {
        method,
        url: Url::parse(url).unwrap(),
        request_headers: Headers::new(),
        request_body: None,
        status,
        response_headers: Headers::new(),
        response_body: String::new(),
    }
}

#[test]
fn test_swagger_base_path_and_params() {
    let validator = OpenApiValidator::new();
    validator
        .validate(SWAGGER, &exchange(Method::GET, "http://h/v1/users", 200))
        .unwrap();
    validator
        .validate(SWAGGER, &exchange(Method::GET, "http://h/v1/users/42/", 404))
        .unwrap();
    validator
        .validate(SWAGGER, &exchange(Method::DELETE, "http://h/v1/users/42", 500))
        .unwrap();
}

#[test]
fn test_undeclared_path() {
    let err = OpenApiValidator::new()
        .validate(SWAGGER, &exchange(Method::GET, "http://h/users", 200))
        .unwrap_err();
    assert!(matches!(err, Error::SpecValidation { .. }));
    assert!(err.to_string().contains("/users"));
}

#[test]
fn test_undeclared_method() {
    let err = OpenApiValidator::new()
        .validate(SWAGGER, &exchange(Method::PUT, "http://h/v1/users/1", 200))
        .unwrap_err();
    assert!(matches!(err, Error::SpecValidation { .. }));
    assert!(err.to_string().contains("PUT"));
}

#[test]
fn test_undeclared_status() {
    let err = OpenApiValidator::new()
        .validate(SWAGGER, &exchange(Method::GET, "http://h/v1/users", 500))
        .unwrap_err();
    assert!(matches!(err, Error::SpecValidation { .. }));
    assert!(err.to_string().contains("500"));
}

#[test]
fn test_openapi3_servers_and_status_range() {
    let validator = OpenApiValidator::new();
    validator
        .validate(OPENAPI, &exchange(Method::POST, "http://h/v2/items", 201))
        .unwrap();
    assert!(validator
        .validate(OPENAPI, &exchange(Method::POST, "http://h/v2/items", 400))
        .is_err());
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(OPENAPI.as_bytes()).unwrap();
    let spec = file.path().to_string_lossy().into_owned();

    OpenApiValidator::new()
        .validate(&spec, &exchange(Method::POST, "http://h/v2/items", 204))
        .unwrap();
}

#[test]
fn test_document_without_paths() {
    let err = OpenApiValidator::load("openapi: 3.0.0").unwrap_err();
    assert!(err.is_config_error());
}
