//! Tests for the HTTP module

use super::*;
use crate::types::Method;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn base() -> Url {
    Url::parse("http://localhost:8273/api").unwrap()
}

#[test]
fn test_normalize_relative_endpoint() {
    assert_eq!(
        normalize_endpoint(&base(), "users/").unwrap().as_str(),
        "http://localhost:8273/users"
    );
    assert_eq!(
        normalize_endpoint(&base(), "/users/1").unwrap().as_str(),
        "http://localhost:8273/users/1"
    );
}

#[test]
fn test_normalize_absolute_endpoint() {
    assert_eq!(
        normalize_endpoint(&base(), "https://example.com/x/").unwrap().as_str(),
        "https://example.com/x/"
    );
}

#[test]
fn test_split_query() {
    let (endpoint, query) = split_query("/users?limit=2&tag=a&tag=b");
    assert_eq!(endpoint, "/users");
    assert_eq!(json!(query), json!({"limit": "2", "tag": ["a", "b"]}));

    let (endpoint, query) = split_query("/users");
    assert_eq!(endpoint, "/users");
    assert!(query.is_empty());
}

#[test]
fn test_timeout_serde() {
    let single: Timeout = serde_json::from_value(json!(2.5)).unwrap();
    assert_eq!(single, Timeout::uniform(2.5));

    let pair: Timeout = serde_json::from_value(json!([1, 10])).unwrap();
    assert_eq!(pair.connect_duration().unwrap(), Duration::from_secs(1));
    assert_eq!(pair.read_duration().unwrap(), Duration::from_secs(10));
    assert_eq!(serde_json::to_value(pair).unwrap(), json!([1.0, 10.0]));
}

#[test]
fn test_request_query_pairs() {
    let request = Request {
        query: json!({"a": "1", "b": [2, "3"], "c": null, "d": true})
            .as_object()
            .unwrap()
            .clone(),
        ..Request::default()
    };
    assert_eq!(
        request.query_pairs(),
        vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
            ("b".to_string(), "3".to_string()),
            ("d".to_string(), "true".to_string()),
        ]
    );
}

#[test]
fn test_call_options_builder() {
    let options = CallOptions::new()
        .body(json!({"name": "x"}))
        .redirects(false)
        .timeout(Timeout::uniform(1.0));
    assert_eq!(options.body, Some(json!({"name": "x"})));
    assert_eq!(options.redirects, Some(false));
    assert!(options.query.is_none());
}

#[tokio::test]
async fn test_transport_sends_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(query_param("dry", "true"))
        .and(header("X-Trace", "abc"))
        .and(body_json(json!({"name": "Alice"})))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("X-Id", "7")
                .set_body_json(json!({"id": 7})),
        )
        .mount(&mock_server)
        .await;

    let mut request = Request {
        method: Method::POST,
        endpoint: "/users".to_string(),
        body: json!({"name": "Alice"}),
        ..Request::default()
    };
    request.query.insert("dry".to_string(), json!("true"));
    request.headers.insert("X-Trace".to_string(), "abc".to_string());

    let url = Url::parse(&format!("{}/users", mock_server.uri())).unwrap();
    let exchange = ReqwestTransport::new().send(&url, &request).await.unwrap();

    assert_eq!(exchange.raw.status, 201);
    assert_eq!(exchange.raw.response_headers["x-id"], "7");
    assert_eq!(exchange.raw.response_body, r#"{"id":7}"#);
    assert_eq!(exchange.raw.request_body, Some(json!({"name": "Alice"})));
    assert_eq!(exchange.raw.url.query(), Some("dry=true"));
}

#[tokio::test]
async fn test_transport_basic_auth() {
    let mock_server = MockServer::start().await;

    // "user:pass" in base64
    Mock::given(method("GET"))
        .and(header("Authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let request = Request {
        auth: Some(BasicAuth {
            username: "user".to_string(),
            password: "pass".to_string(),
        }),
        ..Request::default()
    };
    let url = Url::parse(&mock_server.uri()).unwrap();
    let exchange = ReqwestTransport::new().send(&url, &request).await.unwrap();
    assert_eq!(exchange.raw.status, 204);
}

#[tokio::test]
async fn test_transport_does_not_follow_redirects_when_disabled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/new"))
        .mount(&mock_server)
        .await;

    let request = Request {
        redirects: false,
        ..Request::default()
    };
    let url = Url::parse(&format!("{}/old", mock_server.uri())).unwrap();
    let exchange = ReqwestTransport::new().send(&url, &request).await.unwrap();
    assert_eq!(exchange.raw.status, 302);
}

#[tokio::test]
async fn test_transport_propagates_connection_errors() {
    // Nothing listens on port 9 locally
    let url = Url::parse("http://127.0.0.1:9/").unwrap();
    let request = Request {
        timeout: Some(Timeout::uniform(2.0)),
        ..Request::default()
    };
    let err = ReqwestTransport::new().send(&url, &request).await.unwrap_err();
    assert!(matches!(err, crate::error::Error::Http(_)));
}

#[test]
fn test_unknown_proxy_scheme() {
    let mut request = Request::default();
    request
        .proxies
        .insert("ftp".to_string(), "http://proxy:3128".to_string());
    let err = ReqwestTransport::new().build_client(&request).unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn test_oversized_timeout_is_a_config_error() {
    let request = Request {
        timeout: Some(Timeout::uniform(1e20)),
        ..Request::default()
    };
    let err = ReqwestTransport::new().build_client(&request).unwrap_err();
    assert!(err.is_config_error());

    assert_eq!(
        Timeout::uniform(-1.0).connect_duration().unwrap(),
        Duration::ZERO
    );
}
