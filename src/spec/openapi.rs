//! OpenAPI 2/3 path, method and status checks

use super::SpecValidator;
use crate::error::{Error, Result};
use crate::http::RawExchange;
use crate::types::JsonValue;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

/// Matches `{param}` placeholders in path templates
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}/]+\}").expect("valid placeholder regex"));

/// Checks exchanges against an OpenAPI document
///
/// The spec identifier is a path to a JSON or YAML file; text that is not an
/// existing file is parsed as the document itself.
#[derive(Debug, Clone, Default)]
pub struct OpenApiValidator;

impl OpenApiValidator {
    /// Create a validator
    pub fn new() -> Self {
        Self
    }

    /// Load a document from a file path or inline text
    pub fn load(spec: &str) -> Result<JsonValue> {
        let text = if Path::new(spec).is_file() {
            std::fs::read_to_string(spec)?
        } else {
            spec.to_string()
        };
        // YAML is a superset of JSON, so one parser reads both
        let document: JsonValue = serde_yaml::from_str(&text)?;
        if document.get("paths").and_then(JsonValue::as_object).is_none() {
            return Err(Error::config("API spec has no 'paths' object"));
        }
        Ok(document)
    }

    /// Check one exchange against a loaded document
    pub fn check(&self, document: &JsonValue, exchange: &RawExchange) -> Result<()> {
        let request_path = trim_path(exchange.url.path());
        let method = exchange.method.as_str().to_ascii_lowercase();

        let paths = document
            .get("paths")
            .and_then(JsonValue::as_object)
            .ok_or_else(|| Error::config("API spec has no 'paths' object"))?;

        let prefixes = base_paths(document);
        let item = paths
            .iter()
            .find(|(template, _)| {
                prefixes
                    .iter()
                    .any(|prefix| template_matches(&format!("{prefix}{template}"), request_path))
            })
            .map(|(_, item)| item)
            .ok_or_else(|| {
                Error::spec(format!(
                    "Path '{request_path}' is not declared in the API spec"
                ))
            })?;

        let operation = item.get(&method).ok_or_else(|| {
            Error::spec(format!(
                "Method {} is not declared for path '{request_path}'",
                exchange.method
            ))
        })?;

        let status = exchange.status.to_string();
        let range = format!("{}XX", exchange.status / 100);
        let declared = operation
            .get("responses")
            .and_then(JsonValue::as_object)
            .is_some_and(|responses| {
                responses.keys().any(|code| {
                    code == &status || code == "default" || code.eq_ignore_ascii_case(&range)
                })
            });
        if !declared {
            return Err(Error::spec(format!(
                "Status {status} is not declared for {} '{request_path}'",
                exchange.method
            )));
        }

        debug!("Exchange conforms to API spec: {} {request_path}", exchange.method);
        Ok(())
    }
}

impl SpecValidator for OpenApiValidator {
    fn validate(&self, spec: &str, exchange: &RawExchange) -> Result<()> {
        let document = Self::load(spec)?;
        self.check(&document, exchange)
    }
}

/// Path prefixes declared by `basePath` (v2) or `servers` (v3)
fn base_paths(document: &JsonValue) -> Vec<String> {
    let mut prefixes = Vec::new();
    if let Some(base) = document.get("basePath").and_then(JsonValue::as_str) {
        prefixes.push(base.trim_end_matches('/').to_string());
    }
    if let Some(servers) = document.get("servers").and_then(JsonValue::as_array) {
        for server in servers {
            if let Some(url) = server.get("url").and_then(JsonValue::as_str) {
                let path = match Url::parse(url) {
                    Ok(parsed) => parsed.path().to_string(),
                    Err(_) => url.to_string(),
                };
                prefixes.push(path.trim_end_matches('/').to_string());
            }
        }
    }
    if prefixes.is_empty() {
        prefixes.push(String::new());
    }
    prefixes
}

fn trim_path(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

/// Whether a request path matches a path template
fn template_matches(template: &str, path: &str) -> bool {
    let template = trim_path(template);
    let mut pattern = String::from("^");
    let mut last = 0;
    for placeholder in PLACEHOLDER.find_iter(template) {
        pattern.push_str(&regex::escape(&template[last..placeholder.start()]));
        pattern.push_str("[^/]+");
        last = placeholder.end();
    }
    pattern.push_str(&regex::escape(&template[last..]));
    pattern.push('$');

    Regex::new(&pattern).is_ok_and(|re| re.is_match(path))
}
