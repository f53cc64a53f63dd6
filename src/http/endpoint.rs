//! Endpoint handling

use crate::error::Result;
use crate::types::{JsonObject, JsonValue};
use url::Url;

/// Resolve an endpoint against the session base URL
///
/// Absolute `http(s)://` endpoints pass through. Relative ones get a single
/// leading slash, lose one trailing slash and are joined onto `base` (an
/// absolute path replaces the base URL's path).
pub fn normalize_endpoint(base: &Url, endpoint: &str) -> Result<Url> {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        return Ok(Url::parse(endpoint)?);
    }

    let mut path = if endpoint.starts_with('/') {
        endpoint.to_string()
    } else {
        format!("/{endpoint}")
    };
    if path.ends_with('/') {
        path.pop();
    }
    Ok(base.join(&path)?)
}

/// Split a query string off an endpoint
///
/// Returns the endpoint without its query and the parameters found in it.
/// A parameter given once maps to a string, a repeated one to an array.
pub fn split_query(endpoint: &str) -> (String, JsonObject) {
    let mut query = JsonObject::new();
    let Some((path, raw_query)) = endpoint.rsplit_once('?') else {
        return (endpoint.to_string(), query);
    };

    for (name, value) in url::form_urlencoded::parse(raw_query.as_bytes()) {
        let value = JsonValue::String(value.into_owned());
        match query.get_mut(&*name) {
            Some(JsonValue::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = JsonValue::Array(vec![first, value]);
            }
            None => {
                query.insert(name.into_owned(), value);
            }
        }
    }

    (path.to_string(), query)
}
