//! Request and response records

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, Method};
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Header map with one value per name (repeated headers joined by `, `)
pub type Headers = BTreeMap<String, String>;

/// HTTP Basic credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAuth {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

/// Client certificate for mutual TLS (PEM files)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCert {
    /// Certificate file, may also hold the private key
    pub cert: PathBuf,
    /// Separate private key file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<PathBuf>,
}

/// Connect and read timeouts in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "TimeoutRepr", into = "TimeoutRepr")]
pub struct Timeout {
    /// Seconds to wait for the connection
    pub connect: f64,
    /// Seconds to wait between bytes of the response
    pub read: f64,
}

/// A timeout is written either as one number or as `[connect, read]`
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum TimeoutRepr {
    Both(f64),
    Pair(f64, f64),
}

impl From<TimeoutRepr> for Timeout {
    fn from(repr: TimeoutRepr) -> Self {
        match repr {
            TimeoutRepr::Both(seconds) => Timeout::uniform(seconds),
            TimeoutRepr::Pair(connect, read) => Timeout { connect, read },
        }
    }
}

impl From<Timeout> for TimeoutRepr {
    fn from(timeout: Timeout) -> Self {
        TimeoutRepr::Pair(timeout.connect, timeout.read)
    }
}

impl Timeout {
    /// Same limit for connect and read
    pub fn uniform(seconds: f64) -> Self {
        Self {
            connect: seconds,
            read: seconds,
        }
    }

    /// Connect timeout as a duration
    pub fn connect_duration(&self) -> Result<Duration> {
        seconds_to_duration("connect", self.connect)
    }

    /// Read timeout as a duration
    pub fn read_duration(&self) -> Result<Duration> {
        seconds_to_duration("read", self.read)
    }
}

/// Negative limits clamp to zero; infinite or oversized ones are rejected
fn seconds_to_duration(kind: &str, seconds: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(seconds.max(0.0)).map_err(|e| {
        Error::config(format!("Invalid {kind} timeout of {seconds} seconds: {e}"))
    })
}

/// Dispatch time of a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    /// RFC 3339 in UTC
    pub utc: String,
    /// RFC 3339 in the local time zone
    pub local: String,
}

impl Timestamp {
    /// Current time
    pub fn now() -> Self {
        let utc = Utc::now();
        Self {
            utc: utc.to_rfc3339(),
            local: utc.with_timezone(&Local).to_rfc3339(),
        }
    }
}

/// A request as recorded in an instance
///
/// The session keeps one as its default template; every call works on a
/// copy with the per-call overrides applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// HTTP method
    pub method: Method,
    /// Endpoint as given by the caller
    pub endpoint: String,
    /// Query parameters (repeated keys hold arrays)
    #[serde(default)]
    pub query: JsonObject,
    /// JSON body, `null` when none is sent
    #[serde(default)]
    pub body: JsonValue,
    /// Request headers
    #[serde(default)]
    pub headers: Headers,
    /// Basic auth credentials
    #[serde(default)]
    pub auth: Option<BasicAuth>,
    /// Client certificate
    #[serde(default)]
    pub cert: Option<ClientCert>,
    /// Proxy URLs by scheme (`http`, `https`, `all`)
    #[serde(default)]
    pub proxies: BTreeMap<String, String>,
    /// Timeouts, unbounded when absent
    #[serde(default)]
    pub timeout: Option<Timeout>,
    /// Follow redirects
    pub redirects: bool,
    /// Verify TLS certificates
    pub ssl_verify: bool,
    /// Set when the request is dispatched
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            method: Method::GET,
            endpoint: String::new(),
            query: JsonObject::new(),
            body: JsonValue::Null,
            headers: Headers::new(),
            auth: None,
            cert: None,
            proxies: BTreeMap::new(),
            timeout: None,
            redirects: true,
            ssl_verify: true,
            timestamp: None,
        }
    }
}

impl Request {
    /// Query parameters flattened to name/value pairs
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (name, value) in &self.query {
            match value {
                JsonValue::Array(values) => {
                    for item in values {
                        if let Some(text) = query_text(item) {
                            pairs.push((name.clone(), text));
                        }
                    }
                }
                other => {
                    if let Some(text) = query_text(other) {
                        pairs.push((name.clone(), text));
                    }
                }
            }
        }
        pairs
    }
}

fn query_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Per-call overrides for the request template
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallOptions {
    /// Query parameters merged over any found in the endpoint
    pub query: Option<JsonObject>,
    /// Body to send
    pub body: Option<JsonValue>,
    /// Follow redirects (defaults to the template's setting)
    pub redirects: Option<bool>,
    /// Timeout for this call
    pub timeout: Option<Timeout>,
}

impl CallOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query parameters
    #[must_use]
    pub fn query(mut self, query: JsonObject) -> Self {
        self.query = Some(query);
        self
    }

    /// Set the body
    #[must_use]
    pub fn body(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Enable or disable redirects
    #[must_use]
    pub fn redirects(mut self, follow: bool) -> Self {
        self.redirects = Some(follow);
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Timeout) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A response as recorded in an instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Status code
    pub status: u16,
    /// Elapsed wall-clock time
    pub seconds: f64,
    /// JSON body, or the raw text when it is not JSON
    pub body: JsonValue,
    /// Response headers
    pub headers: Headers,
}

/// The exchange as seen on the wire, for API-spec validation
#[derive(Debug, Clone, PartialEq)]
pub struct RawExchange {
    /// Method sent
    pub method: Method,
    /// Full URL sent, including the query string
    pub url: url::Url,
    /// Headers sent
    pub request_headers: Headers,
    /// JSON body sent
    pub request_body: Option<JsonValue>,
    /// Status received
    pub status: u16,
    /// Headers received
    pub response_headers: Headers,
    /// Body received, undecoded
    pub response_body: String,
}

/// What a transport hands back for one request
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    /// Elapsed wall-clock time
    pub elapsed: Duration,
    /// Wire-level view of the exchange
    pub raw: RawExchange,
}
