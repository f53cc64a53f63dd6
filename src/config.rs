//! Session configuration
//!
//! Defaults for a session: base URL, default request settings and the
//! initial schema document. Loadable from YAML or JSON.
//!
//! ```yaml
//! url: https://api.example.com
//! ssl_verify: false
//! headers:
//!   X-Trace: "1"
//! timeout: [3.0, 10.0]
//! schema:
//!   version: draft04
//!   exampled: true
//!   response:
//!     status: {type: integer, minimum: 200, maximum: 299}
//! ```

use crate::error::{Error, Result};
use crate::http::{BasicAuth, ClientCert, Headers, Timeout};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ============================================================================
// Session Config
// ============================================================================

/// Configuration a session is built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Base URL relative endpoints are joined onto
    pub url: String,

    /// Verify TLS certificates
    pub ssl_verify: bool,

    /// `Accept` header
    pub accept: String,

    /// `Content-Type` header
    pub content_type: String,

    /// `User-Agent` header, the transport's default when absent
    pub user_agent: Option<String>,

    /// Proxy URLs by scheme (`http`, `https`, `all`)
    pub proxies: BTreeMap<String, String>,

    /// Initial schema document (`request`, `response`, `version`, `exampled`)
    pub schema: JsonValue,

    /// API spec to validate every exchange against
    pub spec: Option<String>,

    /// Basic auth credentials
    pub auth: Option<BasicAuth>,

    /// Client certificate
    pub cert: Option<ClientCert>,

    /// Extra default headers
    pub headers: Headers,

    /// Default timeout, unbounded when absent
    pub timeout: Option<Timeout>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            ssl_verify: true,
            accept: default_media_type(),
            content_type: default_media_type(),
            user_agent: None,
            proxies: BTreeMap::new(),
            schema: JsonValue::Object(serde_json::Map::new()),
            spec: None,
            auth: None,
            cert: None,
            headers: Headers::new(),
            timeout: None,
        }
    }
}

fn default_url() -> String {
    "http://localhost".to_string()
}

fn default_media_type() -> String {
    "application/json".to_string()
}

impl SessionConfig {
    /// Create a new config builder
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }

    /// Parse a config from YAML (or JSON) text
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        if !config.schema.is_object() && !config.schema.is_null() {
            return Err(Error::config("Config 'schema' must be a mapping"));
        }
        if let Some(timeout) = &config.timeout {
            timeout.connect_duration()?;
            timeout.read_duration()?;
        }
        Ok(config)
    }

    /// Load a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    /// Default headers: `Accept`, `Content-Type`, `User-Agent` and the
    /// configured extras (extras win)
    pub fn default_headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), self.accept.clone());
        headers.insert("Content-Type".to_string(), self.content_type.clone());
        if let Some(agent) = &self.user_agent {
            headers.insert("User-Agent".to_string(), agent.clone());
        }
        headers.extend(self.headers.clone());
        headers
    }
}

/// Builder for session config
#[derive(Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Set the base URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    /// Enable or disable TLS verification
    pub fn ssl_verify(mut self, verify: bool) -> Self {
        self.config.ssl_verify = verify;
        self
    }

    /// Set the `Accept` header
    pub fn accept(mut self, media_type: impl Into<String>) -> Self {
        self.config.accept = media_type.into();
        self
    }

    /// Set the `Content-Type` header
    pub fn content_type(mut self, media_type: impl Into<String>) -> Self {
        self.config.content_type = media_type.into();
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(agent.into());
        self
    }

    /// Route a scheme through a proxy
    pub fn proxy(mut self, scheme: impl Into<String>, url: impl Into<String>) -> Self {
        self.config.proxies.insert(scheme.into(), url.into());
        self
    }

    /// Set the initial schema document
    pub fn schema(mut self, schema: JsonValue) -> Self {
        self.config.schema = schema;
        self
    }

    /// Validate every exchange against an API spec
    pub fn spec(mut self, spec: impl Into<String>) -> Self {
        self.config.spec = Some(spec.into());
        self
    }

    /// Set basic auth credentials
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.auth = Some(BasicAuth {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Set a client certificate
    pub fn cert(mut self, cert: impl Into<PathBuf>, key: Option<PathBuf>) -> Self {
        self.config.cert = Some(ClientCert {
            cert: cert.into(),
            key,
        });
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    /// Set the default timeout
    pub fn timeout(mut self, timeout: Timeout) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Build the config
    pub fn build(self) -> SessionConfig {
        self.config
    }
}
