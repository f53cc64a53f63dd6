//! Test session
//!
//! A [`Session`] owns everything one API test works with: the default
//! request template, the schema store, the spec-validation target and the
//! ordered history of recorded instances.
//!
//! # Overview
//!
//! - Settings and expectations mutate the template and the schema store
//! - HTTP verbs record one [`Instance`] per call (see `recorder`)
//! - Type assertions and `missing` work on the last instance (see
//!   `assertions`)
//! - `output` and `rest_instances` export what was recorded

mod assertions;
mod recorder;
mod types;

pub use types::Instance;

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::http::{BasicAuth, ClientCert, Headers, ReqwestTransport, Request, Transport};
use crate::input::input;
use crate::output::write_json;
use crate::path::{FieldPath, PathResolver};
use crate::schema::SchemaStore;
use crate::spec::{OpenApiValidator, SpecValidator};
use crate::types::{JsonObject, JsonValue};
use crate::validate::Validator;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Stateful API test session
pub struct Session {
    url: Url,
    request: Request,
    store: SchemaStore,
    validator: Validator,
    spec: Option<String>,
    instances: Vec<Instance>,
    transport: Box<dyn Transport>,
    spec_validator: Box<dyn SpecValidator>,
}

impl Session {
    /// Build a session from its configuration
    ///
    /// Fails on an invalid base URL or an unknown schema version.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let url = Url::parse(&config.url)?;

        let store = match &config.schema {
            JsonValue::Null => SchemaStore::default(),
            document => SchemaStore::from_document(document)?,
        };

        let request = Request {
            headers: config.default_headers(),
            auth: config.auth.clone(),
            cert: config.cert.clone(),
            proxies: config.proxies.clone(),
            timeout: config.timeout,
            ssl_verify: config.ssl_verify,
            ..Request::default()
        };

        let mut transport = ReqwestTransport::new();
        if let Some(agent) = &config.user_agent {
            transport = transport.with_user_agent(agent);
        }

        debug!("Session created for {url} (schema {})", store.version());
        Ok(Self {
            url,
            request,
            validator: Validator::new(store.version()),
            store,
            spec: config.spec,
            instances: Vec::new(),
            transport: Box::new(transport),
            spec_validator: Box::new(OpenApiValidator::new()),
        })
    }

    /// Build a session with default settings for a base URL
    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        Self::new(SessionConfig::builder().url(url).build())
    }

    /// Replace the transport
    #[must_use]
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Box::new(transport);
        self
    }

    /// Replace the API-spec validator
    #[must_use]
    pub fn with_spec_validator(mut self, validator: impl SpecValidator + 'static) -> Self {
        self.spec_validator = Box::new(validator);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Base URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Default request template
    pub fn default_request(&self) -> &Request {
        &self.request
    }

    /// Live schema store
    pub fn schema_store(&self) -> &SchemaStore {
        &self.store
    }

    /// API spec target, if any
    pub fn spec(&self) -> Option<&str> {
        self.spec.as_deref()
    }

    /// Every recorded instance, oldest first
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// The instance assertions work on
    pub fn last_instance(&self) -> Result<&Instance> {
        self.instances.last().ok_or(Error::NoInstances)
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// Send basic auth with every request
    pub fn set_basic_auth(
        &mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> &Request {
        self.request.auth = Some(BasicAuth {
            username: username.into(),
            password: password.into(),
        });
        &self.request
    }

    /// Present a client certificate with every request
    pub fn set_client_cert(&mut self, cert: impl Into<PathBuf>, key: Option<PathBuf>) -> &Request {
        self.request.cert = Some(ClientCert {
            cert: cert.into(),
            key,
        });
        &self.request
    }

    /// Add or replace default headers
    pub fn set_headers(&mut self, headers: Headers) -> &Request {
        self.request.headers.extend(headers);
        &self.request
    }

    // ========================================================================
    // Expectations
    // ========================================================================

    /// Declare request shapes every later call must conform to
    ///
    /// `schema` may be an object, JSON text or a JSON file path.
    pub fn expect_request(&mut self, schema: &JsonValue) -> Result<&JsonObject> {
        let fragments = expectation(schema)?;
        Ok(self.store.expect_request(fragments))
    }

    /// Declare response shapes every later call must conform to
    pub fn expect_response(&mut self, schema: &JsonValue) -> Result<&JsonObject> {
        let fragments = expectation(schema)?;
        Ok(self.store.expect_response(fragments))
    }

    /// Validate every later exchange against an API spec
    pub fn expect_spec(&mut self, spec: impl Into<String>) -> &str {
        self.spec.insert(spec.into())
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Export the last instance, or the value at `field` in it
    ///
    /// Writes indented JSON to `file`, or to stdout when `None`, and returns
    /// what was written.
    pub fn output(&self, field: Option<&str>, file: Option<&Path>) -> Result<JsonValue> {
        let instance = self.last_instance()?;
        let json = match field.map(FieldPath::parse).filter(|path| !path.is_empty()) {
            None => serde_json::to_value(instance)?,
            Some(path) => {
                let root = serde_json::to_value(instance)?;
                PathResolver::new().resolve(&path, &root)?.reality
            }
        };
        write_json(&json, file)?;
        Ok(json)
    }

    /// Export the base URL and every recorded instance to `file`
    pub fn rest_instances(&self, file: Option<&Path>) -> Result<JsonValue> {
        let json = json!({
            "url": self.url.as_str(),
            "instances": serde_json::to_value(&self.instances)?,
        });
        write_json(&json, file)?;
        Ok(json)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("url", &self.url.as_str())
            .field("request", &self.request)
            .field("store", &self.store)
            .field("spec", &self.spec)
            .field("instances", &self.instances.len())
            .finish_non_exhaustive()
    }
}

fn expectation(schema: &JsonValue) -> Result<JsonObject> {
    match input(schema)? {
        JsonValue::Object(map) => Ok(map),
        other => Err(Error::config(format!(
            "Expected a JSON object for the schema, got {other}"
        ))),
    }
}
