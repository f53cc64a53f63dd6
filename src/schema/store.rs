//! Session-wide schema document
//!
//! Holds the user-declared `request`/`response` expectations, the session
//! flags (`version`, `exampled`) and the union of every shape observed so far.

use super::types::InferredSchema;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, SchemaVersion};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Where an observed schema fragment belongs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    /// `request.body`
    RequestBody,
    /// `request.query`
    RequestQuery,
    /// `response.body`
    ResponseBody,
}

impl Slot {
    /// Top-level section (`request` or `response`)
    pub fn section(self) -> &'static str {
        match self {
            Slot::RequestBody | Slot::RequestQuery => "request",
            Slot::ResponseBody => "response",
        }
    }

    /// Field within the section
    pub fn field(self) -> &'static str {
        match self {
            Slot::RequestBody | Slot::ResponseBody => "body",
            Slot::RequestQuery => "query",
        }
    }
}

/// The evolving schema of a session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaStore {
    version: SchemaVersion,
    exampled: bool,
    request: JsonObject,
    response: JsonObject,
    observed: BTreeMap<Slot, InferredSchema>,
}

impl SchemaStore {
    /// Create an empty store
    pub fn new(version: SchemaVersion, exampled: bool) -> Self {
        Self {
            version,
            exampled,
            ..Default::default()
        }
    }

    /// Build a store from a schema document
    /// (`{request?, response?, version?, exampled?}`)
    ///
    /// An unknown `version` fails here rather than at validation time.
    pub fn from_document(document: &Value) -> Result<Self> {
        let map = document
            .as_object()
            .ok_or_else(|| Error::config("Schema document must be a JSON object"))?;

        let version = match map.get("version") {
            None | Some(Value::Null) => SchemaVersion::default(),
            Some(Value::String(s)) => s.parse()?,
            Some(other) => {
                return Err(Error::UnknownSchemaVersion {
                    version: other.to_string(),
                })
            }
        };

        let exampled = match map.get("exampled") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                return Err(Error::config(format!(
                    "Schema flag 'exampled' must be a boolean, got {other}"
                )))
            }
        };

        let mut store = Self::new(version, exampled);
        for section in ["request", "response"] {
            match map.get(section) {
                None | Some(Value::Null) => {}
                Some(Value::Object(declared)) => {
                    store.section_mut(section).extend(declared.clone());
                }
                Some(_) => {
                    return Err(Error::config(format!(
                        "Schema section '{section}' must be a JSON object"
                    )))
                }
            }
        }

        for key in map.keys() {
            if !matches!(key.as_str(), "request" | "response" | "version" | "exampled") {
                warn!("Ignoring unknown schema document key '{key}'");
            }
        }

        Ok(store)
    }

    /// Schema version used for validation
    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    /// Whether observed values are embedded as `example` annotations
    pub fn exampled(&self) -> bool {
        self.exampled
    }

    /// Turn example embedding on or off
    pub fn set_exampled(&mut self, exampled: bool) {
        self.exampled = exampled;
    }

    /// Declared request expectations
    pub fn request(&self) -> &JsonObject {
        &self.request
    }

    /// Declared response expectations
    pub fn response(&self) -> &JsonObject {
        &self.response
    }

    /// Merge fragments into the declared request expectations
    pub fn expect_request(&mut self, schema: JsonObject) -> &JsonObject {
        self.request.extend(schema);
        &self.request
    }

    /// Merge fragments into the declared response expectations
    pub fn expect_response(&mut self, schema: JsonObject) -> &JsonObject {
        self.response.extend(schema);
        &self.response
    }

    fn section_mut(&mut self, section: &str) -> &mut JsonObject {
        if section == "request" {
            &mut self.request
        } else {
            &mut self.response
        }
    }

    /// Widen the observed union for a slot
    pub fn observe(&mut self, slot: Slot, schema: &InferredSchema) {
        match self.observed.get_mut(&slot) {
            Some(existing) => existing.merge(schema),
            None => {
                self.observed.insert(slot, schema.clone());
            }
        }
        debug!(
            "Observed schema updated for {}.{}",
            slot.section(),
            slot.field()
        );
    }

    /// Observed union for one slot
    pub fn observed_slot(&self, slot: Slot) -> Option<&InferredSchema> {
        self.observed.get(&slot)
    }

    /// Observed union of every exchange so far, as a schema document
    pub fn observed(&self) -> JsonValue {
        let mut request = JsonObject::new();
        let mut response = JsonObject::new();
        for (slot, schema) in &self.observed {
            let section = if slot.section() == "request" {
                &mut request
            } else {
                &mut response
            };
            section.insert(slot.field().to_string(), schema.to_json());
        }
        json!({
            "request": request,
            "response": response,
            "version": self.version,
            "exampled": self.exampled,
        })
    }

    /// Deep copy of the declared document, used as an instance's schema
    pub fn snapshot(&self) -> JsonValue {
        json!({
            "request": self.request.clone(),
            "response": self.response.clone(),
            "version": self.version,
            "exampled": self.exampled,
        })
    }
}
