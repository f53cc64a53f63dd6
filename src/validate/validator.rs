//! Draft-04 validator

use crate::error::{Error, Result};
use crate::types::{JsonObject, SchemaVersion};
use serde_json::Value;
use tracing::debug;

/// Validates values against schema nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    version: SchemaVersion,
}

impl Validator {
    /// Create a validator for a schema version
    pub fn new(version: SchemaVersion) -> Self {
        Self { version }
    }

    /// Schema version in use
    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    /// Fail with `SchemaValidation` unless `value` satisfies `schema`
    ///
    /// Every violation is reported, joined in one message. A schema that is
    /// itself malformed is a configuration error.
    pub fn assert_schema(&self, schema: &Value, value: &Value) -> Result<()> {
        let validator = match self.version {
            SchemaVersion::Draft04 => jsonschema::draft4::new(schema),
        }
        .map_err(|e| Error::config(format!("Invalid JSON Schema ({}): {e}", self.version)))?;

        let messages: Vec<String> = validator
            .iter_errors(value)
            .map(|error| {
                let location = error.instance_path().as_str().to_string();
                if location.is_empty() {
                    error.to_string()
                } else {
                    format!("{error} (at {location})")
                }
            })
            .collect();

        if messages.is_empty() {
            return Ok(());
        }

        debug!(
            "Schema mismatch for {value}:\n{}",
            serde_json::to_string_pretty(schema).unwrap_or_default()
        );
        Err(Error::SchemaValidation {
            message: messages.join("; "),
            schema: schema.clone(),
            value: value.clone(),
        })
    }

    /// Assert each schema in `schema_map` against the member of `json` with
    /// the same key
    ///
    /// Keys absent from `json` are skipped.
    pub fn validate_schema(&self, schema_map: &JsonObject, json: &JsonObject) -> Result<()> {
        for (field, schema) in schema_map {
            if let Some(value) = json.get(field) {
                self.assert_schema(schema, value)?;
            }
        }
        Ok(())
    }
}
