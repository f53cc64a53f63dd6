//! Schema inference from JSON values

use super::types::{InferredSchema, ObjectShape};
use crate::types::{JsonType, JsonValue};
use serde_json::Value;

/// Schema inferrer with configuration options
#[derive(Debug, Clone)]
pub struct SchemaInferrer {
    /// Emit `required` lists for observed object members
    required: bool,
}

impl Default for SchemaInferrer {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaInferrer {
    /// Create a new schema inferrer with default settings
    pub fn new() -> Self {
        Self { required: true }
    }

    /// Enable/disable `required` lists in the output
    #[must_use]
    pub fn with_required(mut self, enabled: bool) -> Self {
        self.required = enabled;
        self
    }

    /// Infer a JSON schema document from a single value
    pub fn infer(&self, value: &Value) -> JsonValue {
        self.infer_typed(value).to_json()
    }

    /// Infer the typed schema for a value, for later merging
    pub fn infer_typed(&self, value: &Value) -> InferredSchema {
        let mut schema = InferredSchema::new(JsonType::of(value));
        schema.emit_required = self.required;

        match value {
            Value::Object(map) => {
                let mut shape = ObjectShape::default();
                for (key, member) in map {
                    shape.properties.insert(key.clone(), self.infer_typed(member));
                    shape.required.insert(key.clone());
                }
                schema.object = Some(shape);
            }
            Value::Array(elements) => {
                // Elements are generalized into one shared item schema
                let mut items: Option<InferredSchema> = None;
                for element in elements {
                    let element_schema = self.infer_typed(element);
                    match items.as_mut() {
                        Some(merged) => merged.merge(&element_schema),
                        None => items = Some(element_schema),
                    }
                }
                schema.items = items.map(Box::new);
            }
            _ => {}
        }

        schema
    }
}

/// Infer a schema document from a single value (convenience function)
pub fn infer_schema(value: &Value) -> JsonValue {
    SchemaInferrer::new().infer(value)
}
