//! Assertion arguments

use super::coerce::{coerce_argument, coerce_literal, parse_boolean};
use crate::error::{Error, Result};
use crate::schema::lookup_keyword;
use crate::types::{JsonObject, JsonType, SchemaVersion};
use serde_json::Value;

/// Name of the flag that skips validation
const SKIP: &str = "skip";

/// Arguments of a type assertion
///
/// ```rust,ignore
/// let args = AssertArgs::new().with("minimum", 200).with("maximum", "299");
/// session.integer("response status", args)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssertArgs {
    enum_values: Vec<Value>,
    validations: Vec<(String, Value)>,
    skip: bool,
}

impl AssertArgs {
    /// Create empty arguments
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an allowed value (positional argument)
    #[must_use]
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.enum_values.push(value.into());
        self
    }

    /// Add several allowed values
    #[must_use]
    pub fn values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.enum_values.extend(values.into_iter().map(Into::into));
        self
    }

    /// Add a named validation keyword
    ///
    /// The name `skip` sets the skip flag instead.
    #[must_use]
    pub fn with(mut self, keyword: impl Into<String>, value: impl Into<Value>) -> Self {
        self.validations.push((keyword.into(), value.into()));
        self
    }

    /// Return the resolved value without validating it
    #[must_use]
    pub fn skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    /// Whether any enum values were given
    pub fn has_values(&self) -> bool {
        !self.enum_values.is_empty()
    }

    /// Check keywords and coerce every argument for an assertion of
    /// `json_type`
    ///
    /// Fails with `UnknownValidationKeyword` or `Coercion` before any
    /// schema work happens.
    pub fn prepare(&self, json_type: JsonType, version: SchemaVersion) -> Result<Prepared> {
        let mut skip = self.skip;
        let mut validations = JsonObject::new();

        for (name, raw) in &self.validations {
            if name == SKIP {
                skip = match raw {
                    Value::Bool(b) => *b,
                    Value::String(s) => parse_boolean(s)
                        .and_then(|v| v.as_bool())
                        .ok_or_else(|| Error::coercion(raw, "boolean"))?,
                    _ => return Err(Error::coercion(raw, "boolean")),
                };
                continue;
            }
            let keyword = lookup_keyword(json_type, version, name)?;
            validations.insert(name.clone(), coerce_argument(raw, keyword.arg)?);
        }

        let enum_values = if self.enum_values.is_empty() {
            None
        } else {
            Some(
                self.enum_values
                    .iter()
                    .map(|v| coerce_literal(v, json_type))
                    .collect::<Result<Vec<_>>>()?,
            )
        };

        Ok(Prepared {
            json_type,
            enum_values,
            validations,
            skip,
        })
    }
}

/// Checked and coerced assertion arguments
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
    /// Asserted type
    pub json_type: JsonType,
    /// Allowed values, if restricted
    pub enum_values: Option<Vec<Value>>,
    /// Validation keywords to merge
    pub validations: JsonObject,
    /// Skip validation
    pub skip: bool,
}

impl Prepared {
    /// Merge type, enum and validation keywords into a schema node
    ///
    /// A node that is not an object is replaced by a fresh one.
    pub fn apply_to(&self, schema: &mut Value) {
        if !schema.is_object() {
            *schema = Value::Object(JsonObject::new());
        }
        if let Value::Object(node) = schema {
            for (name, value) in &self.validations {
                node.insert(name.clone(), value.clone());
            }
            if let Some(values) = &self.enum_values {
                node.insert("enum".to_string(), Value::Array(values.clone()));
            }
            node.insert(
                "type".to_string(),
                Value::String(self.json_type.as_str().to_string()),
            );
        }
    }
}
