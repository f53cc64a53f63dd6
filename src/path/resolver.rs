//! Lock-step value and schema walk

use super::types::FieldPath;
use crate::error::{Error, Result};
use crate::schema::SchemaInferrer;
use crate::types::JsonObject;
use serde_json::Value;
use tracing::debug;

/// Result of resolving a path against a value
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// Keys consumed
    pub keys: Vec<String>,
    /// The value found at the path
    pub reality: Value,
}

/// Result of resolving a path against a value and its schema
#[derive(Debug)]
pub struct Tracked<'s> {
    /// Keys consumed
    pub keys: Vec<String>,
    /// The value found at the path
    pub reality: Value,
    /// The schema node describing `reality`, created on demand
    pub schema: &'s mut Value,
}

/// Resolves field paths, optionally growing the schema as it goes
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    inferrer: SchemaInferrer,
    add_example: bool,
    document_depth: usize,
}

impl PathResolver {
    /// Create a resolver without example stamping
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp resolved values below the document levels onto their schema
    /// nodes as `example`
    #[must_use]
    pub fn with_examples(mut self, enabled: bool) -> Self {
        self.add_example = enabled;
        self
    }

    /// Number of leading keys that index the schema document directly
    /// instead of going through `properties`/`items`
    ///
    /// An instance's schema is `{request: {body: <schema>, ...}, ...}`, so the
    /// first two levels are plain maps rather than schema nodes.
    #[must_use]
    pub fn with_document_depth(mut self, depth: usize) -> Self {
        self.document_depth = depth;
        self
    }

    /// Use a custom inferrer for schema nodes created on demand
    #[must_use]
    pub fn with_inferrer(mut self, inferrer: SchemaInferrer) -> Self {
        self.inferrer = inferrer;
        self
    }

    /// Resolve a path against a value only
    pub fn resolve(&self, path: &FieldPath, root: &Value) -> Result<Resolved> {
        let mut value = root;
        for key in path.keys() {
            value = value_by_key(value, key, path)?;
        }
        Ok(Resolved {
            keys: path.keys().to_vec(),
            reality: value.clone(),
        })
    }

    /// Resolve a path against a value and walk the schema alongside it
    ///
    /// Schema nodes missing for a key are inferred from the value already
    /// resolved at that key and inserted, so a second resolution of the same
    /// path finds them instead of creating them again.
    pub fn resolve_tracked<'s>(
        &self,
        path: &FieldPath,
        root: &Value,
        schema: &'s mut Value,
    ) -> Result<Tracked<'s>> {
        let mut value = root;
        let mut node = schema;
        for (depth, key) in path.keys().iter().enumerate() {
            let child = value_by_key(value, key, path)?;
            node = self.schema_by_key(node, key, value, child, depth < self.document_depth)?;
            value = child;
        }
        Ok(Tracked {
            keys: path.keys().to_vec(),
            reality: value.clone(),
            schema: node,
        })
    }

    fn schema_by_key<'s>(
        &self,
        node: &'s mut Value,
        key: &str,
        parent: &Value,
        child: &Value,
        direct: bool,
    ) -> Result<&'s mut Value> {
        let Value::Object(map) = node else {
            return Err(Error::config(format!(
                "Schema above '{key}' is not an object"
            )));
        };

        let (container, member): (&mut JsonObject, String) = if direct {
            (map, key.to_string())
        } else if let Value::Array(elements) = parent {
            // Each element gets its own node next to the shared `items` keywords
            let index = array_position(elements, key)
                .map_or_else(|| key.to_string(), |position| position.to_string());
            let items = map
                .entry("items")
                .or_insert_with(|| Value::Object(JsonObject::new()))
                .as_object_mut()
                .ok_or_else(|| {
                    Error::config(format!("Schema 'items' above '{key}' is not an object"))
                })?;
            (items, index)
        } else {
            let properties = map
                .entry("properties")
                .or_insert_with(|| Value::Object(JsonObject::new()))
                .as_object_mut()
                .ok_or_else(|| {
                    Error::config(format!("Schema 'properties' above '{key}' is not an object"))
                })?;
            (properties, key.to_string())
        };

        let child_schema = container.entry(member).or_insert_with(|| {
            debug!("Extending schema with inferred node for '{key}'");
            self.inferrer.infer(child)
        });
        if !direct {
            self.stamp_example(child_schema, child);
        }
        Ok(child_schema)
    }

    fn stamp_example(&self, schema: &mut Value, value: &Value) {
        if !self.add_example {
            return;
        }
        if let Value::Object(map) = schema {
            map.insert("example".to_string(), value.clone());
        }
    }
}

/// Index into a container by member name or array index
fn value_by_key<'v>(container: &'v Value, key: &str, path: &FieldPath) -> Result<&'v Value> {
    let found = match container {
        Value::Array(elements) => {
            if key.parse::<i64>().is_ok() {
                return array_position(elements, key)
                    .and_then(|p| elements.get(p))
                    .ok_or_else(|| index_not_found(container, key, path));
            }
            None
        }
        Value::Object(members) => members.get(key),
        _ => None,
    };
    found.ok_or_else(|| field_not_found(container, key, path))
}

/// Position named by a decimal index, counting from the end when negative
fn array_position(elements: &[Value], key: &str) -> Option<usize> {
    let index = key.parse::<i64>().ok()?;
    if index < 0 {
        usize::try_from(index.unsigned_abs())
            .ok()
            .and_then(|back| elements.len().checked_sub(back))
    } else {
        usize::try_from(index).ok()
    }
}

fn field_not_found(container: &Value, key: &str, path: &FieldPath) -> Error {
    debug!(
        "Property '{key}' does not exist in:\n{}",
        serde_json::to_string_pretty(container).unwrap_or_default()
    );
    Error::FieldNotFound {
        field: path.to_string(),
        key: key.to_string(),
        container: container.clone(),
    }
}

fn index_not_found(container: &Value, key: &str, path: &FieldPath) -> Error {
    debug!(
        "Index '{key}' does not exist in:\n{}",
        serde_json::to_string_pretty(container).unwrap_or_default()
    );
    Error::IndexNotFound {
        field: path.to_string(),
        key: key.to_string(),
        container: container.clone(),
    }
}
