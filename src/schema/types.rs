//! Schema types

use crate::types::{JsonType, JsonValue};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

/// The set of JSON types a schema node allows
///
/// Serializes as a single type name when it holds one type and as an array
/// otherwise. `integer` is folded into `number` when both are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSet(BTreeSet<JsonType>);

impl TypeSet {
    /// Create a set holding one type
    pub fn single(json_type: JsonType) -> Self {
        let mut set = BTreeSet::new();
        set.insert(json_type);
        Self(set)
    }

    /// Add a type to the set
    pub fn insert(&mut self, json_type: JsonType) {
        if json_type == JsonType::Integer && self.0.contains(&JsonType::Number) {
            return;
        }
        if json_type == JsonType::Number {
            self.0.remove(&JsonType::Integer);
        }
        self.0.insert(json_type);
    }

    /// Union with another set
    pub fn extend(&mut self, other: &TypeSet) {
        for json_type in &other.0 {
            self.insert(*json_type);
        }
    }

    /// Check membership
    pub fn contains(&self, json_type: JsonType) -> bool {
        self.0.contains(&json_type)
    }

    /// Number of distinct types
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no type has been observed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the types in name order
    pub fn iter(&self) -> impl Iterator<Item = JsonType> + '_ {
        self.0.iter().copied()
    }
}

impl Serialize for TypeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.len() == 1 {
            if let Some(only) = self.0.iter().next() {
                return only.serialize(serializer);
            }
        }
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for json_type in &self.0 {
            seq.serialize_element(json_type)?;
        }
        seq.end()
    }
}

/// Object shape observed across one or more values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectShape {
    /// Member schemas by name
    pub properties: BTreeMap<String, InferredSchema>,
    /// Members present in every observed object
    pub required: BTreeSet<String>,
}

/// Schema inferred from example values
///
/// Built by [`SchemaInferrer`](super::SchemaInferrer) and widened with
/// [`InferredSchema::merge`]; converted to a plain JSON schema document with
/// [`InferredSchema::to_json`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InferredSchema {
    /// Allowed types
    pub types: TypeSet,
    /// Object members, if any object was observed
    pub object: Option<ObjectShape>,
    /// Shared element schema, if any non-empty array was observed
    pub items: Option<Box<InferredSchema>>,
    /// Emit `required` lists when serializing
    pub(crate) emit_required: bool,
}

impl InferredSchema {
    /// Create a schema allowing a single type
    pub fn new(json_type: JsonType) -> Self {
        Self {
            types: TypeSet::single(json_type),
            object: None,
            items: None,
            emit_required: true,
        }
    }

    /// Widen this schema so it also accepts everything `other` accepts
    ///
    /// Types are united, object members merged by name (a member is only
    /// required if both sides require it) and array item schemas merged.
    pub fn merge(&mut self, other: &InferredSchema) {
        self.types.extend(&other.types);

        self.object = match (self.object.take(), &other.object) {
            (Some(mut mine), Some(theirs)) => {
                for (key, schema) in &theirs.properties {
                    match mine.properties.get_mut(key) {
                        Some(existing) => existing.merge(schema),
                        None => {
                            mine.properties.insert(key.clone(), schema.clone());
                        }
                    }
                }
                mine.required = mine
                    .required
                    .intersection(&theirs.required)
                    .cloned()
                    .collect();
                Some(mine)
            }
            (Some(mine), None) => Some(mine),
            (None, Some(theirs)) => Some(theirs.clone()),
            (None, None) => None,
        };

        self.items = match (self.items.take(), &other.items) {
            (Some(mut mine), Some(theirs)) => {
                mine.merge(theirs);
                Some(mine)
            }
            (Some(mine), None) => Some(mine),
            (None, Some(theirs)) => Some(theirs.clone()),
            (None, None) => None,
        };
    }

    /// Get a member schema (objects only)
    pub fn property(&self, name: &str) -> Option<&InferredSchema> {
        self.object.as_ref().and_then(|o| o.properties.get(name))
    }

    /// Whether a member is required (objects only)
    pub fn is_required(&self, name: &str) -> bool {
        self.object
            .as_ref()
            .is_some_and(|o| o.required.contains(name))
    }

    /// Convert to a JSON schema value
    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl Serialize for InferredSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if !self.types.is_empty() {
            map.serialize_entry("type", &self.types)?;
        }
        if let Some(object) = &self.object {
            map.serialize_entry("properties", &object.properties)?;
            // Draft-04 rejects an empty `required` array
            if self.emit_required && !object.required.is_empty() {
                map.serialize_entry("required", &object.required)?;
            }
        }
        if let Some(items) = &self.items {
            map.serialize_entry("items", items)?;
        }
        map.end()
    }
}
