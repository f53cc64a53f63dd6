//! Common types used throughout rest-instance
//!
//! This module contains shared type definitions, type aliases,
//! and small enums used across multiple modules.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    HEAD,
    OPTIONS,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl Method {
    /// Upper-case method name as sent on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "OPTIONS" => Ok(Method::OPTIONS),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            other => Err(Error::config(format!("Unsupported HTTP method: {other}"))),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::HEAD => reqwest::Method::HEAD,
            Method::OPTIONS => reqwest::Method::OPTIONS,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// JSON Types
// ============================================================================

/// JSON Schema primitive type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl JsonType {
    /// Type name as written in a schema
    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::Array => "array",
            JsonType::Boolean => "boolean",
            JsonType::Integer => "integer",
            JsonType::Null => "null",
            JsonType::Number => "number",
            JsonType::Object => "object",
            JsonType::String => "string",
        }
    }

    /// The most specific type of a JSON value (whole numbers are integers)
    pub fn of(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => JsonType::Null,
            JsonValue::Bool(_) => JsonType::Boolean,
            JsonValue::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    JsonType::Integer
                } else {
                    JsonType::Number
                }
            }
            JsonValue::String(_) => JsonType::String,
            JsonValue::Array(_) => JsonType::Array,
            JsonValue::Object(_) => JsonType::Object,
        }
    }
}

impl std::fmt::Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Schema Version
// ============================================================================

/// Supported JSON Schema drafts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SchemaVersion {
    #[default]
    Draft04,
}

impl SchemaVersion {
    /// Version tag as stored in the schema document
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaVersion::Draft04 => "draft04",
        }
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "draft04" => Ok(SchemaVersion::Draft04),
            other => Err(Error::UnknownSchemaVersion {
                version: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for SchemaVersion {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SchemaVersion> for String {
    fn from(version: SchemaVersion) -> Self {
        version.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_conversion() {
        let get: reqwest::Method = Method::GET.into();
        assert_eq!(reqwest::Method::GET, get);
        let options: reqwest::Method = Method::OPTIONS.into();
        assert_eq!(reqwest::Method::OPTIONS, options);
    }

    #[test]
    fn test_method_parse() {
        assert_eq!("patch".parse::<Method>().unwrap(), Method::PATCH);
        assert_eq!(Method::default(), Method::GET);
        assert!("TRACE".parse::<Method>().is_err());
    }

    #[test]
    fn test_json_type_of() {
        assert_eq!(JsonType::of(&json!(null)), JsonType::Null);
        assert_eq!(JsonType::of(&json!(true)), JsonType::Boolean);
        assert_eq!(JsonType::of(&json!(3)), JsonType::Integer);
        assert_eq!(JsonType::of(&json!(3.5)), JsonType::Number);
        assert_eq!(JsonType::of(&json!("x")), JsonType::String);
        assert_eq!(JsonType::of(&json!([])), JsonType::Array);
        assert_eq!(JsonType::of(&json!({})), JsonType::Object);
    }

    #[test]
    fn test_schema_version_serde() {
        let version: SchemaVersion = serde_json::from_str("\"draft04\"").unwrap();
        assert_eq!(version, SchemaVersion::Draft04);
        assert_eq!(serde_json::to_string(&version).unwrap(), "\"draft04\"");

        let err = "draft07".parse::<SchemaVersion>().unwrap_err();
        assert!(matches!(err, Error::UnknownSchemaVersion { .. }));
        assert!(serde_json::from_str::<SchemaVersion>("\"draft07\"").is_err());
    }
}
