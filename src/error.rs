//! Error types for rest-instance
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Path-resolution and validation errors carry the searched container or the
//! failing schema as JSON values. `Display` stays one line; callers that want
//! the full dump use [`Error::context_dump`].

use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for rest-instance
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unknown JSON Schema version: {version}")]
    UnknownSchemaVersion { version: String },

    #[error("Unknown JSON Schema ({version}) validation keyword '{keyword}' for type '{json_type}'")]
    UnknownValidationKeyword {
        keyword: String,
        json_type: String,
        version: String,
    },

    #[error("Cannot convert {value} to {target}")]
    Coercion { value: String, target: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Path Resolution Errors
    // ============================================================================
    #[error("Expected field '{field}' was not found (property '{key}' does not exist)")]
    FieldNotFound {
        field: String,
        key: String,
        container: Value,
    },

    #[error("Expected index '{field}' did not exist (index '{key}' is out of range)")]
    IndexNotFound {
        field: String,
        key: String,
        container: Value,
    },

    #[error("Expected field '{field}' to be missing, but it exists")]
    UnexpectedField { field: String, value: Value },

    #[error("No instances recorded yet, make a request first")]
    NoInstances,

    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error("Schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        schema: Value,
        value: Value,
    },

    #[error("Spec validation failed: {message}")]
    SpecValidation { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("Error writing JSON to file '{}': {source}", .path.display())]
    ExportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a coercion error
    pub fn coercion(value: impl std::fmt::Display, target: impl Into<String>) -> Self {
        Self::Coercion {
            value: value.to_string(),
            target: target.into(),
        }
    }

    /// Create a spec validation error
    pub fn spec(message: impl Into<String>) -> Self {
        Self::SpecValidation {
            message: message.into(),
        }
    }

    /// Whether this error is a failed expectation about the exchange,
    /// as opposed to a setup or transport problem
    pub fn is_assertion_failure(&self) -> bool {
        matches!(
            self,
            Error::FieldNotFound { .. }
                | Error::IndexNotFound { .. }
                | Error::UnexpectedField { .. }
                | Error::SchemaValidation { .. }
                | Error::SpecValidation { .. }
        )
    }

    /// Whether this error is a configuration problem detected before any
    /// validation work
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::Config { .. }
                | Error::UnknownSchemaVersion { .. }
                | Error::UnknownValidationKeyword { .. }
                | Error::Coercion { .. }
        )
    }

    /// Pretty JSON of the context attached to this error: the searched
    /// container for lookups, the schema for validation failures
    pub fn context_dump(&self) -> Option<String> {
        let context = match self {
            Error::FieldNotFound { container, .. } | Error::IndexNotFound { container, .. } => {
                container
            }
            Error::UnexpectedField { value, .. } => value,
            Error::SchemaValidation { schema, .. } => schema,
            _ => return None,
        };
        serde_json::to_string_pretty(context).ok()
    }
}

/// Result type alias for rest-instance
pub type Result<T> = std::result::Result<T, Error>;
