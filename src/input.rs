//! JSON input helper
//!
//! Turns what a test author typed into a JSON value: the contents of a JSON
//! file, inline JSON text, or failing both, the text itself as a string.

use crate::error::Result;
use crate::types::JsonValue;
use std::path::Path;
use tracing::debug;

/// Read a value given as a file path or JSON text
///
/// Non-string values pass through unchanged. A string naming an existing file
/// is read and must hold valid JSON; other strings are parsed as JSON and kept
/// as plain strings when that fails.
pub fn input(what: &JsonValue) -> Result<JsonValue> {
    match what {
        JsonValue::String(text) => input_str(text),
        other => Ok(other.clone()),
    }
}

/// String form of [`input`]
pub fn input_str(text: &str) -> Result<JsonValue> {
    let trimmed = text.trim();
    if !trimmed.is_empty() && Path::new(trimmed).is_file() {
        debug!("Reading JSON input from file '{trimmed}'");
        let contents = std::fs::read_to_string(trimmed)?;
        return Ok(serde_json::from_str(&contents)?);
    }
    Ok(serde_json::from_str(text).unwrap_or_else(|_| JsonValue::String(text.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_inline_json() {
        assert_eq!(input_str(r#"{"a": [1, 2]}"#).unwrap(), json!({"a": [1, 2]}));
        assert_eq!(input_str("42").unwrap(), json!(42));
        assert_eq!(input_str("null").unwrap(), json!(null));
    }

    #[test]
    fn test_plain_text_kept_as_string() {
        assert_eq!(input_str("hello world").unwrap(), json!("hello world"));
        assert_eq!(input_str("").unwrap(), json!(""));
    }

    #[test]
    fn test_non_string_passes_through() {
        let value = json!({"id": 1});
        assert_eq!(input(&value).unwrap(), value);
    }

    #[test]
    fn test_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"name": "alice"}"#).unwrap();
        let path = file.path().to_string_lossy().into_owned();

        assert_eq!(input(&json!(path)).unwrap(), json!({"name": "alice"}));
    }

    #[test]
    fn test_invalid_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        assert!(matches!(input_str(&path), Err(Error::JsonParse(_))));
    }
}
