//! Tests for output module

use super::writer::write_text;
use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::tempdir;

#[test]
fn test_four_space_indent() {
    let text = to_pretty_json(&json!({"a": [1]})).unwrap();
    assert_eq!(text, "{\n    \"a\": [\n        1\n    ]\n}");
}

#[test]
fn test_non_ascii_kept_literal() {
    let text = to_pretty_json(&json!({"name": "Jürgen 東京"})).unwrap();
    assert!(text.contains("Jürgen 東京"));
}

#[test]
fn test_write_to_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.json");

    write_json(&json!({"status": 200}), Some(&path)).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, json!({"status": 200}));
}

#[test]
fn test_write_to_missing_directory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no/such/dir/out.json");

    let err = write_json(&json!(1), Some(&path)).unwrap_err();
    match err {
        Error::ExportIo { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("expected ExportIo, got {other:?}"),
    }
}

struct BrokenPipe;

impl std::io::Write for BrokenPipe {
    fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_stream_write_failure_is_export_error() {
    let err = write_text(&mut BrokenPipe, "{}", std::path::Path::new("-")).unwrap_err();
    match err {
        Error::ExportIo { path, source } => {
            assert_eq!(path, std::path::PathBuf::from("-"));
            assert_eq!(source.kind(), std::io::ErrorKind::BrokenPipe);
        }
        other => panic!("expected ExportIo, got {other:?}"),
    }
}
