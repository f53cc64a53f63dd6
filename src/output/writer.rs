//! JSON export writer

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

const INDENT: &[u8] = b"    ";

/// Render a value as JSON indented by four spaces
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Path reported for export failures on stdout
const STDOUT: &str = "-";

/// Write a value as indented JSON to `file`, or to stdout when `None`
///
/// Any failure to create or write the target is an `ExportIo` error.
pub fn write_json<T: Serialize + ?Sized>(value: &T, file: Option<&Path>) -> Result<()> {
    let text = to_pretty_json(value)?;
    let Some(path) = file else {
        let line = format!("{text}\n");
        return write_text(&mut io::stdout().lock(), &line, Path::new(STDOUT));
    };

    let mut out = File::create(path).map_err(|source| export_error(path, source))?;
    write_text(&mut out, &text, path)?;
    debug!("Wrote {} bytes of JSON to {}", text.len(), path.display());
    Ok(())
}

pub(super) fn write_text(out: &mut impl Write, text: &str, path: &Path) -> Result<()> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|source| export_error(path, source))
}

fn export_error(path: &Path, source: io::Error) -> Error {
    Error::ExportIo {
        path: path.to_path_buf(),
        source,
    }
}
