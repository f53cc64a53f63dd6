//! Output module
//!
//! Writes JSON exports of recorded instances.
//!
//! # Overview
//!
//! - `to_pretty_json` - Four-space indented JSON with non-ASCII kept literal
//! - `write_json` - Writes that text to a file, or to stdout when no file is
//!   given

mod writer;

pub use writer::{to_pretty_json, write_json};

#[cfg(test)]
mod tests;
