//! CLI module
//!
//! Command-line interface around a session.
//!
//! # Commands
//!
//! - `call` - Perform one exchange and export the recorded instances
//! - `infer` - Print the schema inferred from a JSON value
//! - `validate` - Validate a JSON value against a Draft-04 schema

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
