//! Type assertion arguments
//!
//! Type assertions (`integer`, `string`, ...) take positional enum literals
//! and named validation keywords. This module checks the keywords against the
//! keyword table, coerces every argument to the type it must have and merges
//! the result into a schema node.
//!
//! Keyword checks and coercion run before the field path is resolved, so a
//! misspelled keyword fails without touching the schema.

mod args;
mod coerce;

pub use args::{AssertArgs, Prepared};
pub use coerce::{coerce_argument, coerce_literal};
