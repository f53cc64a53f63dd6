//! Field path resolution
//!
//! Resolves whitespace-separated field paths (`response body users 0 id`)
//! against a JSON value and, in lock-step, against the schema describing it.
//!
//! # Overview
//!
//! - `FieldPath` - Parsed sequence of member names and array indices
//! - `PathResolver` - Walks value and schema together, growing the schema
//!   with inferred nodes for members it has never seen

mod resolver;
mod types;

pub use resolver::{PathResolver, Resolved, Tracked};
pub use types::FieldPath;
