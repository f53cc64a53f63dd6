//! Schema inference and the session schema document
//!
//! Provides automatic JSON schema inference from observed values and the
//! evolving schema store of a session.
//!
//! # Features
//!
//! - **Type Inference**: Infers a minimal Draft-04 schema from any JSON value
//! - **Structural Generalization**: Array elements of differing shapes merge
//!   into one item schema (type unions, members required only when always present)
//! - **Schema Store**: Declared expectations plus the union of observed shapes
//! - **Keyword Table**: Validation keywords allowed per type and schema version

mod inference;
mod keywords;
mod store;
mod types;

pub use inference::{infer_schema, SchemaInferrer};
pub use keywords::{allowed_keywords, lookup_keyword, ArgKind, Keyword};
pub use store::{SchemaStore, Slot};
pub use types::{InferredSchema, ObjectShape, TypeSet};

#[cfg(test)]
mod tests;
