// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # rest-instance
//!
//! The assertion core of an HTTP API test tool. Every call is recorded as an
//! instance holding the request, the response and a snapshot of a JSON
//! Schema that grows as the test asserts on fields it has never seen.
//!
//! ## Features
//!
//! - **Schema Inference**: Draft-04 schemas generalized from observed values
//! - **Field Paths**: `response body users 0 id` resolves the value and its
//!   schema node together, extending the schema on demand
//! - **Type Assertions**: `integer`, `string`, ... with enum values and
//!   validation keywords checked against a per-type keyword table
//! - **Regression Checks**: Declared request/response shapes every later call
//!   must keep conforming to
//! - **Spec Validation**: Exchanges checked against OpenAPI 2/3 documents
//! - **Export**: Instances written as indented JSON
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rest_instance::{AssertArgs, CallOptions, Session, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut session = Session::with_url("https://api.example.com")?;
//!
//!     session.get("/users/1", CallOptions::new()).await?;
//!     session.integer("response status", AssertArgs::new().value(200))?;
//!     session.string("response body email", AssertArgs::new().with("format", "email"))?;
//!     session.missing("response body password")?;
//!
//!     session.rest_instances(None)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           Session                               │
//! │  verbs → record Instance      assertions → last Instance        │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌───────────┬──────────┬───────┴──────┬────────────┬─────────────┐
//! │   HTTP    │   Spec   │    Schema    │    Path    │  Validate   │
//! ├───────────┼──────────┼──────────────┼────────────┼─────────────┤
//! │ Transport │ OpenAPI  │ Inference    │ FieldPath  │ Draft-04    │
//! │ Request   │ 2 and 3  │ Store        │ Resolver   │             │
//! │ Response  │          │ Keywords     │            │             │
//! └───────────┴──────────┴──────────────┴────────────┴─────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document error variant fields

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Schema inference, schema store and keyword table
pub mod schema;

/// Field path resolution
pub mod path;

/// JSON Schema validation
pub mod validate;

/// Type assertion arguments
pub mod assertion;

/// Request/response records and the HTTP transport
pub mod http;

/// API specification checks
pub mod spec;

/// Test session and exchange recording
pub mod session;

/// JSON input helper
pub mod input;

/// JSON export
pub mod output;

/// Session configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use assertion::AssertArgs;
pub use config::SessionConfig;
pub use http::{CallOptions, Request, Response, Timeout};
pub use path::FieldPath;
pub use schema::{infer_schema, SchemaInferrer, SchemaStore};
pub use session::{Instance, Session};
pub use validate::Validator;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
