//! API specification checks
//!
//! When a session has a spec target, every exchange is checked against it
//! before anything else happens to the response. The check itself is behind
//! the [`SpecValidator`] trait; [`OpenApiValidator`] covers declared paths,
//! methods and response codes of OpenAPI 2 and 3 documents.

mod openapi;

pub use openapi::OpenApiValidator;

use crate::error::Result;
use crate::http::RawExchange;

/// Checks an exchange against an API specification
pub trait SpecValidator: Send + Sync {
    /// Fail with `SpecValidation` if the exchange does not conform to `spec`
    fn validate(&self, spec: &str, exchange: &RawExchange) -> Result<()>;
}

#[cfg(test)]
mod tests;
