//! JSON Schema validation
//!
//! Validates observed values against schema nodes using the configured
//! JSON Schema draft (Draft-04 only for now).

mod validator;

pub use validator::Validator;

#[cfg(test)]
mod tests;
