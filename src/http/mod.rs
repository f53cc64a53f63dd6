//! HTTP module
//!
//! Request and response records plus the transport that performs exchanges.
//!
//! # Features
//!
//! - **Request Template**: Defaults merged with per-call overrides
//! - **Transport Trait**: One exchange per call, errors propagate unchanged
//! - **Reqwest Transport**: Basic auth, client certificates, proxies,
//!   connect/read timeouts, redirect and TLS verification switches
//! - **Endpoint Normalization**: Relative endpoints joined onto the base URL

mod endpoint;
mod transport;
mod types;

pub use endpoint::{normalize_endpoint, split_query};
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    BasicAuth, CallOptions, ClientCert, Exchange, Headers, RawExchange, Request, Response,
    Timeout, Timestamp,
};

#[cfg(test)]
mod tests;
