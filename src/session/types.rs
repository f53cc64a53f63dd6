//! Recorded exchange types

use crate::error::Result;
use crate::http::{Request, Response};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// One recorded exchange
///
/// `schema` is a deep copy of the session schema taken when the exchange was
/// recorded, refreshed with the shapes observed in it. Later calls never
/// change it; assertions on this instance only extend it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Request as sent
    pub request: Request,
    /// Response as received
    pub response: Response,
    /// Schema snapshot
    pub schema: JsonValue,
    /// API spec the exchange was checked against
    pub spec: Option<String>,
}

impl Instance {
    /// The value field paths resolve against: `{request, response}`
    pub fn subject(&self) -> Result<JsonValue> {
        Ok(json!({
            "request": serde_json::to_value(&self.request)?,
            "response": serde_json::to_value(&self.response)?,
        }))
    }

    /// Whether assertions stamp examples into this instance's schema
    pub fn exampled(&self) -> bool {
        self.schema
            .get("exampled")
            .and_then(JsonValue::as_bool)
            .unwrap_or(false)
    }
}
