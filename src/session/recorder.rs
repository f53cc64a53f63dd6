//! Exchange recording
//!
//! Every verb merges its overrides onto a copy of the default request,
//! sends it and turns the exchange into an [`Instance`]:
//!
//! 1. API-spec check, when a target is set
//! 2. Response normalization (JSON body, raw text as fallback)
//! 3. Schema snapshot
//! 4. Regression check against declared request/response shapes
//! 5. Fresh inference of the body and query shapes
//! 6. Example stamping, when enabled
//! 7. Append to the history

use super::{Instance, Session};
use crate::error::{Error, Result};
use crate::http::{
    normalize_endpoint, split_query, CallOptions, Exchange, Request, Response, Timestamp,
};
use crate::input::input;
use crate::schema::{SchemaInferrer, Slot};
use crate::types::{JsonObject, JsonValue, Method};
use tracing::{debug, info, warn};

impl Session {
    /// `HEAD` an endpoint
    pub async fn head(&mut self, endpoint: &str, options: CallOptions) -> Result<Response> {
        self.call(Method::HEAD, endpoint, options).await
    }

    /// `OPTIONS` an endpoint
    pub async fn options(&mut self, endpoint: &str, options: CallOptions) -> Result<Response> {
        self.call(Method::OPTIONS, endpoint, options).await
    }

    /// `GET` an endpoint
    ///
    /// A query string in the endpoint is moved into the query map; explicit
    /// query parameters win over it.
    pub async fn get(&mut self, endpoint: &str, mut options: CallOptions) -> Result<Response> {
        let (endpoint, mut query) = split_query(endpoint);
        if let Some(explicit) = options.query.take() {
            query.extend(explicit);
        }
        options.query = Some(query);
        self.call(Method::GET, &endpoint, options).await
    }

    /// `POST` to an endpoint
    pub async fn post(&mut self, endpoint: &str, options: CallOptions) -> Result<Response> {
        self.call(Method::POST, endpoint, options).await
    }

    /// `PUT` to an endpoint
    pub async fn put(&mut self, endpoint: &str, options: CallOptions) -> Result<Response> {
        self.call(Method::PUT, endpoint, options).await
    }

    /// `PATCH` an endpoint
    pub async fn patch(&mut self, endpoint: &str, options: CallOptions) -> Result<Response> {
        self.call(Method::PATCH, endpoint, options).await
    }

    /// `DELETE` an endpoint
    pub async fn delete(&mut self, endpoint: &str, options: CallOptions) -> Result<Response> {
        self.call(Method::DELETE, endpoint, options).await
    }

    async fn call(
        &mut self,
        method: Method,
        endpoint: &str,
        options: CallOptions,
    ) -> Result<Response> {
        let instance = self.request(method, endpoint, options).await?;
        Ok(instance.response.clone())
    }

    /// Send one request and record it
    ///
    /// Transport errors propagate unchanged and nothing is recorded for them.
    pub async fn request(
        &mut self,
        method: Method,
        endpoint: &str,
        options: CallOptions,
    ) -> Result<&Instance> {
        let mut request = self.request.clone();
        request.method = method;
        request.endpoint = endpoint.to_string();
        if let Some(query) = options.query {
            request.query = query;
        }
        if let Some(body) = options.body {
            request.body = input(&body)?;
        }
        if let Some(follow) = options.redirects {
            request.redirects = follow;
        }
        if let Some(timeout) = options.timeout {
            request.timeout = Some(timeout);
        }

        let url = normalize_endpoint(&self.url, &request.endpoint)?;
        request.timestamp = Some(Timestamp::now());
        let exchange = self.transport.send(&url, &request).await?;
        self.instantiate(request, exchange)
    }

    /// Record an exchange as a new instance
    pub fn instantiate(&mut self, request: Request, exchange: Exchange) -> Result<&Instance> {
        if let Some(spec) = &self.spec {
            self.spec_validator.validate(spec, &exchange.raw)?;
        }

        let Exchange { elapsed, raw } = exchange;
        let response = Response {
            status: raw.status,
            seconds: elapsed.as_secs_f64(),
            body: parse_body(&raw.response_body),
            headers: raw.response_headers,
        };

        let mut schema = self.store.snapshot();

        if !self.store.request().is_empty() {
            self.validator
                .validate_schema(self.store.request(), &as_object(&request)?)?;
        }
        if !self.store.response().is_empty() {
            self.validator
                .validate_schema(self.store.response(), &as_object(&response)?)?;
        }

        let inferrer = SchemaInferrer::new();
        let observed = [
            (Slot::RequestBody, inferrer.infer_typed(&request.body)),
            (
                Slot::RequestQuery,
                inferrer.infer_typed(&JsonValue::Object(request.query.clone())),
            ),
            (Slot::ResponseBody, inferrer.infer_typed(&response.body)),
        ];
        for (slot, inferred) in &observed {
            schema[slot.section()][slot.field()] = inferred.to_json();
            self.store.observe(*slot, inferred);
        }

        if self.store.exampled() {
            stamp_examples(&mut schema["response"]["body"], &response.body);
        }

        info!(
            "Recorded instance #{}: {} {} -> {}",
            self.instances.len() + 1,
            request.method,
            raw.url,
            response.status
        );
        self.instances.push(Instance {
            request,
            response,
            schema,
            spec: self.spec.clone(),
        });
        self.last_instance()
    }
}

/// JSON body, or the raw text when it is not JSON
fn parse_body(text: &str) -> JsonValue {
    match serde_json::from_str(text) {
        Ok(body) => body,
        Err(e) => {
            if text.trim().is_empty() {
                debug!("Response body is empty, keeping it as text");
            } else {
                warn!("Response body is not JSON ({e}), keeping it as text");
            }
            JsonValue::String(text.to_string())
        }
    }
}

fn as_object<T: serde::Serialize>(record: &T) -> Result<JsonObject> {
    match serde_json::to_value(record)? {
        JsonValue::Object(map) => Ok(map),
        _ => Err(Error::config("Exchange record did not serialize to an object")),
    }
}

/// Stamp top-level body members, or a whole array body, as examples
fn stamp_examples(schema: &mut JsonValue, body: &JsonValue) {
    match body {
        JsonValue::Object(members) => {
            let Some(properties) = schema
                .get_mut("properties")
                .and_then(JsonValue::as_object_mut)
            else {
                return;
            };
            for (field, value) in members {
                if let Some(JsonValue::Object(node)) = properties.get_mut(field) {
                    node.insert("example".to_string(), value.clone());
                }
            }
        }
        JsonValue::Array(_) => {
            if let JsonValue::Object(node) = schema {
                node.insert("example".to_string(), body.clone());
            }
        }
        _ => {}
    }
}
