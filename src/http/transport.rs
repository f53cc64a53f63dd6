//! HTTP transport
//!
//! The session hands a fully merged [`Request`] and its resolved URL to a
//! [`Transport`], which performs exactly one exchange. There is no retry
//! logic: connection failures, timeouts and TLS errors propagate unchanged.

use super::types::{Exchange, Headers, RawExchange, Request};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use reqwest::{Client, Identity, Proxy};
use std::time::Instant;
use tracing::{debug, warn};
use url::Url;

/// Performs a single HTTP exchange
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` to `url` and return what came back
    async fn send(&self, url: &Url, request: &Request) -> Result<Exchange>;
}

/// Transport backed by `reqwest`
///
/// Redirect policy, proxies, client certificates and TLS verification are
/// client-level settings in reqwest, so a client is built per exchange.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    user_agent: String,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestTransport {
    /// Create a transport with the default user agent
    pub fn new() -> Self {
        Self {
            user_agent: format!("rest-instance/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the user agent sent when the request has none
    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub(crate) fn build_client(&self, request: &Request) -> Result<Client> {
        let mut builder = Client::builder()
            .user_agent(&self.user_agent)
            .redirect(if request.redirects {
                Policy::default()
            } else {
                Policy::none()
            });

        if !request.ssl_verify {
            warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(timeout) = &request.timeout {
            builder = builder
                .connect_timeout(timeout.connect_duration()?)
                .read_timeout(timeout.read_duration()?);
        }

        for (scheme, proxy_url) in &request.proxies {
            let proxy = match scheme.as_str() {
                "http" => Proxy::http(proxy_url)?,
                "https" => Proxy::https(proxy_url)?,
                "all" => Proxy::all(proxy_url)?,
                other => {
                    return Err(Error::config(format!(
                        "Unknown proxy scheme '{other}', expected http, https or all"
                    )))
                }
            };
            builder = builder.proxy(proxy);
        }

        if let Some(cert) = &request.cert {
            let mut pem = std::fs::read(&cert.cert)?;
            if let Some(key) = &cert.key {
                pem.push(b'\n');
                pem.extend(std::fs::read(key)?);
            }
            builder = builder.identity(Identity::from_pem(&pem)?);
        }

        Ok(builder.build()?)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, url: &Url, request: &Request) -> Result<Exchange> {
        let client = self.build_client(request)?;

        let mut builder = client.request(request.method.into(), url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let query = request.query_pairs();
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if !request.body.is_null() {
            builder = builder.json(&request.body);
        }
        if let Some(auth) = &request.auth {
            builder = builder.basic_auth(&auth.username, Some(&auth.password));
        }

        let http_request = builder.build()?;
        let sent_url = http_request.url().clone();
        let request_headers = header_map(http_request.headers());

        debug!("Dispatching {} {}", request.method, sent_url);
        let started = Instant::now();
        let response = client.execute(http_request).await?;
        let status = response.status().as_u16();
        let response_headers = header_map(response.headers());
        let response_body = response.text().await?;
        let elapsed = started.elapsed();
        debug!("Received {status} from {sent_url} in {elapsed:?}");

        Ok(Exchange {
            elapsed,
            raw: RawExchange {
                method: request.method,
                url: sent_url,
                request_headers,
                request_body: (!request.body.is_null()).then(|| request.body.clone()),
                status,
                response_headers,
                response_body,
            },
        })
    }
}

/// Collapse a header map to one string per name
fn header_map(headers: &HeaderMap) -> Headers {
    let mut map = Headers::new();
    for (name, value) in headers {
        let text = String::from_utf8_lossy(value.as_bytes()).into_owned();
        match map.get_mut(name.as_str()) {
            Some(existing) => {
                existing.push_str(", ");
                existing.push_str(&text);
            }
            None => {
                map.insert(name.as_str().to_string(), text);
            }
        }
    }
    map
}
