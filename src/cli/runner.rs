//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::http::{CallOptions, Headers};
use crate::input::input_str;
use crate::output::to_pretty_json;
use crate::schema::infer_schema;
use crate::session::Session;
use crate::types::{JsonValue, Method};
use crate::validate::Validator;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Call {
                method,
                endpoint,
                url,
                query,
                body,
                headers,
                expect_response,
                spec,
                output,
            } => {
                let request = CallRequest {
                    method: method.parse()?,
                    endpoint,
                    url: url.as_deref(),
                    query: query.as_deref(),
                    body: body.as_deref(),
                    headers,
                    expect_response: expect_response.as_deref(),
                    spec: spec.as_deref(),
                    output: output.as_deref(),
                };
                self.call(request).await
            }
            Commands::Infer { input } => self.infer(input),
            Commands::Validate { schema, input } => self.validate(schema, input),
        }
    }

    /// Load the session config, or the defaults when no file is given
    fn load_config(&self) -> Result<SessionConfig> {
        match &self.cli.config {
            Some(path) => SessionConfig::from_file(path),
            None => Ok(SessionConfig::default()),
        }
    }

    /// Perform one exchange and export the session
    async fn call(&self, request: CallRequest<'_>) -> Result<()> {
        let mut config = self.load_config()?;
        if let Some(url) = request.url {
            config.url = url.to_string();
        }
        if let Some(spec) = request.spec {
            config.spec = Some(spec.to_string());
        }

        let mut session = Session::new(config)?;
        session.set_headers(parse_headers(request.headers)?);
        if let Some(expectation) = request.expect_response {
            session.expect_response(&JsonValue::String(expectation.to_string()))?;
        }

        let mut options = CallOptions::new();
        if let Some(query) = request.query {
            match input_str(query)? {
                JsonValue::Object(map) => options = options.query(map),
                other => {
                    return Err(Error::config(format!(
                        "Query must be a JSON object, got {other}"
                    )))
                }
            }
        }
        if let Some(body) = request.body {
            options = options.body(input_str(body)?);
        }

        let response = if request.method == Method::GET {
            session.get(request.endpoint, options).await?
        } else {
            session
                .request(request.method, request.endpoint, options)
                .await?
                .response
                .clone()
        };
        info!("{} {} -> {}", request.method, request.endpoint, response.status);

        session.rest_instances(request.output)?;
        Ok(())
    }

    /// Print the schema inferred from a value
    fn infer(&self, source: &str) -> Result<()> {
        let value = read_input(source)?;
        println!("{}", to_pretty_json(&infer_schema(&value))?);
        Ok(())
    }

    /// Validate a value against a schema file
    fn validate(&self, schema: &Path, source: &str) -> Result<()> {
        let schema: JsonValue = serde_json::from_str(&std::fs::read_to_string(schema)?)?;
        let value = read_input(source)?;
        Validator::default().assert_schema(&schema, &value)?;
        println!("Valid");
        Ok(())
    }
}

/// Arguments of the `call` command
struct CallRequest<'a> {
    method: Method,
    endpoint: &'a str,
    url: Option<&'a str>,
    query: Option<&'a str>,
    body: Option<&'a str>,
    headers: &'a [String],
    expect_response: Option<&'a str>,
    spec: Option<&'a str>,
    output: Option<&'a Path>,
}

/// Read a value from stdin (`-`), a JSON file or inline JSON
fn read_input(source: &str) -> Result<JsonValue> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return input_str(&text);
    }
    input_str(source)
}

/// Parse `Name: value` header arguments
fn parse_headers(raw: &[String]) -> Result<Headers> {
    raw.iter()
        .map(|header| {
            let (name, value) = header.split_once(':').ok_or_else(|| {
                Error::config(format!("Header '{header}' is not 'Name: value'"))
            })?;
            Ok((name.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headers() {
        let raw = ["X-Trace: 1".to_string(), "Accept:text/plain".to_string()];
        let headers = parse_headers(&raw).unwrap();
        assert_eq!(headers["X-Trace"], "1");
        assert_eq!(headers["Accept"], "text/plain");

        assert!(parse_headers(&["broken".to_string()]).is_err());
    }

    #[test]
    fn test_read_inline_input() {
        assert_eq!(read_input("[1, 2]").unwrap(), serde_json::json!([1, 2]));
    }
}
