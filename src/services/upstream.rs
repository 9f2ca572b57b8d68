use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::UpstreamSettings;

/// Errors that can occur when calling the upstream lookup service
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Splexxo API returned {0}")]
    Status(u16),

    #[error("Request failed: {}", describe(.0))]
    RequestError(#[from] reqwest::Error),

    #[error("Request failed: {0}")]
    InvalidResponse(String),
}

/// Client for the upstream number lookup API
///
/// One GET per lookup, no retries. The timeout covers the whole exchange
/// including reading the body.
pub struct UpstreamClient {
    base_url: String,
    access_key: String,
    client: Client,
}

impl UpstreamClient {
    /// Create a new upstream client
    pub fn new(base_url: String, access_key: String, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            access_key,
            client,
        })
    }

    pub fn from_settings(settings: &UpstreamSettings) -> Result<Self, UpstreamError> {
        Self::new(
            settings.base_url.clone(),
            settings.access_key.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up a number and return the upstream `data` payload verbatim
    ///
    /// A missing `data` field comes back as `Value::Null`.
    pub async fn lookup(&self, number: &str) -> Result<Value, UpstreamError> {
        let url = format!(
            "{}?mobile={}&key={}",
            self.base_url,
            urlencoding::encode(number),
            urlencoding::encode(&self.access_key)
        );

        tracing::debug!("Querying upstream for number: {}", number);

        // Errors carry the URL, which includes the upstream access key
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let json: Value = response.json().await.map_err(reqwest::Error::without_url)?;

        let mut body = match json {
            Value::Object(map) => map,
            other => {
                return Err(UpstreamError::InvalidResponse(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };

        Ok(body.remove("data").unwrap_or(Value::Null))
    }
}

/// Number of records in an upstream `data` payload
///
/// Arrays and objects count their entries and strings their characters.
/// Null, `false` and zero count as no records. Any other boolean or number
/// has no length and yields `None`.
pub fn count_records(data: &Value) -> Option<usize> {
    match data {
        Value::Null | Value::Bool(false) => Some(0),
        Value::Number(n) if n.as_f64() == Some(0.0) => Some(0),
        Value::Bool(true) | Value::Number(_) => None,
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
    }
}

/// Error text followed by its sources, e.g. `error sending request: operation timed out`
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
