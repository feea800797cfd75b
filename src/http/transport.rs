//! reqwest-backed request execution
//!
//! Executes a [`RequestSpec`] and returns the parsed JSON body.
//! Non-2xx responses become [`Error::HttpStatus`] carrying the raw body so
//! that callers can inspect structured error payloads.

use super::request::{RequestBody, RequestSpec};
use crate::error::{Error, Result};
use crate::types::{JsonValue, StringMap};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            default_headers: StringMap::new(),
            user_agent: format!("salesforce-cdk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TransportConfig {
    /// Create a new config builder
    pub fn builder() -> TransportConfigBuilder {
        TransportConfigBuilder::default()
    }
}

/// Builder for transport config
#[derive(Default)]
pub struct TransportConfigBuilder {
    config: TransportConfig,
}

impl TransportConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> TransportConfig {
        self.config
    }
}

/// Executes requests over HTTP
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(TransportConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: TransportConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the transport configuration
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Send a request and parse the JSON response.
    ///
    /// An empty response body (e.g. `204 No Content`) yields `Value::Null`.
    pub async fn execute(&self, spec: RequestSpec) -> Result<JsonValue> {
        let url = Url::parse(&spec.uri)?;
        let method = spec.method;

        let mut req = self.client.request(method.into(), url);

        // Request headers win over defaults of the same name
        for (key, value) in &self.config.default_headers {
            if spec.headers.keys().any(|k| k.eq_ignore_ascii_case(key)) {
                continue;
            }
            req = req.header(key.as_str(), value.as_str());
        }

        for (key, value) in &spec.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !spec.query.is_empty() {
            req = req.query(&spec.query);
        }

        req = match &spec.body {
            Some(RequestBody::Json(body)) => req.json(body),
            Some(RequestBody::Form(fields)) => req.form(fields),
            None => req,
        };

        if let Some(timeout) = spec.timeout {
            req = req.timeout(timeout);
        }

        debug!(%method, uri = %spec.uri, "Sending request");
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(%method, uri = %spec.uri, status = status.as_u16(), "Request failed");
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!(%method, uri = %spec.uri, status = status.as_u16(), "Request succeeded");
        if body.trim().is_empty() {
            return Ok(JsonValue::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}
