//! Host capabilities
//!
//! The workflow host owns credential storage, request execution and the
//! OAuth2 token lifecycle. This crate only shapes requests and reaches the
//! host through [`HostCapabilities`].
//!
//! [`StaticHost`] is a self-contained implementation over [`HttpTransport`]
//! with in-memory credentials and parameters.

use crate::error::{Error, Result};
use crate::http::{HttpTransport, RequestSpec};
use crate::types::{JsonObject, JsonValue};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

/// Capabilities a workflow host provides to the Salesforce client
#[async_trait]
pub trait HostCapabilities: Send + Sync {
    /// Execute a request exactly as described
    async fn http_request(&self, request: RequestSpec) -> Result<JsonValue>;

    /// Execute a request authenticated with the host-managed OAuth2 token
    /// stored under `credentials_type`. The host attaches and refreshes the
    /// token itself.
    async fn http_request_oauth2(
        &self,
        credentials_type: &str,
        request: RequestSpec,
    ) -> Result<JsonValue>;

    /// Look up stored credentials by type name
    async fn get_credentials(&self, credentials_type: &str) -> Result<JsonObject>;

    /// Look up a parameter of the current invocation
    fn get_parameter(&self, name: &str) -> Option<JsonValue>;
}

/// In-memory host backed by a real HTTP transport
#[derive(Debug, Clone)]
pub struct StaticHost {
    transport: HttpTransport,
    credentials: HashMap<String, JsonValue>,
    parameters: HashMap<String, JsonValue>,
}

impl StaticHost {
    /// Create a host with no credentials or parameters
    pub fn new(transport: HttpTransport) -> Self {
        Self {
            transport,
            credentials: HashMap::new(),
            parameters: HashMap::new(),
        }
    }

    /// Register credentials under a type name. Lookups fail unless `data`
    /// is a JSON object.
    #[must_use]
    pub fn with_credentials(mut self, credentials_type: impl Into<String>, data: JsonValue) -> Self {
        self.credentials.insert(credentials_type.into(), data);
        self
    }

    /// Set an invocation parameter
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: JsonValue) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }
}

#[async_trait]
impl HostCapabilities for StaticHost {
    async fn http_request(&self, request: RequestSpec) -> Result<JsonValue> {
        self.transport.execute(request).await
    }

    async fn http_request_oauth2(
        &self,
        credentials_type: &str,
        request: RequestSpec,
    ) -> Result<JsonValue> {
        let credentials = self.get_credentials(credentials_type).await?;
        let token = credentials
            .get("oauthTokenData")
            .and_then(|data| data.get("access_token"))
            .and_then(JsonValue::as_str)
            .ok_or_else(|| {
                Error::auth(format!(
                    "No OAuth2 access token stored for {credentials_type}"
                ))
            })?;

        debug!(credentials_type, "Sending request with stored OAuth2 token");
        self.transport.execute(request.with_bearer(token)).await
    }

    async fn get_credentials(&self, credentials_type: &str) -> Result<JsonObject> {
        match self.credentials.get(credentials_type) {
            Some(JsonValue::Object(object)) => Ok(object.clone()),
            Some(_) => Err(Error::invalid_value(
                credentials_type,
                "stored credentials must be a JSON object",
            )),
            None => Err(Error::config(format!(
                "No credentials of type {credentials_type}"
            ))),
        }
    }

    fn get_parameter(&self, name: &str) -> Option<JsonValue> {
        self.parameters.get(name).cloned()
    }
}
