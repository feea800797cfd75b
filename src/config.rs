//! Client configuration
//!
//! The authentication method and REST API version are explicit values
//! handed to the client. They can be written in YAML/JSON next to the rest
//! of a host's settings, or the authentication method can be resolved once
//! per top-level call from the host's `authentication` parameter.

use crate::error::{Error, Result};
use crate::host::HostCapabilities;
use crate::types::{AuthenticationMethod, JsonValue, API_VERSION, AUTHENTICATION_PARAMETER};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Settings for a [`SalesforceClient`](crate::client::SalesforceClient)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Authentication flow used for every request
    #[serde(default)]
    pub authentication: AuthenticationMethod,

    /// REST API version segment, e.g. `v39.0`
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(AuthenticationMethod::default())
    }
}

impl ClientConfig {
    /// Create a config for the given authentication method and the default
    /// API version
    pub fn new(authentication: AuthenticationMethod) -> Self {
        Self {
            authentication,
            api_version: default_api_version(),
        }
    }

    /// Target a different REST API version
    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Parse a config from YAML
    ///
    /// ```
    /// use salesforce_cdk::config::ClientConfig;
    /// use salesforce_cdk::types::AuthenticationMethod;
    ///
    /// let config = ClientConfig::from_yaml_str("authentication: jwt").unwrap();
    /// assert_eq!(config.authentication, AuthenticationMethod::Jwt);
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a config from a JSON value
    pub fn from_json(value: JsonValue) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Read the authentication method from the host's parameters.
    ///
    /// A missing parameter selects the OAuth2 web flow.
    pub fn resolve(host: &dyn HostCapabilities) -> Result<Self> {
        let Some(value) = host.get_parameter(AUTHENTICATION_PARAMETER) else {
            return Ok(Self::default());
        };

        let authentication: AuthenticationMethod =
            serde_json::from_value(value.clone()).map_err(|_| {
                Error::invalid_value(
                    AUTHENTICATION_PARAMETER,
                    format!("expected \"oAuth2\" or \"jwt\", got {value}"),
                )
            })?;

        debug!(?authentication, "Resolved authentication method");
        Ok(Self::new(authentication))
    }
}
