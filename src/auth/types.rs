//! Credential and token types
//!
//! Credentials arrive from the host as open JSON objects with camelCase
//! keys. Only the fields this crate consumes are parsed.

use crate::error::{Error, Result};
use crate::types::{Environment, JsonObject, JsonValue, JWT_CREDENTIALS_TYPE, OAUTH2_CREDENTIALS_TYPE};
use serde::Deserialize;
use std::fmt;

/// Credentials for the JWT bearer flow
#[derive(Clone, PartialEq, Eq)]
pub struct JwtCredentials {
    /// Connected app consumer key, used as `iss`
    pub client_id: String,
    /// Salesforce username, used as `sub`
    pub username: String,
    /// PEM-encoded RSA private key
    pub private_key: String,
    /// Selects the login host
    pub environment: Environment,
}

impl JwtCredentials {
    /// Parse from the host's credential object
    pub fn from_object(object: &JsonObject) -> Result<Self> {
        let environment = object
            .get("environment")
            .and_then(JsonValue::as_str)
            .map(Environment::from_value)
            .unwrap_or_default();

        Ok(Self {
            client_id: required(object, JWT_CREDENTIALS_TYPE, "clientId")?,
            username: required(object, JWT_CREDENTIALS_TYPE, "username")?,
            private_key: required(object, JWT_CREDENTIALS_TYPE, "privateKey")?,
            environment,
        })
    }
}

impl fmt::Debug for JwtCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtCredentials")
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("private_key", &"<redacted>")
            .field("environment", &self.environment)
            .finish()
    }
}

/// Credentials for the host-managed OAuth2 web flow
#[derive(Clone, PartialEq)]
pub struct OAuth2Credentials {
    /// Token endpoint of the tenant, e.g. `https://acme.salesforce.com/services/oauth2/token`
    pub access_token_url: String,
    /// Connected app consumer key
    pub client_id: Option<String>,
    /// Connected app consumer secret
    pub client_secret: Option<String>,
    /// Token data maintained by the host
    pub oauth_token_data: Option<JsonObject>,
}

impl OAuth2Credentials {
    /// Parse from the host's credential object
    pub fn from_object(object: &JsonObject) -> Result<Self> {
        Ok(Self {
            access_token_url: required(object, OAUTH2_CREDENTIALS_TYPE, "accessTokenUrl")?,
            client_id: optional(object, "clientId"),
            client_secret: optional(object, "clientSecret"),
            oauth_token_data: object
                .get("oauthTokenData")
                .and_then(JsonValue::as_object)
                .cloned(),
        })
    }
}

impl fmt::Debug for OAuth2Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2Credentials")
            .field("access_token_url", &self.access_token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("has_token_data", &self.oauth_token_data.is_some())
            .finish()
    }
}

/// Access token returned by the JWT bearer exchange
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    /// Instance host all data requests go to
    pub instance_url: String,
    /// Bearer token for data requests
    pub access_token: String,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("instance_url", &self.instance_url)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

fn required(object: &JsonObject, credentials_type: &str, field: &str) -> Result<String> {
    object
        .get(field)
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .ok_or_else(|| Error::missing_field(credentials_type, field))
}

fn optional(object: &JsonObject, field: &str) -> Option<String> {
    object
        .get(field)
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
