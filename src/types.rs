//! Common types used throughout Salesforce CDK
//!
//! This module contains shared type definitions, type aliases,
//! and the small enums that select API behavior.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Constants
// ============================================================================

/// REST API version every data request is scoped to
pub const API_VERSION: &str = "v39.0";

/// Production login host
pub const PRODUCTION_AUTH_URL: &str = "https://login.salesforce.com";

/// Sandbox login host
pub const SANDBOX_AUTH_URL: &str = "https://test.salesforce.com";

/// Credential type holding JWT bearer flow secrets
pub const JWT_CREDENTIALS_TYPE: &str = "salesforceJwtApi";

/// Credential type managed by the host's OAuth2 helper
pub const OAUTH2_CREDENTIALS_TYPE: &str = "salesforceOAuth2Api";

/// Host parameter that selects the authentication method
pub const AUTHENTICATION_PARAMETER: &str = "authentication";

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// Read a resource or run a query
    #[default]
    GET,
    /// Create a record
    POST,
    /// Upsert by external ID
    PUT,
    /// Update a record
    PATCH,
    /// Delete a record
    DELETE,
}

impl Method {
    /// Whether requests with this method may carry a body
    pub fn allows_body(self) -> bool {
        !matches!(self, Method::GET)
    }

    /// Upper-case method name
    pub fn as_str(self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// Authentication Method
// ============================================================================

/// Which OAuth2-family flow authenticates API requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AuthenticationMethod {
    /// Web server flow; token lifecycle owned by the host
    #[default]
    #[serde(rename = "oAuth2")]
    OAuth2,
    /// JWT bearer flow with a signed assertion per request
    #[serde(rename = "jwt")]
    Jwt,
}

impl AuthenticationMethod {
    /// Credential type the host stores for this method
    pub fn credentials_type(self) -> &'static str {
        match self {
            AuthenticationMethod::OAuth2 => OAUTH2_CREDENTIALS_TYPE,
            AuthenticationMethod::Jwt => JWT_CREDENTIALS_TYPE,
        }
    }
}

// ============================================================================
// Environment
// ============================================================================

/// Salesforce org environment for the JWT flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// `login.salesforce.com`
    #[default]
    Production,
    /// `test.salesforce.com`
    Sandbox,
}

impl Environment {
    /// Login host used as token endpoint and assertion audience
    pub fn auth_url(self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_AUTH_URL,
            Environment::Sandbox => SANDBOX_AUTH_URL,
        }
    }

    /// Parse a stored environment value. Anything but `sandbox` is production.
    pub fn from_value(value: &str) -> Self {
        if value == "sandbox" {
            Environment::Sandbox
        } else {
            Environment::Production
        }
    }
}
