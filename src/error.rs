//! Error types for Salesforce CDK
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// The main error type for Salesforce CDK
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Invalid or incomplete setup
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong
        message: String,
    },

    /// A stored credential lacks a required field
    #[error("Missing field '{field}' in {credentials_type} credentials")]
    MissingCredentialField {
        /// Credential type name, e.g. `salesforceJwtApi`
        credentials_type: String,
        /// Name of the missing field
        field: String,
    },

    /// A config or credential value has the wrong shape
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue {
        /// Name of the offending field
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// YAML config could not be parsed
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON could not be parsed
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    /// Authentication could not proceed
    #[error("Authentication failed: {message}")]
    Auth {
        /// Reason
        message: String,
    },

    /// The JWT assertion could not be signed
    #[error("JWT generation failed: {message}")]
    JwtGeneration {
        /// Reason
        message: String,
    },

    /// The token endpoint answered with a non-2xx status
    #[error("Token exchange failed with status {status}: {body}")]
    TokenExchange {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Malformed request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Salesforce Errors
    // ============================================================================
    /// Structured Salesforce error response
    #[error("Salesforce error response [{status}]: {message}")]
    Salesforce {
        /// HTTP status code
        status: u16,
        /// `message` of the first reported error
        message: String,
    },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    /// A page did not carry the expected records array
    #[error("Failed to extract records from field '{field}': {message}")]
    RecordExtraction {
        /// Name of the records field
        field: String,
        /// What was found instead
        message: String,
    },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Any other failure
    #[error("{0}")]
    Other(String),

    /// Failure raised by a host implementation
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing credential field error
    pub fn missing_field(credentials_type: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingCredentialField {
            credentials_type: credentials_type.into(),
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a record extraction error
    pub fn record_extraction(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RecordExtraction {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Rewrite a structured Salesforce error body into [`Error::Salesforce`].
    ///
    /// Salesforce reports REST failures as a JSON array of
    /// `{ "message", "errorCode", ... }` objects. When the failed response
    /// carries such a body, only the status and the first message are kept.
    /// Every other error, token exchange failures included, is returned
    /// unchanged.
    pub fn prettify(self) -> Self {
        let structured = match &self {
            Self::HttpStatus { status, body } => {
                first_error_message(body).map(|message| (*status, message))
            }
            _ => None,
        };

        match structured {
            Some((status, message)) => {
                debug!(status, "Rewriting structured Salesforce error response");
                Self::Salesforce { status, message }
            }
            None => self,
        }
    }
}

/// Extract `body[0].message` from a Salesforce error payload
fn first_error_message(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    parsed
        .as_array()?
        .first()?
        .get("message")?
        .as_str()
        .map(String::from)
}

/// Result type alias for Salesforce CDK
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure, evaluated only on failure
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Other(format!("{}: {}", message.into(), e.into())))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::Other(format!("{}: {}", f(), e.into())))
    }
}
