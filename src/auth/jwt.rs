//! JWT bearer flow
//!
//! Signs a short-lived RS256 assertion and exchanges it at the org's login
//! host for an access token and instance URL.

use super::types::{AccessToken, JwtCredentials};
use crate::error::{Error, Result, ResultExt};
use crate::host::HostCapabilities;
use crate::http::RequestSpec;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lifetime of a signed assertion
pub const ASSERTION_LIFETIME_SECONDS: i64 = 3 * 60;

/// OAuth2 grant type for assertion exchange
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Token endpoint path on the login host
pub const TOKEN_PATH: &str = "/services/oauth2/token";

/// Claims of the signed assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionClaims {
    /// Connected app consumer key
    pub iss: String,
    /// Username the token is issued for
    pub sub: String,
    /// Login host of the org's environment
    pub aud: String,
    /// Expiry as a Unix timestamp
    pub exp: i64,
}

impl AssertionClaims {
    /// Claims for `credentials`, expiring [`ASSERTION_LIFETIME_SECONDS`] after `now`
    pub fn new(credentials: &JwtCredentials, now: i64) -> Self {
        Self {
            iss: credentials.client_id.clone(),
            sub: credentials.username.clone(),
            aud: credentials.environment.auth_url().to_string(),
            exp: now + ASSERTION_LIFETIME_SECONDS,
        }
    }
}

/// Sign the assertion with the credential's private key
pub fn sign_assertion(credentials: &JwtCredentials, now: i64) -> Result<String> {
    let claims = AssertionClaims::new(credentials, now);
    let header = Header::new(Algorithm::RS256);

    let encoding_key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes()).map_err(|e| {
        Error::JwtGeneration {
            message: format!("Invalid private key: {e}"),
        }
    })?;

    encode(&header, &claims, &encoding_key).map_err(|e| Error::JwtGeneration {
        message: format!("Failed to encode JWT: {e}"),
    })
}

/// Form POST exchanging `assertion` at the credential's login host
pub fn token_request(credentials: &JwtCredentials, assertion: &str) -> RequestSpec {
    RequestSpec::form(
        format!("{}{TOKEN_PATH}", credentials.environment.auth_url()),
        [
            ("grant_type", JWT_BEARER_GRANT_TYPE),
            ("assertion", assertion),
        ],
    )
}

/// Obtain an access token through the JWT bearer flow.
///
/// Every call signs a new assertion and performs a new exchange. A non-2xx
/// answer from the token endpoint becomes [`Error::TokenExchange`].
pub async fn acquire_token(
    host: &dyn HostCapabilities,
    credentials: &JwtCredentials,
) -> Result<AccessToken> {
    let assertion = sign_assertion(credentials, Utc::now().timestamp())?;

    debug!(
        environment = ?credentials.environment,
        client_id = %credentials.client_id,
        "Exchanging JWT assertion for access token"
    );

    let response = host
        .http_request(token_request(credentials, &assertion))
        .await
        .map_err(|e| match e {
            Error::HttpStatus { status, body } => Error::TokenExchange { status, body },
            other => other,
        })?;

    serde_json::from_value(response).context("Unexpected token response")
}
