//! Authentication module
//!
//! Supports: JWT bearer flow, OAuth2 web server flow
//!
//! The JWT flow signs an assertion and exchanges it for a token on every
//! request. The OAuth2 flow is delegated to the host; this module only
//! derives the tenant host from the stored token URL.

mod jwt;
mod oauth2;
mod types;

pub use jwt::{
    acquire_token, sign_assertion, token_request, AssertionClaims, ASSERTION_LIFETIME_SECONDS,
    JWT_BEARER_GRANT_TYPE, TOKEN_PATH,
};
pub use oauth2::{instance_url_from_token_url, tenant_subdomain};
pub use types::{AccessToken, JwtCredentials, OAuth2Credentials};
