//! OAuth2 web flow helpers
//!
//! The host owns the token lifecycle; all this crate needs is the tenant
//! host, which is recovered from the stored token URL.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static TENANT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https://(.+)\.salesforce\.com").expect("valid tenant pattern"));

/// Tenant subdomain of a `https://<subdomain>.salesforce.com/...` URL
pub fn tenant_subdomain(access_token_url: &str) -> Option<&str> {
    TENANT_PATTERN
        .captures(access_token_url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Instance URL derived from the stored token URL
///
/// ```
/// use salesforce_cdk::auth::instance_url_from_token_url;
///
/// let url = instance_url_from_token_url("https://acme.salesforce.com/services/oauth2/token");
/// assert_eq!(url.unwrap(), "https://acme.salesforce.com");
/// ```
pub fn instance_url_from_token_url(access_token_url: &str) -> Result<String> {
    let subdomain = tenant_subdomain(access_token_url).ok_or_else(|| {
        Error::invalid_value(
            "accessTokenUrl",
            format!("'{access_token_url}' does not match https://<subdomain>.salesforce.com"),
        )
    })?;
    Ok(format!("https://{subdomain}.salesforce.com"))
}
