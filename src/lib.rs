// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Salesforce CDK
//!
//! Request shaping, authentication and pagination for the Salesforce REST
//! API, for embedding in a workflow-automation host.
//!
//! ## Features
//!
//! - **Two auth flows**: JWT bearer (signed assertion) and host-managed OAuth2
//! - **Versioned requests**: every call targets `/services/data/<version>`, `v39.0` by default
//! - **Transparent pagination**: follows `nextRecordsUrl` until exhausted
//! - **Readable errors**: structured Salesforce error bodies become one message
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use salesforce_cdk::host::StaticHost;
//! use salesforce_cdk::http::HttpTransport;
//! use salesforce_cdk::{ClientConfig, Method, SalesforceClient, StringMap};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> salesforce_cdk::Result<()> {
//!     let host = StaticHost::new(HttpTransport::new()?)
//!         .with_credentials("salesforceOAuth2Api", serde_json::json!({
//!             "accessTokenUrl": "https://acme.salesforce.com/services/oauth2/token",
//!             "oauthTokenData": { "access_token": "00D..." }
//!         }));
//!
//!     let client = SalesforceClient::new(Arc::new(host), ClientConfig::default());
//!
//!     let mut query = StringMap::new();
//!     query.insert("q".into(), "SELECT Id, Name FROM Account".into());
//!     let accounts = client
//!         .request_all_items("records", Method::GET, "/query", serde_json::json!({}), &query)
//!         .await?;
//!
//!     println!("{} accounts", accounts.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │            SalesforceClient::request (builder)           │
//! │   JWT: acquire_token → Bearer     OAuth2: tenant host    │
//! └──────────────────────────────────────────────────────────┘
//!            │                                  │
//! ┌──────────┴──────────┐            ┌──────────┴──────────┐
//! │  pagination         │            │  HostCapabilities   │
//! │  collect_all        │            │  http_request       │
//! │  nextRecordsUrl     │            │  http_request_oauth2│
//! └─────────────────────┘            │  get_credentials    │
//!                                    │  get_parameter      │
//!                                    └─────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and constants
pub mod types;

/// Client configuration
pub mod config;

/// Host capability interface
pub mod host;

/// Request shaping and HTTP transport
pub mod http;

/// JWT and OAuth2 authentication
pub mod auth;

/// Request builder
pub mod client;

/// `nextRecordsUrl` pagination
pub mod pagination;

/// UI option helpers
pub mod options;

#[cfg(test)]
pub(crate) mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::SalesforceClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use host::{HostCapabilities, StaticHost};
pub use options::{sort_options, NodePropertyOption};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
