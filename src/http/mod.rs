//! HTTP module
//!
//! Request shaping and a reqwest-backed transport.
//!
//! # Features
//!
//! - **Request specs**: versioned data API URLs, JSON or form bodies
//! - **Per-call options**: extra headers and timeout overrides
//! - **Transport**: executes a spec and parses the JSON response

mod request;
mod transport;

pub use request::{api_url, RequestBody, RequestOptions, RequestSpec};
pub use transport::{HttpTransport, TransportConfig, TransportConfigBuilder};
