//! Request descriptions handed to the host for execution
//!
//! A [`RequestSpec`] is built fresh for every call and is never mutated
//! once dispatched.

use crate::types::{JsonValue, Method, StringMap};
use std::time::Duration;

const CONTENT_TYPE: &str = "Content-Type";
const AUTHORIZATION: &str = "Authorization";

/// Request payload
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized as JSON
    Json(JsonValue),
    /// Serialized as `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
}

/// A fully shaped HTTP request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// HTTP method
    pub method: Method,
    /// Absolute URL
    pub uri: String,
    /// Request headers
    pub headers: StringMap,
    /// Query string parameters
    pub query: StringMap,
    /// Payload, absent for `GET`
    pub body: Option<RequestBody>,
    /// Overrides the transport timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestSpec {
    /// Create an empty request
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            headers: StringMap::new(),
            query: StringMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Build a REST data API request.
    ///
    /// The target is `instance_url` + `/services/data/<api_version>` + `path`.
    /// `GET` requests never carry a body; every other method sends `body`
    /// as JSON.
    pub fn api(
        method: Method,
        instance_url: &str,
        api_version: &str,
        path: &str,
        body: JsonValue,
        query: &StringMap,
    ) -> Self {
        let mut spec = Self::new(method, api_url(instance_url, api_version, path));
        spec.headers
            .insert(CONTENT_TYPE.to_string(), "application/json".to_string());
        spec.query = query.clone();
        if method.allows_body() {
            spec.body = Some(RequestBody::Json(body));
        }
        spec
    }

    /// Build a form-encoded POST
    pub fn form<K, V>(uri: impl Into<String>, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut spec = Self::new(Method::POST, uri);
        spec.headers.insert(
            CONTENT_TYPE.to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        spec.body = Some(RequestBody::Form(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ));
        spec
    }

    /// Attach a bearer token
    #[must_use]
    pub fn with_bearer(mut self, token: &str) -> Self {
        self.headers
            .insert(AUTHORIZATION.to_string(), format!("Bearer {token}"));
        self
    }

    /// Merge caller-supplied options. An `Authorization` header in the
    /// options is ignored.
    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        for (key, value) in options.headers {
            if key.eq_ignore_ascii_case(AUTHORIZATION) {
                continue;
            }
            self.headers.insert(key, value);
        }
        if options.timeout.is_some() {
            self.timeout = options.timeout;
        }
        self
    }

    /// JSON body, if any
    pub fn json_body(&self) -> Option<&JsonValue> {
        match &self.body {
            Some(RequestBody::Json(value)) => Some(value),
            _ => None,
        }
    }

    /// Header value by exact name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Join an instance host with the versioned data API path
pub fn api_url(instance_url: &str, api_version: &str, path: &str) -> String {
    format!(
        "{}/services/data/{api_version}{path}",
        instance_url.trim_end_matches('/')
    )
}

/// Extra per-call options
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Additional request headers
    pub headers: StringMap,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
