//! In-process host for unit tests
//!
//! Records every request and answers from canned responses without
//! touching the network.

use crate::auth::TOKEN_PATH;
use crate::error::{Error, Result};
use crate::host::HostCapabilities;
use crate::http::RequestSpec;
use crate::types::{JsonObject, JsonValue};
use async_trait::async_trait;
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

pub(crate) const TEST_PRIVATE_KEY: &str = include_str!("../tests/fixtures/rsa_private_key.pem");
pub(crate) const TEST_PUBLIC_KEY: &str = include_str!("../tests/fixtures/rsa_public_key.pem");

/// How a request reached the host
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Dispatch {
    Raw,
    OAuth2(String),
}

#[derive(Default)]
pub(crate) struct RecordingHost {
    requests: Mutex<Vec<(Dispatch, RequestSpec)>>,
    responses: Mutex<VecDeque<Result<JsonValue>>>,
    token_response: Mutex<Option<Result<JsonValue>>>,
    credentials: HashMap<String, JsonObject>,
    parameters: HashMap<String, JsonValue>,
}

impl RecordingHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_credentials(mut self, credentials_type: &str, data: JsonValue) -> Self {
        let object = data.as_object().cloned().unwrap_or_default();
        self.credentials.insert(credentials_type.to_string(), object);
        self
    }

    pub(crate) fn with_parameter(mut self, name: &str, value: JsonValue) -> Self {
        self.parameters.insert(name.to_string(), value);
        self
    }

    /// Answer every token exchange with `response`
    pub(crate) fn with_token_response(self, response: Result<JsonValue>) -> Self {
        *self.token_response.lock().unwrap() = Some(response);
        self
    }

    /// Queue a response for the next data request
    pub(crate) fn respond(self, response: Result<JsonValue>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub(crate) fn requests(&self) -> Vec<(Dispatch, RequestSpec)> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests excluding token exchanges
    pub(crate) fn data_requests(&self) -> Vec<RequestSpec> {
        self.requests()
            .into_iter()
            .map(|(_, spec)| spec)
            .filter(|spec| !spec.uri.ends_with(TOKEN_PATH))
            .collect()
    }

    fn answer(&self, dispatch: Dispatch, request: RequestSpec) -> Result<JsonValue> {
        let is_token = request.uri.ends_with(TOKEN_PATH);
        self.requests.lock().unwrap().push((dispatch, request));

        if is_token {
            let mut token = self.token_response.lock().unwrap();
            return match token.take() {
                Some(Ok(value)) => {
                    *token = Some(Ok(value.clone()));
                    Ok(value)
                }
                Some(Err(e)) => Err(e),
                None => Ok(json!({
                    "access_token": "test-access-token",
                    "instance_url": "https://acme.my.salesforce.com"
                })),
            };
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Other("no response queued".to_string())))
    }
}

#[async_trait]
impl HostCapabilities for RecordingHost {
    async fn http_request(&self, request: RequestSpec) -> Result<JsonValue> {
        self.answer(Dispatch::Raw, request)
    }

    async fn http_request_oauth2(
        &self,
        credentials_type: &str,
        request: RequestSpec,
    ) -> Result<JsonValue> {
        self.answer(Dispatch::OAuth2(credentials_type.to_string()), request)
    }

    async fn get_credentials(&self, credentials_type: &str) -> Result<JsonObject> {
        self.credentials
            .get(credentials_type)
            .cloned()
            .ok_or_else(|| Error::config(format!("No credentials of type {credentials_type}")))
    }

    fn get_parameter(&self, name: &str) -> Option<JsonValue> {
        self.parameters.get(name).cloned()
    }
}

pub(crate) fn jwt_credentials(environment: &str) -> JsonValue {
    json!({
        "clientId": "3MVG9-test-client",
        "username": "integration@acme.com",
        "privateKey": TEST_PRIVATE_KEY,
        "environment": environment
    })
}

pub(crate) fn oauth2_credentials() -> JsonValue {
    json!({
        "accessTokenUrl": "https://acme.salesforce.com/services/oauth2/token",
        "clientId": "cid",
        "clientSecret": "secret",
        "oauthTokenData": {"access_token": "host-token"}
    })
}
