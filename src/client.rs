//! Salesforce REST client
//!
//! Builds every data API request, picks the authentication path and hands
//! the request to the host for execution.

use crate::auth::{acquire_token, instance_url_from_token_url, JwtCredentials, OAuth2Credentials};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::host::HostCapabilities;
use crate::http::{RequestOptions, RequestSpec};
use crate::pagination;
use crate::types::{
    AuthenticationMethod, JsonValue, Method, StringMap, JWT_CREDENTIALS_TYPE,
    OAUTH2_CREDENTIALS_TYPE,
};
use std::sync::Arc;
use tracing::debug;

/// Client for the Salesforce REST data API
#[derive(Clone)]
pub struct SalesforceClient {
    host: Arc<dyn HostCapabilities>,
    config: ClientConfig,
}

impl SalesforceClient {
    /// Create a client with an explicit configuration
    pub fn new(host: Arc<dyn HostCapabilities>, config: ClientConfig) -> Self {
        Self { host, config }
    }

    /// Create a client whose authentication method comes from the host's
    /// `authentication` parameter
    pub fn from_host(host: Arc<dyn HostCapabilities>) -> Result<Self> {
        let config = ClientConfig::resolve(host.as_ref())?;
        Ok(Self::new(host, config))
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send one request to the data API.
    ///
    /// `uri`, when given, replaces `endpoint` as the path under the
    /// versioned API root. Structured Salesforce error bodies are rewritten
    /// into [`Error::Salesforce`]; any other failure is returned as is.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: JsonValue,
        query: &StringMap,
        uri: Option<&str>,
        options: RequestOptions,
    ) -> Result<JsonValue> {
        let path = uri.unwrap_or(endpoint);
        self.dispatch(method, path, body, query, options)
            .await
            .map_err(Error::prettify)
    }

    /// `GET` with query parameters
    pub async fn get(&self, endpoint: &str, query: &StringMap) -> Result<JsonValue> {
        self.request(
            Method::GET,
            endpoint,
            JsonValue::Null,
            query,
            None,
            RequestOptions::default(),
        )
        .await
    }

    /// `POST` with a JSON body
    pub async fn post(&self, endpoint: &str, body: JsonValue) -> Result<JsonValue> {
        self.request(
            Method::POST,
            endpoint,
            body,
            &StringMap::new(),
            None,
            RequestOptions::default(),
        )
        .await
    }

    /// Fetch every page of a listing and return the records under `field_name`
    pub async fn request_all_items(
        &self,
        field_name: &str,
        method: Method,
        endpoint: &str,
        body: JsonValue,
        query: &StringMap,
    ) -> Result<Vec<JsonValue>> {
        pagination::collect_all(self, field_name, method, endpoint, body, query).await
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: JsonValue,
        query: &StringMap,
        options: RequestOptions,
    ) -> Result<JsonValue> {
        match self.config.authentication {
            AuthenticationMethod::Jwt => {
                let stored = self.host.get_credentials(JWT_CREDENTIALS_TYPE).await?;
                let credentials = JwtCredentials::from_object(&stored)?;
                let token = acquire_token(self.host.as_ref(), &credentials).await?;

                let spec = RequestSpec::api(
                    method,
                    &token.instance_url,
                    &self.config.api_version,
                    path,
                    body,
                    query,
                )
                .with_options(options)
                .with_bearer(&token.access_token);

                debug!(%method, uri = %spec.uri, "Dispatching JWT-authenticated request");
                self.host.http_request(spec).await
            }
            AuthenticationMethod::OAuth2 => {
                let stored = self.host.get_credentials(OAUTH2_CREDENTIALS_TYPE).await?;
                let credentials = OAuth2Credentials::from_object(&stored)?;
                let instance_url = instance_url_from_token_url(&credentials.access_token_url)?;

                let spec = RequestSpec::api(
                    method,
                    &instance_url,
                    &self.config.api_version,
                    path,
                    body,
                    query,
                )
                .with_options(options);

                debug!(%method, uri = %spec.uri, "Dispatching OAuth2 request");
                self.host
                    .http_request_oauth2(OAUTH2_CREDENTIALS_TYPE, spec)
                    .await
            }
        }
    }
}

impl std::fmt::Debug for SalesforceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{jwt_credentials, oauth2_credentials, Dispatch, RecordingHost};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::time::Duration;

    fn client(host: &Arc<RecordingHost>, authentication: AuthenticationMethod) -> SalesforceClient {
        SalesforceClient::new(host.clone(), ClientConfig::new(authentication))
    }

    fn query(pairs: &[(&str, &str)]) -> StringMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_jwt_request() {
        let host = Arc::new(
            RecordingHost::new()
                .with_credentials(JWT_CREDENTIALS_TYPE, jwt_credentials("production"))
                .respond(Ok(json!({"id": "001xx", "success": true}))),
        );
        let client = client(&host, AuthenticationMethod::Jwt);

        let response = client
            .post("/sobjects/Account", json!({"Name": "Acme"}))
            .await
            .unwrap();
        assert_eq!(response["id"], "001xx");

        let requests = host.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[0].1.uri,
            "https://login.salesforce.com/services/oauth2/token"
        );

        let (dispatch, spec) = &requests[1];
        assert_eq!(dispatch, &Dispatch::Raw);
        assert_eq!(spec.method, Method::POST);
        assert_eq!(
            spec.uri,
            "https://acme.my.salesforce.com/services/data/v39.0/sobjects/Account"
        );
        assert_eq!(spec.header("Authorization"), Some("Bearer test-access-token"));
        assert_eq!(spec.header("Content-Type"), Some("application/json"));
        assert_eq!(spec.json_body(), Some(&json!({"Name": "Acme"})));
    }

    #[tokio::test]
    async fn test_jwt_reauthenticates_every_request() {
        let host = Arc::new(
            RecordingHost::new()
                .with_credentials(JWT_CREDENTIALS_TYPE, jwt_credentials("sandbox"))
                .respond(Ok(json!({})))
                .respond(Ok(json!({}))),
        );
        let client = client(&host, AuthenticationMethod::Jwt);

        client.get("/limits", &StringMap::new()).await.unwrap();
        client.get("/limits", &StringMap::new()).await.unwrap();

        let token_requests: Vec<_> = host
            .requests()
            .into_iter()
            .filter(|(_, spec)| spec.uri == "https://test.salesforce.com/services/oauth2/token")
            .collect();
        assert_eq!(token_requests.len(), 2);
    }

    #[tokio::test]
    async fn test_oauth2_request() {
        let host = Arc::new(
            RecordingHost::new()
                .with_credentials(OAUTH2_CREDENTIALS_TYPE, oauth2_credentials())
                .respond(Ok(json!({"totalSize": 0, "done": true, "records": []}))),
        );
        let client = client(&host, AuthenticationMethod::OAuth2);

        client
            .get("/query", &query(&[("q", "SELECT Id FROM Lead")]))
            .await
            .unwrap();

        let requests = host.requests();
        assert_eq!(requests.len(), 1);
        let (dispatch, spec) = &requests[0];
        assert_eq!(dispatch, &Dispatch::OAuth2("salesforceOAuth2Api".to_string()));
        assert_eq!(
            spec.uri,
            "https://acme.salesforce.com/services/data/v39.0/query"
        );
        assert_eq!(spec.query, query(&[("q", "SELECT Id FROM Lead")]));
        assert!(spec.body.is_none());
        assert_eq!(spec.header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_configured_api_version_reaches_url() {
        let host = Arc::new(
            RecordingHost::new()
                .with_credentials(OAUTH2_CREDENTIALS_TYPE, oauth2_credentials())
                .with_credentials(JWT_CREDENTIALS_TYPE, jwt_credentials("production"))
                .respond(Ok(json!({})))
                .respond(Ok(json!({}))),
        );
        let config = ClientConfig::from_json(json!({"apiVersion": "v58.0"})).unwrap();

        SalesforceClient::new(host.clone(), config)
            .get("/limits", &StringMap::new())
            .await
            .unwrap();
        SalesforceClient::new(
            host.clone(),
            ClientConfig::new(AuthenticationMethod::Jwt).with_api_version("v58.0"),
        )
        .get("/limits", &StringMap::new())
        .await
        .unwrap();

        let uris: Vec<_> = host.data_requests().into_iter().map(|r| r.uri).collect();
        assert_eq!(
            uris,
            vec![
                "https://acme.salesforce.com/services/data/v58.0/limits",
                "https://acme.my.salesforce.com/services/data/v58.0/limits",
            ]
        );
    }

    #[tokio::test]
    async fn test_get_never_sends_body() {
        let host = Arc::new(
            RecordingHost::new()
                .with_credentials(OAUTH2_CREDENTIALS_TYPE, oauth2_credentials())
                .respond(Ok(json!({}))),
        );
        let client = client(&host, AuthenticationMethod::OAuth2);

        client
            .request(
                Method::GET,
                "/sobjects/Account/001",
                json!({"ignored": true}),
                &StringMap::new(),
                None,
                RequestOptions::default(),
            )
            .await
            .unwrap();

        assert!(host.data_requests()[0].body.is_none());
    }

    #[tokio::test]
    async fn test_explicit_uri_replaces_endpoint() {
        let host = Arc::new(
            RecordingHost::new()
                .with_credentials(OAUTH2_CREDENTIALS_TYPE, oauth2_credentials())
                .respond(Ok(json!({}))),
        );
        let client = client(&host, AuthenticationMethod::OAuth2);

        client
            .request(
                Method::GET,
                "/query",
                JsonValue::Null,
                &StringMap::new(),
                Some("/query/01gxx-2000"),
                RequestOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(
            host.data_requests()[0].uri,
            "https://acme.salesforce.com/services/data/v39.0/query/01gxx-2000"
        );
    }

    #[tokio::test]
    async fn test_request_options_are_applied() {
        let host = Arc::new(
            RecordingHost::new()
                .with_credentials(JWT_CREDENTIALS_TYPE, jwt_credentials("production"))
                .respond(Ok(json!({}))),
        );
        let client = client(&host, AuthenticationMethod::Jwt);

        let options = RequestOptions::new()
            .header("Sforce-Auto-Assign", "FALSE")
            .header("Authorization", "Bearer other")
            .timeout(Duration::from_secs(3));

        client
            .request(
                Method::PATCH,
                "/sobjects/Lead/00Qxx",
                json!({"Status": "Working"}),
                &StringMap::new(),
                None,
                options,
            )
            .await
            .unwrap();

        let spec = &host.data_requests()[0];
        assert_eq!(spec.header("Sforce-Auto-Assign"), Some("FALSE"));
        assert_eq!(spec.header("Authorization"), Some("Bearer test-access-token"));
        assert_eq!(spec.timeout, Some(Duration::from_secs(3)));
    }

    #[tokio::test]
    async fn test_structured_error_is_prettified() {
        let host = Arc::new(
            RecordingHost::new()
                .with_credentials(OAUTH2_CREDENTIALS_TYPE, oauth2_credentials())
                .respond(Err(Error::http_status(
                    400,
                    r#"[{"message":"INVALID_FIELD","errorCode":"INVALID_FIELD"}]"#,
                ))),
        );
        let client = client(&host, AuthenticationMethod::OAuth2);

        let err = client.get("/query", &StringMap::new()).await.unwrap_err();
        let text = err.to_string();
        assert!(text.contains("400"));
        assert!(text.contains("INVALID_FIELD"));
        assert!(matches!(err, Error::Salesforce { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_unstructured_error_passes_through() {
        let host = Arc::new(
            RecordingHost::new()
                .with_credentials(OAUTH2_CREDENTIALS_TYPE, oauth2_credentials())
                .respond(Err(Error::http_status(503, "Service Unavailable"))),
        );
        let client = client(&host, AuthenticationMethod::OAuth2);

        let err = client.get("/query", &StringMap::new()).await.unwrap_err();
        assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_token_exchange_failure_is_not_prettified() {
        let host = Arc::new(
            RecordingHost::new()
                .with_credentials(JWT_CREDENTIALS_TYPE, jwt_credentials("production"))
                .with_token_response(Err(Error::http_status(
                    400,
                    r#"[{"message":"looks structured"}]"#,
                ))),
        );
        let client = client(&host, AuthenticationMethod::Jwt);

        let err = client.get("/limits", &StringMap::new()).await.unwrap_err();
        assert!(matches!(err, Error::TokenExchange { status: 400, .. }));
        assert!(host.data_requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let host = Arc::new(RecordingHost::new());
        let client = client(&host, AuthenticationMethod::Jwt);

        let err = client.get("/limits", &StringMap::new()).await.unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(host.requests().is_empty());
    }

    #[tokio::test]
    async fn test_from_host_reads_authentication_parameter() {
        let host = Arc::new(
            RecordingHost::new()
                .with_parameter("authentication", json!("jwt"))
                .with_credentials(JWT_CREDENTIALS_TYPE, jwt_credentials("production"))
                .respond(Ok(json!({}))),
        );

        let client = SalesforceClient::from_host(host.clone()).unwrap();
        assert_eq!(client.config().authentication, AuthenticationMethod::Jwt);

        client.get("/limits", &StringMap::new()).await.unwrap();
        assert_eq!(host.requests().len(), 2);
    }
}
