//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{
    GatewayResponse, MESSAGE_SEND_ACTION, Password, Query, SendMessage, Username, ValidationError,
};
use crate::transport::{Reply, decode_reply, encode_query, encode_send_message_query};

/// Gateway host used unless the configuration overrides it.
pub const DEFAULT_URI: &str = "http://api.panaceamobile.com";
/// `User-Agent` sent unless the configuration overrides it.
pub const DEFAULT_USER_AGENT: &str = concat!("panacea-rs/", env!("CARGO_PKG_VERSION"));

const JSON_ENDPOINT: &str = "json";
const ACTION_FIELD: &str = "action";
const USER_AGENT_HEADER: &str = "User-Agent";
const URI_FIELD: &str = "uri";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Header name → value, applied to every request.
pub type Headers = BTreeMap<&'static str, String>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn get<'a>(
        &'a self,
        url: &'a str,
        headers: &'a Headers,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(
        &'a self,
        url: &'a str,
        headers: &'a Headers,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut request = self.client.get(url);
            for (name, value) in headers {
                request = request.header(*name, value.as_str());
            }
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Connection settings for [`GatewayClient`].
///
/// Credentials are optional; when unset they are left out of the query string entirely.
pub struct ClientConfig {
    uri: String,
    username: Option<Username>,
    password: Option<Password>,
    user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_owned(),
            username: None,
            password: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Default gateway URI and user-agent with the given credentials.
    pub fn with_credentials(username: Username, password: Password) -> Self {
        Self {
            username: Some(username),
            password: Some(password),
            ..Default::default()
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn set_uri(&mut self, uri: impl Into<String>) {
        self.uri = uri.into();
    }

    pub fn username(&self) -> Option<&Username> {
        self.username.as_ref()
    }

    pub fn set_username(&mut self, username: Option<Username>) {
        self.username = username;
    }

    pub fn password(&self) -> Option<&Password> {
        self.password.as_ref()
    }

    pub fn set_password(&mut self, password: Option<Password>) {
        self.password = password;
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.user_agent = user_agent.into();
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`GatewayClient`].
///
/// This error preserves:
/// - HTTP-level failures (non-2xx status or transport failures),
/// - gateway-level failures (`status` present and not `1`),
/// - validation/parse failures.
pub enum PanaceaError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The gateway answered with a failure status; `message` is its `details` field.
    #[error("{message}")]
    Gateway {
        status: serde_json::Value,
        message: String,
    },

    /// Response body is not a JSON object.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, Default)]
/// Builder for [`GatewayClient`].
///
/// Use this when you need to customize the URI, credentials, timeout, or user-agent.
pub struct GatewayClientBuilder {
    config: ClientConfig,
    timeout: Option<Duration>,
}

impl GatewayClientBuilder {
    /// Create a builder with the default URI and user-agent and no credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the gateway base URI.
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.config.set_uri(uri);
        self
    }

    /// Authenticate every request with `username` and `password`.
    pub fn credentials(mut self, username: Username, password: Password) -> Self {
        self.config.set_username(Some(username));
        self.config.set_password(Some(password));
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.set_user_agent(user_agent);
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build a [`GatewayClient`].
    pub fn build(self) -> Result<GatewayClient, PanaceaError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|err| PanaceaError::Transport(Box::new(err)))?;

        Ok(GatewayClient {
            config: self.config,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level PanaceaMobile client.
///
/// Every call is a `GET {uri}/json?...&action=<action>&username=..&password=..` carrying the
/// configured `User-Agent`. Replies are JSON objects; `status == 1` means success.
pub struct GatewayClient {
    config: ClientConfig,
    http: Arc<dyn HttpTransport>,
}

impl GatewayClient {
    /// Create a client from `config` using a default HTTP client.
    ///
    /// For a request timeout, use [`GatewayClient::builder`].
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder() -> GatewayClientBuilder {
        GatewayClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ClientConfig {
        &mut self.config
    }

    /// Join the configured URI and `endpoint` with exactly one slash between them.
    pub fn make_base_uri(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.uri.trim_end_matches('/'),
            endpoint.trim_matches('/')
        )
    }

    /// Headers sent with every request.
    pub fn global_headers(&self) -> Headers {
        Headers::from([(USER_AGENT_HEADER, self.config.user_agent.clone())])
    }

    /// Relative endpoint (`json?...`) for `action`, with credentials merged into `query`.
    ///
    /// `action`, `username` and `password` overwrite caller keys of the same name.
    pub fn endpoint_for(&self, action: &str, mut query: Query) -> String {
        query.set(ACTION_FIELD, Some(action.to_owned()));
        query.set(
            Username::FIELD,
            self.config.username.as_ref().map(|it| it.as_str().to_owned()),
        );
        query.set(
            Password::FIELD,
            self.config.password.as_ref().map(|it| it.as_str().to_owned()),
        );

        let encoded = encode_query(&query);
        if encoded.is_empty() {
            JSON_ENDPOINT.to_owned()
        } else {
            format!("{JSON_ENDPOINT}?{encoded}")
        }
    }

    /// Call an arbitrary gateway `action` with extra `query` parameters.
    ///
    /// Errors:
    /// - [`PanaceaError::Transport`] / [`PanaceaError::HttpStatus`] for HTTP failures,
    /// - [`PanaceaError::Parse`] when the body is not a JSON object,
    /// - [`PanaceaError::Gateway`] when the gateway reports a non-1 `status`.
    pub async fn get(&self, action: &str, query: Query) -> Result<GatewayResponse, PanaceaError> {
        if self.config.uri.trim().is_empty() {
            return Err(ValidationError::Empty { field: URI_FIELD }.into());
        }

        let url = self.make_base_uri(&self.endpoint_for(action, query));
        let headers = self.global_headers();
        debug!(
            action,
            endpoint = %self.make_base_uri(JSON_ENDPOINT),
            "sending gateway request"
        );

        let response = self
            .http
            .get(&url, &headers)
            .await
            .map_err(PanaceaError::Transport)?;
        debug!(action, status = response.status, "gateway responded");

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(PanaceaError::HttpStatus {
                status: response.status,
                body,
            });
        }

        match decode_reply(&response.body).map_err(|err| PanaceaError::Parse(Box::new(err)))? {
            Reply::Success(parsed) => Ok(parsed),
            Reply::Failure { status, message } => {
                warn!(action, %status, %message, "gateway reported failure");
                Err(PanaceaError::Gateway { status, message })
            }
        }
    }

    /// Send an SMS through the `message_send` action.
    pub async fn send_message(
        &self,
        request: SendMessage,
    ) -> Result<GatewayResponse, PanaceaError> {
        let query = encode_send_message_query(&request);
        self.get(MESSAGE_SEND_ACTION, query).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use crate::domain::{MessageText, RawPhoneNumber, SenderId};

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        last_url: Option<String>,
        last_headers: Headers,
        response_status: u16,
        response_body: String,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    last_url: None,
                    last_headers: Headers::new(),
                    response_status,
                    response_body: response_body.into(),
                })),
            }
        }

        fn last_request(&self) -> (Option<String>, Headers) {
            let state = self.state.lock().unwrap();
            (state.last_url.clone(), state.last_headers.clone())
        }
    }

    impl HttpTransport for FakeTransport {
        fn get<'a>(
            &'a self,
            url: &'a str,
            headers: &'a Headers,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let (status, body) = {
                    let mut state = self.state.lock().unwrap();
                    state.last_url = Some(url.to_owned());
                    state.last_headers = headers.clone();
                    (state.response_status, state.response_body.clone())
                };
                Ok(HttpResponse { status, body })
            })
        }
    }

    #[derive(Debug)]
    struct FailingTransport;

    impl HttpTransport for FailingTransport {
        fn get<'a>(
            &'a self,
            _url: &'a str,
            _headers: &'a Headers,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                Err(Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )) as Box<dyn StdError + Send + Sync>)
            })
        }
    }

    fn make_client(config: ClientConfig, transport: FakeTransport) -> GatewayClient {
        GatewayClient {
            config,
            http: Arc::new(transport),
        }
    }

    fn credentials() -> ClientConfig {
        ClientConfig::with_credentials(
            Username::new("my_username").unwrap(),
            Password::new("my_password").unwrap(),
        )
    }

    #[test]
    fn config_defaults_and_setters() {
        let mut config = ClientConfig::default();
        assert_eq!(config.uri(), "http://api.panaceamobile.com");
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
        assert!(config.username().is_none());
        assert!(config.password().is_none());

        config.set_uri("http://127.0.0.1");
        config.set_user_agent("lorem-ipsum");
        config.set_username(Some(Username::new("my_new_username").unwrap()));
        config.set_password(Some(Password::new("my_new_password").unwrap()));

        assert_eq!(config.uri(), "http://127.0.0.1");
        assert_eq!(config.user_agent(), "lorem-ipsum");
        assert_eq!(config.username().map(Username::as_str), Some("my_new_username"));
        assert_eq!(config.password().map(Password::as_str), Some("my_new_password"));
    }

    #[test]
    fn make_base_uri_collapses_slashes() {
        let mut client = GatewayClient::new(ClientConfig::default());
        client.config_mut().set_uri("http://api.panaceamobile.com//");
        assert_eq!(
            client.make_base_uri("json"),
            "http://api.panaceamobile.com/json"
        );
        assert_eq!(
            client.make_base_uri("/json?action=x"),
            "http://api.panaceamobile.com/json?action=x"
        );

        client.config_mut().set_uri("http://api.panaceamobile.com");
        assert_eq!(
            client.make_base_uri("json/"),
            "http://api.panaceamobile.com/json"
        );
    }

    #[test]
    fn global_headers_follow_configured_user_agent() {
        let mut client = GatewayClient::new(ClientConfig::default());
        assert_eq!(
            client.global_headers().get("User-Agent").map(String::as_str),
            Some(DEFAULT_USER_AGENT)
        );

        client.config_mut().set_user_agent("My UserAgent String");
        assert_eq!(
            client.global_headers().get("User-Agent").map(String::as_str),
            Some("My UserAgent String")
        );
    }

    #[test]
    fn endpoint_for_orders_caller_params_before_action() {
        let client = GatewayClient::new(ClientConfig::default());
        assert_eq!(
            client.endpoint_for("message_send", Query::new()),
            "json?action=message_send"
        );
        assert_eq!(
            client.endpoint_for("message_send", Query::new().with("hello", "world")),
            "json?hello=world&action=message_send"
        );
    }

    #[test]
    fn endpoint_for_injects_credentials_over_caller_keys() {
        let client = GatewayClient::new(credentials());
        let query = Query::new()
            .with("password", "spoofed")
            .with("action", "other")
            .with("hello", "world");
        assert_eq!(
            client.endpoint_for("message_send", query),
            "json?password=my_password&action=message_send&hello=world&username=my_username"
        );
    }

    #[tokio::test]
    async fn get_sends_user_agent_and_returns_mapping() {
        let transport = FakeTransport::new(200, r#"{"status": 1, "index": "abc"}"#);
        let client = make_client(ClientConfig::default(), transport.clone());

        let response = client.get("message_send", Query::new()).await.unwrap();
        assert_eq!(response.get("index"), Some(&json!("abc")));

        let (url, headers) = transport.last_request();
        assert_eq!(
            url.as_deref(),
            Some("http://api.panaceamobile.com/json?action=message_send")
        );
        assert_eq!(
            headers.get("User-Agent").map(String::as_str),
            Some(DEFAULT_USER_AGENT)
        );
    }

    #[tokio::test]
    async fn send_message_calls_message_send_with_all_params() {
        let transport = FakeTransport::new(200, r#"{"status": 1, "details": "queued"}"#);
        let client = make_client(credentials(), transport.clone());

        let request = SendMessage::from_sender(
            RawPhoneNumber::new("+27000000000").unwrap(),
            MessageText::new("This is my message").unwrap(),
            SenderId::new("+27111111111").unwrap(),
        );
        let response = client.send_message(request).await.unwrap();
        assert_eq!(response.details(), Some("queued"));

        let (url, _) = transport.last_request();
        assert_eq!(
            url.as_deref(),
            Some(
                "http://api.panaceamobile.com/json?to=%2B27000000000&text=This+is+my+message\
                 &from=%2B27111111111&report_mask=19&message_class=-1&auto_detect_encoding=0\
                 &action=message_send&username=my_username&password=my_password"
            )
        );
    }

    #[tokio::test]
    async fn gateway_failure_status_maps_to_gateway_error() {
        let transport = FakeTransport::new(200, r#"{"status": 0, "details": "Invalid credentials"}"#);
        let client = make_client(credentials(), transport);

        let err = client.get("message_send", Query::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        match err {
            PanaceaError::Gateway { status, message } => {
                assert_eq!(status, json!(0));
                assert_eq!(message, "Invalid credentials");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_success_http_status_maps_to_http_status_error() {
        let transport = FakeTransport::new(500, "oops");
        let client = make_client(ClientConfig::default(), transport);

        let err = client.get("message_send", Query::new()).await.unwrap_err();
        assert!(matches!(
            err,
            PanaceaError::HttpStatus {
                status: 500,
                body: Some(_)
            }
        ));
    }

    #[tokio::test]
    async fn empty_http_body_maps_to_none() {
        let transport = FakeTransport::new(503, "   ");
        let client = make_client(ClientConfig::default(), transport);

        let err = client.get("message_send", Query::new()).await.unwrap_err();
        assert!(matches!(
            err,
            PanaceaError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn non_json_body_maps_to_parse_error() {
        let transport = FakeTransport::new(200, "<xml>nope</xml>");
        let client = make_client(ClientConfig::default(), transport);

        let err = client.get("message_send", Query::new()).await.unwrap_err();
        assert!(matches!(err, PanaceaError::Parse(_)));
    }

    #[tokio::test]
    async fn transport_failure_is_propagated() {
        let client = GatewayClient {
            config: ClientConfig::default(),
            http: Arc::new(FailingTransport),
        };

        let err = client.get("message_send", Query::new()).await.unwrap_err();
        match err {
            PanaceaError::Transport(source) => {
                assert_eq!(source.to_string(), "connection refused");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_uri_is_rejected_before_sending() {
        let transport = FakeTransport::new(200, "{}");
        let mut config = ClientConfig::default();
        config.set_uri("  ");
        let client = make_client(config, transport.clone());

        let err = client.get("message_send", Query::new()).await.unwrap_err();
        assert!(matches!(
            err,
            PanaceaError::Validation(ValidationError::Empty { field: "uri" })
        ));
        assert!(transport.last_request().0.is_none());
    }

    #[test]
    fn builder_overrides_are_applied() {
        let client = GatewayClient::builder()
            .uri("http://127.0.0.1:8080/")
            .user_agent("lorem-ipsum")
            .credentials(
                Username::new("user").unwrap(),
                Password::new("pass").unwrap(),
            )
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(client.config().uri(), "http://127.0.0.1:8080/");
        assert_eq!(client.config().user_agent(), "lorem-ipsum");
        assert_eq!(client.make_base_uri("json"), "http://127.0.0.1:8080/json");
        assert_eq!(
            client.endpoint_for("message_send", Query::new()),
            "json?action=message_send&username=user&password=pass"
        );
    }
}
