//! Authenticated API client
//!
//! One client per backend. Before each request it reads the access token
//! from the injected [`SessionStore`] and attaches it as a bearer header.
//! Responses are normalized into `Ok(payload)` or an [`ApiError`]:
//!
//! - enveloped routes resolve with the envelope's `data`
//! - raw routes (see [`RouteTable`]) resolve with the body itself
//! - 401/403 on a non-exempt path clears the session, asks the
//!   [`Navigator`] for the login view and fails with
//!   [`ApiError::AuthExpired`]
//!
//! Nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use courseportal_core::{
    ForcedLogoutPolicy, NavigationRequest, Navigator, ResponseShape, RouteTable, SessionState,
    SessionStore,
};
use courseportal_domain::constants::{
    DEFAULT_API_URL, DEFAULT_LOGIN_PATH, DEFAULT_TIMEOUT_SECS, LOGIN_ENDPOINT,
};
use courseportal_domain::{ApiConfig, Envelope, Session, TokenPair, UserInfo};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::errors::ApiError;
use crate::errors::transport_error;
use crate::http::HttpClient;
use crate::navigation::LoggingNavigator;

/// Longest body excerpt used as an error message when no envelope is present
const MAX_ERROR_TEXT: usize = 200;

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for API (e.g., "http://localhost:8080/api")
    pub base_url: String,
    /// Timeout for API requests
    pub timeout: Duration,
    /// Application path opened on forced logout
    pub login_path: String,
    /// Paths whose 401/403 is an ordinary error
    pub auth_exempt_paths: Vec<String>,
    /// Envelope `statusCode` values that count as success
    pub success_status_codes: Vec<u16>,
    pub user_agent: Option<String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            auth_exempt_paths: vec![LOGIN_ENDPOINT.to_string()],
            success_status_codes: vec![200],
            user_agent: None,
        }
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            login_path: config.login_path.clone(),
            auth_exempt_paths: config.auth_exempt_paths.clone(),
            success_status_codes: config.success_status_codes.clone(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Request payload
pub enum RequestBody {
    Empty,
    /// Sent with `Content-Type: application/json`
    Json(Value),
    /// Sent as `multipart/form-data`; the boundary header is set by reqwest
    Multipart(Form),
}

impl RequestBody {
    /// Serialize any value into a JSON body
    pub fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self, ApiError> {
        serde_json::to_value(body)
            .map(Self::Json)
            .map_err(|e| ApiError::Decode(format!("Failed to serialize body: {e}")))
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Json(_) => "json",
            Self::Multipart(_) => "multipart",
        }
    }
}

impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind())
    }
}

/// Per-call overrides
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Applied after every other header, replacing same-named ones
    pub headers: HeaderMap,
    /// Overrides the route table for this call
    pub shape: Option<ResponseShape>,
    /// Appended to the URL's query string
    pub query: Vec<(String, String)>,
    /// Envelope status codes accepted in addition to the configured set
    pub accept_status: Vec<u16>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the body as-is, without envelope unwrapping
    pub fn raw() -> Self {
        Self::default().shape(ResponseShape::Raw)
    }

    #[must_use]
    pub const fn shape(mut self, shape: ResponseShape) -> Self {
        self.shape = Some(shape);
        self
    }

    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Also treat this envelope `statusCode` as success, e.g. 201 on create
    #[must_use]
    pub fn accept_status(mut self, status_code: u16) -> Self {
        self.accept_status.push(status_code);
        self
    }

    #[must_use]
    pub fn query<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query.extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

/// Authenticated API client
pub struct ApiClient {
    http_client: HttpClient,
    base_url: Url,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    routes: RouteTable,
    logout_policy: ForcedLogoutPolicy,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL is not an absolute
    /// http(s) URL or the HTTP client cannot be created
    pub fn new(
        config: ApiClientConfig,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        routes: RouteTable,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::Config(format!("Invalid base URL '{}': {e}", config.base_url)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "Unsupported base URL scheme '{}'",
                base_url.scheme()
            )));
        }

        let mut http = HttpClient::builder().timeout(config.timeout);
        if let Some(agent) = &config.user_agent {
            http = http.user_agent(agent.clone());
        }
        let http_client = http.build()?;

        let logout_policy = ForcedLogoutPolicy::new(&config.auth_exempt_paths);

        Ok(Self { http_client, base_url, session, navigator, routes, logout_policy, config })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub const fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Send one request and normalize the response
    ///
    /// `path` is relative to the base URL and may carry a query string.
    ///
    /// # Errors
    ///
    /// See [`ApiError`]; on [`ApiError::AuthExpired`] the session has
    /// already been cleared and navigation raised.
    #[instrument(
        skip(self, method, body, options),
        fields(method = %method, path = %path, body = body.kind())
    )]
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let RequestOptions { headers, shape, query, accept_status } = options;
        let url = self.endpoint_url(path)?;
        let shape = shape.unwrap_or_else(|| self.routes.resolve(method.as_str(), path));

        let mut request = self.http_client.request(method, url);
        if !query.is_empty() {
            request = request.query(&query);
        }

        if let Some(token) = self.session.access_token().await?.filter(|t| !t.is_empty()) {
            request = request.bearer_auth(token);
        }

        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Multipart(form) => request.multipart(form),
        };

        if !headers.is_empty() {
            request = request.headers(headers);
        }

        let response = self.http_client.send(request).await?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(&e, self.http_client.timeout()))?;

        debug!(status = status.as_u16(), ?shape, len = bytes.len(), "response received");
        self.interpret(path, status, &bytes, shape, &accept_status).await
    }

    async fn interpret<T: DeserializeOwned>(
        &self,
        path: &str,
        status: StatusCode,
        body: &[u8],
        shape: ResponseShape,
        accept_status: &[u16],
    ) -> Result<T, ApiError> {
        let envelope = parse_envelope(body);

        if self.logout_policy.forces_logout(
            path,
            status.as_u16(),
            envelope.as_ref().map(|e| e.status_code),
        ) {
            let status_code = if ForcedLogoutPolicy::is_auth_status(status.as_u16()) {
                status.as_u16()
            } else {
                envelope.as_ref().map_or(status.as_u16(), |e| e.status_code)
            };
            let (_, message) = failure_details(status, envelope, body);
            self.force_logout(path, status_code).await;
            return Err(ApiError::AuthExpired { status_code, message });
        }

        if !status.is_success() {
            let (status_code, message) = failure_details(status, envelope, body);
            debug!(status_code, "request rejected by server");
            return Err(ApiError::Server { status_code, message });
        }

        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT || body.is_empty()
        {
            return decode_value(Value::Null);
        }

        match shape {
            ResponseShape::Raw => serde_json::from_slice(body)
                .map_err(|e| ApiError::Decode(format!("Failed to parse response: {e}"))),
            ResponseShape::Enveloped => {
                let envelope = envelope.ok_or_else(|| {
                    ApiError::Decode("Expected a response envelope with a statusCode".to_string())
                })?;
                if !envelope.is_success(&self.config.success_status_codes)
                    && !envelope.is_success(accept_status)
                {
                    debug!(status_code = envelope.status_code, "failure envelope");
                    return Err(ApiError::Server {
                        status_code: envelope.status_code,
                        message: envelope.message,
                    });
                }
                decode_value(envelope.data.unwrap_or(Value::Null))
            }
        }
    }

    async fn force_logout(&self, path: &str, status_code: u16) {
        warn!(path = %path, status_code, "credential rejected; clearing session");
        if let Err(err) = self.session.clear().await {
            warn!(error = %err, "failed to clear session after auth failure");
        }
        self.navigator.navigate(NavigationRequest::session_expired(&self.config.login_path));
    }

    fn endpoint_url(&self, path: &str) -> Result<Url, ApiError> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| ApiError::Config(format!("Invalid request path '{path}': {e}")))
    }

    /// Execute a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, RequestBody::Empty, RequestOptions::default()).await
    }

    /// Execute a POST request with a JSON body
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, RequestBody::json(body)?, RequestOptions::default()).await
    }

    /// Execute a PUT request with a JSON body
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, RequestBody::json(body)?, RequestOptions::default()).await
    }

    /// Execute a PATCH request with a JSON body
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PATCH, path, RequestBody::json(body)?, RequestOptions::default())
            .await
    }

    /// Execute a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, RequestBody::Empty, RequestOptions::default()).await
    }

    /// Execute a POST request with a multipart body
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, RequestBody::Multipart(form), RequestOptions::default())
            .await
    }

    /// Execute a PATCH request with a multipart body
    pub async fn patch_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        self.request(Method::PATCH, path, RequestBody::Multipart(form), RequestOptions::default())
            .await
    }

    /// Store a fresh session, replacing any previous one
    #[instrument(skip_all)]
    pub async fn set_session(
        &self,
        tokens: TokenPair,
        user: Option<UserInfo>,
    ) -> Result<Session, ApiError> {
        let session = Session::new(tokens, user);
        self.session.save(session.clone()).await?;
        info!(has_user = session.user.is_some(), "session established");
        Ok(session)
    }

    /// Replace the cached user; `false` when signed out
    pub async fn update_cached_user(&self, user: UserInfo) -> Result<bool, ApiError> {
        Ok(self.session.update_user(user).await?)
    }

    /// Remove tokens and cached user; safe to call when already signed out
    pub async fn clear_session(&self) -> Result<(), ApiError> {
        self.session.clear().await?;
        info!("session cleared");
        Ok(())
    }

    /// Clear the session and send the shell to the login view
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        self.clear_session().await?;
        self.navigator.navigate(NavigationRequest::logged_out(&self.config.login_path));
        Ok(())
    }

    pub async fn current_session(&self) -> Result<Option<Session>, ApiError> {
        Ok(self.session.load().await?)
    }

    pub async fn session_state(&self) -> Result<SessionState, ApiError> {
        let session = self.session.load().await?;
        Ok(SessionState::from(session.as_ref()))
    }
}

fn parse_envelope(body: &[u8]) -> Option<Envelope> {
    if body.is_empty() {
        return None;
    }
    serde_json::from_slice(body).ok()
}

fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::Decode(format!("Failed to parse response data: {e}")))
}

/// Status code and message for a failed response
///
/// An envelope is reported exactly as sent. Otherwise the HTTP status is
/// used with a JSON `message` field, then the body text, then the reason
/// phrase.
fn failure_details(status: StatusCode, envelope: Option<Envelope>, body: &[u8]) -> (u16, String) {
    let reason = || status.canonical_reason().unwrap_or("Request failed").to_string();

    if let Some(envelope) = envelope {
        return (envelope.status_code, envelope.message);
    }

    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_owned))
        .or_else(|| {
            let text = String::from_utf8_lossy(body).trim().to_string();
            (!text.is_empty()).then(|| text.chars().take(MAX_ERROR_TEXT).collect())
        })
        .unwrap_or_else(reason);

    (status.as_u16(), message)
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    session: Option<Arc<dyn SessionStore>>,
    navigator: Option<Arc<dyn Navigator>>,
    routes: Option<RouteTable>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    #[must_use]
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the session store (required)
    #[must_use]
    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session = Some(store);
        self
    }

    /// Set the navigator; defaults to [`LoggingNavigator`]
    #[must_use]
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Set the response-shape table; defaults to [`RouteTable::default`]
    #[must_use]
    pub fn routes(mut self, routes: RouteTable) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if the session store is missing or client creation fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let session =
            self.session.ok_or_else(|| ApiError::Config("Session store not set".to_string()))?;
        let navigator = self.navigator.unwrap_or_else(|| Arc::new(LoggingNavigator));

        ApiClient::new(config, session, navigator, self.routes.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::session::MemorySessionStore;

    fn client_for(server: &MockServer) -> ApiClient {
        let config = ApiClientConfig { base_url: server.uri(), ..Default::default() };
        ApiClient::builder()
            .config(config)
            .session_store(Arc::new(MemorySessionStore::new()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_missing_session_store() {
        let result = ApiClient::builder().build();
        assert!(matches!(result, Err(ApiError::Config(msg)) if msg.contains("Session store")));
    }

    #[test]
    fn test_builder_rejects_invalid_base_url() {
        let config = ApiClientConfig { base_url: "not a url".into(), ..Default::default() };
        let result = ApiClient::builder()
            .config(config)
            .session_store(Arc::new(MemorySessionStore::new()))
            .build();
        assert!(matches!(result, Err(ApiError::Config(_))));

        let config = ApiClientConfig { base_url: "ftp://example.com".into(), ..Default::default() };
        let result = ApiClient::builder()
            .config(config)
            .session_store(Arc::new(MemorySessionStore::new()))
            .build();
        assert!(matches!(result, Err(ApiError::Config(msg)) if msg.contains("ftp")));
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let config =
            ApiClientConfig { base_url: "http://localhost:8080/api/".into(), ..Default::default() };
        let client = ApiClient::builder()
            .config(config)
            .session_store(Arc::new(MemorySessionStore::new()))
            .build()
            .unwrap();

        let url = client.endpoint_url("/courses/videos/watched/5?watched=true").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/courses/videos/watched/5?watched=true");
        assert_eq!(client.endpoint_url("topics").unwrap().path(), "/api/topics");
    }

    #[test]
    fn test_config_from_api_config() {
        let api = ApiConfig {
            base_url: "https://shop.example.com/api".into(),
            timeout_secs: 12,
            ..Default::default()
        };
        let config = ApiClientConfig::from(&api);
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.auth_exempt_paths, vec!["/auth/login".to_string()]);
        assert_eq!(config.success_status_codes, vec![200]);
    }

    #[test]
    fn test_failure_details_fallbacks() {
        let envelope = Envelope::failure(400, "Title is required");
        assert_eq!(
            failure_details(StatusCode::BAD_REQUEST, Some(envelope), b""),
            (400, "Title is required".to_string())
        );

        assert_eq!(
            failure_details(StatusCode::BAD_REQUEST, Some(Envelope::failure(400, "")), b""),
            (400, String::new())
        );
        assert_eq!(
            failure_details(StatusCode::INTERNAL_SERVER_ERROR, Some(Envelope::failure(200, "boom")), b""),
            (200, "boom".to_string())
        );

        assert_eq!(
            failure_details(StatusCode::NOT_FOUND, None, br#"{"message":"no such course"}"#),
            (404, "no such course".to_string())
        );

        assert_eq!(
            failure_details(StatusCode::BAD_GATEWAY, None, b"upstream down"),
            (502, "upstream down".to_string())
        );

        assert_eq!(
            failure_details(StatusCode::INTERNAL_SERVER_ERROR, None, b""),
            (500, "Internal Server Error".to_string())
        );
    }

    #[tokio::test]
    async fn test_no_content_decodes_unit() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/courses/4"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.delete::<()>("/courses/4").await.unwrap();
    }

    #[tokio::test]
    async fn test_options_query_and_shape_override() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("keyword", "rust"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": 3})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let options = RequestOptions::raw().query([("keyword", "rust")]);
        let body: Value =
            client.request(Method::GET, "/search", RequestBody::Empty, options).await.unwrap();
        assert_eq!(body, json!({"hits": 3}));
    }

    #[tokio::test]
    async fn test_enveloped_route_rejects_bare_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/courses/my"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result: Result<Value, _> = client.get("/courses/my").await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_custom_success_codes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/courses/9/enroll"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "statusCode": 201, "error": null, "message": "Created", "data": {"courseId": 9}
            })))
            .mount(&server)
            .await;

        let config = ApiClientConfig {
            base_url: server.uri(),
            success_status_codes: vec![200, 201],
            ..Default::default()
        };
        let client = ApiClient::builder()
            .config(config)
            .session_store(Arc::new(MemorySessionStore::new()))
            .build()
            .unwrap();

        let data: Value = client.post("/courses/9/enroll", &json!({})).await.unwrap();
        assert_eq!(data, json!({"courseId": 9}));

        let default_client = client_for(&server);
        let result: Result<Value, _> = default_client.post("/courses/9/enroll", &json!({})).await;
        assert!(matches!(result, Err(ApiError::Server { status_code: 201, .. })));
    }
}
