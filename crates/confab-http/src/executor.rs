//! Authenticated request execution with transparent token refresh.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace, warn};

use confab_core::Result;
use confab_core::error::{AuthError, Error, InvalidInputError, TransportError, UpstreamError};
use confab_core::store::TokenStore;
use confab_core::tokens::AccessToken;
use confab_core::types::BackendUrl;

use crate::endpoints::{BackendErrorResponse, REFRESH, REFRESH_COOKIE, RefreshResponse};

/// Timeout applied to every request, including refresh calls. An unbounded
/// hang would stall the caller indefinitely, so timeouts are classified as
/// transport failures instead.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How the refresh token is presented to the refresh endpoint.
///
/// The backend accepts both: browser-style callers send the refresh token as
/// a bearer credential, while cookie-carrying server-side callers present it
/// as the `refresh_token` cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshTransport {
    /// `Authorization: Bearer <refresh_token>`.
    #[default]
    Bearer,
    /// `Cookie: refresh_token=<refresh_token>`.
    Cookie,
}

/// A replayable request body.
///
/// The executor may reissue a request after refreshing the access token, so
/// bodies are owned buffers rather than single-use streams.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// A JSON payload.
    Json(serde_json::Value),
    /// A multipart form (file uploads). The transport supplies the
    /// multipart boundary, so no content-type header is ever set for this
    /// variant.
    Multipart(MultipartForm),
}

/// An owned multipart form that can be rebuilt for a retried request.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

#[derive(Clone)]
struct FilePart {
    name: String,
    file_name: String,
    content_type: String,
    data: Vec<u8>,
}

// Debug prints the payload length, not the payload
impl std::fmt::Debug for FilePart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePart")
            .field("name", &self.name)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("data", &format_args!("{} bytes", self.data.len()))
            .finish()
    }
}

impl MultipartForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Add a file part.
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        self.files.push(FilePart {
            name: name.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        });
        self
    }

    /// Build a fresh transport form. Called once per attempt so a retried
    /// request gets its own copy of every part.
    fn to_form(&self) -> Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in &self.fields {
            form = form.text(name.clone(), value.clone());
        }
        for part in &self.files {
            let part_body = reqwest::multipart::Part::bytes(part.data.clone())
                .file_name(part.file_name.clone())
                .mime_str(&part.content_type)
                .map_err(|e| InvalidInputError::Other {
                    message: format!("invalid content type '{}': {}", part.content_type, e),
                })?;
            form = form.part(part.name.clone(), part_body);
        }
        Ok(form)
    }
}

/// Descriptor for a single backend request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: RequestBody,
}

impl ApiRequest {
    /// Create a request for the given method and backend-relative path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    /// Shorthand for a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Shorthand for a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Shorthand for a PUT request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Shorthand for a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Set a header. The executor overrides `Authorization` whenever an
    /// access token is available.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach a multipart form body.
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// Returns the backend-relative path.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// A successful (2xx) backend response.
///
/// Non-2xx statuses are surfaced as [`UpstreamError`] with the status and
/// body passed through verbatim.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiResponse {
    /// Returns the response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the raw response body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Deserialize the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Executes backend requests with the stored access token attached,
/// refreshing it exactly once on a 401 and retrying the request exactly
/// once.
///
/// Cheap to clone; clones share the same credential store and refresh gate,
/// so concurrent 401s across clones still collapse into a single refresh
/// call.
#[derive(Clone)]
pub struct AuthExecutor {
    inner: Arc<ExecutorInner>,
}

struct ExecutorInner {
    http: reqwest::Client,
    base: BackendUrl,
    store: Arc<dyn TokenStore>,
    refresh_transport: RefreshTransport,
    refresh_gate: tokio::sync::Mutex<()>,
}

impl AuthExecutor {
    /// Create an executor with the default (bearer) refresh transport.
    pub fn new(base: BackendUrl, store: Arc<dyn TokenStore>) -> Self {
        Self::with_transport(base, store, RefreshTransport::default())
    }

    /// Create an executor with an explicit refresh transport.
    pub fn with_transport(
        base: BackendUrl,
        store: Arc<dyn TokenStore>,
        refresh_transport: RefreshTransport,
    ) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("confab/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            inner: Arc::new(ExecutorInner {
                http,
                base,
                store,
                refresh_transport,
                refresh_gate: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Returns the backend URL this executor is configured for.
    pub fn base(&self) -> &BackendUrl {
        &self.inner.base
    }

    /// Returns the credential store this executor reads from.
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.inner.store
    }

    /// Execute an authenticated request.
    ///
    /// The stored access token is attached as a bearer credential when
    /// present; with an empty store the request is sent anyway and the
    /// endpoint decides whether to tolerate it. A 401 triggers one refresh
    /// and one retry; a 401 on the retry is surfaced like any other upstream
    /// error, never a second refresh.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let token = self.inner.store.access_token().await;
        let response = self.send_once(&request, token.as_ref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::into_outcome(response).await;
        }

        debug!("access token rejected, refreshing");
        let fresh = self.refresh_access_token(token.as_ref()).await?;

        let response = self.send_once(&request, Some(&fresh)).await?;
        Self::into_outcome(response).await
    }

    /// Execute a request without attaching or refreshing credentials.
    ///
    /// Used for login, signup, and other endpoints where a 401 is an answer,
    /// not an expired session.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute_anonymous(&self, request: ApiRequest) -> Result<ApiResponse> {
        let response = self.send_once(&request, None).await?;
        Self::into_outcome(response).await
    }

    /// Refresh the access token without issuing a resource request.
    pub async fn force_refresh(&self) -> Result<AccessToken> {
        let current = self.inner.store.access_token().await;
        self.refresh_access_token(current.as_ref()).await
    }

    /// Send one attempt of the request.
    async fn send_once(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
    ) -> Result<reqwest::Response> {
        let url = self.inner.base.api_url(&request.path);
        trace!(%url, "sending request");

        let mut headers = request.headers.clone();
        let mut builder = self.inner.http.request(request.method.clone(), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match &request.body {
            RequestBody::Empty => {
                ensure_json_content_type(&mut headers);
                builder
            }
            RequestBody::Json(value) => {
                ensure_json_content_type(&mut headers);
                builder.body(serde_json::to_vec(value)?)
            }
            RequestBody::Multipart(form) => {
                // The transport owns the boundary; a caller-supplied
                // content-type would corrupt it.
                headers.remove(CONTENT_TYPE);
                builder.multipart(form.to_form()?)
            }
        };

        if let Some(token) = token {
            headers.insert(AUTHORIZATION, bearer_value(token.as_str()));
        }

        builder.headers(headers).send().await.map_err(transport_error)
    }

    /// Convert a transport response into the caller-facing outcome.
    async fn into_outcome(response: reqwest::Response) -> Result<ApiResponse> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(transport_error)?.to_vec();
        trace!(status = %status, "response received");

        if status.is_success() {
            Ok(ApiResponse {
                status,
                headers,
                body,
            })
        } else {
            Err(Error::Upstream(parse_upstream_error(status.as_u16(), body)))
        }
    }

    /// Obtain a fresh access token, serializing concurrent refreshes.
    ///
    /// `stale` is the token the caller's rejected attempt used. After the
    /// gate is acquired the store is re-read: if the token changed while
    /// waiting, another caller already refreshed and that token is reused
    /// without a second refresh call.
    #[instrument(skip_all)]
    async fn refresh_access_token(&self, stale: Option<&AccessToken>) -> Result<AccessToken> {
        let _gate = self.inner.refresh_gate.lock().await;

        if let Some(current) = self.inner.store.access_token().await {
            if stale.map(AccessToken::as_str) != Some(current.as_str()) {
                debug!("token already refreshed by a concurrent caller");
                return Ok(current);
            }
        }

        let refresh_token = self
            .inner
            .store
            .refresh_token()
            .await
            .ok_or(AuthError::NoRefreshToken)?;

        let url = self.inner.base.api_url(REFRESH);
        let request = self.inner.http.post(&url);
        let request = match self.inner.refresh_transport {
            RefreshTransport::Bearer => {
                request.header(AUTHORIZATION, bearer_value(refresh_token.as_str()))
            }
            RefreshTransport::Cookie => {
                request.header(COOKIE, cookie_value(refresh_token.as_str()))
            }
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "refresh endpoint unreachable");
                return Err(AuthError::SessionExpired.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            debug!(status = %status, "refresh rejected");
            return Err(AuthError::RefreshRejected {
                status: status.as_u16(),
            }
            .into());
        }

        let body: RefreshResponse = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "refresh response body unusable");
                return Err(AuthError::SessionExpired.into());
            }
        };

        let access = AccessToken::new(body.access_token);
        self.inner.store.store_access_token(&access).await?;
        debug!("access token refreshed");
        Ok(access)
    }
}

impl std::fmt::Debug for AuthExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthExecutor")
            .field("base", &self.inner.base)
            .field("refresh_transport", &self.inner.refresh_transport)
            .finish()
    }
}

/// Set `application/json` unless the caller supplied a content type.
fn ensure_json_content_type(headers: &mut HeaderMap) {
    if !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
}

fn bearer_value(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).expect("invalid token characters")
}

fn cookie_value(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("{}={}", REFRESH_COOKIE, token))
        .expect("invalid token characters")
}

/// Classify a transport failure.
fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout {
            duration_ms: REQUEST_TIMEOUT.as_millis() as u64,
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

/// Parse a non-success response, keeping the raw body for pass-through.
fn parse_upstream_error(status: u16, body: Vec<u8>) -> UpstreamError {
    let raw = String::from_utf8_lossy(&body).into_owned();
    match serde_json::from_slice::<BackendErrorResponse>(&body) {
        Ok(parsed) => UpstreamError::new(status, parsed.error, parsed.message, raw),
        Err(_) => UpstreamError::new(status, None, None, raw),
    }
}
