//! HTTP client wrapper with auth and error interceptors.
//!
//! Every API call goes through [`ApiClient`]:
//!
//! - outgoing requests carry `Authorization: Bearer <token>` whenever a token
//!   is persisted;
//! - 2xx responses resolve to the decoded body only;
//! - failures resolve to an [`ApiError`] whose text is the server's `error`
//!   field (or a generic message), after the user has been told about it.
//!
//! ERROR HANDLING
//! ==============
//! A 401 means the session is gone: the unauthorized hook (installed by the
//! composition root, normally `SessionStore::logout`) runs, the browser is
//! sent to `/login`, and no toast is shown. Every other failure raises an
//! error toast. Request-construction failures skip both and reach the caller
//! untouched.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::router::routes::LOGIN_PATH;
use crate::state::session::{TOKEN_KEY, clear_persisted};
use crate::state::toast::Notifier;
use crate::util::navigation::Navigator;
use crate::util::storage::KeyValueStore;

pub const GENERIC_ERROR_MESSAGE: &str = "Network error";

// =============================================================================
// TRANSPORT
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A fully built outgoing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response as seen by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request could not be constructed.
    #[error("request build failed: {0}")]
    Build(String),

    /// No response was received.
    #[error("network request failed: {0}")]
    Network(String),

    /// No response within the configured timeout (milliseconds).
    #[error("request timed out after {0} ms")]
    Timeout(u32),
}

/// Sends a request and returns whatever the server answered.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `gloo-net` transport with a fixed per-request timeout.
#[cfg(feature = "csr")]
pub struct GlooTransport {
    timeout_ms: u32,
}

#[cfg(feature = "csr")]
impl GlooTransport {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

#[cfg(feature = "csr")]
#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        use futures::future::{Either, select};
        use gloo_net::http::Request;

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let built = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::Build(e.to_string()))?;

        let send = Box::pin(built.send());
        let timeout = Box::pin(gloo_timers::future::TimeoutFuture::new(self.timeout_ms));
        match select(send, timeout).await {
            Either::Left((result, _)) => {
                let resp = result.map_err(|e| TransportError::Network(e.to_string()))?;
                let status = resp.status();
                let body = resp.text().await.map_err(|e| TransportError::Network(e.to_string()))?;
                Ok(HttpResponse { status, body })
            }
            Either::Right(((), _)) => Err(TransportError::Timeout(self.timeout_ms)),
        }
    }
}

/// Stand-in transport for non-browser builds.
#[cfg(not(feature = "csr"))]
pub struct OfflineTransport;

#[cfg(not(feature = "csr"))]
#[async_trait(?Send)]
impl Transport for OfflineTransport {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError::Network("not available outside the browser".to_owned()))
    }
}

/// The transport for the current build target.
pub fn default_transport(config: &ClientConfig) -> Rc<dyn Transport> {
    #[cfg(feature = "csr")]
    {
        Rc::new(GlooTransport::new(config.request_timeout_ms))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = config;
        Rc::new(OfflineTransport)
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// A rejected API call. Displays as the plain diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never left the client.
    #[error("{0}")]
    Request(String),

    /// Transport failure (`status` is `None`) or non-2xx response.
    #[error("{message}")]
    Remote { status: Option<u16>, message: String },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(_) => None,
            Self::Remote { status, .. } => *status,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Request(message) | Self::Remote { message, .. } => message,
        }
    }
}

/// Extract the server's `error` field from a failure payload.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(serde_json::Value::as_str).map(str::to_owned))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_owned())
}

// =============================================================================
// CLIENT
// =============================================================================

pub type UnauthorizedHook = Rc<dyn Fn()>;

/// API client shared by the session store, the guard and the pages.
///
/// Clones share the transport, storage, notifier and unauthorized hook.
#[derive(Clone)]
pub struct ApiClient {
    config: Rc<ClientConfig>,
    transport: Rc<dyn Transport>,
    storage: Rc<dyn KeyValueStore>,
    notifier: Rc<dyn Notifier>,
    navigator: Rc<dyn Navigator>,
    on_unauthorized: Rc<RefCell<Option<UnauthorizedHook>>>,
}

impl ApiClient {
    pub fn new(
        config: ClientConfig,
        transport: Rc<dyn Transport>,
        storage: Rc<dyn KeyValueStore>,
        notifier: Rc<dyn Notifier>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            config: Rc::new(config),
            transport,
            storage,
            notifier,
            navigator,
            on_unauthorized: Rc::new(RefCell::new(None)),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Install the callback run when the server answers 401.
    pub fn set_unauthorized_hook(&self, hook: impl Fn() + 'static) {
        *self.on_unauthorized.borrow_mut() = Some(Rc::new(hook));
    }

    /// `GET path`, decoding the response body.
    ///
    /// # Errors
    ///
    /// Returns the extracted failure message; see the module docs.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.dispatch(Method::Get, path, None).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] if `body` cannot be serialized, otherwise
    /// the extracted failure message.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.dispatch(Method::Post, path, Some(body)).await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::post`].
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.dispatch(Method::Put, path, Some(body)).await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.dispatch(Method::Delete, path, None).await
    }

    /// Request interceptor: resolve the URL and attach the bearer token.
    fn build_request(&self, method: Method, path: &str, body: Option<String>) -> HttpRequest {
        let mut headers = Vec::new();
        if let Some(token) = self.storage.get_item(TOKEN_KEY).filter(|t| !t.is_empty()) {
            headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        if body.is_some() {
            headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
        }
        HttpRequest { method, url: self.config.endpoint(path), headers, body }
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<T, ApiError> {
        let request = self.build_request(method, path, body);
        log::debug!("{method:?} {}", request.url);

        match self.transport.send(request).await {
            Ok(resp) if resp.is_success() => decode_body(&resp.body).map_err(|e| self.reject(None, e)),
            Ok(resp) => Err(self.reject(Some(resp.status), error_message(&resp.body))),
            Err(TransportError::Build(message)) => Err(ApiError::Request(message)),
            Err(e) => {
                log::warn!("{method:?} {path} failed: {e}");
                Err(self.reject(None, GENERIC_ERROR_MESSAGE.to_owned()))
            }
        }
    }

    /// Response interceptor for failures.
    fn reject(&self, status: Option<u16>, message: String) -> ApiError {
        if status == Some(401) {
            self.handle_unauthorized();
        } else {
            self.notifier.error(&message);
        }
        ApiError::Remote { status, message }
    }

    fn handle_unauthorized(&self) {
        log::warn!("server rejected the session token; returning to login");
        // Clone out of the cell so the hook may touch the client again.
        let hook = self.on_unauthorized.borrow().clone();
        match hook {
            Some(hook) => hook(),
            None => clear_persisted(self.storage.as_ref()),
        }
        self.navigator.replace(LOGIN_PATH);
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Request(e.to_string()))
}

fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, String> {
    let raw = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(raw).map_err(|e| format!("invalid response body: {e}"))
}
