//! HTTP client for network-based API calls
//!
//! Wraps reqwest with the transport policies every storefront surface
//! shares: bearer auth from the session handle, a fixed request timeout,
//! minimum inter-request spacing, and bounded retries for rate limiting
//! and connection failures. Anything above this layer (such as the cart
//! synchronizer's corrective re-fetch) is a separate concern.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::session::SessionHandle;
use crate::{ClientConfig, ClientError, ClientResult};

/// Fallback wait when the server rate-limits without a Retry-After header.
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(5);

/// Error body shape used by the storefront API.
#[derive(serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for making network requests to the storefront API
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    session: SessionHandle,
    min_interval: Duration,
    max_retries: u32,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig, session: SessionHandle) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout_duration())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
            min_interval: config.request_interval(),
            max_retries: config.max_retries,
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session handle this client attaches tokens from
    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.session.token().map(|t| format!("Bearer {}", t))
    }

    /// Enforce the minimum spacing between consecutive requests.
    ///
    /// Clones share the window, so all surfaces of one client are throttled
    /// together.
    async fn throttle(&self) {
        if self.min_interval.is_zero() {
            return;
        }
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Send a request, retrying on rate limiting and connection failures.
    ///
    /// Retries are bounded by `max_retries`; HTTP 429 honors the server's
    /// Retry-After, connection errors back off linearly.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> ClientResult<Response> {
        let url = self.url(path);
        let mut attempt: u32 = 0;

        loop {
            self.throttle().await;

            let mut request = self.client.request(method.clone(), &url);
            if let Some(auth) = self.auth_header() {
                request = request.header(reqwest::header::AUTHORIZATION, auth);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            match request.send().await {
                Ok(response)
                    if response.status() == StatusCode::TOO_MANY_REQUESTS
                        && attempt < self.max_retries =>
                {
                    attempt += 1;
                    let wait = retry_after(&response).unwrap_or(DEFAULT_RETRY_AFTER);
                    tracing::warn!(path, attempt, wait_secs = wait.as_secs(), "rate limited, retrying");
                    tokio::time::sleep(wait).await;
                }
                Ok(response) => return Ok(response),
                Err(err) if err.is_connect() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(path, attempt, error = %err, "connection error, retrying");
                    tokio::time::sleep(Duration::from_secs(u64::from(attempt))).await;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.send(Method::GET, path, None).await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        let response = self.send(Method::POST, path, Some(&body)).await?;
        Self::handle_response(response).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        let response = self.send(Method::PATCH, path, Some(&body)).await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.send(Method::DELETE, path, None).await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request whose success response carries no body
    pub async fn delete_no_content(&self, path: &str) -> ClientResult<()> {
        let response = self.send(Method::DELETE, path, None).await?;
        Self::check_status(response).await.map(|_| ())
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        response.json().await.map_err(Into::into)
    }

    /// Map non-success statuses to typed errors
    async fn check_status(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        let message = error_message(&text);
        match status {
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ClientError::Forbidden(message)),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
            StatusCode::BAD_REQUEST => Err(ClientError::Validation(message)),
            _ => Err(ClientError::Internal(message)),
        }
    }
}

/// Pull the human-readable message out of an API error body, falling back
/// to the raw text for non-JSON responses.
fn error_message(text: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(text)
        .ok()
        .and_then(|body| body.error.or(body.message))
        .unwrap_or_else(|| text.to_string())
}

/// Parse a Retry-After header value (delay-seconds form only).
fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
