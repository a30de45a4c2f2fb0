//! Clubhouse API client.
//!
//! Low-level HTTP client that handles authentication, rate limiting and raw
//! requests. Resource operations are implemented via traits on model types.

use std::env;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::header::CONTENT_TYPE;
use reqwest::{multipart, Client, Method, Request};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ClubhouseError, ErrorKind, RequestError, Result};
use crate::nullable::encode_params;

/// Root URL of the hosted API.
pub const DEFAULT_ROOT_URL: &str = "https://api.clubhouse.io/api/";

/// API version path segment.
pub const DEFAULT_VERSION: &str = "v2";

/// The API allows 200 requests per minute; 3 per second stays under it.
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 3;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const JSON_CONTENT_TYPE: &str = "application/json";
const USER_AGENT: &str = concat!("clubhouse-rs/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`ClubhouseClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root URL; the version segment is appended to it.
    pub root_url: String,
    /// API version, e.g. `v2`.
    pub version: String,
    /// Requests allowed per second. `0` disables rate limiting.
    pub requests_per_second: u32,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            root_url: DEFAULT_ROOT_URL.to_string(),
            version: DEFAULT_VERSION.to_string(),
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Use a different root URL, e.g. a mock server.
    #[must_use]
    pub fn with_root_url(mut self, root_url: impl Into<String>) -> Self {
        self.root_url = root_url.into();
        self
    }

    /// Change the rate limit. `0` means unlimited.
    #[must_use]
    pub fn with_requests_per_second(mut self, requests_per_second: u32) -> Self {
        self.requests_per_second = requests_per_second;
        self
    }
}

#[derive(Deserialize)]
struct ErrorMessage {
    message: String,
}

/// Low-level Clubhouse API client.
///
/// Handles authentication, rate limiting and HTTP requests. Entity-specific
/// operations are implemented via the `Get`, `List`, `Create`, `Update` and
/// `Delete` traits on model types.
///
/// This struct is cheaply cloneable; clones share the connection pool and
/// the rate limiter.
///
/// # Example
///
/// ```no_run
/// use clubhouse::{ClientConfig, ClubhouseClient};
///
/// # fn example() -> clubhouse::Result<()> {
/// // Create from environment variables
/// let client = ClubhouseClient::from_env()?;
///
/// // Or configure manually
/// let client = ClubhouseClient::with_config(
///     "your-api-token",
///     ClientConfig::default().with_requests_per_second(1),
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ClubhouseClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
    limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl std::fmt::Debug for ClubhouseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClubhouseClient")
            .field("base_url", &self.base_url.as_str())
            .field("rate_limited", &self.limiter.is_some())
            .finish_non_exhaustive()
    }
}

impl ClubhouseClient {
    /// Create a client from environment variables.
    ///
    /// Uses `CLUBHOUSE_API_TOKEN` for authentication and optionally
    /// `CLUBHOUSE_API_URL`, `CLUBHOUSE_API_VERSION` and
    /// `CLUBHOUSE_RATE_LIMIT` (requests per second, `0` for unlimited).
    ///
    /// # Errors
    ///
    /// Returns an error if `CLUBHOUSE_API_TOKEN` is not set or another
    /// variable holds an unusable value.
    pub fn from_env() -> Result<Self> {
        let token = env::var("CLUBHOUSE_API_TOKEN").map_err(|_| {
            ClubhouseError::ConfigMissing(
                "CLUBHOUSE_API_TOKEN environment variable not set".to_string(),
            )
        })?;

        let mut config = ClientConfig::default();
        if let Ok(root_url) = env::var("CLUBHOUSE_API_URL") {
            config.root_url = root_url;
        }
        if let Ok(version) = env::var("CLUBHOUSE_API_VERSION") {
            config.version = version;
        }
        if let Ok(limit) = env::var("CLUBHOUSE_RATE_LIMIT") {
            config.requests_per_second = limit.parse().map_err(|_| {
                ClubhouseError::InvalidConfig(format!(
                    "CLUBHOUSE_RATE_LIMIT must be a whole number, got '{limit}'"
                ))
            })?;
        }

        Self::with_config(&token, config)
    }

    /// Create a client for the hosted API with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty.
    pub fn new(token: &str) -> Result<Self> {
        Self::with_config(token, ClientConfig::default())
    }

    /// Create a client with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty, the root URL is invalid, or
    /// the HTTP client cannot be built.
    pub fn with_config(token: &str, config: ClientConfig) -> Result<Self> {
        if token.is_empty() {
            return Err(ClubhouseError::ConfigMissing(
                "auth token must not be empty".to_string(),
            ));
        }

        let base_url = Self::base_url_for(&config)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.timeout)
            .build()
            .map_err(ClubhouseError::Http)?;

        let limiter = NonZeroU32::new(config.requests_per_second)
            // Evenly spaced requests, no burst
            .map(|n| Quota::per_second(n).allow_burst(NonZeroU32::MIN))
            .map(|quota| Arc::new(RateLimiter::direct(quota)));

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
            limiter,
        })
    }

    /// `{root}/{version}/`, always with a trailing slash so endpoints join
    /// beneath it.
    fn base_url_for(config: &ClientConfig) -> Result<Url> {
        let root = if config.root_url.ends_with('/') {
            config.root_url.clone()
        } else {
            format!("{}/", config.root_url)
        };
        let version = config.version.trim_matches('/');
        let base = Url::parse(&root)?;
        if version.is_empty() {
            return Ok(base);
        }
        Ok(base.join(&format!("{version}/"))?)
    }

    /// Get the versioned base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the full URL for an endpoint, including the auth token.
    pub(crate) fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        let mut url = self.base_url.join(endpoint.trim_start_matches('/'))?;
        url.query_pairs_mut().append_pair("token", &self.token);
        Ok(url)
    }

    /// Send raw bytes to an endpoint and return the raw response body.
    ///
    /// `content_type` overrides the default `application/json`.
    ///
    /// # Errors
    ///
    /// Returns [`ClubhouseError::Request`] for mapped error statuses and
    /// [`ClubhouseError::Http`] for transport failures.
    #[tracing::instrument(skip(self, body), fields(body_len = body.len()))]
    pub async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<Bytes> {
        let url = self.endpoint_url(endpoint)?;
        let body = Bytes::from(body);

        let request = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, content_type.unwrap_or(JSON_CONTENT_TYPE))
            .body(body.clone())
            .build()?;

        self.dispatch(request, body).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q, R>(&self, endpoint: &str, query: &Q) -> Result<R>
    where
        Q: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint)?;

        let request = self
            .http
            .get(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .query(query)
            .build()?;

        let bytes = self.dispatch(request, Bytes::new()).await?;
        decode(&bytes)
    }

    /// Make a GET request and decode the response.
    pub async fn get<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R> {
        let bytes = self.send(Method::GET, endpoint, Vec::new(), None).await?;
        decode(&bytes)
    }

    /// Make a POST request with a JSON body.
    pub async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request_resource(Method::POST, endpoint, body).await
    }

    /// Make a PUT request with a JSON body.
    pub async fn put<B, R>(&self, endpoint: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request_resource(Method::PUT, endpoint, body).await
    }

    /// Make a DELETE request without a body.
    pub async fn delete(&self, endpoint: &str) -> Result<()> {
        self.send(Method::DELETE, endpoint, Vec::new(), None).await?;
        Ok(())
    }

    /// Encode `params` and send them, discarding the response body.
    pub async fn request_empty<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        params: &B,
    ) -> Result<()> {
        let body = Self::marshal(params)?;
        self.send(method, endpoint, body, None).await?;
        Ok(())
    }

    /// Encode `params`, send them, and decode the response.
    ///
    /// # Errors
    ///
    /// Returns [`ClubhouseError::Marshal`] if the parameters cannot be
    /// encoded, [`ClubhouseError::Parse`] if the response cannot be decoded,
    /// and request errors as for [`ClubhouseClient::send`].
    pub async fn request_resource<B, R>(&self, method: Method, endpoint: &str, params: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = Self::marshal(params)?;
        let bytes = self.send(method, endpoint, body, None).await?;
        decode(&bytes)
    }

    /// Send a multipart form. The content type carries the form boundary.
    ///
    /// The form is streamed to the server, so a [`RequestError`] from this
    /// call has an empty `request_body`. The response body is kept as usual.
    #[tracing::instrument(skip(self, form))]
    pub async fn send_multipart(&self, endpoint: &str, form: multipart::Form) -> Result<Bytes> {
        let url = self.endpoint_url(endpoint)?;
        let request = self.http.post(url).multipart(form).build()?;
        self.dispatch(request, Bytes::new()).await
    }

    fn marshal<B: Serialize + ?Sized>(params: &B) -> Result<Vec<u8>> {
        let body = encode_params(params)?;
        tracing::debug!(body = %String::from_utf8_lossy(&body), "encoded request body");
        Ok(body)
    }

    /// Wait for the rate limiter, execute, and map the status code.
    async fn dispatch(&self, request: Request, request_body: Bytes) -> Result<Bytes> {
        let method = request.method().to_string();
        let url = redact_token(request.url());

        // Blocks until the next request fits within the rate limit
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }

        let response = self.http.execute(request).await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        tracing::debug!(%method, %url, status, "response received");

        let Some(kind) = ErrorKind::from_status(status) else {
            return Ok(body);
        };

        let message = match kind {
            ErrorKind::Unprocessable => serde_json::from_slice::<ErrorMessage>(&body)
                .ok()
                .map(|m| m.message),
            _ => None,
        };

        Err(RequestError {
            method,
            url,
            kind,
            message,
            request_body: request_body.to_vec(),
            response_body: body.to_vec(),
        }
        .into())
    }
}

/// Decode a JSON response body.
pub(crate) fn decode<R: DeserializeOwned>(bytes: &[u8]) -> Result<R> {
    serde_json::from_slice(bytes).map_err(ClubhouseError::Parse)
}

/// Render a URL with the `token` query value replaced.
fn redact_token(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "token" { "REDACTED".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = ClubhouseClient::new("test-token").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("ClubhouseClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_includes_version() {
        let client = ClubhouseClient::new("token").unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.clubhouse.io/api/v2/");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config1 = ClientConfig::default().with_root_url("http://localhost:9000/api");
        let config2 = ClientConfig::default().with_root_url("http://localhost:9000/api/");
        let client1 = ClubhouseClient::with_config("token", config1).unwrap();
        let client2 = ClubhouseClient::with_config("token", config2).unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_endpoint_url_carries_token() {
        let client = ClubhouseClient::new("s3cret").unwrap();
        let url = client.endpoint_url("epics/12/comments").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.clubhouse.io/api/v2/epics/12/comments?token=s3cret"
        );
    }

    #[test]
    fn test_redact_token() {
        let url = Url::parse("https://api.clubhouse.io/api/v2/search/stories?token=s3cret&query=abc")
            .unwrap();
        let redacted = redact_token(&url);
        assert!(!redacted.contains("s3cret"));
        assert!(redacted.contains("token=REDACTED"));
        assert!(redacted.contains("query=abc"));
    }

    #[test]
    fn test_empty_token_rejected() {
        let err = ClubhouseClient::new("").unwrap_err();
        assert!(matches!(err, ClubhouseError::ConfigMissing(_)));
    }

    #[test]
    fn test_zero_rate_disables_limiter() {
        let config = ClientConfig::default().with_requests_per_second(0);
        let client = ClubhouseClient::with_config("token", config).unwrap();
        assert!(client.limiter.is_none());

        let client = ClubhouseClient::new("token").unwrap();
        assert!(client.limiter.is_some());
    }

    #[test]
    fn test_invalid_root_url() {
        let config = ClientConfig::default().with_root_url("not a url");
        let err = ClubhouseClient::with_config("token", config).unwrap_err();
        assert!(matches!(err, ClubhouseError::InvalidUrl(_)));
    }
}
