//! Blocking HTTP transport for API-Sports endpoints.
//!
//! The normalization engine consumes the [`ApiClient`] trait: anything that
//! can perform a GET against a named endpoint and hand back the raw status,
//! headers and body text. [`HttpClient`] is the bundled `reqwest`-backed
//! implementation.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::config::ClientConfig;
use crate::response::ApiResponse;

/// Query parameters sent with a GET request.
pub type QueryParams = HashMap<String, String>;

/// Library version from Cargo.toml, reported in the `User-Agent` header.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors produced by the HTTP transport.
///
/// A response with a non-success status code is not a transport error; it is
/// returned as a normal [`RawHttpResponse`] and classified downstream.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// The raw result of one HTTP exchange.
///
/// Header names are normalized to lowercase on construction so downstream
/// lookups are uniform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawHttpResponse {
    status: u16,
    reason: String,
    headers: HashMap<String, String>,
    body: String,
}

impl RawHttpResponse {
    /// Creates a raw response, deriving the reason phrase from the status
    /// code.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use apisports::RawHttpResponse;
    ///
    /// let raw = RawHttpResponse::new(404, HashMap::new(), "");
    /// assert_eq!(raw.reason(), "Not Found");
    /// ```
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: impl Into<String>) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("Unknown");
        Self::with_reason(status, reason, headers, body)
    }

    /// Creates a raw response with an explicit reason phrase from the wire.
    #[must_use]
    pub fn with_reason(
        status: u16,
        reason: impl Into<String>,
        headers: HashMap<String, String>,
        body: impl Into<String>,
    ) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        Self {
            status,
            reason: reason.into(),
            headers,
            body: body.into(),
        }
    }

    /// The HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// The HTTP reason phrase.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// The response headers, keyed by lowercase name.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// The raw body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Blocking transport seam consumed by the classification engine.
///
/// Implementations return `Ok` for any exchange that produced an HTTP
/// response, whatever its status code; `Err` is reserved for transport
/// failures where no response exists at all.
pub trait ApiClient: Send + Sync {
    /// Performs a GET against the named endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the request could not be completed.
    fn get(&self, endpoint: &str, params: &QueryParams) -> Result<RawHttpResponse, HttpError>;
}

/// Blocking HTTP client for API-Sports endpoints.
///
/// The client joins endpoint paths onto the configured host, sends the
/// `x-rapidapi-key`/`x-rapidapi-host` headers when an API key is configured,
/// and hands raw results to [`ApiResponse::from_raw`] for classification.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use apisports::{ApiKey, ClientConfig, HostUrl, HttpClient, QueryParams};
///
/// let config = ClientConfig::builder()
///     .host(HostUrl::new("https://v3.football.api-sports.io")?)
///     .api_key(ApiKey::new("your-api-key")?)
///     .build()?;
/// let client = Arc::new(HttpClient::new(config));
///
/// let response = client.request("leagues", &QueryParams::new())?;
/// for item in response.data() {
///     println!("{}", item?);
/// }
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::blocking::Client,
    base_url: String,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new client from a validated configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "User-Agent".to_string(),
            format!("apisports-rust/{SDK_VERSION}"),
        );
        if let Some(key) = config.api_key() {
            default_headers.insert("x-rapidapi-key".to_string(), key.as_ref().to_string());
            default_headers.insert(
                "x-rapidapi-host".to_string(),
                config.host().host_name().to_string(),
            );
        }

        let client = reqwest::blocking::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.host().as_ref().to_string(),
            default_headers,
        }
    }

    /// The base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The default headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Performs a GET and classifies the result.
    ///
    /// The client wires itself in as the pagination collaborator, so a
    /// paginated result can fetch follow-up pages while it is iterated.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the exchange itself fails. A response with
    /// an error status or an API-reported error is `Ok`; inspect
    /// [`ApiResponse::ok`].
    pub fn request(
        self: &Arc<Self>,
        endpoint: &str,
        params: &QueryParams,
    ) -> Result<ApiResponse, HttpError> {
        let raw = self.get(endpoint, params)?;
        let client: Arc<dyn ApiClient> = self.clone();
        Ok(ApiResponse::from_raw(Some(client), raw))
    }

    /// Shorthand for the `status` endpoint, which reports account state.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the exchange fails.
    pub fn status(self: &Arc<Self>) -> Result<ApiResponse, HttpError> {
        self.request("status", &QueryParams::new())
    }

    fn parse_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_ascii_lowercase(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect()
    }
}

impl ApiClient for HttpClient {
    fn get(&self, endpoint: &str, params: &QueryParams) -> Result<RawHttpResponse, HttpError> {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        tracing::debug!(endpoint, "issuing GET request");

        let mut request = self.client.get(&url);
        for (name, value) in &self.default_headers {
            request = request.header(name, value);
        }
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send()?;
        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
        let headers = Self::parse_headers(response.headers());
        let body = response.text()?;

        if status.as_u16() != 200 {
            tracing::warn!(endpoint, status = status.as_u16(), "non-success response");
        }

        Ok(RawHttpResponse::with_reason(
            status.as_u16(),
            reason,
            headers,
            body,
        ))
    }
}
