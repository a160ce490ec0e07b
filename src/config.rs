//! Configuration for the bundled HTTP transport.
//!
//! This module provides [`ClientConfig`] and its builder, plus validated
//! newtype wrappers for the host URL and API key. Invalid values are rejected
//! on construction with a [`ConfigError`].

use std::fmt;

use crate::error::ConfigError;

/// A validated API host URL.
///
/// The URL must carry an `http://` or `https://` scheme. Trailing slashes
/// are normalized away so endpoint paths can be joined uniformly.
///
/// # Example
///
/// ```rust
/// use apisports::HostUrl;
///
/// let host = HostUrl::new("https://v3.football.api-sports.io/").unwrap();
/// assert_eq!(host.as_ref(), "https://v3.football.api-sports.io");
/// assert_eq!(host.host_name(), "v3.football.api-sports.io");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostUrl(String);

impl HostUrl {
    /// Creates a new validated host URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostUrl`] if the URL is empty or has
    /// no `http://`/`https://` scheme.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        let has_scheme = trimmed.starts_with("https://") || trimmed.starts_with("http://");
        let host_part = trimmed.find("//").map_or("", |i| &trimmed[i + 2..]);
        if !has_scheme || host_part.is_empty() {
            return Err(ConfigError::InvalidHostUrl { url });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// The host portion without the scheme, as sent in the
    /// `x-rapidapi-host` header.
    #[must_use]
    pub fn host_name(&self) -> &str {
        let start = self.0.find("//").map_or(0, |i| i + 2);
        &self.0[start..]
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated API key.
///
/// The key is sent with every request in the `x-rapidapi-key` header.
///
/// # Security
///
/// The `Debug` implementation masks the key value, displaying
/// `ApiKey(*****)` instead of the actual key.
///
/// # Example
///
/// ```rust
/// use apisports::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// Configuration for [`HttpClient`](crate::HttpClient).
///
/// Use [`ClientConfig::builder`] to construct one. The host is required;
/// the API key is optional because some deployments sit behind a proxy
/// that injects credentials itself.
///
/// # Example
///
/// ```rust
/// use apisports::{ApiKey, ClientConfig, HostUrl};
///
/// let config = ClientConfig::builder()
///     .host(HostUrl::new("https://v3.football.api-sports.io").unwrap())
///     .api_key(ApiKey::new("my-api-key").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.host().host_name(), "v3.football.api-sports.io");
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    host: HostUrl,
    api_key: Option<ApiKey>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// The configured host URL.
    #[must_use]
    pub const fn host(&self) -> &HostUrl {
        &self.host
    }

    /// The configured API key, if any.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Clone, Debug, Default)]
pub struct ClientConfigBuilder {
    host: Option<HostUrl>,
    api_key: Option<ApiKey>,
}

impl ClientConfigBuilder {
    /// Sets the API host.
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if no host was set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let host = self
            .host
            .ok_or(ConfigError::MissingRequiredField { field: "host" })?;
        Ok(ClientConfig {
            host,
            api_key: self.api_key,
        })
    }
}
