//! Default reqwest transport
//!
//! Sends requests to the GitHub REST API with the standard GitHub media type,
//! API version header, user agent, and an optional bearer token. Non-success
//! statuses are classified into typed errors:
//! - 401 → `Unauthorized`
//! - 403 → `Forbidden`
//! - 404 → `NotFound`
//! - anything else → `Api { status, message }`

use super::connection::{ApiRequest, ApiResponse, Connection};
use crate::error::{Error, Result};
use crate::types::StringMap;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Public GitHub API root
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// REST API version sent with every request
pub const DEFAULT_API_VERSION: &str = "2022-11-28";

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Configuration for the HTTP connection
#[derive(Clone)]
pub struct HttpConnectionConfig {
    /// Base URL for relative request paths
    pub base_url: String,
    /// Bearer token attached to every request
    pub token: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string (GitHub rejects requests without one)
    pub user_agent: String,
    /// Value of the `X-GitHub-Api-Version` header
    pub api_version: String,
    /// Default headers for all requests
    pub default_headers: StringMap,
}

impl Default for HttpConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("octo-stream/{}", env!("CARGO_PKG_VERSION")),
            api_version: DEFAULT_API_VERSION.to_string(),
            default_headers: StringMap::new(),
        }
    }
}

impl HttpConnectionConfig {
    /// Create a new config builder
    pub fn builder() -> HttpConnectionConfigBuilder {
        HttpConnectionConfigBuilder::default()
    }
}

impl fmt::Debug for HttpConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpConnectionConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("api_version", &self.api_version)
            .field("default_headers", &self.default_headers)
            .finish()
    }
}

/// Builder for HTTP connection config
#[derive(Default)]
pub struct HttpConnectionConfigBuilder {
    config: HttpConnectionConfig,
}

impl HttpConnectionConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the bearer token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the API version header value
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = version.into();
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Build the config
    pub fn build(self) -> HttpConnectionConfig {
        self.config
    }
}

/// reqwest-backed [`Connection`]
pub struct HttpConnection {
    client: Client,
    config: HttpConnectionConfig,
}

impl HttpConnection {
    /// Create a connection to the public GitHub API without a token
    pub fn new() -> Result<Self> {
        Self::with_config(HttpConnectionConfig::default())
    }

    /// Create a connection with custom configuration
    pub fn with_config(config: HttpConnectionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the connection configuration
    pub fn config(&self) -> &HttpConnectionConfig {
        &self.config
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[async_trait]
impl Connection for HttpConnection {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.build_url(&request.url);

        let mut req = self
            .client
            .request(request.method.into(), &url)
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header("X-GitHub-Api-Version", self.config.api_version.as_str());

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if let Some(ref token) = self.config.token {
            req = req.bearer_auth(token);
        }

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }

        if let Some(ref body) = request.body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body);
            warn!(
                "{} {} failed with {}: {}",
                request.method,
                url,
                status.as_u16(),
                message
            );
            return Err(Error::from_status(status.as_u16(), message));
        }

        debug!("{} {} -> {}", request.method, url, status.as_u16());
        Ok(ApiResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}

impl fmt::Debug for HttpConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpConnection")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Extract GitHub's `message` field from an error body
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| body.trim().to_string())
}
