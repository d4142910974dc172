//! Client configuration
//!
//! A [`ClientConfig`] can be loaded from YAML, overlaid with environment
//! variables, and then turned into an [`HttpConnectionConfig`].
//!
//! ```yaml
//! base_url: https://ghe.example.com/api/v3
//! token: ghp_xxx
//! timeout_secs: 10
//! page_size: 100
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpConnectionConfig, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
use crate::types::OptionStringExt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable holding the API base URL
pub const BASE_URL_ENV: &str = "GITHUB_API_URL";

/// Settings for building a [`GitHubClient`](crate::GitHubClient)
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// API root, e.g. `https://api.github.com`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Personal access or installation token
    #[serde(default)]
    pub token: Option<String>,

    /// User-Agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Value of the `X-GitHub-Api-Version` header
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Default `per_page` for collection requests
    #[serde(default)]
    pub page_size: Option<u32>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            user_agent: None,
            timeout_secs: default_timeout_secs(),
            api_version: default_api_version(),
            page_size: None,
        }
    }
}

impl ClientConfig {
    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a config from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay `GITHUB_TOKEN` and `GITHUB_API_URL` from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable lookup
    ///
    /// Empty values are ignored.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(token) = lookup(TOKEN_ENV).none_if_empty() {
            self.token = Some(token);
        }
        if let Some(base_url) = lookup(BASE_URL_ENV).none_if_empty() {
            self.base_url = base_url;
        }
        self
    }

    /// Check the config for values the client cannot work with
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("Invalid base_url '{}': {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        if self.api_version.trim().is_empty() {
            return Err(Error::config("api_version cannot be empty"));
        }
        if self.page_size == Some(0) {
            return Err(Error::config("page_size must be greater than zero"));
        }
        Ok(())
    }

    /// Build the transport settings
    pub fn http_config(&self) -> HttpConnectionConfig {
        let mut builder = HttpConnectionConfig::builder()
            .base_url(self.base_url.clone())
            .timeout(Duration::from_secs(self.timeout_secs))
            .api_version(self.api_version.clone());
        if let Some(token) = self.token.clone().none_if_empty() {
            builder = builder.token(token);
        }
        if let Some(agent) = self.user_agent.clone().none_if_empty() {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_version", &self.api_version)
            .field("page_size", &self.page_size)
            .finish()
    }
}
