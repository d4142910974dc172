//! Transport seam
//!
//! [`Connection`] is the only thing the rest of the crate knows about HTTP.
//! Anything that can send an [`ApiRequest`] and hand back the raw
//! [`ApiResponse`] can stand in for the default reqwest transport.

use crate::error::Result;
use crate::types::{Method, StringMap};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::Value;

/// A single request to the API
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the base URL, or an absolute URL
    pub url: String,
    /// Query parameters
    pub query: StringMap,
    /// JSON body
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Create a request
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: StringMap::new(),
            body: None,
        }
    }

    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add several query parameters
    #[must_use]
    pub fn with_query(mut self, params: StringMap) -> Self {
        self.query.extend(params);
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A successful raw response
#[derive(Debug, Clone, Default)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body text
    pub body: String,
}

impl ApiResponse {
    /// Create a response with no headers
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// URL of the next page, from the `Link` header
    pub fn next_link(&self) -> Option<String> {
        self.link("next")
    }

    /// URL for the given `rel` of the `Link` header
    pub fn link(&self, rel: &str) -> Option<String> {
        self.headers
            .get("link")
            .and_then(|v| v.to_str().ok())
            .and_then(|header| parse_link_header(header, rel))
    }

    /// Check if the body is empty
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// Transport capable of sending API requests
///
/// Implementations report non-success statuses as errors (see
/// [`Error::from_status`](crate::Error::from_status)) so callers can tell
/// authorization failures and missing resources apart.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Send a request and return the raw response
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// Parse a Link header and extract the URL for the given rel
///
/// Format: `<https://api.github.com/...?page=2>; rel="next", <...>; rel="last"`
pub fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    for part in header.split(',') {
        let part = part.trim();
        let mut url = None;
        let mut rels = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                rels = Some(stripped.trim_matches('"').trim_matches('\''));
            }
        }

        // rel may hold several space-separated values
        if let (Some(u), Some(r)) = (url, rels) {
            if r.split_whitespace().any(|rel| rel == target_rel) {
                return Some(u.to_string());
            }
        }
    }

    None
}
