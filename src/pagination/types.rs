//! Pagination types
//!
//! Defines the page, cursor, and option types shared by the stream adapter
//! and the API connection.

use crate::error::Result;
use crate::types::StringMap;
use crate::validate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque continuation token for the next page
///
/// For GitHub this is the absolute URL of the `rel="next"` Link header entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor(String);

impl Cursor {
    /// Create a cursor from a continuation URL or token
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the cursor value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the cursor, returning its value
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One fetched batch of items plus the cursor for the next batch
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items in the order the server returned them
    pub items: Vec<T>,
    /// Continuation cursor, `None` on the last page
    pub next: Option<Cursor>,
}

impl<T> Page<T> {
    /// Create a page with an optional continuation
    pub fn new(items: Vec<T>, next: Option<Cursor>) -> Self {
        Self { items, next }
    }

    /// Create a final page
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }

    /// Check if there is another page after this one
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if this page has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Pagination options accepted by every collection endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiOptions {
    /// Items per page (`per_page`)
    #[serde(default)]
    pub page_size: Option<u32>,
    /// Page to start from (`page`)
    #[serde(default)]
    pub start_page: Option<u32>,
    /// Maximum number of pages to fetch
    #[serde(default)]
    pub page_count: Option<u32>,
}

impl ApiOptions {
    /// Create empty options (server defaults, all pages)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Set the starting page
    #[must_use]
    pub fn with_start_page(mut self, page: u32) -> Self {
        self.start_page = Some(page);
        self
    }

    /// Cap the number of pages fetched
    #[must_use]
    pub fn with_page_count(mut self, count: u32) -> Self {
        self.page_count = Some(count);
        self
    }

    /// Reject zero values
    pub fn validate(&self) -> Result<()> {
        validate::non_zero_if_set(self.page_size, "page_size")?;
        validate::non_zero_if_set(self.start_page, "start_page")?;
        validate::non_zero_if_set(self.page_count, "page_count")?;
        Ok(())
    }

    /// Query parameters for the first request
    pub fn query_params(&self) -> StringMap {
        let mut params = StringMap::new();
        if let Some(size) = self.page_size {
            params.insert("per_page".to_string(), size.to_string());
        }
        if let Some(page) = self.start_page {
            params.insert("page".to_string(), page.to_string());
        }
        params
    }
}

/// Lifecycle of a single paginated stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamState {
    /// Nothing requested yet
    #[default]
    NotStarted,
    /// A page fetch is in flight
    FetchingPage,
    /// Handing out buffered items of the current page
    EmittingItems,
    /// All pages consumed
    Completed,
    /// A page fetch failed; the error was yielded
    Failed,
    /// Stopped through a cancellation token
    Cancelled,
}

impl StreamState {
    /// Check if no further items or fetches will happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}
