// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # octo-stream
//!
//! A GitHub REST API client whose collection endpoints return lazy,
//! cancellable streams instead of fully materialized lists.
//!
//! ## Features
//!
//! - **Lazy pagination**: a page is requested only when the consumer needs
//!   more items than are buffered
//! - **Link header cursors**: continuation URLs are followed verbatim
//! - **Early stop**: dropping the stream, `take(n)`, or a `CancellationToken`
//!   ends it without fetching further pages
//! - **Swappable transport**: every request goes through the `Connection` trait
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use octo_stream::{ApiOptions, ClientConfig, GitHubClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::default().with_env_overrides();
//!     let client = GitHubClient::from_config(&config)?;
//!
//!     let options = ApiOptions::new().with_page_size(50);
//!     let mut repos = client.repositories().get_all_for_org("rust-lang", &options)?;
//!     while let Some(repo) = repos.try_next().await? {
//!         println!("{}", repo.full_name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          GitHubClient                           │
//! │ repositories() issues() issue_comments() users() releases() ... │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴──────────────────────────────────┐
//! │                         ApiConnection                           │
//! │        request<T>(verb, path)      get_all<T>(path, options)    │
//! └──────────────────────────────┬──────────────────────────────────┘
//!                                │
//! ┌────────────────────┬─────────┴──────────┬───────────────────────┐
//! │     Connection     │     PageStream     │       Observer        │
//! ├────────────────────┼────────────────────┼───────────────────────┤
//! │ HttpConnection     │ single-flight      │ on_next → Flow        │
//! │ status mapping     │ Link header cursor │ on_error              │
//! │ bearer token       │ cancellation       │ on_completed          │
//! └────────────────────┴────────────────────┴───────────────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Argument validation
pub mod validate;

/// Client configuration
pub mod config;

/// HTTP transport
pub mod http;

/// Lazy paginated streams
pub mod pagination;

/// Generic typed request path
pub mod api;

/// GitHub resource models
pub mod models;

/// Endpoint clients
pub mod clients;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use api::{to_query, ApiConnection};
pub use clients::GitHubClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http::{ApiRequest, ApiResponse, Connection, HttpConnection, HttpConnectionConfig};
pub use pagination::{
    paginate, subscribe, ApiOptions, Completion, Cursor, Flow, Observer, Page, PageStream,
    StreamState,
};
pub use tokio_util::sync::CancellationToken;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
