//! Endpoint clients
//!
//! [`GitHubClient`] is the entry point. Each accessor returns a lightweight
//! client for one family of endpoints; all of them share the same
//! [`ApiConnection`].
//!
//! | Accessor           | Endpoints                                  |
//! |--------------------|--------------------------------------------|
//! | `repositories()`   | repos, branches, contributors, tags        |
//! | `issues()`         | issues, lock/unlock                        |
//! | `issue_comments()` | issue comments                             |
//! | `users()`          | users, followers, following                |
//! | `releases()`       | releases                                   |
//! | `statuses()`       | commit statuses                            |
//!
//! Collection methods validate their arguments eagerly and return a lazy
//! [`PageStream`](crate::pagination::PageStream); nothing is sent until the
//! stream is polled.

mod issue_comments;
mod issues;
mod releases;
mod repositories;
mod statuses;
mod users;

pub use issue_comments::IssueCommentsClient;
pub use issues::IssuesClient;
pub use releases::ReleasesClient;
pub use repositories::RepositoriesClient;
pub use statuses::CommitStatusClient;
pub use users::UsersClient;

use crate::api::ApiConnection;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{Connection, HttpConnection};
use crate::validate;
use std::sync::Arc;

/// GitHub REST API client
#[derive(Debug, Clone)]
pub struct GitHubClient {
    api: ApiConnection,
}

impl GitHubClient {
    /// Create a client over any transport
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self {
            api: ApiConnection::new(connection),
        }
    }

    /// Create a client using the default HTTP transport
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let connection = HttpConnection::with_config(config.http_config())?;
        Ok(Self::new(Arc::new(connection)))
    }

    /// Shared typed request path
    pub fn api(&self) -> &ApiConnection {
        &self.api
    }

    /// Repository endpoints
    pub fn repositories(&self) -> RepositoriesClient {
        RepositoriesClient::new(self.api.clone())
    }

    /// Issue endpoints
    pub fn issues(&self) -> IssuesClient {
        IssuesClient::new(self.api.clone())
    }

    /// Issue comment endpoints
    pub fn issue_comments(&self) -> IssueCommentsClient {
        IssueCommentsClient::new(self.api.clone())
    }

    /// User endpoints
    pub fn users(&self) -> UsersClient {
        UsersClient::new(self.api.clone())
    }

    /// Release endpoints
    pub fn releases(&self) -> ReleasesClient {
        ReleasesClient::new(self.api.clone())
    }

    /// Commit status endpoints
    pub fn statuses(&self) -> CommitStatusClient {
        CommitStatusClient::new(self.api.clone())
    }
}

/// Validate an owner/name pair and build `/repos/{owner}/{name}`
fn repo_path(owner: &str, name: &str) -> Result<String> {
    validate::not_empty(owner, "owner")?;
    validate::not_empty(name, "name")?;
    Ok(format!("/repos/{owner}/{name}"))
}

#[cfg(test)]
mod tests;
