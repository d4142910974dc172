//! Commit status endpoints

use super::repo_path;
use crate::api::ApiConnection;
use crate::error::Result;
use crate::models::{CombinedCommitStatus, CommitStatus, NewCommitStatus};
use crate::pagination::{ApiOptions, PageStream};
use crate::types::StringMap;
use crate::validate;

/// Statuses reported against commits
///
/// `reference` may be a SHA, a branch name, or a tag name.
#[derive(Debug, Clone)]
pub struct CommitStatusClient {
    api: ApiConnection,
}

impl CommitStatusClient {
    /// Create a client over an API connection
    pub fn new(api: ApiConnection) -> Self {
        Self { api }
    }

    /// `GET /repos/{owner}/{repo}/commits/{ref}/statuses`
    ///
    /// Newest first. There is no filtered variant; the endpoint accepts no
    /// filters beyond pagination.
    pub fn get_all_for_reference(
        &self,
        owner: &str,
        name: &str,
        reference: &str,
        options: &ApiOptions,
    ) -> Result<PageStream<CommitStatus>> {
        let path = repo_path(owner, name)?;
        validate::not_empty(reference, "reference")?;
        options.validate()?;
        Ok(self.api.get_all(
            &format!("{path}/commits/{reference}/statuses"),
            StringMap::new(),
            options,
        ))
    }

    /// `GET /repos/{owner}/{repo}/commits/{ref}/status`
    pub async fn get_combined(
        &self,
        owner: &str,
        name: &str,
        reference: &str,
    ) -> Result<CombinedCommitStatus> {
        let path = repo_path(owner, name)?;
        validate::not_empty(reference, "reference")?;
        self.api
            .get(&format!("{path}/commits/{reference}/status"), StringMap::new())
            .await
    }

    /// `POST /repos/{owner}/{repo}/statuses/{sha}`
    pub async fn create(
        &self,
        owner: &str,
        name: &str,
        sha: &str,
        status: &NewCommitStatus,
    ) -> Result<CommitStatus> {
        let path = repo_path(owner, name)?;
        validate::not_empty(sha, "sha")?;
        self.api.post(&format!("{path}/statuses/{sha}"), status).await
    }
}
