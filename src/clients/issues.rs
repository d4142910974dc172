//! Issue endpoints

use super::repo_path;
use crate::api::{to_query, ApiConnection};
use crate::error::Result;
use crate::models::{
    Issue, IssueRequest, IssueUpdate, LockReason, NewIssue, RepositoryIssueRequest,
};
use crate::pagination::{ApiOptions, PageStream};
use crate::types::StringMap;
use crate::validate;

/// Issues across repositories and within one repository
#[derive(Debug, Clone)]
pub struct IssuesClient {
    api: ApiConnection,
}

impl IssuesClient {
    /// Create a client over an API connection
    pub fn new(api: ApiConnection) -> Self {
        Self { api }
    }

    /// `GET /repos/{owner}/{repo}/issues/{number}`
    pub async fn get(&self, owner: &str, name: &str, number: u64) -> Result<Issue> {
        let path = repo_path(owner, name)?;
        validate::non_zero(number, "number")?;
        self.api
            .get(&format!("{path}/issues/{number}"), StringMap::new())
            .await
    }

    /// `GET /issues`
    ///
    /// Issues assigned to the authenticated user across all visible
    /// repositories, unless `request.filter` says otherwise.
    pub fn get_all_for_current(
        &self,
        request: Option<&IssueRequest>,
        options: &ApiOptions,
    ) -> Result<PageStream<Issue>> {
        options.validate()?;
        let query = match request {
            Some(request) => to_query(request)?,
            None => StringMap::new(),
        };
        Ok(self.api.get_all("/issues", query, options))
    }

    /// `GET /repos/{owner}/{repo}/issues`
    pub fn get_all_for_repository(
        &self,
        owner: &str,
        name: &str,
        request: Option<&RepositoryIssueRequest>,
        options: &ApiOptions,
    ) -> Result<PageStream<Issue>> {
        let path = repo_path(owner, name)?;
        options.validate()?;
        let query = match request {
            Some(request) => to_query(request)?,
            None => StringMap::new(),
        };
        Ok(self.api.get_all(&format!("{path}/issues"), query, options))
    }

    /// `POST /repos/{owner}/{repo}/issues`
    pub async fn create(&self, owner: &str, name: &str, issue: &NewIssue) -> Result<Issue> {
        let path = repo_path(owner, name)?;
        validate::not_empty(&issue.title, "issue.title")?;
        self.api.post(&format!("{path}/issues"), issue).await
    }

    /// `PATCH /repos/{owner}/{repo}/issues/{number}`
    pub async fn update(
        &self,
        owner: &str,
        name: &str,
        number: u64,
        update: &IssueUpdate,
    ) -> Result<Issue> {
        let path = repo_path(owner, name)?;
        validate::non_zero(number, "number")?;
        self.api
            .patch(&format!("{path}/issues/{number}"), update)
            .await
    }

    /// `PUT /repos/{owner}/{repo}/issues/{number}/lock`
    pub async fn lock(
        &self,
        owner: &str,
        name: &str,
        number: u64,
        reason: Option<LockReason>,
    ) -> Result<()> {
        let path = repo_path(owner, name)?;
        validate::non_zero(number, "number")?;
        let body = reason.map(|reason| serde_json::json!({ "lock_reason": reason }));
        self.api
            .put_empty(&format!("{path}/issues/{number}/lock"), body)
            .await
    }

    /// `DELETE /repos/{owner}/{repo}/issues/{number}/lock`
    pub async fn unlock(&self, owner: &str, name: &str, number: u64) -> Result<()> {
        let path = repo_path(owner, name)?;
        validate::non_zero(number, "number")?;
        self.api
            .delete(&format!("{path}/issues/{number}/lock"))
            .await
    }
}
