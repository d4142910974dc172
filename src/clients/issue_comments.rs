//! Issue comment endpoints

use super::repo_path;
use crate::api::ApiConnection;
use crate::error::Result;
use crate::models::IssueComment;
use crate::pagination::{ApiOptions, PageStream};
use crate::types::StringMap;
use crate::validate;
use serde_json::json;

/// Comments on issue and pull request conversations
#[derive(Debug, Clone)]
pub struct IssueCommentsClient {
    api: ApiConnection,
}

impl IssueCommentsClient {
    /// Create a client over an API connection
    pub fn new(api: ApiConnection) -> Self {
        Self { api }
    }

    /// `GET /repos/{owner}/{repo}/issues/comments/{comment_id}`
    pub async fn get(&self, owner: &str, name: &str, id: u64) -> Result<IssueComment> {
        let path = repo_path(owner, name)?;
        validate::non_zero(id, "id")?;
        self.api
            .get(&format!("{path}/issues/comments/{id}"), StringMap::new())
            .await
    }

    /// `GET /repos/{owner}/{repo}/issues/comments`
    pub fn get_all_for_repository(
        &self,
        owner: &str,
        name: &str,
        options: &ApiOptions,
    ) -> Result<PageStream<IssueComment>> {
        let path = repo_path(owner, name)?;
        options.validate()?;
        Ok(self
            .api
            .get_all(&format!("{path}/issues/comments"), StringMap::new(), options))
    }

    /// `GET /repos/{owner}/{repo}/issues/{number}/comments`
    pub fn get_all_for_issue(
        &self,
        owner: &str,
        name: &str,
        number: u64,
        options: &ApiOptions,
    ) -> Result<PageStream<IssueComment>> {
        let path = repo_path(owner, name)?;
        validate::non_zero(number, "number")?;
        options.validate()?;
        Ok(self.api.get_all(
            &format!("{path}/issues/{number}/comments"),
            StringMap::new(),
            options,
        ))
    }

    /// `POST /repos/{owner}/{repo}/issues/{number}/comments`
    pub async fn create(
        &self,
        owner: &str,
        name: &str,
        number: u64,
        body: &str,
    ) -> Result<IssueComment> {
        let path = repo_path(owner, name)?;
        validate::non_zero(number, "number")?;
        validate::not_empty(body, "body")?;
        self.api
            .post(
                &format!("{path}/issues/{number}/comments"),
                &json!({ "body": body }),
            )
            .await
    }

    /// `PATCH /repos/{owner}/{repo}/issues/comments/{comment_id}`
    pub async fn update(
        &self,
        owner: &str,
        name: &str,
        id: u64,
        body: &str,
    ) -> Result<IssueComment> {
        let path = repo_path(owner, name)?;
        validate::non_zero(id, "id")?;
        validate::not_empty(body, "body")?;
        self.api
            .patch(
                &format!("{path}/issues/comments/{id}"),
                &json!({ "body": body }),
            )
            .await
    }

    /// `DELETE /repos/{owner}/{repo}/issues/comments/{comment_id}`
    pub async fn delete(&self, owner: &str, name: &str, id: u64) -> Result<()> {
        let path = repo_path(owner, name)?;
        validate::non_zero(id, "id")?;
        self.api
            .delete(&format!("{path}/issues/comments/{id}"))
            .await
    }
}
