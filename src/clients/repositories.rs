//! Repository endpoints

use super::repo_path;
use crate::api::{to_query, ApiConnection};
use crate::error::Result;
use crate::models::{Branch, Contributor, NewRepository, Repository, RepositoryRequest, RepositoryTag};
use crate::pagination::{ApiOptions, PageStream};
use crate::types::StringMap;
use crate::validate;

/// Repositories, their branches, contributors, and tags
#[derive(Debug, Clone)]
pub struct RepositoriesClient {
    api: ApiConnection,
}

impl RepositoriesClient {
    /// Create a client over an API connection
    pub fn new(api: ApiConnection) -> Self {
        Self { api }
    }

    /// `GET /repos/{owner}/{repo}`
    pub async fn get(&self, owner: &str, name: &str) -> Result<Repository> {
        let path = repo_path(owner, name)?;
        self.api.get(&path, StringMap::new()).await
    }

    /// `GET /user/repos`
    pub fn get_all_for_current(
        &self,
        request: Option<&RepositoryRequest>,
        options: &ApiOptions,
    ) -> Result<PageStream<Repository>> {
        options.validate()?;
        let query = match request {
            Some(request) => to_query(request)?,
            None => StringMap::new(),
        };
        Ok(self.api.get_all("/user/repos", query, options))
    }

    /// `GET /users/{login}/repos`
    pub fn get_all_for_user(
        &self,
        login: &str,
        options: &ApiOptions,
    ) -> Result<PageStream<Repository>> {
        validate::not_empty(login, "login")?;
        options.validate()?;
        Ok(self
            .api
            .get_all(&format!("/users/{login}/repos"), StringMap::new(), options))
    }

    /// `GET /orgs/{org}/repos`
    pub fn get_all_for_org(
        &self,
        organization: &str,
        options: &ApiOptions,
    ) -> Result<PageStream<Repository>> {
        validate::not_empty(organization, "organization")?;
        options.validate()?;
        Ok(self.api.get_all(
            &format!("/orgs/{organization}/repos"),
            StringMap::new(),
            options,
        ))
    }

    /// `GET /repositories`
    ///
    /// Every public repository in creation order. The server pages this
    /// with a `since` id rather than page numbers, so only `page_count` of
    /// `options` has an effect.
    pub fn get_all_public(&self, options: &ApiOptions) -> Result<PageStream<Repository>> {
        options.validate()?;
        Ok(self.api.get_all("/repositories", StringMap::new(), options))
    }

    /// `POST /user/repos`
    pub async fn create(&self, repository: &NewRepository) -> Result<Repository> {
        validate::not_empty(&repository.name, "repository.name")?;
        self.api.post("/user/repos", repository).await
    }

    /// `POST /orgs/{org}/repos`
    pub async fn create_in_org(
        &self,
        organization: &str,
        repository: &NewRepository,
    ) -> Result<Repository> {
        validate::not_empty(organization, "organization")?;
        validate::not_empty(&repository.name, "repository.name")?;
        self.api
            .post(&format!("/orgs/{organization}/repos"), repository)
            .await
    }

    /// `DELETE /repos/{owner}/{repo}`
    pub async fn delete(&self, owner: &str, name: &str) -> Result<()> {
        let path = repo_path(owner, name)?;
        self.api.delete(&path).await
    }

    /// `GET /repos/{owner}/{repo}/branches`
    pub fn get_all_branches(
        &self,
        owner: &str,
        name: &str,
        options: &ApiOptions,
    ) -> Result<PageStream<Branch>> {
        let path = repo_path(owner, name)?;
        options.validate()?;
        Ok(self
            .api
            .get_all(&format!("{path}/branches"), StringMap::new(), options))
    }

    /// `GET /repos/{owner}/{repo}/branches/{branch}`
    pub async fn get_branch(&self, owner: &str, name: &str, branch: &str) -> Result<Branch> {
        let path = repo_path(owner, name)?;
        validate::not_empty(branch, "branch")?;
        self.api
            .get(&format!("{path}/branches/{branch}"), StringMap::new())
            .await
    }

    /// `GET /repos/{owner}/{repo}/contributors`
    pub fn get_all_contributors(
        &self,
        owner: &str,
        name: &str,
        include_anonymous: bool,
        options: &ApiOptions,
    ) -> Result<PageStream<Contributor>> {
        let path = repo_path(owner, name)?;
        options.validate()?;
        let mut query = StringMap::new();
        if include_anonymous {
            query.insert("anon".to_string(), "1".to_string());
        }
        Ok(self
            .api
            .get_all(&format!("{path}/contributors"), query, options))
    }

    /// `GET /repos/{owner}/{repo}/tags`
    pub fn get_all_tags(
        &self,
        owner: &str,
        name: &str,
        options: &ApiOptions,
    ) -> Result<PageStream<RepositoryTag>> {
        let path = repo_path(owner, name)?;
        options.validate()?;
        Ok(self
            .api
            .get_all(&format!("{path}/tags"), StringMap::new(), options))
    }
}
