//! Release endpoints

use super::repo_path;
use crate::api::ApiConnection;
use crate::error::Result;
use crate::models::{NewRelease, Release};
use crate::pagination::{ApiOptions, PageStream};
use crate::types::StringMap;
use crate::validate;

/// Releases of a repository
#[derive(Debug, Clone)]
pub struct ReleasesClient {
    api: ApiConnection,
}

impl ReleasesClient {
    /// Create a client over an API connection
    pub fn new(api: ApiConnection) -> Self {
        Self { api }
    }

    /// `GET /repos/{owner}/{repo}/releases`
    pub fn get_all(
        &self,
        owner: &str,
        name: &str,
        options: &ApiOptions,
    ) -> Result<PageStream<Release>> {
        let path = repo_path(owner, name)?;
        options.validate()?;
        Ok(self
            .api
            .get_all(&format!("{path}/releases"), StringMap::new(), options))
    }

    /// `GET /repos/{owner}/{repo}/releases/{release_id}`
    pub async fn get(&self, owner: &str, name: &str, id: u64) -> Result<Release> {
        let path = repo_path(owner, name)?;
        validate::non_zero(id, "id")?;
        self.api
            .get(&format!("{path}/releases/{id}"), StringMap::new())
            .await
    }

    /// `GET /repos/{owner}/{repo}/releases/latest`
    pub async fn get_latest(&self, owner: &str, name: &str) -> Result<Release> {
        let path = repo_path(owner, name)?;
        self.api
            .get(&format!("{path}/releases/latest"), StringMap::new())
            .await
    }

    /// `POST /repos/{owner}/{repo}/releases`
    pub async fn create(&self, owner: &str, name: &str, release: &NewRelease) -> Result<Release> {
        let path = repo_path(owner, name)?;
        validate::not_empty(&release.tag_name, "release.tag_name")?;
        self.api.post(&format!("{path}/releases"), release).await
    }

    /// `DELETE /repos/{owner}/{repo}/releases/{release_id}`
    pub async fn delete(&self, owner: &str, name: &str, id: u64) -> Result<()> {
        let path = repo_path(owner, name)?;
        validate::non_zero(id, "id")?;
        self.api.delete(&format!("{path}/releases/{id}")).await
    }
}
