//! User endpoints

use crate::api::ApiConnection;
use crate::error::Result;
use crate::models::{Profile, User};
use crate::pagination::{ApiOptions, PageStream};
use crate::types::StringMap;
use crate::validate;

/// User profiles and follower graphs
#[derive(Debug, Clone)]
pub struct UsersClient {
    api: ApiConnection,
}

impl UsersClient {
    /// Create a client over an API connection
    pub fn new(api: ApiConnection) -> Self {
        Self { api }
    }

    /// `GET /users/{login}`
    pub async fn get(&self, login: &str) -> Result<Profile> {
        validate::not_empty(login, "login")?;
        self.api
            .get(&format!("/users/{login}"), StringMap::new())
            .await
    }

    /// `GET /user`
    pub async fn current(&self) -> Result<Profile> {
        self.api.get("/user", StringMap::new()).await
    }

    /// `GET /users/{login}/followers`
    pub fn get_all_followers(&self, login: &str, options: &ApiOptions) -> Result<PageStream<User>> {
        validate::not_empty(login, "login")?;
        options.validate()?;
        Ok(self.api.get_all(
            &format!("/users/{login}/followers"),
            StringMap::new(),
            options,
        ))
    }

    /// `GET /user/followers`
    pub fn get_all_followers_for_current(&self, options: &ApiOptions) -> Result<PageStream<User>> {
        options.validate()?;
        Ok(self.api.get_all("/user/followers", StringMap::new(), options))
    }

    /// `GET /users/{login}/following`
    pub fn get_all_following(&self, login: &str, options: &ApiOptions) -> Result<PageStream<User>> {
        validate::not_empty(login, "login")?;
        options.validate()?;
        Ok(self.api.get_all(
            &format!("/users/{login}/following"),
            StringMap::new(),
            options,
        ))
    }
}
