//! Users and organizations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account type reported by GitHub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    User,
    Organization,
    Bot,
}

/// A user as embedded in other resources and returned by list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(rename = "type", default)]
    pub account_type: Option<AccountType>,
    #[serde(default)]
    pub site_admin: bool,
}

/// Full user profile returned by `GET /users/{login}` and `GET /user`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A repository contributor
///
/// Anonymous contributors have no account, only a name and email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub contributor_type: String,
    pub contributions: u64,
}

impl Contributor {
    /// Check if this contributor has no GitHub account
    pub fn is_anonymous(&self) -> bool {
        self.contributor_type == "Anonymous"
    }
}
