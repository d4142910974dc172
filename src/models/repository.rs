//! Repositories, branches, and tags

use super::user::User;
use crate::types::SortDirection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: User,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
}

/// Commit reference embedded in branches and tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    pub sha: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// A branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub commit: CommitRef,
    #[serde(default)]
    pub protected: bool,
}

/// A tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryTag {
    pub name: String,
    pub commit: CommitRef,
    #[serde(default)]
    pub zipball_url: Option<String>,
    #[serde(default)]
    pub tarball_url: Option<String>,
}

/// Visibility filter for the current user's repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryVisibility {
    All,
    Public,
    Private,
}

/// Relationship filter for the current user's repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepositoryAffiliation {
    Owner,
    Collaborator,
    OrganizationMember,
}

/// Sort field for repository lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepositorySort {
    Created,
    Updated,
    Pushed,
    FullName,
}

/// Filters for `GET /user/repos`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepositoryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<RepositoryVisibility>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub affiliation: Vec<RepositoryAffiliation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<RepositorySort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
}

/// Body for creating a repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewRepository {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    pub private: bool,
    pub auto_init: bool,
}

impl NewRepository {
    /// Create a public repository body with just a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
