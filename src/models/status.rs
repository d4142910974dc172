//! Commit statuses

use super::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of a commit status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitState {
    Pending,
    Success,
    Error,
    Failure,
}

/// A single status reported for a commit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitStatus {
    pub id: u64,
    pub state: CommitState,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_url: Option<String>,
    #[serde(default)]
    pub creator: Option<User>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Latest status per context, rolled up into one state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedCommitStatus {
    pub state: CommitState,
    pub sha: String,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub statuses: Vec<CommitStatus>,
}

/// Body for creating a commit status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCommitStatus {
    pub state: CommitState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl NewCommitStatus {
    /// Create a status body in the given state
    pub fn new(state: CommitState) -> Self {
        Self {
            state,
            target_url: None,
            description: None,
            context: None,
        }
    }
}
