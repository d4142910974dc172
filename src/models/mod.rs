//! GitHub resource models
//!
//! Response types deserialize leniently (most fields default when absent).
//! Request filter types serialize into query parameters through
//! [`to_query`](crate::api::to_query); body types serialize as JSON.

mod issue;
mod release;
mod repository;
mod status;
mod user;

pub use issue::{
    Issue, IssueComment, IssueFilter, IssueRequest, IssueSort, IssueState, IssueUpdate, Label,
    LockReason, NewIssue, RepositoryIssueRequest,
};
pub use release::{NewRelease, Release};
pub use repository::{
    Branch, CommitRef, NewRepository, Repository, RepositoryAffiliation, RepositoryRequest,
    RepositorySort, RepositoryTag, RepositoryVisibility,
};
pub use status::{CombinedCommitStatus, CommitState, CommitStatus, NewCommitStatus};
pub use user::{AccountType, Contributor, Profile, User};
