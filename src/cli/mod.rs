//! CLI module
//!
//! Command-line interface over [`GitHubClient`](crate::GitHubClient).
//!
//! # Commands
//!
//! - `repo` - Show one repository
//! - `repos` - List repositories
//! - `branches` - List branches
//! - `issues` - List repository issues
//! - `comments` - List comments on an issue
//! - `releases` - List releases
//! - `followers` - List followers
//! - `statuses` - List commit statuses for a reference

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, RepoArg};
pub use runner::Runner;
