//! CLI commands and argument parsing

use crate::types::ItemStateFilter;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Stream GitHub REST collections page by page
#[derive(Parser, Debug)]
#[command(name = "octo-stream")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API token (overrides config and GITHUB_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// API base URL (overrides config and GITHUB_API_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Items per page
    #[arg(long, global = true)]
    pub page_size: Option<u32>,

    /// First page to request
    #[arg(long, global = true)]
    pub start_page: Option<u32>,

    /// Maximum number of pages to fetch
    #[arg(long, global = true)]
    pub max_pages: Option<u32>,

    /// Stop after this many items
    #[arg(short, long, global = true)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Repository argument in `owner/name` form
#[derive(Args, Debug, Clone)]
pub struct RepoArg {
    /// Repository as owner/name
    pub repository: String,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a single repository
    Repo(RepoArg),

    /// List repositories of the current user, another user, or an organization
    Repos {
        /// List this user's public repositories
        #[arg(long, conflicts_with = "org")]
        user: Option<String>,

        /// List this organization's repositories
        #[arg(long)]
        org: Option<String>,
    },

    /// List branches of a repository
    Branches(RepoArg),

    /// List issues of a repository
    Issues {
        #[command(flatten)]
        repo: RepoArg,

        /// Issue state filter
        #[arg(long, default_value = "open")]
        state: ItemStateFilter,
    },

    /// List comments on an issue
    Comments {
        #[command(flatten)]
        repo: RepoArg,

        /// Issue number
        #[arg(long)]
        issue: u64,
    },

    /// List releases of a repository
    Releases(RepoArg),

    /// List followers of a user (or the current user)
    Followers {
        /// User login
        #[arg(long)]
        user: Option<String>,
    },

    /// List statuses for a commit reference
    Statuses {
        #[command(flatten)]
        repo: RepoArg,

        /// SHA, branch, or tag name
        #[arg(long)]
        reference: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one item per line)
    Json,
    /// Indented JSON
    Pretty,
}
