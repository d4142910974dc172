//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, RepoArg};
use crate::clients::GitHubClient;
use crate::config::ClientConfig;
use crate::error::{Error, Result, ResultExt};
use crate::models::RepositoryIssueRequest;
use crate::pagination::{ApiOptions, PageStream};
use futures::StreamExt;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
    cancel: CancellationToken,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            cancel: CancellationToken::new(),
        }
    }

    /// Token cancelled on Ctrl-C; cancelling it stops any running stream
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.client_config()?;
        debug!("Using {config:?}");
        let client = GitHubClient::from_config(&config)?;
        let options = self.api_options(&config);

        let signal = self.cancel.clone();
        let ctrl_c = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted, cancelling");
                signal.cancel();
            }
        });

        let result = self.dispatch(&client, &options).await;
        ctrl_c.abort();
        result
    }

    async fn dispatch(&self, client: &GitHubClient, options: &ApiOptions) -> Result<()> {
        match &self.cli.command {
            Commands::Repo(repo) => {
                let (owner, name) = split_repo(repo)?;
                let repository = client.repositories().get(owner, name).await?;
                self.print(&repository)
            }
            Commands::Repos { user, org } => {
                let repos = client.repositories();
                let stream = match (user, org) {
                    (Some(user), _) => repos.get_all_for_user(user, options)?,
                    (None, Some(org)) => repos.get_all_for_org(org, options)?,
                    (None, None) => repos.get_all_for_current(None, options)?,
                };
                self.emit(stream).await
            }
            Commands::Branches(repo) => {
                let (owner, name) = split_repo(repo)?;
                let stream = client
                    .repositories()
                    .get_all_branches(owner, name, options)?;
                self.emit(stream).await
            }
            Commands::Issues { repo, state } => {
                let (owner, name) = split_repo(repo)?;
                let mut request = RepositoryIssueRequest::default();
                request.base.state = Some(*state);
                let stream =
                    client
                        .issues()
                        .get_all_for_repository(owner, name, Some(&request), options)?;
                self.emit(stream).await
            }
            Commands::Comments { repo, issue } => {
                let (owner, name) = split_repo(repo)?;
                let stream = client
                    .issue_comments()
                    .get_all_for_issue(owner, name, *issue, options)?;
                self.emit(stream).await
            }
            Commands::Releases(repo) => {
                let (owner, name) = split_repo(repo)?;
                let stream = client.releases().get_all(owner, name, options)?;
                self.emit(stream).await
            }
            Commands::Followers { user } => {
                let users = client.users();
                let stream = match user {
                    Some(user) => users.get_all_followers(user, options)?,
                    None => users.get_all_followers_for_current(options)?,
                };
                self.emit(stream).await
            }
            Commands::Statuses { repo, reference } => {
                let (owner, name) = split_repo(repo)?;
                let stream = client
                    .statuses()
                    .get_all_for_reference(owner, name, reference, options)?;
                self.emit(stream).await
            }
        }
    }

    /// Config file, then environment, then command-line flags
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        }
        .with_env_overrides();

        if let Some(token) = &self.cli.token {
            config.token = Some(token.clone());
        }
        if let Some(base_url) = &self.cli.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(page_size) = self.cli.page_size {
            config.page_size = Some(page_size);
        }
        config.validate()?;
        Ok(config)
    }

    fn api_options(&self, config: &ClientConfig) -> ApiOptions {
        ApiOptions {
            page_size: config.page_size,
            start_page: self.cli.start_page,
            page_count: self.cli.max_pages,
        }
    }

    /// Print items as they arrive, stopping at `--limit` or on cancellation
    async fn emit<T: Serialize>(&self, stream: PageStream<T>) -> Result<()> {
        let stream = stream
            .with_cancellation(self.cancel.clone())
            .take(self.cli.limit.unwrap_or(usize::MAX));
        futures::pin_mut!(stream);

        let mut count = 0usize;
        while let Some(item) = stream.next().await {
            self.print(&item?)?;
            count += 1;
        }

        if self.cancel.is_cancelled() {
            info!("Cancelled after {count} items");
        } else {
            debug!("Printed {count} items");
        }
        Ok(())
    }

    fn print<T: Serialize>(&self, item: &T) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(item),
            OutputFormat::Pretty => serde_json::to_string_pretty(item),
        }
        .context("Failed to serialize output")?;
        println!("{line}");
        Ok(())
    }
}

/// Split `owner/name`
fn split_repo(arg: &RepoArg) -> Result<(&str, &str)> {
    match arg.repository.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner, name))
        }
        _ => Err(Error::invalid_argument(
            "repository",
            format!("expected owner/name, got '{}'", arg.repository),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn repo(value: &str) -> RepoArg {
        RepoArg {
            repository: value.to_string(),
        }
    }

    #[test]
    fn test_split_repo() {
        let arg = repo("octocat/Hello-World");
        assert_eq!(split_repo(&arg).unwrap(), ("octocat", "Hello-World"));

        for bad in ["octocat", "/name", "owner/", "a/b/c"] {
            assert!(split_repo(&repo(bad)).unwrap_err().is_invalid_argument());
        }
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "octo-stream",
            "--token",
            "ghp_flag",
            "--base-url",
            "http://localhost:9999",
            "--page-size",
            "25",
            "--start-page",
            "2",
            "--max-pages",
            "3",
            "releases",
            "o/r",
        ])
        .unwrap();
        let runner = Runner::new(cli);

        let config = runner.client_config().unwrap();
        assert_eq!(config.token.as_deref(), Some("ghp_flag"));
        assert_eq!(config.base_url, "http://localhost:9999");

        let options = runner.api_options(&config);
        assert_eq!(
            options,
            ApiOptions::new()
                .with_page_size(25)
                .with_start_page(2)
                .with_page_count(3)
        );
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let cli = Cli::try_parse_from(["octo-stream", "--page-size", "0", "releases", "o/r"])
            .unwrap();
        assert!(Runner::new(cli).client_config().is_err());
    }
}
