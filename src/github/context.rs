//! GitHub Actions run context.
//!
//! Everything the publisher needs to know about the workflow run, passed in
//! explicitly instead of being read from the process environment on demand.

use crate::github::error::{GitHubError, GitHubResult};
use crate::github::event::{PushCommit, PushEvent};
use log::warn;
use std::path::Path;

/// Default server when `GITHUB_SERVER_URL` is unset.
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Whether the runner asked for step debug logging (`RUNNER_DEBUG=1`).
pub fn runner_debug<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup("RUNNER_DEBUG").is_some_and(|v| v.trim() == "1")
}

/// GitHub Actions context metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitHubContext {
    /// Server URL (from GITHUB_SERVER_URL)
    pub server_url: String,
    /// Repository owner (from GITHUB_REPOSITORY)
    pub owner: String,
    /// Repository name (from GITHUB_REPOSITORY)
    pub repo: String,
    /// Commit SHA the run was triggered for (from GITHUB_SHA)
    pub sha: String,
    /// Ref the run was triggered for (from GITHUB_REF)
    pub git_ref: String,
    /// Run number (from GITHUB_RUN_NUMBER)
    pub run_number: u64,
    /// Run ID (from GITHUB_RUN_ID)
    pub run_id: u64,
    /// Parsed event payload (from the file at GITHUB_EVENT_PATH)
    pub push_event: Option<PushEvent>,
    /// Step debug logging enabled (RUNNER_DEBUG=1)
    pub debug: bool,
}

impl GitHubContext {
    /// Load the context from the runner's environment.
    pub fn from_env() -> GitHubResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the context through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> GitHubResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server_url = var("GITHUB_SERVER_URL")
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let (owner, repo) = match var("GITHUB_REPOSITORY") {
            Some(repository) => split_repository(&repository)?,
            None => (String::new(), String::new()),
        };

        let push_event = match var("GITHUB_EVENT_PATH") {
            Some(path) if Path::new(&path).exists() => Some(PushEvent::from_path(&path)?),
            Some(path) => {
                warn!("GITHUB_EVENT_PATH {path} does not exist");
                None
            }
            None => None,
        };

        Ok(Self {
            server_url,
            owner,
            repo,
            sha: var("GITHUB_SHA").unwrap_or_default(),
            git_ref: var("GITHUB_REF").unwrap_or_default(),
            run_number: parse_number("GITHUB_RUN_NUMBER", var("GITHUB_RUN_NUMBER"))?,
            run_id: parse_number("GITHUB_RUN_ID", var("GITHUB_RUN_ID"))?,
            push_event,
            debug: runner_debug(&lookup),
        })
    }

    /// `{server}/{owner}/{repo}`
    #[must_use]
    pub fn repository_url(&self) -> String {
        format!("{}/{}/{}", self.server_url, self.owner, self.repo)
    }

    /// `{server}/{owner}/{repo}/actions/runs/{run_id}`
    #[must_use]
    pub fn run_url(&self, run_id: u64) -> String {
        format!("{}/actions/runs/{run_id}", self.repository_url())
    }

    /// Commits attached to the triggering push, empty when there is none.
    #[must_use]
    pub fn push_commits(&self) -> &[PushCommit] {
        self.push_event
            .as_ref()
            .map_or(&[], |event| event.commits.as_slice())
    }
}

fn split_repository(repository: &str) -> GitHubResult<(String, String)> {
    match repository.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(GitHubError::InvalidInput(format!(
            "GITHUB_REPOSITORY must be 'owner/repo', got '{repository}'"
        ))),
    }
}

fn parse_number(name: &str, value: Option<String>) -> GitHubResult<u64> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| GitHubError::InvalidInput(format!("Invalid {name} '{value}': {e}"))),
        None => Ok(0),
    }
}
