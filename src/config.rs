//! Action inputs
//!
//! Inputs arrive as `INPUT_<NAME>` environment variables, the way the Actions
//! runner passes `with:` values to a step. A few fall back to the conventional
//! `OCTOPUS_*` variables so a workflow can configure them once at job level.

use crate::octopus::{Credentials, OverwriteMode};
use std::fmt;
use thiserror::Error;

/// Base branch compared against when none is given.
pub const DEFAULT_BASE_BRANCH: &str = "master";

/// Commit ceiling for base branch comparisons when none is given.
pub const DEFAULT_MAX_COMMITS: usize = 250;

/// Errors raised while reading inputs
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required input has no value
    #[error("Input required and not supplied: {0}")]
    MissingInput(&'static str),

    /// An input has a value that cannot be used
    #[error("Invalid value for input '{name}': {message}")]
    InvalidInput {
        /// Input name
        name: &'static str,
        /// What is wrong with it
        message: String,
    },
}

/// Convenience result alias for input parsing
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Where the commit list of the build information comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CommitSource {
    /// Commits attached to the push that triggered the run.
    #[default]
    LastPushEvent,
    /// Commits between `base_branch` and the run's branch, newest first.
    BaseBranchComparison {
        base_branch: String,
        max_commits: usize,
    },
}

/// Everything the step was configured with.
#[derive(Clone, PartialEq, Eq)]
pub struct InputParameters {
    /// Octopus server URL
    pub server: String,
    pub credentials: Credentials,
    /// Octopus space name
    pub space: String,
    /// Package ids, in the order given
    pub packages: Vec<String>,
    /// Version shared by all packages
    pub version: String,
    /// Branch override; the run's ref is used when unset
    pub branch: Option<String>,
    pub commit_source: CommitSource,
    pub overwrite_mode: OverwriteMode,
    /// Token for the GitHub API, needed for base branch comparisons
    pub github_token: Option<String>,
}

impl fmt::Debug for InputParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputParameters")
            .field("server", &self.server)
            .field("credentials", &self.credentials)
            .field("space", &self.space)
            .field("packages", &self.packages)
            .field("version", &self.version)
            .field("branch", &self.branch)
            .field("commit_source", &self.commit_source)
            .field("overwrite_mode", &self.overwrite_mode)
            .field("github_token", &self.github_token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl InputParameters {
    /// Read inputs from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read inputs through an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let input = |name: &str, fallback: Option<&str>| {
            var(&format!("INPUT_{}", name.to_uppercase())).or_else(|| fallback.and_then(var))
        };

        let server =
            input("server", Some("OCTOPUS_URL")).ok_or(ConfigError::MissingInput("server"))?;

        let credentials = match (
            input("api_key", Some("OCTOPUS_API_KEY")),
            input("access_token", Some("OCTOPUS_ACCESS_TOKEN")),
        ) {
            (Some(key), _) => Credentials::ApiKey(key),
            (None, Some(token)) => Credentials::AccessToken(token),
            (None, None) => return Err(ConfigError::MissingInput("api_key")),
        };

        let space =
            input("space", Some("OCTOPUS_SPACE")).ok_or(ConfigError::MissingInput("space"))?;
        let version = input("version", None).ok_or(ConfigError::MissingInput("version"))?;

        let packages = input("packages", None)
            .map(|value| parse_list(&value))
            .unwrap_or_default();

        let last_push_event_only = match input("last_push_event_only", None) {
            Some(value) => parse_bool("last_push_event_only", &value)?,
            None => true,
        };

        let commit_source = if last_push_event_only {
            CommitSource::LastPushEvent
        } else {
            let max_commits = match input("max_commits", None) {
                Some(value) => parse_max_commits(&value)?,
                None => DEFAULT_MAX_COMMITS,
            };
            CommitSource::BaseBranchComparison {
                base_branch: input("base_branch", None)
                    .unwrap_or_else(|| DEFAULT_BASE_BRANCH.to_string()),
                max_commits,
            }
        };

        let overwrite_mode = match input("overwrite_mode", None) {
            Some(value) => {
                value
                    .parse::<OverwriteMode>()
                    .map_err(|e| ConfigError::InvalidInput {
                        name: "overwrite_mode",
                        message: e.to_string(),
                    })?
            }
            None => OverwriteMode::default(),
        };

        Ok(Self {
            server,
            credentials,
            space,
            packages,
            version,
            branch: input("branch", None),
            commit_source,
            overwrite_mode,
            github_token: input("github_token", Some("GITHUB_TOKEN")),
        })
    }
}

/// Split a newline- or comma-separated list, dropping blank entries.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(['\n', ','])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(name: &'static str, value: &str) -> ConfigResult<bool> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ConfigError::InvalidInput {
            name,
            message: format!("expected 'true' or 'false', got '{value}'"),
        })
    }
}

fn parse_max_commits(value: &str) -> ConfigResult<usize> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidInput {
            name: "max_commits",
            message: format!("expected a positive integer, got '{value}'"),
        }),
    }
}
