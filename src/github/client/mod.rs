//! GitHub API client wrapper
//!
//! Provides the repository operations the publisher needs without exposing Octocrab.
//!
//! # Examples
//!
//! ```rust,no_run
//! use push_build_information::GitHubClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gh = GitHubClient::builder().personal_token("ghp_...").build()?;
//!
//!     let comparison = gh
//!         .compare_commits("owner", "repo", "master", "feature/login", 100)
//!         .await?;
//!     println!("{} commits ahead", comparison.len());
//!
//!     Ok(())
//! }
//! ```

use crate::github::error::{GitHubError, GitHubResult};
use octocrab::Octocrab;
use std::sync::Arc;

mod repositories;

/// Public GitHub server; anything else is treated as GitHub Enterprise.
pub const GITHUB_DOT_COM: &str = "https://github.com";

/// GitHub API client wrapper that encapsulates Octocrab.
///
/// Cloning is cheap (Arc clone).
#[derive(Clone, Debug)]
pub struct GitHubClient {
    inner: Arc<Octocrab>,
}

impl GitHubClient {
    /// Create a new client builder
    #[must_use]
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::new()
    }
}

/// Builder for creating `GitHubClient`
pub struct GitHubClientBuilder {
    token: Option<String>,
    base_uri: Option<String>,
}

impl GitHubClientBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: None,
            base_uri: None,
        }
    }

    /// Set personal access token (or the workflow's `GITHUB_TOKEN`)
    pub fn personal_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set base URI (for GitHub Enterprise)
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = Some(uri.into());
        self
    }

    /// Derive the API base URI from the server the workflow runs on.
    ///
    /// `https://github.com` keeps Octocrab's default; an Enterprise server
    /// `https://ghe.example.com` maps to `https://ghe.example.com/api/v3`.
    pub fn server_url(self, server_url: &str) -> Self {
        let server_url = server_url.trim_end_matches('/');
        if server_url.is_empty() || server_url.eq_ignore_ascii_case(GITHUB_DOT_COM) {
            self
        } else {
            self.base_uri(format!("{server_url}/api/v3"))
        }
    }

    /// Build the `GitHubClient`
    pub fn build(self) -> GitHubResult<GitHubClient> {
        let mut builder = Octocrab::builder();

        if let Some(token) = self.token {
            builder = builder.personal_token(token);
        }

        if let Some(uri) = self.base_uri {
            builder = builder
                .base_uri(&uri)
                .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;
        }

        let octocrab = builder
            .build()
            .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;

        Ok(GitHubClient {
            inner: Arc::new(octocrab),
        })
    }
}

impl Default for GitHubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
