//! GitHub side of the publisher
//!
//! Run context, push event payloads, and the commit comparison API via octocrab.

pub mod client;
pub mod context;
pub mod error;
pub mod event;

pub(crate) mod compare_commits;

pub use client::{GitHubClient, GitHubClientBuilder};
pub use compare_commits::{COMPARE_PAGE_SIZE, ComparedCommit, ComparedCommitDetail};
pub use context::{GitHubContext, runner_debug};
pub use error::{GitHubError, GitHubResult};
pub use event::{PushCommit, PushEvent};

use std::future::Future;

/// Source of commit range comparisons.
///
/// Implemented by [`GitHubClient`]; tests substitute their own.
pub trait CompareCommits {
    /// Compare `base...head` in `owner/repo`, oldest commit first.
    fn compare(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
        max_commits: usize,
    ) -> impl Future<Output = GitHubResult<Vec<ComparedCommit>>> + Send;
}

impl CompareCommits for GitHubClient {
    fn compare(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
        max_commits: usize,
    ) -> impl Future<Output = GitHubResult<Vec<ComparedCommit>>> + Send {
        self.compare_commits(owner, repo, base, head, max_commits)
    }
}
