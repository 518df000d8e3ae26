//! Repositories API methods

use super::GitHubClient;
use crate::github::compare_commits::ComparedCommit;
use crate::github::error::GitHubResult;

impl GitHubClient {
    /// Compare two refs, returning up to `max_commits` commits oldest first.
    pub async fn compare_commits(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
        base: impl Into<String>,
        head: impl Into<String>,
        max_commits: usize,
    ) -> GitHubResult<Vec<ComparedCommit>> {
        crate::github::compare_commits::compare_commits(
            self.inner.clone(),
            owner,
            repo,
            base,
            head,
            max_commits,
        )
        .await
    }
}
