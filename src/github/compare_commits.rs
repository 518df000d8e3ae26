//! GitHub commit range comparison operation.
//!
//! Raw `GET` through Octocrab into local response types, one page at a time.

use crate::github::error::{GitHubError, GitHubResult};
use log::debug;
use octocrab::Octocrab;
use serde::Deserialize;
use std::sync::Arc;

/// Number of commits requested per page (GitHub API max).
pub const COMPARE_PAGE_SIZE: usize = 100;

/// A commit returned by the compare endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComparedCommit {
    /// Full commit SHA.
    pub sha: String,
    /// Git-level commit data.
    pub commit: ComparedCommitDetail,
}

/// The `commit` object nested in a compared commit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComparedCommitDetail {
    /// Full commit message.
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ComparisonPage {
    #[serde(default)]
    total_commits: usize,
    #[serde(default)]
    commits: Vec<ComparedCommit>,
}

/// Compare `base...head`, returning the newest `max_commits` commits oldest first.
///
/// The endpoint lists commits oldest first, so after the first page (which
/// reports the total) pages holding only older commits are skipped.
pub(crate) async fn compare_commits(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    base: impl Into<String>,
    head: impl Into<String>,
    max_commits: usize,
) -> GitHubResult<Vec<ComparedCommit>> {
    let owner = owner.into();
    let repo = repo.into();
    let base = base.into();
    let head = head.into();

    if max_commits == 0 {
        return Err(GitHubError::InvalidInput(
            "max_commits must be at least 1".to_string(),
        ));
    }
    if base.is_empty() || head.is_empty() {
        return Err(GitHubError::InvalidInput(format!(
            "Cannot compare '{base}...{head}': both refs are required"
        )));
    }

    let route_prefix = format!(
        "/repos/{}/{}/compare/{}...{}",
        urlencoding::encode(&owner),
        urlencoding::encode(&repo),
        urlencoding::encode(&base),
        urlencoding::encode(&head),
    );

    let fetch_page = |page: usize| {
        let inner = inner.clone();
        let url = format!("{route_prefix}?per_page={COMPARE_PAGE_SIZE}&page={page}");
        async move {
            let response: ComparisonPage = inner
                .get(url, None::<&()>)
                .await
                .map_err(GitHubError::from)?;
            debug!(
                "Compare page {page}: {} commit(s), {} total",
                response.commits.len(),
                response.total_commits
            );
            Ok::<_, GitHubError>(response)
        }
    };

    let first = fetch_page(1).await?;
    let total = first.total_commits;
    let mut received = first.commits.len();
    let mut commits = first.commits;

    let skip = total.saturating_sub(max_commits);
    let mut page = 1;
    if received == COMPARE_PAGE_SIZE && total > COMPARE_PAGE_SIZE {
        if skip >= COMPARE_PAGE_SIZE {
            commits.clear();
            page = skip / COMPARE_PAGE_SIZE;
        }
        while received == COMPARE_PAGE_SIZE && page * COMPARE_PAGE_SIZE < total {
            page += 1;
            let response = fetch_page(page).await?;
            received = response.commits.len();
            commits.extend(response.commits);
        }
    }

    if commits.len() > max_commits {
        let excess = commits.len() - max_commits;
        commits.drain(..excess);
    }
    Ok(commits)
}
