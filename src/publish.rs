//! Assembles build information for a workflow run and pushes it to Octopus.

use crate::config::{CommitSource, InputParameters};
use crate::error::PublishResult;
use crate::github::{CompareCommits, ComparedCommit, GitHubContext, PushCommit};
use crate::octopus::{
    BuildInformationCommit, CreateBuildInformationCommand, PackageIdentity, PushBuildInformation,
};
use log::{debug, info, warn};

/// Prefix of fully qualified branch refs.
pub const HEADS_REF_PREFIX: &str = "refs/heads/";

/// Build environment reported for every run.
pub const BUILD_ENVIRONMENT: &str = "GitHub Actions";

/// VCS type reported for every run.
pub const VCS_TYPE: &str = "Git";

/// Logged after a successful push.
pub const SUCCESS_MESSAGE: &str = "Successfully pushed build information to Octopus";

/// Strip one leading `refs/heads/` from a ref, leaving anything else untouched.
#[must_use]
pub fn normalize_branch(branch: &str) -> &str {
    branch.strip_prefix(HEADS_REF_PREFIX).unwrap_or(branch)
}

/// Commits of a push event, in the order the event lists them.
#[must_use]
pub fn commits_from_push(commits: &[PushCommit]) -> Vec<BuildInformationCommit> {
    commits
        .iter()
        .map(|commit| BuildInformationCommit {
            id: commit.id.clone(),
            comment: commit.message.clone(),
        })
        .collect()
}

/// Commits of a comparison, newest first.
#[must_use]
pub fn commits_from_comparison(commits: Vec<ComparedCommit>) -> Vec<BuildInformationCommit> {
    commits
        .into_iter()
        .rev()
        .map(|commit| BuildInformationCommit {
            id: commit.sha,
            comment: commit.commit.message,
        })
        .collect()
}

/// Pair every package id with the shared version, keeping input order.
#[must_use]
pub fn package_identities(packages: &[String], version: &str) -> Vec<PackageIdentity> {
    packages
        .iter()
        .map(|id| PackageIdentity {
            id: id.clone(),
            version: version.to_string(),
        })
        .collect()
}

/// Publishes build information for one workflow run.
///
/// `C` answers commit comparisons and `P` receives the finished record; in
/// production these are [`crate::GitHubClient`] and
/// [`crate::octopus::BuildInformationRepository`].
pub struct BuildInformationPublisher<C, P> {
    context: GitHubContext,
    comparer: C,
    repository: P,
}

impl<C, P> BuildInformationPublisher<C, P>
where
    C: CompareCommits,
    P: PushBuildInformation,
{
    #[must_use]
    pub fn new(context: GitHubContext, comparer: C, repository: P) -> Self {
        Self {
            context,
            comparer,
            repository,
        }
    }

    /// Build the record and push it.
    ///
    /// Nothing is pushed when resolving the commit list fails.
    pub async fn publish(&self, parameters: &InputParameters, run_id: u64) -> PublishResult<()> {
        let command = self.build_command(parameters, run_id).await?;

        if self.context.debug {
            match serde_json::to_string_pretty(&command) {
                Ok(json) => info!("Build Information:\n{json}"),
                Err(e) => warn!("Could not serialize build information: {e}"),
            }
        }

        self.repository
            .push(&command, parameters.overwrite_mode)
            .await?;

        info!("{SUCCESS_MESSAGE}");
        Ok(())
    }

    /// Assemble the build information record without pushing it.
    pub async fn build_command(
        &self,
        parameters: &InputParameters,
        run_id: u64,
    ) -> PublishResult<CreateBuildInformationCommand> {
        let branch = normalize_branch(
            parameters
                .branch
                .as_deref()
                .unwrap_or(&self.context.git_ref),
        )
        .to_string();

        let commits = self.resolve_commits(&parameters.commit_source, &branch).await?;
        let repository_url = self.context.repository_url();

        Ok(CreateBuildInformationCommand {
            space_name: parameters.space.clone(),
            build_environment: BUILD_ENVIRONMENT.to_string(),
            build_number: self.context.run_number.to_string(),
            build_url: self.context.run_url(run_id),
            branch,
            vcs_type: VCS_TYPE.to_string(),
            vcs_root: repository_url,
            vcs_commit_number: self.context.sha.clone(),
            commits,
            packages: package_identities(&parameters.packages, &parameters.version),
        })
    }

    async fn resolve_commits(
        &self,
        source: &CommitSource,
        branch: &str,
    ) -> PublishResult<Vec<BuildInformationCommit>> {
        match source {
            CommitSource::LastPushEvent => Ok(commits_from_push(self.context.push_commits())),
            CommitSource::BaseBranchComparison {
                base_branch,
                max_commits,
            } => {
                debug!(
                    "Comparing commits in {}/{}: head {branch}, base {base_branch}",
                    self.context.owner, self.context.repo
                );
                let compared = self
                    .comparer
                    .compare(
                        &self.context.owner,
                        &self.context.repo,
                        base_branch,
                        branch,
                        *max_commits,
                    )
                    .await?;
                debug!("Comparison returned {} commit(s)", compared.len());
                Ok(commits_from_comparison(compared))
            }
        }
    }
}
