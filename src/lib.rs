//! `push_build_information` - push GitHub Actions build information to Octopus Deploy
//!
//! Collects the commits and packages of a workflow run into a build information
//! record and submits it to an Octopus server. Commits come either from the push
//! that triggered the run or from a comparison against a base branch through the
//! GitHub API (octocrab).

// Module declarations
pub mod config;
pub mod error;
pub mod github;
pub mod octopus;
pub mod publish;

// Re-export configuration types
pub use config::{CommitSource, ConfigError, InputParameters};

// Re-export error types
pub use error::{PublishError, PublishResult};

// Re-export GitHub types
pub use github::{
    CompareCommits, ComparedCommit, GitHubClient, GitHubClientBuilder, GitHubContext,
    GitHubError, GitHubResult, PushCommit, PushEvent, runner_debug,
};

// Re-export Octopus types
pub use octopus::{
    BuildInformationCommit, BuildInformationRepository, CreateBuildInformationCommand,
    Credentials, OctopusClient, OctopusError, OverwriteMode, PackageIdentity,
    PushBuildInformation,
};

// Re-export the publisher
pub use publish::{
    BUILD_ENVIRONMENT, BuildInformationPublisher, HEADS_REF_PREFIX, VCS_TYPE, normalize_branch,
};
