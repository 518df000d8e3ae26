//! Build information records and their submission.

use crate::octopus::client::OctopusClient;
use crate::octopus::error::{OctopusError, OctopusResult};
use crate::octopus::spaces::resolve_space_id;
use log::{debug, info};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A commit included in build information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuildInformationCommit {
    /// Commit SHA
    pub id: String,
    /// Commit message
    pub comment: String,
}

/// A package the build information is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackageIdentity {
    /// Package id, e.g. `Acme.Web`
    pub id: String,
    /// Package version
    pub version: String,
}

/// Build information for one workflow run, ready to push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateBuildInformationCommand {
    #[serde(rename = "spaceName")]
    pub space_name: String,
    pub build_environment: String,
    pub build_number: String,
    pub build_url: String,
    pub branch: String,
    pub vcs_type: String,
    pub vcs_root: String,
    pub vcs_commit_number: String,
    pub commits: Vec<BuildInformationCommit>,
    pub packages: Vec<PackageIdentity>,
}

/// What the server does when build information already exists for a package version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum OverwriteMode {
    /// Reject the push
    #[default]
    FailIfExists,
    /// Replace the existing build information
    OverwriteExisting,
    /// Keep the existing build information and report success
    IgnoreIfExists,
}

impl OverwriteMode {
    /// Wire value used in the `overwriteMode` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OverwriteMode::FailIfExists => "FailIfExists",
            OverwriteMode::OverwriteExisting => "OverwriteExisting",
            OverwriteMode::IgnoreIfExists => "IgnoreIfExists",
        }
    }
}

impl fmt::Display for OverwriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverwriteMode {
    type Err = OctopusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [
            OverwriteMode::FailIfExists,
            OverwriteMode::OverwriteExisting,
            OverwriteMode::IgnoreIfExists,
        ]
        .into_iter()
        .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| {
            OctopusError::InvalidInput(format!(
                "Unknown overwrite mode '{s}' (expected FailIfExists, OverwriteExisting or IgnoreIfExists)"
            ))
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct BuildInformationResource<'a> {
    package_id: &'a str,
    version: &'a str,
    octopus_build_information: BuildInformationDetails<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct BuildInformationDetails<'a> {
    build_environment: &'a str,
    build_number: &'a str,
    build_url: &'a str,
    branch: &'a str,
    vcs_type: &'a str,
    vcs_root: &'a str,
    vcs_commit_number: &'a str,
    commits: &'a [BuildInformationCommit],
}

impl<'a> BuildInformationDetails<'a> {
    fn from_command(command: &'a CreateBuildInformationCommand) -> Self {
        Self {
            build_environment: &command.build_environment,
            build_number: &command.build_number,
            build_url: &command.build_url,
            branch: &command.branch,
            vcs_type: &command.vcs_type,
            vcs_root: &command.vcs_root,
            vcs_commit_number: &command.vcs_commit_number,
            commits: &command.commits,
        }
    }
}

/// Pushes build information to an Octopus server.
#[derive(Clone, Debug)]
pub struct BuildInformationRepository {
    client: OctopusClient,
}

impl BuildInformationRepository {
    #[must_use]
    pub fn new(client: OctopusClient) -> Self {
        Self { client }
    }

    /// Push `command` once per package in its space.
    ///
    /// Packages are pushed in order and the first failure stops the push.
    pub async fn push(
        &self,
        command: &CreateBuildInformationCommand,
        overwrite_mode: OverwriteMode,
    ) -> OctopusResult<()> {
        if command.packages.is_empty() {
            info!("No packages specified; no build information pushed");
            return Ok(());
        }

        let space_id = resolve_space_id(&self.client, &command.space_name).await?;
        let path = format!(
            "/api/{}/build-information?overwriteMode={overwrite_mode}",
            urlencoding::encode(&space_id)
        );

        for package in &command.packages {
            let resource = BuildInformationResource {
                package_id: &package.id,
                version: &package.version,
                octopus_build_information: BuildInformationDetails::from_command(command),
            };
            debug!(
                "Pushing build information for {} {} to {space_id}",
                package.id, package.version
            );
            self.client.post_json(&path, &resource).await?;
        }

        Ok(())
    }
}
