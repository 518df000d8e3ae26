//! Octopus Deploy API operations
//!
//! Just enough of the Octopus REST API to push build information: space lookup
//! and the build-information endpoint, via reqwest.

pub mod build_information;
pub mod client;
pub mod error;
pub mod spaces;

pub use build_information::{
    BuildInformationCommit, BuildInformationRepository, CreateBuildInformationCommand,
    OverwriteMode, PackageIdentity,
};
pub use client::{Credentials, OctopusClient, OctopusClientBuilder};
pub use error::{OctopusError, OctopusResult};
pub use spaces::resolve_space_id;

use std::future::Future;

/// Sink for build information submissions.
///
/// Implemented by [`BuildInformationRepository`]; tests substitute their own.
pub trait PushBuildInformation {
    /// Submit `command` with the given overwrite policy.
    fn push(
        &self,
        command: &CreateBuildInformationCommand,
        overwrite_mode: OverwriteMode,
    ) -> impl Future<Output = OctopusResult<()>> + Send;
}

impl PushBuildInformation for BuildInformationRepository {
    fn push(
        &self,
        command: &CreateBuildInformationCommand,
        overwrite_mode: OverwriteMode,
    ) -> impl Future<Output = OctopusResult<()>> + Send {
        BuildInformationRepository::push(self, command, overwrite_mode)
    }
}
