//! Top-level error type for a publish run

use crate::github::GitHubError;
use crate::octopus::OctopusError;
use thiserror::Error;

/// Anything that ends a publish run
#[derive(Debug, Error)]
pub enum PublishError {
    /// GitHub context or comparison failure
    #[error(transparent)]
    GitHub(#[from] GitHubError),

    /// Octopus submission failure
    #[error(transparent)]
    Octopus(#[from] OctopusError),
}

/// Convenience result alias for publish runs
pub type PublishResult<T> = Result<T, PublishError>;
