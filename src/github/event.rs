//! Push event payload delivered to the workflow through `GITHUB_EVENT_PATH`.

use crate::github::error::{GitHubError, GitHubResult};
use serde::Deserialize;
use std::path::Path;

/// The subset of a `push` webhook payload the publisher reads.
///
/// Unknown fields are ignored, so payloads of other events parse into an
/// event without commits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PushEvent {
    /// Commits in the push, oldest to newest as delivered.
    #[serde(default)]
    pub commits: Vec<PushCommit>,
}

/// One commit of a push event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PushCommit {
    /// Commit SHA.
    pub id: String,
    /// Commit message.
    #[serde(default)]
    pub message: String,
}

impl PushEvent {
    /// Parse a payload from JSON text.
    pub fn from_json(json: &str) -> GitHubResult<Self> {
        serde_json::from_str(json).map_err(|e| GitHubError::EventPayload(e.to_string()))
    }

    /// Read and parse the payload file the runner wrote.
    pub fn from_path(path: impl AsRef<Path>) -> GitHubResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            GitHubError::EventPayload(format!("Failed to read '{}': {e}", path.display()))
        })?;
        Self::from_json(&json)
    }
}
