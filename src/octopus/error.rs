//! Octopus Deploy API error types

use thiserror::Error;

/// Error types for Octopus Deploy API operations
#[derive(Debug, Error)]
pub enum OctopusError {
    /// Transport-level failure from reqwest
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Octopus API returned {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as returned by the server
        body: String,
    },

    /// No space with the requested name exists
    #[error("Space not found: {0}")]
    SpaceNotFound(String),

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Client setup/configuration error
    #[error("Client setup failed: {0}")]
    ClientSetup(String),
}

/// Convenience result alias for Octopus operations
pub type OctopusResult<T> = Result<T, OctopusError>;
