//! Errors surfaced by the command-line shell.

use thiserror::Error;

use crate::clients::HttpError;
use crate::error::ConfigError;
use crate::rest::ResourceError;

/// Errors that end a shell command.
///
/// Every variant is printed to standard error and exits with status 1.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The user supplied an invalid argument.
    #[error("{0}")]
    Command(String),

    /// The client could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A resource operation failed.
    #[error(transparent)]
    Resource(ResourceError),

    /// Output could not be written.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// JSON output could not be rendered.
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ResourceError> for ShellError {
    fn from(error: ResourceError) -> Self {
        match error {
            ResourceError::Http(HttpError::Unauthorized(_)) => {
                Self::Command("Invalid credentials".to_string())
            }
            other => Self::Resource(other),
        }
    }
}
