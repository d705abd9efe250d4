//! Error types for the orchestration layer

use swa_azure::AzureError;
use swa_github::GitHubError;

/// Result type for orchestration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fallback message for failures that carry no text of their own.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Errors that can occur during a sync or cleanup run
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid or missing configuration; raised before any external call
    #[error("{message}")]
    Config { message: String },

    /// The desired user set exceeds the Static Web App role assignment limit
    #[error(
        "SWA custom role assignment limit ({limit}) exceeded: {actual} users require custom roles"
    )]
    RoleLimitExceeded {
        /// The fixed assignment ceiling
        limit: usize,
        /// Distinct desired logins counted
        actual: usize,
    },

    /// Azure CLI failure
    #[error(transparent)]
    Azure(#[from] AzureError),

    /// GitHub API failure
    #[error(transparent)]
    GitHub(#[from] GitHubError),

    /// Creating a run notification failed
    #[error("failed to create discussion: {message}")]
    Notification {
        /// Underlying failure message
        message: String,
    },

    /// Writing run outputs failed
    #[error("failed to report outputs: {message}")]
    Report {
        /// Underlying failure message
        message: String,
    },

    /// A failure that carries no structured cause
    #[error("{message}")]
    Unknown {
        /// Raw coerced message, possibly empty
        message: String,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Render this error as a failure-report message.
    ///
    /// Diagnostic detail (captured stderr) is appended only when the primary
    /// message does not already contain it, and a blank message normalizes
    /// to the [`UNKNOWN_ERROR`] sentinel so the report is never empty.
    pub fn failure_message(&self) -> String {
        let mut message = self.to_string();
        if let Some(detail) = self.detail()
            && !message.contains(detail)
        {
            message = format!("{message}: {detail}");
        }
        let message = message.trim();
        if message.is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message.to_string()
        }
    }

    fn detail(&self) -> Option<&str> {
        match self {
            Error::Azure(err) => err.detail(),
            Error::GitHub(GitHubError::Status { body, .. }) if !body.trim().is_empty() => {
                Some(body.trim())
            }
            _ => None,
        }
    }
}
