//! Error types for Azure CLI operations

/// Result type alias for Azure CLI operations
pub type Result<T> = std::result::Result<T, AzureError>;

/// Errors that can occur when driving the Azure CLI
#[derive(Debug, thiserror::Error)]
pub enum AzureError {
    /// The `az` binary could not be spawned
    #[error("failed to run az: {0}")]
    Io(#[from] std::io::Error),

    /// `az` exited with a non-zero status
    #[error("az {subcommand} failed with exit code {code}")]
    CommandFailed {
        /// The `az staticwebapp` subcommand that failed
        subcommand: String,
        /// Exit code from the subprocess (-1 when terminated by signal)
        code: i32,
        /// Captured stderr output
        stderr: String,
    },

    /// `az` output was not the expected JSON
    #[error("failed to parse az output: {0}")]
    Json(#[from] serde_json::Error),

    /// The invite response carried no usable invitation URL
    #[error("failed to retrieve invite URL for {login}")]
    MissingInviteUrl {
        /// Login the invitation was issued for
        login: String,
    },

    /// `az staticwebapp show` returned an empty hostname
    #[error("failed to resolve default hostname for Static Web App")]
    EmptyHostname,
}

impl AzureError {
    /// Diagnostic detail carried alongside the primary message, if any.
    ///
    /// For command failures this is the captured stderr; callers append it to
    /// the failure message only when not already contained in it.
    pub fn detail(&self) -> Option<&str> {
        match self {
            AzureError::CommandFailed { stderr, .. } if !stderr.trim().is_empty() => {
                Some(stderr.trim())
            }
            _ => None,
        }
    }
}
