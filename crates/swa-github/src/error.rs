//! Error types for GitHub API operations

/// Result type alias for GitHub API operations
pub type Result<T> = std::result::Result<T, GitHubError>;

/// Errors that can occur when talking to the GitHub API
#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    /// Transport-level failure
    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status from the API
    #[error("GitHub API returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// GraphQL-level errors in an otherwise successful response
    #[error("GitHub GraphQL error: {message}")]
    Graphql {
        /// Joined error messages from the response
        message: String,
    },

    /// A required field was absent from an API response
    #[error("GitHub response missing {what}")]
    MissingField {
        /// Description of the missing field
        what: &'static str,
    },

    /// The requested discussion category does not exist
    #[error("discussion category \"{name}\" not found")]
    CategoryNotFound {
        /// The category name that was looked up
        name: String,
    },

    /// A target repository reference was not in `owner/repo` form
    #[error("invalid target repository format: {input}")]
    InvalidRepo {
        /// The rejected input
        input: String,
    },

    /// No repository reference was given and none is available from context
    #[error("no target repository given and no repository context available")]
    MissingRepoContext,
}
