//! GitHub API boundary for swa-sync
//!
//! A thin `reqwest`-based client for the two GitHub surfaces the sync
//! touches:
//!
//! - the REST collaborators listing (paginated), classified onto the
//!   permission ladder and filtered by a minimum level, and
//! - the GraphQL Discussions API (category lookup, create, delete, list)
//!   used for run notifications and their cleanup.
//!
//! The orchestrator consumes these through the [`CollaboratorSource`] and
//! [`DiscussionApi`] traits; tests substitute in-memory fakes.

pub mod client;
pub mod collaborators;
pub mod discussions;
pub mod error;
pub mod repo;

pub use client::GitHubClient;
pub use collaborators::CollaboratorSource;
pub use discussions::{CategoryIds, DiscussionApi, DiscussionThread};
pub use error::{GitHubError, Result};
pub use repo::RepoRef;
