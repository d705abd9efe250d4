//! Accumulated results of a sync run

use serde::{Deserialize, Serialize};

/// An invitation that was issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitedUser {
    /// GitHub login.
    pub login: String,
    /// Role granted.
    pub role: String,
    /// Invitation URL returned by the user store.
    pub invite_url: String,
}

/// A role update that was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedUser {
    /// GitHub login.
    pub login: String,
    /// Role now assigned.
    pub role: String,
}

/// A user whose roles were cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedUser {
    /// GitHub login.
    pub login: String,
}

/// Incrementally accumulated outcome of a sync run.
///
/// Mutated as the execution loop progresses so that partial progress is
/// preserved and reported even when a later stage fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResults {
    /// Target repository in `owner/repo` form.
    pub repo_full_name: String,
    /// Static Web App name.
    pub swa_name: String,
    /// URLs of created notifications (empty when none were posted).
    pub notification_urls: Vec<String>,
    /// Rendered run summary markdown.
    pub summary: String,
    /// Invitations issued.
    pub added: Vec<InvitedUser>,
    /// Role updates applied.
    pub updated: Vec<UpdatedUser>,
    /// Users whose roles were cleared.
    pub removed: Vec<RemovedUser>,
}

impl SyncResults {
    /// Create an empty result set for a run against the given targets.
    pub fn new(repo_full_name: impl Into<String>, swa_name: impl Into<String>) -> Self {
        Self {
            repo_full_name: repo_full_name.into(),
            swa_name: swa_name.into(),
            ..Self::default()
        }
    }

    /// Whether the run changed anything.
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.updated.is_empty() || !self.removed.is_empty()
    }
}
