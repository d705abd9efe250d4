//! Run summary rendering

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::results::{InvitedUser, RemovedUser, UpdatedUser};

/// Overall status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// The run completed every stage.
    Success,
    /// The run aborted; partial results may exist.
    Failure,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Success => f.write_str("success"),
            RunStatus::Failure => f.write_str("failure"),
        }
    }
}

/// Parameters for the summary renderer.
#[derive(Debug, Clone, Copy)]
pub struct SummaryParams<'a> {
    /// Target repository in `owner/repo` form.
    pub repo: &'a str,
    /// Static Web App name.
    pub swa_name: &'a str,
    /// Invitations issued.
    pub added: &'a [InvitedUser],
    /// Role updates applied.
    pub updated: &'a [UpdatedUser],
    /// Users whose roles were cleared.
    pub removed: &'a [RemovedUser],
    /// Notification URLs, one line rendered per entry.
    pub notification_urls: &'a [String],
    /// Run status.
    pub status: RunStatus,
    /// Failure message, rendered only for failed runs.
    pub failure_message: Option<&'a str>,
}

/// Render the run summary markdown.
///
/// Fixed-order header lines, then sections for invited, updated, and removed
/// users; empty sections are omitted entirely.
pub fn build_summary(params: &SummaryParams<'_>) -> String {
    let mut lines = vec![
        format!("- Status: {}", params.status),
        format!("- Repository: {}", params.repo),
        format!("- Static Web App: {}", params.swa_name),
        format!("- Added: {}", params.added.len()),
        format!("- Updated: {}", params.updated.len()),
        format!("- Removed: {}", params.removed.len()),
    ];

    for url in params.notification_urls {
        lines.push(format!("- Discussion: {url}"));
    }

    if params.status == RunStatus::Failure
        && let Some(message) = params.failure_message
    {
        lines.push(format!("- Error: {message}"));
    }

    let mut sections: Vec<String> = Vec::new();

    if !params.added.is_empty() {
        let mut section = vec!["### Invited users".to_string()];
        section.extend(params.added.iter().map(|invite| {
            format!(
                "- @{} ({}) - [Invite link]({})",
                invite.login, invite.role, invite.invite_url
            )
        }));
        sections.push(section.join("\n"));
    }

    if !params.updated.is_empty() {
        let mut section = vec!["### Updated roles".to_string()];
        section.extend(
            params
                .updated
                .iter()
                .map(|update| format!("- @{} → {}", update.login, update.role)),
        );
        sections.push(section.join("\n"));
    }

    if !params.removed.is_empty() {
        let mut section = vec!["### Removed users".to_string()];
        section.extend(
            params
                .removed
                .iter()
                .map(|user| format!("- @{}", user.login)),
        );
        sections.push(section.join("\n"));
    }

    let header = lines.join("\n");
    let body = sections.join("\n\n");
    [header, body]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
