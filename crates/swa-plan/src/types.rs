//! Shared types for the reconciliation core

use serde::{Deserialize, Serialize};

use crate::role::PermissionLevel;

/// A collaborator the Static Web App should know about.
///
/// Produced from the authoritative GitHub collaborator listing. At most one
/// entry per normalized login survives into the plan; on duplicates the last
/// entry wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredUser {
    /// GitHub login name.
    pub login: String,
    /// Highest permission level the collaborator holds.
    pub level: PermissionLevel,
}

/// A user record as returned by `az staticwebapp users list`.
///
/// Identity resolution prefers `user_details` and falls back to
/// `display_name`; a record with neither is invisible to the diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwaUser {
    /// Static Web App user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// User details, normally the GitHub login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_details: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Comma-joined role string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<String>,
    /// Authentication provider (github, aad, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

/// A user to invite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanAdd {
    /// Normalized GitHub login.
    pub login: String,
    /// Role to grant.
    pub role: String,
}

/// An existing user whose roles need to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanUpdate {
    /// Normalized GitHub login.
    pub login: String,
    /// Role to set.
    pub role: String,
    /// Roles currently assigned, as reported by the Static Web App.
    pub current_roles: String,
}

/// An existing user whose roles need to be cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRemove {
    /// Normalized GitHub login.
    pub login: String,
    /// Roles currently assigned, as reported by the Static Web App.
    pub current_roles: String,
}

/// The full reconciliation plan.
///
/// Pure output of [`compute_sync_plan`](crate::plan::compute_sync_plan):
/// created fresh per run, consumed once by the orchestrator, then discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPlan {
    /// Users to invite.
    pub to_add: Vec<PlanAdd>,
    /// Users whose roles to overwrite.
    pub to_update: Vec<PlanUpdate>,
    /// Users whose roles to clear.
    pub to_remove: Vec<PlanRemove>,
}

impl SyncPlan {
    /// Whether the plan contains no work.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_update.is_empty() && self.to_remove.is_empty()
    }

    /// Total number of planned operations.
    pub fn len(&self) -> usize {
        self.to_add.len() + self.to_update.len() + self.to_remove.len()
    }
}
