//! The three-way diff between desired and current user sets

use std::collections::HashMap;

use crate::normalize::{normalize_login, normalize_role_set, resolve_identity};
use crate::role::RoleMapping;
use crate::types::{DesiredUser, PlanAdd, PlanRemove, PlanUpdate, SwaUser, SyncPlan};

/// Compute the reconciliation plan between GitHub collaborators and the
/// users registered with a Static Web App.
///
/// - Desired logins absent from the current state become invitations.
/// - Logins present on both sides are compared by their prefix-scoped,
///   sorted role sets; a mismatch becomes an update.
/// - Current logins absent from the desired state become removals.
///
/// Current-state records whose identity cannot be resolved are skipped
/// entirely. Output order follows the insertion order of the inputs, so the
/// plan is deterministic for a given input. The function is pure: no I/O and
/// no mutation of its inputs.
pub fn compute_sync_plan(
    desired_users: &[DesiredUser],
    swa_users: &[SwaUser],
    mapping: &RoleMapping,
    role_prefix: &str,
) -> SyncPlan {
    // Desired map keyed by normalized login. Duplicate logins overwrite the
    // role but keep their original position.
    let mut desired_order: Vec<String> = Vec::new();
    let mut desired: HashMap<String, String> = HashMap::new();
    for user in desired_users {
        let login = normalize_login(&user.login);
        let role = mapping.role_for(user.level).to_string();
        if desired.insert(login.clone(), role).is_none() {
            desired_order.push(login);
        }
    }

    // Current map keyed by resolved identity; unidentifiable records are
    // invisible to the diff.
    let mut existing_order: Vec<String> = Vec::new();
    let mut existing: HashMap<String, &SwaUser> = HashMap::new();
    for user in swa_users {
        if let Some(login) = resolve_identity(user)
            && existing.insert(login.clone(), user).is_none()
        {
            existing_order.push(login);
        }
    }

    let mut to_add = Vec::new();
    let mut to_update = Vec::new();
    let mut to_remove = Vec::new();

    for login in &desired_order {
        let role = &desired[login];
        let Some(current) = existing.get(login) else {
            to_add.push(PlanAdd {
                login: login.clone(),
                role: role.clone(),
            });
            continue;
        };

        let current_set = normalize_role_set(current.roles.as_deref(), role_prefix);
        let desired_set = normalize_role_set(Some(role), role_prefix);
        if current_set != desired_set {
            to_update.push(PlanUpdate {
                login: login.clone(),
                role: role.clone(),
                current_roles: current.roles.clone().unwrap_or_default(),
            });
        }
    }

    for login in &existing_order {
        if !desired.contains_key(login) {
            to_remove.push(PlanRemove {
                login: login.clone(),
                current_roles: existing[login].roles.clone().unwrap_or_default(),
            });
        }
    }

    SyncPlan {
        to_add,
        to_update,
        to_remove,
    }
}
