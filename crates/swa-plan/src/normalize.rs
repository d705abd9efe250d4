//! Identity and role-string normalization
//!
//! Login comparison is case-insensitive and whitespace-trimmed everywhere in
//! the pipeline; role comparison is order-insensitive and scoped to a
//! configurable prefix so provider-injected defaults (`anonymous`,
//! `authenticated`) never trigger spurious updates.

use crate::types::SwaUser;

/// Default prefix scoping which role tokens participate in comparison.
pub const DEFAULT_ROLE_PREFIX: &str = "github-";

/// Normalize a GitHub login for comparison: trim and lowercase.
pub fn normalize_login(login: &str) -> String {
    login.trim().to_lowercase()
}

/// Resolve the identity of a Static Web App user record.
///
/// Prefers `user_details`, falls back to `display_name`. Returns `None` when
/// neither is present after trimming; such records are excluded from the
/// diff entirely (neither updated nor removed).
pub fn resolve_identity(user: &SwaUser) -> Option<String> {
    for candidate in [&user.user_details, &user.display_name] {
        if let Some(value) = candidate
            && !value.trim().is_empty()
        {
            return Some(normalize_login(value));
        }
    }
    None
}

/// Normalize a comma-joined role string for comparison.
///
/// Splits on commas, trims and lowercases each entry, drops entries not
/// starting with `role_prefix`, sorts lexically, and rejoins with commas.
/// Empty or absent input normalizes to the empty string.
pub fn normalize_role_set(roles: Option<&str>, role_prefix: &str) -> String {
    let Some(roles) = roles else {
        return String::new();
    };
    let mut entries: Vec<String> = roles
        .split(',')
        .map(|role| role.trim().to_lowercase())
        .filter(|role| role.starts_with(role_prefix))
        .collect();
    entries.sort();
    entries.join(",")
}
