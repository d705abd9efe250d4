//! Permission ladder and role mapping

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// GitHub repository permission level.
///
/// Levels are ordered: Read < Triage < Write < Maintain < Admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    /// Can read and clone the repository.
    Read,
    /// Can manage issues and pull requests without write access.
    Triage,
    /// Can push to the repository.
    Write,
    /// Can manage the repository without access to destructive actions.
    Maintain,
    /// Full administrative control.
    Admin,
}

impl PermissionLevel {
    /// All levels, highest first.
    pub const ALL: [PermissionLevel; 5] = [
        PermissionLevel::Admin,
        PermissionLevel::Maintain,
        PermissionLevel::Write,
        PermissionLevel::Triage,
        PermissionLevel::Read,
    ];

    /// Check whether this level grants at least the required level.
    pub fn at_least(self, required: PermissionLevel) -> bool {
        self >= required
    }

    /// Lowercase name of the level as GitHub spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            PermissionLevel::Admin => "admin",
            PermissionLevel::Maintain => "maintain",
            PermissionLevel::Write => "write",
            PermissionLevel::Triage => "triage",
            PermissionLevel::Read => "read",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized permission level name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePermissionError {
    /// The input that failed to parse.
    pub input: String,
}

impl fmt::Display for ParsePermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown permission level '{}' (expected one of: admin, maintain, write, triage, read)",
            self.input
        )
    }
}

impl std::error::Error for ParsePermissionError {}

impl FromStr for PermissionLevel {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(PermissionLevel::Admin),
            "maintain" => Ok(PermissionLevel::Maintain),
            "write" | "push" => Ok(PermissionLevel::Write),
            "triage" => Ok(PermissionLevel::Triage),
            "read" | "pull" => Ok(PermissionLevel::Read),
            _ => Err(ParsePermissionError {
                input: s.to_string(),
            }),
        }
    }
}

/// Total mapping from each permission level to a Static Web App role name.
///
/// The mapping has no error path: every ladder level resolves to a role
/// string. Defaults follow the `github-<level>` convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMapping {
    /// Role assigned to admin collaborators.
    pub admin: String,
    /// Role assigned to maintain collaborators.
    pub maintain: String,
    /// Role assigned to write collaborators.
    pub write: String,
    /// Role assigned to triage collaborators.
    pub triage: String,
    /// Role assigned to read collaborators.
    pub read: String,
}

impl RoleMapping {
    /// Look up the role name for a permission level.
    pub fn role_for(&self, level: PermissionLevel) -> &str {
        match level {
            PermissionLevel::Admin => &self.admin,
            PermissionLevel::Maintain => &self.maintain,
            PermissionLevel::Write => &self.write,
            PermissionLevel::Triage => &self.triage,
            PermissionLevel::Read => &self.read,
        }
    }
}

impl Default for RoleMapping {
    fn default() -> Self {
        Self {
            admin: "github-admin".to_string(),
            maintain: "github-maintain".to_string(),
            write: "github-write".to_string(),
            triage: "github-triage".to_string(),
            read: "github-read".to_string(),
        }
    }
}
