//! Run configuration resolution and validation
//!
//! Raw inputs arrive as strings (CLI flags or `INPUT_*` environment
//! variables from a workflow step) and are validated here, before any
//! external call is made.

use std::str::FromStr;

use swa_azure::SwaTarget;
use swa_github::RepoRef;
use swa_plan::{DEFAULT_ROLE_PREFIX, PermissionLevel, RoleMapping};

use crate::error::{Error, Result};

/// Default invitation link lifetime, in hours.
pub const DEFAULT_EXPIRATION_HOURS: u32 = 168;
/// Lowest accepted invitation lifetime.
pub const MIN_EXPIRATION_HOURS: u32 = 1;
/// Highest accepted invitation lifetime (one week).
pub const MAX_EXPIRATION_HOURS: u32 = 168;

/// Default discussion title template.
pub const DEFAULT_TITLE_TEMPLATE: &str = "SWA access invites for {swaName} ({repo}) - {date}";

/// Default discussion body template for per-run notifications.
pub const DEFAULT_BODY_TEMPLATE: &str = "This discussion contains SWA access invite links for \
**{swaName}** from **{repo}**.\n\n{summaryMarkdown}";

/// Default discussion title template for per-invite notifications.
pub const DEFAULT_INVITE_TITLE_TEMPLATE: &str =
    "SWA access invite for {login} on {swaName} - {date}";

/// Default discussion body template for per-invite notifications.
pub const DEFAULT_INVITE_BODY_TEMPLATE: &str = "Invite link for **@{login}** (`{role}`) on \
**{swaName}**: {inviteUrl}\n\nThe link expires {expirationHours} hours after creation.";

/// How run notifications are posted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationMode {
    /// One discussion per run, posted when the plan changed anything.
    #[default]
    PerRun,
    /// One discussion per issued invitation; nothing is posted on runs that
    /// only update or remove roles.
    PerInvite,
}

impl FromStr for NotificationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "per-run" => Ok(NotificationMode::PerRun),
            "per-invite" => Ok(NotificationMode::PerInvite),
            other => Err(Error::config(format!(
                "notification-mode must be 'per-run' or 'per-invite', got '{other}'"
            ))),
        }
    }
}

/// When the cleanup sweeper deletes a matching discussion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CleanupMode {
    /// Delete only discussions older than the expiration window.
    #[default]
    Expiration,
    /// Delete every matching discussion regardless of age.
    Immediate,
}

impl FromStr for CleanupMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "expiration" => Ok(CleanupMode::Expiration),
            "immediate" => Ok(CleanupMode::Immediate),
            other => Err(Error::config(format!(
                "cleanup-mode must be 'expiration' or 'immediate', got '{other}'"
            ))),
        }
    }
}

/// Raw, unvalidated inputs for a sync run.
#[derive(Debug, Clone, Default)]
pub struct SyncInputs {
    pub github_token: String,
    pub target_repo: Option<String>,
    /// Ambient `GITHUB_REPOSITORY` value, used when `target_repo` is absent.
    pub repo_context: Option<String>,
    pub swa_name: String,
    pub swa_resource_group: String,
    pub swa_domain: Option<String>,
    pub invitation_expiration_hours: Option<String>,
    pub role_for_admin: Option<String>,
    pub role_for_maintain: Option<String>,
    pub role_for_write: Option<String>,
    pub role_for_triage: Option<String>,
    pub role_for_read: Option<String>,
    pub role_prefix: Option<String>,
    pub minimum_permission: Option<String>,
    pub discussion_category_name: String,
    pub discussion_title_template: Option<String>,
    pub discussion_body_template: Option<String>,
    pub notification_mode: Option<String>,
}

/// Validated configuration for a sync run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// GitHub token for the REST and GraphQL calls.
    pub github_token: String,
    /// Target repository.
    pub repo: RepoRef,
    /// Static Web App target.
    pub swa: SwaTarget,
    /// Explicit invite domain; when absent the default hostname is resolved.
    pub swa_domain: Option<String>,
    /// Invitation link lifetime in hours.
    pub expiration_hours: u32,
    /// Permission-level to role-name mapping.
    pub mapping: RoleMapping,
    /// Prefix scoping which role tokens participate in comparison.
    pub role_prefix: String,
    /// Lowest collaborator permission that participates in the sync.
    pub minimum_permission: PermissionLevel,
    /// Discussion category for notifications.
    pub category_name: String,
    /// Notification title template.
    pub title_template: String,
    /// Notification body template.
    pub body_template: String,
    /// Notification posting mode.
    pub notification_mode: NotificationMode,
}

impl SyncConfig {
    /// Validate raw inputs into a run configuration.
    pub fn resolve(inputs: SyncInputs) -> Result<Self> {
        let github_token = required(&inputs.github_token, "github-token")?;
        let swa_name = required(&inputs.swa_name, "swa-name")?;
        let swa_resource_group = required(&inputs.swa_resource_group, "swa-resource-group")?;
        let category_name = required(&inputs.discussion_category_name, "discussion-category-name")?;

        let repo = RepoRef::resolve(
            inputs.target_repo.as_deref(),
            inputs.repo_context.as_deref(),
        )
        .map_err(|err| Error::config(err.to_string()))?;

        let expiration_hours =
            parse_expiration_hours(inputs.invitation_expiration_hours.as_deref())?;

        let notification_mode = match inputs.notification_mode.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => NotificationMode::default(),
        };

        let minimum_permission = match inputs.minimum_permission.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw
                .parse()
                .map_err(|err: swa_plan::role::ParsePermissionError| {
                    Error::config(err.to_string())
                })?,
            _ => PermissionLevel::Write,
        };

        let defaults = RoleMapping::default();
        let mapping = RoleMapping {
            admin: or_default(inputs.role_for_admin, defaults.admin),
            maintain: or_default(inputs.role_for_maintain, defaults.maintain),
            write: or_default(inputs.role_for_write, defaults.write),
            triage: or_default(inputs.role_for_triage, defaults.triage),
            read: or_default(inputs.role_for_read, defaults.read),
        };

        let (default_title, default_body) = match notification_mode {
            NotificationMode::PerRun => (DEFAULT_TITLE_TEMPLATE, DEFAULT_BODY_TEMPLATE),
            NotificationMode::PerInvite => {
                (DEFAULT_INVITE_TITLE_TEMPLATE, DEFAULT_INVITE_BODY_TEMPLATE)
            }
        };

        Ok(Self {
            github_token,
            repo,
            swa: SwaTarget::new(swa_name, swa_resource_group),
            swa_domain: inputs
                .swa_domain
                .filter(|domain| !domain.trim().is_empty()),
            expiration_hours,
            mapping,
            role_prefix: or_default(inputs.role_prefix, DEFAULT_ROLE_PREFIX.to_string()),
            minimum_permission,
            category_name,
            title_template: or_default(
                inputs.discussion_title_template,
                default_title.to_string(),
            ),
            body_template: or_default(inputs.discussion_body_template, default_body.to_string()),
            notification_mode,
        })
    }
}

/// Raw, unvalidated inputs for a cleanup run.
#[derive(Debug, Clone, Default)]
pub struct CleanupInputs {
    pub github_token: String,
    pub target_repo: Option<String>,
    /// Ambient `GITHUB_REPOSITORY` value, used when `target_repo` is absent.
    pub repo_context: Option<String>,
    pub discussion_category_name: String,
    pub discussion_title_template: Option<String>,
    pub cleanup_mode: Option<String>,
    pub expiration_hours: Option<String>,
}

/// Validated configuration for a cleanup run.
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    /// GitHub token for the GraphQL calls.
    pub github_token: String,
    /// Target repository.
    pub repo: RepoRef,
    /// Discussion category to sweep.
    pub category_name: String,
    /// Title template whose matches are eligible for deletion.
    pub title_template: String,
    /// Deletion policy.
    pub mode: CleanupMode,
    /// Age threshold for the expiration policy, in hours.
    pub expiration_hours: u32,
}

impl CleanupConfig {
    /// Validate raw inputs into a cleanup configuration.
    pub fn resolve(inputs: CleanupInputs) -> Result<Self> {
        let github_token = required(&inputs.github_token, "github-token")?;
        let category_name = required(&inputs.discussion_category_name, "discussion-category-name")?;

        let repo = RepoRef::resolve(
            inputs.target_repo.as_deref(),
            inputs.repo_context.as_deref(),
        )
        .map_err(|err| Error::config(err.to_string()))?;

        let mode = match inputs.cleanup_mode.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => CleanupMode::default(),
        };

        let expiration_hours = match inputs.expiration_hours.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_EXPIRATION_HOURS,
            Some(raw) => raw.parse::<u32>().ok().filter(|hours| *hours >= 1).ok_or_else(|| {
                Error::config("expiration-hours must be a positive integer number of hours")
            })?,
        };

        Ok(Self {
            github_token,
            repo,
            category_name,
            title_template: or_default(
                inputs.discussion_title_template,
                DEFAULT_TITLE_TEMPLATE.to_string(),
            ),
            mode,
            expiration_hours,
        })
    }
}

/// Validate and default the invitation expiration input.
///
/// Blank input resolves to [`DEFAULT_EXPIRATION_HOURS`]; anything else must
/// be an integer within the accepted window.
pub fn parse_expiration_hours(input: Option<&str>) -> Result<u32> {
    let Some(raw) = input.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(DEFAULT_EXPIRATION_HOURS);
    };
    raw.parse::<u32>()
        .ok()
        .filter(|hours| (MIN_EXPIRATION_HOURS..=MAX_EXPIRATION_HOURS).contains(hours))
        .ok_or_else(|| {
            Error::config(format!(
                "invitation-expiration-hours must be between {MIN_EXPIRATION_HOURS} and \
                 {MAX_EXPIRATION_HOURS} hours"
            ))
        })
}

fn required(value: &str, name: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::config(format!("missing required input: {name}")));
    }
    Ok(trimmed.to_string())
}

fn or_default(value: Option<String>, default: String) -> String {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(default)
}
