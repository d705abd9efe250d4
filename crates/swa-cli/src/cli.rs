//! CLI argument parsing using clap derive
//!
//! Every input doubles as an `INPUT_*` environment variable, which is how a
//! GitHub Actions step passes `with:` inputs to the process, so the binary
//! runs unchanged inside a workflow or from a shell.

use clap::{Args, Parser, Subcommand};

/// Synchronize Azure Static Web App roles with GitHub repository permissions
#[derive(Parser, Debug)]
#[command(name = "swa-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synchronize SWA user roles from repository collaborator permissions
    ///
    /// Fetches collaborators, diffs them against the app's registered users,
    /// then invites, updates, and removes users to close the gap. Posts a
    /// discussion summarizing the run when anything changed.
    Sync(SyncArgs),

    /// Delete stale invite discussions
    ///
    /// Sweeps the notification category and deletes discussions whose title
    /// matches the configured template and whose age exceeds the expiration
    /// window (or all matches, in immediate mode).
    Cleanup(CleanupArgs),
}

/// Inputs for the sync command
#[derive(Args, Debug, Clone)]
pub struct SyncArgs {
    /// GitHub token with repo and discussion write access
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: String,

    /// Target repository (owner/repo); defaults to the current workflow repository
    #[arg(long, env = "INPUT_TARGET_REPO", overrides_with = "target_repo")]
    pub target_repo: Option<String>,

    /// Static Web App name
    #[arg(long, env = "INPUT_SWA_NAME")]
    pub swa_name: String,

    /// Azure resource group containing the Static Web App
    #[arg(long, env = "INPUT_SWA_RESOURCE_GROUP")]
    pub swa_resource_group: String,

    /// Domain for invite links; defaults to the app's default hostname
    #[arg(long, env = "INPUT_SWA_DOMAIN")]
    pub swa_domain: Option<String>,

    /// Invitation link lifetime in hours (1-168, default 168)
    #[arg(long, env = "INPUT_INVITATION_EXPIRATION_HOURS")]
    pub invitation_expiration_hours: Option<String>,

    /// Role granted to admin collaborators
    #[arg(long, env = "INPUT_ROLE_FOR_ADMIN")]
    pub role_for_admin: Option<String>,

    /// Role granted to maintain collaborators
    #[arg(long, env = "INPUT_ROLE_FOR_MAINTAIN")]
    pub role_for_maintain: Option<String>,

    /// Role granted to write collaborators
    #[arg(long, env = "INPUT_ROLE_FOR_WRITE")]
    pub role_for_write: Option<String>,

    /// Role granted to triage collaborators
    #[arg(long, env = "INPUT_ROLE_FOR_TRIAGE")]
    pub role_for_triage: Option<String>,

    /// Role granted to read collaborators
    #[arg(long, env = "INPUT_ROLE_FOR_READ")]
    pub role_for_read: Option<String>,

    /// Prefix scoping which role tokens participate in comparison
    #[arg(long, env = "INPUT_ROLE_PREFIX")]
    pub role_prefix: Option<String>,

    /// Lowest collaborator permission that participates (default: write)
    #[arg(long, env = "INPUT_MINIMUM_PERMISSION")]
    pub minimum_permission: Option<String>,

    /// Discussion category for run notifications
    #[arg(long, env = "INPUT_DISCUSSION_CATEGORY_NAME")]
    pub discussion_category_name: String,

    /// Discussion title template
    #[arg(long, env = "INPUT_DISCUSSION_TITLE_TEMPLATE")]
    pub discussion_title_template: Option<String>,

    /// Discussion body template
    #[arg(long, env = "INPUT_DISCUSSION_BODY_TEMPLATE")]
    pub discussion_body_template: Option<String>,

    /// Notification mode: per-run or per-invite (default: per-run)
    #[arg(long, env = "INPUT_NOTIFICATION_MODE")]
    pub notification_mode: Option<String>,
}

/// Inputs for the cleanup command
#[derive(Args, Debug, Clone)]
pub struct CleanupArgs {
    /// GitHub token with discussion write access
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: String,

    /// Target repository (owner/repo); defaults to the current workflow repository
    #[arg(long, env = "INPUT_TARGET_REPO")]
    pub target_repo: Option<String>,

    /// Discussion category to sweep
    #[arg(long, env = "INPUT_DISCUSSION_CATEGORY_NAME")]
    pub discussion_category_name: String,

    /// Title template whose matches are eligible for deletion
    #[arg(long, env = "INPUT_DISCUSSION_TITLE_TEMPLATE")]
    pub discussion_title_template: Option<String>,

    /// Cleanup mode: expiration or immediate (default: expiration)
    #[arg(long, env = "INPUT_CLEANUP_MODE")]
    pub cleanup_mode: Option<String>,

    /// Age threshold in hours for the expiration mode (default 168)
    #[arg(long, env = "INPUT_EXPIRATION_HOURS")]
    pub expiration_hours: Option<String>,
}
