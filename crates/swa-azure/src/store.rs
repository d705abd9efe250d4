//! Static Web App user store backed by the Azure CLI

use async_trait::async_trait;
use serde_json::Value;

use swa_plan::SwaUser;

use crate::cli::AzCli;
use crate::error::{AzureError, Result};

/// Authentication provider whose users participate in the sync.
const PROVIDER: &str = "GitHub";

/// A Static Web App addressed by name and resource group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwaTarget {
    /// Static Web App name.
    pub name: String,
    /// Azure resource group containing the app.
    pub resource_group: String,
}

impl SwaTarget {
    /// Create a target from name and resource group.
    pub fn new(name: impl Into<String>, resource_group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_group: resource_group.into(),
        }
    }
}

/// External user store operations the orchestrator depends on.
///
/// The production implementation shells out to `az staticwebapp`; tests
/// substitute in-memory fakes.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// List registered users, filtered to the GitHub provider.
    async fn list_users(&self, target: &SwaTarget) -> Result<Vec<SwaUser>>;

    /// Invite a user and return the invitation URL.
    async fn invite(
        &self,
        target: &SwaTarget,
        login: &str,
        role: &str,
        domain: &str,
        expiration_hours: u32,
    ) -> Result<String>;

    /// Overwrite a user's roles. An empty string clears all roles; removals
    /// are expressed this way, there is no delete operation.
    async fn set_roles(&self, target: &SwaTarget, login: &str, roles: &str) -> Result<()>;

    /// Resolve the app's default hostname.
    async fn default_hostname(&self, target: &SwaTarget) -> Result<String>;
}

/// [`UserStore`] implementation driving the `az` binary.
#[derive(Debug, Clone, Default)]
pub struct AzCliUserStore {
    cli: AzCli,
}

impl AzCliUserStore {
    /// Create a store using `az` from `PATH`.
    pub fn new() -> Self {
        Self { cli: AzCli::new() }
    }

    /// Create a store using a specific CLI runner.
    pub fn with_cli(cli: AzCli) -> Self {
        Self { cli }
    }
}

#[async_trait]
impl UserStore for AzCliUserStore {
    async fn list_users(&self, target: &SwaTarget) -> Result<Vec<SwaUser>> {
        let stdout = self
            .cli
            .run("staticwebapp users list", &list_users_args(target))
            .await?;
        let users: Vec<SwaUser> = serde_json::from_str(&stdout)?;
        let github_users: Vec<SwaUser> = users
            .into_iter()
            .filter(|user| is_github_provider(user.provider.as_deref()))
            .collect();
        tracing::debug!("fetched {} SWA GitHub users", github_users.len());
        Ok(github_users)
    }

    async fn invite(
        &self,
        target: &SwaTarget,
        login: &str,
        role: &str,
        domain: &str,
        expiration_hours: u32,
    ) -> Result<String> {
        let stdout = self
            .cli
            .run(
                "staticwebapp users invite",
                &invite_args(target, login, role, domain, expiration_hours),
            )
            .await?;
        let response: Value = serde_json::from_str(&stdout)?;
        parse_invite_url(&response).ok_or_else(|| AzureError::MissingInviteUrl {
            login: login.to_string(),
        })
    }

    async fn set_roles(&self, target: &SwaTarget, login: &str, roles: &str) -> Result<()> {
        self.cli
            .run(
                "staticwebapp users update",
                &set_roles_args(target, login, roles),
            )
            .await?;
        Ok(())
    }

    async fn default_hostname(&self, target: &SwaTarget) -> Result<String> {
        let stdout = self
            .cli
            .run("staticwebapp show", &default_hostname_args(target))
            .await?;
        let domain = stdout.trim();
        if domain.is_empty() {
            return Err(AzureError::EmptyHostname);
        }
        Ok(domain.to_string())
    }
}

/// Provider equality is trimmed and case-insensitive; the CLI has reported
/// both `GitHub` and `github` across versions.
fn is_github_provider(provider: Option<&str>) -> bool {
    provider.is_some_and(|p| p.trim().eq_ignore_ascii_case(PROVIDER))
}

/// Extract the invitation URL from an invite response, trying the field
/// names the CLI has used across versions.
fn parse_invite_url(response: &Value) -> Option<String> {
    ["invitationUrl", "inviteUrl", "url"]
        .into_iter()
        .find_map(|field| response.get(field))
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(String::from)
}

fn list_users_args(target: &SwaTarget) -> Vec<String> {
    to_args(&[
        "staticwebapp",
        "users",
        "list",
        "--name",
        &target.name,
        "--resource-group",
        &target.resource_group,
        "--output",
        "json",
    ])
}

fn invite_args(
    target: &SwaTarget,
    login: &str,
    role: &str,
    domain: &str,
    expiration_hours: u32,
) -> Vec<String> {
    to_args(&[
        "staticwebapp",
        "users",
        "invite",
        "--name",
        &target.name,
        "--resource-group",
        &target.resource_group,
        "--authentication-provider",
        PROVIDER,
        "--user-details",
        login,
        "--roles",
        role,
        "--domain",
        domain,
        "--invitation-expiration-in-hours",
        &expiration_hours.to_string(),
        "--output",
        "json",
    ])
}

fn set_roles_args(target: &SwaTarget, login: &str, roles: &str) -> Vec<String> {
    to_args(&[
        "staticwebapp",
        "users",
        "update",
        "--name",
        &target.name,
        "--resource-group",
        &target.resource_group,
        "--authentication-provider",
        PROVIDER,
        "--user-details",
        login,
        "--roles",
        roles,
    ])
}

fn default_hostname_args(target: &SwaTarget) -> Vec<String> {
    to_args(&[
        "staticwebapp",
        "show",
        "--name",
        &target.name,
        "--resource-group",
        &target.resource_group,
        "--query",
        "defaultHostname",
        "--output",
        "tsv",
    ])
}

fn to_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}
