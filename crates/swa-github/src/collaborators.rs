//! Collaborator listing and permission classification

use async_trait::async_trait;

use swa_plan::{DesiredUser, PermissionLevel};

use crate::client::GitHubClient;
use crate::error::Result;

/// Page size for the collaborators listing.
const PER_PAGE: usize = 100;

/// Source of the desired-state user set.
#[async_trait]
pub trait CollaboratorSource: Send + Sync {
    /// List collaborators holding at least `minimum` permission, classified
    /// onto the permission ladder.
    async fn list_eligible(
        &self,
        owner: &str,
        repo: &str,
        minimum: PermissionLevel,
    ) -> Result<Vec<DesiredUser>>;
}

/// A collaborator as returned by the REST listing.
#[derive(Debug, Clone, serde::Deserialize)]
pub(crate) struct RestCollaborator {
    pub login: String,
    #[serde(default)]
    pub permissions: Option<RestPermissions>,
}

/// Permission booleans from the REST API.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub(crate) struct RestPermissions {
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub maintain: bool,
    #[serde(default)]
    pub push: bool,
    #[serde(default)]
    pub triage: bool,
    #[serde(default)]
    pub pull: bool,
}

/// Classify a collaborator to the highest permission level it holds.
///
/// Returns `None` for records without any permission data.
pub(crate) fn classify(collaborator: &RestCollaborator) -> Option<PermissionLevel> {
    let permissions = collaborator.permissions.as_ref()?;
    if permissions.admin {
        Some(PermissionLevel::Admin)
    } else if permissions.maintain {
        Some(PermissionLevel::Maintain)
    } else if permissions.push {
        Some(PermissionLevel::Write)
    } else if permissions.triage {
        Some(PermissionLevel::Triage)
    } else if permissions.pull {
        Some(PermissionLevel::Read)
    } else {
        None
    }
}

#[async_trait]
impl CollaboratorSource for GitHubClient {
    async fn list_eligible(
        &self,
        owner: &str,
        repo: &str,
        minimum: PermissionLevel,
    ) -> Result<Vec<DesiredUser>> {
        let mut desired = Vec::new();
        let mut page = 1usize;
        loop {
            let batch: Vec<RestCollaborator> = self
                .rest_get(&format!(
                    "/repos/{owner}/{repo}/collaborators?per_page={PER_PAGE}&affiliation=all&page={page}"
                ))
                .await?;
            let batch_len = batch.len();

            for collaborator in &batch {
                if let Some(level) = classify(collaborator)
                    && level.at_least(minimum)
                {
                    desired.push(DesiredUser {
                        login: collaborator.login.clone(),
                        level,
                    });
                }
            }

            if batch_len < PER_PAGE {
                break;
            }
            page += 1;
        }

        tracing::debug!("eligible collaborators: {}", desired.len());
        Ok(desired)
    }
}
