//! In-memory fakes for the external boundaries

use std::io;
use std::sync::Mutex;

use async_trait::async_trait;

use swa_azure::{AzureError, SwaTarget, UserStore};
use swa_core::Reporter;
use swa_github::{
    CategoryIds, CollaboratorSource, DiscussionApi, DiscussionThread, GitHubError,
};
use swa_plan::{DesiredUser, PermissionLevel, SwaUser};

/// Collaborator source returning a fixed desired set.
pub struct FakeCollaborators {
    pub users: Vec<DesiredUser>,
}

#[async_trait]
impl CollaboratorSource for FakeCollaborators {
    async fn list_eligible(
        &self,
        _owner: &str,
        _repo: &str,
        minimum: PermissionLevel,
    ) -> swa_github::Result<Vec<DesiredUser>> {
        Ok(self
            .users
            .iter()
            .filter(|user| user.level.at_least(minimum))
            .cloned()
            .collect())
    }
}

/// User store recording every mutation it is asked to perform.
#[derive(Default)]
pub struct FakeStore {
    pub users: Vec<SwaUser>,
    pub list_calls: Mutex<usize>,
    /// (login, role, domain) per invitation.
    pub invites: Mutex<Vec<(String, String, String)>>,
    /// (login, roles) per role overwrite, in call order.
    pub role_sets: Mutex<Vec<(String, String)>>,
    /// Login whose invitation should fail.
    pub fail_invite_for: Option<String>,
}

#[async_trait]
impl UserStore for FakeStore {
    async fn list_users(&self, _target: &SwaTarget) -> swa_azure::Result<Vec<SwaUser>> {
        *self.list_calls.lock().unwrap() += 1;
        Ok(self.users.clone())
    }

    async fn invite(
        &self,
        _target: &SwaTarget,
        login: &str,
        role: &str,
        domain: &str,
        _expiration_hours: u32,
    ) -> swa_azure::Result<String> {
        if self.fail_invite_for.as_deref() == Some(login) {
            return Err(AzureError::CommandFailed {
                subcommand: "staticwebapp users invite".to_string(),
                code: 1,
                stderr: "invite blew up".to_string(),
            });
        }
        self.invites
            .lock()
            .unwrap()
            .push((login.to_string(), role.to_string(), domain.to_string()));
        Ok(format!("https://invite/{login}"))
    }

    async fn set_roles(
        &self,
        _target: &SwaTarget,
        login: &str,
        roles: &str,
    ) -> swa_azure::Result<()> {
        self.role_sets
            .lock()
            .unwrap()
            .push((login.to_string(), roles.to_string()));
        Ok(())
    }

    async fn default_hostname(&self, _target: &SwaTarget) -> swa_azure::Result<String> {
        Ok("my-app.azurestaticapps.net".to_string())
    }
}

/// Discussion API with configurable category and thread listings.
#[derive(Default)]
pub struct FakeDiscussions {
    pub missing_category: bool,
    pub fail_create: bool,
    /// (title, body) per created discussion.
    pub created: Mutex<Vec<(String, String)>>,
    pub threads: Vec<DiscussionThread>,
    pub deleted: Mutex<Vec<String>>,
}

#[async_trait]
impl DiscussionApi for FakeDiscussions {
    async fn resolve_category(
        &self,
        _owner: &str,
        _repo: &str,
        name: &str,
    ) -> swa_github::Result<CategoryIds> {
        if self.missing_category {
            return Err(GitHubError::CategoryNotFound {
                name: name.to_string(),
            });
        }
        Ok(CategoryIds {
            repository_id: "R_1".to_string(),
            category_id: "DIC_1".to_string(),
        })
    }

    async fn create_discussion(
        &self,
        _ids: &CategoryIds,
        title: &str,
        body: &str,
    ) -> swa_github::Result<String> {
        if self.fail_create {
            return Err(GitHubError::Graphql {
                message: "create denied".to_string(),
            });
        }
        let mut created = self.created.lock().unwrap();
        created.push((title.to_string(), body.to_string()));
        Ok(format!(
            "https://github.com/octo/app/discussions/{}",
            created.len()
        ))
    }

    async fn delete_discussion(&self, id: &str) -> swa_github::Result<()> {
        self.deleted.lock().unwrap().push(id.to_string());
        Ok(())
    }

    async fn list_discussions(
        &self,
        _owner: &str,
        _repo: &str,
        _category_id: &str,
    ) -> swa_github::Result<Vec<DiscussionThread>> {
        Ok(self.threads.clone())
    }
}

/// Reporter recording outputs, summaries, and warnings in memory.
#[derive(Default)]
pub struct RecordingReporter {
    pub outputs: Vec<(String, String)>,
    pub summaries: Vec<String>,
    pub warnings: Vec<String>,
    /// When set, every `set_output` call fails.
    pub fail_outputs: bool,
}

impl RecordingReporter {
    /// Value of the first recorded output with the given key.
    pub fn output(&self, key: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl Reporter for RecordingReporter {
    fn set_output(&mut self, key: &str, value: &str) -> io::Result<()> {
        if self.fail_outputs {
            return Err(io::Error::other("output sink unavailable"));
        }
        self.outputs.push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn write_summary(&mut self, markdown: &str) -> io::Result<()> {
        self.summaries.push(markdown.to_string());
        Ok(())
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}
