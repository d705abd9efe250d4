//! The sync orchestrator
//!
//! Sequences a run end to end: resolve the notification category and invite
//! domain, fetch the desired state (collaborators), guard the assignment
//! limit, fetch the current state (registered users), compute the plan,
//! execute it, post notifications, and report outputs. Every stage can fail
//! and short-circuits the rest, but results accumulated so far are kept and
//! rendered into a failure-status summary; the summary is written regardless
//! of outcome.
//!
//! All external calls are sequential. The user store is not safe for
//! concurrent mutation of one app, and invitations must land before the
//! same login could be updated or removed in the same run.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::Utc;

use swa_azure::UserStore;
use swa_github::{CategoryIds, CollaboratorSource, DiscussionApi};
use swa_plan::{DesiredUser, compute_sync_plan, normalize_login};

use crate::config::{NotificationMode, SyncConfig};
use crate::error::{Error, Result};
use crate::report::Reporter;
use crate::results::{InvitedUser, RemovedUser, SyncResults, UpdatedUser};
use crate::summary::{RunStatus, SummaryParams, build_summary};
use crate::templates::fill_template;

/// Azure Static Web Apps cap on users holding custom roles.
pub const SWA_CUSTOM_ROLE_ASSIGNMENT_LIMIT: usize = 25;

/// Final outcome of a run, returned alongside the reported outputs.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Overall status.
    pub status: RunStatus,
    /// Failure message for failed runs, never blank.
    pub failure_message: Option<String>,
    /// Accumulated results, preserved on failure.
    pub results: SyncResults,
}

/// Orchestrates one synchronization run.
pub struct SyncRunner<'a> {
    config: &'a SyncConfig,
    collaborators: &'a dyn CollaboratorSource,
    store: &'a dyn UserStore,
    discussions: &'a dyn DiscussionApi,
}

impl<'a> SyncRunner<'a> {
    /// Create a runner over the three external boundaries.
    pub fn new(
        config: &'a SyncConfig,
        collaborators: &'a dyn CollaboratorSource,
        store: &'a dyn UserStore,
        discussions: &'a dyn DiscussionApi,
    ) -> Self {
        Self {
            config,
            collaborators,
            store,
            discussions,
        }
    }

    /// Run the sync to completion.
    ///
    /// Never returns an error: failures are folded into the outcome and the
    /// summary, and the summary is written best-effort whether the run
    /// succeeded or not.
    pub async fn run(&self, reporter: &mut dyn Reporter) -> RunOutcome {
        let mut results = SyncResults::new(
            self.config.repo.full_name(),
            self.config.swa.name.clone(),
        );

        let outcome = match self.execute(&mut results, reporter).await {
            Ok(()) => RunOutcome {
                status: RunStatus::Success,
                failure_message: None,
                results,
            },
            Err(err) => {
                let message = err.failure_message();
                tracing::error!("sync failed: {}", message);
                // An already-built summary is kept as-is; only a run that
                // failed before building one gets a failure-shaped summary.
                if results.summary.is_empty() {
                    results.summary = build_summary(&SummaryParams {
                        repo: &results.repo_full_name,
                        swa_name: &results.swa_name,
                        added: &results.added,
                        updated: &results.updated,
                        removed: &results.removed,
                        notification_urls: &results.notification_urls,
                        status: RunStatus::Failure,
                        failure_message: Some(&message),
                    });
                }
                RunOutcome {
                    status: RunStatus::Failure,
                    failure_message: Some(message),
                    results,
                }
            }
        };

        if !outcome.results.summary.is_empty()
            && let Err(err) = reporter.write_summary(&outcome.results.summary)
        {
            tracing::warn!("failed to write run summary: {}", err);
        }

        outcome
    }

    async fn execute(&self, results: &mut SyncResults, reporter: &mut dyn Reporter) -> Result<()> {
        let config = self.config;

        // Resolve the notification category and the invite domain before
        // touching any user state; both are fatal when unavailable.
        let category_ids = self
            .discussions
            .resolve_category(&config.repo.owner, &config.repo.repo, &config.category_name)
            .await?;

        let domain = match &config.swa_domain {
            Some(domain) => domain.clone(),
            None => self.store.default_hostname(&config.swa).await?,
        };
        tracing::info!("using SWA domain: {}", domain);

        let desired = self
            .collaborators
            .list_eligible(
                &config.repo.owner,
                &config.repo.repo,
                config.minimum_permission,
            )
            .await?;
        tracing::info!(
            "found {} collaborators with at least {} permission in {}",
            desired.len(),
            config.minimum_permission,
            results.repo_full_name
        );

        guard_role_limit(&desired)?;

        let swa_users = self.store.list_users(&config.swa).await?;

        let plan = compute_sync_plan(&desired, &swa_users, &config.mapping, &config.role_prefix);
        tracing::info!(
            "plan -> add:{} update:{} remove:{}",
            plan.to_add.len(),
            plan.to_update.len(),
            plan.to_remove.len()
        );

        for add in &plan.to_add {
            let invite_url = self
                .store
                .invite(
                    &config.swa,
                    &add.login,
                    &add.role,
                    &domain,
                    config.expiration_hours,
                )
                .await?;
            results.added.push(InvitedUser {
                login: add.login.clone(),
                role: add.role.clone(),
                invite_url,
            });
            tracing::info!("invited {} with role {}", add.login, add.role);
        }

        for update in &plan.to_update {
            self.store
                .set_roles(&config.swa, &update.login, &update.role)
                .await?;
            results.updated.push(UpdatedUser {
                login: update.login.clone(),
                role: update.role.clone(),
            });
            tracing::info!("updated {} to role {}", update.login, update.role);
        }

        for removal in &plan.to_remove {
            self.store.set_roles(&config.swa, &removal.login, "").await?;
            results.removed.push(RemovedUser {
                login: removal.login.clone(),
            });
            tracing::info!("cleared roles for {}", removal.login);
        }

        results.summary = self.render_summary(results);

        if !results.has_changes() {
            tracing::info!("no SWA role changes detected; skipping notification");
            self.report_outputs(results, reporter)?;
            return Ok(());
        }

        self.create_notifications(&category_ids, results, reporter)
            .await?;
        results.summary = self.render_summary(results);

        self.report_outputs(results, reporter)?;
        Ok(())
    }

    fn render_summary(&self, results: &SyncResults) -> String {
        build_summary(&SummaryParams {
            repo: &results.repo_full_name,
            swa_name: &results.swa_name,
            added: &results.added,
            updated: &results.updated,
            removed: &results.removed,
            notification_urls: &results.notification_urls,
            status: RunStatus::Success,
            failure_message: None,
        })
    }

    async fn create_notifications(
        &self,
        category_ids: &CategoryIds,
        results: &mut SyncResults,
        reporter: &mut dyn Reporter,
    ) -> Result<()> {
        let config = self.config;
        let date = today();
        let mut missing_keys: BTreeSet<String> = BTreeSet::new();

        match config.notification_mode {
            NotificationMode::PerRun => {
                let mut values: HashMap<&str, String> = HashMap::new();
                values.insert("swaName", results.swa_name.clone());
                values.insert("repo", results.repo_full_name.clone());
                values.insert("date", date);
                values.insert("summaryMarkdown", results.summary.clone());

                if !config.body_template.contains("{summaryMarkdown}") {
                    reporter.warn(
                        "discussion body template does not include {summaryMarkdown}; \
                         the sync summary will not appear in the discussion body",
                    );
                }

                let title = fill_template(&config.title_template, &values, |key| {
                    missing_keys.insert(key.to_string());
                });
                let body = fill_template(&config.body_template, &values, |key| {
                    missing_keys.insert(key.to_string());
                });

                let url = self.create_discussion(category_ids, &title, &body).await?;
                results.notification_urls.push(url);
            }
            NotificationMode::PerInvite => {
                if results.added.is_empty() {
                    tracing::info!("no invitations issued; skipping per-invite notifications");
                } else {
                    let mut urls = Vec::with_capacity(results.added.len());
                    for invite in &results.added {
                        let mut values: HashMap<&str, String> = HashMap::new();
                        values.insert("swaName", results.swa_name.clone());
                        values.insert("repo", results.repo_full_name.clone());
                        values.insert("date", date.clone());
                        values.insert("login", invite.login.clone());
                        values.insert("role", invite.role.clone());
                        values.insert("inviteUrl", invite.invite_url.clone());
                        values.insert("expirationHours", config.expiration_hours.to_string());

                        let title = fill_template(&config.title_template, &values, |key| {
                            missing_keys.insert(key.to_string());
                        });
                        let body = fill_template(&config.body_template, &values, |key| {
                            missing_keys.insert(key.to_string());
                        });
                        urls.push(self.create_discussion(category_ids, &title, &body).await?);
                    }
                    results.notification_urls.extend(urls);
                }
            }
        }

        if !missing_keys.is_empty() {
            let joined = missing_keys.iter().cloned().collect::<Vec<_>>().join(", ");
            reporter.warn(&format!(
                "unknown template placeholders with no value: {joined}"
            ));
        }

        Ok(())
    }

    async fn create_discussion(
        &self,
        category_ids: &CategoryIds,
        title: &str,
        body: &str,
    ) -> Result<String> {
        let url = self
            .discussions
            .create_discussion(category_ids, title, body)
            .await
            .map_err(|err| Error::Notification {
                message: err.to_string(),
            })?;
        tracing::info!("created discussion: {}", url);
        Ok(url)
    }

    fn report_outputs(&self, results: &SyncResults, reporter: &mut dyn Reporter) -> Result<()> {
        let outputs = [
            ("added-count", results.added.len().to_string()),
            ("updated-count", results.updated.len().to_string()),
            ("removed-count", results.removed.len().to_string()),
            (
                "discussion-url",
                results
                    .notification_urls
                    .first()
                    .cloned()
                    .unwrap_or_default(),
            ),
        ];
        for (key, value) in outputs {
            reporter
                .set_output(key, &value)
                .map_err(|err| Error::Report {
                    message: err.to_string(),
                })?;
        }
        Ok(())
    }
}

/// Report a failure that happened before a runner could be constructed
/// (configuration resolution, client construction).
///
/// Renders the same failure-status summary a run would, with `unknown`
/// standing in for the not-yet-resolved targets, and writes it best-effort.
pub fn report_config_failure(err: &Error, reporter: &mut dyn Reporter) -> RunOutcome {
    let message = err.failure_message();
    tracing::error!("sync failed: {}", message);

    let mut results = SyncResults::new("unknown", "unknown");
    results.summary = build_summary(&SummaryParams {
        repo: &results.repo_full_name,
        swa_name: &results.swa_name,
        added: &[],
        updated: &[],
        removed: &[],
        notification_urls: &[],
        status: RunStatus::Failure,
        failure_message: Some(&message),
    });

    if let Err(write_err) = reporter.write_summary(&results.summary) {
        tracing::warn!("failed to write run summary: {}", write_err);
    }

    RunOutcome {
        status: RunStatus::Failure,
        failure_message: Some(message),
        results,
    }
}

/// Fail when the desired set exceeds the Static Web App role assignment
/// ceiling. Runs before the current state is fetched.
fn guard_role_limit(desired: &[DesiredUser]) -> Result<()> {
    let unique: HashSet<String> = desired
        .iter()
        .map(|user| normalize_login(&user.login))
        .filter(|login| !login.is_empty())
        .collect();
    if unique.len() > SWA_CUSTOM_ROLE_ASSIGNMENT_LIMIT {
        return Err(Error::RoleLimitExceeded {
            limit: SWA_CUSTOM_ROLE_ASSIGNMENT_LIMIT,
            actual: unique.len(),
        });
    }
    Ok(())
}

/// Date stamp for discussion titles (YYYY-MM-DD).
fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}
