//! Cleanup sweeper for stale notification discussions
//!
//! Lists the discussions in the configured category and deletes, one by one,
//! every thread whose title matches the configured template and whose age
//! satisfies the deletion policy. Title matching is approximate: template
//! placeholders become wildcards.

use chrono::{DateTime, Duration, Utc};
use regex::Regex;

use swa_github::{DiscussionApi, DiscussionThread};

use crate::config::{CleanupConfig, CleanupMode};
use crate::error::{Error, Result};
use crate::report::Reporter;
use crate::summary::RunStatus;

/// Final outcome of a cleanup run.
#[derive(Debug, Clone)]
pub struct CleanupOutcome {
    /// Overall status.
    pub status: RunStatus,
    /// Failure message for failed runs, never blank.
    pub failure_message: Option<String>,
    /// Number of discussions deleted before completion or failure.
    pub deleted: usize,
}

/// Orchestrates one cleanup sweep.
pub struct CleanupRunner<'a> {
    config: &'a CleanupConfig,
    discussions: &'a dyn DiscussionApi,
}

impl<'a> CleanupRunner<'a> {
    /// Create a runner over the discussion boundary.
    pub fn new(config: &'a CleanupConfig, discussions: &'a dyn DiscussionApi) -> Self {
        Self {
            config,
            discussions,
        }
    }

    /// Run the sweep to completion. Never returns an error; failures are
    /// folded into the outcome.
    pub async fn run(&self, reporter: &mut dyn Reporter) -> CleanupOutcome {
        let mut deleted = 0usize;
        match self.execute(&mut deleted, reporter).await {
            Ok(()) => CleanupOutcome {
                status: RunStatus::Success,
                failure_message: None,
                deleted,
            },
            Err(err) => {
                let message = err.failure_message();
                tracing::error!("cleanup failed: {}", message);
                CleanupOutcome {
                    status: RunStatus::Failure,
                    failure_message: Some(message),
                    deleted,
                }
            }
        }
    }

    async fn execute(&self, deleted: &mut usize, reporter: &mut dyn Reporter) -> Result<()> {
        let config = self.config;
        let pattern = title_pattern(&config.title_template)?;
        let cutoff = Utc::now() - Duration::hours(i64::from(config.expiration_hours));
        tracing::info!("expiration cutoff: {}", cutoff.to_rfc3339());

        let category_ids = self
            .discussions
            .resolve_category(&config.repo.owner, &config.repo.repo, &config.category_name)
            .await?;

        let threads = self
            .discussions
            .list_discussions(
                &config.repo.owner,
                &config.repo.repo,
                &category_ids.category_id,
            )
            .await?;
        tracing::info!(
            "found {} discussions in category \"{}\"",
            threads.len(),
            config.category_name
        );

        for thread in &threads {
            if should_delete(thread, &pattern, config.mode, cutoff) {
                tracing::info!(
                    "deleting discussion \"{}\" ({}) created at {}",
                    thread.title,
                    thread.url,
                    thread.created_at.to_rfc3339()
                );
                self.discussions.delete_discussion(&thread.id).await?;
                *deleted += 1;
            } else {
                tracing::debug!("keeping discussion \"{}\"", thread.title);
            }
        }

        tracing::info!("deleted {} discussions", *deleted);
        reporter
            .set_output("deleted-count", &deleted.to_string())
            .map_err(|err| Error::Report {
                message: err.to_string(),
            })?;
        Ok(())
    }
}

/// Build the title-matching regex from a template.
///
/// The template text is matched literally except that `{placeholder}`
/// segments become non-greedy wildcards; the pattern is anchored at both
/// ends.
pub fn title_pattern(template: &str) -> Result<Regex> {
    let escaped = regex::escape(template);
    // After escaping, placeholders read `\{name\}`.
    let placeholder = Regex::new(r"\\\{\w+\\\}").unwrap();
    let wildcarded = placeholder.replace_all(&escaped, ".*?");
    Regex::new(&format!("^{wildcarded}$"))
        .map_err(|err| Error::config(format!("invalid discussion title template: {err}")))
}

/// Whether a thread is due for deletion under the configured policy.
fn should_delete(
    thread: &DiscussionThread,
    pattern: &Regex,
    mode: CleanupMode,
    cutoff: DateTime<Utc>,
) -> bool {
    let expired = match mode {
        CleanupMode::Immediate => true,
        CleanupMode::Expiration => thread.created_at < cutoff,
    };
    expired && pattern.is_match(&thread.title)
}
