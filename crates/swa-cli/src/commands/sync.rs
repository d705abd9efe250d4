//! Sync command implementation

use colored::Colorize;

use swa_azure::AzCliUserStore;
use swa_core::{RunOutcome, RunStatus, SyncConfig, SyncInputs, SyncRunner, report_config_failure};
use swa_github::GitHubClient;

use crate::actions::{ActionsReporter, issue_error};
use crate::cli::SyncArgs;
use crate::error::{CliError, Result};

/// Run the sync command
pub async fn run_sync(args: SyncArgs) -> Result<()> {
    println!(
        "{} Synchronizing SWA roles from repository permissions...",
        "=>".blue().bold()
    );

    let mut reporter = ActionsReporter::from_env();

    let inputs = SyncInputs {
        github_token: args.github_token,
        target_repo: args.target_repo,
        repo_context: std::env::var("GITHUB_REPOSITORY").ok(),
        swa_name: args.swa_name,
        swa_resource_group: args.swa_resource_group,
        swa_domain: args.swa_domain,
        invitation_expiration_hours: args.invitation_expiration_hours,
        role_for_admin: args.role_for_admin,
        role_for_maintain: args.role_for_maintain,
        role_for_write: args.role_for_write,
        role_for_triage: args.role_for_triage,
        role_for_read: args.role_for_read,
        role_prefix: args.role_prefix,
        minimum_permission: args.minimum_permission,
        discussion_category_name: args.discussion_category_name,
        discussion_title_template: args.discussion_title_template,
        discussion_body_template: args.discussion_body_template,
        notification_mode: args.notification_mode,
    };

    let config = match SyncConfig::resolve(inputs) {
        Ok(config) => config,
        Err(err) => return finish(report_config_failure(&err, &mut reporter)),
    };

    let github = match GitHubClient::new(config.github_token.clone()) {
        Ok(client) => client,
        Err(err) => return finish(report_config_failure(&err.into(), &mut reporter)),
    };
    let store = AzCliUserStore::new();

    let runner = SyncRunner::new(&config, &github, &store, &github);
    let outcome = runner.run(&mut reporter).await;
    finish(outcome)
}

fn finish(outcome: RunOutcome) -> Result<()> {
    match outcome.status {
        RunStatus::Success => {
            println!(
                "{} Sync complete: {} added, {} updated, {} removed.",
                "OK".green().bold(),
                outcome.results.added.len(),
                outcome.results.updated.len(),
                outcome.results.removed.len()
            );
            for url in &outcome.results.notification_urls {
                println!("   {} {}", "-".dimmed(), url);
            }
            Ok(())
        }
        RunStatus::Failure => {
            let message = outcome
                .failure_message
                .unwrap_or_else(|| swa_core::UNKNOWN_ERROR.to_string());
            issue_error(&message);
            Err(CliError::user(message))
        }
    }
}
