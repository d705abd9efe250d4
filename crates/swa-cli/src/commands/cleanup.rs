//! Cleanup command implementation

use colored::Colorize;

use swa_core::{CleanupConfig, CleanupInputs, CleanupRunner, RunStatus};
use swa_github::GitHubClient;

use crate::actions::{ActionsReporter, issue_error};
use crate::cli::CleanupArgs;
use crate::error::{CliError, Result};

/// Run the cleanup command
pub async fn run_cleanup(args: CleanupArgs) -> Result<()> {
    println!(
        "{} Sweeping stale invite discussions...",
        "=>".blue().bold()
    );

    let mut reporter = ActionsReporter::from_env();

    let inputs = CleanupInputs {
        github_token: args.github_token,
        target_repo: args.target_repo,
        repo_context: std::env::var("GITHUB_REPOSITORY").ok(),
        discussion_category_name: args.discussion_category_name,
        discussion_title_template: args.discussion_title_template,
        cleanup_mode: args.cleanup_mode,
        expiration_hours: args.expiration_hours,
    };

    let config = match CleanupConfig::resolve(inputs) {
        Ok(config) => config,
        Err(err) => return fail(err.failure_message()),
    };

    let github = match GitHubClient::new(config.github_token.clone()) {
        Ok(client) => client,
        Err(err) => return fail(swa_core::Error::from(err).failure_message()),
    };

    let outcome = CleanupRunner::new(&config, &github).run(&mut reporter).await;

    match outcome.status {
        RunStatus::Success => {
            println!(
                "{} Cleanup complete: {} discussions deleted.",
                "OK".green().bold(),
                outcome.deleted
            );
            Ok(())
        }
        RunStatus::Failure => fail(
            outcome
                .failure_message
                .unwrap_or_else(|| swa_core::UNKNOWN_ERROR.to_string()),
        ),
    }
}

fn fail(message: String) -> Result<()> {
    issue_error(&message);
    Err(CliError::user(message))
}
