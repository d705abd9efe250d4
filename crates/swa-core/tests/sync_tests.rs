//! Tests for the sync orchestrator

mod common;

use pretty_assertions::assert_eq;

use common::{FakeCollaborators, FakeDiscussions, FakeStore, RecordingReporter};
use swa_core::{Error, RunStatus, SyncConfig, SyncInputs, SyncRunner, report_config_failure};
use swa_plan::{DesiredUser, PermissionLevel, SwaUser};

fn desired(login: &str, level: PermissionLevel) -> DesiredUser {
    DesiredUser {
        login: login.to_string(),
        level,
    }
}

fn registered(details: &str, roles: &str) -> SwaUser {
    SwaUser {
        user_details: Some(details.to_string()),
        roles: (!roles.is_empty()).then(|| roles.to_string()),
        provider: Some("GitHub".to_string()),
        ..SwaUser::default()
    }
}

fn config(extra: impl FnOnce(&mut SyncInputs)) -> SyncConfig {
    let mut inputs = SyncInputs {
        github_token: "token".to_string(),
        swa_name: "my-app".to_string(),
        swa_resource_group: "my-group".to_string(),
        discussion_category_name: "Invites".to_string(),
        repo_context: Some("octo/app".to_string()),
        swa_domain: Some("my-app.example.net".to_string()),
        ..SyncInputs::default()
    };
    extra(&mut inputs);
    SyncConfig::resolve(inputs).unwrap()
}

#[tokio::test]
async fn test_happy_path_executes_plan_and_notifies() {
    let config = config(|_| {});
    let collaborators = FakeCollaborators {
        users: vec![
            desired("alice", PermissionLevel::Admin),
            desired("bob", PermissionLevel::Write),
        ],
    };
    let store = FakeStore {
        users: vec![
            registered("bob", "github-write"),
            registered("carol", "github-write"),
        ],
        ..FakeStore::default()
    };
    let discussions = FakeDiscussions::default();
    let mut reporter = RecordingReporter::default();

    let runner = SyncRunner::new(&config, &collaborators, &store, &discussions);
    let outcome = runner.run(&mut reporter).await;

    assert_eq!(outcome.status, RunStatus::Success);
    assert_eq!(outcome.failure_message, None);

    // alice invited with the explicit domain, carol cleared.
    assert_eq!(
        *store.invites.lock().unwrap(),
        vec![(
            "alice".to_string(),
            "github-admin".to_string(),
            "my-app.example.net".to_string(),
        )]
    );
    assert_eq!(
        *store.role_sets.lock().unwrap(),
        vec![("carol".to_string(), String::new())]
    );

    // One notification, linked from the summary.
    assert_eq!(discussions.created.lock().unwrap().len(), 1);
    assert_eq!(
        outcome.results.notification_urls,
        vec!["https://github.com/octo/app/discussions/1".to_string()]
    );
    assert!(outcome.results.summary.contains("- Status: success"));
    assert!(
        outcome
            .results
            .summary
            .contains("- Discussion: https://github.com/octo/app/discussions/1")
    );

    // Outputs and summary reported.
    assert_eq!(reporter.output("added-count"), Some("1"));
    assert_eq!(reporter.output("updated-count"), Some("0"));
    assert_eq!(reporter.output("removed-count"), Some("1"));
    assert_eq!(
        reporter.output("discussion-url"),
        Some("https://github.com/octo/app/discussions/1")
    );
    assert_eq!(reporter.summaries, vec![outcome.results.summary.clone()]);
}

#[tokio::test]
async fn test_updates_run_before_removals() {
    let config = config(|_| {});
    let collaborators = FakeCollaborators {
        users: vec![desired("bob", PermissionLevel::Maintain)],
    };
    let store = FakeStore {
        users: vec![
            registered("carol", "github-write"),
            registered("bob", "github-write"),
        ],
        ..FakeStore::default()
    };
    let discussions = FakeDiscussions::default();
    let mut reporter = RecordingReporter::default();

    let outcome = SyncRunner::new(&config, &collaborators, &store, &discussions)
        .run(&mut reporter)
        .await;

    assert_eq!(outcome.status, RunStatus::Success);
    assert_eq!(
        *store.role_sets.lock().unwrap(),
        vec![
            ("bob".to_string(), "github-maintain".to_string()),
            ("carol".to_string(), String::new()),
        ]
    );
}

#[tokio::test]
async fn test_no_changes_skips_notification_but_reports_outputs() {
    let config = config(|_| {});
    let collaborators = FakeCollaborators {
        users: vec![desired("bob", PermissionLevel::Write)],
    };
    let store = FakeStore {
        users: vec![registered("bob", "github-write,anonymous,authenticated")],
        ..FakeStore::default()
    };
    let discussions = FakeDiscussions::default();
    let mut reporter = RecordingReporter::default();

    let outcome = SyncRunner::new(&config, &collaborators, &store, &discussions)
        .run(&mut reporter)
        .await;

    assert_eq!(outcome.status, RunStatus::Success);
    assert!(discussions.created.lock().unwrap().is_empty());
    assert_eq!(reporter.output("added-count"), Some("0"));
    assert_eq!(reporter.output("discussion-url"), Some(""));
    assert!(outcome.results.summary.contains("- Added: 0"));
    assert_eq!(reporter.summaries.len(), 1);
}

#[tokio::test]
async fn test_capacity_guard_fails_before_fetching_current_state() {
    let config = config(|_| {});
    let many: Vec<DesiredUser> = (0..26)
        .map(|i| desired(&format!("user{i}"), PermissionLevel::Write))
        .collect();
    let collaborators = FakeCollaborators { users: many };
    let store = FakeStore::default();
    let discussions = FakeDiscussions::default();
    let mut reporter = RecordingReporter::default();

    let outcome = SyncRunner::new(&config, &collaborators, &store, &discussions)
        .run(&mut reporter)
        .await;

    assert_eq!(outcome.status, RunStatus::Failure);
    let message = outcome.failure_message.unwrap();
    assert!(message.contains("(25)"), "message: {message}");
    assert!(message.contains("26"), "message: {message}");

    // The current state was never fetched and nothing was mutated.
    assert_eq!(*store.list_calls.lock().unwrap(), 0);
    assert!(store.invites.lock().unwrap().is_empty());
    assert!(outcome.results.summary.contains("- Status: failure"));
}

#[tokio::test]
async fn test_output_reporting_failure_keeps_success_shaped_summary() {
    let config = config(|_| {});
    let collaborators = FakeCollaborators {
        users: vec![desired("alice", PermissionLevel::Admin)],
    };
    let store = FakeStore::default();
    let discussions = FakeDiscussions::default();
    let mut reporter = RecordingReporter {
        fail_outputs: true,
        ..RecordingReporter::default()
    };

    let outcome = SyncRunner::new(&config, &collaborators, &store, &discussions)
        .run(&mut reporter)
        .await;

    // The run failed, but the summary still shows the work that happened.
    assert_eq!(outcome.status, RunStatus::Failure);
    assert!(
        outcome
            .failure_message
            .as_deref()
            .unwrap()
            .contains("failed to report outputs")
    );
    assert!(outcome.results.summary.contains("- Status: success"));
    assert!(outcome.results.summary.contains("- Added: 1"));
    assert_eq!(outcome.results.added.len(), 1);
    assert_eq!(reporter.summaries, vec![outcome.results.summary.clone()]);
}

#[tokio::test]
async fn test_missing_category_short_circuits_the_run() {
    let config = config(|_| {});
    let collaborators = FakeCollaborators {
        users: vec![desired("alice", PermissionLevel::Admin)],
    };
    let store = FakeStore::default();
    let discussions = FakeDiscussions {
        missing_category: true,
        ..FakeDiscussions::default()
    };
    let mut reporter = RecordingReporter::default();

    let outcome = SyncRunner::new(&config, &collaborators, &store, &discussions)
        .run(&mut reporter)
        .await;

    assert_eq!(outcome.status, RunStatus::Failure);
    assert!(
        outcome
            .failure_message
            .as_deref()
            .unwrap()
            .contains("discussion category \"Invites\" not found")
    );
    assert!(store.invites.lock().unwrap().is_empty());
    assert_eq!(*store.list_calls.lock().unwrap(), 0);
    assert!(outcome.results.summary.contains("- Added: 0"));
}

#[tokio::test]
async fn test_invite_failure_retains_partial_progress() {
    let config = config(|_| {});
    let collaborators = FakeCollaborators {
        users: vec![
            desired("alice", PermissionLevel::Admin),
            desired("bob", PermissionLevel::Write),
        ],
    };
    let store = FakeStore {
        fail_invite_for: Some("bob".to_string()),
        ..FakeStore::default()
    };
    let discussions = FakeDiscussions::default();
    let mut reporter = RecordingReporter::default();

    let outcome = SyncRunner::new(&config, &collaborators, &store, &discussions)
        .run(&mut reporter)
        .await;

    assert_eq!(outcome.status, RunStatus::Failure);
    let message = outcome.failure_message.unwrap();
    assert!(message.contains("invite blew up"), "message: {message}");

    // Alice's invitation survived into the failure report.
    assert_eq!(outcome.results.added.len(), 1);
    assert_eq!(outcome.results.added[0].login, "alice");
    assert!(outcome.results.summary.contains("- Status: failure"));
    assert!(outcome.results.summary.contains("- Added: 1"));
    assert!(outcome.results.summary.contains("@alice"));
    assert!(discussions.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_per_invite_mode_posts_one_discussion_per_invitation() {
    let config = config(|inputs| {
        inputs.notification_mode = Some("per-invite".to_string());
    });
    let collaborators = FakeCollaborators {
        users: vec![
            desired("alice", PermissionLevel::Admin),
            desired("bob", PermissionLevel::Write),
        ],
    };
    let store = FakeStore::default();
    let discussions = FakeDiscussions::default();
    let mut reporter = RecordingReporter::default();

    let outcome = SyncRunner::new(&config, &collaborators, &store, &discussions)
        .run(&mut reporter)
        .await;

    assert_eq!(outcome.status, RunStatus::Success);
    let created = discussions.created.lock().unwrap();
    assert_eq!(created.len(), 2);
    assert!(created[0].0.contains("alice"));
    assert!(created[0].1.contains("https://invite/alice"));
    assert!(created[1].0.contains("bob"));
    assert_eq!(outcome.results.notification_urls.len(), 2);
}

#[tokio::test]
async fn test_per_invite_mode_skips_runs_without_additions() {
    let config = config(|inputs| {
        inputs.notification_mode = Some("per-invite".to_string());
    });
    let collaborators = FakeCollaborators {
        users: vec![desired("bob", PermissionLevel::Admin)],
    };
    let store = FakeStore {
        users: vec![
            registered("bob", "github-write"),
            registered("carol", "github-write"),
        ],
        ..FakeStore::default()
    };
    let discussions = FakeDiscussions::default();
    let mut reporter = RecordingReporter::default();

    let outcome = SyncRunner::new(&config, &collaborators, &store, &discussions)
        .run(&mut reporter)
        .await;

    // The run updated and removed roles, but with no invitations there is
    // nothing actionable to post.
    assert_eq!(outcome.status, RunStatus::Success);
    assert!(outcome.results.has_changes());
    assert!(discussions.created.lock().unwrap().is_empty());
    assert!(outcome.results.notification_urls.is_empty());
    assert_eq!(reporter.output("updated-count"), Some("1"));
    assert_eq!(reporter.output("removed-count"), Some("1"));
}

#[tokio::test]
async fn test_template_warnings_are_reported_once() {
    let config = config(|inputs| {
        inputs.discussion_title_template = Some("Invites {nope} {nope}".to_string());
        inputs.discussion_body_template = Some("Body without the summary {alsoNope}".to_string());
    });
    let collaborators = FakeCollaborators {
        users: vec![desired("alice", PermissionLevel::Admin)],
    };
    let store = FakeStore::default();
    let discussions = FakeDiscussions::default();
    let mut reporter = RecordingReporter::default();

    let outcome = SyncRunner::new(&config, &collaborators, &store, &discussions)
        .run(&mut reporter)
        .await;

    assert_eq!(outcome.status, RunStatus::Success);
    assert!(
        reporter
            .warnings
            .iter()
            .any(|w| w.contains("{summaryMarkdown}"))
    );
    assert!(
        reporter
            .warnings
            .iter()
            .any(|w| w.contains("alsoNope, nope")),
        "warnings: {:?}",
        reporter.warnings
    );
}

#[tokio::test]
async fn test_notification_failure_wraps_cause() {
    let config = config(|_| {});
    let collaborators = FakeCollaborators {
        users: vec![desired("alice", PermissionLevel::Admin)],
    };
    let store = FakeStore::default();
    let discussions = FakeDiscussions {
        fail_create: true,
        ..FakeDiscussions::default()
    };
    let mut reporter = RecordingReporter::default();

    let outcome = SyncRunner::new(&config, &collaborators, &store, &discussions)
        .run(&mut reporter)
        .await;

    assert_eq!(outcome.status, RunStatus::Failure);
    let message = outcome.failure_message.unwrap();
    assert!(message.contains("failed to create discussion"));
    assert!(message.contains("create denied"));
    // The invitation itself still happened and is reported.
    assert_eq!(outcome.results.added.len(), 1);
    assert!(outcome.results.summary.contains("- Added: 1"));
}

#[tokio::test]
async fn test_default_hostname_used_when_domain_not_configured() {
    let config = config(|inputs| {
        inputs.swa_domain = None;
    });
    let collaborators = FakeCollaborators {
        users: vec![desired("alice", PermissionLevel::Admin)],
    };
    let store = FakeStore::default();
    let discussions = FakeDiscussions::default();
    let mut reporter = RecordingReporter::default();

    let outcome = SyncRunner::new(&config, &collaborators, &store, &discussions)
        .run(&mut reporter)
        .await;

    assert_eq!(outcome.status, RunStatus::Success);
    assert_eq!(
        store.invites.lock().unwrap()[0].2,
        "my-app.azurestaticapps.net"
    );
}

#[test]
fn test_config_failure_is_reported_like_a_failed_run() {
    let err = Error::config("missing required input: github-token");
    let mut reporter = RecordingReporter::default();

    let outcome = report_config_failure(&err, &mut reporter);

    assert_eq!(outcome.status, RunStatus::Failure);
    assert_eq!(
        outcome.failure_message.as_deref(),
        Some("missing required input: github-token")
    );
    assert!(outcome.results.summary.contains("- Status: failure"));
    assert!(outcome.results.summary.contains("- Repository: unknown"));
    assert!(
        outcome
            .results
            .summary
            .contains("- Error: missing required input: github-token")
    );
    assert_eq!(reporter.summaries, vec![outcome.results.summary.clone()]);
}

#[tokio::test]
async fn test_minimum_permission_filters_desired_set() {
    let config = config(|inputs| {
        inputs.minimum_permission = Some("maintain".to_string());
    });
    let collaborators = FakeCollaborators {
        users: vec![
            desired("alice", PermissionLevel::Admin),
            desired("bob", PermissionLevel::Write),
        ],
    };
    let store = FakeStore::default();
    let discussions = FakeDiscussions::default();
    let mut reporter = RecordingReporter::default();

    let outcome = SyncRunner::new(&config, &collaborators, &store, &discussions)
        .run(&mut reporter)
        .await;

    assert_eq!(outcome.status, RunStatus::Success);
    let invites = store.invites.lock().unwrap();
    assert_eq!(invites.len(), 1);
    assert_eq!(invites[0].0, "alice");
}
