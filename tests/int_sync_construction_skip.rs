mod support;

use std::fs;
use std::path::Path;

use refsync::{
    GitCommandManager, GitRunner, NetrcWriter, RepositorySync, ScriptedRunner, SyncError,
    SyncOutcome,
};

#[test]
fn missing_binary_skips_sync_without_side_effects() {
    let td = tempfile::tempdir().expect("tmpdir");
    let settings = support::settings_for(td.path(), "acme", "widget", "heads/main", "");
    let repo = settings.repository_path.clone();
    let netrc = td.path().join(".netrc");

    let outcome = RepositorySync::new(settings, NetrcWriter::new(&netrc))
        .run_with(|_dir: &Path| -> Result<GitCommandManager<ScriptedRunner>, SyncError> {
            Err(SyncError::Construction(
                "Unable to locate executable file: git".to_string(),
            ))
        })
        .expect("construction failure must not fail the run");

    assert!(matches!(outcome, SyncOutcome::Skipped { .. }));
    assert!(repo.is_dir(), "workspace preparation still happens");
    assert_eq!(
        fs::read_dir(&repo).expect("read_dir").count(),
        0,
        "nothing written into the target"
    );
    assert!(!netrc.exists(), "no credential write when git is unavailable");
}

#[test]
fn unrunnable_version_probe_is_treated_as_construction_failure() {
    let td = tempfile::tempdir().expect("tmpdir");
    let settings = support::settings_for(td.path(), "acme", "widget", "heads/main", "");
    let netrc = td.path().join(".netrc");
    let runner = ScriptedRunner::new().on_exit("version", 126, "");

    let outcome = RepositorySync::new(settings, NetrcWriter::new(&netrc))
        .run_with(|dir: &Path| {
            GitCommandManager::with_runner(&runner, "/opt/broken/git".into(), dir)
        })
        .expect("skip");
    assert!(matches!(outcome, SyncOutcome::Skipped { .. }));
    assert!(!netrc.exists());
}

#[test]
fn non_construction_errors_from_client_are_fatal() {
    let td = tempfile::tempdir().expect("tmpdir");
    let settings = support::settings_for(td.path(), "acme", "widget", "heads/main", "");
    let runner = ScriptedRunner::new().on("version", "git version unknown");

    let res = RepositorySync::new(settings, NetrcWriter::new(td.path().join(".netrc")))
        .run_with(|dir: &Path| GitCommandManager::with_runner(&runner, "git".into(), dir));
    match res {
        Err(SyncError::Environment(msg)) => assert_eq!(msg, "Unable to determine git version"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn git_binary_that_cannot_be_spawned_skips_sync() {
    let td = tempfile::tempdir().expect("tmpdir");
    let settings = support::settings_for(td.path(), "acme", "widget", "heads/main", "");
    let repo = settings.repository_path.clone();
    let netrc = td.path().join(".netrc");
    let git = td.path().join("missing").join("git");

    let outcome = RepositorySync::new(settings, NetrcWriter::new(&netrc))
        .run_with(|dir: &Path| GitCommandManager::with_runner(GitRunner::new(&git), git.clone(), dir))
        .expect("spawn failure must not fail the run");

    match outcome {
        SyncOutcome::Skipped { reason } => {
            assert!(reason.starts_with("Unable to run git version with"), "{reason}");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(repo.is_dir());
    assert_eq!(fs::read_dir(&repo).expect("read_dir").count(), 0);
    assert!(!netrc.exists());
}

#[test]
fn unknown_home_does_not_block_a_skip() {
    let td = tempfile::tempdir().expect("tmpdir");
    let settings = support::settings_for(td.path(), "acme", "widget", "heads/main", "");
    let git = td.path().join("missing").join("git");

    let outcome = RepositorySync::new(settings, NetrcWriter::in_home(None))
        .run_with(|dir: &Path| GitCommandManager::with_runner(GitRunner::new(&git), git.clone(), dir))
        .expect("skip");
    assert!(matches!(outcome, SyncOutcome::Skipped { .. }));
}

#[test]
fn unknown_home_fails_at_credential_step_before_init() {
    let td = tempfile::tempdir().expect("tmpdir");
    let settings = support::settings_for(td.path(), "acme", "widget", "heads/main", "");
    let runner = ScriptedRunner::new().on("version", "git version 2.43.0");

    let res = RepositorySync::new(settings, NetrcWriter::in_home(None))
        .run_with(|dir: &Path| GitCommandManager::with_runner(&runner, "git".into(), dir));
    match res {
        Err(SyncError::Environment(msg)) => assert_eq!(msg, "Unable to determine home directory"),
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(runner.call_args(), vec![vec!["version".to_string()]]);
}
