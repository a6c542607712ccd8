mod support;

use refsync::{
    CommandRunner, GitCommandManager, GitRequest, GitRunner, SyncError, MINIMUM_GIT_VERSION,
};

#[test]
fn real_git_probe_reports_supported_version() {
    if !support::have_git() {
        eprintln!("skipping: git not found in PATH");
        return;
    }
    let td = tempfile::tempdir().expect("tmpdir");
    let git = match GitCommandManager::create(td.path()) {
        Ok(g) => g,
        Err(SyncError::Environment(msg)) if msg.starts_with("Minimum required") => {
            eprintln!("skipping: {msg}");
            return;
        }
        Err(e) => panic!("unexpected: {e}"),
    };
    assert!(git.version().check_minimum(&MINIMUM_GIT_VERSION));
    assert!(git.git_path().is_absolute());
}

#[test]
fn runner_rejects_missing_working_directory() {
    let td = tempfile::tempdir().expect("tmpdir");
    let missing = td.path().join("nope");
    let runner = GitRunner::new("git");
    let req = GitRequest::new(&missing, ["version"]).silent(true);
    assert!(matches!(runner.run(&req), Err(SyncError::Precondition(_))));
}

#[test]
fn real_git_non_zero_exit_carries_code() {
    if !support::have_git() {
        eprintln!("skipping: git not found in PATH");
        return;
    }
    let td = tempfile::tempdir().expect("tmpdir");
    let runner = GitRunner::locate().expect("git on PATH");
    // Not a repository: rev-parse fails.
    let req = GitRequest::new(td.path(), ["rev-parse", "--verify", "HEAD"])
        .envs([("GIT_CEILING_DIRECTORIES".to_string(), td.path().display().to_string())])
        .silent(true);
    match runner.run(&req) {
        Err(SyncError::Command { exit_code, .. }) => assert_ne!(exit_code, 0),
        other => panic!("unexpected: {other:?}"),
    }
    let allowed = runner.run(&req.allow_non_zero_exit(true)).expect("allowed");
    assert_ne!(allowed.exit_code, 0);
}

#[test]
fn fetch_and_checkout_from_local_remote() {
    if !support::have_git() {
        eprintln!("skipping: git not found in PATH");
        return;
    }
    let td = tempfile::tempdir().expect("tmpdir");
    let source = td.path().join("source");
    let sha = support::init_source_repo(&source);

    let target = td.path().join("target");
    std::fs::create_dir_all(&target).expect("mkdir target");
    let git = match GitCommandManager::create(&target) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("skipping: {e}");
            return;
        }
    };
    git.init().expect("init");
    git.remote_add("origin", &source.display().to_string())
        .expect("remote add");
    git.fetch("heads/main").expect("fetch");
    git.checkout("heads/main", &sha).expect("checkout");

    let head = git.log1(Some("--format=%H")).expect("log");
    assert_eq!(head.trim(), sha);
    assert!(support::is_sha1_hex(head.trim()));
    assert!(target.join("README.md").is_file());
    assert_eq!(
        support::git_ok(&target, &["rev-parse", "refs/remotes/origin/heads/main"]),
        sha
    );
}
