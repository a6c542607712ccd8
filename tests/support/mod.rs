/*!
Test support helpers shared across integration tests.

- have_git(): check git availability on PATH
- git_ok(dir, args): run git with a fixed identity, panicking on failure
- init_source_repo(dir): a repository with one commit on `main`
- settings_for(root, ...): SyncSettings nested under a temporary workspace

These helpers do not print skip messages themselves so tests keep their own
"skipping: ..." lines.
*/

use std::path::Path;
use std::process::{Command, Stdio};

use refsync::SyncSettings;

/// Return true if `git` is available on PATH.
#[allow(dead_code)]
pub fn have_git() -> bool {
    Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Run git in `dir` with a deterministic identity and return trimmed stdout.
#[allow(dead_code)]
pub fn git_ok(dir: &Path, args: &[&str]) -> String {
    let out = Command::new("git")
        .args(["-c", "user.name=Refsync Test", "-c", "user.email=refsync@example.com"])
        .args(["-c", "commit.gpgsign=false", "-c", "init.defaultBranch=main"])
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
        .expect("spawn git");
    assert!(
        out.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

/// Create a repository at `dir` with a single commit on `main`; returns its sha.
#[allow(dead_code)]
pub fn init_source_repo(dir: &Path) -> String {
    std::fs::create_dir_all(dir).expect("mkdir source");
    git_ok(dir, &["init", "-q"]);
    git_ok(dir, &["checkout", "-q", "-B", "main"]);
    std::fs::write(dir.join("README.md"), "widget\n").expect("write readme");
    git_ok(dir, &["add", "README.md"]);
    git_ok(dir, &["commit", "-q", "-m", "initial"]);
    git_ok(dir, &["rev-parse", "HEAD"])
}

/// Settings for `owner/name` checked out at `<root>/<name>`.
#[allow(dead_code)]
pub fn settings_for(root: &Path, owner: &str, name: &str, git_ref: &str, commit: &str) -> SyncSettings {
    SyncSettings {
        repository_path: root.join(name),
        repository_owner: owner.to_string(),
        repository_name: name.to_string(),
        git_ref: git_ref.to_string(),
        commit: commit.to_string(),
        actor: "octocat".to_string(),
        token: "ghs_testtoken".to_string(),
        server_host: "github.com".to_string(),
    }
}

/// True for a lowercase 40-character hex object name.
#[allow(dead_code)]
pub fn is_sha1_hex(s: &str) -> bool {
    s.len() == 40 && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
