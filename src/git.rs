//! git command manager: construction-time version negotiation plus the
//! handful of git operations the sync pipeline sequences.

use std::path::{Path, PathBuf};

#[cfg(feature = "trace")]
use tracing::instrument;

use crate::color::log_debug_stderr;
use crate::errors::SyncError;
use crate::runner::{CommandRunner, GitRequest, GitRunner};
use crate::version::{self, ClientVersion, MINIMUM_GIT_VERSION};

/// Product tag carried in the HTTP user agent.
pub const USER_AGENT_TAG: &str = "refsync";

/// Name of the single remote the pipeline registers.
pub const REMOTE_NAME: &str = "origin";

/// Environment overrides applied to every git invocation.
fn base_env() -> Vec<(String, String)> {
    vec![
        // Never block on a terminal prompt in CI.
        ("GIT_TERMINAL_PROMPT".to_string(), "0".to_string()),
        ("GCM_INTERACTIVE".to_string(), "Never".to_string()),
        ("GIT_LFS_SKIP_SMUDGE".to_string(), "1".to_string()),
    ]
}

/// `git -c protocol.version=2 fetch --force origin +refs/<ref>:refs/remotes/origin/<ref>`
pub fn fetch_args(git_ref: &str) -> Vec<String> {
    vec![
        "-c".to_string(),
        "protocol.version=2".to_string(),
        "fetch".to_string(),
        "--force".to_string(),
        REMOTE_NAME.to_string(),
        format!("+refs/{git_ref}:refs/remotes/{REMOTE_NAME}/{git_ref}"),
    ]
}

/// `git checkout --progress --force [-B <ref> <start_point> | <ref>]`
pub fn checkout_args(git_ref: &str, start_point: &str) -> Vec<String> {
    let mut args = vec![
        "checkout".to_string(),
        "--progress".to_string(),
        "--force".to_string(),
    ];
    if start_point.is_empty() {
        args.push(git_ref.to_string());
    } else {
        args.push("-B".to_string());
        args.push(git_ref.to_string());
        args.push(start_point.to_string());
    }
    args
}

#[derive(Debug)]
pub struct GitCommandManager<R: CommandRunner> {
    runner: R,
    git_path: PathBuf,
    working_dir: PathBuf,
    env: Vec<(String, String)>,
    version: ClientVersion,
}

impl GitCommandManager<GitRunner> {
    /// Locate git on PATH and negotiate its version for `working_dir`.
    pub fn create(working_dir: &Path) -> Result<Self, SyncError> {
        let runner = GitRunner::locate()?;
        let git_path = runner.git_path().to_path_buf();
        Self::with_runner(runner, git_path, working_dir)
    }
}

impl<R: CommandRunner> GitCommandManager<R> {
    /// Build a manager around an existing runner.
    ///
    /// A probe that cannot run at all is a [`SyncError::Construction`]; an
    /// unparseable or too-old version is a fatal [`SyncError::Environment`].
    #[cfg_attr(
        feature = "trace",
        instrument(level = "info", err, skip(runner), fields(git = %git_path.display()))
    )]
    pub fn with_runner(runner: R, git_path: PathBuf, working_dir: &Path) -> Result<Self, SyncError> {
        let mut env = base_env();
        log_debug_stderr("Getting git version");
        let version = match version::probe(&runner, working_dir, &env) {
            Ok(v) => v,
            Err(e @ (SyncError::Io(_) | SyncError::Command { .. })) => {
                return Err(SyncError::Construction(format!(
                    "Unable to run git version with '{}': {e}",
                    git_path.display()
                )))
            }
            Err(e) => return Err(e),
        };
        if !version.check_minimum(&MINIMUM_GIT_VERSION) {
            return Err(SyncError::Environment(format!(
                "Minimum required git version is {}. Your git ('{}') is {}",
                MINIMUM_GIT_VERSION,
                git_path.display(),
                version
            )));
        }
        let user_agent = format!("git/{version} ({USER_AGENT_TAG})");
        log_debug_stderr(&format!("Set git useragent to: {user_agent}"));
        env.push(("GIT_HTTP_USER_AGENT".to_string(), user_agent));

        Ok(GitCommandManager {
            runner,
            git_path,
            working_dir: working_dir.to_path_buf(),
            env,
            version,
        })
    }

    pub fn version(&self) -> ClientVersion {
        self.version
    }

    pub fn git_path(&self) -> &Path {
        &self.git_path
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Environment overrides sent with every invocation.
    pub fn env(&self) -> &[(String, String)] {
        &self.env
    }

    pub fn init(&self) -> Result<(), SyncError> {
        let dir = self.working_dir.display().to_string();
        self.exec_git(vec!["init".to_string(), dir], false, false)
            .map(|_| ())
    }

    pub fn remote_add(&self, name: &str, url: &str) -> Result<(), SyncError> {
        self.exec_git(
            vec![
                "remote".to_string(),
                "add".to_string(),
                name.to_string(),
                url.to_string(),
            ],
            false,
            false,
        )
        .map(|_| ())
    }

    pub fn fetch(&self, git_ref: &str) -> Result<(), SyncError> {
        self.exec_git(fetch_args(git_ref), false, false).map(|_| ())
    }

    pub fn checkout(&self, git_ref: &str, start_point: &str) -> Result<(), SyncError> {
        self.exec_git(checkout_args(git_ref, start_point), false, false)
            .map(|_| ())
    }

    /// `git log -1 [format]`; stdout is returned untrimmed. Silent unless a format is given.
    pub fn log1(&self, format: Option<&str>) -> Result<String, SyncError> {
        let mut args = vec!["log".to_string(), "-1".to_string()];
        if let Some(f) = format {
            args.push(f.to_string());
        }
        let out = self.exec_git(args, false, format.is_none())?;
        Ok(out)
    }

    fn exec_git(
        &self,
        args: Vec<String>,
        allow_non_zero_exit: bool,
        silent: bool,
    ) -> Result<String, SyncError> {
        let request = GitRequest::new(&self.working_dir, args)
            .envs(self.env.iter().cloned())
            .allow_non_zero_exit(allow_non_zero_exit)
            .silent(silent);
        Ok(self.runner.run(&request)?.stdout)
    }
}
