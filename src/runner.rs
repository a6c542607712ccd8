//! Subprocess seam for the git client.
//!
//! [`CommandRunner::run`] owns the shared policy (working directory must exist,
//! non-zero exit is an error unless allowed); implementations only provide
//! [`CommandRunner::spawn`].

use std::path::{Path, PathBuf};

#[cfg(feature = "trace")]
use tracing::instrument;

use crate::errors::SyncError;
use crate::util::exec::ExecRequest;

/// Outcome of one git invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
}

/// Everything needed to run git once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRequest {
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub env: Vec<(String, String)>,
    pub allow_non_zero_exit: bool,
    pub silent: bool,
}

impl GitRequest {
    pub fn new<I, S>(cwd: &Path, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GitRequest {
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.to_path_buf(),
            env: Vec::new(),
            allow_non_zero_exit: false,
            silent: false,
        }
    }

    pub fn envs<I>(mut self, env: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.env.extend(env);
        self
    }

    pub fn allow_non_zero_exit(mut self, allow: bool) -> Self {
        self.allow_non_zero_exit = allow;
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// First argument that is not a `-c key=value` pair, e.g. `fetch`.
    pub fn subcommand(&self) -> Option<&str> {
        let mut it = self.args.iter();
        while let Some(a) = it.next() {
            if a == "-c" {
                it.next();
                continue;
            }
            return Some(a.as_str());
        }
        None
    }
}

pub trait CommandRunner {
    /// Execute exactly one subprocess for `request`.
    fn spawn(&self, request: &GitRequest) -> Result<CommandResult, SyncError>;

    fn run(&self, request: &GitRequest) -> Result<CommandResult, SyncError> {
        if !crate::util::fs::directory_exists(&request.cwd) {
            return Err(SyncError::Precondition(format!(
                "Directory '{}' does not exist",
                request.cwd.display()
            )));
        }
        let result = self.spawn(request)?;
        if result.exit_code != 0 && !request.allow_non_zero_exit {
            return Err(SyncError::Command {
                args: request.args.clone(),
                exit_code: result.exit_code,
                stdout: result.stdout,
            });
        }
        Ok(result)
    }
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn spawn(&self, request: &GitRequest) -> Result<CommandResult, SyncError> {
        (**self).spawn(request)
    }
}

/// Runs the real git binary found on PATH.
#[derive(Debug, Clone)]
pub struct GitRunner {
    git_path: PathBuf,
}

impl GitRunner {
    pub fn new(git_path: impl Into<PathBuf>) -> Self {
        GitRunner {
            git_path: git_path.into(),
        }
    }

    /// Locate git via PATH search.
    pub fn locate() -> Result<Self, SyncError> {
        which::which("git")
            .map(GitRunner::new)
            .map_err(|e| SyncError::Construction(format!("Unable to locate executable file: git ({e})")))
    }

    pub fn git_path(&self) -> &Path {
        &self.git_path
    }
}

impl CommandRunner for GitRunner {
    #[cfg_attr(
        feature = "trace",
        instrument(level = "debug", skip(self, request), fields(subcommand = ?request.subcommand()))
    )]
    fn spawn(&self, request: &GitRequest) -> Result<CommandResult, SyncError> {
        if !request.silent {
            println!(
                "[command]{} {}",
                self.git_path.display(),
                crate::util::shell_join(&request.args)
            );
        }
        let mut exec = ExecRequest::new(self.git_path.as_os_str())
            .args(&request.args)
            .cwd(&request.cwd)
            .inherit_env(true)
            .echo_stdout(!request.silent);
        for (k, v) in &request.env {
            exec = exec.env(k, v);
        }
        let out = exec.run()?;
        Ok(CommandResult {
            exit_code: out.exit_code,
            stdout: out.stdout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Fixed {
        code: i32,
        spawned: Cell<usize>,
    }

    impl CommandRunner for Fixed {
        fn spawn(&self, _request: &GitRequest) -> Result<CommandResult, SyncError> {
            self.spawned.set(self.spawned.get() + 1);
            Ok(CommandResult {
                exit_code: self.code,
                stdout: "out\n".into(),
            })
        }
    }

    #[test]
    fn missing_cwd_is_precondition_error_without_spawn() {
        let r = Fixed {
            code: 0,
            spawned: Cell::new(0),
        };
        let req = GitRequest::new(Path::new("/definitely/not/here/refsync"), ["status"]);
        match r.run(&req) {
            Err(SyncError::Precondition(msg)) => assert!(msg.contains("does not exist")),
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(r.spawned.get(), 0);
    }

    #[test]
    fn non_zero_exit_is_error_unless_allowed() {
        let td = tempfile::tempdir().expect("tmpdir");
        let r = Fixed {
            code: 2,
            spawned: Cell::new(0),
        };
        let req = GitRequest::new(td.path(), ["fetch"]);
        match r.run(&req) {
            Err(SyncError::Command {
                exit_code, stdout, ..
            }) => {
                assert_eq!(exit_code, 2);
                assert_eq!(stdout, "out\n");
            }
            other => panic!("unexpected: {other:?}"),
        }
        let ok = r.run(&req.allow_non_zero_exit(true)).expect("allowed");
        assert_eq!(ok.exit_code, 2);
        assert_eq!(r.spawned.get(), 2);
    }

    #[test]
    fn subcommand_skips_config_pairs() {
        let req = GitRequest::new(Path::new("."), ["-c", "protocol.version=2", "fetch"]);
        assert_eq!(req.subcommand(), Some("fetch"));
        let empty: [&str; 0] = [];
        assert_eq!(GitRequest::new(Path::new("."), empty).subcommand(), None);
    }
}
