//! Scripted [`CommandRunner`] that replays canned results instead of spawning git.
//!
//! Results are keyed by git subcommand (`version`, `fetch`, ...). Unscripted
//! subcommands succeed with empty stdout. Every request is recorded so callers
//! can assert on the exact sequence of invocations.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::errors::SyncError;
use crate::runner::{CommandResult, CommandRunner, GitRequest};

#[derive(Debug, Default)]
pub struct ScriptedRunner {
    results: HashMap<String, CommandResult>,
    calls: RefCell<Vec<GitRequest>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `subcommand` with exit code 0 and `stdout`.
    pub fn on(self, subcommand: &str, stdout: &str) -> Self {
        self.on_exit(subcommand, 0, stdout)
    }

    pub fn on_exit(mut self, subcommand: &str, exit_code: i32, stdout: &str) -> Self {
        self.results.insert(
            subcommand.to_string(),
            CommandResult {
                exit_code,
                stdout: stdout.to_string(),
            },
        );
        self
    }

    /// Recorded requests, in invocation order.
    pub fn calls(&self) -> Vec<GitRequest> {
        self.calls.borrow().clone()
    }

    /// Argument vectors of recorded requests, in invocation order.
    pub fn call_args(&self) -> Vec<Vec<String>> {
        self.calls.borrow().iter().map(|r| r.args.clone()).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn spawn(&self, request: &GitRequest) -> Result<CommandResult, SyncError> {
        self.calls.borrow_mut().push(request.clone());
        let key = request.subcommand().unwrap_or_default();
        Ok(self.results.get(key).cloned().unwrap_or_default())
    }
}
