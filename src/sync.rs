//! Source-sync pipeline.
//!
//! Steps run strictly in order with one attempt each:
//! prepare path, construct git (version probe), provision credentials,
//! init, add remote, fetch one ref, checkout, confirm HEAD.
//! A construction failure skips everything after path preparation; any
//! other error aborts the run.

use std::path::Path;

#[cfg(feature = "trace")]
use tracing::instrument;

use crate::color::{color_enabled_stderr, log_info_stderr, log_warn_stderr};
use crate::errors::SyncError;
use crate::git::{GitCommandManager, REMOTE_NAME};
use crate::netrc::{CredentialRecord, NetrcWriter};
use crate::runner::{CommandRunner, GitRunner};
use crate::settings::SyncSettings;
use crate::ui::Group;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Checkout finished; `commit` is the confirmed HEAD.
    Synced { commit: String },
    /// git was unavailable, nothing beyond path preparation happened.
    Skipped { reason: String },
}

#[derive(Debug)]
pub struct RepositorySync {
    settings: SyncSettings,
    netrc: NetrcWriter,
}

impl RepositorySync {
    pub fn new(settings: SyncSettings, netrc: NetrcWriter) -> Self {
        RepositorySync { settings, netrc }
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Run with the git binary found on PATH.
    pub fn run(&self) -> Result<SyncOutcome, SyncError> {
        self.run_with(GitCommandManager::<GitRunner>::create)
    }

    /// Run with a caller-provided client constructor.
    #[cfg_attr(
        feature = "trace",
        instrument(level = "info", err, skip(self, create_client), fields(repository = %self.settings.qualified_name()))
    )]
    pub fn run_with<R, F>(&self, create_client: F) -> Result<SyncOutcome, SyncError>
    where
        R: CommandRunner,
        F: FnOnce(&Path) -> Result<GitCommandManager<R>, SyncError>,
    {
        let use_err = color_enabled_stderr();
        let s = &self.settings;
        log_info_stderr(
            use_err,
            &format!("Syncing repository: {}", s.qualified_name()),
        );

        prepare_path(&s.repository_path)?;

        let git = {
            let _group = Group::start("Getting Git version info");
            log_info_stderr(
                use_err,
                &format!("Working directory is '{}'", s.repository_path.display()),
            );
            match create_client(&s.repository_path) {
                Ok(git) => git,
                Err(e) if e.is_construction() => {
                    log_warn_stderr(
                        use_err,
                        &format!("refsync: git is unavailable, skipping source sync: {e}"),
                    );
                    return Ok(SyncOutcome::Skipped {
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        };

        {
            let _group = Group::start("Setting up access");
            self.netrc.write(&CredentialRecord::from_settings(s))?;
        }

        let repository_url = crate::remote::fetch_url(s)?;
        {
            let _group = Group::start(&format!("Initializing the repository {repository_url}"));
            git.init()?;
            git.remote_add(REMOTE_NAME, &repository_url)?;
        }

        {
            let _group = Group::start("Fetching the repository");
            git.fetch(&s.git_ref)?;
        }

        {
            let _group = Group::start("Checking out the ref");
            git.checkout(&s.git_ref, &s.commit)?;
        }

        let commit = git.log1(Some("--format=%H"))?.trim().to_string();
        if commit.is_empty() {
            return Err(SyncError::Environment(
                "Unable to determine the checked-out commit".to_string(),
            ));
        }
        log_info_stderr(use_err, &format!("Checked out commit {commit}"));
        Ok(SyncOutcome::Synced { commit })
    }
}

/// Replace a conflicting non-directory at `path` and make sure the directory exists.
fn prepare_path(path: &Path) -> Result<(), SyncError> {
    if crate::util::fs::remove_conflicting_file(path)? {
        crate::color::log_debug_stderr(&format!(
            "Removed conflicting file at '{}'",
            path.display()
        ));
    }
    crate::util::fs::ensure_dir(path)?;
    Ok(())
}
