//! refsync: one-shot synchronization of a single git ref into a CI workspace.
//!
//! Pipeline (see [`sync::RepositorySync`]): prepare the target directory,
//! negotiate the git version, append a `~/.netrc` credential, `git init`,
//! add `origin`, fetch exactly one ref over protocol v2, check out the
//! requested commit and read back HEAD.
//!
//! The binary resolves configuration from flags/env in `main.rs`; the library
//! never reads the environment for configuration after [`inputs::resolve`].

pub mod color;
pub mod errors;
pub mod git;
pub mod inputs;
pub mod lifecycle;
pub mod netrc;
pub mod remote;
pub mod runner;
pub mod scripted;
pub mod settings;
pub mod sync;
#[cfg(feature = "trace")]
pub mod telemetry;
pub mod ui;
pub mod util;
pub mod version;

pub use color::{
    color_enabled_stderr, log_error_stderr, log_info_stderr, log_warn_stderr, paint,
    set_color_mode, set_debug, ColorMode,
};
pub use errors::{display_for_sync_error, exit_code_for_io_error, exit_code_for_sync_error, SyncError};
pub use git::{checkout_args, fetch_args, GitCommandManager};
pub use inputs::{resolve, RawInputs};
pub use lifecycle::{execute, Phase};
pub use netrc::{CredentialRecord, NetrcWriter};
pub use runner::{CommandResult, CommandRunner, GitRequest, GitRunner};
pub use scripted::ScriptedRunner;
pub use settings::SyncSettings;
pub use sync::{RepositorySync, SyncOutcome};
pub use ui::annotate_error;
pub use version::{ClientVersion, MINIMUM_GIT_VERSION};
