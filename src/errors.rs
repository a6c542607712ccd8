//! Error taxonomy for the sync pipeline.
//!
//! - Map io::ErrorKind::NotFound to exit code 127; all others to 1.
//! - `Construction` is the only recoverable variant: the orchestrator turns it
//!   into a skipped sync instead of a failed run.
//! - Display text is surfaced verbatim by the binary; keep it stable.
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum SyncError {
    /// Missing or unusable execution context (git version, home directory).
    Environment(String),
    /// Credential file ownership/permission violation, or unsafe credential text.
    Security(String),
    /// Working directory missing when a git command was about to run.
    Precondition(String),
    /// git exited non-zero and the call did not allow it.
    Command {
        args: Vec<String>,
        exit_code: i32,
        stdout: String,
    },
    /// The git command manager could not be built (binary absent, probe not runnable).
    Construction(String),
    /// Caller-supplied configuration rejected at the input boundary.
    Input(String),
    Io(io::Error),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Environment(s)
            | SyncError::Security(s)
            | SyncError::Precondition(s)
            | SyncError::Construction(s)
            | SyncError::Input(s) => f.write_str(s),
            SyncError::Command {
                args, exit_code, ..
            } => write!(
                f,
                "The process 'git {}' failed with exit code {}",
                args.join(" "),
                exit_code
            ),
            SyncError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SyncError {
    fn from(e: io::Error) -> Self {
        SyncError::Io(e)
    }
}

impl SyncError {
    /// True when the error belongs to the recoverable construction tier.
    pub fn is_construction(&self) -> bool {
        matches!(self, SyncError::Construction(_))
    }
}

/// Map an io::Error to a process exit code:
/// - 127 for NotFound (command not found)
/// - 1 for all other errors
pub fn exit_code_for_io_error(e: &io::Error) -> u8 {
    if e.kind() == io::ErrorKind::NotFound {
        127
    } else {
        1
    }
}

/// Convert SyncError to exit code (parity with io::Error mapping).
pub fn exit_code_for_sync_error(e: &SyncError) -> u8 {
    match e {
        SyncError::Io(ioe) => exit_code_for_io_error(ioe),
        _ => 1,
    }
}

/// Render the user-facing text; captured git stdout is appended for command failures.
pub fn display_for_sync_error(e: &SyncError) -> String {
    match e {
        SyncError::Command { stdout, .. } if !stdout.trim().is_empty() => {
            format!("{e}\n{}", stdout.trim_end())
        }
        _ => e.to_string(),
    }
}
