//! Job lifecycle: the same binary runs once as the main step and once as the post-job step.

use clap::ValueEnum;

use crate::color::{color_enabled_stderr, log_info_stderr};
use crate::errors::SyncError;
use crate::inputs::{self, RawInputs};
use crate::netrc::NetrcWriter;
use crate::sync::{RepositorySync, SyncOutcome};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum Phase {
    /// Fetch and check out the repository.
    #[default]
    Main,
    /// Post-job step; no sync work.
    Post,
}

/// Execute `phase`. Returns the sync outcome for the main phase, None for post.
pub fn execute(phase: Phase, raw: RawInputs) -> Result<Option<SyncOutcome>, SyncError> {
    match phase {
        Phase::Main => {
            let settings = inputs::resolve(raw)?;
            let sync = RepositorySync::new(settings, NetrcWriter::for_current_user());
            sync.run().map(Some)
        }
        Phase::Post => {
            // Credentials are appended to the user's own ~/.netrc and left for the runner to discard.
            log_info_stderr(color_enabled_stderr(), "refsync: post-job: nothing to clean up");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_phase_does_not_touch_inputs() {
        // Inputs are empty and would fail resolution in the main phase.
        assert_eq!(execute(Phase::Post, RawInputs::default()).unwrap(), None);
        assert!(execute(Phase::Main, RawInputs::default()).is_err());
    }
}
