use std::process::ExitCode;

use clap::Parser;

mod cli;

use refsync::{
    annotate_error, color_enabled_stderr, display_for_sync_error, exit_code_for_sync_error,
    log_error_stderr, SyncOutcome,
};

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if let Some(mode) = cli.color {
        refsync::set_color_mode(mode);
    }
    if cli.verbose {
        refsync::set_debug(true);
    }
    #[cfg(feature = "trace")]
    refsync::telemetry::init_tracing();

    match refsync::execute(cli.phase, cli.raw_inputs()) {
        Ok(Some(SyncOutcome::Synced { commit })) => {
            println!("{commit}");
            ExitCode::SUCCESS
        }
        Ok(Some(SyncOutcome::Skipped { .. })) | Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            let msg = display_for_sync_error(&e);
            annotate_error(&e.to_string());
            log_error_stderr(color_enabled_stderr(), &format!("refsync: error: {msg}"));
            ExitCode::from(exit_code_for_sync_error(&e))
        }
    }
}
