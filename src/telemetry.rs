//! Optional `tracing` subscriber (cargo feature `trace`).
//!
//! Spans from `#[instrument]` on the pipeline entry points are printed to
//! stderr, filtered by `RUST_LOG` (default `warn`).

use once_cell::sync::OnceCell;
use tracing_subscriber::prelude::*;

static INIT: OnceCell<()> = OnceCell::new();

/// Install the global subscriber once. Returns false if another subscriber already won.
pub fn init_tracing() -> bool {
    if INIT.get().is_some() {
        return true;
    }
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    let env_filter = tracing_subscriber::EnvFilter::new(filter);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    if tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("refsync: tracing init skipped (global subscriber already set)");
        return false;
    }
    let _ = INIT.set(());
    true
}
