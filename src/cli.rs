use std::path::PathBuf;

use clap::Parser;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nrevision: ",
    env!("REFSYNC_BUILD_REV"),
    "\nbuilt: ",
    env!("REFSYNC_BUILD_DATE"),
    "\ntarget: ",
    env!("REFSYNC_BUILD_TARGET"),
    "\nrustc: ",
    env!("REFSYNC_BUILD_RUSTC"),
);

/// Validate `owner/name` early so clap reports it next to the flag.
fn validate_repository(s: &str) -> Result<String, String> {
    refsync::inputs::split_repository(s)
        .map(|_| s.to_string())
        .map_err(|e| e.to_string())
}

#[derive(Parser, Debug)]
#[command(
    name = "refsync",
    version,
    long_version = LONG_VERSION,
    about = "Fetch exactly one git ref into the CI workspace and check out the requested commit."
)]
pub(crate) struct Cli {
    /// Root workspace directory; the repository path must resolve under it
    #[arg(long, env = "GITHUB_WORKSPACE")]
    pub(crate) workspace: Option<PathBuf>,

    /// Repository to sync, as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY", value_parser = validate_repository)]
    pub(crate) repository: Option<String>,

    /// Checkout location relative to the workspace
    #[arg(long, env = "INPUT_PATH", default_value = ".")]
    pub(crate) path: String,

    /// Fully qualified ref to fetch (refs/heads/main, refs/pull/7/merge, ...)
    #[arg(long = "ref", env = "GITHUB_REF")]
    pub(crate) git_ref: Option<String>,

    /// Commit to check out; defaults to the event payload's after/head sha
    #[arg(long, env = "INPUT_COMMIT")]
    pub(crate) commit: Option<String>,

    /// Webhook event payload used to find the commit
    #[arg(long = "event-path", env = "GITHUB_EVENT_PATH")]
    pub(crate) event_path: Option<PathBuf>,

    /// Login written to ~/.netrc
    #[arg(long, env = "GITHUB_ACTOR")]
    pub(crate) actor: Option<String>,

    /// Token written to ~/.netrc
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub(crate) token: Option<String>,

    /// Forge host used for the remote URL and the netrc machine entry
    #[arg(long = "server-host", env = "REFSYNC_SERVER_HOST")]
    pub(crate) server_host: Option<String>,

    /// Lifecycle phase: main runs the sync, post is the post-job step
    #[arg(long, value_enum, env = "REFSYNC_PHASE", default_value = "main")]
    pub(crate) phase: refsync::Phase,

    /// Colorize stderr output: auto|always|never
    #[arg(long = "color", value_enum)]
    pub(crate) color: Option<refsync::ColorMode>,

    /// Print debug diagnostics
    #[arg(long)]
    pub(crate) verbose: bool,
}

impl Cli {
    pub(crate) fn raw_inputs(&self) -> refsync::RawInputs {
        refsync::RawInputs {
            workspace: self.workspace.clone(),
            repository: self.repository.clone(),
            path: Some(self.path.clone()),
            git_ref: self.git_ref.clone(),
            commit: self.commit.clone(),
            event_path: self.event_path.clone(),
            actor: self.actor.clone(),
            token: self.token.clone(),
            server_host: self.server_host.clone(),
        }
    }
}
