use std::path::PathBuf;

/// Default forge host for fetch URLs and the netrc machine entry.
pub const DEFAULT_SERVER_HOST: &str = "github.com";

/// Fully resolved, validated inputs for one sync run.
#[derive(Clone, PartialEq, Eq)]
pub struct SyncSettings {
    /// Where the repository is placed on disk (nested under the workspace root).
    pub repository_path: PathBuf,
    pub repository_owner: String,
    pub repository_name: String,
    /// Ref without the leading `refs/`, e.g. `heads/main` or `pull/7/head`.
    pub git_ref: String,
    /// Commit to check out; empty means check out the ref itself.
    pub commit: String,
    pub actor: String,
    pub token: String,
    pub server_host: String,
}

impl std::fmt::Debug for SyncSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncSettings")
            .field("repository_path", &self.repository_path)
            .field("repository_owner", &self.repository_owner)
            .field("repository_name", &self.repository_name)
            .field("git_ref", &self.git_ref)
            .field("commit", &self.commit)
            .field("actor", &self.actor)
            .field("token", &if self.token.is_empty() { "" } else { "***" })
            .field("server_host", &self.server_host)
            .finish()
    }
}

impl SyncSettings {
    /// `owner/name`
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.repository_owner, self.repository_name)
    }
}
