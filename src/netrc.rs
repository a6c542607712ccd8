//! Guarded append of a single machine credential to the per-user `~/.netrc`.
//!
//! The file is shared with every other tool on the host, so an existing file
//! must be owned by the current user and closed to group/other before we add
//! a secret to it. Checks run on unix only.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[cfg(unix)]
use nix::unistd::getuid;
#[cfg(feature = "trace")]
use tracing::instrument;

use crate::errors::SyncError;
use crate::settings::SyncSettings;

/// One `machine <host> login <login> password <secret>` line.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub host: String,
    pub login: String,
    pub secret: String,
}

// Never print the secret.
impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("host", &self.host)
            .field("login", &self.login)
            .field("secret", &"***")
            .finish()
    }
}

impl CredentialRecord {
    pub fn from_settings(settings: &SyncSettings) -> Self {
        CredentialRecord {
            host: settings.server_host.clone(),
            login: settings.actor.clone(),
            secret: settings.token.clone(),
        }
    }

    /// Render as a single newline-terminated line.
    pub fn render(&self) -> Result<String, SyncError> {
        for (value, what) in [
            (&self.host, "netrc machine"),
            (&self.login, "netrc login"),
            (&self.secret, "netrc password"),
        ] {
            crate::util::reject_newlines(value, what).map_err(SyncError::Security)?;
        }
        Ok(format!(
            "machine {} login {} password {}\n",
            self.host, self.login, self.secret
        ))
    }
}

/// `$HOME/.netrc`, or None when no home directory is known.
fn netrc_in(home: Option<PathBuf>) -> Option<PathBuf> {
    home.filter(|h| !h.as_os_str().is_empty())
        .map(|h| h.join(".netrc"))
}

#[derive(Debug, Clone)]
pub struct NetrcWriter {
    /// None until a home directory is known; the error surfaces on first write.
    path: Option<PathBuf>,
    owner_uid: Option<u32>,
}

impl NetrcWriter {
    /// Writer for the current user's `~/.netrc`.
    pub fn for_current_user() -> Self {
        NetrcWriter::in_home(home::home_dir())
    }

    /// Writer for `<home>/.netrc`. A missing home is reported by [`NetrcWriter::write`].
    pub fn in_home(home: Option<PathBuf>) -> Self {
        NetrcWriter {
            path: netrc_in(home),
            owner_uid: None,
        }
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        NetrcWriter {
            path: Some(path.into()),
            owner_uid: None,
        }
    }

    /// Expect an existing file to be owned by `uid` instead of the process uid.
    pub fn with_owner_uid(mut self, uid: u32) -> Self {
        self.owner_uid = Some(uid);
        self
    }

    pub fn path(&self) -> Result<&Path, SyncError> {
        self.path
            .as_deref()
            .ok_or_else(|| SyncError::Environment("Unable to determine home directory".to_string()))
    }

    #[cfg(unix)]
    fn expected_uid(&self) -> u32 {
        self.owner_uid.unwrap_or_else(|| getuid().as_raw())
    }

    /// Validate an existing file. A missing file passes.
    #[cfg(unix)]
    pub fn check_permissions(&self) -> Result<(), SyncError> {
        use std::os::unix::fs::MetadataExt;

        let md = match std::fs::metadata(self.path()?) {
            Ok(md) => md,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(SyncError::Io(e)),
        };
        if md.uid() != self.expected_uid() {
            return Err(SyncError::Security(
                "~/.netrc file owner does not match current user".to_string(),
            ));
        }
        if md.mode() & 0o077 != 0 {
            return Err(SyncError::Security(
                "~/.netrc access too permissive: access permissions must restrict access to only the owner"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Ownership and mode bits are not checked on this platform.
    #[cfg(not(unix))]
    pub fn check_permissions(&self) -> Result<(), SyncError> {
        Ok(())
    }

    /// Append `record`, creating the file owner-only if it does not exist yet.
    #[cfg_attr(feature = "trace", instrument(level = "info", err, skip(self), fields(path = ?self.path)))]
    pub fn write(&self, record: &CredentialRecord) -> Result<(), SyncError> {
        let line = record.render()?;
        let path = self.path()?;
        self.check_permissions()?;

        let mut opts = OpenOptions::new();
        opts.create(true).append(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(0o600);
        }
        let mut file = opts.open(path)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}
