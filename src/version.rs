//! git client version parsing and minimum-version gating.

use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

use crate::errors::SyncError;
use crate::runner::{CommandRunner, GitRequest};

/// Wire protocol v2 is not available before git 2.18.
pub const MINIMUM_GIT_VERSION: ClientVersion = ClientVersion {
    major: 2,
    minor: 18,
    patch: None,
    valid: true,
};

/// A `major.minor[.patch]` version as reported by the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientVersion {
    major: u64,
    minor: u64,
    patch: Option<u64>,
    valid: bool,
}

impl ClientVersion {
    pub fn new(major: u64, minor: u64, patch: Option<u64>) -> Self {
        ClientVersion {
            major,
            minor,
            patch,
            valid: true,
        }
    }

    /// Parse `major.minor` or `major.minor.patch`; anything else (including a
    /// component above `u64::MAX`) yields an invalid version.
    pub fn parse(s: &str) -> Self {
        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return ClientVersion::default();
        }
        let mut nums = Vec::with_capacity(parts.len());
        for p in &parts {
            if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                return ClientVersion::default();
            }
            match p.parse::<u64>() {
                Ok(n) => nums.push(n),
                Err(_) => return ClientVersion::default(),
            }
        }
        ClientVersion::new(nums[0], nums[1], nums.get(2).copied())
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    /// Patch component; 0 when the source text had none.
    pub fn patch(&self) -> u64 {
        self.patch.unwrap_or(0)
    }

    fn triple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch())
    }

    /// True iff this version is at or above `minimum`. Invalid versions never pass.
    pub fn check_minimum(&self, minimum: &ClientVersion) -> bool {
        self.valid && minimum.valid && self.triple().cmp(&minimum.triple()) != Ordering::Less
    }
}

impl fmt::Display for ClientVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            return f.write_str("unknown");
        }
        match self.patch {
            Some(p) => write!(f, "{}.{}.{}", self.major, self.minor, p),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

/// Find the first `\d+\.\d+(\.\d+)?` in `text`.
fn find_version_token(text: &str) -> Option<&str> {
    let b = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        i
    };
    let mut start = 0;
    while start < b.len() {
        if !b[start].is_ascii_digit() {
            start += 1;
            continue;
        }
        let major_end = digits_from(start);
        if major_end < b.len() && b[major_end] == b'.' {
            let minor_end = digits_from(major_end + 1);
            if minor_end > major_end + 1 {
                let mut end = minor_end;
                if end < b.len() && b[end] == b'.' {
                    let patch_end = digits_from(end + 1);
                    if patch_end > end + 1 {
                        end = patch_end;
                    }
                }
                return Some(&text[start..end]);
            }
        }
        start = major_end;
    }
    None
}

/// Extract a version from `git version` output. Multi-line output is left invalid.
pub fn parse_version_output(stdout: &str) -> ClientVersion {
    let trimmed = stdout.trim();
    if trimmed.contains('\n') {
        return ClientVersion::default();
    }
    find_version_token(trimmed)
        .map(ClientVersion::parse)
        .unwrap_or_default()
}

/// Run `git version` through `runner` and parse the result.
pub fn probe<R: CommandRunner + ?Sized>(
    runner: &R,
    cwd: &Path,
    env: &[(String, String)],
) -> Result<ClientVersion, SyncError> {
    let request = GitRequest::new(cwd, ["version"]).envs(env.iter().cloned());
    let output = runner.run(&request)?;
    let version = parse_version_output(&output.stdout);
    if !version.is_valid() {
        return Err(SyncError::Environment(
            "Unable to determine git version".to_string(),
        ));
    }
    Ok(version)
}
