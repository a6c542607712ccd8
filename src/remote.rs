//! Remote URL derivation and server host validation. HTTPS only.

use url::Url;

use crate::errors::SyncError;
use crate::settings::SyncSettings;

/// Validate a bare server host (`github.com`, `ghe.example:8443`): no scheme, path, or credentials.
pub fn validate_server_host(host: &str) -> Result<(), SyncError> {
    let invalid = || SyncError::Input(format!("Invalid server host '{host}'"));
    if host.is_empty() || host.contains(['/', '@', '?', '#']) || host.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let parsed = Url::parse(&format!("https://{host}/")).map_err(|_| invalid())?;
    if parsed.host_str().is_none() {
        return Err(invalid());
    }
    Ok(())
}

/// `https://<host>/<owner>/<name>.git`
pub fn fetch_url(settings: &SyncSettings) -> Result<String, SyncError> {
    if settings.repository_owner.is_empty() {
        return Err(SyncError::Input(
            "repository owner must be defined".to_string(),
        ));
    }
    if settings.repository_name.is_empty() {
        return Err(SyncError::Input(
            "repository name must be defined".to_string(),
        ));
    }
    Ok(format!(
        "https://{}/{}/{}.git",
        settings.server_host, settings.repository_owner, settings.repository_name
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn settings(owner: &str, name: &str) -> SyncSettings {
        SyncSettings {
            repository_path: PathBuf::from("/work/widget"),
            repository_owner: owner.into(),
            repository_name: name.into(),
            git_ref: "heads/main".into(),
            commit: String::new(),
            actor: "bot".into(),
            token: "t".into(),
            server_host: "github.com".into(),
        }
    }

    #[test]
    fn url_is_https_owner_name_git() {
        assert_eq!(
            fetch_url(&settings("acme", "widget")).unwrap(),
            "https://github.com/acme/widget.git"
        );
    }

    #[test]
    fn empty_owner_or_name_rejected() {
        assert!(fetch_url(&settings("", "widget")).is_err());
        assert!(fetch_url(&settings("acme", "")).is_err());
    }

    #[test]
    fn server_host_validation() {
        assert!(validate_server_host("github.com").is_ok());
        assert!(validate_server_host("ghe.example.com:8443").is_ok());
        assert!(validate_server_host("").is_err());
        assert!(validate_server_host("https://github.com").is_err());
        assert!(validate_server_host("user@github.com").is_err());
        assert!(validate_server_host("github.com/acme").is_err());
    }
}
