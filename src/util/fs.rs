use std::fs;
use std::io;
use std::path::Path;

/// True if `p` exists and is a directory (symlinks followed).
pub fn directory_exists(p: &Path) -> bool {
    fs::metadata(p).map(|m| m.is_dir()).unwrap_or(false)
}

/// Remove `p` when it exists as anything other than a directory. Returns whether it removed something.
pub fn remove_conflicting_file(p: &Path) -> io::Result<bool> {
    match fs::symlink_metadata(p) {
        Ok(md) if md.is_dir() => Ok(false),
        // A symlink to a directory is kept; it resolves to a usable target.
        Ok(md) if md.file_type().is_symlink() && directory_exists(p) => Ok(false),
        Ok(_) => {
            fs::remove_file(p)?;
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Ensure a directory exists, creating parents as needed.
pub fn ensure_dir(p: &Path) -> io::Result<()> {
    fs::create_dir_all(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_plain_file_but_keeps_directory() {
        let td = tempfile::tempdir().expect("tmpdir");
        let file = td.path().join("repo");
        fs::write(&file, b"stale").expect("write");
        assert!(remove_conflicting_file(&file).expect("remove"));
        assert!(!file.exists());

        ensure_dir(&file).expect("mkdir");
        assert!(!remove_conflicting_file(&file).expect("keep"));
        assert!(directory_exists(&file));
    }

    #[test]
    fn missing_path_is_not_an_error() {
        let td = tempfile::tempdir().expect("tmpdir");
        assert!(!remove_conflicting_file(&td.path().join("absent")).expect("ok"));
    }
}
