#![allow(clippy::module_name_repetitions)]
//! Small utilities: subprocess execution, filesystem helpers, newline rejection, shell quoting.

pub mod exec;
pub mod fs;

/// Reject strings containing newline, carriage return, or NUL before embedding them
/// into a line-oriented file or a single-line log.
///
/// Keep error text stable (tests depend on it).
pub fn reject_newlines(s: &str, what: &str) -> Result<(), String> {
    if s.contains('\n') || s.contains('\r') || s.contains('\0') {
        Err(format!("refusing to write {what}: contains newline"))
    } else {
        Ok(())
    }
}

/// Render an argument vector for display (`[command]` echo lines).
pub fn shell_join(args: &[String]) -> String {
    args.iter()
        .map(|a| shell_escape(a))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn shell_escape(s: &str) -> String {
    if s.is_empty() {
        "''".to_string()
    } else if s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_=./:@+%,".contains(c))
    {
        s.to_string()
    } else {
        let escaped = s.replace('\'', "'\"'\"'");
        format!("'{}'", escaped)
    }
}
