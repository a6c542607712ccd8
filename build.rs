use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

/// Trimmed stdout of a successful command, None otherwise.
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let out = Command::new(program).args(args).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let s = String::from_utf8_lossy(&out.stdout).trim().to_string();
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let build_date = command_stdout("date", &["-u", "+%Y-%m-%dT%H:%M:%SZ"]).unwrap_or_else(|| {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        format!("unix:{secs}")
    });
    let source_rev = command_stdout("git", &["rev-parse", "--short=12", "HEAD"])
        .unwrap_or_else(|| "unknown".to_string());
    let rustc = command_stdout("rustc", &["--version"]).unwrap_or_else(|| "unknown".to_string());
    let target = std::env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());

    // Consumed by the long --version text in src/cli.rs.
    println!("cargo:rustc-env=REFSYNC_BUILD_DATE={build_date}");
    println!("cargo:rustc-env=REFSYNC_BUILD_REV={source_rev}");
    println!("cargo:rustc-env=REFSYNC_BUILD_RUSTC={rustc}");
    println!("cargo:rustc-env=REFSYNC_BUILD_TARGET={target}");
}
