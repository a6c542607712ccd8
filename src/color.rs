#![allow(clippy::module_name_repetitions)]
//! Color mode configuration and stderr logging helpers.
//!
//! Logging policy:
//! - All progress/diagnostic text goes to stderr as single lines; stdout is
//!   reserved for git's own output and the final commit hash.
//! - Precompute `let use_err = color_enabled_stderr();` once per scope.
//! - Debug lines are printed only when debug output is enabled
//!   (`--verbose`, `REFSYNC_DEBUG=1` or the runner's `RUNNER_DEBUG=1`).

use clap::ValueEnum;
use once_cell::sync::OnceCell;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

static COLOR_MODE: OnceCell<ColorMode> = OnceCell::new();
static DEBUG: OnceCell<bool> = OnceCell::new();

pub fn set_color_mode(mode: ColorMode) {
    let _ = COLOR_MODE.set(mode);
}

/// Force debug output on; otherwise it follows the environment.
pub fn set_debug(enabled: bool) {
    let _ = DEBUG.set(enabled);
}

pub fn debug_enabled() -> bool {
    if let Some(v) = DEBUG.get() {
        if *v {
            return true;
        }
    }
    let on = |k: &str| std::env::var(k).ok().as_deref() == Some("1");
    on("REFSYNC_DEBUG") || on("RUNNER_DEBUG")
}

fn parse_color_mode(s: &str) -> Option<ColorMode> {
    match s.trim().to_ascii_lowercase().as_str() {
        "auto" => Some(ColorMode::Auto),
        "always" | "on" | "true" | "yes" => Some(ColorMode::Always),
        "never" | "off" | "false" | "no" => Some(ColorMode::Never),
        _ => None,
    }
}

fn resolve(mode: ColorMode, is_tty: bool) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => is_tty,
    }
}

fn color_enabled_for(is_tty: bool) -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if let Some(mode) = COLOR_MODE.get().copied() {
        return resolve(mode, is_tty);
    }
    if let Some(mode) = std::env::var("REFSYNC_COLOR")
        .ok()
        .and_then(|v| parse_color_mode(&v))
    {
        return resolve(mode, is_tty);
    }
    is_tty
}

pub fn color_enabled_stderr() -> bool {
    color_enabled_for(atty::is(atty::Stream::Stderr))
}

/// Wrap string with ANSI color code when enabled; otherwise return unchanged.
pub fn paint(enabled: bool, code: &str, s: &str) -> String {
    if enabled {
        format!("{code}{s}\x1b[0m")
    } else {
        s.to_string()
    }
}

pub fn log_info_stderr(use_color: bool, msg: &str) {
    eprintln!("{}", paint(use_color, "\x1b[36;1m", msg));
}

pub fn log_warn_stderr(use_color: bool, msg: &str) {
    eprintln!("{}", paint(use_color, "\x1b[33m", msg));
}

pub fn log_error_stderr(use_color: bool, msg: &str) {
    eprintln!("{}", paint(use_color, "\x1b[31;1m", msg));
}

pub fn log_debug_stderr(msg: &str) {
    if debug_enabled() {
        eprintln!("{}", paint(color_enabled_stderr(), "\x1b[2m", &format!("debug: {msg}")));
    }
}
