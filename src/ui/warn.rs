/// Print a standardized warning line to stderr (color-aware).
pub fn warn_print(msg: &str) {
    let use_err = crate::color::color_enabled_stderr();
    eprintln!(
        "{}",
        crate::color::paint(use_err, "\x1b[33;1m", &format!("warning: {}", msg))
    );
}
