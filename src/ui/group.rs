//! Collapsible log groups.
//!
//! Under GitHub Actions the runner folds everything between `::group::` and
//! `::endgroup::`; elsewhere a painted header line is printed instead.

use crate::color::{color_enabled_stderr, paint};

fn in_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").ok().as_deref() == Some("true")
}

/// Guard that closes its group on drop, including on early `?` returns.
#[derive(Debug)]
pub struct Group {
    actions: bool,
}

impl Group {
    pub fn start(title: &str) -> Self {
        let actions = in_actions();
        if actions {
            // Workflow commands are read from stdout.
            println!("::group::{title}");
        } else {
            eprintln!("{}", paint(color_enabled_stderr(), "\x1b[1m", &format!("==> {title}")));
        }
        Group { actions }
    }
}

impl Drop for Group {
    fn drop(&mut self) {
        if self.actions {
            println!("::endgroup::");
        }
    }
}

/// Emit an error annotation when running under GitHub Actions.
pub fn annotate_error(msg: &str) {
    if in_actions() {
        // Annotation text must stay on one line.
        let one_line = msg.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A");
        println!("::error::{one_line}");
    }
}
