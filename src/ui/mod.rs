//! Terminal/runner presentation: log groups, annotations, warnings.

pub mod group;
pub mod warn;

pub use group::{annotate_error, Group};
pub use warn::warn_print;
