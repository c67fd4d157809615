//! Dotted config field paths.

use owo_colors::OwoColorize;
use std::fmt;

/// Location of a field inside `assetplan.toml`, e.g. `project.app_path`.
///
/// Each section exposes its paths through a `FIELDS` constant so that
/// diagnostics never spell field names by hand:
///
/// ```ignore
/// diag.error(ProjectSection::FIELDS.app_path, "must not be empty");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(&'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}
