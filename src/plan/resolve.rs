//! Module resolution rules.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::platform::Platform;

/// Extensions the bundler resolves, grouped by input kind.
///
/// Stylesheets (plain and preprocessed), scripts, component files.
pub const RESOLVED_EXTENSIONS: [&str; 4] = ["css", "scss", "js", "vue"];

/// Import alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alias {
    pub prefix: String,
    pub target: PathBuf,
}

/// Ordered extension suffixes for `platform`.
///
/// Each platform-qualified suffix directly precedes its generic one, so
/// `style.android.css` wins over `style.css` when both exist.
pub fn resolution_rules(platform: Platform) -> Vec<String> {
    RESOLVED_EXTENSIONS
        .iter()
        .flat_map(|ext| [format!(".{}.{ext}", platform.qualifier()), format!(".{ext}")])
        .collect()
}

/// Directories searched for bare module imports, most specific first.
pub fn module_dirs(project_root: &Path) -> Vec<PathBuf> {
    let node_modules = project_root.join("node_modules");
    vec![node_modules.join("tns-core-modules"), node_modules]
}

/// `~/x` imports resolve from the app root.
pub fn aliases(app_root: &Path) -> Vec<Alias> {
    vec![Alias {
        prefix: "~".into(),
        target: app_root.to_path_buf(),
    }]
}
