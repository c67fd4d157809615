//! Application source snapshot.
//!
//! Entry resolution depends on which files exist under the app root. The
//! snapshot is taken once, before planning, so that planning stays pure.

use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::debug;
use crate::platform::Platform;

/// Entry module used when the app manifest names none.
pub const DEFAULT_ENTRY_MODULE: &str = "app";

/// Script extension of entry modules.
pub const ENTRY_EXT: &str = "js";

/// The `main` field of the app's `package.json`.
#[derive(Debug, Deserialize)]
struct AppManifest {
    main: Option<String>,
}

/// Entry module name plus the entry candidates present on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppSources {
    entry_module: String,
    present: FxHashSet<PathBuf>,
}

impl AppSources {
    pub fn new(entry_module: impl Into<String>) -> Self {
        Self {
            entry_module: entry_module.into(),
            present: FxHashSet::default(),
        }
    }

    /// Mark a file (relative to the app root) as present.
    pub fn with_file(mut self, relative: impl Into<PathBuf>) -> Self {
        self.present.insert(relative.into());
        self
    }

    /// Read the manifest and probe entry candidates under `app_root`.
    pub fn scan(app_root: &Path) -> Self {
        let entry_module = read_entry_module(app_root);

        let candidates = Platform::ALL
            .iter()
            .map(|p| p.qualify(&entry_module, ENTRY_EXT))
            .chain(std::iter::once(format!("{entry_module}.{ENTRY_EXT}")));

        let present = candidates
            .map(PathBuf::from)
            .filter(|rel| app_root.join(rel).is_file())
            .collect();

        Self {
            entry_module,
            present,
        }
    }

    pub fn entry_module(&self) -> &str {
        &self.entry_module
    }

    /// Whether `relative` (to the app root) was found during the scan.
    pub fn contains(&self, relative: &Path) -> bool {
        self.present.contains(relative)
    }
}

/// Entry module named by `<app_root>/package.json`, or the default.
fn read_entry_module(app_root: &Path) -> String {
    let manifest_path = app_root.join("package.json");

    let manifest = match fs::read_to_string(&manifest_path) {
        Ok(content) => serde_json::from_str::<AppManifest>(&content),
        Err(e) => {
            debug!("sources"; "no app manifest at {}: {}", manifest_path.display(), e);
            return DEFAULT_ENTRY_MODULE.to_string();
        }
    };

    match manifest {
        Ok(AppManifest { main: Some(main) }) => entry_module_from_main(&main)
            .unwrap_or_else(|| DEFAULT_ENTRY_MODULE.to_string()),
        Ok(AppManifest { main: None }) => DEFAULT_ENTRY_MODULE.to_string(),
        Err(e) => {
            debug!("sources"; "ignoring malformed {}: {}", manifest_path.display(), e);
            DEFAULT_ENTRY_MODULE.to_string()
        }
    }
}

/// `./main.js` → `main`. Returns `None` for an empty value.
fn entry_module_from_main(main: &str) -> Option<String> {
    let main = main.trim().trim_start_matches("./");
    let main = main
        .strip_suffix(&format!(".{ENTRY_EXT}"))
        .unwrap_or(main);
    (!main.is_empty()).then(|| main.to_string())
}
