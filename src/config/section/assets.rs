//! `[assets]` section configuration.
//!
//! Globs (relative to the app root) for static files copied next to the
//! bundle. The native resources subtree is always excluded.
//!
//! # Example
//!
//! ```toml
//! [assets]
//! copy = ["fonts/**", "**/*.jpg", "**/*.png", "**/*.svg"]
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::request::DEFAULT_STATIC_ASSETS;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssetsSection {
    pub copy: Vec<String>,
}

pub struct AssetsSectionFields {
    pub copy: FieldPath,
}

impl AssetsSection {
    pub const FIELDS: AssetsSectionFields = AssetsSectionFields {
        copy: FieldPath::new("assets.copy"),
    };

    /// Globs must be non-empty and relative.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let total = self.copy.len();
        for (idx, glob) in self.copy.iter().enumerate() {
            // Only show index if there are multiple entries
            let prefix = if total > 1 {
                format!("[{idx}] ")
            } else {
                String::new()
            };

            if glob.trim().is_empty() {
                diag.error(Self::FIELDS.copy, format!("{prefix}empty glob"));
            } else if Path::new(glob).has_root() {
                diag.error_with_hint(
                    Self::FIELDS.copy,
                    format!("{prefix}glob '{glob}': absolute paths not allowed"),
                    "globs are matched relative to the app root",
                );
            }
        }
    }
}

impl Default for AssetsSection {
    fn default() -> Self {
        Self {
            copy: DEFAULT_STATIC_ASSETS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}
