//! `[project]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [project]
//! app_path = "app"                      # application sources
//! resources_path = "app/App_Resources"  # native resources (per-platform subdirs)
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::request::{DEFAULT_APP_PATH, DEFAULT_RESOURCES_PATH};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    /// Application sources, relative to the project root.
    pub app_path: PathBuf,
    /// Native resources, relative to the project root.
    pub resources_path: PathBuf,
}

pub struct ProjectSectionFields {
    pub app_path: FieldPath,
    pub resources_path: FieldPath,
}

impl ProjectSection {
    pub const FIELDS: ProjectSectionFields = ProjectSectionFields {
        app_path: FieldPath::new("project.app_path"),
        resources_path: FieldPath::new("project.resources_path"),
    };

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        Self::validate_not_empty(&self.app_path, Self::FIELDS.app_path, DEFAULT_APP_PATH, diag);
        Self::validate_not_empty(
            &self.resources_path,
            Self::FIELDS.resources_path,
            DEFAULT_RESOURCES_PATH,
            diag,
        );
    }

    fn validate_not_empty(
        path: &Path,
        field: FieldPath,
        default: &str,
        diag: &mut ConfigDiagnostics,
    ) {
        if path.as_os_str().is_empty() {
            diag.error_with_hint(
                field,
                "path must not be empty",
                format!("remove {field} to use the default `{default}`"),
            );
        }
    }
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            app_path: DEFAULT_APP_PATH.into(),
            resources_path: DEFAULT_RESOURCES_PATH.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.project.app_path, PathBuf::from("app"));
        assert_eq!(
            config.project.resources_path,
            PathBuf::from("app/App_Resources")
        );
    }

    #[test]
    fn test_custom_paths() {
        let config = test_parse_config(
            r#"
[project]
app_path = "src"
resources_path = "resources"
"#,
        );
        assert_eq!(config.project.app_path, PathBuf::from("src"));
        assert_eq!(config.project.resources_path, PathBuf::from("resources"));
    }

    #[test]
    fn test_empty_path_rejected() {
        let config = test_parse_config("[project]\napp_path = \"\"");
        let mut diag = ConfigDiagnostics::new();
        config.project.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field, ProjectSection::FIELDS.app_path);
    }
}
