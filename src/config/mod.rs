//! Project configuration management for `assetplan.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [project], [build], [assets]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # config file discovery
//! └── mod.rs         # ProjectConfig (this file)
//! ```
//!
//! The file is optional. Precedence is built-in defaults, then the file,
//! then CLI flags. The result is turned into a [`BuildEnv`] once; nothing
//! is stored globally.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{AssetsSection, BuildSection, ProjectSection};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::utils::path::{normalize_lexical, resolve_path};
use crate::{cli::TargetArgs, debug, log};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file searched for when `--config` is not given.
pub const CONFIG_FILE: &str = "assetplan.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing assetplan.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root: parent of the config file, or the working directory
    #[serde(skip)]
    pub root: PathBuf,

    /// App and resource paths
    pub project: ProjectSection,

    /// Default build flags
    pub build: BuildSection,

    /// Static asset globs
    pub assets: AssetsSection,
}

impl ProjectConfig {
    /// Load configuration for the current working directory.
    ///
    /// An explicit `config` path must exist. Without one, `assetplan.toml`
    /// is searched upward and its absence just means defaults.
    pub fn load(config: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        Self::load_from(config, &cwd)
    }

    fn load_from(config: Option<&Path>, cwd: &Path) -> Result<Self> {
        let found = match config {
            Some(explicit) => {
                let path = resolve_path(cwd, explicit);
                if !path.is_file() {
                    return Err(ConfigError::Io(
                        path,
                        std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found"),
                    )
                    .into());
                }
                Some(path)
            }
            None => find_config_file(Path::new(CONFIG_FILE), cwd),
        };

        let mut config = match &found {
            Some(path) => Self::from_path(path)?,
            None => {
                debug!("config"; "no {} found, using defaults", CONFIG_FILE);
                Self::default()
            }
        };

        config.root = found
            .as_deref()
            .and_then(Path::parent)
            .map_or_else(|| normalize_lexical(cwd), Path::to_path_buf);
        config.config_path = found;

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    #[cfg(test)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Collect every validation problem and fail once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.project.validate(&mut diag);
        self.assets.validate(&mut diag);

        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Merge CLI flags over this config into raw build flags.
    pub fn build_env(&self, args: &TargetArgs) -> crate::request::BuildEnv {
        let mut project = self.project.clone();
        let mut build = self.build;

        Self::update_option(&mut project.app_path, args.app_path.as_ref());
        Self::update_option(&mut project.resources_path, args.resources_path.as_ref());
        Self::update_option(&mut build.snapshot, args.snapshot.as_ref());
        Self::update_option(&mut build.minify, args.minify.as_ref());
        Self::update_option(&mut build.report, args.report.as_ref());

        crate::request::BuildEnv {
            project_root: self.root.clone(),
            platform: args.platform.clone(),
            android: args.android,
            ios: args.ios,
            app_path: Some(project.app_path),
            resources_path: Some(project.resources_path),
            snapshot: Some(build.snapshot),
            minify: Some(build.minify),
            report: Some(build.report),
            static_assets: Some(self.assets.copy.clone()),
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> ProjectConfig {
    let (parsed, ignored) = ProjectConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
