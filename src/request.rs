//! Build request assembly.
//!
//! External flags arrive as a [`BuildEnv`] (CLI merged over the config file).
//! [`BuildRequest::from_env`] validates them once and produces the immutable
//! request that planning consumes.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::plan::ConfigurationError;
use crate::platform::Platform;
use crate::utils::path::{expand_tilde, resolve_path};

/// Application source directory, relative to the project root.
pub const DEFAULT_APP_PATH: &str = "app";

/// Native resources directory, relative to the project root.
pub const DEFAULT_RESOURCES_PATH: &str = "app/App_Resources";

/// Static asset globs copied next to the bundle.
pub const DEFAULT_STATIC_ASSETS: [&str; 3] = ["fonts/**", "**/*.jpg", "**/*.png"];

/// Raw build flags, before validation.
///
/// Every field is optional except the project root. Unset values fall back
/// to the defaults above when the request is built.
#[derive(Debug, Clone, Default)]
pub struct BuildEnv {
    pub project_root: PathBuf,
    /// Explicit platform name (`android` or `ios`).
    pub platform: Option<String>,
    /// Shorthand for `platform = "android"`.
    pub android: bool,
    /// Shorthand for `platform = "ios"`.
    pub ios: bool,
    pub app_path: Option<PathBuf>,
    pub resources_path: Option<PathBuf>,
    pub snapshot: Option<bool>,
    pub minify: Option<bool>,
    pub report: Option<bool>,
    pub static_assets: Option<Vec<String>>,
}

impl BuildEnv {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Self::default()
        }
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Resolve the target platform.
    ///
    /// An explicit name wins over the shorthands. `android` is checked before
    /// `ios`. A blank name counts as absent.
    fn resolve_platform(&self) -> Result<Platform, ConfigurationError> {
        if let Some(name) = self.platform.as_deref().filter(|s| !s.trim().is_empty()) {
            return name.parse();
        }
        match (self.android, self.ios) {
            (true, _) => Ok(Platform::Android),
            (false, true) => Ok(Platform::Ios),
            (false, false) => Err(ConfigurationError::MissingPlatform),
        }
    }
}

/// Optional build features. All default to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildFlags {
    /// Append a startup snapshot stage.
    pub snapshot: bool,
    /// Production mode with minification.
    pub minify: bool,
    /// Append a bundle analysis report stage.
    pub report: bool,
}

/// Validated, immutable input to planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    platform: Platform,
    project_root: PathBuf,
    app_path: PathBuf,
    resources_path: PathBuf,
    flags: BuildFlags,
    static_assets: Vec<String>,
}

impl BuildRequest {
    /// Build a request from raw flags. Fails only when the platform is
    /// missing or unrecognized.
    pub fn from_env(env: &BuildEnv) -> Result<Self, ConfigurationError> {
        let platform = env.resolve_platform()?;

        let app_path = env
            .app_path
            .as_deref()
            .map_or_else(|| PathBuf::from(DEFAULT_APP_PATH), expand_tilde);
        let resources_path = env
            .resources_path
            .as_deref()
            .map_or_else(|| PathBuf::from(DEFAULT_RESOURCES_PATH), expand_tilde);

        let static_assets = env.static_assets.clone().unwrap_or_else(|| {
            DEFAULT_STATIC_ASSETS.iter().map(|s| (*s).to_string()).collect()
        });

        Ok(Self {
            platform,
            project_root: env.project_root.clone(),
            app_path,
            resources_path,
            flags: BuildFlags {
                snapshot: env.snapshot.unwrap_or(false),
                minify: env.minify.unwrap_or(false),
                report: env.report.unwrap_or(false),
            },
            static_assets,
        })
    }

    pub const fn platform(&self) -> Platform {
        self.platform
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn app_path(&self) -> &Path {
        &self.app_path
    }

    pub fn resources_path(&self) -> &Path {
        &self.resources_path
    }

    pub const fn flags(&self) -> BuildFlags {
        self.flags
    }

    pub fn static_assets(&self) -> &[String] {
        &self.static_assets
    }

    /// Absolute application root.
    pub fn app_root(&self) -> PathBuf {
        resolve_path(&self.project_root, &self.app_path)
    }

    /// Absolute native resources root.
    pub fn resources_root(&self) -> PathBuf {
        resolve_path(&self.project_root, &self.resources_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_platform() {
        let err = BuildRequest::from_env(&BuildEnv::new("/p")).unwrap_err();
        assert_eq!(err, ConfigurationError::MissingPlatform);
    }

    #[test]
    fn test_blank_platform_is_missing() {
        let env = BuildEnv::new("/p").with_platform("  ");
        let err = BuildRequest::from_env(&env).unwrap_err();
        assert_eq!(err, ConfigurationError::MissingPlatform);
    }

    #[test]
    fn test_unknown_platform() {
        let env = BuildEnv::new("/p").with_platform("symbian");
        let err = BuildRequest::from_env(&env).unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownPlatform("symbian".into()));
    }

    #[test]
    fn test_shorthands() {
        let env = BuildEnv {
            ios: true,
            ..BuildEnv::new("/p")
        };
        assert_eq!(BuildRequest::from_env(&env).unwrap().platform(), Platform::Ios);

        let env = BuildEnv {
            android: true,
            ios: true,
            ..BuildEnv::new("/p")
        };
        assert_eq!(
            BuildRequest::from_env(&env).unwrap().platform(),
            Platform::Android
        );
    }

    #[test]
    fn test_explicit_name_wins() {
        let env = BuildEnv {
            android: true,
            ..BuildEnv::new("/p").with_platform("ios")
        };
        assert_eq!(BuildRequest::from_env(&env).unwrap().platform(), Platform::Ios);
    }

    #[test]
    fn test_defaults() {
        let request = BuildRequest::from_env(&BuildEnv::new("/p").with_platform("android")).unwrap();
        assert_eq!(request.app_path(), Path::new("app"));
        assert_eq!(request.resources_path(), Path::new("app/App_Resources"));
        assert_eq!(request.flags(), BuildFlags::default());
        assert_eq!(request.static_assets(), ["fonts/**", "**/*.jpg", "**/*.png"]);
        assert_eq!(request.app_root(), PathBuf::from("/p/app"));
        assert_eq!(request.resources_root(), PathBuf::from("/p/app/App_Resources"));
    }

    #[test]
    fn test_tilde_paths_expanded() {
        let home = PathBuf::from(shellexpand::tilde("~").into_owned());
        let env = BuildEnv {
            app_path: Some("~/mobile".into()),
            resources_path: Some("~/mobile/res".into()),
            ..BuildEnv::new("/p").with_platform("android")
        };
        let request = BuildRequest::from_env(&env).unwrap();

        let app_root = request.app_root();
        assert!(app_root.is_absolute());
        assert!(!app_root.to_string_lossy().contains('~'));
        assert_eq!(app_root, home.join("mobile"));
        assert_eq!(request.resources_root(), home.join("mobile/res"));
    }

    #[test]
    fn test_overrides() {
        let env = BuildEnv {
            app_path: Some("src".into()),
            resources_path: Some("res".into()),
            report: Some(true),
            static_assets: Some(vec!["**/*.svg".into()]),
            ..BuildEnv::new("/p").with_platform("ios")
        };
        let request = BuildRequest::from_env(&env).unwrap();
        assert_eq!(request.app_root(), PathBuf::from("/p/src"));
        assert_eq!(request.resources_root(), PathBuf::from("/p/res"));
        assert!(request.flags().report);
        assert!(!request.flags().snapshot);
        assert_eq!(request.static_assets(), ["**/*.svg"]);
    }
}
