//! Target platform definitions.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::plan::ConfigurationError;

/// Native mobile platform a plan is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Primary platform.
    Android,
    /// Secondary platform.
    Ios,
}

impl Platform {
    /// Every supported platform, primary first.
    pub const ALL: [Self; 2] = [Self::Android, Self::Ios];

    /// Lowercase qualifier used in file suffixes (`app.android.css`).
    pub const fn qualifier(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }

    /// Directory holding this platform's native resources.
    pub const fn resources_dir(self) -> &'static str {
        match self {
            Self::Android => "Android",
            Self::Ios => "iOS",
        }
    }

    /// Bundle output location inside the native project, relative to the project root.
    ///
    /// The iOS project is named after the project directory, stripped down
    /// to ASCII alphanumerics.
    pub fn output_path(self, project_root: &Path) -> PathBuf {
        match self {
            Self::Android => PathBuf::from("platforms/android/app/src/main/assets/app"),
            Self::Ios => {
                let name = project_root
                    .file_name()
                    .map(|n| sanitize_project_name(&n.to_string_lossy()))
                    .unwrap_or_default();
                Path::new("platforms/ios").join(name).join("app")
            }
        }
    }

    /// `{stem}.{qualifier}.{ext}`, e.g. `app.android.css`.
    pub fn qualify(self, stem: &str, ext: &str) -> String {
        format!("{stem}.{}.{ext}", self.qualifier())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualifier())
    }
}

impl FromStr for Platform {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            _ => Err(ConfigurationError::UnknownPlatform(s.to_string())),
        }
    }
}

/// Keep only ASCII alphanumerics (`my-app 2` → `myapp2`).
fn sanitize_project_name(name: &str) -> String {
    name.chars().filter(char::is_ascii_alphanumeric).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("android".parse::<Platform>().unwrap(), Platform::Android);
        assert_eq!("iOS".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!(" IOS ".parse::<Platform>().unwrap(), Platform::Ios);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "windows".parse::<Platform>().unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownPlatform(ref s) if s == "windows"));
    }

    #[test]
    fn test_qualify() {
        assert_eq!(Platform::Android.qualify("app", "css"), "app.android.css");
        assert_eq!(Platform::Ios.qualify("app", "js"), "app.ios.js");
    }

    #[test]
    fn test_output_path_android() {
        let path = Platform::Android.output_path(Path::new("/work/hello"));
        assert_eq!(path, PathBuf::from("platforms/android/app/src/main/assets/app"));
    }

    #[test]
    fn test_output_path_ios_sanitized() {
        let path = Platform::Ios.output_path(Path::new("/work/my-app_2"));
        assert_eq!(path, PathBuf::from("platforms/ios/myapp2/app"));
    }

    #[test]
    fn test_resources_dir() {
        assert_eq!(Platform::Android.resources_dir(), "Android");
        assert_eq!(Platform::Ios.resources_dir(), "iOS");
    }
}
