//! Post-processing stages.
//!
//! Six stages always run, in a fixed order. Report and snapshot stages are
//! appended after them when their flags are set.

use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::BuildPlan;
use crate::platform::Platform;

/// Directory (under the project root) that receives analysis reports.
pub const REPORT_DIR: &str = "report";

/// Chunk the startup snapshot is taken from.
pub const SNAPSHOT_CHUNK: &str = "vendor";

/// Modules required into the snapshot.
pub const SNAPSHOT_REQUIRE_MODULES: [&str; 1] = ["tns-core-modules/bundle-entry-points"];

/// A unit of post-processing work executed by the bundler engine.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "stage", rename_all = "kebab-case")]
pub enum PostStage {
    /// Remove everything matching `patterns` before writing.
    ClearOutputDirectory { patterns: Vec<String> },
    /// Copy the platform's native resources into the output tree.
    CopyNativeResources {
        from: PathBuf,
        to: PathBuf,
        context: PathBuf,
    },
    /// Copy fonts and images matched by `globs` (relative to the app root).
    CopyStaticAssets {
        globs: Vec<String>,
        ignore: Vec<String>,
    },
    /// Write the extracted CSS to `filename`.
    ExtractStylesheet { filename: String },
    /// Run the CSS optimizer over the extracted stylesheet.
    OptimizeStylesheet {
        processor: String,
        discard_comments: bool,
        normalize_urls: bool,
    },
    /// Emit the starter script that loads `modules`.
    EmitBundleStarter { modules: Vec<String> },
    /// Static bundle analysis report.
    GenerateReport(ReportStage),
    /// Startup snapshot of the vendor chunk.
    GenerateSnapshot(SnapshotStage),
}

impl PostStage {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ClearOutputDirectory { .. } => "clear-output-directory",
            Self::CopyNativeResources { .. } => "copy-native-resources",
            Self::CopyStaticAssets { .. } => "copy-static-assets",
            Self::ExtractStylesheet { .. } => "extract-stylesheet",
            Self::OptimizeStylesheet { .. } => "optimize-stylesheet",
            Self::EmitBundleStarter { .. } => "emit-bundle-starter",
            Self::GenerateReport(_) => "generate-report",
            Self::GenerateSnapshot(_) => "generate-snapshot",
        }
    }

    pub const fn is_report(&self) -> bool {
        matches!(self, Self::GenerateReport(_))
    }

    pub const fn is_snapshot(&self) -> bool {
        matches!(self, Self::GenerateSnapshot(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportStage {
    pub report_file: PathBuf,
    pub stats_file: PathBuf,
    /// Write static HTML instead of serving it.
    pub static_html: bool,
    pub open_viewer: bool,
}

impl ReportStage {
    pub fn new(project_root: &Path) -> Self {
        let dir = project_root.join(REPORT_DIR);
        Self {
            report_file: dir.join("report.html"),
            stats_file: dir.join("stats.json"),
            static_html: true,
            open_viewer: false,
        }
    }
}

/// Snapshot stage with a read-only view of the plan it belongs to.
///
/// The referenced plan is everything assembled before this stage, so it
/// never contains a snapshot stage itself.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotStage {
    pub chunk: String,
    pub require_modules: Vec<String>,
    pub project_root: PathBuf,
    #[serde(serialize_with = "serialize_plan_ref")]
    pub plan: Arc<BuildPlan>,
}

impl SnapshotStage {
    pub fn new(project_root: &Path, plan: Arc<BuildPlan>) -> Self {
        Self {
            chunk: SNAPSHOT_CHUNK.into(),
            require_modules: SNAPSHOT_REQUIRE_MODULES.iter().map(|m| (*m).into()).collect(),
            project_root: project_root.to_path_buf(),
            plan,
        }
    }
}

fn serialize_plan_ref<S: Serializer>(plan: &Arc<BuildPlan>, serializer: S) -> Result<S::Ok, S::Error> {
    plan.as_ref().serialize(serializer)
}

/// Paths the unconditional stages operate on.
pub struct StageContext<'a> {
    pub platform: Platform,
    pub project_root: &'a Path,
    pub app_root: &'a Path,
    pub resources_root: &'a Path,
    pub output_dir: &'a Path,
    pub static_assets: &'a [String],
}

/// The six stages every plan carries, clear-output first.
pub fn unconditional_stages(ctx: &StageContext<'_>) -> Vec<PostStage> {
    let platform_dir = ctx.platform.resources_dir();
    let resources_rel = crate::utils::path::relative_path(ctx.app_root, ctx.resources_root);

    vec![
        PostStage::ClearOutputDirectory {
            patterns: vec![format!("{}/**/*", ctx.output_dir.display())],
        },
        PostStage::CopyNativeResources {
            from: ctx.resources_root.join(platform_dir),
            to: ctx.output_dir.join("App_Resources").join(platform_dir),
            context: ctx.project_root.to_path_buf(),
        },
        PostStage::CopyStaticAssets {
            globs: ctx.static_assets.to_vec(),
            ignore: vec![format!("{}/**", resources_rel.display())],
        },
        PostStage::ExtractStylesheet {
            filename: ctx.platform.qualify("app", "css"),
        },
        PostStage::OptimizeStylesheet {
            processor: "cssnano".into(),
            discard_comments: true,
            normalize_urls: false,
        },
        PostStage::EmitBundleStarter {
            modules: vec!["./bundle".into()],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stages(platform: Platform, resources: &str) -> Vec<PostStage> {
        let assets = vec!["fonts/**".to_string()];
        unconditional_stages(&StageContext {
            platform,
            project_root: Path::new("/p"),
            app_root: Path::new("/p/app"),
            resources_root: Path::new(resources),
            output_dir: Path::new("/p/out"),
            static_assets: &assets,
        })
    }

    #[test]
    fn test_order() {
        let names: Vec<_> = stages(Platform::Android, "/p/app/App_Resources")
            .iter()
            .map(PostStage::name)
            .collect();
        assert_eq!(
            names,
            [
                "clear-output-directory",
                "copy-native-resources",
                "copy-static-assets",
                "extract-stylesheet",
                "optimize-stylesheet",
                "emit-bundle-starter",
            ]
        );
    }

    #[test]
    fn test_native_resources_for_platform() {
        let stages = stages(Platform::Ios, "/p/app/App_Resources");
        let PostStage::CopyNativeResources { from, to, .. } = &stages[1] else {
            panic!("expected copy-native-resources");
        };
        assert_eq!(from, Path::new("/p/app/App_Resources/iOS"));
        assert_eq!(to, Path::new("/p/out/App_Resources/iOS"));
    }

    #[test]
    fn test_static_assets_ignore_resources_subtree() {
        let stages = stages(Platform::Android, "/p/app/App_Resources");
        let PostStage::CopyStaticAssets { globs, ignore } = &stages[2] else {
            panic!("expected copy-static-assets");
        };
        assert_eq!(globs, &["fonts/**"]);
        assert_eq!(ignore, &["App_Resources/**"]);
    }

    #[test]
    fn test_static_assets_ignore_outside_app() {
        let stages = stages(Platform::Android, "/p/resources");
        let PostStage::CopyStaticAssets { ignore, .. } = &stages[2] else {
            panic!("expected copy-static-assets");
        };
        assert_eq!(ignore, &["../resources/**"]);
    }

    #[test]
    fn test_extracted_stylesheet_name() {
        let stages = stages(Platform::Android, "/p/app/App_Resources");
        let PostStage::ExtractStylesheet { filename } = &stages[3] else {
            panic!("expected extract-stylesheet");
        };
        assert_eq!(filename, "app.android.css");
    }

    #[test]
    fn test_report_stage_location() {
        let report = ReportStage::new(Path::new("/p"));
        assert_eq!(report.report_file, PathBuf::from("/p/report/report.html"));
        assert_eq!(report.stats_file, PathBuf::from("/p/report/stats.json"));
        assert!(!report.open_viewer);
    }
}
