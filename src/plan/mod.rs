//! Build plan assembly.
//!
//! # Module Structure
//!
//! ```text
//! plan/
//! ├── entry.rs      # entry module resolution
//! ├── error.rs      # ConfigurationError
//! ├── resolve.rs    # extension order, module dirs, aliases
//! ├── stage.rs      # post-processing stages
//! ├── transform.rs  # per-category transformation rules
//! └── mod.rs        # BuildPlan, build_plan (this file)
//! ```
//!
//! Planning is pure: it reads a [`BuildRequest`] and an [`AppSources`]
//! snapshot and returns a [`BuildPlan`]. Nothing touches the filesystem.
//!
//! # Snapshot stage
//!
//! The snapshot stage needs the plan it is part of. The plan is assembled
//! without it, frozen behind an `Arc`, and the final plan is a copy of that
//! one with the snapshot stage appended:
//!
//! ```text
//! base = plan(request)          # unconditional + report stages
//! snapshot = Snapshot(Arc(base))
//! final = base + [snapshot]
//! ```

mod entry;
mod error;
pub mod resolve;
pub mod stage;
pub mod transform;

pub use error::ConfigurationError;
pub use resolve::Alias;
pub use stage::{PostStage, ReportStage, SnapshotStage};
pub use transform::{InputCategory, Matcher, TransformRule, TransformStep};

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::platform::Platform;
use crate::request::{BuildEnv, BuildRequest};
use crate::sources::AppSources;
use stage::StageContext;

/// Name of the chunk produced from the entry module.
pub const ENTRY_CHUNK: &str = "bundle";

/// Compile-time constant exposed to application code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Define {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    Production,
}

/// How a host runtime module is shimmed inside the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShimPolicy {
    /// No shim; imports are left unresolved.
    Disabled,
    /// Replaced by an empty module.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeShim {
    pub module: String,
    pub policy: ShimPolicy,
}

/// Where and how bundles are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSpec {
    pub dir: PathBuf,
    pub filename: String,
    pub library_target: String,
    pub pathinfo: bool,
}

/// Files qualified for other platforms are dropped from the bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformFilter {
    pub platform: Platform,
    pub platforms: Vec<Platform>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Optimization {
    pub minimize: bool,
    pub keep_comments: bool,
    pub collapse_vars: bool,
    pub sequences: bool,
}

impl Optimization {
    /// The Android static binding generator cannot parse output with
    /// collapsed variables or comma sequences.
    fn new(platform: Platform, minimize: bool) -> Self {
        let android_safe = platform != Platform::Android;
        Self {
            minimize,
            keep_comments: false,
            collapse_vars: android_safe,
            sequences: android_safe,
        }
    }
}

/// Fully resolved, immutable description of one platform build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
    pub platform: Platform,
    pub mode: BuildMode,
    /// Absolute application root; relative inputs resolve from here.
    pub context: PathBuf,
    pub entry_chunk: String,
    pub entry_file: PathBuf,
    pub output: OutputSpec,
    /// Extension suffixes, platform-qualified before generic.
    pub resolution_rules: Vec<String>,
    pub module_dirs: Vec<PathBuf>,
    pub aliases: Vec<Alias>,
    pub follow_symlinks: bool,
    pub transform_rules: Vec<TransformRule>,
    pub watch_ignore: Vec<String>,
    pub defines: Vec<Define>,
    pub node_shims: Vec<NodeShim>,
    pub platform_filter: PlatformFilter,
    /// Bundle `new Worker(...)` scripts as separate chunks.
    pub bundle_workers: bool,
    /// Report watch-mode compilation state to the host tooling.
    pub log_watch_state: bool,
    pub optimization: Optimization,
    pub source_maps: bool,
    pub stats: String,
    pub post_stages: Vec<PostStage>,
}

impl BuildPlan {
    pub fn output_dir(&self) -> &Path {
        &self.output.dir
    }

    /// First transform rule whose matcher accepts `path`.
    pub fn rule_for(&self, path: impl AsRef<Path>) -> Option<&TransformRule> {
        let path = path.as_ref();
        self.transform_rules.iter().find(|r| r.matcher.matches(path))
    }

    /// Post-stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.post_stages.iter().map(PostStage::name).collect()
    }

    pub fn report_stage(&self) -> Option<&ReportStage> {
        self.post_stages.iter().find_map(|s| match s {
            PostStage::GenerateReport(report) => Some(report),
            _ => None,
        })
    }

    pub fn snapshot_stage(&self) -> Option<&SnapshotStage> {
        self.post_stages.iter().find_map(|s| match s {
            PostStage::GenerateSnapshot(snapshot) => Some(snapshot),
            _ => None,
        })
    }
}

/// Resolve `env` into a request and plan it.
///
/// Fails only when the platform is missing or unrecognized; no plan is
/// produced in that case.
pub fn build_plan(env: &BuildEnv, sources: &AppSources) -> Result<BuildPlan, ConfigurationError> {
    let request = BuildRequest::from_env(env)?;
    Ok(plan_for(&request, sources))
}

/// Plan an already validated request.
pub fn plan_for(request: &BuildRequest, sources: &AppSources) -> BuildPlan {
    let base = assemble(request, sources);

    if !request.flags().snapshot {
        return base;
    }

    let base = Arc::new(base);
    let snapshot = SnapshotStage::new(request.project_root(), Arc::clone(&base));
    let post_stages = base
        .post_stages
        .iter()
        .cloned()
        .chain(std::iter::once(PostStage::GenerateSnapshot(snapshot)))
        .collect();

    BuildPlan {
        post_stages,
        ..BuildPlan::clone(&base)
    }
}

/// Everything except the snapshot stage.
fn assemble(request: &BuildRequest, sources: &AppSources) -> BuildPlan {
    let platform = request.platform();
    let flags = request.flags();
    let project_root = request.project_root();
    let app_root = request.app_root();
    let resources_root = request.resources_root();
    let output_dir = project_root.join(platform.output_path(project_root));
    let node_modules = project_root.join("node_modules");

    let unconditional = stage::unconditional_stages(&StageContext {
        platform,
        project_root,
        app_root: &app_root,
        resources_root: &resources_root,
        output_dir: &output_dir,
        static_assets: request.static_assets(),
    });
    let report = flags
        .report
        .then(|| PostStage::GenerateReport(ReportStage::new(project_root)));
    let post_stages = unconditional.into_iter().chain(report).collect();

    BuildPlan {
        platform,
        mode: if flags.minify {
            BuildMode::Production
        } else {
            BuildMode::Development
        },
        entry_chunk: ENTRY_CHUNK.into(),
        entry_file: entry::resolve_entry(&app_root, platform, sources),
        output: OutputSpec {
            dir: output_dir,
            filename: "[name].js".into(),
            library_target: "commonjs2".into(),
            pathinfo: false,
        },
        resolution_rules: resolve::resolution_rules(platform),
        module_dirs: resolve::module_dirs(project_root),
        aliases: resolve::aliases(&app_root),
        follow_symlinks: false,
        transform_rules: transform::transform_rules(&node_modules),
        watch_ignore: vec![resources_root.display().to_string(), "**/.*".into()],
        defines: vec![Define {
            name: "global.TNS_WEBPACK".into(),
            value: "true".into(),
        }],
        node_shims: node_shims(),
        platform_filter: PlatformFilter {
            platform,
            platforms: Platform::ALL.to_vec(),
        },
        bundle_workers: true,
        log_watch_state: true,
        optimization: Optimization::new(platform, flags.minify),
        source_maps: false,
        stats: "errors-only".into(),
        post_stages,
        context: app_root,
    }
}

/// Host modules that conflict with the mobile runtime.
fn node_shims() -> Vec<NodeShim> {
    [
        ("http", ShimPolicy::Disabled),
        ("timers", ShimPolicy::Disabled),
        ("setImmediate", ShimPolicy::Disabled),
        ("fs", ShimPolicy::Empty),
    ]
    .into_iter()
    .map(|(module, policy)| NodeShim {
        module: module.into(),
        policy,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "/work/hello";

    fn env(platform: &str) -> BuildEnv {
        BuildEnv::new(ROOT).with_platform(platform)
    }

    fn plan(env: &BuildEnv) -> BuildPlan {
        build_plan(env, &AppSources::new("app").with_file("app.js")).unwrap()
    }

    #[test]
    fn test_missing_platform_produces_no_plan() {
        let result = build_plan(&BuildEnv::new(ROOT), &AppSources::default());
        assert_eq!(result.unwrap_err(), ConfigurationError::MissingPlatform);
    }

    #[test]
    fn test_unknown_platform_produces_no_plan() {
        let result = build_plan(&env("blackberry"), &AppSources::default());
        assert!(matches!(result, Err(ConfigurationError::UnknownPlatform(_))));
    }

    #[test]
    fn test_primary_default_scenario() {
        let plan = plan(&env("android"));
        assert_eq!(plan.post_stages.len(), 6);
        assert!(plan.report_stage().is_none());
        assert!(plan.snapshot_stage().is_none());
        assert_eq!(plan.entry_file, PathBuf::from("/work/hello/app/app.js"));
        assert_eq!(plan.mode, BuildMode::Development);
    }

    #[test]
    fn test_primary_qualified_entry() {
        let sources = AppSources::new("app")
            .with_file("app.js")
            .with_file("app.android.js");
        let plan = build_plan(&env("android"), &sources).unwrap();
        assert!(plan.entry_file.ends_with("app.android.js"));
    }

    #[test]
    fn test_secondary_with_report_scenario() {
        let plan = plan(&BuildEnv {
            report: Some(true),
            ..env("ios")
        });
        assert_eq!(plan.post_stages.len(), 7);
        assert_eq!(plan.post_stages.iter().filter(|s| s.is_report()).count(), 1);
        assert!(plan.post_stages.last().is_some_and(PostStage::is_report));

        let report = plan.report_stage().unwrap();
        assert_eq!(report.report_file, PathBuf::from("/work/hello/report/report.html"));
        assert_eq!(report.stats_file, PathBuf::from("/work/hello/report/stats.json"));
    }

    #[test]
    fn test_clear_output_first_and_unique() {
        for platform in ["android", "ios"] {
            let plan = plan(&BuildEnv {
                report: Some(true),
                snapshot: Some(true),
                ..env(platform)
            });
            let names = plan.stage_names();
            assert_eq!(names[0], "clear-output-directory");
            assert_eq!(
                names.iter().filter(|n| **n == "clear-output-directory").count(),
                1
            );
        }
    }

    #[test]
    fn test_resolution_rules_qualified_first() {
        let plan = plan(&env("ios"));
        for pair in plan.resolution_rules.chunks(2) {
            assert!(pair[0].starts_with(".ios."));
            assert_eq!(pair[0].trim_start_matches(".ios"), pair[1]);
        }
    }

    #[test]
    fn test_snapshot_references_assembled_plan() {
        let plan = plan(&BuildEnv {
            snapshot: Some(true),
            report: Some(true),
            ..env("android")
        });

        assert_eq!(plan.post_stages.iter().filter(|s| s.is_snapshot()).count(), 1);
        assert!(plan.post_stages.last().is_some_and(PostStage::is_snapshot));

        let snapshot = plan.snapshot_stage().unwrap();
        assert_eq!(snapshot.chunk, "vendor");
        assert_eq!(snapshot.require_modules, ["tns-core-modules/bundle-entry-points"]);

        // Referenced plan holds every stage except the snapshot itself
        let inner = &snapshot.plan;
        assert_eq!(inner.post_stages.len(), plan.post_stages.len() - 1);
        assert!(inner.snapshot_stage().is_none());
        assert!(inner.report_stage().is_some());
        assert_eq!(inner.entry_file, plan.entry_file);
    }

    #[test]
    fn test_snapshot_plan_serializes_without_recursion() {
        let plan = plan(&BuildEnv {
            snapshot: Some(true),
            ..env("ios")
        });
        let json = serde_json::to_value(&plan).unwrap();

        let stages = json["post_stages"].as_array().unwrap();
        let snapshot = stages.last().unwrap();
        assert_eq!(snapshot["stage"], "generate-snapshot");

        let inner_stages = snapshot["plan"]["post_stages"].as_array().unwrap();
        assert_eq!(inner_stages.len(), 6);
        assert!(inner_stages.iter().all(|s| s["stage"] != "generate-snapshot"));
    }

    #[test]
    fn test_output_dir_per_platform() {
        let android = plan(&env("android"));
        assert_eq!(
            android.output_dir(),
            Path::new("/work/hello/platforms/android/app/src/main/assets/app")
        );

        let ios = plan(&env("ios"));
        assert_eq!(ios.output_dir(), Path::new("/work/hello/platforms/ios/hello/app"));
    }

    #[test]
    fn test_custom_paths() {
        let plan = plan(&BuildEnv {
            app_path: Some("src".into()),
            resources_path: Some("src/res".into()),
            ..env("android")
        });
        assert_eq!(plan.context, PathBuf::from("/work/hello/src"));
        assert_eq!(plan.aliases[0].target, PathBuf::from("/work/hello/src"));
        assert_eq!(plan.watch_ignore[0], "/work/hello/src/res");

        let PostStage::CopyStaticAssets { ignore, .. } = &plan.post_stages[2] else {
            panic!("expected copy-static-assets");
        };
        assert_eq!(ignore, &["res/**"]);
    }

    #[test]
    fn test_rule_for() {
        let plan = plan(&env("android"));
        let category = |p: &str| plan.rule_for(p).map(|r| r.category);

        assert_eq!(category("main.scss"), Some(InputCategory::PreprocessedStylesheet));
        assert_eq!(category("app.android.css"), Some(InputCategory::Stylesheet));
        assert_eq!(category("main-page.xml"), Some(InputCategory::Markup));
        assert_eq!(category("components/Home.vue"), Some(InputCategory::Component));
        assert_eq!(category("app.js"), None);
    }

    #[test]
    fn test_minify_android_is_conservative() {
        let android = plan(&BuildEnv {
            minify: Some(true),
            ..env("android")
        });
        assert_eq!(android.mode, BuildMode::Production);
        assert!(android.optimization.minimize);
        assert!(!android.optimization.collapse_vars);
        assert!(!android.optimization.sequences);

        let ios = plan(&BuildEnv {
            minify: Some(true),
            ..env("ios")
        });
        assert!(ios.optimization.collapse_vars);
        assert!(ios.optimization.sequences);
    }

    #[test]
    fn test_flags_do_not_change_core_rules() {
        let plain = plan(&env("android"));
        let flagged = plan(&BuildEnv {
            minify: Some(true),
            report: Some(true),
            snapshot: Some(true),
            ..env("android")
        });
        assert_eq!(plain.resolution_rules, flagged.resolution_rules);
        assert_eq!(plain.transform_rules, flagged.transform_rules);
        assert_eq!(plain.entry_file, flagged.entry_file);
    }

    #[test]
    fn test_ambient_settings() {
        let plan = plan(&env("ios"));
        assert_eq!(plan.entry_chunk, "bundle");
        assert_eq!(plan.output.filename, "[name].js");
        assert_eq!(plan.output.library_target, "commonjs2");
        assert!(!plan.follow_symlinks);
        assert_eq!(plan.watch_ignore[1], "**/.*");
        assert_eq!(plan.defines[0].name, "global.TNS_WEBPACK");
        assert_eq!(plan.platform_filter.platforms, Platform::ALL);
        assert!(plan.bundle_workers);
        assert!(plan.log_watch_state);
        assert_eq!(plan.post_stages.len(), 6);

        let fs = plan.node_shims.iter().find(|s| s.module == "fs").unwrap();
        assert_eq!(fs.policy, ShimPolicy::Empty);
    }
}
