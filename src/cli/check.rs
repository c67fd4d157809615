//! `check` command: summarize the plan and report missing inputs.
//!
//! Missing inputs are warnings, not errors. The bundler engine decides
//! whether it can run without them.

use anyhow::Result;
use std::path::Path;

use crate::config::ProjectConfig;
use crate::log;
use crate::logger::{status_ok, status_warn};
use crate::plan::BuildPlan;
use crate::request::BuildRequest;
use crate::sources::AppSources;

use super::TargetArgs;
use super::plan::{Planned, plan_project};

/// Outcome of one input check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub ok: bool,
    pub message: String,
}

impl Finding {
    fn new(ok: bool, message: String) -> Self {
        Self { ok, message }
    }
}

pub fn run_check(config: &ProjectConfig, target: &TargetArgs) -> Result<()> {
    let Planned {
        request,
        sources,
        plan,
    } = plan_project(config, target)?;

    print_summary(&plan);

    let findings = inspect_inputs(&request, &sources, &plan);
    for finding in &findings {
        if finding.ok {
            status_ok(&finding.message);
        } else {
            status_warn(&finding.message);
        }
    }

    let warnings = findings.iter().filter(|f| !f.ok).count();
    match warnings {
        0 => log!("check"; "all inputs present"),
        1 => log!("check"; "1 warning"),
        n => log!("check"; "{} warnings", n),
    }

    Ok(())
}

fn print_summary(plan: &BuildPlan) {
    log!("plan"; "platform: {} ({:?} mode)", plan.platform, plan.mode);
    log!("plan"; "entry: {}", plan.entry_file.display());
    log!("plan"; "output: {}", plan.output_dir().display());
    log!("plan"; "stages: {}", plan.stage_names().join(" → "));
}

/// Check that the inputs the plan refers to exist on disk.
pub fn inspect_inputs(
    request: &BuildRequest,
    sources: &AppSources,
    plan: &BuildPlan,
) -> Vec<Finding> {
    let app_root = request.app_root();
    let platform_resources = request
        .resources_root()
        .join(request.platform().resources_dir());

    let entry_rel = plan
        .entry_file
        .strip_prefix(&app_root)
        .map_or_else(|_| plan.entry_file.clone(), Path::to_path_buf);

    vec![
        dir_finding("app root", &app_root),
        Finding::new(
            sources.contains(&entry_rel),
            format!("entry module {}", entry_rel.display()),
        ),
        dir_finding("native resources", &platform_resources),
    ]
}

fn dir_finding(label: &str, dir: &Path) -> Finding {
    let ok = dir.is_dir();
    let suffix = if ok { "" } else { " (missing)" };
    Finding::new(ok, format!("{label} {}{suffix}", dir.display()))
}
