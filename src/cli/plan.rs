//! `plan` command: write the build plan as JSON.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::ProjectConfig;
use crate::log;
use crate::plan::{self, BuildPlan};
use crate::request::BuildRequest;
use crate::sources::AppSources;

use super::TargetArgs;

/// A plan together with the source snapshot it was built from.
pub struct Planned {
    pub request: BuildRequest,
    pub sources: AppSources,
    pub plan: BuildPlan,
}

/// Resolve the request, snapshot the app sources, and plan.
///
/// The platform is validated before the app directory is read, so a bad
/// platform fails without any I/O.
pub fn plan_project(config: &ProjectConfig, target: &TargetArgs) -> Result<Planned> {
    let env = config.build_env(target);
    let request = BuildRequest::from_env(&env)?;

    log!("plan"; "bundling application for {}", request.platform());

    let sources = AppSources::scan(&request.app_root());
    let plan = plan::plan_for(&request, &sources);

    Ok(Planned {
        request,
        sources,
        plan,
    })
}

/// Serialize a plan.
pub fn render_plan(plan: &BuildPlan, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(plan)?
    } else {
        serde_json::to_string(plan)?
    };
    Ok(json)
}

pub fn run_plan(
    config: &ProjectConfig,
    target: &TargetArgs,
    pretty: bool,
    output: Option<&Path>,
) -> Result<()> {
    let Planned { plan, .. } = plan_project(config, target)?;
    let formatted = render_plan(&plan, pretty)?;

    match output {
        Some(path) => {
            fs::write(path, format!("{formatted}\n"))
                .with_context(|| format!("failed to write plan to {}", path.display()))?;
            log!("plan"; "wrote {} stages to {}", plan.post_stages.len(), path.display());
        }
        None => println!("{formatted}"),
    }

    Ok(())
}
