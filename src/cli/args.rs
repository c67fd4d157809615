//! Command-line interface definitions.

use clap::{ArgGroup, ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Asset-pipeline planner for native mobile bundles
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: search upward for assetplan.toml)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write the build plan as JSON
    #[command(visible_alias = "p")]
    Plan {
        #[command(flatten)]
        target: TargetArgs,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Write the plan to a file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Summarize the build plan and report missing inputs
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Target platform, paths and build flags shared by all subcommands.
///
/// Platform selection is optional here so that a missing platform is
/// reported by the planner itself.
#[derive(clap::Args, Debug, Clone, Default)]
#[command(group(ArgGroup::new("target_platform").args(["platform", "android", "ios"])))]
pub struct TargetArgs {
    /// Target platform (android, ios)
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// Shorthand for --platform android
    #[arg(long)]
    pub android: bool,

    /// Shorthand for --platform ios
    #[arg(long)]
    pub ios: bool,

    /// Application sources (relative to project root)
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub app_path: Option<PathBuf>,

    /// Native resources directory (relative to project root)
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub resources_path: Option<PathBuf>,

    /// Append a startup snapshot stage
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub snapshot: Option<bool>,

    /// Production mode with minification
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Append a bundle analysis report stage
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub report: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Commands {
    pub const fn target(&self) -> &TargetArgs {
        match self {
            Self::Plan { target, .. } | Self::Check { target } => target,
        }
    }
}
