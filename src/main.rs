//! assetplan - build-plan configurator for native mobile asset pipelines.

#![allow(dead_code)]

mod cli;
mod config;
mod logger;
mod plan;
mod platform;
mod request;
mod sources;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::ProjectConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.command.target().verbose);

    let config = ProjectConfig::load(cli.config.as_deref())?;
    debug!("config"; "project root: {}", config.root.display());

    match &cli.command {
        Commands::Plan {
            target,
            pretty,
            output,
        } => cli::plan::run_plan(&config, target, *pretty, output.as_deref()),
        Commands::Check { target } => cli::check::run_check(&config, target),
    }
}
