//! Command-line interface module.

mod args;
pub mod check;
pub mod plan;

pub use args::{Cli, Commands, TargetArgs};
