//! Configuration section definitions.
//!
//! Each module corresponds to a section in `assetplan.toml`:
//!
//! | Module    | TOML Section | Purpose                              |
//! |-----------|--------------|--------------------------------------|
//! | `project` | `[project]`  | App and native resource paths        |
//! | `build`   | `[build]`    | Default build flags                  |
//! | `assets`  | `[assets]`   | Static asset copy globs              |

mod assets;
mod build;
mod project;

pub use assets::AssetsSection;
pub use build::BuildSection;
pub use project::ProjectSection;
