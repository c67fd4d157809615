//! `[build]` section configuration.
//!
//! Project-wide defaults for the optional build flags. CLI flags override
//! them. The target platform is not read from here; it is given on
//! every invocation.
//!
//! # Example
//!
//! ```toml
//! [build]
//! snapshot = false   # startup snapshot of the vendor chunk
//! minify = false     # production mode
//! report = false     # bundle analysis report under report/
//! ```

use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    pub snapshot: bool,
    pub minify: bool,
    pub report: bool,
}
