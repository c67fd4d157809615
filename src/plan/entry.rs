//! Entry module resolution.

use std::path::{Path, PathBuf};

use crate::platform::Platform;
use crate::sources::{AppSources, ENTRY_EXT};

/// Absolute entry file for `platform`.
///
/// Prefers `<entry>.<platform>.js`, falling back to `<entry>.js` whether or
/// not it exists. Existence of the fallback is reported by the CLI.
pub fn resolve_entry(app_root: &Path, platform: Platform, sources: &AppSources) -> PathBuf {
    let module = sources.entry_module();
    let qualified = PathBuf::from(platform.qualify(module, ENTRY_EXT));

    if sources.contains(&qualified) {
        app_root.join(qualified)
    } else {
        app_root.join(format!("{module}.{ENTRY_EXT}"))
    }
}
