//! Lexical path resolution.
//!
//! Planning must not touch the filesystem, so nothing here calls
//! `canonicalize()` or checks existence:
//! - `resolve_path` - join onto a root and fold `.`/`..`
//! - `relative_path` - path from one absolute location to another
//! - `expand_tilde` - `~/x` to `$HOME/x`

use std::path::{Component, Path, PathBuf};

/// Fold `.` and `..` components without consulting the filesystem.
///
/// `..` at the root stays at the root, like `path.resolve` in most runtimes.
pub fn normalize_lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                None | Some(Component::ParentDir | Component::CurDir) => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolve `path` against `root`.
///
/// Absolute paths ignore the root. The result is always normalized.
///
/// # Example
/// ```ignore
/// resolve_path(Path::new("/work/site"), Path::new("app/../lib")) // /work/site/lib
/// ```
#[inline]
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_lexical(path)
    } else {
        normalize_lexical(&root.join(path))
    }
}

/// Relative path that leads from `from` to `to`.
///
/// Both inputs should be absolute. Identical inputs give an empty path.
///
/// # Example
/// ```ignore
/// relative_path("/p/app", "/p/app/App_Resources") // App_Resources
/// relative_path("/p/app", "/p/res")               // ../res
/// ```
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from = normalize_lexical(from);
    let to = normalize_lexical(to);

    let from_comps: Vec<_> = from.components().collect();
    let to_comps: Vec<_> = to.components().collect();
    let common = from_comps
        .iter()
        .zip(&to_comps)
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..from_comps.len() {
        out.push("..");
    }
    for comp in &to_comps[common..] {
        out.push(comp.as_os_str());
    }
    out
}

/// Expand a leading `~` to the home directory.
///
/// Non UTF-8 paths are returned unchanged.
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    }
}
