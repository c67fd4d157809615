//! Path utilities.
//!
//! Pure functions for path manipulation. No side effects.

pub mod fs;

pub use fs::{expand_tilde, normalize_lexical, relative_path, resolve_path};
