//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` for output shown only with `--verbose`
//! - `status_ok` / `status_warn` for checklist lines
//!
//! Everything is written to stderr; stdout is reserved for the plan.
//!
//! # Example
//!
//! ```ignore
//! log!("plan"; "bundling for {}", platform);
//! debug!("sources"; "entry module: {}", module);
//! status_warn("entry module app.js not found");
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Stream};
use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module, &module.to_ascii_lowercase());

    let mut stderr = stderr().lock();
    execute!(stderr, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stderr, "{prefix} {message}").ok();
    stderr.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    let paint = |p: &String| match module_lower {
        "plan" => p.bright_blue().bold().to_string(),
        "error" => p.bright_red().bold().to_string(),
        _ => p.bright_yellow().bold().to_string(),
    };
    prefix.if_supports_color(Stream::Stderr, paint).to_string()
}

// ============================================================================
// Checklist Status
// ============================================================================

/// Print a passed check (✓ prefix, green).
pub fn status_ok(message: &str) {
    status(&"✓".if_supports_color(Stream::Stderr, |s| s.green()).to_string(), message);
}

/// Print a failed check (⚠ prefix, yellow).
pub fn status_warn(message: &str) {
    status(&"⚠".if_supports_color(Stream::Stderr, |s| s.yellow()).to_string(), message);
}

fn status(symbol: &str, message: &str) {
    let mut stderr = stderr().lock();
    writeln!(stderr, "  {symbol} {message}").ok();
    stderr.flush().ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_toggle() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }

    #[test]
    fn test_prefix_contains_module() {
        owo_colors::set_override(false);
        assert_eq!(colorize_prefix("plan", "plan"), "[plan]");
        assert_eq!(colorize_prefix("Warning", "warning"), "[Warning]");
    }
}
