//! Plan construction errors.

use thiserror::Error;

/// Fatal error raised before any plan is assembled.
///
/// Retrying with the same input cannot succeed, so callers surface it
/// directly and abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("no target platform given (use --android, --ios or --platform <android|ios>)")]
    MissingPlatform,

    #[error("unknown target platform `{0}` (expected `android` or `ios`)")]
    UnknownPlatform(String),
}
