//! Error types for the sspc CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for sspc operations.
///
/// Every variant aborts the current translation; there is no partial output.
#[derive(Error, Debug)]
pub enum SspError {
    /// Required configuration is missing or invalid (product name, config file).
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Reading the template or writing the generated module failed.
    #[error("{0}")]
    IoError(String),

    /// A tag was opened with `<%` but never closed.
    #[error("malformed template: tag opened at line {line}, column {column} is never closed with '%>'")]
    MalformedTemplate { line: usize, column: usize },

    /// A placeholder was resolved more than once.
    #[error("placeholder collision: {0} was resolved more than once")]
    PlaceholderCollision(String),

    /// A placeholder was allocated but never resolved.
    #[error("unresolved placeholder: {0} has no matching code")]
    UnresolvedPlaceholder(String),

    /// The module skeleton could not be rendered.
    #[error("skeleton error: {0}")]
    SkeletonError(String),

    /// One or more templates of a batch failed to compile.
    #[error("{failed} of {total} template(s) failed to compile:\n  {details}")]
    BatchFailed {
        failed: usize,
        total: usize,
        details: String,
    },
}

impl SspError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SspError::ConfigError(_) => exit_codes::CONFIG_ERROR,
            SspError::SkeletonError(_) => exit_codes::CONFIG_ERROR,
            SspError::IoError(_) => exit_codes::IO_FAILURE,
            SspError::MalformedTemplate { .. } => exit_codes::TEMPLATE_FAILURE,
            SspError::PlaceholderCollision(_) => exit_codes::INTERNAL_FAILURE,
            SspError::UnresolvedPlaceholder(_) => exit_codes::INTERNAL_FAILURE,
            SspError::BatchFailed { .. } => exit_codes::TEMPLATE_FAILURE,
        }
    }
}

/// Result type alias for sspc operations.
pub type Result<T> = std::result::Result<T, SspError>;
