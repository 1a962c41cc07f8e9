//! Result type alias for lintrc operations

use crate::error::LintrcError;

/// Standard Result type for lintrc operations
pub type Result<T> = std::result::Result<T, LintrcError>;
