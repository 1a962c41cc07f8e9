//! Error types for configuration loading and resolution

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lintrc operations
#[derive(Debug, Error)]
pub enum LintrcError {
    /// A preset named in `extends` could not be found
    #[error("Unknown preset '{name}' referenced at {field_path}")]
    UnknownPreset { name: String, field_path: String },

    /// Presets extend each other in a loop
    #[error("Circular preset chain: {chain}")]
    CircularPreset { chain: String },

    /// A rule value is neither a severity token nor a list starting with one
    #[error("Malformed rule setting at {field_path}: {reason}")]
    MalformedRuleSetting { field_path: String, reason: String },

    /// An override glob pattern failed to compile
    #[error("Invalid glob pattern '{pattern}' at {field_path}: {reason}")]
    InvalidGlobPattern {
        pattern: String,
        field_path: String,
        reason: String,
    },

    /// An override matches none of the files it was checked against
    #[error("Override at {field_path} ({patterns}) matches no files")]
    UnresolvableOverride { field_path: String, patterns: String },

    /// Structural configuration problems
    #[error("Configuration error at {field_path}: {message}")]
    ConfigError { field_path: String, message: String },

    /// Syntax errors in a configuration file
    #[error("Failed to parse '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Preset,
    RuleSetting,
    Glob,
    Coverage,
    Config,
    Parse,
    Io,
}

impl LintrcError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LintrcError::UnknownPreset { .. } | LintrcError::CircularPreset { .. } => {
                ErrorKind::Preset
            }
            LintrcError::MalformedRuleSetting { .. } => ErrorKind::RuleSetting,
            LintrcError::InvalidGlobPattern { .. } => ErrorKind::Glob,
            LintrcError::UnresolvableOverride { .. } => ErrorKind::Coverage,
            LintrcError::ConfigError { .. } => ErrorKind::Config,
            LintrcError::ParseError { .. } => ErrorKind::Parse,
            LintrcError::IoError { .. } => ErrorKind::Io,
        }
    }

    /// Whether this is a policy warning rather than a hard failure
    pub fn is_warning(&self) -> bool {
        self.kind() == ErrorKind::Coverage
    }

    /// Location of the failing value inside the configuration object, if any
    pub fn field_path(&self) -> Option<&str> {
        match self {
            LintrcError::UnknownPreset { field_path, .. }
            | LintrcError::MalformedRuleSetting { field_path, .. }
            | LintrcError::InvalidGlobPattern { field_path, .. }
            | LintrcError::UnresolvableOverride { field_path, .. }
            | LintrcError::ConfigError { field_path, .. } => Some(field_path),
            _ => None,
        }
    }

    /// Create a configuration error
    pub fn config_error(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigError {
            field_path: field_path.into(),
            message: message.into(),
        }
    }

    /// Create a malformed rule setting error
    pub fn malformed_rule(field_path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRuleSetting {
            field_path: field_path.into(),
            reason: reason.into(),
        }
    }

    /// Create a parse error for a configuration file
    pub fn parse_error(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::ParseError {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }
}
