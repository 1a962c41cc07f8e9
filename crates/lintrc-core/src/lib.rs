//! lintrc core
//!
//! Loads linter configuration files, expands their presets, and resolves the
//! effective configuration for each linted file. The linting engine itself is
//! out of scope: this crate only decides which rules run, at what severity,
//! with which parameters.

pub mod config;
pub mod effective;
pub mod error;
pub mod overrides;
pub mod preset;
pub mod resolver;
pub mod result;

// Re-export commonly used types
pub use config::{
    ConfigFile, ConfigLoader, EnvFlags, LintConfig, ParserOptions, RuleMap, RuleSetting, Severity,
};
pub use effective::EffectiveConfig;
pub use error::{ErrorKind, LintrcError};
pub use overrides::{FilePattern, Override};
pub use preset::{PresetDocument, PresetRegistry};
pub use resolver::ConfigResolver;
pub use result::Result;

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lintrc=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
