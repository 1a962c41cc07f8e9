//! Configuration system for lintrc
//!
//! This module covers everything up to, but not including, per-file
//! resolution:
//! - JSON, JSONC/JSON5, YAML and TOML configuration files
//! - Auto-discovery by traversing up directories
//! - Validation of rule settings, parser options and override globs
//! - JSON Schema generation via schemars
//!
//! ## Configuration Files
//!
//! Searched for in this order: `.lintrc.json`, `.lintrc.jsonc`,
//! `.lintrc.yaml`, `.lintrc.yml`, `.lintrc.toml`, `.lintrc`.
//!
//! ## Example Configuration
//!
//! ```jsonc
//! {
//!   "env": { "node": true, "commonjs": true, "es2021": true, "jest": true },
//!   "extends": ["standard"],
//!   "parserOptions": { "ecmaVersion": "latest" },
//!   "rules": {
//!     "no-console": "off",
//!     "semi": ["error", "always"],
//!     "max-len": ["error", { "code": 120 }]
//!   },
//!   "overrides": [
//!     {
//!       "files": ["tests/**/*.js", "**/*.test.js", "**/*.spec.js"],
//!       "env": { "jest": true },
//!       "rules": { "no-unused-expressions": "off" }
//!     }
//!   ]
//! }
//! ```

pub mod env;
pub mod file;
mod lint_config;
mod loader;
pub mod merge;
pub mod parser_options;
pub mod rule;

// Re-export main types
pub use env::EnvFlags;
pub use file::{ConfigFile, OverrideFile, StringOrList};
pub use lint_config::LintConfig;
pub use loader::{CONFIG_EXTENSIONS, CONFIG_FILE_NAMES, ConfigLoader};
pub use merge::Layer;
pub use parser_options::{EcmaVersion, ParserOptions, SourceType};
pub use rule::{RuleMap, RuleSetting, Severity};
