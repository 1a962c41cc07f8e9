//! Configuration file discovery and loading

use super::file::ConfigFile;
use super::lint_config::LintConfig;
use crate::error::LintrcError;
use crate::result::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names searched for, in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".lintrc.json",
    ".lintrc.jsonc",
    ".lintrc.yaml",
    ".lintrc.yml",
    ".lintrc.toml",
    ".lintrc",
];

/// Extensions a configuration or preset file may carry
pub const CONFIG_EXTENSIONS: &[&str] = &["json", "jsonc", "json5", "yaml", "yml", "toml"];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover config file by traversing upward from start_path
    ///
    /// Checks each name in [`CONFIG_FILE_NAMES`] in every directory, starting
    /// at `start_path` and moving up until a config is found or the
    /// filesystem root is reached.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| LintrcError::io_error(start_path, e))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Read and parse a configuration file without validating it
    ///
    /// The format follows the extension: `.json`, `.jsonc`/`.json5`,
    /// `.yaml`/`.yml` or `.toml`. Files without an extension are read as JSON5
    /// when they start with `{` and as YAML otherwise.
    pub fn read_file(path: &Path) -> Result<ConfigFile> {
        let content = fs::read_to_string(path).map_err(|e| LintrcError::io_error(path, e))?;
        Self::parse_content(&content, path)
    }

    fn parse_content(content: &str, path: &Path) -> Result<ConfigFile> {
        let ext = path.extension().and_then(|e| e.to_str());
        let parse_err = |e: &dyn std::fmt::Display| LintrcError::parse_error(path, e);

        match ext {
            Some("json") => serde_json::from_str(content).map_err(|e| parse_err(&e)),
            Some("jsonc") | Some("json5") => json5::from_str(content).map_err(|e| parse_err(&e)),
            Some("yaml") | Some("yml") => serde_yaml::from_str(content).map_err(|e| parse_err(&e)),
            Some("toml") => toml::from_str(content).map_err(|e| parse_err(&e)),
            None if content.trim_start().starts_with('{') => {
                json5::from_str(content).map_err(|e| parse_err(&e))
            }
            None => serde_yaml::from_str(content).map_err(|e| parse_err(&e)),
            Some(other) => Err(LintrcError::parse_error(
                path,
                format!(
                    "unsupported file extension '.{other}' (expected one of {})",
                    CONFIG_EXTENSIONS.join(", ")
                ),
            )),
        }
    }

    /// Load and validate configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<LintConfig> {
        let file = Self::read_file(path)?;
        let parent = path
            .parent()
            .map(Path::to_path_buf)
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from("."));
        // Absolute paths handed to the resolver are matched against this
        let base_dir =
            std::path::absolute(&parent).map_err(|e| LintrcError::io_error(&parent, e))?;
        LintConfig::from_file(file, base_dir)
    }

    /// Load config from path or auto-discover
    ///
    /// If a custom path is provided, loads from that path. Otherwise searches
    /// upward from `start_dir` (or the current directory).
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<LintConfig> {
        let config_path = if let Some(path) = custom_path {
            if !path.exists() {
                return Err(LintrcError::io_error(
                    path,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found"),
                ));
            }
            path.to_path_buf()
        } else {
            let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
            Self::auto_discover(search_dir)?.ok_or_else(|| {
                LintrcError::config_error(
                    "<root>",
                    format!(
                        "No config file found searching upward from '{}' (looked for {})",
                        search_dir.display(),
                        CONFIG_FILE_NAMES.join(", ")
                    ),
                )
            })?
        };

        Self::load_from_file(&config_path)
    }
}
