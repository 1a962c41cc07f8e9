//! Validated configuration
//!
//! [`LintConfig`] is built once from a [`ConfigFile`] and never changes
//! afterwards. Rule values and override globs are checked up front so that
//! resolving a path cannot fail.

use std::path::{Path, PathBuf};

use super::env::EnvFlags;
use super::file::{ConfigFile, OverrideFile, StringOrList};
use super::merge::Layer;
use super::parser_options::ParserOptions;
use super::rule::{RuleMap, parse_rule_map, rule_map_to_values};
use crate::error::LintrcError;
use crate::overrides::{Override, compile_patterns};
use crate::result::Result;

/// A checked, immutable linter configuration
#[derive(Debug, Clone)]
pub struct LintConfig {
    base_dir: PathBuf,
    extends: Vec<String>,
    layer: Layer,
    overrides: Vec<Override>,
    source: ConfigFile,
}

impl LintConfig {
    /// Validate a parsed configuration file rooted at `base_dir`
    pub fn from_file(file: ConfigFile, base_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::from_file_at(file, base_dir.into(), "")
    }

    /// Validate with every reported field path prefixed by `prefix`
    pub(crate) fn from_file_at(file: ConfigFile, base_dir: PathBuf, prefix: &str) -> Result<Self> {
        let extends = file
            .extends
            .clone()
            .map(StringOrList::into_vec)
            .unwrap_or_default();
        for (i, name) in extends.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(LintrcError::config_error(
                    format!("{prefix}extends[{i}]"),
                    "preset name cannot be empty",
                ));
            }
        }

        let layer = build_layer(
            prefix,
            file.env.as_ref(),
            file.parser_options.as_ref(),
            file.rules.as_ref(),
        )?;

        let overrides = file
            .overrides
            .iter()
            .flatten()
            .enumerate()
            .map(|(i, entry)| build_override(&format!("{prefix}overrides[{i}]"), entry))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            "Validated configuration {}: {} rule(s), {} override(s), {} preset(s)",
            if prefix.is_empty() { "<root>" } else { prefix },
            layer.rules.len(),
            overrides.len(),
            extends.len()
        );

        Ok(Self {
            base_dir,
            extends,
            layer,
            overrides,
            source: file,
        })
    }

    /// Parse and validate a JSON document rooted at `base_dir`
    pub fn from_json_str(content: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(content)
            .map_err(|e| LintrcError::parse_error("<string>", e))?;
        Self::from_file(file, base_dir)
    }

    /// Directory override patterns and relative preset paths resolve against
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Preset references, in application order
    pub fn extends(&self) -> &[String] {
        &self.extends
    }

    pub fn env(&self) -> &EnvFlags {
        &self.layer.env
    }

    pub fn parser_options(&self) -> &ParserOptions {
        &self.layer.parser_options
    }

    pub fn rules(&self) -> &RuleMap {
        &self.layer.rules
    }

    /// Top-level settings as a single merge layer
    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    pub fn overrides(&self) -> &[Override] {
        &self.overrides
    }

    /// The file this configuration was validated from
    pub fn source(&self) -> &ConfigFile {
        &self.source
    }

    /// Normalised file form: numeric severities become tokens and
    /// single-string lists become lists
    pub fn to_file(&self) -> ConfigFile {
        let mut file = self.source.clone();
        if !self.extends.is_empty() {
            file.extends = Some(StringOrList::Many(self.extends.clone()));
        }
        if file.env.is_some() {
            file.env = Some(self.layer.env.as_map().clone());
        }
        if file.parser_options.is_some() {
            file.parser_options = Some(self.layer.parser_options.to_raw());
        }
        if file.rules.is_some() {
            file.rules = Some(rule_map_to_values(&self.layer.rules));
        }
        if let Some(entries) = file.overrides.as_mut() {
            for (entry, validated) in entries.iter_mut().zip(&self.overrides) {
                entry.files = StringOrList::Many(entry.files.to_vec());
                if let Some(excluded) = entry.excluded_files.take() {
                    entry.excluded_files = Some(StringOrList::Many(excluded.into_vec()));
                }
                if entry.parser_options.is_some() {
                    entry.parser_options = Some(validated.layer().parser_options.to_raw());
                }
                if entry.rules.is_some() {
                    entry.rules = Some(rule_map_to_values(&validated.layer().rules));
                }
            }
        }
        file
    }

    /// JSON Schema describing the configuration file format
    pub fn json_schema() -> Result<serde_json::Value> {
        serde_json::to_value(schemars::schema_for!(ConfigFile))
            .map_err(|e| LintrcError::config_error("<schema>", e.to_string()))
    }
}

fn build_layer(
    prefix: &str,
    env: Option<&indexmap::IndexMap<String, bool>>,
    parser_options: Option<&indexmap::IndexMap<String, serde_json::Value>>,
    rules: Option<&indexmap::IndexMap<String, serde_json::Value>>,
) -> Result<Layer> {
    Ok(Layer {
        env: env
            .map(|raw| EnvFlags::from_raw(&format!("{prefix}env"), raw))
            .unwrap_or_default(),
        parser_options: parser_options
            .map(|raw| ParserOptions::from_raw(&format!("{prefix}parserOptions"), raw))
            .transpose()?
            .unwrap_or_default(),
        rules: rules
            .map(|raw| parse_rule_map(&format!("{prefix}rules"), raw))
            .transpose()?
            .unwrap_or_default(),
    })
}

fn build_override(field_path: &str, entry: &OverrideFile) -> Result<Override> {
    let files = entry.files.to_vec();
    if files.is_empty() {
        return Err(LintrcError::config_error(
            format!("{field_path}.files"),
            "at least one pattern is required",
        ));
    }
    let files = compile_patterns(&files, &format!("{field_path}.files"))?;
    let excluded_files = match &entry.excluded_files {
        Some(patterns) => {
            compile_patterns(&patterns.to_vec(), &format!("{field_path}.excludedFiles"))?
        }
        None => Vec::new(),
    };

    let layer = build_layer(
        &format!("{field_path}."),
        entry.env.as_ref(),
        entry.parser_options.as_ref(),
        entry.rules.as_ref(),
    )?;

    Ok(Override::new(field_path, files, excluded_files, layer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::rule::Severity;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn load(value: serde_json::Value) -> Result<LintConfig> {
        let file: ConfigFile = serde_json::from_value(value).unwrap();
        LintConfig::from_file(file, "/project")
    }

    #[test]
    fn test_valid_configuration() {
        let config = load(json!({
            "env": { "node": true, "jest": true },
            "extends": ["standard"],
            "parserOptions": { "ecmaVersion": "latest" },
            "rules": {
                "no-console": "off",
                "semi": ["error", "always"]
            },
            "overrides": [{
                "files": ["tests/**/*.js"],
                "rules": { "no-unused-expressions": "off" }
            }]
        }))
        .unwrap();

        assert_eq!(config.extends(), &["standard".to_string()]);
        assert_eq!(config.env().get("jest"), Some(true));
        assert_eq!(config.rules()["semi"].severity(), Severity::Error);
        assert_eq!(config.overrides().len(), 1);
        assert_eq!(config.overrides()[0].origin(), "overrides[0]");
        assert_eq!(config.base_dir(), Path::new("/project"));
    }

    #[test]
    fn test_malformed_rule_in_override_names_field_path() {
        let err = load(json!({
            "overrides": [
                { "files": "*.js" },
                { "files": "*.ts", "rules": { "semi": ["always"] } }
            ]
        }))
        .unwrap_err();

        assert!(matches!(err, LintrcError::MalformedRuleSetting { .. }));
        assert_eq!(err.field_path(), Some("overrides[1].rules.semi"));
    }

    #[test]
    fn test_invalid_glob_names_field_path() {
        let err = load(json!({
            "overrides": [{ "files": ["ok/*.js", "bad/[x"] }]
        }))
        .unwrap_err();

        assert!(matches!(err, LintrcError::InvalidGlobPattern { .. }));
        assert_eq!(err.field_path(), Some("overrides[0].files[1]"));
    }

    #[test]
    fn test_empty_files_list_rejected() {
        let err = load(json!({ "overrides": [{ "files": [] }] })).unwrap_err();
        assert_eq!(err.field_path(), Some("overrides[0].files"));
    }

    #[test]
    fn test_empty_preset_name_rejected() {
        let err = load(json!({ "extends": ["standard", " "] })).unwrap_err();
        assert_eq!(err.field_path(), Some("extends[1]"));
    }

    #[test]
    fn test_prefixed_field_paths() {
        let file: ConfigFile =
            serde_json::from_value(json!({ "rules": { "semi": "always" } })).unwrap();
        let err = LintConfig::from_file_at(file, PathBuf::from("/p"), "standard:").unwrap_err();
        assert_eq!(err.field_path(), Some("standard:rules.semi"));
    }

    #[test]
    fn test_to_file_normalises_values() {
        let config = load(json!({
            "extends": "standard",
            "rules": { "indent": [2, 2], "eqeqeq": 1 },
            "overrides": [{ "files": "*.test.js", "rules": { "no-undef": 0 } }]
        }))
        .unwrap();

        let value = serde_json::to_value(config.to_file()).unwrap();
        assert_eq!(
            value,
            json!({
                "extends": ["standard"],
                "rules": { "indent": ["error", 2], "eqeqeq": "warn" },
                "overrides": [{ "files": ["*.test.js"], "rules": { "no-undef": "off" } }]
            })
        );
    }

    #[test]
    fn test_json_schema_lists_top_level_fields() {
        let schema = LintConfig::json_schema().unwrap();
        let properties = schema["properties"].as_object().unwrap();
        for key in ["env", "extends", "parserOptions", "rules", "overrides"] {
            assert!(properties.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn test_from_json_str_rejects_syntax_errors() {
        let err = LintConfig::from_json_str("{ not json", "/p").unwrap_err();
        assert!(matches!(err, LintrcError::ParseError { .. }));
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
