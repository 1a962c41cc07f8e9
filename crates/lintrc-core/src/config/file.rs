//! On-disk configuration shape
//!
//! These types mirror the configuration file one-to-one and are what the JSON
//! Schema is generated from. Nothing here is validated beyond basic typing;
//! [`LintConfig`](super::LintConfig) is the checked form.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single string or a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            StringOrList::One(s) => vec![s],
            StringOrList::Many(v) => v,
        }
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.clone().into_vec()
    }
}

impl From<Vec<String>> for StringOrList {
    fn from(v: Vec<String>) -> Self {
        StringOrList::Many(v)
    }
}

/// Linter configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    /// JSON Schema reference, ignored by the resolver
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Environments whose globals are predefined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Environment name to on/off toggle")]
    pub env: Option<IndexMap<String, bool>>,

    /// Presets to extend, applied in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Preset names or relative config paths; later entries win")]
    pub extends: Option<StringOrList>,

    /// Parser options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Parser settings such as ecmaVersion and sourceType")]
    pub parser_options: Option<IndexMap<String, Value>>,

    /// Rule settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(
        description = "Rule name to severity (\"off\", \"warn\", \"error\", 0-2) or [severity, ...options]"
    )]
    pub rules: Option<IndexMap<String, Value>>,

    /// Path-scoped overrides, applied in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Settings applied only to files matching the given globs")]
    pub overrides: Option<Vec<OverrideFile>>,
}

/// One entry of the `overrides` list
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OverrideFile {
    /// Glob patterns selecting the files this override applies to
    #[schemars(description = "Glob patterns relative to the configuration directory")]
    pub files: StringOrList,

    /// Glob patterns removed from the selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Glob patterns excluded from `files`")]
    pub excluded_files: Option<StringOrList>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<IndexMap<String, bool>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser_options: Option<IndexMap<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<IndexMap<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extends_accepts_string_or_list() {
        let one: ConfigFile = serde_json::from_value(json!({ "extends": "standard" })).unwrap();
        assert_eq!(one.extends.unwrap().into_vec(), vec!["standard"]);

        let many: ConfigFile =
            serde_json::from_value(json!({ "extends": ["standard", "./local.json"] })).unwrap();
        assert_eq!(many.extends.unwrap().into_vec(), vec!["standard", "./local.json"]);
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let result: Result<ConfigFile, _> = serde_json::from_value(json!({ "rulez": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn test_override_shape() {
        let file: ConfigFile = serde_json::from_value(json!({
            "overrides": [{
                "files": ["tests/**/*.js", "**/*.test.js"],
                "excludedFiles": "tests/fixtures/**",
                "env": { "jest": true },
                "rules": { "no-unused-expressions": "off" }
            }]
        }))
        .unwrap();

        let overrides = file.overrides.unwrap();
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides[0].files.to_vec().len(), 2);
        assert_eq!(
            overrides[0].excluded_files.clone().unwrap().into_vec(),
            vec!["tests/fixtures/**"]
        );
    }

    #[test]
    fn test_camel_case_round_trip() {
        let file: ConfigFile =
            serde_json::from_value(json!({ "parserOptions": { "ecmaVersion": "latest" } }))
                .unwrap();
        let value = serde_json::to_value(&file).unwrap();
        assert_eq!(value, json!({ "parserOptions": { "ecmaVersion": "latest" } }));
    }
}
