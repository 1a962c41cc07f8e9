//! The fully merged configuration for one file

use serde::Serialize;

use crate::config::env::EnvFlags;
use crate::config::merge::Layer;
use crate::config::parser_options::ParserOptions;
use crate::config::rule::{RuleMap, RuleSetting, Severity};

/// Effective configuration a linting engine uses for a single file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
    /// Path relative to the configuration directory, when it lies inside it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub env: EnvFlags,
    pub parser_options: ParserOptions,
    pub rules: RuleMap,
    /// Field paths of the overrides that applied, in application order
    pub matched_overrides: Vec<String>,
}

impl EffectiveConfig {
    pub(crate) fn from_layer(path: Option<String>, layer: Layer, matched: Vec<String>) -> Self {
        Self {
            path,
            env: layer.env,
            parser_options: layer.parser_options,
            rules: layer.rules,
            matched_overrides: matched,
        }
    }

    pub fn rule(&self, name: &str) -> Option<&RuleSetting> {
        self.rules.get(name)
    }

    /// Severity of a rule; rules absent from every source are off
    pub fn severity(&self, name: &str) -> Severity {
        self.rule(name)
            .map(RuleSetting::severity)
            .unwrap_or(Severity::Off)
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.severity(name).is_enabled()
    }

    /// Rules that will run, in declaration order
    pub fn enabled_rules(&self) -> impl Iterator<Item = (&str, &RuleSetting)> {
        self.rules
            .iter()
            .filter(|(_, setting)| setting.severity().is_enabled())
            .map(|(name, setting)| (name.as_str(), setting))
    }
}
