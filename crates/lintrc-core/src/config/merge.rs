//! Configuration merging logic
//!
//! Every source of settings (a preset, the configuration's own top level, a
//! matching override) is a [`Layer`]. Resolution is a left fold of layers,
//! where each step replaces values key by key. Rule values are shallow, so a
//! later rule setting replaces an earlier one wholesale, parameters included.

use super::env::EnvFlags;
use super::parser_options::ParserOptions;
use super::rule::RuleMap;

/// One set of settings contributed by a single source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    pub env: EnvFlags,
    pub parser_options: ParserOptions,
    pub rules: RuleMap,
}

impl Layer {
    /// Overlay `other` onto this layer (`other` takes precedence)
    pub fn overlay(&mut self, other: &Layer) {
        self.env.overlay(&other.env);
        self.parser_options.overlay(&other.parser_options);
        for (name, setting) in &other.rules {
            self.rules.insert(name.clone(), setting.clone());
        }
    }

    /// Fold layers in order, later layers winning on collisions
    pub fn fold<'a>(layers: impl IntoIterator<Item = &'a Layer>) -> Layer {
        layers.into_iter().fold(Layer::default(), |mut acc, layer| {
            acc.overlay(layer);
            acc
        })
    }

    pub fn is_empty(&self) -> bool {
        self.env.is_empty() && self.parser_options.is_empty() && self.rules.is_empty()
    }
}
