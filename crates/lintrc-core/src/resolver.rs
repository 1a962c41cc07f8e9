//! Per-file configuration resolution
//!
//! [`ConfigResolver::new`] expands the preset chain once and folds it together
//! with the configuration's own settings into the base layer. Resolving a path
//! then only has to overlay the overrides that match it, in declaration order:
//!
//! ```text
//! preset₁ → … → presetₙ → top-level settings → override₁ → … → overrideₘ
//! ```
//!
//! Overrides contributed by presets come before the configuration's own, so
//! the configuration always has the last word.

use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::config::LintConfig;
use crate::config::merge::Layer;
use crate::effective::EffectiveConfig;
use crate::error::LintrcError;
use crate::overrides::{Override, relative_path};
use crate::preset::PresetRegistry;
use crate::result::Result;

/// Resolves effective configurations for individual files
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    base_dir: PathBuf,
    base: Layer,
    overrides: Vec<Override>,
    presets: Vec<String>,
}

impl ConfigResolver {
    /// Expand presets and build the base layer
    ///
    /// Fails with `UnknownPreset` when a name cannot be found and with
    /// `CircularPreset` when presets extend each other in a loop. Errors in a
    /// preset's own content are reported with the preset name as prefix.
    pub fn new(config: &LintConfig, registry: &PresetRegistry) -> Result<Self> {
        let base_dir = std::path::absolute(config.base_dir())
            .map_err(|e| LintrcError::io_error(config.base_dir(), e))?;

        let mut expansion = PresetExpansion::default();
        let mut stack = Vec::new();
        expansion.expand(
            registry,
            config.extends(),
            config.base_dir(),
            "",
            &mut stack,
        )?;

        let mut base = Layer::fold(&expansion.layers);
        base.overlay(config.layer());

        let mut overrides = expansion.overrides;
        overrides.extend(config.overrides().iter().cloned());

        tracing::debug!(
            "Resolver ready: {} preset(s), {} base rule(s), {} override(s)",
            expansion.applied.len(),
            base.rules.len(),
            overrides.len()
        );

        Ok(Self {
            base_dir,
            base,
            overrides,
            presets: expansion.applied,
        })
    }

    /// Effective configuration for `path`
    ///
    /// Absolute paths are made relative to the configuration directory;
    /// relative paths are taken as already relative to it. Files outside the
    /// directory get the base configuration.
    pub fn resolve(&self, path: impl AsRef<Path>) -> EffectiveConfig {
        let relative = relative_path(path.as_ref(), &self.base_dir);
        let mut layer = self.base.clone();
        let mut matched = Vec::new();

        if let Some(rel) = relative.as_deref() {
            for ov in self.overrides.iter().filter(|ov| ov.matches(rel)) {
                tracing::trace!("{} applies to {}", ov.origin(), rel);
                layer.overlay(ov.layer());
                matched.push(ov.origin().to_string());
            }
        }

        EffectiveConfig::from_layer(relative, layer, matched)
    }

    /// Resolve many paths in parallel; results keep the input order
    pub fn resolve_all<P>(&self, paths: &[P]) -> Vec<EffectiveConfig>
    where
        P: AsRef<Path> + Sync,
    {
        paths.par_iter().map(|p| self.resolve(p)).collect()
    }

    /// Configuration for a file no override applies to
    pub fn base(&self) -> EffectiveConfig {
        EffectiveConfig::from_layer(None, self.base.clone(), Vec::new())
    }

    /// One `UnresolvableOverride` warning per override matching none of `paths`
    pub fn unmatched_overrides<P>(&self, paths: &[P]) -> Vec<LintrcError>
    where
        P: AsRef<Path> + Sync,
    {
        let relative: Vec<String> = paths
            .par_iter()
            .filter_map(|p| relative_path(p.as_ref(), &self.base_dir))
            .collect();

        self.overrides
            .iter()
            .filter(|ov| !relative.iter().any(|rel| ov.matches(rel)))
            .map(|ov| {
                tracing::warn!(
                    "{} ({}) matches none of {} file(s)",
                    ov.origin(),
                    ov.describe_patterns(),
                    relative.len()
                );
                LintrcError::UnresolvableOverride {
                    field_path: ov.origin().to_string(),
                    patterns: ov.describe_patterns(),
                }
            })
            .collect()
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// All overrides in application order, preset overrides first
    pub fn overrides(&self) -> &[Override] {
        &self.overrides
    }

    /// Preset identities in the order they were applied
    pub fn presets(&self) -> &[String] {
        &self.presets
    }
}

/// Depth-first expansion of an `extends` chain
#[derive(Default)]
struct PresetExpansion {
    layers: Vec<Layer>,
    overrides: Vec<Override>,
    applied: Vec<String>,
}

impl PresetExpansion {
    fn expand(
        &mut self,
        registry: &PresetRegistry,
        names: &[String],
        referrer_dir: &Path,
        prefix: &str,
        stack: &mut Vec<String>,
    ) -> Result<()> {
        for (i, name) in names.iter().enumerate() {
            let doc = registry
                .lookup(name, referrer_dir)?
                .ok_or_else(|| LintrcError::UnknownPreset {
                    name: name.clone(),
                    field_path: format!("{prefix}extends[{i}]"),
                })?;

            if stack.contains(&doc.id) {
                let mut chain = stack.clone();
                chain.push(doc.id);
                return Err(LintrcError::CircularPreset {
                    chain: chain.join(" -> "),
                });
            }

            let preset_prefix = format!("{name}:");
            let preset = LintConfig::from_file_at(doc.file, doc.base_dir, &preset_prefix)?;

            stack.push(doc.id.clone());
            self.expand(
                registry,
                preset.extends(),
                preset.base_dir(),
                &preset_prefix,
                stack,
            )?;
            stack.pop();

            tracing::debug!("Applying preset '{}'", name);
            self.layers.push(preset.layer().clone());
            self.overrides.extend(preset.overrides().iter().cloned());
            self.applied.push(doc.id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::file::ConfigFile;
    use crate::config::rule::Severity;
    use serde_json::json;

    fn config(value: serde_json::Value) -> LintConfig {
        let file: ConfigFile = serde_json::from_value(value).unwrap();
        LintConfig::from_file(file, "/project").unwrap()
    }

    fn preset(value: serde_json::Value) -> ConfigFile {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_unknown_preset() {
        let cfg = config(json!({ "extends": ["standard"] }));
        let err = ConfigResolver::new(&cfg, &PresetRegistry::new()).unwrap_err();
        assert!(matches!(
            err,
            LintrcError::UnknownPreset { ref name, .. } if name == "standard"
        ));
        assert_eq!(err.field_path(), Some("extends[0]"));
    }

    #[test]
    fn test_unknown_nested_preset_names_parent() {
        let registry =
            PresetRegistry::new().with_preset("outer", preset(json!({ "extends": "inner" })));
        let cfg = config(json!({ "extends": "outer" }));

        let err = ConfigResolver::new(&cfg, &registry).unwrap_err();
        assert_eq!(err.field_path(), Some("outer:extends[0]"));
    }

    #[test]
    fn test_circular_presets() {
        let registry = PresetRegistry::new()
            .with_preset("a", preset(json!({ "extends": "b" })))
            .with_preset("b", preset(json!({ "extends": "a" })));
        let cfg = config(json!({ "extends": "a" }));

        let err = ConfigResolver::new(&cfg, &registry).unwrap_err();
        match err {
            LintrcError::CircularPreset { chain } => assert_eq!(chain, "a -> b -> a"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_same_preset_twice_is_not_a_cycle() {
        let registry = PresetRegistry::new()
            .with_preset("base", preset(json!({ "rules": { "semi": "warn" } })))
            .with_preset("left", preset(json!({ "extends": "base" })))
            .with_preset("right", preset(json!({ "extends": "base" })));
        let cfg = config(json!({ "extends": ["left", "right"] }));

        let resolver = ConfigResolver::new(&cfg, &registry).unwrap();
        assert_eq!(resolver.presets(), &["base", "left", "base", "right"]);
    }

    #[test]
    fn test_later_presets_win_and_config_wins_over_presets() {
        let registry = PresetRegistry::new()
            .with_preset(
                "first",
                preset(json!({ "rules": { "semi": "warn", "quotes": "warn", "eqeqeq": "error" } })),
            )
            .with_preset("second", preset(json!({ "rules": { "quotes": "error" } })));
        let cfg = config(json!({
            "extends": ["first", "second"],
            "rules": { "semi": ["error", "always"] }
        }));

        let base = ConfigResolver::new(&cfg, &registry).unwrap().base();
        assert_eq!(base.rule("semi").unwrap().to_value(), json!(["error", "always"]));
        assert_eq!(base.severity("quotes"), Severity::Error);
        assert_eq!(base.severity("eqeqeq"), Severity::Error);
    }

    #[test]
    fn test_preset_overrides_apply_before_own_overrides() {
        let registry = PresetRegistry::new().with_preset(
            "standard",
            preset(json!({
                "overrides": [{ "files": "*.test.js", "rules": { "max-len": "warn" } }]
            })),
        );
        let cfg = config(json!({
            "extends": "standard",
            "overrides": [{ "files": "tests/**/*.js", "rules": { "max-len": "off" } }]
        }));

        let resolver = ConfigResolver::new(&cfg, &registry).unwrap();
        let effective = resolver.resolve("tests/a.test.js");
        assert_eq!(effective.severity("max-len"), Severity::Off);
        assert_eq!(
            effective.matched_overrides,
            vec!["standard:overrides[0]", "overrides[0]"]
        );
    }

    #[test]
    fn test_override_env_and_parser_options() {
        let cfg = config(json!({
            "env": { "jest": false, "node": true },
            "parserOptions": { "ecmaVersion": 2020 },
            "overrides": [{
                "files": "**/*.mjs",
                "env": { "jest": true },
                "parserOptions": { "sourceType": "module" }
            }]
        }));
        let resolver = ConfigResolver::new(&cfg, &PresetRegistry::new()).unwrap();

        let effective = resolver.resolve("lib/index.mjs");
        assert_eq!(effective.env.get("jest"), Some(true));
        assert_eq!(effective.env.get("node"), Some(true));
        assert_eq!(
            serde_json::to_value(&effective.parser_options).unwrap(),
            json!({ "ecmaVersion": 2020, "sourceType": "module" })
        );

        let plain = resolver.resolve("lib/index.js");
        assert_eq!(plain.env.get("jest"), Some(false));
    }

    #[test]
    fn test_absolute_paths() {
        let cfg = config(json!({
            "overrides": [{ "files": "tests/**/*.js", "rules": { "no-unused-expressions": "off" } }]
        }));
        let resolver = ConfigResolver::new(&cfg, &PresetRegistry::new()).unwrap();

        let inside = resolver.resolve("/project/tests/foo.test.js");
        assert_eq!(inside.path.as_deref(), Some("tests/foo.test.js"));
        assert!(inside.rule("no-unused-expressions").is_some());

        let outside = resolver.resolve("/other/tests/foo.test.js");
        assert!(outside.path.is_none());
        assert_eq!(outside.rules, resolver.base().rules);
    }

    #[test]
    fn test_relative_base_dir_matches_absolute_paths() {
        let file: ConfigFile = serde_json::from_value(json!({
            "overrides": [{ "files": "tests/**/*.js", "rules": { "no-unused-expressions": "off" } }]
        }))
        .unwrap();
        let cfg = LintConfig::from_file(file, ".").unwrap();
        let resolver = ConfigResolver::new(&cfg, &PresetRegistry::new()).unwrap();
        assert!(resolver.base_dir().is_absolute());

        let absolute = std::env::current_dir().unwrap().join("tests/a.js");
        let effective = resolver.resolve(&absolute);
        assert_eq!(effective.path.as_deref(), Some("tests/a.js"));
        assert_eq!(effective.matched_overrides, vec!["overrides[0]"]);

        let dotted = std::env::current_dir().unwrap().join("src/../tests/./b.js");
        assert_eq!(resolver.resolve(&dotted).path.as_deref(), Some("tests/b.js"));
    }

    #[test]
    fn test_unmatched_overrides() {
        let cfg = config(json!({
            "overrides": [
                { "files": "tests/**/*.js", "rules": { "a": "off" } },
                { "files": ["**/*.spec.js"], "rules": { "b": "off" } }
            ]
        }));
        let resolver = ConfigResolver::new(&cfg, &PresetRegistry::new()).unwrap();

        let warnings = resolver.unmatched_overrides(&["src/a.js", "tests/a.js"]);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].is_warning());
        assert_eq!(warnings[0].field_path(), Some("overrides[1]"));
    }
}
