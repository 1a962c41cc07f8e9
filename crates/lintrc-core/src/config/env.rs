//! Environment flags
//!
//! Each flag names an environment whose global identifiers the linter should
//! treat as predefined. The set of globals behind a name belongs to the
//! linting engine; here we only carry the toggles.

use indexmap::IndexMap;
use serde::Serialize;

/// Environment names the common presets and engines understand
pub const KNOWN_ENVIRONMENTS: &[&str] = &[
    "browser",
    "commonjs",
    "node",
    "shared-node-browser",
    "worker",
    "serviceworker",
    "es6",
    "es2015",
    "es2016",
    "es2017",
    "es2018",
    "es2019",
    "es2020",
    "es2021",
    "es2022",
    "es2023",
    "es2024",
    "jest",
    "mocha",
    "jasmine",
];

pub fn is_known_environment(name: &str) -> bool {
    KNOWN_ENVIRONMENTS.contains(&name)
}

/// Ordered environment toggles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnvFlags(IndexMap<String, bool>);

impl EnvFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw flags, logging names no engine is known to understand
    pub fn from_raw(field_path: &str, raw: &IndexMap<String, bool>) -> Self {
        for name in raw.keys() {
            if !is_known_environment(name) {
                tracing::warn!("Unknown environment '{}' at {}.{}", name, field_path, name);
            }
        }
        Self(raw.clone())
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    pub fn set(&mut self, name: impl Into<String>, enabled: bool) {
        self.0.insert(name.into(), enabled);
    }

    /// Environments switched on, in declaration order
    pub fn enabled(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_map(&self) -> &IndexMap<String, bool> {
        &self.0
    }

    /// Key-wise replacement: flags in `other` win
    pub fn overlay(&mut self, other: &EnvFlags) {
        for (name, enabled) in &other.0 {
            self.0.insert(name.clone(), *enabled);
        }
    }
}

impl FromIterator<(String, bool)> for EnvFlags {
    fn from_iter<T: IntoIterator<Item = (String, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
