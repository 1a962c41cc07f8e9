//! Preset lookup
//!
//! A preset is an ordinary configuration file referenced by name from
//! `extends`. Names are looked up, in order:
//!
//! 1. as a file reference when they start with `./`, `../` or `/`, relative to
//!    the directory of the configuration that mentions them;
//! 2. among presets registered in memory;
//! 3. in each preset directory, as `<dir>/<name>.<ext>` for every supported
//!    extension (scoped names such as `@acme/base` map to subdirectories).

use indexmap::IndexMap;
use std::path::{Path, PathBuf};

use crate::config::file::ConfigFile;
use crate::config::{CONFIG_EXTENSIONS, ConfigLoader};
use crate::result::Result;

/// A preset found by the registry
#[derive(Debug, Clone)]
pub struct PresetDocument {
    /// Stable identity used for cycle detection (name or canonical path)
    pub id: String,
    pub file: ConfigFile,
    /// Directory relative preset references inside this preset resolve against
    pub base_dir: PathBuf,
}

/// Collection of known presets
#[derive(Debug, Clone, Default)]
pub struct PresetRegistry {
    presets: IndexMap<String, ConfigFile>,
    directories: Vec<PathBuf>,
}

impl PresetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an in-memory preset under `name`
    pub fn register(&mut self, name: impl Into<String>, file: ConfigFile) -> &mut Self {
        let name = name.into();
        tracing::debug!("Registered preset '{}'", name);
        self.presets.insert(name, file);
        self
    }

    /// Builder form of [`register`](Self::register)
    pub fn with_preset(mut self, name: impl Into<String>, file: ConfigFile) -> Self {
        self.register(name, file);
        self
    }

    /// Add a directory to search for named presets
    pub fn add_directory(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.directories.push(dir.into());
        self
    }

    pub fn with_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.add_directory(dir);
        self
    }

    /// Names of presets registered in memory
    pub fn registered(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// Look up `name` as referenced from a configuration in `referrer_dir`
    ///
    /// Returns `Ok(None)` when nothing matches; a matching file that fails to
    /// parse is an error.
    pub fn lookup(&self, name: &str, referrer_dir: &Path) -> Result<Option<PresetDocument>> {
        if is_file_reference(name) {
            let path = referrer_dir.join(name);
            if !path.is_file() {
                return Ok(None);
            }
            return Self::load_path(&path).map(Some);
        }

        if let Some(file) = self.presets.get(name) {
            return Ok(Some(PresetDocument {
                id: name.to_string(),
                file: file.clone(),
                base_dir: referrer_dir.to_path_buf(),
            }));
        }

        for dir in &self.directories {
            for ext in CONFIG_EXTENSIONS {
                let path = dir.join(format!("{name}.{ext}"));
                if path.is_file() {
                    tracing::debug!("Preset '{}' found at {}", name, path.display());
                    return Self::load_path(&path).map(Some);
                }
            }
        }

        Ok(None)
    }

    fn load_path(path: &Path) -> Result<PresetDocument> {
        let file = ConfigLoader::read_file(path)?;
        let id = path
            .canonicalize()
            .unwrap_or_else(|_| path.to_path_buf())
            .display()
            .to_string();
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(PresetDocument { id, file, base_dir })
    }
}

fn is_file_reference(name: &str) -> bool {
    name.starts_with("./") || name.starts_with("../") || Path::new(name).is_absolute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_registered_preset() {
        let registry = PresetRegistry::new().with_preset("standard", ConfigFile::default());
        let doc = registry.lookup("standard", Path::new("/project")).unwrap().unwrap();
        assert_eq!(doc.id, "standard");
        assert_eq!(doc.base_dir, PathBuf::from("/project"));
        assert!(registry.lookup("airbnb", Path::new("/project")).unwrap().is_none());
    }

    #[test]
    fn test_directory_preset_with_scope() {
        let temp_dir = TempDir::new().unwrap();
        let scoped = temp_dir.path().join("@acme");
        fs::create_dir_all(&scoped).unwrap();
        fs::write(scoped.join("base.yaml"), "rules:\n  semi: error\n").unwrap();

        let registry = PresetRegistry::new().with_directory(temp_dir.path());
        let doc = registry.lookup("@acme/base", Path::new("/elsewhere")).unwrap().unwrap();
        assert!(doc.file.rules.unwrap().contains_key("semi"));
        assert_eq!(doc.base_dir, scoped);
    }

    #[test]
    fn test_file_reference_is_relative_to_referrer() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("shared.json"), r#"{ "env": { "node": true } }"#).unwrap();

        let registry = PresetRegistry::new();
        let doc = registry.lookup("./shared.json", temp_dir.path()).unwrap().unwrap();
        assert_eq!(doc.file.env.unwrap().get("node"), Some(&true));

        assert!(registry.lookup("./missing.json", temp_dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_registered_names_take_precedence_over_directories() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("standard.json"), r#"{ "rules": { "a": "off" } }"#).unwrap();

        let in_memory = ConfigFile {
            rules: Some([("b".to_string(), serde_json::json!("error"))].into_iter().collect()),
            ..Default::default()
        };
        let registry = PresetRegistry::new()
            .with_directory(temp_dir.path())
            .with_preset("standard", in_memory);

        let doc = registry.lookup("standard", temp_dir.path()).unwrap().unwrap();
        assert!(doc.file.rules.unwrap().contains_key("b"));
    }

    #[test]
    fn test_broken_preset_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("broken.json"), "{").unwrap();

        let registry = PresetRegistry::new().with_directory(temp_dir.path());
        assert!(registry.lookup("broken", temp_dir.path()).is_err());
    }
}
