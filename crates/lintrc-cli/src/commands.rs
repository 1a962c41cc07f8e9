//! CLI command implementations

use lintrc_core::overrides::normalize_path;
use lintrc_core::{
    ConfigLoader, ConfigResolver, LintConfig, LintrcError, PresetRegistry, Result,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::OutputFormat;
use crate::output;

/// Options shared by every command
pub struct Context {
    pub config_path: Option<PathBuf>,
    pub preset_dirs: Vec<PathBuf>,
}

impl Context {
    fn load_config(&self) -> Result<LintConfig> {
        ConfigLoader::load(self.config_path.as_deref(), None)
    }

    fn registry(&self) -> PresetRegistry {
        let mut registry = PresetRegistry::new();
        for dir in &self.preset_dirs {
            registry.add_directory(dir);
        }
        registry
    }

    fn resolver(&self, config: &LintConfig) -> Result<ConfigResolver> {
        ConfigResolver::new(config, &self.registry())
    }
}

/// Resolve command implementation
pub fn resolve_command(
    ctx: &Context,
    paths: Vec<PathBuf>,
    format: OutputFormat,
    rules: Vec<String>,
) -> Result<()> {
    let config = ctx.load_config()?;
    let resolver = ctx.resolver(&config)?;

    // Paths on the command line are relative to the working directory, the
    // resolver expects them relative to the config directory
    let cwd = std::env::current_dir()
        .and_then(|d| d.canonicalize())
        .map_err(|e| LintrcError::io_error(".", e))?;
    let base_dir = canonical_base_dir(&config)?;
    let targets: Vec<PathBuf> = paths
        .iter()
        .map(|p| {
            let joined = if p.is_absolute() { p.clone() } else { cwd.join(p) };
            let absolute = normalize_path(&joined);
            match absolute.strip_prefix(&base_dir) {
                Ok(relative) => relative.to_path_buf(),
                Err(_) => absolute,
            }
        })
        .collect();
    debug!("Resolving {} path(s) against {}", targets.len(), base_dir.display());

    let mut results = resolver.resolve_all(&targets);
    if !rules.is_empty() {
        for effective in &mut results {
            effective.rules.retain(|name, _| rules.contains(name));
        }
    }

    let entries: Vec<(&Path, _)> = paths.iter().map(PathBuf::as_path).zip(results).collect();
    output::print_effective(&entries, format)
}

/// Validate command implementation
pub fn validate_command(ctx: &Context, path: Option<PathBuf>) -> Result<()> {
    let config_path = path.or_else(|| ctx.config_path.clone());
    debug!("Validating configuration file: {:?}", config_path);

    let config = ConfigLoader::load(config_path.as_deref(), None)?;
    let resolver = ctx.resolver(&config)?;

    output::print_validation_summary(&config, &resolver);
    Ok(())
}

/// Show command implementation
pub fn show_command(ctx: &Context, format: OutputFormat) -> Result<()> {
    let config = ctx.load_config()?;
    output::print_config_file(&config.to_file(), format)
}

/// Check-overrides command implementation
pub fn check_overrides_command(ctx: &Context, root: Option<PathBuf>, strict: bool) -> Result<()> {
    let config = ctx.load_config()?;
    let resolver = ctx.resolver(&config)?;

    let root = root.unwrap_or_else(|| config.base_dir().to_path_buf());
    let root = root
        .canonicalize()
        .map_err(|e| LintrcError::io_error(&root, e))?;
    let base_dir = canonical_base_dir(&config)?;

    let files: Vec<PathBuf> = WalkDir::new(&root)
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e.path()))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.path().strip_prefix(&base_dir).ok().map(Path::to_path_buf))
        .collect();
    info!("Checking {} override(s) against {} file(s)", resolver.overrides().len(), files.len());

    let warnings = resolver.unmatched_overrides(&files);
    output::print_override_report(resolver.overrides().len(), files.len(), &warnings);

    if strict && let Some(first) = warnings.into_iter().next() {
        return Err(first);
    }
    Ok(())
}

/// Schema command implementation
pub fn schema_command() -> Result<()> {
    let schema = LintConfig::json_schema()?;
    output::print_json(&schema)
}

fn canonical_base_dir(config: &LintConfig) -> Result<PathBuf> {
    config
        .base_dir()
        .canonicalize()
        .map_err(|e| LintrcError::io_error(config.base_dir(), e))
}

fn is_skipped_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| matches!(name, ".git" | "node_modules" | "target"))
}
