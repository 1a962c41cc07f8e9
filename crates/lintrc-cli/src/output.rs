//! Output formatting and reporting
//!
//! Renders effective configurations and command summaries as colored text,
//! JSON or YAML

use colored::*;
use lintrc_core::{
    ConfigFile, ConfigResolver, EffectiveConfig, LintConfig, LintrcError, Result, Severity,
};
use serde::Serialize;
use std::path::Path;

use crate::OutputFormat;

/// Print effective configurations, one entry per requested path
pub fn print_effective(entries: &[(&Path, EffectiveConfig)], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            for (path, effective) in entries {
                print_effective_human(path, effective);
            }
            Ok(())
        }
        OutputFormat::Json => {
            let value = keyed_by_path(entries)?;
            print_json(&value)
        }
        OutputFormat::Yaml => {
            let value = keyed_by_path(entries)?;
            print_yaml(&value)
        }
    }
}

fn keyed_by_path(
    entries: &[(&Path, EffectiveConfig)],
) -> Result<serde_json::Map<String, serde_json::Value>> {
    entries
        .iter()
        .map(|(path, effective)| {
            let value = serde_json::to_value(effective)
                .map_err(|e| LintrcError::config_error("<output>", e.to_string()))?;
            Ok((path.display().to_string(), value))
        })
        .collect()
}

fn print_effective_human(path: &Path, effective: &EffectiveConfig) {
    println!("{}", path.display().to_string().bold().underline());

    match &effective.path {
        Some(relative) => println!("  {} {}", "relative:".dimmed(), relative),
        None => println!(
            "  {} {}",
            "relative:".dimmed(),
            "outside config directory, base config applies".yellow()
        ),
    }

    if effective.matched_overrides.is_empty() {
        println!("  {} none", "overrides:".dimmed());
    } else {
        println!(
            "  {} {}",
            "overrides:".dimmed(),
            effective.matched_overrides.join(", ").cyan()
        );
    }

    let envs: Vec<&str> = effective.env.enabled().collect();
    if !envs.is_empty() {
        println!("  {} {}", "env:".dimmed(), envs.join(", "));
    }

    if !effective.parser_options.is_empty() {
        let raw = effective.parser_options.to_raw();
        let rendered: Vec<String> = raw.iter().map(|(k, v)| format!("{k}={v}")).collect();
        println!("  {} {}", "parserOptions:".dimmed(), rendered.join(" "));
    }

    if effective.rules.is_empty() {
        println!("  {} none", "rules:".dimmed());
    } else {
        println!("  {}", "rules:".dimmed());
        for (name, setting) in &effective.rules {
            let severity = colorize_severity(setting.severity());
            if setting.options().is_empty() {
                println!("    {name}: {severity}");
            } else {
                let options: Vec<String> = setting.options().iter().map(|o| o.to_string()).collect();
                println!("    {name}: {severity} {}", options.join(" ").dimmed());
            }
        }
    }
    println!();
}

fn colorize_severity(severity: Severity) -> ColoredString {
    match severity {
        Severity::Off => severity.as_str().dimmed(),
        Severity::Warn => severity.as_str().yellow(),
        Severity::Error => severity.as_str().red().bold(),
    }
}

/// Print the outcome of a successful validation
pub fn print_validation_summary(config: &LintConfig, resolver: &ConfigResolver) {
    println!("{} Configuration is valid", "✓".green().bold());
    println!("  {} {}", "directory:".dimmed(), config.base_dir().display());
    if resolver.presets().is_empty() {
        println!("  {} none", "presets:".dimmed());
    } else {
        println!("  {} {}", "presets:".dimmed(), resolver.presets().join(" -> "));
    }
    let base = resolver.base();
    println!(
        "  {} {} ({} enabled)",
        "rules:".dimmed(),
        base.rules.len(),
        base.enabled_rules().count()
    );
    println!("  {} {}", "overrides:".dimmed(), resolver.overrides().len());
}

/// Print a normalised configuration file
pub fn print_config_file(file: &ConfigFile, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Yaml => print_yaml(file),
        OutputFormat::Human | OutputFormat::Json => print_json(file),
    }
}

/// Print the override coverage report
pub fn print_override_report(overrides: usize, files: usize, warnings: &[LintrcError]) {
    for warning in warnings {
        println!("{} {}", "warning:".yellow().bold(), warning);
    }
    if warnings.is_empty() {
        println!(
            "{} All {} override(s) match at least one of {} file(s)",
            "✓".green().bold(),
            overrides,
            files
        );
    } else {
        println!(
            "{} of {} override(s) match no files",
            warnings.len().to_string().yellow().bold(),
            overrides
        );
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| LintrcError::config_error("<output>", e.to_string()))?;
    println!("{json}");
    Ok(())
}

pub fn print_yaml<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let yaml = serde_yaml::to_string(value)
        .map_err(|e| LintrcError::config_error("<output>", e.to_string()))?;
    print!("{yaml}");
    Ok(())
}
