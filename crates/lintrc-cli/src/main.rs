//! lintrc CLI
//!
//! Command-line interface for loading, validating and resolving linter
//! configurations

mod commands;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use lintrc_core::{Result, init_tracing};
use std::io;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "lintrc")]
#[command(about = "lintrc: resolve the effective linter configuration for each file")]
#[command(version = lintrc_core::VERSION)]
#[command(
    long_about = "lintrc loads a linter configuration file, expands its presets and\n\
applies path-scoped overrides to show exactly which rules apply to a file.\n\
\n\
Examples:\n  \
lintrc resolve src/index.js          # Effective config for one file\n  \
lintrc resolve --rule semi tests/*.js  # One rule across several files\n  \
lintrc validate                      # Check the discovered config\n  \
lintrc check-overrides .             # Find overrides that match nothing\n  \
lintrc schema > lintrc.schema.json   # Emit the JSON Schema"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        help = "Path to configuration file (default: search upward for .lintrc.*)"
    )]
    config: Option<PathBuf>,

    /// Directories to search for named presets
    #[arg(
        long = "preset-dir",
        global = true,
        env = "LINTRC_PRESET_DIR",
        value_delimiter = ',',
        help = "Directory containing preset files (can be used multiple times)"
    )]
    preset_dirs: Vec<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Generate shell completion script
    #[arg(
        long,
        value_enum,
        help = "Generate completion script for specified shell"
    )]
    generate_completion: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective configuration for files
    Resolve {
        /// Files to resolve
        #[arg(required = true, help = "Files to resolve (relative to the config directory)")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Only show the given rules
        #[arg(long = "rule", help = "Limit output to a rule (can be used multiple times)")]
        rules: Vec<String>,
    },

    /// Validate the configuration and its presets
    Validate {
        /// Path to configuration file to validate
        #[arg(help = "Path to configuration file (default: --config or discovery)")]
        path: Option<PathBuf>,
    },

    /// Show the loaded configuration in normalised form
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Report overrides whose patterns match no file under a directory
    CheckOverrides {
        /// Directory to scan
        #[arg(help = "Directory to scan (default: the config directory)")]
        root: Option<PathBuf>,

        /// Fail when any override matches nothing
        #[arg(long, help = "Exit with an error if any override is unmatched")]
        strict: bool,
    },

    /// Print the JSON Schema of the configuration format
    Schema,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON format for programmatic consumption
    Json,
    /// YAML format
    Yaml,
}

fn main() {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.generate_completion {
        generate_completion_script(shell);
        return;
    }

    // Initialize colored output
    if !cli.no_color && std::env::var("NO_COLOR").is_err() {
        colored::control::set_override(true);
    } else {
        colored::control::set_override(false);
    }

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "lintrc=error", // Only errors by default
        1 => "lintrc=warn",  // Warnings on first -v
        2 => "lintrc=info",  // Info on -vv
        3 => "lintrc=debug", // Debug on -vvv
        _ => "lintrc=trace", // Trace on -vvvv+
    };
    // SAFETY: single-threaded at this point; nothing else reads the environment yet
    unsafe {
        std::env::set_var("RUST_LOG", log_level);
    }
    init_tracing();

    if let Err(e) = run_command(cli) {
        error!("lintrc failed: {}", e);
        std::process::exit(1);
    }
}

fn generate_completion_script(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn run_command(cli: Cli) -> Result<()> {
    let ctx = commands::Context {
        config_path: cli.config,
        preset_dirs: cli.preset_dirs,
    };

    match cli.command {
        Some(Commands::Resolve {
            paths,
            format,
            rules,
        }) => commands::resolve_command(&ctx, paths, format, rules),
        Some(Commands::Validate { path }) => commands::validate_command(&ctx, path),
        Some(Commands::Show { format }) => commands::show_command(&ctx, format),
        Some(Commands::CheckOverrides { root, strict }) => {
            commands::check_overrides_command(&ctx, root, strict)
        }
        Some(Commands::Schema) => commands::schema_command(),
        None => {
            let mut cmd = Cli::command();
            cmd.print_help()
                .map_err(|e| lintrc_core::LintrcError::io_error("<stdout>", e))?;
            println!();
            Ok(())
        }
    }
}
