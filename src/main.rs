//! collection-cmp: key-based diff of JSON record collections
//!
//! Compares a base and a working document of records and classifies every
//! key as removed, added, updated or unchanged.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use collection_cmp::{
    cli,
    config::{
        discover_config_file, generate_json_schema, load_or_default, search_dirs, AppConfig,
        BehaviorConfig, CheckKeysConfig, DiffConfig, DiffPaths, ExplicitChoices, MatchingConfig,
        OutputConfig, CONFIG_FILE_NAMES,
    },
    pipeline::exit_codes,
    reports::ReportFormat,
    CollisionPolicy,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nInput:",
        "\n  JSON documents holding an array of objects",
        "\n\nOutput Formats:",
        "\n  summary, table, json",
        "\n\nCollision Policies:",
        "\n  first-wins (default), fail-fast"
    )
}

#[derive(Parser)]
#[command(name = "collection-cmp")]
#[command(version, long_version = build_long_version())]
#[command(about = "Key-based diff of JSON record collections", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No changes detected (or no --fail-on-* flag set)
    1  Changes detected with --fail-on-change / --fail-on-difference,
       or colliding keys found by check-keys
    3  Error occurred

EXAMPLES:
    # Compare two exports by id, deciding updates on price and stock
    collection-cmp diff old.json new.json --key id --eq price --eq stock

    # Keys named differently on each side
    collection-cmp diff stored.json feed.json --key sku --working-key code

    # CI check that fails on any change
    collection-cmp diff old.json new.json --key id --fail-on-change -o json

    # Verify a document has unique keys before comparing it
    collection-cmp check-keys new.json --key id --key region")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Path to the base record document
    base: PathBuf,

    /// Path to the working record document
    working: PathBuf,

    /// Key field (dotted path); repeat for a composite key
    #[arg(short, long = "key", value_name = "FIELD")]
    key: Vec<String>,

    /// Key field for the base side only, overriding --key
    #[arg(long = "base-key", value_name = "FIELD")]
    base_key: Vec<String>,

    /// Key field for the working side only, overriding --key
    #[arg(long = "working-key", value_name = "FIELD")]
    working_key: Vec<String>,

    /// Field compared to decide updates; repeat for several (default: whole record)
    #[arg(short, long = "eq", value_name = "FIELD")]
    eq: Vec<String>,

    /// Working-side counterpart of each --eq field, in the same order
    #[arg(long = "working-eq", value_name = "FIELD")]
    working_eq: Vec<String>,

    /// What to do with records sharing a key (first-wins, fail-fast)
    #[arg(long, value_parser = parse_collision_policy)]
    collision: Option<CollisionPolicy>,

    /// Partition both documents concurrently
    #[arg(long)]
    parallel: bool,

    /// Output format
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Include unchanged records in output
    #[arg(long)]
    include_unchanged: bool,

    /// Maximum records listed per change kind in text reports
    #[arg(long, value_name = "N")]
    max_items: Option<usize>,

    /// Report counts only, without listing records
    #[arg(long)]
    summary_only: bool,

    /// Exit with code 1 if any record was added, removed or updated
    #[arg(long)]
    fail_on_change: bool,

    /// Exit with code 1 if any record was added or removed
    #[arg(long)]
    fail_on_difference: bool,
}

/// Arguments for the `check-keys` subcommand
#[derive(Parser)]
struct CheckKeysArgs {
    /// Path to the record document
    file: PathBuf,

    /// Key field (dotted path); defaults to the configured base key fields
    #[arg(short, long = "key", value_name = "FIELD")]
    key: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two record documents by key
    Diff(DiffArgs),

    /// Check that a record document has no colliding keys
    CheckKeys(CheckKeysArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or discover configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
}

fn parse_collision_policy(value: &str) -> Result<CollisionPolicy, String> {
    CollisionPolicy::from_name(value)
        .ok_or_else(|| format!("unknown collision policy '{value}' (first-wins, fail-fast)"))
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match run(cli) {
        Ok(exit_codes::SUCCESS) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Dispatch to command handlers, returning the process exit code.
fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Diff(args) => {
            let choices = ExplicitChoices {
                collision_policy: args.collision,
                format: args.output,
            };
            let overrides = AppConfig {
                matching: MatchingConfig {
                    key_fields: args.key,
                    base_key_fields: args.base_key,
                    working_key_fields: args.working_key,
                    equality_fields: args.eq,
                    working_equality_fields: args.working_eq,
                    collision_policy: args.collision.unwrap_or_default(),
                    parallel: args.parallel,
                },
                output: OutputConfig {
                    format: args.output.unwrap_or_default(),
                    file: args.output_file,
                    no_color: cli.no_color,
                    include_unchanged: args.include_unchanged,
                    max_items: args.max_items,
                    summary_only: args.summary_only,
                },
                behavior: BehaviorConfig {
                    fail_on_change: args.fail_on_change,
                    fail_on_difference: args.fail_on_difference,
                    quiet: cli.quiet,
                },
            };

            let (mut app, loaded_from) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
            if let Some(path) = &loaded_from {
                tracing::debug!("Loaded config from {}", path.display());
            }
            app.apply_choices(&choices);

            let config = DiffConfig::from_app(
                DiffPaths {
                    base: args.base,
                    working: args.working,
                },
                app,
            );
            cli::run_diff(config)
        }

        Commands::CheckKeys(args) => {
            let key_fields = if args.key.is_empty() {
                let (app, _) = load_or_default(cli.config.as_deref());
                app.matching.base_keys().to_vec()
            } else {
                args.key
            };

            cli::run_check_keys(CheckKeysConfig {
                path: args.file,
                key_fields,
                quiet: cli.quiet,
            })
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "collection-cmp", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = generate_json_schema()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Path => {
                eprintln!("Config file search paths (in order):");
                for dir in search_dirs() {
                    eprintln!("  {}", dir.display());
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}
