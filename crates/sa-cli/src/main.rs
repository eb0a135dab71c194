//! CLI entry point for the sa-modelgen tool.
//!
//! This binary converts a relational-schema snapshot (JSON export of
//! tables, columns, indices, and foreign keys) into SQLAlchemy declarative
//! model source.
//!
//! # Usage
//!
//! ```bash
//! sa-modelgen [OPTIONS] <COMMAND>
//!
//! # Generate models to stdout
//! sa-modelgen generate --schema schema.json
//!
//! # Generate models into a file
//! sa-modelgen generate --schema schema.json --output models.py
//!
//! # Resolve every column type and print a summary without emitting code
//! sa-modelgen check --schema schema.json
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use sa_core::{GenConfig, Schema};
use sa_model::{Exporter, FileSink, GenContext, StdoutSink, TableModel};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// CLI tool for generating SQLAlchemy models from a schema snapshot.
///
/// Reads a JSON schema export and renders one declarative model class per
/// table, including relationships derived from single-column foreign keys.
#[derive(Parser)]
#[command(name = "sa-modelgen", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Path to the schema snapshot JSON file.
    ///
    /// Defaults to `./schema.json` if not specified.
    #[arg(short, long, global = true, env = "SA_MODELGEN_SCHEMA")]
    schema: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Generate model source from the schema snapshot.
    Generate {
        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },

    /// Resolve all column types and print a summary without emitting code.
    Check,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
///
/// # Arguments
///
/// * `verbose` - Enable debug-level logging
/// * `no_color` - Disable ANSI colors in output
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(level)
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_ansi(use_ansi))
        .with(filter)
        .init();
}

/// Loads and parses the schema snapshot from disk.
///
/// # Errors
///
/// Returns an error if the path does not exist, is not a file, or does not
/// parse as a schema snapshot.
fn load_schema(cli: &Cli) -> color_eyre::Result<Schema> {
    let path = cli
        .schema
        .clone()
        .unwrap_or_else(|| Utf8PathBuf::from("./schema.json"));

    if !path.exists() {
        return Err(color_eyre::eyre::eyre!("Schema file does not exist: {}", path));
    }
    if !path.is_file() {
        return Err(color_eyre::eyre::eyre!("Schema path is not a file: {}", path));
    }

    let contents = std::fs::read_to_string(path.as_std_path())?;
    Schema::from_json(&contents)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to parse schema {}: {}", path, e))
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Generates model source and delivers it to a file or stdout.
///
/// # Errors
///
/// Returns an error if generation or delivery fails.
fn run_generate(schema: &Schema, output: Option<Utf8PathBuf>) -> color_eyre::Result<()> {
    info!(schema = %schema.name, tables = schema.tables.len(), "Generating models");

    let exporter = Exporter::new(GenConfig::default());
    match output {
        Some(path) => {
            let mut sink = FileSink::new(path.clone());
            exporter.export_to(schema, &mut sink)?;
            info!(path = %path, "Models written");
        }
        None => {
            let mut sink = StdoutSink;
            exporter.export_to(schema, &mut sink)?;
        }
    }

    Ok(())
}

/// Resolves every column type and prints a per-table summary.
///
/// # Errors
///
/// Returns an error if any column type fails to resolve - the same failure
/// mode a generation run would hit.
fn run_check(schema: &Schema) -> color_eyre::Result<()> {
    info!(schema = %schema.name, "Checking schema");

    let mut ctx = GenContext::new(GenConfig::default());
    let mut models = Vec::with_capacity(schema.tables.len());
    for table in &schema.tables {
        let model = TableModel::build(table, schema.default_charset.as_deref(), &mut ctx)?;
        models.push((table.name.clone(), model));
    }

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let _ = writeln!(handle);
    let _ = writeln!(handle, "Schema Check Summary");
    let _ = writeln!(handle, "====================");
    let _ = writeln!(handle);
    let _ = writeln!(handle, "Tables: {}", models.len());
    for (table_name, model) in &models {
        let _ = writeln!(
            handle,
            "  {table_name} -> {} ({} columns)",
            model.class_name(),
            model.columns().len()
        );
    }
    let _ = writeln!(handle);
    let _ = writeln!(
        handle,
        "Native types used:   {}",
        ctx.registry.native_types().join(", ")
    );
    let _ = writeln!(
        handle,
        "Portable types used: {}",
        ctx.registry.portable_types().join(", ")
    );
    if !ctx.mixins().is_empty() {
        let _ = writeln!(handle, "Mixins referenced:   {}", ctx.mixins().join(", "));
    }

    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Route to appropriate command
    let schema = load_schema(&cli)?;
    match cli.command {
        Commands::Generate { output } => run_generate(&schema, output),
        Commands::Check => run_check(&schema),
    }
}
