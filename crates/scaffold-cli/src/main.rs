//! # scaffold-cli
//!
//! Command-line front end for the declarative mapper.
//!
//! Loads a scheme definition, maps JSON data with it, and writes the result
//! to a file or stdout.

mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use scaffold_application::{Mapper, SchemeDefinition, TransformRegistry};
use scaffold_core::logger::{init_logging, log_panics, scoped};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "scaffold")]
#[command(about = "Map JSON data with declarative schemes")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map a JSON file with a scheme definition
    Map {
        /// Input JSON file path
        input: PathBuf,

        /// Output file path; stdout when omitted
        output: Option<PathBuf>,

        /// Scheme definition file path (YAML or JSON)
        #[arg(short, long)]
        scheme: PathBuf,
    },

    /// Check that a scheme definition loads and compiles
    Check {
        /// Scheme definition file path (YAML or JSON)
        #[arg(short, long)]
        scheme: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;
    init_logging(&config.logging)?;
    log_panics();

    match cli.command {
        Commands::Map {
            input,
            output,
            scheme,
        } => {
            let _span = scoped("map").entered();
            run_map(&input, output.as_deref(), &scheme, config.pretty)
        }
        Commands::Check { scheme } => {
            let _span = scoped("check").entered();
            run_check(&scheme)
        }
    }
}

fn run_map(input: &Path, output: Option<&Path>, scheme: &Path, pretty: bool) -> anyhow::Result<()> {
    info!("Mapping {} with {}", input.display(), scheme.display());

    let scheme = SchemeDefinition::parse_file(scheme)?.compile(&TransformRegistry::with_builtins())?;
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read input {}", input.display()))?;
    let data: Value = serde_json::from_str(&content)
        .with_context(|| format!("input {} is not valid JSON", input.display()))?;

    let mapped = Mapper::map(&data, &scheme).into_result()?;

    let rendered = if pretty {
        serde_json::to_string_pretty(&mapped)?
    } else {
        serde_json::to_string(&mapped)?
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write output {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn run_check(scheme: &Path) -> anyhow::Result<()> {
    let compiled = SchemeDefinition::parse_file(scheme)?.compile(&TransformRegistry::with_builtins())?;
    info!("Scheme {} has {} entries", scheme.display(), compiled.len());
    for (field, entry) in compiled.iter() {
        println!("{field}: {entry}");
    }
    Ok(())
}
