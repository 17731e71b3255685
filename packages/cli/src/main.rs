#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the street-sweeper address parser.
//!
//! Each input is forwarded to [`street_sweeper::parse`] (or the explicit
//! intersection parse) and printed as one line of JSON, `null` when no
//! address was found. The exit code is `1` if any input failed to parse.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use street_sweeper::{ParseOptions, ParsedLocation, TableKind, options};

// ---------------------------------------------------------------------------
// CLI definitions
// ---------------------------------------------------------------------------

/// Parse free-form North American addresses into structured fields.
#[derive(Parser)]
#[command(name = "street_sweeper")]
#[command(about = "Parse free-form North American addresses into structured fields")]
struct Cli {
    #[command(flatten)]
    options: OptionArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Parse options, merged in order: file, `--option` pairs, flags.
#[derive(Args)]
struct OptionArgs {
    /// TOML file with parse options.
    #[arg(long = "options", value_name = "FILE", global = true)]
    options_file: Option<PathBuf>,

    /// Sets one option (e.g. `informal=true`). May be repeated.
    #[arg(long = "option", value_name = "KEY=VALUE", global = true)]
    overrides: Vec<String>,

    /// Fall back to the informal grammar.
    #[arg(long, global = true)]
    informal: bool,

    /// Drop a street type the street name already embeds.
    #[arg(long, global = true)]
    avoid_redundant_street_type: bool,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Parse addresses or intersections.
    Parse {
        /// Address strings to parse.
        addresses: Vec<String>,

        /// Read one address per line from stdin.
        #[arg(long)]
        stdin: bool,
    },

    /// Parse intersections only.
    Intersection {
        /// Intersection strings to parse.
        inputs: Vec<String>,
    },

    /// Print the canonical form of a token from one normalization table.
    Normalize {
        /// Table to look in (street-type, directional, unit-designator, state).
        table: TableKind,

        /// Token to normalize.
        token: String,
    },
}

impl OptionArgs {
    fn load(&self) -> Result<ParseOptions, Box<dyn std::error::Error>> {
        let base = match &self.options_file {
            Some(path) => options::from_toml_str(&std::fs::read_to_string(path)?)?,
            None => ParseOptions::default(),
        };
        let pairs = self
            .overrides
            .iter()
            .map(|pair| options::parse_pair(pair))
            .collect::<Result<Vec<_>, _>>()?;

        let mut loaded = options::from_pairs(base, pairs)?;
        loaded.informal |= self.informal;
        loaded.avoid_redundant_street_type |= self.avoid_redundant_street_type;
        log::debug!("parse options: {loaded:?}");
        Ok(loaded)
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    init_logger();
    let cli = Cli::parse();
    let options = cli.options.load()?;
    let pretty = cli.options.pretty;

    match cli.command {
        Commands::Parse { addresses, stdin } => {
            let inputs = if stdin { read_lines(io::stdin().lock())? } else { addresses };
            let results = inputs
                .iter()
                .map(|input| street_sweeper::parse(input, &options));
            emit(results, pretty)
        }
        Commands::Intersection { inputs } => {
            let results = inputs.iter().map(|input| {
                street_sweeper::parse_intersection(input, &options)
                    .map(ParsedLocation::Intersection)
            });
            emit(results, pretty)
        }
        Commands::Normalize { table, token } => {
            if let Some(canonical) = street_sweeper::normalize(table, &token) {
                println!("{canonical}");
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("`{token}` is not in the {table} table");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

/// Installs `pretty_env_logger`, configured from `RUST_LOG`.
fn init_logger() {
    pretty_env_logger::formatted_builder()
        .parse_env("RUST_LOG")
        .try_init()
        .ok();
}

/// Non-blank lines, trimmed.
fn read_lines(reader: impl BufRead) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
    Ok(lines)
}

/// Prints one JSON value per result. Fails the exit code if any result is
/// empty.
fn emit(
    results: impl Iterator<Item = Option<ParsedLocation>>,
    pretty: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut stdout = io::stdout().lock();
    let mut all_found = true;

    for result in results {
        all_found &= result.is_some();
        let json = if pretty {
            serde_json::to_string_pretty(&result)?
        } else {
            serde_json::to_string(&result)?
        };
        writeln!(stdout, "{json}")?;
    }

    Ok(if all_found {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
