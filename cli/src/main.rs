//! Vintry command-line interface
//!
//! The `vintry` binary drives a cellar file through the shared library:
//! initialize, stock, rate, list, sort, and export. All user-facing
//! text and exit codes live here; the library only reports errors.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;
mod seed;

#[derive(Parser)]
#[command(name = "vintry", version, about = "Manage a wine cellar kept in a flat text file")]
struct Args {
    /// Cellar file path ('-' reads standard input for read-only commands)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Field separator character
    #[arg(short, long, global = true)]
    separator: Option<char>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an empty cellar file
    Init {
        /// Replace an existing cellar file
        #[arg(long)]
        force: bool,

        /// Populate the new cellar with a demonstration collection
        #[arg(long)]
        seed: bool,
    },

    /// Add a wine to the cellar
    Add {
        /// Wine color: red, white, rose, or sparkling
        color: String,
        appellation: String,
        /// Four-digit vintage year
        vintage: String,
        name: String,
        /// Price with two decimals, like 19.99
        price: String,
    },

    /// List wines, optionally filtered
    List {
        /// Display template (defaults to the long form)
        #[arg(short, long)]
        template: Option<String>,

        /// Only wines that have been rated
        #[arg(long, conflicts_with = "unrated")]
        rated: bool,

        /// Only wines that have not been rated
        #[arg(long)]
        unrated: bool,

        /// Case-insensitive pattern the listing line must match
        #[arg(short, long)]
        pattern: Option<String>,
    },

    /// Rate a wine, exactly once
    Rate {
        id: u32,
        /// Rating between 0 and 5
        rating: u8,
        comment: String,
    },

    /// Remove an unrated wine
    Remove { id: u32 },

    /// List wines in sorted order
    Sort {
        /// Comma-separated sort keys, e.g. color,price
        #[arg(short, long, value_delimiter = ',')]
        keys: Vec<String>,

        /// Reverse the whole ordering
        #[arg(short, long)]
        reverse: bool,

        /// Display template (defaults to the long form)
        #[arg(short, long)]
        template: Option<String>,
    },

    /// Export the cellar as JSON or CSV
    Export {
        #[arg(long, value_enum, default_value = "json")]
        format: ExportArg,

        /// Write to a file instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportArg {
    Json,
    Csv,
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.debug);

    match commands::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
