//! The main entry point for the `debias` command-line application.
//!
//! This file is responsible for parsing command-line arguments and dispatching
//! to the appropriate subcommand handler in the `debias` library.

use debias::cli::{self, Commands};
use debias::errors::Result;
use debias::{aggregate, replacer};
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Parses arguments and executes the corresponding command.
fn run() -> Result<()> {
    let args = cli::parse_args();

    match args.command {
        Commands::Summary {
            words,
            output,
            workers,
            path,
        } => aggregate::run_summary(words, path, output, workers),
        Commands::Dump {
            words,
            output,
            verbose,
            workers,
            path,
        } => aggregate::run_dump(words, path, output, verbose, workers),
        Commands::Replace {
            words,
            interactive,
            workers,
            path,
        } => replacer::run_replace(words, path, interactive, workers),
    }
}
