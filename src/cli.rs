use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A fast scanner and rewriter for biased terminology.
///
/// `debias` walks a file or directory tree looking for words from a
/// replacement dictionary. It can report where they occur, dump every
/// occurrence as JSON, or rewrite the files in place with case-preserving
/// substitutions, optionally confirming each one interactively.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Scan and rewrite biased terminology across a file tree",
    long_about = "debias - scan files for words from a replacement dictionary and report or rewrite them.

The dictionary is a JSON (or YAML) document mapping each trigger word to an
ordered list of replacement candidates:

  { \"master\": [\"primary\", \"controller\"], \"blacklist\": [\"denylist\"] }

QUICK EXAMPLES:
  debias summary -w words.json src/        # Per-file occurrence counts
  debias dump -w words.json --verbose src/ # Every occurrence, as JSON
  debias replace -w words.json src/        # Rewrite with the first candidate
  debias replace -w words.json -i src/     # Confirm each occurrence

For detailed help on any command, use: debias <command> --help"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

/// The set of available commands for the `debias` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print per-file occurrence counts and write them to a summary document
    ///
    /// EXAMPLES:
    ///   debias summary src/                    # Counts for every file under src/
    ///   debias summary -w words.yaml README.md # Single file, YAML dictionary
    ///   debias summary -o report.json src/     # Custom output path
    Summary {
        /// Path to the dictionary file mapping words to replacement candidates.
        #[arg(short, long, default_value = "words.json")]
        words: PathBuf,

        /// Path to write the summary document to (overwritten on every run).
        #[arg(short, long, default_value = "summary.json")]
        output: PathBuf,

        /// The number of parallel worker threads to use. Defaults to the number of logical CPU cores.
        #[arg(short = 'W', long = "workers", env = "DEBIAS_WORKERS")]
        workers: Option<usize>,

        /// The file or directory to scan.
        path: PathBuf,
    },

    /// Dump every occurrence as structured JSON
    ///
    /// EXAMPLES:
    ///   debias dump src/              # One record per (line, word) pair
    ///   debias dump --verbose src/    # Include the raw line text per record
    ///   debias dump -o hits.json src/ # Custom output path
    Dump {
        /// Path to the dictionary file mapping words to replacement candidates.
        #[arg(short, long, default_value = "words.json")]
        words: PathBuf,

        /// Path to write the results document to (overwritten on every run).
        #[arg(short, long, default_value = "results.json")]
        output: PathBuf,

        /// Include the raw line text in each occurrence record.
        #[arg(short, long)]
        verbose: bool,

        /// The number of parallel worker threads to use.
        #[arg(short = 'W', long = "workers", env = "DEBIAS_WORKERS")]
        workers: Option<usize>,

        /// The file or directory to scan.
        path: PathBuf,
    },

    /// Rewrite files in place with case-preserving substitutions
    ///
    /// Without --interactive every occurrence is replaced by the first
    /// candidate. With --interactive each occurrence asks which candidate to
    /// use (any non-numeric or out-of-range answer skips it), and each file
    /// asks for confirmation before being written. A file where nothing was
    /// accepted is never touched.
    ///
    /// EXAMPLES:
    ///   debias replace src/       # Replace everything with the first candidate
    ///   debias replace -i src/    # Choose per occurrence, confirm per file
    Replace {
        /// Path to the dictionary file mapping words to replacement candidates.
        #[arg(short, long, default_value = "words.json")]
        words: PathBuf,

        /// Confirm every replacement interactively.
        #[arg(short, long)]
        interactive: bool,

        /// The number of parallel worker threads to use (non-interactive mode only).
        #[arg(short = 'W', long = "workers", env = "DEBIAS_WORKERS")]
        workers: Option<usize>,

        /// The file or directory to rewrite.
        path: PathBuf,
    },
}

/// Parses command-line arguments and returns the populated `Args` struct.
pub fn parse_args() -> Args {
    Args::parse()
}
