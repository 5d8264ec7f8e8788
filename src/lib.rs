//! `debias` is a library for scanning and rewriting biased terminology in file trees.
//!
//! It provides the core logic for the `debias` command-line tool but can also be
//! used as a standalone library. The main components are:
//!
//! - `Dictionary`: loads and validates the word -> candidates mapping that
//!   drives every scan and replacement.
//! - `WordMatcher`: case-insensitive substring detection of dictionary words,
//!   one `RegexSet` gate plus per-word finder regexes.
//! - `Replacer`: case-preserving in-place replacement, automatic or gated by
//!   an interactive per-occurrence prompt.
//! - `Aggregator`: the read-only reporting side, producing per-file summary
//!   counts and structured occurrence dumps.
//! - `fileset` / `lines` / `writer`: path resolution, line splitting that
//!   round-trips exactly, and atomic file rewrites.
//!
//! Scanning and automatic replacement run in parallel with Rayon; interactive
//! replacement is strictly sequential because stdin can only service one
//! prompt at a time.

pub mod aggregate;
pub mod cli;
pub mod dictionary;
pub mod errors;
pub mod fileset;
pub mod lines;
pub mod matcher;
pub mod prompt;
pub mod replacer;
pub mod writer;

// Re-export main types for easier access by library users.
pub use aggregate::{Aggregator, Occurrence};
pub use dictionary::Dictionary;
pub use errors::{Error, Result};
pub use matcher::WordMatcher;
pub use prompt::{Prompter, StdinPrompter};
pub use replacer::Replacer;
