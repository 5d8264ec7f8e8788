use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in the `debias` application.
///
/// This enum uses `thiserror` to neatly wrap various kinds of errors that can occur,
/// from I/O issues to dictionary parsing problems.
#[derive(Error, Debug)]
pub enum Error {
    /// The dictionary document could not be parsed into a word -> candidates
    /// mapping, or an entry carried an empty candidate list.
    #[error("invalid dictionary: {0}")]
    InvalidDictionary(String),

    /// The root input path does not exist.
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// The root input path exists but cannot be accessed.
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// A file could not be read as line-oriented text (binary content or
    /// invalid UTF-8). Per-file; callers decide whether to skip or abort.
    #[error("unreadable file {}: {reason}", .path.display())]
    UnreadableFile { path: PathBuf, reason: String },

    /// The interactive prompt channel (stdin) closed mid-run. Remaining files
    /// are abandoned; files already written stay written.
    #[error("prompt channel closed")]
    PromptClosed,

    /// An error related to file system I/O.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An error that occurred during regex compilation.
    #[error("Pattern compilation failed: {0}")]
    Regex(#[from] regex::Error),

    /// An error that occurred while parsing a YAML dictionary file.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An error related to JSON serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A general configuration-related error.
    #[error("Config error: {0}")]
    Config(String),

    /// An error from the `walkdir` crate during directory traversal.
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// An error that occurred while building the Rayon thread pool.
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// An error related to persisting a temporary file.
    #[error("Tempfile error: {0}")]
    TempFile(#[from] tempfile::PersistError),
}

/// A convenient type alias for `Result<T, debias::errors::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Config(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Config(s.to_string())
    }
}
