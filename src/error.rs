use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for transfo operations
#[derive(Error, Debug)]
pub enum TransfoError {
    /// IO error when reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Source file missing or not a regular file. The concatenation engine
    /// downgrades this to a warning and skips the file; callers reading
    /// sources directly see it as an error.
    #[error("Source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Destination could not be created or written. Always fatal.
    #[error("Failed to write {path}: {source}")]
    Destination { path: PathBuf, source: io::Error },

    /// A user-supplied content processor rejected a file. Always fatal.
    #[error("Processor failed on {path}: {message}")]
    Processor { path: PathBuf, message: String },

    /// Regex compilation error
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// `WalkDir` error when traversing directories
    #[error("Directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Invalid exclusion glob
    #[error("Glob error: {0}")]
    Glob(#[from] globset::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TransfoError>;
