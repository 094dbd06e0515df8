use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the survey pipeline.
///
/// Only load-level failures live here: a dataset that cannot be read or
/// parsed halts the run with no partial statistics. Row-level problems
/// (missing age, non-numeric spending, unmatched labels) are contained by
/// the pipeline and never surface as errors.
#[derive(Error, Debug)]
pub enum SurveyError {
    /// A dataset file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV document could not be parsed.
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// The expected data directory does not exist.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// No CSV survey files were found under the given directory.
    #[error("No CSV files found in {0}")]
    NoDataFiles(PathBuf),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the survey crates.
pub type Result<T> = std::result::Result<T, SurveyError>;
