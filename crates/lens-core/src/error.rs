use std::path::PathBuf;
use thiserror::Error;

use crate::genres::GenreParseError;

/// All errors produced by the Streamlens pipeline.
#[derive(Error, Debug)]
pub enum LensError {
    /// A dataset file could not be opened or read from disk.
    #[error("Failed to read dataset {path}: {source}")]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A delimited-text document could not be parsed.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A dataset could not be loaded at all; the pipeline stops before the join.
    #[error("The {0} dataset is unavailable; nothing to analyze")]
    SourceUnavailable(String),

    /// A table has neither a `show_id` nor an `id` column to join on.
    #[error("No 'show_id' or 'id' column in the {table} table")]
    MissingJoinKey { table: String },

    /// A column required by one of the aggregate views is absent.
    #[error("Required column '{0}' is missing from the joined table")]
    MissingColumn(String),

    /// A genre field's textual form was rejected by the restricted parser.
    #[error(transparent)]
    Genre(#[from] GenreParseError),

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

/// Convenience alias used throughout the lens crates.
pub type Result<T> = std::result::Result<T, LensError>;
