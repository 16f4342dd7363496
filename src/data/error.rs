use std::path::PathBuf;

use thiserror::Error;

/// Failure of a whole load call. No partial collection is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    /// None of the configured sources exists.
    #[error("no card list found ({} candidate path(s) checked)", .searched.len())]
    NotFound { searched: Vec<PathBuf> },

    /// A source exists but could not be read as a card list.
    #[error("failed to read {label} card list {}", .path.display())]
    Read {
        label: String,
        path: PathBuf,
        #[source]
        source: ReadError,
    },
}

/// Why a single present source could not be read.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("cannot open file")]
    Open(#[source] std::io::Error),

    #[error("malformed CSV")]
    Csv(#[from] csv::Error),

    #[error("missing header row")]
    MissingHeader,
}
