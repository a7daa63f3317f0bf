use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions for a ranking run.
///
/// Per-cell problems (a non-numeric score, a malformed follower count) are not
/// errors; they surface as absent values rendered `"N/A"`.
#[derive(Debug, Error)]
pub enum RankingError {
    /// A required input file does not exist.
    #[error("File not found: {name}")]
    MissingSource { name: String, path: PathBuf },

    /// A required input file exists but could not be read as CSV.
    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: csv::Error,
    },

    /// A required input file lacks a column the pipeline needs.
    #[error("{name} is missing required column '{column}'")]
    MissingColumn { name: String, column: String },

    #[error("weight must be between 0.0 and 1.0, got {0}")]
    InvalidWeight(f64),

    #[error("failed to write output: {0}")]
    Write(#[from] csv::Error),
}
