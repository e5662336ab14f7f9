use std::path::PathBuf;
use thiserror::Error;

/// Failures while writing report artifacts
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render chart {path}: {message}")]
    Chart { path: PathBuf, message: String },
}
