use splitlens_core::AttemptId;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading a split file
#[derive(Debug, Error)]
pub enum LssError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid file format: {0} is not a .lss file")]
    Extension(PathBuf),

    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("missing <Run> root element (found <{0}>)")]
    MissingRun(String),

    #[error("invalid attempt id '{0}'")]
    AttemptId(String),

    #[error("attempt {attempt}: invalid {field} date '{value}': {source}")]
    Date {
        attempt: AttemptId,
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
