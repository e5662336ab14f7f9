//! Error types shared by the codec, the engine and the builder

use crate::history::AttemptId;
use thiserror::Error;

/// A duration string that does not match `H+:MM:SS[.fraction]`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeFormatError {
    #[error("invalid duration '{0}': expected H:MM:SS[.fraction]")]
    Malformed(String),

    #[error("invalid duration '{text}': {field} must be below 60")]
    OutOfRange { text: String, field: &'static str },

    #[error("invalid duration '{0}': hours overflow")]
    Overflow(String),
}

/// Failures of the statistics that cannot fall back to "no data"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("no recorded times")]
    EmptyDataset,

    #[error("weighted standard deviation is zero, z-scores are undefined")]
    DivisionByZero,
}

/// Failures while assembling a [`crate::RunSummary`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("segment '{segment}': {source}")]
    SegmentTime {
        segment: String,
        #[source]
        source: TimeFormatError,
    },

    #[error("attempt {attempt}: {source}")]
    AttemptTime {
        attempt: AttemptId,
        #[source]
        source: TimeFormatError,
    },
}
