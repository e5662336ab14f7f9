#![warn(missing_docs)]
//! Splitlens Core - Split Histories and Run Summaries
//!
//! This crate turns the raw text series of a LiveSplit split file into typed
//! statistics:
//! - `SplitTime` and `TimeCodec` for the `H:MM:SS.ff` duration text
//! - `History`, the attempt-ordered time series of a segment or of whole runs
//! - History statistics (weighted average/median/std dev, rates, inflated times)
//! - `build_run_summary`, which assembles the report-ready `RunSummary`
//!
//! Nothing here touches the filesystem or logs.

mod builder;
pub mod engine;
mod error;
mod history;
mod input;
mod model;
mod time;

pub use builder::{build_run_summary, build_run_summary_with};
pub use engine::{Rate, TimeSummary};
pub use error::{BuildError, StatsError, TimeFormatError};
pub use history::{AttemptId, History, HistoryEntry, RunHistory, SegmentHistory};
pub use input::{AttemptCalendar, AttemptIndex, AttemptRecord, RunInput, RunMetadata, SegmentInput};
pub use model::{RunSummary, Segment, SegmentStats, TimeRecord};
pub use time::{
    DEFAULT_PRECISION, MAX_PRECISION, SplitTime, TimeCodec, format_seconds, parse_seconds,
};
