#![warn(missing_docs)]
//! # Splitlens
//!
//! Statistics, reports and charts for LiveSplit `.lss` split files.
//!
//! Splitlens reads the attempt and segment history a LiveSplit timer keeps
//! and turns it into:
//! - **Weighted statistics**: Tukey-filtered averages and medians weighted
//!   towards the slow tail, and a standard deviation over recent attempts
//! - **Provenance**: best and worst times with the attempt and the date it
//!   started
//! - **Rates**: how often a segment is reached and how often it beats the
//!   weighted average
//! - **Inflated times**: attempts far above the usual spread
//! - **Artifacts**: a text report, CSV tables, a JSON dump and SVG charts
//!
//! ## Quick Start
//!
//! ```ignore
//! use splitlens::{build_run_summary_with, generate_text_report, read_lss_file};
//!
//! let document = read_lss_file("celeste.lss")?;
//! let summary = build_run_summary_with(document.input(), &document)?;
//! println!("{}", generate_text_report(&summary));
//! ```

// Re-export core types
pub use splitlens_core::{
    AttemptCalendar, AttemptId, AttemptIndex, AttemptRecord, BuildError, History, HistoryEntry,
    Rate, RunInput, RunMetadata, RunSummary, Segment, SegmentInput, SegmentStats, SplitTime,
    StatsError, TimeCodec, TimeFormatError, TimeRecord, build_run_summary, build_run_summary_with,
    engine, format_seconds, parse_seconds,
};

// Re-export the reader
pub use splitlens_lss::{LssDocument, LssError, parse_lss, read_lss_file};

// Re-export emitters
pub use splitlens_report::{
    ChartConfig, OutputFormat, ReportError, generate_history_csv, generate_json_report,
    generate_segments_csv, generate_text_report, generate_text_report_with, render_charts,
    sanitize_segment_name,
};

// Re-export stats
pub use splitlens_stats::{SummaryStatistics, compute_summary};

/// Configuration and pipeline entry points
pub use splitlens_cli::{PipelineSettings, SplitlensConfig, process_file};

/// Run the Splitlens CLI.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     splitlens::run()
/// }
/// ```
pub use splitlens_cli::run;
