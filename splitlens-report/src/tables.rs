//! CSV Output
//!
//! Two tables: one row per segment with every statistic, and the long-format
//! history (one row per recorded time) for spreadsheet pivoting.

use crate::error::ReportError;
use splitlens_core::{RunSummary, Segment, TimeCodec, TimeRecord};

const SEGMENT_HEADER: [&str; 22] = [
    "index",
    "segment",
    "split_time_pb",
    "segment_pb",
    "best_time",
    "best_attempt",
    "best_started",
    "worst_time",
    "worst_attempt",
    "worst_started",
    "average",
    "median",
    "std_dev",
    "plain_average",
    "plain_median",
    "plain_std_dev",
    "possible_time_save",
    "finished_rate",
    "decent_rate",
    "total_time",
    "recorded_times",
    "inflated_attempts",
];

const HISTORY_HEADER: [&str; 5] = ["segment_index", "segment", "attempt", "time", "seconds"];

/// One row per segment
pub fn generate_segments_csv(
    summary: &RunSummary,
    codec: &TimeCodec,
) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(SEGMENT_HEADER)?;

    for (index, segment) in summary.segments.iter().enumerate() {
        writer.write_record(segment_row(index + 1, segment, codec))?;
    }

    into_string(writer)
}

/// Every recorded time, segments first, then `run` rows for finished runs
pub fn generate_history_csv(
    summary: &RunSummary,
    codec: &TimeCodec,
) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HISTORY_HEADER)?;

    for (index, segment) in summary.segments.iter().enumerate() {
        for entry in &segment.history {
            writer.write_record([
                (index + 1).to_string(),
                segment.name.clone(),
                entry.attempt.to_string(),
                codec.format(entry.time),
                format!("{:.6}", entry.time.as_secs_f64()),
            ])?;
        }
    }

    for entry in summary.finished_runs() {
        writer.write_record([
            String::new(),
            "run".to_string(),
            entry.attempt.to_string(),
            codec.format(entry.time),
            format!("{:.6}", entry.time.as_secs_f64()),
        ])?;
    }

    into_string(writer)
}

fn segment_row(number: usize, segment: &Segment, codec: &TimeCodec) -> Vec<String> {
    let stats = &segment.stats;
    let (best_time, best_attempt, best_started) = record_columns(segment.gold.as_ref(), codec);
    let (worst_time, worst_attempt, worst_started) = record_columns(segment.worst.as_ref(), codec);

    vec![
        number.to_string(),
        segment.name.clone(),
        codec.format_optional(segment.split_time_pb),
        codec.format_optional(segment.segment_pb),
        best_time,
        best_attempt,
        best_started,
        worst_time,
        worst_attempt,
        worst_started,
        codec.format_optional(stats.average),
        codec.format_optional(stats.median),
        codec.format_optional(stats.std_dev),
        codec.format_optional(stats.plain_average),
        codec.format_optional(stats.plain_median),
        codec.format_optional(stats.plain_std_dev),
        codec.format_optional(segment.possible_time_save),
        stats.finished_rate.to_string(),
        stats.decent_rate.to_string(),
        codec.format(stats.total_time),
        segment.history.len().to_string(),
        stats
            .inflated_attempts
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(";"),
    ]
}

fn record_columns(record: Option<&TimeRecord>, codec: &TimeCodec) -> (String, String, String) {
    match record {
        Some(r) => (
            codec.format(r.time),
            r.attempt.to_string(),
            format!("{} {}", r.run_date(), r.run_time()).trim().to_string(),
        ),
        None => Default::default(),
    }
}

fn into_string(writer: csv::Writer<Vec<u8>>) -> Result<String, ReportError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
