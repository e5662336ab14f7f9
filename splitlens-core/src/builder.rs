//! Aggregate Model Builder
//!
//! Turns the raw text series of a [`RunInput`] into a [`RunSummary`]. Either
//! every segment and run time parses and a complete summary comes back, or
//! the first format error is returned with the segment or attempt it came
//! from.

use crate::engine;
use crate::error::BuildError;
use crate::history::{History, HistoryEntry, RunHistory};
use crate::input::{AttemptCalendar, AttemptIndex, RunInput, SegmentInput};
use crate::model::{RunSummary, Segment, SegmentStats, TimeRecord};
use crate::time::SplitTime;
use rayon::prelude::*;

/// Build a summary, looking attempt starts up in the input's own attempt list
pub fn build_run_summary(input: &RunInput) -> Result<RunSummary, BuildError> {
    let calendar = AttemptIndex::from_attempts(&input.attempts);
    build_run_summary_with(input, &calendar)
}

/// Build a summary against an external attempt calendar
pub fn build_run_summary_with<C>(input: &RunInput, calendar: &C) -> Result<RunSummary, BuildError>
where
    C: AttemptCalendar + Sync,
{
    let runs_started = input.attempts.len();
    let run_history = finished_runs(input)?;

    let pb_splits = input
        .segments
        .iter()
        .map(|s| parse_segment_time(s, &s.pb_split_time))
        .collect::<Result<Vec<_>, _>>()?;

    // Split the PB run started from: zero before the first segment
    let previous_pb: Vec<Option<SplitTime>> = std::iter::once(Some(SplitTime::ZERO))
        .chain(pb_splits.iter().copied())
        .take(pb_splits.len())
        .collect();

    let segments = input
        .segments
        .par_iter()
        .zip(previous_pb.par_iter())
        .map(|(raw, previous)| build_segment(raw, *previous, runs_started, calendar))
        .collect::<Result<Vec<_>, _>>()?;

    let total_playtime = segments
        .iter()
        .map(|s| s.stats.total_time)
        .sum::<SplitTime>();

    Ok(RunSummary {
        game_name: input.metadata.game_name.clone(),
        category_name: input.metadata.category_name.clone(),
        layout_path: input.metadata.layout_path.clone(),
        timer_offset: input.metadata.timer_offset.clone(),
        runs_started,
        runs_finished: run_history.len(),
        total_runtime: total_runtime(input),
        total_playtime,
        segments,
        run_history,
    })
}

fn parse_segment_time(raw: &SegmentInput, text: &str) -> Result<Option<SplitTime>, BuildError> {
    SplitTime::parse_optional(text).map_err(|source| BuildError::SegmentTime {
        segment: raw.name.clone(),
        source,
    })
}

fn build_segment<C: AttemptCalendar>(
    raw: &SegmentInput,
    previous_pb: Option<SplitTime>,
    runs_started: usize,
    calendar: &C,
) -> Result<Segment, BuildError> {
    let history = History::from_raw(raw.history.iter().map(|(id, text)| (*id, text)))
        .map_err(|source| BuildError::SegmentTime {
            segment: raw.name.clone(),
            source,
        })?;

    let split_time_pb = parse_segment_time(raw, &raw.pb_split_time)?;
    let stored_gold = parse_segment_time(raw, &raw.best_segment_time)?;

    // A gap in the PB leaves the segment duration unknown
    let segment_pb = match (split_time_pb, previous_pb) {
        (Some(split), Some(previous)) => Some(split.saturating_sub(previous)),
        _ => None,
    };

    let record = |entry: HistoryEntry| {
        TimeRecord::from_entry(entry, calendar.started(entry.attempt))
    };

    Ok(Segment {
        name: raw.name.clone(),
        split_time_pb,
        segment_pb,
        gold: engine::best_time(&history).map(record),
        worst: engine::worst_time(&history).map(record),
        stored_gold,
        possible_time_save: engine::possible_time_save(&history),
        stats: SegmentStats::compute(&history, runs_started),
        history,
    })
}

fn finished_runs(input: &RunInput) -> Result<RunHistory, BuildError> {
    let mut runs = Vec::new();
    for attempt in &input.attempts {
        let Some(text) = attempt.real_time.as_deref() else {
            continue;
        };
        let parsed = SplitTime::parse_optional(text).map_err(|source| BuildError::AttemptTime {
            attempt: attempt.id,
            source,
        })?;
        if let Some(time) = parsed {
            runs.push((attempt.id, time));
        }
    }
    Ok(runs.into_iter().collect())
}

/// Sum of wall-clock spans; undated or unfinished attempts add nothing
fn total_runtime(input: &RunInput) -> SplitTime {
    input
        .attempts
        .iter()
        .filter_map(|a| Some((a.started?, a.ended?)))
        .filter_map(|(started, ended)| (ended - started).to_std().ok())
        .map(|span| SplitTime::from_micros(span.as_micros() as u64))
        .sum()
}
