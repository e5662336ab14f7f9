//! Report-ready model
//!
//! [`RunSummary`] owns its segments and run history outright; nothing is
//! shared between segments. All values are derived once and never mutated.

use crate::engine::{self, Rate};
use crate::error::StatsError;
use crate::history::{AttemptId, History, HistoryEntry, RunHistory, SegmentHistory};
use crate::time::SplitTime;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A best or worst time together with where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRecord {
    /// Attempt that produced the time
    pub attempt: AttemptId,
    /// The time itself
    pub time: SplitTime,
    /// Wall-clock start of the attempt, if the attempt history has it
    pub started: Option<NaiveDateTime>,
}

impl TimeRecord {
    /// Start date as `MM/DD/YYYY`, empty when unknown
    pub fn run_date(&self) -> String {
        self.started
            .map(|s| s.format("%m/%d/%Y").to_string())
            .unwrap_or_default()
    }

    /// Start time of day as `HH:MM:SS`, empty when unknown
    pub fn run_time(&self) -> String {
        self.started
            .map(|s| s.format("%H:%M:%S").to_string())
            .unwrap_or_default()
    }

    pub(crate) fn from_entry(entry: HistoryEntry, started: Option<NaiveDateTime>) -> Self {
        Self {
            attempt: entry.attempt,
            time: entry.time,
            started,
        }
    }
}

/// Derived statistics of one segment history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentStats {
    /// Weighted average
    pub average: Option<SplitTime>,
    /// Weighted median
    pub median: Option<SplitTime>,
    /// Weighted standard deviation
    pub std_dev: Option<SplitTime>,
    /// Mean of every recorded time
    pub plain_average: Option<SplitTime>,
    /// Median of every recorded time
    pub plain_median: Option<SplitTime>,
    /// Population std dev of every recorded time
    pub plain_std_dev: Option<SplitTime>,
    /// Share of attempts that reached the segment
    pub finished_rate: Rate,
    /// Share of times faster than the weighted average
    pub decent_rate: Rate,
    /// Total time spent in the segment
    pub total_time: SplitTime,
    /// Attempts more than 3.5 weighted std devs above the weighted average
    pub inflated_attempts: Vec<AttemptId>,
}

impl SegmentStats {
    /// Compute from a history snapshot; `total_attempts` is the number of
    /// attempts started in the file
    pub fn compute(history: &SegmentHistory, total_attempts: usize) -> Self {
        let summary = engine::summarize(history);

        let inflated_attempts = match engine::inflated_attempts(history, &summary) {
            Ok(attempts) => attempts,
            // nothing recorded, or no spread to z-score against
            Err(StatsError::EmptyDataset | StatsError::DivisionByZero) => Vec::new(),
        };

        Self {
            average: summary.average,
            median: summary.median,
            std_dev: summary.std_dev,
            plain_average: summary.plain_average,
            plain_median: summary.plain_median,
            plain_std_dev: summary.plain_std_dev,
            finished_rate: engine::completion_rate(history, total_attempts),
            decent_rate: engine::above_average_rate(history, &summary),
            total_time: engine::segment_sum(history),
            inflated_attempts,
        }
    }
}

/// One named segment of the run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Display name, unsanitized
    pub name: String,
    /// Split time in the personal best
    pub split_time_pb: Option<SplitTime>,
    /// Segment duration in the personal best
    pub segment_pb: Option<SplitTime>,
    /// Fastest recorded time
    pub gold: Option<TimeRecord>,
    /// Slowest recorded time
    pub worst: Option<TimeRecord>,
    /// Best segment as stored by the timer (may predate the kept history)
    pub stored_gold: Option<SplitTime>,
    /// Worst minus best
    pub possible_time_save: Option<SplitTime>,
    /// Recorded times in attempt order
    pub history: SegmentHistory,
    /// Derived statistics
    pub stats: SegmentStats,
}

impl Segment {
    /// Whether any attempt reached this segment
    pub fn is_reached(&self) -> bool {
        !self.history.is_empty()
    }
}

/// Complete, immutable statistics of one split file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Game name
    pub game_name: String,
    /// Category name
    pub category_name: String,
    /// Layout file the timer used
    pub layout_path: String,
    /// Timer start offset, verbatim
    pub timer_offset: String,
    /// Attempts started
    pub runs_started: usize,
    /// Attempts finished
    pub runs_finished: usize,
    /// Sum of started→ended wall-clock spans
    pub total_runtime: SplitTime,
    /// Sum of every recorded segment time
    pub total_playtime: SplitTime,
    /// Segments in definition order
    pub segments: Vec<Segment>,
    /// Finished run times in attempt order
    pub run_history: RunHistory,
}

impl RunSummary {
    /// Sum of the fastest recorded time of every segment, `None` if any
    /// segment was never reached
    pub fn sum_of_best(&self) -> Option<SplitTime> {
        self.segments
            .iter()
            .map(|s| s.gold.map(|g| g.time))
            .sum::<Option<SplitTime>>()
    }

    /// Fastest finished run
    pub fn best_run(&self) -> Option<HistoryEntry> {
        engine::best_time(&self.run_history)
    }

    /// Finished run times in attempt order
    pub fn finished_runs(&self) -> &History {
        &self.run_history
    }
}
