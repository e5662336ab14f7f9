//! Raw series handed over by a split-file reader
//!
//! Everything here is still text exactly as the file stored it; parsing and
//! validation happen in the builder.

use crate::history::AttemptId;
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Run-level metadata strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunMetadata {
    /// `<GameName>`
    pub game_name: String,
    /// `<CategoryName>`
    pub category_name: String,
    /// `<LayoutPath>`
    pub layout_path: String,
    /// `<Offset>`, kept verbatim (it may be negative)
    pub timer_offset: String,
}

/// One `<Attempt>` of the attempt history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    /// Attempt id
    pub id: AttemptId,
    /// Wall-clock start, if recorded
    pub started: Option<NaiveDateTime>,
    /// Wall-clock end, if recorded
    pub ended: Option<NaiveDateTime>,
    /// Total real time text; present only for finished runs
    pub real_time: Option<String>,
}

impl AttemptRecord {
    /// Whether the attempt finished with a recorded total time
    pub fn is_finished(&self) -> bool {
        self.real_time
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }
}

/// One `<Segment>` definition with its history
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentInput {
    /// Display name
    pub name: String,
    /// Personal-best split time text (blank if the PB never reached it)
    pub pb_split_time: String,
    /// Stored best segment text (blank if unset)
    pub best_segment_time: String,
    /// `(attempt, real time text)` in file order
    pub history: Vec<(AttemptId, String)>,
}

/// Everything the builder needs from one split file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunInput {
    /// Scalar metadata
    pub metadata: RunMetadata,
    /// Attempt history in file order
    pub attempts: Vec<AttemptRecord>,
    /// Segments in definition order
    pub segments: Vec<SegmentInput>,
}

/// Lookup of an attempt's wall-clock start
pub trait AttemptCalendar {
    /// Start of `attempt`, `None` when the attempt is unknown or undated
    fn started(&self, attempt: AttemptId) -> Option<NaiveDateTime>;
}

/// Hash-indexed calendar built from attempt records
#[derive(Debug, Clone, Default)]
pub struct AttemptIndex {
    starts: HashMap<AttemptId, NaiveDateTime>,
}

impl AttemptIndex {
    /// Index the dated attempts of `attempts`
    pub fn from_attempts(attempts: &[AttemptRecord]) -> Self {
        Self {
            starts: attempts
                .iter()
                .filter_map(|a| a.started.map(|s| (a.id, s)))
                .collect(),
        }
    }
}

impl AttemptCalendar for AttemptIndex {
    fn started(&self, attempt: AttemptId) -> Option<NaiveDateTime> {
        self.starts.get(&attempt).copied()
    }
}

impl AttemptCalendar for HashMap<AttemptId, NaiveDateTime> {
    fn started(&self, attempt: AttemptId) -> Option<NaiveDateTime> {
        self.get(&attempt).copied()
    }
}
