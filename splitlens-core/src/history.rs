//! Attempt-ordered time series
//!
//! A [`History`] is the ordered sequence of `(attempt, duration)` pairs for one
//! segment (or for whole finished runs). Order is insertion order, which the
//! reader guarantees to be file order and therefore run chronology.

use crate::error::TimeFormatError;
use crate::time::SplitTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Identifier of one attempt, unique within a split file
///
/// LiveSplit numbers attempts from 1; history imported from older splits uses
/// ids of 0 and below, which therefore sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttemptId(pub i64);

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AttemptId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(AttemptId)
    }
}

/// One recorded duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Attempt the duration was recorded in
    pub attempt: AttemptId,
    /// Recorded duration
    pub time: SplitTime,
}

/// Ordered series of recorded durations, at most one per attempt
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

/// Per-segment history: one entry per attempt that reached the segment
pub type SegmentHistory = History;

/// Per-run history: one entry per finished attempt
pub type RunHistory = History;

impl History {
    /// Empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw `(attempt, text)` pairs as read from the file
    ///
    /// Blank text means the attempt has no recorded real time and is dropped.
    /// A repeated attempt id overwrites the earlier value but keeps its
    /// original position.
    pub fn from_raw<I, S>(raw: I) -> Result<Self, TimeFormatError>
    where
        I: IntoIterator<Item = (AttemptId, S)>,
        S: AsRef<str>,
    {
        let mut recorded = Vec::new();
        for (attempt, text) in raw {
            if let Some(time) = SplitTime::parse_optional(text.as_ref())? {
                recorded.push((attempt, time));
            }
        }

        Ok(recorded.into_iter().collect())
    }

    /// Number of recorded durations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in attempt order
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Iterate entries in attempt order
    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    /// Durations in seconds, attempt order
    pub fn seconds(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.time.as_secs_f64()).collect()
    }

    /// Duration recorded for `attempt`
    pub fn get(&self, attempt: AttemptId) -> Option<SplitTime> {
        self.entries
            .iter()
            .find(|e| e.attempt == attempt)
            .map(|e| e.time)
    }
}

impl FromIterator<(AttemptId, SplitTime)> for History {
    fn from_iter<T: IntoIterator<Item = (AttemptId, SplitTime)>>(iter: T) -> Self {
        let mut entries: Vec<HistoryEntry> = Vec::new();
        let mut positions: HashMap<AttemptId, usize> = HashMap::new();
        for (attempt, time) in iter {
            match positions.get(&attempt) {
                Some(&idx) => entries[idx].time = time,
                None => {
                    positions.insert(attempt, entries.len());
                    entries.push(HistoryEntry { attempt, time });
                }
            }
        }
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
