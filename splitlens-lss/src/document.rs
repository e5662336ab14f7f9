//! Parsed split file

use chrono::NaiveDateTime;
use splitlens_core::{AttemptCalendar, AttemptId, AttemptIndex, RunInput};

/// Everything extracted from one `.lss` file
#[derive(Debug, Clone)]
pub struct LssDocument {
    /// `version` attribute of `<Run>`, if present
    pub version: Option<String>,
    input: RunInput,
    calendar: AttemptIndex,
}

impl LssDocument {
    pub(crate) fn new(version: Option<String>, input: RunInput) -> Self {
        let calendar = AttemptIndex::from_attempts(&input.attempts);
        Self {
            version,
            input,
            calendar,
        }
    }

    /// Raw series for the summary builder
    pub fn input(&self) -> &RunInput {
        &self.input
    }

    /// Number of `<Attempt>` elements
    pub fn attempts_started(&self) -> usize {
        self.input.attempts.len()
    }

    /// Number of attempts carrying a total `<RealTime>`
    pub fn attempts_finished(&self) -> usize {
        self.input.attempts.iter().filter(|a| a.is_finished()).count()
    }

    /// Number of `<Segment>` definitions
    pub fn segment_count(&self) -> usize {
        self.input.segments.len()
    }
}

impl AttemptCalendar for LssDocument {
    fn started(&self, attempt: AttemptId) -> Option<NaiveDateTime> {
        self.calendar.started(attempt)
    }
}

impl From<LssDocument> for RunInput {
    fn from(document: LssDocument) -> Self {
        document.input
    }
}
