//! History Statistics
//!
//! Maps a [`History`] onto the numeric engine in `splitlens-stats` and back
//! into durations, plus the lookups that need attempt ids: best/worst times,
//! completion and above-average rates, and inflated-time detection.
//!
//! Every function is pure. "No data" is `None` (or a [`Rate`] variant); only
//! [`inflated_attempts`] fails, because a z-score over zero spread is
//! meaningless. Comparisons happen on whole microseconds, never on the raw
//! floats coming out of the engine.

use crate::error::StatsError;
use crate::history::{AttemptId, History, HistoryEntry};
use crate::time::SplitTime;
use serde::{Deserialize, Serialize};
use splitlens_stats::INFLATED_ZSCORE_THRESHOLD;
use std::fmt;

/// A percentage that may be undefined
///
/// `Unreached` renders as `"? %"`, `Undefined` as a bare `"0"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Rate {
    /// A percentage between 0 and 100
    Percent(f64),
    /// The segment has no recorded times; renders as `? %`
    Unreached,
    /// No reference value exists; renders as `0`
    Undefined,
}

impl Rate {
    /// The percentage, if defined
    pub fn percent(&self) -> Option<f64> {
        match self {
            Rate::Percent(p) => Some(*p),
            Rate::Unreached | Rate::Undefined => None,
        }
    }

    /// Value to plot; undefined rates plot as zero
    pub fn plot_value(&self) -> f64 {
        self.percent().unwrap_or(0.0)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rate::Percent(p) => write!(f, "{:.2}%", p),
            Rate::Unreached => f.write_str("? %"),
            Rate::Undefined => f.write_str("0"),
        }
    }
}

fn to_time(seconds: Option<f64>) -> Option<SplitTime> {
    seconds.map(SplitTime::from_secs_f64)
}

/// Plain and weighted statistics of one history, rounded to the microsecond
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeSummary {
    /// Tukey-filtered average weighted towards the slow tail
    pub average: Option<SplitTime>,
    /// Tukey-filtered median
    pub median: Option<SplitTime>,
    /// Standard deviation of the most recent half of the attempts
    pub std_dev: Option<SplitTime>,
    /// Mean of every recorded time
    pub plain_average: Option<SplitTime>,
    /// Median of every recorded time
    pub plain_median: Option<SplitTime>,
    /// Population standard deviation of every recorded time
    pub plain_std_dev: Option<SplitTime>,
}

/// Run the statistics engine once over `history`
pub fn summarize(history: &History) -> TimeSummary {
    let stats = splitlens_stats::compute_summary(&history.seconds());
    TimeSummary {
        average: to_time(stats.weighted_mean),
        median: to_time(stats.weighted_median),
        std_dev: to_time(stats.weighted_std_dev),
        plain_average: to_time(stats.mean),
        plain_median: to_time(stats.median),
        plain_std_dev: to_time(stats.std_dev),
    }
}

/// Fastest recorded time; ties go to the earliest entry
pub fn best_time(history: &History) -> Option<HistoryEntry> {
    let mut best: Option<HistoryEntry> = None;
    for entry in history {
        if best.map_or(true, |b| entry.time < b.time) {
            best = Some(*entry);
        }
    }
    best
}

/// Slowest recorded time; ties go to the earliest entry
pub fn worst_time(history: &History) -> Option<HistoryEntry> {
    let mut worst: Option<HistoryEntry> = None;
    for entry in history {
        if worst.map_or(true, |w| entry.time > w.time) {
            worst = Some(*entry);
        }
    }
    worst
}

/// Worst minus best; never negative
pub fn possible_time_save(history: &History) -> Option<SplitTime> {
    let best = best_time(history)?;
    let worst = worst_time(history)?;
    Some(worst.time.saturating_sub(best.time))
}

/// Total time spent in the segment across all attempts
pub fn segment_sum(history: &History) -> SplitTime {
    history.iter().map(|e| e.time).sum()
}

/// Share of started attempts that reached the segment
pub fn completion_rate(history: &History, total_attempts: usize) -> Rate {
    if history.is_empty() || total_attempts == 0 {
        return Rate::Unreached;
    }
    Rate::Percent(history.len() as f64 / total_attempts as f64 * 100.0)
}

/// Share of recorded times strictly faster than the weighted average of
/// `summary`
pub fn above_average_rate(history: &History, summary: &TimeSummary) -> Rate {
    let average = match summary.average {
        Some(avg) if avg > SplitTime::ZERO => avg,
        _ => return Rate::Undefined,
    };

    let faster = history.iter().filter(|e| e.time < average).count();
    Rate::Percent(faster as f64 / history.len() as f64 * 100.0)
}

/// Attempts whose time lies more than 3.5 weighted standard deviations above
/// the weighted average of `summary`
///
/// A standard deviation that rounds to zero microseconds has no spread and
/// yields [`StatsError::DivisionByZero`].
pub fn inflated_attempts(
    history: &History,
    summary: &TimeSummary,
) -> Result<Vec<AttemptId>, StatsError> {
    let (Some(mean), Some(std_dev)) = (summary.average, summary.std_dev) else {
        return Err(StatsError::EmptyDataset);
    };
    if std_dev == SplitTime::ZERO {
        return Err(StatsError::DivisionByZero);
    }

    let mean = mean.as_secs_f64();
    let std_dev = std_dev.as_secs_f64();
    Ok(history
        .iter()
        .filter(|e| (e.time.as_secs_f64() - mean) / std_dev > INFLATED_ZSCORE_THRESHOLD)
        .map(|e| e.attempt)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn history(raw: &[(i64, &str)]) -> History {
        History::from_raw(raw.iter().map(|&(id, t)| (AttemptId(id), t))).unwrap()
    }

    fn constant(time: &str, count: i64) -> History {
        let raw: Vec<(i64, &str)> = (1..=count).map(|i| (i, time)).collect();
        history(&raw)
    }

    #[test]
    fn test_plain_average_and_median() {
        let h = history(&[(1, "00:01:00.00"), (2, "00:01:10.00"), (3, "00:01:05.00")]);
        let summary = summarize(&h);
        assert_eq!(summary.plain_average.unwrap().to_string(), "00:01:05.00");
        assert_eq!(summary.plain_median.unwrap().to_string(), "00:01:05.00");
    }

    #[test]
    fn test_empty_history_has_no_data() {
        let h = History::new();
        assert_eq!(summarize(&h), TimeSummary::default());
        assert_eq!(best_time(&h), None);
        assert_eq!(possible_time_save(&h), None);
        assert_eq!(segment_sum(&h), SplitTime::ZERO);
    }

    #[test]
    fn test_best_tie_goes_to_first_attempt() {
        let h = history(&[(1, "00:01:00.00"), (2, "00:01:00.00")]);
        assert_eq!(best_time(&h).unwrap().attempt, AttemptId(1));
        assert_eq!(worst_time(&h).unwrap().attempt, AttemptId(1));
    }

    #[test]
    fn test_best_and_worst() {
        let h = history(&[(3, "00:00:50"), (7, "00:00:45"), (9, "00:01:30"), (12, "00:00:45")]);
        assert_eq!(best_time(&h).unwrap().attempt, AttemptId(7));
        assert_eq!(worst_time(&h).unwrap().attempt, AttemptId(9));
        assert_eq!(possible_time_save(&h).unwrap().to_string(), "00:00:45.00");
    }

    #[test]
    fn test_completion_rate() {
        let h = history(&[(1, "00:00:10"), (2, "00:00:11")]);
        assert_eq!(completion_rate(&h, 2).to_string(), "100.00%");
        assert_eq!(completion_rate(&h, 3).to_string(), "66.67%");
        assert_eq!(completion_rate(&History::new(), 5).to_string(), "? %");
    }

    #[test]
    fn test_above_average_rate() {
        let h = history(&[(1, "00:00:10"), (2, "00:00:20"), (3, "00:00:30"), (4, "00:00:40")]);
        // weights 0.1, 0.1, 0.5, 0.5 -> average 31.67
        assert_eq!(above_average_rate(&h, &summarize(&h)), Rate::Percent(75.0));
    }

    #[test]
    fn test_above_average_rate_legacy_zero() {
        // The empty path renders as a bare "0", not "0.00%"
        let h = History::new();
        let rate = above_average_rate(&h, &summarize(&h));
        assert_eq!(rate, Rate::Undefined);
        assert_eq!(rate.to_string(), "0");
        assert_eq!(rate.plot_value(), 0.0);
    }

    #[test]
    fn test_zero_variance_weighted_std_dev() {
        let h = constant("00:02:00.00", 20);
        let summary = summarize(&h);
        assert_eq!(summary.std_dev.unwrap().to_string(), "00:00:00.00");
        assert_eq!(inflated_attempts(&h, &summary), Err(StatsError::DivisionByZero));
    }

    #[test]
    fn test_inexact_constants_have_no_spread() {
        // none of these has an exact binary form
        for time in [
            "00:00:00.01",
            "00:00:00.29",
            "00:00:00.31",
            "00:00:17.17",
            "00:01:05.43",
            "00:03:19.99",
        ] {
            let h = constant(time, 20);
            let summary = summarize(&h);

            assert_eq!(summary.std_dev, Some(SplitTime::ZERO), "{}", time);
            assert_eq!(summary.average.unwrap().to_string(), time);
            assert_eq!(above_average_rate(&h, &summary), Rate::Percent(0.0), "{}", time);
            assert_eq!(
                inflated_attempts(&h, &summary),
                Err(StatsError::DivisionByZero),
                "{}",
                time
            );
        }
    }

    #[test]
    fn test_inflated_on_empty_history() {
        let h = History::new();
        assert_eq!(
            inflated_attempts(&h, &summarize(&h)),
            Err(StatsError::EmptyDataset)
        );
    }

    #[test]
    fn test_inflated_attempts_flags_slow_recent_outlier() {
        // forty attempts alternating 60 s and 62 s, then one 10 minute attempt
        let mut raw: Vec<(i64, String)> = (1..=40)
            .map(|i| (i, format!("00:01:{:02}.00", if i % 2 == 0 { 0 } else { 2 })))
            .collect();
        raw.push((41, "00:10:00.00".to_string()));
        let h = History::from_raw(raw.iter().map(|(id, t)| (AttemptId(*id), t.as_str())))
            .unwrap();

        let inflated = inflated_attempts(&h, &summarize(&h)).unwrap();
        assert_eq!(inflated, vec![AttemptId(41)]);
    }

    proptest! {
        #[test]
        fn constant_histories_have_no_spread(
            centis in 1u64..1_000_000,
            count in 1i64..60,
        ) {
            let time = SplitTime::from_micros(centis * 10_000);
            let raw: Vec<(i64, String)> = (1..=count).map(|i| (i, time.to_string())).collect();
            let h = History::from_raw(raw.iter().map(|(id, t)| (AttemptId(*id), t.as_str())))
                .unwrap();
            let summary = summarize(&h);

            prop_assert_eq!(summary.average, Some(time));
            prop_assert_eq!(summary.std_dev, Some(SplitTime::ZERO));
            prop_assert_eq!(above_average_rate(&h, &summary), Rate::Percent(0.0));
            prop_assert_eq!(
                inflated_attempts(&h, &summary),
                Err(StatsError::DivisionByZero)
            );
        }
    }
}
