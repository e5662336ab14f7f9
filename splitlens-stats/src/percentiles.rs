//! Percentile Computation
//!
//! Linear-interpolation percentiles (the `rank = p * (n - 1)` convention) and
//! the quartile fences used for Tukey outlier removal.

use std::cmp::Ordering;

/// Sort a copy of `samples` ascending. NaNs compare equal and keep their position.
pub fn sorted_copy(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Compute a single percentile from samples
///
/// Uses linear interpolation between nearest ranks. Returns `None` for an
/// empty slice.
///
/// # Examples
///
/// ```
/// # use splitlens_stats::compute_percentile;
/// let samples = vec![60.0, 70.0, 65.0];
/// assert_eq!(compute_percentile(&samples, 50.0), Some(65.0));
/// ```
pub fn compute_percentile(samples: &[f64], percentile: f64) -> Option<f64> {
    percentile_of_sorted(&sorted_copy(samples), percentile)
}

/// Same as [`compute_percentile`] for data already sorted ascending.
pub fn percentile_of_sorted(sorted: &[f64], percentile: f64) -> Option<f64> {
    match sorted.len() {
        0 => None,
        1 => Some(sorted[0]),
        n => {
            let rank = (percentile / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lower_idx = rank.floor() as usize;
            let upper_idx = (lower_idx + 1).min(n - 1);
            let fraction = rank - lower_idx as f64;

            Some(sorted[lower_idx] + fraction * (sorted[upper_idx] - sorted[lower_idx]))
        }
    }
}

/// Median of an unsorted slice (mean of the two middle values for even counts)
pub fn compute_median(samples: &[f64]) -> Option<f64> {
    let sorted = sorted_copy(samples);
    let n = sorted.len();
    if n == 0 {
        return None;
    }

    if n % 2 == 0 {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    } else {
        Some(sorted[n / 2])
    }
}

/// First and third quartile of a sample set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    /// 25th percentile
    pub q1: f64,
    /// 75th percentile
    pub q3: f64,
}

impl Quartiles {
    /// Quartiles of `samples`, `None` when empty
    pub fn of(samples: &[f64]) -> Option<Self> {
        let sorted = sorted_copy(samples);
        Some(Self {
            q1: percentile_of_sorted(&sorted, 25.0)?,
            q3: percentile_of_sorted(&sorted, 75.0)?,
        })
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Inclusive fences `[Q1 - k*IQR, Q3 + k*IQR]`
    pub fn fences(&self, k: f64) -> (f64, f64) {
        let iqr = self.iqr();
        (self.q1 - k * iqr, self.q3 + k * iqr)
    }
}
