//! Summary Statistics
//!
//! Plain statistics use every sample. Weighted statistics are outlier-aware:
//! - weighted average: Tukey fences, then tercile weights by value rank
//! - weighted median: Tukey fences, then plain median
//! - weighted std dev: temporally recent half, z-score filter, tercile weights
//!   by attempt order, spread around the unfiltered recent-half mean
//!
//! Every function returns `None` for an empty input ("no data").

use crate::outliers::{tukey_filter, zscore_filter};
use crate::percentiles::{compute_median, sorted_copy};
use crate::weighting::{weighted_mean, weighted_std_dev_around};
use crate::{RECENT_ZSCORE_THRESHOLD, TUKEY_MULTIPLIER};

/// Arithmetic mean
pub fn plain_mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Median of all samples
pub fn plain_median(samples: &[f64]) -> Option<f64> {
    compute_median(samples)
}

/// Population standard deviation
pub fn population_std_dev(samples: &[f64]) -> Option<f64> {
    let mean = plain_mean(samples)?;
    let variance =
        samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;
    Some(variance.sqrt())
}

/// Tukey-filtered, tail-weighted mean over the value-sorted samples
pub fn weighted_average(samples: &[f64]) -> Option<f64> {
    let sorted = sorted_copy(samples);
    let filtered = tukey_filter(&sorted, TUKEY_MULTIPLIER).cleaned_samples;
    weighted_mean(&filtered)
}

/// Tukey-filtered median
pub fn weighted_median(samples: &[f64]) -> Option<f64> {
    let filtered = tukey_filter(samples, TUKEY_MULTIPLIER).cleaned_samples;
    compute_median(&filtered)
}

/// Recency-weighted standard deviation
///
/// `samples` must be in attempt order; only `samples[n / 2..]` is used.
pub fn weighted_std_dev(samples: &[f64]) -> Option<f64> {
    let recent = &samples[samples.len() / 2..];
    let mean = plain_mean(recent)?;
    let std_dev = population_std_dev(recent)?;

    let filtered =
        zscore_filter(recent, mean, std_dev, RECENT_ZSCORE_THRESHOLD).cleaned_samples;
    weighted_std_dev_around(&filtered, mean)
}

/// Plain and weighted statistics of one series
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SummaryStatistics {
    /// Arithmetic mean of all samples
    pub mean: Option<f64>,
    /// Median of all samples
    pub median: Option<f64>,
    /// Population std dev of all samples
    pub std_dev: Option<f64>,
    /// See [`weighted_average`]
    pub weighted_mean: Option<f64>,
    /// See [`weighted_median`]
    pub weighted_median: Option<f64>,
    /// See [`weighted_std_dev`]
    pub weighted_std_dev: Option<f64>,
}

/// Compute every summary statistic for samples given in attempt order
pub fn compute_summary(samples: &[f64]) -> SummaryStatistics {
    SummaryStatistics {
        mean: plain_mean(samples),
        median: plain_median(samples),
        std_dev: population_std_dev(samples),
        weighted_mean: weighted_average(samples),
        weighted_median: weighted_median(samples),
        weighted_std_dev: weighted_std_dev(samples),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SPREAD_EPSILON;

    #[test]
    fn test_plain_statistics() {
        let samples = vec![60.0, 70.0, 65.0];
        assert_eq!(plain_mean(&samples), Some(65.0));
        assert_eq!(plain_median(&samples), Some(65.0));

        let sd = population_std_dev(&samples).unwrap();
        assert!((sd - (50.0f64 / 3.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_average_drops_outlier() {
        let samples = vec![60.0, 61.0, 62.0, 63.0, 64.0, 600.0];
        let avg = weighted_average(&samples).unwrap();
        // survivors 60..64: weights 0.1, 0.1, 0.1, 0.5, 0.5
        let expected = (0.1 * 60.0 + 0.1 * 61.0 + 0.1 * 62.0 + 0.5 * 63.0 + 0.5 * 64.0) / 1.3;
        assert!((avg - expected).abs() < 1e-9);
    }

    #[test]
    fn test_weighted_average_ignores_input_order() {
        let a = weighted_average(&[64.0, 60.0, 62.0, 61.0, 63.0]);
        let b = weighted_average(&[60.0, 61.0, 62.0, 63.0, 64.0]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_weighted_median() {
        let samples = vec![10.0, 11.0, 12.0, 13.0, 1000.0];
        assert_eq!(weighted_median(&samples), Some(11.5));
    }

    #[test]
    fn test_weighted_std_dev_uses_recent_half() {
        // early half is wild, recent half is constant
        let samples = vec![10.0, 500.0, 3.0, 90.0, 50.0, 50.0, 50.0, 50.0];
        assert_eq!(weighted_std_dev(&samples), Some(0.0));
    }

    #[test]
    fn test_weighted_std_dev_centres_on_unfiltered_mean() {
        // recent half: 9 x 5.0 then 50.0; the 50.0 is dropped (z = 3)
        let mut samples = vec![0.0; 10];
        samples.extend(std::iter::repeat(5.0).take(9));
        samples.push(50.0);
        let sd = weighted_std_dev(&samples).unwrap();
        // every survivor sits 4.5 below the unfiltered mean of 9.5
        assert!((sd - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_variance() {
        let samples = vec![120.0; 20];
        let summary = compute_summary(&samples);
        assert_eq!(summary.weighted_std_dev, Some(0.0));
        assert_eq!(summary.std_dev, Some(0.0));
        assert!((summary.weighted_mean.unwrap() - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_inexact_constant_has_no_spread() {
        for value in [0.01, 0.29, 0.31, 65.43, 199.99] {
            let summary = compute_summary(&vec![value; 20]);
            assert!(summary.weighted_std_dev.unwrap() < SPREAD_EPSILON, "{}", value);
            assert!(summary.std_dev.unwrap() < SPREAD_EPSILON, "{}", value);
            assert!((summary.weighted_mean.unwrap() - value).abs() < SPREAD_EPSILON);
        }
    }

    #[test]
    fn test_empty_samples() {
        let summary = compute_summary(&[]);
        assert_eq!(summary, SummaryStatistics::default());
    }

    #[test]
    fn test_single_sample() {
        let summary = compute_summary(&[42.0]);
        assert!((summary.weighted_mean.unwrap() - 42.0).abs() < 1e-9);
        assert_eq!(summary.weighted_median, Some(42.0));
        assert_eq!(summary.weighted_std_dev, Some(0.0));
    }
}
