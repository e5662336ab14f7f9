//! Outlier Detection
//!
//! Two filters, each keeping the survivors in their original order:
//! - Tukey fences on the interquartile range (used by the weighted average and median)
//! - Z-score against a caller-supplied centre and spread (used by the weighted std dev)

use crate::SPREAD_EPSILON;
use crate::percentiles::Quartiles;

/// Method for outlier detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlierMethod {
    /// Outliers are outside `[Q1 - k*IQR, Q3 + k*IQR]`
    Tukey {
        /// IQR multiplier
        k: f64,
    },
    /// Outliers have `|x - mean| / std_dev > threshold`
    ZScore {
        /// Absolute z-score cut-off
        threshold: f64,
    },
}

/// Result of outlier analysis
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierAnalysis {
    /// Samples that survived, in input order
    pub cleaned_samples: Vec<f64>,
    /// Input indices of the rejected samples
    pub outlier_indices: Vec<usize>,
    /// Lower bound used for detection
    pub lower_bound: f64,
    /// Upper bound used for detection
    pub upper_bound: f64,
    /// Detection method used
    pub method: OutlierMethod,
}

impl OutlierAnalysis {
    fn keep_all(samples: &[f64], method: OutlierMethod, lower: f64, upper: f64) -> Self {
        Self {
            cleaned_samples: samples.to_vec(),
            outlier_indices: Vec::new(),
            lower_bound: lower,
            upper_bound: upper,
            method,
        }
    }
}

/// Keep samples inside the inclusive Tukey fences with multiplier `k`
///
/// # Examples
///
/// ```
/// # use splitlens_stats::tukey_filter;
/// let samples = vec![61.0, 62.0, 60.0, 63.0, 61.5, 240.0];
/// let analysis = tukey_filter(&samples, 1.5);
/// assert_eq!(analysis.outlier_indices, vec![5]);
/// ```
pub fn tukey_filter(samples: &[f64], k: f64) -> OutlierAnalysis {
    let method = OutlierMethod::Tukey { k };
    let Some(quartiles) = Quartiles::of(samples) else {
        return OutlierAnalysis::keep_all(samples, method, 0.0, 0.0);
    };
    let (lower_bound, upper_bound) = quartiles.fences(k);

    let mut outlier_indices = Vec::new();
    let mut cleaned = Vec::with_capacity(samples.len());
    for (i, &sample) in samples.iter().enumerate() {
        if lower_bound <= sample && sample <= upper_bound {
            cleaned.push(sample);
        } else {
            outlier_indices.push(i);
        }
    }

    OutlierAnalysis {
        cleaned_samples: cleaned,
        outlier_indices,
        lower_bound,
        upper_bound,
        method,
    }
}

/// Keep samples whose absolute z-score against `mean`/`std_dev` is at most `threshold`
///
/// A spread below [`SPREAD_EPSILON`] counts as zero: every z-score is taken
/// as 0, so nothing is rejected.
pub fn zscore_filter(
    samples: &[f64],
    mean: f64,
    std_dev: f64,
    threshold: f64,
) -> OutlierAnalysis {
    let method = OutlierMethod::ZScore { threshold };
    if std_dev < SPREAD_EPSILON {
        return OutlierAnalysis::keep_all(samples, method, mean, mean);
    }

    let mut outlier_indices = Vec::new();
    let mut cleaned = Vec::with_capacity(samples.len());
    for (i, &sample) in samples.iter().enumerate() {
        let z_score = (sample - mean) / std_dev;
        if z_score.abs() <= threshold {
            cleaned.push(sample);
        } else {
            outlier_indices.push(i);
        }
    }

    OutlierAnalysis {
        cleaned_samples: cleaned,
        outlier_indices,
        lower_bound: mean - threshold * std_dev,
        upper_bound: mean + threshold * std_dev,
        method,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_outliers() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = tukey_filter(&samples, 1.5);

        assert!(result.outlier_indices.is_empty());
        assert_eq!(result.cleaned_samples, samples);
    }

    #[test]
    fn test_tukey_rejects_both_tails() {
        let samples = vec![0.1, 10.0, 11.0, 10.5, 10.2, 9.8, 500.0];
        let result = tukey_filter(&samples, 1.5);

        assert_eq!(result.outlier_indices, vec![0, 6]);
        assert_eq!(result.cleaned_samples, vec![10.0, 11.0, 10.5, 10.2, 9.8]);
    }

    #[test]
    fn test_tukey_fence_is_inclusive() {
        // iqr = 0 collapses both fences onto the value itself
        let samples = vec![5.0; 6];
        let result = tukey_filter(&samples, 1.5);

        assert_eq!(result.lower_bound, 5.0);
        assert_eq!(result.upper_bound, 5.0);
        assert_eq!(result.cleaned_samples.len(), 6);
    }

    #[test]
    fn test_zscore_filter_keeps_order() {
        let samples = vec![5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 50.0];
        // population mean 9.5, std dev 13.5
        let result = zscore_filter(&samples, 9.5, 13.5, 2.0);

        assert_eq!(result.outlier_indices, vec![9]);
        assert_eq!(result.cleaned_samples.len(), 9);
        assert_eq!(result.method, OutlierMethod::ZScore { threshold: 2.0 });
    }

    #[test]
    fn test_zscore_zero_spread_keeps_everything() {
        let samples = vec![120.0; 10];
        let result = zscore_filter(&samples, 120.0, 0.0, 2.0);

        assert!(result.outlier_indices.is_empty());
        assert_eq!(result.cleaned_samples.len(), 10);
    }

    #[test]
    fn test_zscore_rounding_noise_counts_as_zero_spread() {
        // 0.29 has no exact binary form; its mean drifts by an ulp
        let samples = vec![0.29; 20];
        let mean = samples.iter().sum::<f64>() / 20.0;
        let result = zscore_filter(&samples, mean, 1e-15, 2.0);

        assert!(result.outlier_indices.is_empty());
        assert_eq!(result.cleaned_samples.len(), 20);
    }

    #[test]
    fn test_empty_samples() {
        let result = tukey_filter(&[], 1.5);
        assert!(result.outlier_indices.is_empty());
        assert!(result.cleaned_samples.is_empty());
    }
}
