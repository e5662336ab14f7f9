#![warn(missing_docs)]
//! Splitlens Statistical Engine
//!
//! Robust statistics over segment durations expressed in seconds:
//! - Linear-interpolation percentiles and quartile fences
//! - Outlier removal via Tukey fences or z-score
//! - Positional tercile weighting that lets the slow tail (or the most
//!   recent attempts) dominate
//! - Plain and weighted mean / median / standard deviation
//!
//! Inputs are plain `f64` slices; the history types and the duration codec
//! live in `splitlens-core`.

mod outliers;
mod percentiles;
mod summary;
mod weighting;

pub use outliers::{OutlierAnalysis, OutlierMethod, tukey_filter, zscore_filter};
pub use percentiles::{
    Quartiles, compute_median, compute_percentile, percentile_of_sorted, sorted_copy,
};
pub use summary::{
    SummaryStatistics, compute_summary, plain_mean, plain_median, population_std_dev,
    weighted_average, weighted_median, weighted_std_dev,
};
pub use weighting::{tercile_weight, tercile_weights, weighted_mean, weighted_std_dev_around};

/// IQR multiplier for the Tukey fences
pub const TUKEY_MULTIPLIER: f64 = 1.5;

/// Absolute z-score beyond which a recent attempt is ignored by the weighted std dev
pub const RECENT_ZSCORE_THRESHOLD: f64 = 2.0;

/// Spreads below half a microsecond count as zero
///
/// Durations are kept to the microsecond, so anything smaller is rounding
/// noise from summing values with no exact binary form.
pub const SPREAD_EPSILON: f64 = 0.5e-6;

/// z-score above which a time counts as inflated
pub const INFLATED_ZSCORE_THRESHOLD: f64 = 3.5;

/// Positions below this fraction of the sequence get [`LOW_WEIGHT`]
pub const LOW_CUTOFF: f64 = 0.50;

/// Positions below this fraction (and above [`LOW_CUTOFF`]) get [`MID_WEIGHT`]
pub const MID_CUTOFF: f64 = 0.85;

/// Weight of the first half
pub const LOW_WEIGHT: f64 = 0.1;

/// Weight between the 50% and 85% marks
pub const MID_WEIGHT: f64 = 0.5;

/// Weight of the last 15%
pub const HIGH_WEIGHT: f64 = 2.0;
