//! Positional Tercile Weighting
//!
//! Weights a sequence by position: the first half of the positions gets
//! [`LOW_WEIGHT`], positions up to the 85% mark get [`MID_WEIGHT`], the rest
//! get [`HIGH_WEIGHT`]. Callers decide what "position" means (value rank for
//! the weighted average, attempt order for the weighted std dev).

use crate::{HIGH_WEIGHT, LOW_CUTOFF, LOW_WEIGHT, MID_CUTOFF, MID_WEIGHT};

/// Weight of the element at `index` in a sequence of `count` elements
pub fn tercile_weight(index: usize, count: usize) -> f64 {
    let position = index as f64;
    let count = count as f64;
    if position < LOW_CUTOFF * count {
        LOW_WEIGHT
    } else if position < MID_CUTOFF * count {
        MID_WEIGHT
    } else {
        HIGH_WEIGHT
    }
}

/// Weights for every position of a sequence of `count` elements
pub fn tercile_weights(count: usize) -> Vec<f64> {
    (0..count).map(|i| tercile_weight(i, count)).collect()
}

/// Positionally weighted mean, `None` if the weights sum to zero
pub fn weighted_mean(values: &[f64]) -> Option<f64> {
    let weights = tercile_weights(values.len());
    let total_weight: f64 = weights.iter().sum();
    if total_weight == 0.0 {
        return None;
    }

    let total: f64 = values.iter().zip(&weights).map(|(v, w)| v * w).sum();
    Some(total / total_weight)
}

/// Positionally weighted population standard deviation around a fixed `center`
pub fn weighted_std_dev_around(values: &[f64], center: f64) -> Option<f64> {
    let weights = tercile_weights(values.len());
    let total_weight: f64 = weights.iter().sum();
    if total_weight == 0.0 {
        return None;
    }

    let variance = values
        .iter()
        .zip(&weights)
        .map(|(v, w)| w * (v - center).powi(2))
        .sum::<f64>()
        / total_weight;
    Some(variance.sqrt())
}
