//! Summary statistics over field values.
//!
//! [`RunningStats`] folds values one at a time using Welford's update, so a
//! summary over an arbitrarily large range needs constant memory. Stores with a
//! native aggregation primitive produce a [`FieldSummary`] directly; both paths
//! end up in [`MetricsResult::from_summary`].

use crate::models::Field;
use serde::{Deserialize, Serialize};

/// Unrounded summary of a non-empty set of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSummary {
    /// Number of values.
    pub count: u64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Population standard deviation (divides by `count`).
    pub std_dev: f64,
}

/// Single-pass accumulator for count, mean, min, max and variance.
///
/// # Example
///
/// ```
/// use shared::stats::RunningStats;
///
/// let stats: RunningStats = [10.0, 20.0, 30.0].into_iter().collect();
/// let summary = stats.summary().unwrap();
/// assert_eq!(summary.count, 3);
/// assert_eq!(summary.mean, 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one value into the accumulator.
    #[allow(clippy::cast_precision_loss)]
    pub fn push(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }

        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Number of values folded so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Population variance, `0.0` for fewer than two values.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn population_variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            // Rounding can leave a tiny negative residue for constant inputs.
            (self.m2 / self.count as f64).max(0.0)
        }
    }

    /// Returns the summary, or `None` if no value was pushed.
    #[must_use]
    pub fn summary(&self) -> Option<FieldSummary> {
        if self.count == 0 {
            return None;
        }

        Some(FieldSummary {
            count: self.count,
            mean: self.mean,
            min: self.min,
            max: self.max,
            std_dev: self.population_variance().sqrt(),
        })
    }
}

impl Extend<f64> for RunningStats {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl FromIterator<f64> for RunningStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::new();
        stats.extend(iter);
        stats
    }
}

/// Rounds to two decimal places, half away from zero. Negative zero becomes zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}

/// Statistics for one field over a date range, as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    /// The summarized field.
    pub field: Field,
    /// Number of observations in range.
    pub count: u64,
    /// Mean value.
    pub avg: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Population standard deviation.
    #[serde(rename = "stdDev")]
    pub std_dev: f64,
}

impl MetricsResult {
    /// Builds the result from a summary, rounding every real to two decimals.
    #[must_use]
    pub fn from_summary(field: Field, summary: &FieldSummary) -> Self {
        Self {
            field,
            count: summary.count,
            avg: round2(summary.mean),
            min: round2(summary.min),
            max: round2(summary.max),
            std_dev: round2(summary.std_dev),
        }
    }
}
