//! Numeric estimators shared by the analyzer and the cleaning pipeline.
//!
//! Every function here is total: empty or degenerate input yields a neutral
//! value rather than an error.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Minimum number of values for IQR bounds to be meaningful.
pub const MIN_IQR_VALUES: usize = 4;

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median, averaging the two middle values on even counts; 0 when empty.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let sorted = sorted_copy(values);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// IQR fences around a numeric sample and how many values fall outside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlierBounds {
    pub lower: f64,
    pub upper: f64,
    /// Values strictly outside `[lower, upper]`.
    pub count: usize,
}

impl OutlierBounds {
    /// Check whether a value lies outside the fences.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// Compute IQR fences for `values`.
///
/// Quartiles are taken by index truncation on the sorted values, without
/// interpolation. Returns `None` for fewer than [`MIN_IQR_VALUES`] values.
pub fn iqr_bounds(values: &[f64], multiplier: f64) -> Option<OutlierBounds> {
    if values.len() < MIN_IQR_VALUES {
        return None;
    }

    let sorted = sorted_copy(values);
    let n = sorted.len();
    let q1 = sorted[n / 4];
    let q3 = sorted[(n * 3) / 4];
    let iqr = q3 - q1;

    let mut bounds = OutlierBounds {
        lower: q1 - multiplier * iqr,
        upper: q3 + multiplier * iqr,
        count: 0,
    };
    bounds.count = sorted.iter().filter(|&&v| bounds.is_outlier(v)).count();

    Some(bounds)
}

/// Pearson correlation over paired samples.
///
/// Returns 0 for fewer than two pairs or when either side has no variance.
pub fn pearson(pairs: &[(f64, f64)]) -> f64 {
    if pairs.len() < 2 {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }

    cov / (var_x * var_y).sqrt()
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}
