//! Evaluation-point builders and small sequence helpers
//!
//! The ECDF stat samples its step function either at every distinct
//! observation or at a fixed number of evenly spaced points.

use std::num::NonZeroUsize;

/// Sorted distinct values of `data`, ascending.
///
/// Values are compared exactly; `-0.0` and `0.0` collapse to one point.
pub fn unique_sorted(data: &[f64]) -> Vec<f64> {
    let mut values = data.to_vec();
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| a == b);
    values
}

/// `num` evenly spaced values from `start` to `stop`, both inclusive.
///
/// With `num == 1` the result is `[start]`. The last value is exactly `stop`.
/// A finite range too wide for `stop - start` to be finite (e.g. `-1e308` to
/// `1e308`) is interpolated as `start * (1 - t) + stop * t` instead.
pub fn linspace(start: f64, stop: f64, num: NonZeroUsize) -> Vec<f64> {
    let num = num.get();
    if num == 1 {
        return vec![start];
    }

    let last = (num - 1) as f64;
    let step = (stop - start) / last;
    let mut values: Vec<f64> = if step.is_finite() {
        (0..num).map(|i| start + i as f64 * step).collect()
    } else {
        (0..num)
            .map(|i| {
                let t = i as f64 / last;
                start * (1.0 - t) + stop * t
            })
            .collect()
    };
    values[num - 1] = stop;
    values
}

/// Consecutive differences, `out[i] = data[i + 1] - data[i]`
pub fn diff(data: &[f64]) -> Vec<f64> {
    data.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Median of `data`, averaging the two middle values for even lengths.
///
/// Returns `None` for an empty slice.
pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    };
    Some(median)
}
