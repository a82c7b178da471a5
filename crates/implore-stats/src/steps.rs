//! ECDF step-plot vertices
//!
//! Turns a sample into the vertex list a step geometry draws: the ECDF
//! sampled at the evaluation points, bracketed by a synthetic `(min - dr, 0)`
//! vertex on the left and `(max + dr, 1)` on the right so both flat tails
//! show up.
//!
//! The padding margin `dr` follows R's `plot.stepfun`:
//!
//! - several distinct evaluation points:
//!   `dr = max(0.08 * (max - min), median(diff(points)))`
//! - a single distinct point `v`: `dr = |v| / 16` (zero when `v == 0`)

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::ecdf::Ecdf;
use crate::error::EcdfResult;
use crate::points::{diff, linspace, median, unique_sorted};

/// Fraction of the evaluation range used as the minimum padding margin
pub const RANGE_PADDING_FRACTION: f64 = 0.08;

/// Divisor applied to `|v|` when every evaluation point equals `v`
pub const SINGLE_POINT_PADDING_DIVISOR: f64 = 16.0;

/// Vertices of a padded ECDF step function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcdfSteps {
    x: Vec<f64>,
    y: Vec<f64>,
    padding: f64,
}

impl EcdfSteps {
    /// X coordinates, including both padding vertices
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Cumulative densities, starting at 0 and ending at 1
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Padding margin `dr` applied on both ends
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// The evaluation points, without the padding vertices
    pub fn evaluation_points(&self) -> &[f64] {
        &self.x[1..self.x.len() - 1]
    }

    /// Number of vertices (evaluation points + 2)
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false; there are at least three vertices
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate over `(x, y)` vertex pairs in ascending x
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Consume into `(x, y)` column vectors
    pub fn into_columns(self) -> (Vec<f64>, Vec<f64>) {
        (self.x, self.y)
    }
}

/// Points at which the ECDF of `ecdf` is sampled.
///
/// `None` selects every distinct observation; `Some(n)` selects `n` evenly
/// spaced points from the smallest to the largest observation.
pub fn evaluation_points(ecdf: &Ecdf, n: Option<NonZeroUsize>) -> Vec<f64> {
    match n {
        None => unique_sorted(ecdf.values()),
        Some(n) => linspace(ecdf.min(), ecdf.max(), n),
    }
}

/// Padding margin for sorted, non-empty evaluation points.
///
/// Points that collapse to one distinct value use the single-point rule,
/// however many of them there are.
pub fn padding_margin(points: &[f64]) -> f64 {
    let (Some(&lo), Some(&hi)) = (points.first(), points.last()) else {
        return 0.0;
    };

    if lo == hi {
        return lo.abs() / SINGLE_POINT_PADDING_DIVISOR;
    }

    let gap = median(&diff(points)).unwrap_or(0.0);
    (RANGE_PADDING_FRACTION * (hi - lo)).max(gap)
}

/// Compute the padded ECDF step vertices for a sample.
///
/// Non-finite observations are ignored. Fails with
/// [`EcdfError::EmptySample`](crate::EcdfError::EmptySample) when no finite
/// observation remains.
pub fn ecdf_steps(observations: &[f64], n: Option<NonZeroUsize>) -> EcdfResult<EcdfSteps> {
    let ecdf = Ecdf::new(observations)?;
    let points = evaluation_points(&ecdf, n);
    let padding = padding_margin(&points);

    let mut x = Vec::with_capacity(points.len() + 2);
    let mut y = Vec::with_capacity(points.len() + 2);

    x.push(points[0] - padding);
    y.push(0.0);
    for &v in &points {
        x.push(v);
        y.push(ecdf.evaluate(v));
    }
    x.push(points[points.len() - 1] + padding);
    y.push(1.0);

    Ok(EcdfSteps { x, y, padding })
}
