//! Empirical Cumulative Distribution Function (ECDF)
//!
//! The ECDF is a step function that estimates the underlying CDF of a sample.
//! For a sample of n values, ECDF(x) = (number of values <= x) / n.
//!
//! The function is right-continuous and jumps by 1/n at every observation,
//! so tied observations accumulate their jump mass at a single x.

use serde::{Deserialize, Serialize};

use crate::error::{EcdfError, EcdfResult};

/// Empirical Cumulative Distribution Function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ecdf {
    /// Sorted finite observations
    values: Vec<f64>,
}

impl Ecdf {
    /// Build an ECDF from a sample.
    ///
    /// Non-finite values are ignored. Fails when no finite value remains.
    ///
    /// Time complexity: O(n log n) for sorting
    pub fn new(data: &[f64]) -> EcdfResult<Self> {
        let mut values: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
        if values.is_empty() {
            return Err(EcdfError::EmptySample);
        }
        values.sort_by(f64::total_cmp);

        Ok(Self { values })
    }

    /// Evaluate the ECDF at a point
    ///
    /// Returns the proportion of values <= x
    /// Time complexity: O(log n)
    pub fn evaluate(&self, x: f64) -> f64 {
        let at_or_below = self.values.partition_point(|&v| v <= x);
        at_or_below as f64 / self.values.len() as f64
    }

    /// Evaluate the ECDF at every point of `xs`, in order
    pub fn evaluate_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }

    /// Smallest observation
    pub fn min(&self) -> f64 {
        self.values[0]
    }

    /// Largest observation
    pub fn max(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Number of observations the distribution was built from
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; an `Ecdf` cannot be built from an empty sample
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sorted observations
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
