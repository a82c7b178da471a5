//! Empirical cumulative distribution stat.
//!
//! Computed variables:
//!
//! - `x` - the evaluation points, bracketed by one padding vertex on each side
//! - `y` - cumulative density at each `x`, from exactly 0 to exactly 1
//!
//! The result is meant for a step geom, which draws the flat tails at 0 and 1
//! out to the padding vertices.

use implore_stats::ecdf_steps;

use crate::error::StatResult;
use crate::params::{EcdfParams, StatParams};
use crate::table::Table;

use super::{ComputeStat, StatMetadata};

/// Stat computing a padded ECDF step function per group
#[derive(Clone, Debug)]
pub struct StatEcdf {
    params: EcdfParams,
    metadata: StatMetadata,
}

impl StatEcdf {
    pub fn new(params: EcdfParams) -> Self {
        Self {
            metadata: StatMetadata {
                name: "ecdf".to_string(),
                required_aes: vec!["x".to_string()],
                default_aes: vec![("y".to_string(), "y".to_string())],
                creates: vec!["y".to_string()],
                geom: params.geom,
                position: params.position,
            },
            params,
        }
    }

    /// Build from a layer's loose parameters, validating them
    pub fn from_params(params: &StatParams) -> StatResult<Self> {
        Ok(Self::new(EcdfParams::try_from(params)?))
    }

    pub fn params(&self) -> &EcdfParams {
        &self.params
    }
}

impl Default for StatEcdf {
    fn default() -> Self {
        Self::new(EcdfParams::default())
    }
}

impl ComputeStat for StatEcdf {
    fn metadata(&self) -> &StatMetadata {
        &self.metadata
    }

    fn compute_group(&self, data: &Table) -> StatResult<Table> {
        let x = data.numeric("x")?;

        let finite: Vec<f64> = x.iter().copied().filter(|v| v.is_finite()).collect();
        let removed = x.len() - finite.len();
        if removed > 0 {
            if self.params.na_rm {
                tracing::debug!("stat_ecdf: removed {} rows with non-finite x", removed);
            } else {
                tracing::warn!(
                    "stat_ecdf: removed {} rows containing non-finite values",
                    removed
                );
            }
        }

        let steps = ecdf_steps(&finite, self.params.n)?;
        tracing::debug!(
            "stat_ecdf: {} observations -> {} vertices (dr = {})",
            finite.len(),
            steps.len(),
            steps.padding()
        );

        let (xs, ys) = steps.into_columns();
        Table::new().with_numeric("x", xs)?.with_numeric("y", ys)
    }
}
