//! Layer statistics.
//!
//! A stat turns the raw data of one layer into the values a geom draws. Each
//! stat only knows how to compute a single group; [`ComputeStat::compute_layer`]
//! splits the layer by its `group` column, runs the stat per group, and stacks
//! the results back together.
//!
//! The set of stats is closed: [`Stat`] has one variant per kind, and a layer
//! picks its variant once from a [`StatConfig`] when the pipeline is built.
//!
//! # Example
//!
//! ```ignore
//! let config: StatConfig = serde_json::from_str(r#"{"stat": "ecdf", "n": 20}"#)?;
//! let stat = Stat::from_config(&config)?;
//! let result = stat.compute_layer(&table)?;
//! ```

pub mod ecdf;
pub mod identity;

pub use ecdf::StatEcdf;
pub use identity::StatIdentity;

use serde::{Deserialize, Serialize};

use crate::error::{StatError, StatResult};
use crate::params::{EcdfParams, Geom, Position, StatParams};
use crate::table::Table;

/// Column that splits a layer into independently computed groups
pub const GROUP_COLUMN: &str = "group";

/// Static description of a stat
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatMetadata {
    /// Short name (e.g., "ecdf")
    pub name: String,

    /// Aesthetics the layer data must provide
    pub required_aes: Vec<String>,

    /// Aesthetics mapped to computed variables by default, as `(aes, variable)`
    pub default_aes: Vec<(String, String)>,

    /// Columns the stat adds to its output
    pub creates: Vec<String>,

    /// Geom used to draw the result
    pub geom: Geom,

    /// Position adjustment applied to the result
    pub position: Position,
}

/// The core trait all stats implement.
///
/// Stats are stateless; everything they need is fixed at construction.
pub trait ComputeStat: Send + Sync {
    /// Get static metadata describing this stat
    fn metadata(&self) -> &StatMetadata;

    /// Compute one group of layer data
    fn compute_group(&self, data: &Table) -> StatResult<Table>;

    /// Compute every group of a layer.
    ///
    /// Required aesthetics are checked up front. Groups are computed in the
    /// order they first appear. Columns that are constant within a group and
    /// not produced by the stat are carried onto each of its output rows.
    fn compute_layer(&self, data: &Table) -> StatResult<Table> {
        let meta = self.metadata();
        check_required_aes(meta, data)?;

        // An empty layer has no groups; compute it whole so the stat decides
        if !data.contains(GROUP_COLUMN) || data.is_empty() {
            let result = self.compute_group(data)?;
            return carry_constant_columns(data, result);
        }

        let groups = data.group_indices(GROUP_COLUMN)?;
        tracing::debug!(
            "stat_{}: computing {} groups over {} rows",
            meta.name,
            groups.len(),
            data.len()
        );

        let parts = groups
            .iter()
            .map(|rows| {
                let group = data.take(rows);
                let result = self.compute_group(&group)?;
                carry_constant_columns(&group, result)
            })
            .collect::<StatResult<Vec<_>>>()?;

        Ok(Table::concat(parts))
    }
}

fn check_required_aes(meta: &StatMetadata, data: &Table) -> StatResult<()> {
    match meta.required_aes.iter().find(|aes| !data.contains(aes)) {
        Some(aes) => Err(StatError::MissingColumn {
            column: aes.clone(),
        }),
        None => Ok(()),
    }
}

fn carry_constant_columns(group: &Table, mut result: Table) -> StatResult<Table> {
    let rows = result.len();
    for (name, column) in group.columns() {
        if result.contains(name) || !column.is_constant() {
            continue;
        }
        if let Some(repeated) = column.repeat_first(rows) {
            result.insert(name, repeated)?;
        }
    }
    Ok(result)
}

/// Serializable choice of stat for a layer declaration.
///
/// Tagged by `stat`; the remaining fields are the stat's parameters:
/// `{"stat": "ecdf", "n": 50, "geom": "step"}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stat", rename_all = "snake_case")]
pub enum StatConfig {
    Identity,
    Ecdf(StatParams),
}

impl StatConfig {
    /// Parse a layer's stat declaration from JSON
    pub fn from_json(json: &str) -> StatResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The closed family of stats
#[derive(Clone, Debug)]
pub enum Stat {
    Identity(StatIdentity),
    Ecdf(StatEcdf),
}

impl Stat {
    pub fn identity() -> Self {
        Stat::Identity(StatIdentity::new())
    }

    pub fn ecdf(params: EcdfParams) -> Self {
        Stat::Ecdf(StatEcdf::new(params))
    }

    /// Resolve a layer declaration, validating its parameters
    pub fn from_config(config: &StatConfig) -> StatResult<Self> {
        match config {
            StatConfig::Identity => Ok(Self::identity()),
            StatConfig::Ecdf(params) => Ok(Stat::Ecdf(StatEcdf::from_params(params)?)),
        }
    }

    /// Parse and resolve a layer declaration from JSON
    pub fn from_json(json: &str) -> StatResult<Self> {
        Self::from_config(&StatConfig::from_json(json)?)
    }
}

impl Default for Stat {
    fn default() -> Self {
        Self::identity()
    }
}

impl ComputeStat for Stat {
    fn metadata(&self) -> &StatMetadata {
        match self {
            Stat::Identity(stat) => stat.metadata(),
            Stat::Ecdf(stat) => stat.metadata(),
        }
    }

    fn compute_group(&self, data: &Table) -> StatResult<Table> {
        match self {
            Stat::Identity(stat) => stat.compute_group(data),
            Stat::Ecdf(stat) => stat.compute_group(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;
    use std::num::NonZeroUsize;

    #[test]
    fn test_config_ecdf() {
        let config = StatConfig::from_json(r#"{"stat": "ecdf", "n": 3}"#).unwrap();
        let stat = Stat::from_config(&config).unwrap();

        let Stat::Ecdf(ecdf) = &stat else {
            panic!("expected the ecdf stat, got {:?}", stat);
        };
        assert_eq!(ecdf.params().n, NonZeroUsize::new(3));
        assert_eq!(stat.metadata().name, "ecdf");
    }

    #[test]
    fn test_config_ecdf_without_params() {
        let stat = Stat::from_json(r#"{"stat": "ecdf"}"#).unwrap();
        assert_eq!(stat.metadata().geom, Geom::Step);
    }

    #[test]
    fn test_config_identity() {
        let stat = Stat::from_json(r#"{"stat": "identity"}"#).unwrap();
        assert!(matches!(stat, Stat::Identity(_)));
    }

    #[test]
    fn test_config_unknown_stat() {
        let err = Stat::from_json(r#"{"stat": "density"}"#).unwrap_err();
        assert!(matches!(err, StatError::Config(_)));
    }

    #[test]
    fn test_config_bad_n() {
        let err = Stat::from_json(r#"{"stat": "ecdf", "n": 0}"#).unwrap_err();
        assert!(matches!(err, StatError::InvalidParameter { ref name, .. } if name == "n"));
    }

    #[test]
    fn test_config_serializes_with_tag() {
        let mut params = StatParams::new();
        params.set_int("n", 5);
        let json = serde_json::to_string(&StatConfig::Ecdf(params)).unwrap();
        assert!(json.contains(r#""stat":"ecdf""#));
        assert!(json.contains(r#""n":5"#));
    }

    #[test]
    fn test_compute_layer_requires_x() {
        let data = Table::new().with_numeric("y", vec![1.0]).unwrap();
        let err = Stat::ecdf(EcdfParams::new())
            .compute_layer(&data)
            .unwrap_err();
        assert!(matches!(err, StatError::MissingColumn { ref column } if column == "x"));
    }

    #[test]
    fn test_compute_layer_carries_constant_columns() {
        let data = Table::new()
            .with_numeric("x", vec![1.0, 2.0])
            .unwrap()
            .with_column("colour", vec!["red", "red"])
            .unwrap()
            .with_column("label", vec!["a", "b"])
            .unwrap();

        let result = Stat::ecdf(EcdfParams::new()).compute_layer(&data).unwrap();
        assert_eq!(
            result.get("colour"),
            Some(&Column::Discrete(vec!["red".to_string(); 4]))
        );
        assert!(!result.contains("label"));
    }

    #[test]
    fn test_identity_layer_passthrough() {
        let data = Table::new()
            .with_numeric("x", vec![3.0, 1.0])
            .unwrap()
            .with_column("group", vec!["a", "b"])
            .unwrap();
        let result = Stat::default().compute_layer(&data).unwrap();
        assert_eq!(result, data);
    }
}
