//! implore-layers - Layer statistics for implore's plotting grammar
//!
//! A layer hands its data to a *stat* before drawing. This crate provides the
//! stat machinery for the ECDF layer:
//!
//! - **Table**: columns keyed by aesthetic name (`x`, `group`, `colour`, ...)
//! - **Params**: the loose parameter bag a layer declares, and the typed,
//!   validated [`EcdfParams`] built from it
//! - **Stat**: the closed family of stats, each computing one group at a time
//! - **Config**: serde-tagged layer configuration resolved to a [`Stat`] once,
//!   when the pipeline is assembled
//!
//! # Example
//!
//! ```ignore
//! let stat = Stat::from_json(r#"{"stat": "ecdf", "n": 50}"#)?;
//! let data = Table::new().with_numeric("x", samples)?;
//! let steps = stat.compute_layer(&data)?;
//! ```

pub mod error;
pub mod params;
pub mod stat;
pub mod table;

pub use error::{StatError, StatResult};
pub use params::{EcdfParams, Geom, ParamValue, Position, StatParams};
pub use stat::{ComputeStat, Stat, StatConfig, StatEcdf, StatIdentity, StatMetadata};
pub use table::{Column, Table};
