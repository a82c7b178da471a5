//! implore-stats - Statistical functions for scientific visualization
//!
//! This crate provides the numeric side of implore's ECDF stat:
//!
//! - **ECDF**: Empirical Cumulative Distribution Function, `F(v) = #{x <= v} / N`
//! - **Points**: evaluation-point builders (distinct values, evenly spaced)
//! - **Steps**: ECDF vertices padded with flat tails at y = 0 and y = 1
//!
//! Everything here is a pure function of its inputs. The plotting-grammar
//! side (tables, groups, parameters) lives in `implore-layers`.

pub mod ecdf;
pub mod error;
pub mod points;
pub mod steps;

pub use ecdf::*;
pub use error::*;
pub use points::*;
pub use steps::*;
