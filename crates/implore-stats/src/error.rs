//! Error types for implore-stats

use thiserror::Error;

/// Errors raised by the numeric ECDF routines
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcdfError {
    /// No finite observations to build the distribution from
    #[error("Cannot build an ECDF from an empty sample")]
    EmptySample,
}

/// Result type alias for ECDF operations
pub type EcdfResult<T> = Result<T, EcdfError>;
