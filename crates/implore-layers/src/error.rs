//! Error types for implore-layers
//!
//! Two families matter to callers:
//! - invalid input: the data handed to a stat cannot be computed on
//! - invalid parameter: the layer was declared with a bad parameter
//!
//! Neither is recovered from here; the rendering pipeline decides whether to
//! skip the group or abort.

use implore_stats::EcdfError;
use thiserror::Error;

/// Main error type for stat computation
#[derive(Error, Debug)]
pub enum StatError {
    /// No finite values left to compute on
    #[error("Empty group: no finite values in column '{column}'")]
    EmptyGroup { column: String },

    /// Required aesthetic column absent
    #[error("Required column '{column}' not found in layer data")]
    MissingColumn { column: String },

    /// Column holds labels where numbers are required
    #[error("Column '{column}' must be numeric")]
    NonNumericColumn { column: String },

    /// Column length disagrees with the table
    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Parameter present but unusable
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Malformed layer configuration
    #[error("Invalid layer configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl StatError {
    /// Shorthand for an [`StatError::InvalidParameter`]
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        StatError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the layer data
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            StatError::EmptyGroup { .. }
                | StatError::MissingColumn { .. }
                | StatError::NonNumericColumn { .. }
                | StatError::LengthMismatch { .. }
        )
    }

    /// True for errors caused by the layer parameters or configuration
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            StatError::InvalidParameter { .. } | StatError::Config(_)
        )
    }
}

impl From<EcdfError> for StatError {
    fn from(err: EcdfError) -> Self {
        match err {
            EcdfError::EmptySample => StatError::EmptyGroup {
                column: "x".to_string(),
            },
        }
    }
}

/// Result type alias for stat operations
pub type StatResult<T> = Result<T, StatError>;
