//! Processing error types.

use thiserror::Error;

/// Errors that can occur while building a series or computing its statistics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessingError {
    /// Malformed operation parameter (zero window, out-of-range lag)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Series too short for the requested operation
    #[error("insufficient data: need {required} values, got {actual}")]
    InsufficientData {
        /// Required number of values.
        required: usize,
        /// Actual number of values in the series.
        actual: usize,
    },

    /// Input table rejected at the boundary
    #[error("invalid series: {0}")]
    InvalidSeries(String),
}

impl ProcessingError {
    /// Creates an `InvalidArgument` error with a message.
    #[must_use]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        ProcessingError::InvalidArgument(msg.into())
    }

    /// Creates an `InvalidSeries` error with a message.
    #[must_use]
    pub fn invalid_series(msg: impl Into<String>) -> Self {
        ProcessingError::InvalidSeries(msg.into())
    }
}
