//! Error types for the analysis and synthesis engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during analysis or synthesis.
///
/// Every engine operation is a pure computation over its inputs, so all of
/// these are input-validation failures reported to the caller as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Non-positive duration, sample rate, formant count or similar.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Two buffers that must be the same length are not.
    #[error("length mismatch in {context}: expected {expected} samples, found {actual}")]
    LengthMismatch {
        /// Operation or operand pair that was checked.
        context: String,
        /// Length of the reference operand.
        expected: usize,
        /// Length of the offending operand.
        actual: usize,
    },

    /// The estimated fundamental frequency is zero or otherwise unusable.
    #[error("invalid fundamental frequency: {frequency} Hz")]
    InvalidFundamental {
        /// The rejected fundamental.
        frequency: f64,
    },

    /// A syllabic structure entry references a missing source buffer.
    #[error("{kind} index {index} out of range ({len} available)")]
    IndexOutOfRange {
        /// Which source list was indexed ("vowel" or "consonant").
        kind: String,
        /// The requested index.
        index: usize,
        /// Number of buffers in the source list.
        len: usize,
    },
}

impl EngineError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a length mismatch error.
    pub fn length_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Stable error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidParameter { .. } => "ENGINE_001",
            EngineError::LengthMismatch { .. } => "ENGINE_002",
            EngineError::InvalidFundamental { .. } => "ENGINE_003",
            EngineError::IndexOutOfRange { .. } => "ENGINE_004",
        }
    }

    /// Error category used when grouping diagnostics.
    pub fn category(&self) -> &'static str {
        "engine"
    }
}
