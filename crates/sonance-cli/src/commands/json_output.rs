//! JSON output types for the `--json` flag.

use serde::{Deserialize, Serialize};
use sonance_engine::{EngineError, Formant};

/// Error codes for CLI operations.
///
/// CLI-level failures use `CLI_XXX`; engine failures pass their own
/// `ENGINE_XXX` code through.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// File is not a decodable WAV
    pub const WAV_DECODE: &str = "CLI_002";
    /// Config file could not be loaded or is invalid
    pub const CONFIG: &str = "CLI_003";
    /// JSON serialization error
    pub const JSON_SERIALIZE: &str = "CLI_009";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "ENGINE_003")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Wraps an engine error, keeping its code.
    pub fn from_engine(error: &EngineError) -> Self {
        Self::new(error.code(), error.to_string())
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// JSON output for the `analyze` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeOutput {
    /// Whether analysis succeeded
    pub success: bool,
    /// Errors encountered during analysis
    pub errors: Vec<JsonError>,
    /// Analysis result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalyzeResult>,
}

impl AnalyzeOutput {
    /// Creates a successful analyze output.
    pub fn success(result: AnalyzeResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed analyze output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Analysis result details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResult {
    /// Input file path
    pub input: String,
    /// BLAKE3 hash of the input file
    pub input_hash: String,
    /// Channel count before downmixing
    pub source_channels: u16,
    #[serde(flatten)]
    pub report: AnalysisReport,
}

/// What the engine found in a buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub sample_rate: u32,
    pub num_samples: usize,
    pub duration_seconds: f64,
    /// Number of spectrum bins
    pub spectrum_bins: usize,
    /// Frequency resolution in Hz
    pub bin_resolution_hz: f64,
    pub peak_magnitude: f64,
    /// Loudest bin; absent when it is the 0 Hz bin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fundamental_hz: Option<f64>,
    pub harmonic_ratio_count: usize,
    pub formants: Vec<Formant>,
}
