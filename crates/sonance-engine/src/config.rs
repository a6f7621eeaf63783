//! Engine-wide defaults and their serializable configuration.

use serde::{Deserialize, Serialize};

use crate::analysis::PeakPicking;
use crate::error::{EngineError, EngineResult};
use crate::integrate::{FundamentalSource, ResynthesisOptions};

/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Default number of formants returned by peak picking.
pub const DEFAULT_NUM_FORMANTS: usize = 5;

/// Default gain applied to the noise operand when mixing.
pub const DEFAULT_NOISE_LEVEL: f64 = 0.5;

/// Overridable defaults for every engine operation.
///
/// Missing fields take their default when deserialized, so a config file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of formants to detect.
    pub num_formants: usize,
    /// Noise gain for sine/noise mixing.
    pub noise_level: f64,
    /// Minimum spacing between detected peaks in Hz (0 disables suppression).
    pub min_peak_separation_hz: f64,
    /// Seed for noise generation; `None` means a fresh seed per run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            num_formants: DEFAULT_NUM_FORMANTS,
            noise_level: DEFAULT_NOISE_LEVEL,
            min_peak_separation_hz: 0.0,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Parses a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> EngineResult<()> {
        if self.sample_rate == 0 {
            return Err(EngineError::invalid_param(
                "sample_rate",
                "must be greater than 0",
            ));
        }
        if self.num_formants == 0 {
            return Err(EngineError::invalid_param(
                "num_formants",
                "must be greater than 0",
            ));
        }
        if !self.noise_level.is_finite() {
            return Err(EngineError::invalid_param("noise_level", "must be finite"));
        }
        if !(self.min_peak_separation_hz >= 0.0) {
            return Err(EngineError::invalid_param(
                "min_peak_separation_hz",
                "must be zero or positive",
            ));
        }
        Ok(())
    }

    /// Peak-picking settings derived from this config.
    pub fn peak_picking(&self) -> PeakPicking {
        PeakPicking {
            num_formants: self.num_formants,
            min_separation_hz: self.min_peak_separation_hz,
        }
    }

    /// Resynthesis settings derived from this config.
    pub fn resynthesis_options(&self, fundamental_source: FundamentalSource) -> ResynthesisOptions {
        ResynthesisOptions {
            fundamental_source,
            peak_picking: self.peak_picking(),
            noise_level: self.noise_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = EngineConfig::default();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.num_formants, 5);
        assert_eq!(config.noise_level, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = EngineConfig::from_json(r#"{ "num_formants": 3, "seed": 9 }"#).unwrap();
        assert_eq!(config.num_formants, 3);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.sample_rate, DEFAULT_SAMPLE_RATE);
        assert_eq!(config.noise_level, DEFAULT_NOISE_LEVEL);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let config = EngineConfig {
            sample_rate: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidParameter { .. })
        ));

        let config = EngineConfig {
            num_formants: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            min_peak_separation_hz: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_peak_picking_from_config() {
        let config = EngineConfig {
            num_formants: 3,
            min_peak_separation_hz: 50.0,
            ..Default::default()
        };
        let picking = config.peak_picking();
        assert_eq!(picking.num_formants, 3);
        assert_eq!(picking.min_separation_hz, 50.0);
    }
}
