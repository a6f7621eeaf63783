//! Analysis-resynthesis loop and layer blending.
//!
//! [`resynthesize_with`] analyzes a buffer once, turns the analysis into
//! synthesis parameters and renders a buffer of the same length:
//!
//! 1. spectrum → formant peaks and harmonic ratios
//! 2. ratios become unit-amplitude harmonics of the chosen fundamental
//! 3. the additive tone is shaped by every peak (peak magnitude as bandwidth)
//! 4. fresh Gaussian noise is mixed in at `noise_level`

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::{
    compute_spectrum, fundamental_of, harmonic_ratios_of, pick_peaks, PeakPicking,
};
use crate::buffer::{ensure_same_len, validate_sample_rate};
use crate::compose::{generate_complex_acoustic_phenomena, generate_synthetic_speech};
use crate::config::DEFAULT_NOISE_LEVEL;
use crate::error::EngineResult;
use crate::primitives::{
    combine_sine_and_noise, harmonic_samples, noise_samples, shape_with_resonances,
};
use crate::types::{Harmonic, Resonance};

/// Which frequency drives the regenerated harmonic tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundamentalSource {
    /// The first spectrum bin. This is 0 Hz under standard binning, so the
    /// harmonic tone is silent and only the noise survives shaping.
    #[default]
    LegacyFirstBin,
    /// The loudest bin, as used for the harmonic ratios.
    Detected,
}

/// Settings for [`resynthesize_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResynthesisOptions {
    pub fundamental_source: FundamentalSource,
    pub peak_picking: PeakPicking,
    pub noise_level: f64,
}

impl Default for ResynthesisOptions {
    fn default() -> Self {
        Self {
            fundamental_source: FundamentalSource::LegacyFirstBin,
            peak_picking: PeakPicking::default(),
            noise_level: DEFAULT_NOISE_LEVEL,
        }
    }
}

impl ResynthesisOptions {
    /// Default options with the detected fundamental.
    pub fn detected() -> Self {
        Self {
            fundamental_source: FundamentalSource::Detected,
            ..Default::default()
        }
    }
}

/// Resynthesizes `sound` with the legacy 0 Hz fundamental and default
/// peak picking. Logs a warning, as does any [`resynthesize_with`] call that
/// selects [`FundamentalSource::LegacyFirstBin`].
///
/// # Errors
/// `InvalidFundamental` if the loudest bin of `sound` is 0 Hz.
pub fn integrate_theoretical_acoustics_with_practical_synthesis<R: Rng + ?Sized>(
    sound: &[f64],
    sample_rate: u32,
    rng: &mut R,
) -> EngineResult<Vec<f64>> {
    resynthesize_with(sound, sample_rate, &ResynthesisOptions::default(), rng)
}

/// Analyzes `sound` and renders a new buffer of the same length from the
/// analysis.
///
/// # Arguments
/// * `sound` - Input buffer
/// * `sample_rate` - Sample rate in Hz
/// * `options` - Fundamental choice, peak picking and noise gain
/// * `rng` - Source for the blended noise
pub fn resynthesize_with<R: Rng + ?Sized>(
    sound: &[f64],
    sample_rate: u32,
    options: &ResynthesisOptions,
    rng: &mut R,
) -> EngineResult<Vec<f64>> {
    let spectrum = compute_spectrum(sound, sample_rate)?;
    let peaks = pick_peaks(&spectrum, &options.peak_picking)?;
    let ratios = harmonic_ratios_of(&spectrum)?;

    let fundamental = match options.fundamental_source {
        FundamentalSource::LegacyFirstBin => {
            warn!(
                "resynthesizing with the first spectrum bin (0 Hz) as fundamental; \
                 the harmonic tone will be silent"
            );
            spectrum.frequencies[0]
        }
        FundamentalSource::Detected => fundamental_of(&spectrum)?.frequency,
    };
    debug!(
        fundamental,
        source = ?options.fundamental_source,
        peaks = peaks.len(),
        ratios = ratios.len(),
        "resynthesizing from analysis"
    );

    let harmonics: Vec<Harmonic> = ratios.iter().map(|&r| Harmonic::new(r, 1.0)).collect();
    let resonances: Vec<Resonance> = peaks
        .iter()
        .map(|p| Resonance::new(p.frequency, p.peak_magnitude))
        .collect();

    let n = sound.len();
    let tone = shape_with_resonances(
        harmonic_samples(fundamental, &harmonics, n, sample_rate),
        &resonances,
        sample_rate,
    );
    combine_sine_and_noise(&tone, &noise_samples(n, rng), options.noise_level)
}

/// Blends a layered mix with a synthetic-speech buffer.
///
/// The result is `layers + 0.5 · speech`, where `layers` comes from
/// [`generate_complex_acoustic_phenomena`] and `speech` from
/// [`generate_synthetic_speech`].
///
/// # Errors
/// `LengthMismatch` if the layer length differs from
/// `round(duration · sample_rate)`, or on any length error of the parts.
#[allow(clippy::too_many_arguments)]
pub fn integrate_new_tools_with_existing_tools(
    sine_waves: &[Vec<f64>],
    noise_components: &[Vec<f64>],
    spectral_envelopes: &[Vec<f64>],
    pitch: f64,
    formant_freqs: &[f64],
    formant_bandwidths: &[f64],
    duration: f64,
    sample_rate: u32,
) -> EngineResult<Vec<f64>> {
    validate_sample_rate(sample_rate)?;
    debug!(
        layers = sine_waves.len(),
        pitch,
        formants = formant_freqs.len(),
        duration,
        sample_rate,
        "blending layers with synthetic speech"
    );
    let layers = generate_complex_acoustic_phenomena(
        sine_waves,
        noise_components,
        spectral_envelopes,
        sample_rate,
    )?;
    let speech = generate_synthetic_speech(
        pitch,
        formant_freqs,
        formant_bandwidths,
        duration,
        sample_rate,
    )?;
    ensure_same_len(
        "integrate_new_tools_with_existing_tools (speech vs layers)",
        layers.len(),
        speech.len(),
    )?;
    combine_sine_and_noise(&layers, &speech, DEFAULT_NOISE_LEVEL)
}
