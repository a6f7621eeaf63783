//! Parallel layer composition.

use crate::buffer::{ensure_same_len, multiply, validate_sample_rate};
use crate::config::DEFAULT_NOISE_LEVEL;
use crate::error::{EngineError, EngineResult};
use crate::primitives::combine_sine_and_noise;

/// Sums `combine_sine_and_noise(sine, noise) · envelope` over parallel layers.
///
/// # Errors
/// `LengthMismatch` if the three lists differ in layer count or any buffer
/// differs in length from the first sine; `InvalidParameter` when there are
/// no layers at all.
pub fn generate_complex_acoustic_phenomena(
    sine_waves: &[Vec<f64>],
    noise_components: &[Vec<f64>],
    spectral_envelopes: &[Vec<f64>],
    sample_rate: u32,
) -> EngineResult<Vec<f64>> {
    validate_sample_rate(sample_rate)?;
    ensure_same_len(
        "generate_complex_acoustic_phenomena (noise layer count)",
        sine_waves.len(),
        noise_components.len(),
    )?;
    ensure_same_len(
        "generate_complex_acoustic_phenomena (envelope layer count)",
        sine_waves.len(),
        spectral_envelopes.len(),
    )?;

    let first = sine_waves.first().ok_or_else(|| {
        EngineError::invalid_param("sine_waves", "at least one layer is required")
    })?;
    let mut mix = vec![0.0; first.len()];

    for ((sine, noise), envelope) in sine_waves
        .iter()
        .zip(noise_components)
        .zip(spectral_envelopes)
    {
        ensure_same_len(
            "generate_complex_acoustic_phenomena (layer length)",
            mix.len(),
            sine.len(),
        )?;
        let layer = multiply(
            "generate_complex_acoustic_phenomena (envelope)",
            &combine_sine_and_noise(sine, noise, DEFAULT_NOISE_LEVEL)?,
            envelope,
        )?;
        for (m, l) in mix.iter_mut().zip(layer) {
            *m += l;
        }
    }

    Ok(mix)
}
