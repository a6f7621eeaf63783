//! Buffer-to-buffer transforms: mixing, modulation and resonance shaping.
//!
//! Inputs are never modified; every transform returns a new buffer.

use rand::Rng;
use tracing::debug;

use crate::buffer::{
    ensure_same_len, multiply, resonance_gain, sample_time, sine_at, validate_sample_rate,
};
use crate::error::EngineResult;
use crate::types::Resonance;

use super::generators::noise_samples;

/// Mixes `noise` into `sine` at `noise_level`: `sine + noise_level · noise`.
///
/// # Errors
/// `LengthMismatch` unless both buffers have the same length.
pub fn combine_sine_and_noise(
    sine: &[f64],
    noise: &[f64],
    noise_level: f64,
) -> EngineResult<Vec<f64>> {
    ensure_same_len("combine_sine_and_noise", sine.len(), noise.len())?;
    Ok(sine
        .iter()
        .zip(noise)
        .map(|(s, n)| s + noise_level * n)
        .collect())
}

/// Adds `amplitude · sin(2π · freq · t)` for each subharmonic.
///
/// # Errors
/// `LengthMismatch` if `sub_freqs` and `amplitudes` differ in length.
pub fn apply_subharmonics(
    sound: &[f64],
    sub_freqs: &[f64],
    amplitudes: &[f64],
    sample_rate: u32,
) -> EngineResult<Vec<f64>> {
    validate_sample_rate(sample_rate)?;
    ensure_same_len(
        "apply_subharmonics (frequencies vs amplitudes)",
        sub_freqs.len(),
        amplitudes.len(),
    )?;

    Ok(sound
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let t = sample_time(i, sample_rate);
            s + sub_freqs
                .iter()
                .zip(amplitudes)
                .map(|(&f, &a)| a * sine_at(f, t))
                .sum::<f64>()
        })
        .collect())
}

/// Applies amplitude jitter: each sample is scaled by `1 + jitter_amount · N(0, 1)`.
pub fn apply_jitter_effects<R: Rng + ?Sized>(
    sound: &[f64],
    jitter_amount: f64,
    sample_rate: u32,
    rng: &mut R,
) -> EngineResult<Vec<f64>> {
    validate_sample_rate(sample_rate)?;
    let jitter = noise_samples(sound.len(), rng);
    Ok(sound
        .iter()
        .zip(jitter)
        .map(|(&s, j)| s * (1.0 + jitter_amount * j))
        .collect())
}

/// Multiplies the sound by `sin(2π · mod_freq · t) · mod_depth`.
///
/// This is a full ring-style product, not a depth-around-unity tremolo: a
/// depth of 0 silences the output.
pub fn apply_pitch_modulation(
    sound: &[f64],
    mod_freq: f64,
    mod_depth: f64,
    sample_rate: u32,
) -> EngineResult<Vec<f64>> {
    validate_sample_rate(sample_rate)?;
    Ok(sound
        .iter()
        .enumerate()
        .map(|(i, &s)| s * sine_at(mod_freq, sample_time(i, sample_rate)) * mod_depth)
        .collect())
}

/// Elementwise product of a sound with a gain envelope.
pub fn manipulate_spectral_envelope(
    sound: &[f64],
    envelope: &[f64],
    sample_rate: u32,
) -> EngineResult<Vec<f64>> {
    validate_sample_rate(sample_rate)?;
    multiply("manipulate_spectral_envelope", sound, envelope)
}

/// Shapes noise by one resonance per `(frequency, bandwidth)` pair,
/// compounding exactly as [`generate_formant_sound`] does.
///
/// [`generate_formant_sound`]: super::generate_formant_sound
pub fn filter_noise_for_formants(
    noise: &[f64],
    formant_freqs: &[f64],
    bandwidths: &[f64],
    sample_rate: u32,
) -> EngineResult<Vec<f64>> {
    validate_sample_rate(sample_rate)?;
    ensure_same_len(
        "filter_noise_for_formants (frequencies vs bandwidths)",
        formant_freqs.len(),
        bandwidths.len(),
    )?;

    let resonances: Vec<Resonance> = formant_freqs
        .iter()
        .zip(bandwidths)
        .map(|(&f, &b)| Resonance::new(f, b))
        .collect();
    Ok(shape_with_resonances(noise.to_vec(), &resonances, sample_rate))
}

/// Multiplies `signal` in place by each resonance's decaying sinusoid.
pub(crate) fn shape_with_resonances(
    mut signal: Vec<f64>,
    resonances: &[Resonance],
    sample_rate: u32,
) -> Vec<f64> {
    if !resonances.is_empty() {
        debug!(
            samples = signal.len(),
            resonances = resonances.len(),
            "applying resonance shaping"
        );
    }
    for r in resonances {
        for (i, s) in signal.iter_mut().enumerate() {
            *s *= resonance_gain(r.frequency, r.bandwidth, sample_time(i, sample_rate));
        }
    }
    signal
}
