//! Generic parametric controller.

use tracing::debug;

use crate::buffer::{add, multiply, sample_time, sine_at, validate_sample_rate};
use crate::error::EngineResult;
use crate::primitives::harmonic_samples;
use crate::types::{Harmonic, TemporalEvolution};

/// Runs a sound through the fixed control pipeline:
///
/// 1. multiply by `amplitude_envelope`
/// 2. add `Σ amplitude · sin(2π · order · t)` for each entry of
///    `harmonic_content` (the order is read as a frequency in Hz)
/// 3. add `noise_component`
/// 4. multiply by `sin(2π · f · t)` for every formant frequency (gating)
/// 5. multiply by `exp(-decay · t) · sin(2π · attack · t)`
///
/// Only `attack` and `decay` of `temporal_evolution` are read; `sustain` and
/// `release` have no effect here.
///
/// # Errors
/// `LengthMismatch` if the envelope or noise differ in length from `sound`.
pub fn control_parameters(
    sound: &[f64],
    amplitude_envelope: &[f64],
    harmonic_content: &[Harmonic],
    noise_component: &[f64],
    formant_frequencies: &[f64],
    temporal_evolution: &TemporalEvolution,
    sample_rate: u32,
) -> EngineResult<Vec<f64>> {
    validate_sample_rate(sample_rate)?;
    debug!(
        samples = sound.len(),
        harmonics = harmonic_content.len(),
        formants = formant_frequencies.len(),
        attack = temporal_evolution.attack,
        decay = temporal_evolution.decay,
        "running control pipeline"
    );

    let n = sound.len();
    let shaped = multiply(
        "control_parameters (amplitude envelope)",
        sound,
        amplitude_envelope,
    )?;
    let with_harmonics = add(
        "control_parameters (harmonic content)",
        &shaped,
        &harmonic_samples(1.0, harmonic_content, n, sample_rate),
    )?;
    let mut out = add(
        "control_parameters (noise component)",
        &with_harmonics,
        noise_component,
    )?;

    let TemporalEvolution { attack, decay, .. } = *temporal_evolution;
    for (i, s) in out.iter_mut().enumerate() {
        let t = sample_time(i, sample_rate);
        for &f in formant_frequencies {
            *s *= sine_at(f, t);
        }
        *s *= (-decay * t).exp() * sine_at(attack, t);
    }

    Ok(out)
}
