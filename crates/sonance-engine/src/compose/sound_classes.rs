//! Named sound classes assembled from primitives.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::buffer::{add, ensure_same_len, num_samples};
use crate::config::DEFAULT_NOISE_LEVEL;
use crate::error::EngineResult;
use crate::primitives::{
    combine_sine_and_noise, formant_samples, harmonic_samples, noise_samples,
};
use crate::types::{Harmonic, Resonance, SynthesisRequest};

/// Harmonic tone plus formant tone, mixed with Gaussian noise.
pub fn synthesize_vocal_sound<R: Rng + ?Sized>(
    fundamental: f64,
    formants: &[Resonance],
    harmonics: &[Harmonic],
    duration: f64,
    sample_rate: u32,
    rng: &mut R,
) -> EngineResult<Vec<f64>> {
    let n = num_samples(duration, sample_rate)?;
    let voiced = add(
        "synthesize_vocal_sound",
        &harmonic_samples(fundamental, harmonics, n, sample_rate),
        &formant_samples(fundamental, formants, n, sample_rate),
    )?;
    combine_sine_and_noise(&voiced, &noise_samples(n, rng), DEFAULT_NOISE_LEVEL)
}

/// Harmonic tone mixed with Gaussian noise.
pub fn synthesize_instrument_sound<R: Rng + ?Sized>(
    fundamental: f64,
    harmonics: &[Harmonic],
    duration: f64,
    sample_rate: u32,
    rng: &mut R,
) -> EngineResult<Vec<f64>> {
    harmonics_with_noise(fundamental, harmonics, duration, sample_rate, rng)
}

/// Same signal path as [`synthesize_instrument_sound`], kept under its own
/// name for callers that think in terms of effects.
pub fn synthesize_sound_effect<R: Rng + ?Sized>(
    fundamental: f64,
    harmonics: &[Harmonic],
    duration: f64,
    sample_rate: u32,
    rng: &mut R,
) -> EngineResult<Vec<f64>> {
    harmonics_with_noise(fundamental, harmonics, duration, sample_rate, rng)
}

fn harmonics_with_noise<R: Rng + ?Sized>(
    fundamental: f64,
    harmonics: &[Harmonic],
    duration: f64,
    sample_rate: u32,
    rng: &mut R,
) -> EngineResult<Vec<f64>> {
    let n = num_samples(duration, sample_rate)?;
    let tone = harmonic_samples(fundamental, harmonics, n, sample_rate);
    combine_sine_and_noise(&tone, &noise_samples(n, rng), DEFAULT_NOISE_LEVEL)
}

/// Formant tone mixed with Gaussian noise.
pub fn synthesize_non_verbal_communication<R: Rng + ?Sized>(
    fundamental: f64,
    formants: &[Resonance],
    duration: f64,
    sample_rate: u32,
    rng: &mut R,
) -> EngineResult<Vec<f64>> {
    let n = num_samples(duration, sample_rate)?;
    let tone = formant_samples(fundamental, formants, n, sample_rate);
    combine_sine_and_noise(&tone, &noise_samples(n, rng), DEFAULT_NOISE_LEVEL)
}

/// Noise-free formant tone built from parallel frequency and bandwidth lists.
///
/// # Errors
/// `LengthMismatch` if the two lists differ in length.
pub fn generate_synthetic_speech(
    pitch: f64,
    formant_freqs: &[f64],
    formant_bandwidths: &[f64],
    duration: f64,
    sample_rate: u32,
) -> EngineResult<Vec<f64>> {
    ensure_same_len(
        "generate_synthetic_speech (frequencies vs bandwidths)",
        formant_freqs.len(),
        formant_bandwidths.len(),
    )?;
    let n = num_samples(duration, sample_rate)?;
    let formants: Vec<Resonance> = formant_freqs
        .iter()
        .zip(formant_bandwidths)
        .map(|(&f, &b)| Resonance::new(f, b))
        .collect();
    Ok(formant_samples(pitch, &formants, n, sample_rate))
}

/// Selects which generator renders a [`SynthesisRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundClass {
    /// Pure additive tone.
    Harmonic,
    /// Pure formant-shaped tone.
    Formant,
    Vocal,
    Instrument,
    Effect,
    NonVerbal,
    /// Formant tone without noise.
    Speech,
}

impl SoundClass {
    /// Every class, in CLI listing order.
    pub const ALL: [SoundClass; 7] = [
        SoundClass::Harmonic,
        SoundClass::Formant,
        SoundClass::Vocal,
        SoundClass::Instrument,
        SoundClass::Effect,
        SoundClass::NonVerbal,
        SoundClass::Speech,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundClass::Harmonic => "harmonic",
            SoundClass::Formant => "formant",
            SoundClass::Vocal => "vocal",
            SoundClass::Instrument => "instrument",
            SoundClass::Effect => "effect",
            SoundClass::NonVerbal => "nonverbal",
            SoundClass::Speech => "speech",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == name)
    }

    /// Whether rendering draws from the random source.
    pub fn uses_noise(&self) -> bool {
        matches!(
            self,
            SoundClass::Vocal | SoundClass::Instrument | SoundClass::Effect | SoundClass::NonVerbal
        )
    }

    /// Renders a request. Classes that ignore a field (e.g. formants for
    /// `Instrument`) simply don't read it.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        request: &SynthesisRequest,
        rng: &mut R,
    ) -> EngineResult<Vec<f64>> {
        let SynthesisRequest {
            fundamental,
            ref harmonics,
            ref formants,
            duration,
            sample_rate,
        } = *request;

        match self {
            SoundClass::Harmonic => crate::primitives::generate_harmonic_sound(
                fundamental,
                harmonics,
                duration,
                sample_rate,
            ),
            SoundClass::Formant => crate::primitives::generate_formant_sound(
                fundamental,
                formants,
                duration,
                sample_rate,
            ),
            SoundClass::Vocal => synthesize_vocal_sound(
                fundamental,
                formants,
                harmonics,
                duration,
                sample_rate,
                rng,
            ),
            SoundClass::Instrument => {
                synthesize_instrument_sound(fundamental, harmonics, duration, sample_rate, rng)
            }
            SoundClass::Effect => {
                synthesize_sound_effect(fundamental, harmonics, duration, sample_rate, rng)
            }
            SoundClass::NonVerbal => synthesize_non_verbal_communication(
                fundamental,
                formants,
                duration,
                sample_rate,
                rng,
            ),
            SoundClass::Speech => {
                let (freqs, bandwidths): (Vec<f64>, Vec<f64>) =
                    formants.iter().map(|r| (r.frequency, r.bandwidth)).unzip();
                generate_synthetic_speech(fundamental, &freqs, &bandwidths, duration, sample_rate)
            }
        }
    }
}
