//! Signal primitives: generate and transform sample buffers from explicit
//! parameters. Nothing here analyzes its input.
//!
//! All generators use the time vector `t[i] = i / sample_rate` for
//! `i in 0..round(duration * sample_rate)`.

mod generators;
mod transforms;

pub use generators::{generate_formant_sound, generate_harmonic_sound, generate_noise};
pub use transforms::{
    apply_jitter_effects, apply_pitch_modulation, apply_subharmonics, combine_sine_and_noise,
    filter_noise_for_formants, manipulate_spectral_envelope,
};

pub(crate) use generators::{formant_samples, harmonic_samples, noise_samples};
pub(crate) use transforms::shape_with_resonances;
