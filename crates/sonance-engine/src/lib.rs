//! Sonance Engine
//!
//! Offline spectral analysis and additive synthesis over whole mono buffers.
//!
//! # Overview
//!
//! The engine is a set of pure functions over `f64` sample buffers, arranged
//! in four layers:
//!
//! - **Analysis** - magnitude spectrum, formant peaks, harmonic ratios,
//!   harmonic/noise separation and a short-time spectrogram
//! - **Primitives** - additive tones, formant-shaped tones, Gaussian noise,
//!   mixing, modulation and envelope transforms
//! - **Composition** - named sound classes, syllable sequencing, the
//!   parametric controller and layered mixing
//! - **Integration** - analysis feeding back into resynthesis
//!
//! # Determinism
//!
//! Everything except noise generation is a deterministic function of its
//! inputs. Functions that draw noise take the random source as an argument;
//! use [`rng::create_rng`] (PCG32) with a fixed seed to reproduce a buffer
//! exactly, and [`rng::derive_component_seed`] to give independent parts of a
//! render their own streams.
//!
//! # Example
//!
//! ```ignore
//! use sonance_engine::{detect_formants, generate_harmonic_sound, Harmonic};
//!
//! let tone = generate_harmonic_sound(220.0, &[Harmonic::new(1.0, 1.0)], 1.0, 44100)?;
//! let formants = detect_formants(&tone, 44100, 5)?;
//! ```
//!
//! # Crate Structure
//!
//! - [`analysis`] - Spectrum, formant and harmonic analysis
//! - [`buffer`] - Sample-count, time-vector and elementwise helpers
//! - [`compose`] - Sound classes and higher-level composition
//! - [`config`] - Defaults and the serializable [`EngineConfig`]
//! - [`error`] - Error type and codes
//! - [`integrate`] - Analysis-resynthesis loop
//! - [`primitives`] - Generators and buffer transforms
//! - [`rng`] - Deterministic RNG with seed derivation
//! - [`types`] - Shared parameter and result types

pub mod analysis;
pub mod buffer;
pub mod compose;
pub mod config;
pub mod error;
pub mod integrate;
pub mod primitives;
pub mod rng;
pub mod types;

// Re-export main types at crate root
pub use analysis::{
    analyze_harmonic_structure, analyze_noise_components, calculate_harmonic_ratios,
    compute_spectrogram, compute_spectrum, detect_formants, detect_fundamental, PeakPicking,
    Spectrogram, SpectrogramConfig,
};
pub use compose::{
    control_parameters, generate_complex_acoustic_phenomena, generate_syllabic_sound,
    generate_synthetic_speech, synthesize_instrument_sound, synthesize_non_verbal_communication,
    synthesize_sound_effect, synthesize_vocal_sound, SoundClass,
};
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use integrate::{
    integrate_new_tools_with_existing_tools,
    integrate_theoretical_acoustics_with_practical_synthesis, resynthesize_with,
    FundamentalSource, ResynthesisOptions,
};
pub use primitives::{
    apply_jitter_effects, apply_pitch_modulation, apply_subharmonics, combine_sine_and_noise,
    filter_noise_for_formants, generate_formant_sound, generate_harmonic_sound, generate_noise,
    manipulate_spectral_envelope,
};
pub use types::{
    Formant, Harmonic, Partial, Resonance, Spectrum, SyllableKind, SyllableSlot,
    SynthesisRequest, TemporalEvolution,
};

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::rng::create_rng;

    fn vowel_request() -> SynthesisRequest {
        SynthesisRequest {
            fundamental: 220.0,
            harmonics: vec![Harmonic::new(1.0, 1.0), Harmonic::new(2.0, 0.5)],
            formants: vec![Resonance::new(700.0, 60.0), Resonance::new(1200.0, 80.0)],
            duration: 0.25,
            sample_rate: 16000,
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let request = vowel_request();
        let a = SoundClass::Vocal
            .synthesize(&request, &mut create_rng(42))
            .unwrap();
        let b = SoundClass::Vocal
            .synthesize(&request, &mut create_rng(42))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let request = vowel_request();
        let a = SoundClass::Instrument
            .synthesize(&request, &mut create_rng(1))
            .unwrap();
        let b = SoundClass::Instrument
            .synthesize(&request, &mut create_rng(2))
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_synthesize_then_analyze() {
        let request = SynthesisRequest {
            formants: Vec::new(),
            ..vowel_request()
        };
        let tone = SoundClass::Harmonic
            .synthesize(&request, &mut create_rng(0))
            .unwrap();
        // 0.25 s at 16 kHz gives 4 Hz bins, so 220 Hz falls on bin 55.
        let fundamental = detect_fundamental(&tone, request.sample_rate).unwrap();
        assert!((fundamental - 220.0).abs() < 1e-9);

        let formants = detect_formants(&tone, request.sample_rate, 5).unwrap();
        let frequencies: Vec<f64> = formants.iter().map(|f| f.frequency).collect();
        assert!(frequencies.iter().any(|&f| (f - 220.0).abs() < 1e-9));
        assert!(frequencies.iter().any(|&f| (f - 440.0).abs() < 1e-9));
    }

    #[test]
    fn test_config_drives_resynthesis() {
        let config = EngineConfig {
            num_formants: 2,
            noise_level: 0.0,
            ..Default::default()
        };
        let options = config.resynthesis_options(FundamentalSource::Detected);
        let request = SynthesisRequest {
            formants: Vec::new(),
            ..vowel_request()
        };
        let tone = SoundClass::Harmonic
            .synthesize(&request, &mut create_rng(0))
            .unwrap();
        let out = resynthesize_with(&tone, request.sample_rate, &options, &mut create_rng(0))
            .unwrap();
        assert_eq!(out.len(), tone.len());
    }
}
