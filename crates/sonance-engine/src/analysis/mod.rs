//! Spectral analysis: spectra, formants, harmonic structure and noise residual.
//!
//! Each buffer-level operation has a spectrum-level counterpart
//! (`*_of`, [`pick_peaks`]) so callers that already hold a [`Spectrum`]
//! (possibly computed with their own [`ForwardTransform`]) don't pay for a
//! second transform.
//!
//! [`Spectrum`]: crate::types::Spectrum

mod formants;
mod harmonics;
mod spectrogram;
mod spectrum;
mod transform;

pub use formants::{detect_formants, pick_peaks, PeakPicking};
pub use harmonics::{
    analyze_harmonic_structure, analyze_noise_components, calculate_harmonic_ratios,
    detect_fundamental, fundamental_of, harmonic_ratios_of, harmonic_structure_of,
    noise_components_of, Fundamental,
};
pub use spectrogram::{
    compute_spectrogram, compute_spectrogram_with, Spectrogram, SpectrogramConfig,
};
pub use spectrum::{compute_spectrum, compute_spectrum_with};
pub use transform::{ForwardTransform, NaiveDft, RustFftTransform};

pub use rustfft::num_complex::Complex;
