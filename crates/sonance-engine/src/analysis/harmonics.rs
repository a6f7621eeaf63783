//! Fundamental estimation, harmonic ratios and harmonic/noise separation.

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::types::{Partial, Spectrum};

use super::spectrum::compute_spectrum;

/// Relative tolerance when testing whether a frequency is a whole multiple of
/// a reference that does not fall on a bin centre.
const MULTIPLE_TOLERANCE: f64 = 1e-9;

/// Fundamental estimate: the bin index and frequency of the loudest bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fundamental {
    pub bin: usize,
    pub frequency: f64,
}

/// Locates the loudest bin of a spectrum.
///
/// # Errors
/// `InvalidFundamental` if the spectrum is empty or the loudest bin is 0 Hz.
pub fn fundamental_of(spectrum: &Spectrum) -> EngineResult<Fundamental> {
    let bin = spectrum
        .argmax()
        .ok_or(EngineError::InvalidFundamental { frequency: 0.0 })?;
    let frequency = spectrum.frequencies[bin];
    if !(frequency > 0.0 && frequency.is_finite()) {
        return Err(EngineError::InvalidFundamental { frequency });
    }
    Ok(Fundamental { bin, frequency })
}

/// Estimates the fundamental frequency of a buffer as its loudest bin.
pub fn detect_fundamental(buffer: &[f64], sample_rate: u32) -> EngineResult<f64> {
    let spectrum = compute_spectrum(buffer, sample_rate)?;
    Ok(fundamental_of(&spectrum)?.frequency)
}

/// Harmonic ratios of a spectrum's bins relative to its loudest bin.
///
/// Every bin whose index is a whole multiple of the fundamental's bin
/// contributes `frequency / fundamental`, including the 0 Hz bin (ratio 0).
pub fn harmonic_ratios_of(spectrum: &Spectrum) -> EngineResult<Vec<f64>> {
    let fundamental = fundamental_of(spectrum)?;
    let ratios: Vec<f64> = (0..spectrum.len())
        .step_by(fundamental.bin)
        .map(|i| spectrum.frequencies[i] / fundamental.frequency)
        .collect();

    debug!(
        fundamental = fundamental.frequency,
        ratios = ratios.len(),
        "derived harmonic ratios"
    );
    Ok(ratios)
}

/// Computes harmonic ratios for a buffer.
///
/// # Errors
/// `InvalidFundamental` when the dominant bin is the 0 Hz bin, e.g. for a
/// constant (DC-only) buffer.
pub fn calculate_harmonic_ratios(buffer: &[f64], sample_rate: u32) -> EngineResult<Vec<f64>> {
    let spectrum = compute_spectrum(buffer, sample_rate)?;
    harmonic_ratios_of(&spectrum)
}

/// Keeps only the bins that are whole multiples of `reference_frequency`.
///
/// The reference must be supplied explicitly (normally the detected
/// fundamental); a 0 Hz reference would make every bin a "multiple".
pub fn harmonic_structure_of(
    spectrum: &Spectrum,
    reference_frequency: f64,
) -> EngineResult<Vec<Partial>> {
    debug!(
        bins = spectrum.len(),
        reference = reference_frequency,
        "selecting harmonic bins"
    );
    if !(reference_frequency > 0.0 && reference_frequency.is_finite()) {
        return Err(EngineError::InvalidFundamental {
            frequency: reference_frequency,
        });
    }

    Ok(spectrum
        .frequencies
        .iter()
        .zip(&spectrum.magnitudes)
        .filter(|(&f, _)| is_multiple(f, reference_frequency))
        .map(|(&frequency, &magnitude)| Partial {
            frequency,
            magnitude,
        })
        .collect())
}

/// Harmonic structure of a buffer relative to an explicit reference frequency.
pub fn analyze_harmonic_structure(
    buffer: &[f64],
    sample_rate: u32,
    reference_frequency: f64,
) -> EngineResult<Vec<Partial>> {
    let spectrum = compute_spectrum(buffer, sample_rate)?;
    harmonic_structure_of(&spectrum, reference_frequency)
}

/// Spectral residual after removing the harmonic bins of the detected
/// fundamental. Bin-aligned with the spectrum; harmonic bins are 0.
pub fn noise_components_of(spectrum: &Spectrum) -> EngineResult<Vec<f64>> {
    let fundamental = fundamental_of(spectrum)?;
    debug!(
        bins = spectrum.len(),
        fundamental = fundamental.frequency,
        "removing harmonic bins"
    );
    Ok(spectrum
        .magnitudes
        .iter()
        .enumerate()
        .map(|(i, &m)| if i % fundamental.bin == 0 { 0.0 } else { m })
        .collect())
}

/// Residual magnitude spectrum of a buffer with its harmonic part removed.
pub fn analyze_noise_components(buffer: &[f64], sample_rate: u32) -> EngineResult<Vec<f64>> {
    let spectrum = compute_spectrum(buffer, sample_rate)?;
    noise_components_of(&spectrum)
}

fn is_multiple(frequency: f64, reference: f64) -> bool {
    let q = frequency / reference;
    (q - q.round()).abs() <= MULTIPLE_TOLERANCE * q.abs().max(1.0)
}
