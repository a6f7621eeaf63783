//! Whole-buffer magnitude spectrum.

use tracing::debug;

use crate::buffer::validate_sample_rate;
use crate::error::EngineResult;
use crate::types::Spectrum;

use super::transform::{ForwardTransform, RustFftTransform};

/// Computes the magnitude spectrum of a buffer using the default FFT backend.
///
/// Keeps the first `floor(n / 2)` bins. Bin `i` sits at `i * sample_rate / n` Hz.
pub fn compute_spectrum(buffer: &[f64], sample_rate: u32) -> EngineResult<Spectrum> {
    compute_spectrum_with(&RustFftTransform, buffer, sample_rate)
}

/// Computes the magnitude spectrum of a buffer with the given transform.
///
/// # Arguments
/// * `transform` - Forward DFT backend
/// * `buffer` - Time-domain samples
/// * `sample_rate` - Sample rate of `buffer` in Hz
pub fn compute_spectrum_with<T>(
    transform: &T,
    buffer: &[f64],
    sample_rate: u32,
) -> EngineResult<Spectrum>
where
    T: ForwardTransform + ?Sized,
{
    validate_sample_rate(sample_rate)?;

    let n = buffer.len();
    let num_bins = n / 2;
    debug!(samples = n, sample_rate, bins = num_bins, "computing spectrum");

    if num_bins == 0 {
        return Ok(Spectrum::default());
    }

    let bins = transform.forward(buffer);
    let resolution = sample_rate as f64 / n as f64;

    let frequencies = (0..num_bins).map(|i| i as f64 * resolution).collect();
    let magnitudes = bins.iter().take(num_bins).map(|c| c.norm()).collect();

    Ok(Spectrum {
        frequencies,
        magnitudes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::transform::NaiveDft;
    use crate::buffer::{sine_at, time_vector};
    use crate::error::EngineError;

    #[test]
    fn test_spectrum_shape() {
        let buffer: Vec<f64> = time_vector(1001, 8000)
            .iter()
            .map(|&t| sine_at(440.0, t))
            .collect();
        let spectrum = compute_spectrum(&buffer, 8000).unwrap();

        assert_eq!(spectrum.frequencies.len(), 500);
        assert_eq!(spectrum.magnitudes.len(), 500);
        assert_eq!(spectrum.frequencies[0], 0.0);
        assert!(spectrum.frequencies.windows(2).all(|w| w[1] > w[0]));
        assert!((spectrum.frequencies[1] - 8000.0 / 1001.0).abs() < 1e-12);
    }

    #[test]
    fn test_sine_peak_lands_on_its_bin() {
        let buffer: Vec<f64> = time_vector(1000, 1000)
            .iter()
            .map(|&t| sine_at(50.0, t))
            .collect();
        let spectrum = compute_spectrum(&buffer, 1000).unwrap();
        assert_eq!(spectrum.argmax(), Some(50));
        // A unit sine with an integer number of cycles puts n/2 in its bin.
        assert!((spectrum.magnitudes[50] - 500.0).abs() < 1e-6);
    }

    #[test]
    fn test_backends_agree() {
        let buffer: Vec<f64> = time_vector(200, 1000)
            .iter()
            .map(|&t| sine_at(35.0, t) + 0.3 * sine_at(120.0, t))
            .collect();
        let fast = compute_spectrum(&buffer, 1000).unwrap();
        let slow = compute_spectrum_with(&NaiveDft, &buffer, 1000).unwrap();
        assert_eq!(fast.frequencies, slow.frequencies);
        for (a, b) in fast.magnitudes.iter().zip(&slow.magnitudes) {
            assert!((a - b).abs() < 1e-8);
        }
    }

    #[test]
    fn test_tiny_buffers_have_no_bins() {
        assert!(compute_spectrum(&[], 44100).unwrap().is_empty());
        assert!(compute_spectrum(&[1.0], 44100).unwrap().is_empty());
        assert_eq!(compute_spectrum(&[1.0, 0.0, 1.0], 44100).unwrap().len(), 1);
    }

    #[test]
    fn test_zero_sample_rate_rejected() {
        assert!(matches!(
            compute_spectrum(&[0.0; 8], 0),
            Err(EngineError::InvalidParameter { .. })
        ));
    }
}
