//! Offline short-time Fourier analysis.
//!
//! The whole buffer is framed at once; there is no streaming state.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::{validate_sample_rate, TWO_PI};
use crate::error::{EngineError, EngineResult};

use super::transform::{ForwardTransform, RustFftTransform};

/// Framing parameters for a spectrogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpectrogramConfig {
    /// Samples per analysis frame.
    pub window_size: usize,
    /// Samples shared by consecutive frames.
    pub overlap: usize,
}

impl Default for SpectrogramConfig {
    fn default() -> Self {
        Self {
            window_size: 256,
            overlap: 32,
        }
    }
}

impl SpectrogramConfig {
    /// Distance between frame starts.
    pub fn hop_size(&self) -> usize {
        self.window_size - self.overlap
    }

    fn validate(&self) -> EngineResult<()> {
        if self.window_size == 0 {
            return Err(EngineError::invalid_param(
                "window_size",
                "must be greater than 0",
            ));
        }
        if self.overlap >= self.window_size {
            return Err(EngineError::invalid_param(
                "overlap",
                format!(
                    "must be smaller than window_size ({} >= {})",
                    self.overlap, self.window_size
                ),
            ));
        }
        Ok(())
    }
}

/// Magnitude spectrogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrogram {
    /// Bin frequencies in Hz (`window_size / 2 + 1` of them).
    pub frequencies: Vec<f64>,
    /// Frame centre times in seconds.
    pub times: Vec<f64>,
    /// Hann-windowed magnitudes indexed `[frame][bin]`.
    pub magnitudes: Vec<Vec<f64>>,
}

impl Spectrogram {
    pub fn num_frames(&self) -> usize {
        self.times.len()
    }

    pub fn num_bins(&self) -> usize {
        self.frequencies.len()
    }
}

/// Computes a spectrogram with the default FFT backend.
pub fn compute_spectrogram(
    buffer: &[f64],
    sample_rate: u32,
    config: &SpectrogramConfig,
) -> EngineResult<Spectrogram> {
    compute_spectrogram_with(&RustFftTransform, buffer, sample_rate, config)
}

/// Computes a spectrogram with the given transform.
///
/// # Errors
/// `InvalidParameter` for a zero window, an overlap that leaves no hop, or a
/// buffer shorter than one window.
pub fn compute_spectrogram_with<T>(
    transform: &T,
    buffer: &[f64],
    sample_rate: u32,
    config: &SpectrogramConfig,
) -> EngineResult<Spectrogram>
where
    T: ForwardTransform + ?Sized,
{
    validate_sample_rate(sample_rate)?;
    config.validate()?;

    let size = config.window_size;
    if buffer.len() < size {
        return Err(EngineError::invalid_param(
            "buffer",
            format!(
                "needs at least one full window of {} samples, got {}",
                size,
                buffer.len()
            ),
        ));
    }

    let hop = config.hop_size();
    let num_frames = (buffer.len() - size) / hop + 1;
    let num_bins = size / 2 + 1;
    let sr = sample_rate as f64;

    let window: Vec<f64> = (0..size).map(|i| hann(i, size)).collect();
    let frequencies = (0..num_bins).map(|k| k as f64 * sr / size as f64).collect();

    let mut times = Vec::with_capacity(num_frames);
    let mut magnitudes = Vec::with_capacity(num_frames);
    let mut frame = vec![0.0; size];

    for f in 0..num_frames {
        let start = f * hop;
        for (dst, (&s, &w)) in frame
            .iter_mut()
            .zip(buffer[start..start + size].iter().zip(&window))
        {
            *dst = s * w;
        }

        let bins = transform.forward(&frame);
        magnitudes.push(bins.iter().take(num_bins).map(|c| c.norm()).collect());
        times.push((start as f64 + size as f64 / 2.0) / sr);
    }

    debug!(
        frames = num_frames,
        bins = num_bins,
        window = size,
        hop,
        "computed spectrogram"
    );

    Ok(Spectrogram {
        frequencies,
        times,
        magnitudes,
    })
}

/// Periodic Hann window value.
#[inline]
fn hann(i: usize, size: usize) -> f64 {
    0.5 * (1.0 - (TWO_PI * i as f64 / size as f64).cos())
}
