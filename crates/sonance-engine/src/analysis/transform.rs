//! Forward Fourier transform backends.
//!
//! Analysis only needs a forward complex transform of a real buffer. The
//! default backend plans with `rustfft`; [`NaiveDft`] is the direct O(n²)
//! definition and serves as a reference when checking another backend.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::buffer::TWO_PI;

/// A forward discrete Fourier transform of a real-valued buffer.
///
/// Implementations must return `input.len()` bins using the unnormalized
/// convention `X[k] = Σ x[n] · e^{-2πikn/N}`.
pub trait ForwardTransform {
    fn forward(&self, input: &[f64]) -> Vec<Complex<f64>>;
}

/// FFT backend built on `rustfft`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustFftTransform;

impl ForwardTransform for RustFftTransform {
    fn forward(&self, input: &[f64]) -> Vec<Complex<f64>> {
        let mut buffer: Vec<Complex<f64>> = input.iter().map(|&s| Complex::new(s, 0.0)).collect();
        if buffer.is_empty() {
            return buffer;
        }

        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(buffer.len());
        fft.process(&mut buffer);
        buffer
    }
}

/// Direct evaluation of the DFT sum.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveDft;

impl ForwardTransform for NaiveDft {
    fn forward(&self, input: &[f64]) -> Vec<Complex<f64>> {
        let n = input.len();
        (0..n)
            .map(|k| {
                input
                    .iter()
                    .enumerate()
                    .fold(Complex::new(0.0, 0.0), |acc, (j, &x)| {
                        // Reduce k*j mod n first so the phase stays small.
                        let phase = -TWO_PI * ((k * j) % n) as f64 / n as f64;
                        acc + Complex::new(x * phase.cos(), x * phase.sin())
                    })
            })
            .collect()
    }
}
