//! Sample-buffer helpers: lengths, time vectors and length checks.
//!
//! Buffers are plain `Vec<f64>`/`&[f64]` paired with an explicit sample rate.
//! Sample `i` sits at time `i / sample_rate`.

use std::f64::consts::PI;

use crate::error::{EngineError, EngineResult};

/// 2π, used by every sinusoid in the engine.
pub const TWO_PI: f64 = 2.0 * PI;

/// Largest buffer an allocation of `f64` samples can hold.
pub const MAX_SAMPLES: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// Checks that a sample rate is usable.
pub fn validate_sample_rate(sample_rate: u32) -> EngineResult<()> {
    if sample_rate == 0 {
        return Err(EngineError::invalid_param(
            "sample_rate",
            "must be greater than 0",
        ));
    }
    Ok(())
}

/// Number of samples for a duration: `round(duration * sample_rate)`.
///
/// # Errors
/// `InvalidParameter` if `duration` is not a positive finite number, the
/// sample rate is zero, or the sample count exceeds [`MAX_SAMPLES`].
pub fn num_samples(duration: f64, sample_rate: u32) -> EngineResult<usize> {
    validate_sample_rate(sample_rate)?;
    if !(duration.is_finite() && duration > 0.0) {
        return Err(EngineError::invalid_param(
            "duration",
            format!("must be a positive number of seconds, got {}", duration),
        ));
    }
    let count = (duration * sample_rate as f64).round();
    if !(count.is_finite() && count <= MAX_SAMPLES as f64) {
        return Err(EngineError::invalid_param(
            "duration",
            format!(
                "{} s at {} Hz needs more than {} samples",
                duration, sample_rate, MAX_SAMPLES
            ),
        ));
    }
    Ok(count as usize)
}

/// Time of sample `index` in seconds.
#[inline]
pub fn sample_time(index: usize, sample_rate: u32) -> f64 {
    index as f64 / sample_rate as f64
}

/// Time vector `t[i] = i / sample_rate` for `num_samples` samples.
pub fn time_vector(num_samples: usize, sample_rate: u32) -> Vec<f64> {
    (0..num_samples)
        .map(|i| sample_time(i, sample_rate))
        .collect()
}

/// `sin(2π · frequency · t)`.
#[inline]
pub fn sine_at(frequency: f64, t: f64) -> f64 {
    (TWO_PI * frequency * t).sin()
}

/// Formant shaping factor `exp(-bandwidth · t) · sin(2π · frequency · t)`.
#[inline]
pub fn resonance_gain(frequency: f64, bandwidth: f64, t: f64) -> f64 {
    (-bandwidth * t).exp() * sine_at(frequency, t)
}

/// Fails with `LengthMismatch` unless `actual == expected`.
pub fn ensure_same_len(context: &str, expected: usize, actual: usize) -> EngineResult<()> {
    if expected != actual {
        return Err(EngineError::length_mismatch(context, expected, actual));
    }
    Ok(())
}

/// Elementwise sum of two equal-length buffers.
pub fn add(context: &str, a: &[f64], b: &[f64]) -> EngineResult<Vec<f64>> {
    ensure_same_len(context, a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
}

/// Elementwise product of two equal-length buffers.
pub fn multiply(context: &str, a: &[f64], b: &[f64]) -> EngineResult<Vec<f64>> {
    ensure_same_len(context, a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).collect())
}
