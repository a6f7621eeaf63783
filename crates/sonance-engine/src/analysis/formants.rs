//! Formant detection by spectral peak picking.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DEFAULT_NUM_FORMANTS;
use crate::error::{EngineError, EngineResult};
use crate::types::{Formant, Spectrum};

use super::spectrum::compute_spectrum;

/// Peak-picking settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakPicking {
    /// Maximum number of peaks to return. Also sets the height threshold at
    /// `max(magnitude) / num_formants`.
    pub num_formants: usize,
    /// Peaks closer than this (in Hz) to a taller kept peak are dropped.
    /// Zero keeps every local maximum.
    pub min_separation_hz: f64,
}

impl Default for PeakPicking {
    fn default() -> Self {
        Self {
            num_formants: DEFAULT_NUM_FORMANTS,
            min_separation_hz: 0.0,
        }
    }
}

impl PeakPicking {
    pub fn new(num_formants: usize) -> Self {
        Self {
            num_formants,
            ..Default::default()
        }
    }

    /// Sets the minimum peak separation.
    pub fn with_min_separation(mut self, hz: f64) -> Self {
        self.min_separation_hz = hz;
        self
    }

    fn validate(&self) -> EngineResult<()> {
        if self.num_formants == 0 {
            return Err(EngineError::invalid_param(
                "num_formants",
                "must be greater than 0",
            ));
        }
        if !(self.min_separation_hz >= 0.0) {
            return Err(EngineError::invalid_param(
                "min_separation_hz",
                "must be zero or positive",
            ));
        }
        Ok(())
    }
}

/// Detects up to `num_formants` spectral peaks in a buffer.
///
/// Returns peaks at or above `max(magnitude) / num_formants` in ascending
/// frequency order, truncated to the first `num_formants`.
///
/// # Errors
/// `InvalidParameter` if `num_formants` is 0 or the sample rate is 0.
pub fn detect_formants(
    buffer: &[f64],
    sample_rate: u32,
    num_formants: usize,
) -> EngineResult<Vec<Formant>> {
    let picking = PeakPicking::new(num_formants);
    picking.validate()?;
    let spectrum = compute_spectrum(buffer, sample_rate)?;
    pick_peaks(&spectrum, &picking)
}

/// Picks formant peaks from an already computed spectrum.
pub fn pick_peaks(spectrum: &Spectrum, picking: &PeakPicking) -> EngineResult<Vec<Formant>> {
    picking.validate()?;

    let threshold = spectrum.max_magnitude() / picking.num_formants as f64;
    let mut peaks: Vec<usize> = local_maxima(&spectrum.magnitudes)
        .into_iter()
        .filter(|&i| spectrum.magnitudes[i] >= threshold)
        .collect();

    if picking.min_separation_hz > 0.0 {
        peaks = suppress_close_peaks(spectrum, &peaks, picking.min_separation_hz);
    }

    let formants: Vec<Formant> = peaks
        .into_iter()
        .take(picking.num_formants)
        .map(|i| Formant {
            frequency: spectrum.frequencies[i],
            peak_magnitude: spectrum.magnitudes[i],
        })
        .collect();

    debug!(
        threshold,
        found = formants.len(),
        requested = picking.num_formants,
        "picked formant peaks"
    );
    Ok(formants)
}

/// Indices of strict local maxima, ascending.
///
/// A flat-topped peak reports the middle of its plateau (rounded down).
/// The first and last samples are never peaks.
fn local_maxima(x: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if x.len() < 3 {
        return peaks;
    }

    let last = x.len() - 1;
    let mut i = 1;
    while i < last {
        if x[i - 1] < x[i] {
            let mut ahead = i + 1;
            while ahead < last && x[ahead] == x[i] {
                ahead += 1;
            }
            if x[ahead] < x[i] {
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }
    peaks
}

/// Drops peaks within `min_hz` of a taller peak. Returns indices ascending.
fn suppress_close_peaks(spectrum: &Spectrum, peaks: &[usize], min_hz: f64) -> Vec<usize> {
    let mut by_height: Vec<usize> = (0..peaks.len()).collect();
    // Stable sort keeps the lower-frequency peak first among equal heights.
    by_height.sort_by(|&a, &b| {
        spectrum.magnitudes[peaks[b]]
            .partial_cmp(&spectrum.magnitudes[peaks[a]])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep = vec![true; peaks.len()];
    for &j in &by_height {
        if !keep[j] {
            continue;
        }
        let fj = spectrum.frequencies[peaks[j]];
        for (k, flag) in keep.iter_mut().enumerate() {
            if k != j && (spectrum.frequencies[peaks[k]] - fj).abs() < min_hz {
                *flag = false;
            }
        }
    }

    peaks
        .iter()
        .zip(keep)
        .filter_map(|(&p, k)| k.then_some(p))
        .collect()
}
