//! Value types shared by analysis and synthesis.

use serde::{Deserialize, Serialize};

/// Magnitude spectrum of a buffer, non-negative frequencies only.
///
/// Both sequences have length `floor(n / 2)` for an `n`-sample source buffer.
/// The spectrum does not keep a reference to its source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Spectrum {
    /// Bin centre frequencies in Hz, ascending from 0.
    pub frequencies: Vec<f64>,
    /// Magnitude of each bin.
    pub magnitudes: Vec<f64>,
}

impl Spectrum {
    /// Number of bins.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Returns true if the spectrum has no bins.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Index of the loudest bin. Ties resolve to the lowest index.
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &m) in self.magnitudes.iter().enumerate() {
            match best {
                Some((_, b)) if m <= b => {}
                _ => best = Some((i, m)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Largest magnitude, or 0 for an empty spectrum.
    pub fn max_magnitude(&self) -> f64 {
        self.magnitudes.iter().copied().fold(0.0, f64::max)
    }
}

/// A detected spectral peak.
///
/// The second field is the peak's magnitude, not a bandwidth estimate; see
/// [`Resonance`] for the synthesis-side descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Formant {
    /// Peak frequency in Hz.
    pub frequency: f64,
    /// Spectral magnitude at the peak.
    pub peak_magnitude: f64,
}

/// A resonance used to shape synthesized sound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resonance {
    /// Centre frequency in Hz.
    pub frequency: f64,
    /// Exponential decay rate of the shaping envelope (1/s).
    pub bandwidth: f64,
}

impl Resonance {
    pub fn new(frequency: f64, bandwidth: f64) -> Self {
        Self {
            frequency,
            bandwidth,
        }
    }
}

/// One partial of an additive tone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Harmonic {
    /// Multiplier applied to the fundamental. Fractional orders are allowed
    /// so that derived harmonic ratios can be fed back in directly.
    pub order: f64,
    /// Linear amplitude.
    pub amplitude: f64,
}

impl Harmonic {
    pub fn new(order: f64, amplitude: f64) -> Self {
        Self { order, amplitude }
    }
}

/// A spectral bin kept by harmonic-structure analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Partial {
    /// Bin frequency in Hz.
    pub frequency: f64,
    /// Bin magnitude.
    pub magnitude: f64,
}

/// Temporal envelope descriptor.
///
/// Not every transform reads every field; see the consuming function's docs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TemporalEvolution {
    pub attack: f64,
    pub sustain: f64,
    pub decay: f64,
    pub release: f64,
}

/// Everything needed to generate a buffer from parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    /// Fundamental frequency in Hz.
    pub fundamental: f64,
    /// Harmonic partials.
    #[serde(default)]
    pub harmonics: Vec<Harmonic>,
    /// Formant resonances.
    #[serde(default)]
    pub formants: Vec<Resonance>,
    /// Duration in seconds.
    pub duration: f64,
    /// Sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

fn default_sample_rate() -> u32 {
    crate::config::DEFAULT_SAMPLE_RATE
}

/// Source list a syllable slot draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyllableKind {
    Vowel,
    Consonant,
}

impl SyllableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyllableKind::Vowel => "vowel",
            SyllableKind::Consonant => "consonant",
        }
    }
}

/// One entry of a syllabic structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllableSlot {
    pub kind: SyllableKind,
    pub index: usize,
}

impl SyllableSlot {
    pub fn vowel(index: usize) -> Self {
        Self {
            kind: SyllableKind::Vowel,
            index,
        }
    }

    pub fn consonant(index: usize) -> Self {
        Self {
            kind: SyllableKind::Consonant,
            index,
        }
    }
}
