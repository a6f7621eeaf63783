//! Buffer generators: additive tones, formant-shaped tones and Gaussian noise.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::buffer::{num_samples, sample_time, sine_at};
use crate::error::EngineResult;
use crate::types::{Harmonic, Resonance};

use super::transforms::shape_with_resonances;

/// Generates a zero-phase additive tone.
///
/// Output sample `i` is `Σ amplitude · sin(2π · order · fundamental · t)`.
///
/// # Arguments
/// * `fundamental` - Fundamental frequency in Hz
/// * `harmonics` - `(order, amplitude)` partials
/// * `duration` - Length in seconds
/// * `sample_rate` - Sample rate in Hz
pub fn generate_harmonic_sound(
    fundamental: f64,
    harmonics: &[Harmonic],
    duration: f64,
    sample_rate: u32,
) -> EngineResult<Vec<f64>> {
    let n = num_samples(duration, sample_rate)?;
    Ok(harmonic_samples(fundamental, harmonics, n, sample_rate))
}

/// Additive tone of an explicit length.
pub(crate) fn harmonic_samples(
    fundamental: f64,
    harmonics: &[Harmonic],
    num_samples: usize,
    sample_rate: u32,
) -> Vec<f64> {
    (0..num_samples)
        .map(|i| {
            let t = sample_time(i, sample_rate);
            harmonics
                .iter()
                .map(|h| h.amplitude * sine_at(h.order * fundamental, t))
                .sum::<f64>()
        })
        .collect()
}

/// Generates a sine at `fundamental` shaped by each formant in turn.
///
/// The running signal is multiplied by `exp(-bandwidth·t) · sin(2π·freq·t)`
/// once per formant, so the shaping compounds: more formants or wider
/// bandwidths drive the result towards zero faster.
pub fn generate_formant_sound(
    fundamental: f64,
    formants: &[Resonance],
    duration: f64,
    sample_rate: u32,
) -> EngineResult<Vec<f64>> {
    let n = num_samples(duration, sample_rate)?;
    Ok(formant_samples(fundamental, formants, n, sample_rate))
}

pub(crate) fn formant_samples(
    fundamental: f64,
    formants: &[Resonance],
    num_samples: usize,
    sample_rate: u32,
) -> Vec<f64> {
    let carrier: Vec<f64> = (0..num_samples)
        .map(|i| sine_at(fundamental, sample_time(i, sample_rate)))
        .collect();
    shape_with_resonances(carrier, formants, sample_rate)
}

/// Generates zero-mean, unit-variance Gaussian noise.
///
/// The only non-deterministic generator; the caller supplies the random
/// source so a seeded generator reproduces the same buffer.
pub fn generate_noise<R: Rng + ?Sized>(
    duration: f64,
    sample_rate: u32,
    rng: &mut R,
) -> EngineResult<Vec<f64>> {
    let n = num_samples(duration, sample_rate)?;
    Ok(noise_samples(n, rng))
}

pub(crate) fn noise_samples<R: Rng + ?Sized>(num_samples: usize, rng: &mut R) -> Vec<f64> {
    (0..num_samples)
        .map(|_| rng.sample::<f64, _>(StandardNormal))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::rng::create_rng;

    #[test]
    fn test_harmonic_sound_length_and_content() {
        let harmonics = [Harmonic::new(1.0, 1.0), Harmonic::new(2.0, 0.5)];
        let sound = generate_harmonic_sound(440.0, &harmonics, 0.25, 8000).unwrap();
        assert_eq!(sound.len(), 2000);
        assert_eq!(sound[0], 0.0);
        assert!(sound.iter().any(|&s| s.abs() > 0.5));

        let t = 3.0 / 8000.0;
        let expected = sine_at(440.0, t) + 0.5 * sine_at(880.0, t);
        assert!((sound[3] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_harmonic_sound_without_partials_is_silent() {
        let sound = generate_harmonic_sound(440.0, &[], 0.01, 44100).unwrap();
        assert_eq!(sound.len(), 441);
        assert!(sound.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_formant_sound_without_formants_is_sine() {
        let sound = generate_formant_sound(100.0, &[], 0.1, 1000).unwrap();
        for (i, &s) in sound.iter().enumerate() {
            assert!((s - sine_at(100.0, i as f64 / 1000.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_formant_shaping_compounds() {
        let one = [Resonance::new(500.0, 50.0)];
        let two = [Resonance::new(500.0, 50.0), Resonance::new(1500.0, 75.0)];
        let a = generate_formant_sound(440.0, &one, 0.01, 44100).unwrap();
        let b = generate_formant_sound(440.0, &two, 0.01, 44100).unwrap();

        for i in 0..a.len() {
            let t = i as f64 / 44100.0;
            let extra = (-75.0 * t).exp() * sine_at(1500.0, t);
            assert!((b[i] - a[i] * extra).abs() < 1e-12);
        }
    }

    #[test]
    fn test_noise_statistics() {
        let mut rng = create_rng(42);
        let noise = generate_noise(1.0, 20000, &mut rng).unwrap();
        assert_eq!(noise.len(), 20000);

        let mean = noise.iter().sum::<f64>() / noise.len() as f64;
        let var = noise.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / noise.len() as f64;
        assert!(mean.abs() < 0.05, "mean {}", mean);
        assert!((var - 1.0).abs() < 0.05, "variance {}", var);
    }

    #[test]
    fn test_noise_is_reproducible_with_seed() {
        let a = generate_noise(0.01, 44100, &mut create_rng(7)).unwrap();
        let b = generate_noise(0.01, 44100, &mut create_rng(7)).unwrap();
        let c = generate_noise(0.01, 44100, &mut create_rng(8)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_generators_reject_bad_duration() {
        assert!(matches!(
            generate_harmonic_sound(440.0, &[], 0.0, 44100),
            Err(EngineError::InvalidParameter { .. })
        ));
        assert!(generate_formant_sound(440.0, &[], -1.0, 44100).is_err());
        assert!(generate_noise(1.0, 0, &mut create_rng(1)).is_err());
    }
}
