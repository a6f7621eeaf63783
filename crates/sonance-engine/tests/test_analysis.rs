//! Spectral analysis integration tests.

use sonance_engine::analysis::{
    compute_spectrum_with, harmonic_structure_of, noise_components_of, pick_peaks, NaiveDft,
};
use sonance_engine::buffer::{sine_at, time_vector};
use sonance_engine::{
    analyze_harmonic_structure, calculate_harmonic_ratios, compute_spectrogram, compute_spectrum,
    detect_formants, detect_fundamental, EngineError, PeakPicking, SpectrogramConfig,
};

fn sine(frequency: f64, duration: f64, sample_rate: u32) -> Vec<f64> {
    let n = (duration * sample_rate as f64).round() as usize;
    time_vector(n, sample_rate)
        .iter()
        .map(|&t| sine_at(frequency, t))
        .collect()
}

// ============================================================================
// Spectrum
// ============================================================================

#[test]
fn test_spectrum_shape() {
    for n in [1usize, 2, 7, 64, 1001] {
        let buffer: Vec<f64> = (0..n).map(|i| (i as f64 * 0.37).sin()).collect();
        let spectrum = compute_spectrum(&buffer, 8000).unwrap();
        assert_eq!(spectrum.frequencies.len(), n / 2);
        assert_eq!(spectrum.magnitudes.len(), n / 2);
        if n >= 2 {
            assert_eq!(spectrum.frequencies[0], 0.0);
        }
        assert!(spectrum.frequencies.windows(2).all(|w| w[0] < w[1]));
        assert!(spectrum.magnitudes.iter().all(|&m| m >= 0.0));
    }
}

#[test]
fn test_spectrum_backends_agree() {
    let buffer = sine(125.0, 0.032, 8000);
    let fast = compute_spectrum(&buffer, 8000).unwrap();
    let slow = compute_spectrum_with(&NaiveDft, &buffer, 8000).unwrap();
    assert_eq!(fast.frequencies, slow.frequencies);
    for (a, b) in fast.magnitudes.iter().zip(&slow.magnitudes) {
        assert!((a - b).abs() < 1e-8);
    }
}

// ============================================================================
// Formants
// ============================================================================

#[test]
fn test_formant_of_pure_sine() {
    let buffer = sine(440.0, 1.0, 44100);
    let formants = detect_formants(&buffer, 44100, 5).unwrap();
    assert!(!formants.is_empty());
    assert!((formants[0].frequency - 440.0).abs() <= 1.0);
}

#[test]
fn test_formants_ascending_and_bounded() {
    let sr = 16000;
    let buffer: Vec<f64> = time_vector(16000, sr)
        .iter()
        .map(|&t| {
            sine_at(300.0, t) + sine_at(900.0, t) + sine_at(1700.0, t) + sine_at(2500.0, t)
        })
        .collect();
    let formants = detect_formants(&buffer, sr, 3).unwrap();
    assert_eq!(formants.len(), 3);
    assert!(formants.windows(2).all(|w| w[0].frequency < w[1].frequency));
    assert!((formants[0].frequency - 300.0).abs() < 1e-9);
}

#[test]
fn test_min_separation_suppresses_neighbours() {
    let sr = 8000;
    let buffer: Vec<f64> = time_vector(8000, sr)
        .iter()
        .map(|&t| sine_at(1000.0, t) + 0.8 * sine_at(1010.0, t))
        .collect();
    let spectrum = compute_spectrum(&buffer, sr).unwrap();

    let all = pick_peaks(&spectrum, &PeakPicking::new(5)).unwrap();
    assert_eq!(all.len(), 2);

    let separated = pick_peaks(&spectrum, &PeakPicking::new(5).with_min_separation(50.0)).unwrap();
    assert_eq!(separated.len(), 1);
    assert!((separated[0].frequency - 1000.0).abs() < 1e-9);
}

#[test]
fn test_zero_formants_rejected() {
    let buffer = sine(440.0, 0.1, 8000);
    assert!(matches!(
        detect_formants(&buffer, 8000, 0),
        Err(EngineError::InvalidParameter { .. })
    ));
}

// ============================================================================
// Harmonics and noise
// ============================================================================

#[test]
fn test_dc_input_has_no_fundamental() {
    let buffer = vec![0.75; 1024];
    assert!(matches!(
        calculate_harmonic_ratios(&buffer, 8000),
        Err(EngineError::InvalidFundamental { .. })
    ));
    assert!(matches!(
        detect_fundamental(&buffer, 8000),
        Err(EngineError::InvalidFundamental { .. })
    ));
}

#[test]
fn test_harmonic_ratios_are_whole_numbers() {
    let buffer = sine(200.0, 0.5, 8000);
    let ratios = calculate_harmonic_ratios(&buffer, 8000).unwrap();
    assert_eq!(ratios[0], 0.0);
    for (k, r) in ratios.iter().enumerate() {
        assert!((r - k as f64).abs() < 1e-9);
    }
}

#[test]
fn test_harmonic_structure_needs_reference() {
    let buffer = sine(200.0, 0.5, 8000);
    assert!(matches!(
        analyze_harmonic_structure(&buffer, 8000, 0.0),
        Err(EngineError::InvalidFundamental { .. })
    ));

    let partials = analyze_harmonic_structure(&buffer, 8000, 200.0).unwrap();
    assert!(partials
        .iter()
        .all(|p| ((p.frequency / 200.0) - (p.frequency / 200.0).round()).abs() < 1e-9));
    assert!(partials.iter().any(|p| p.frequency == 200.0));
}

#[test]
fn test_harmonic_and_noise_partition_the_spectrum() {
    let sr = 8000;
    let buffer: Vec<f64> = time_vector(4000, sr)
        .iter()
        .map(|&t| sine_at(200.0, t) + 0.3 * sine_at(330.0, t))
        .collect();
    let spectrum = compute_spectrum(&buffer, sr).unwrap();
    let noise = noise_components_of(&spectrum).unwrap();
    let harmonic = harmonic_structure_of(&spectrum, 200.0).unwrap();

    assert_eq!(noise.len(), spectrum.len());
    let zeroed = noise.iter().filter(|&&m| m == 0.0).count();
    assert!(zeroed >= harmonic.len());
    // 330 Hz is not a multiple of 200 Hz, so it stays in the residual.
    let bin_330 = spectrum.frequencies.iter().position(|&f| f == 330.0).unwrap();
    assert!(noise[bin_330] > 100.0);
}

// ============================================================================
// Spectrogram
// ============================================================================

#[test]
fn test_spectrogram_tracks_a_tone() {
    let sr = 8000;
    let buffer = sine(1000.0, 0.25, sr);
    let spectrogram = compute_spectrogram(&buffer, sr, &SpectrogramConfig::default()).unwrap();

    assert_eq!(spectrogram.num_bins(), 129);
    assert!(spectrogram.num_frames() > 1);
    for frame in &spectrogram.magnitudes {
        let loudest = frame
            .iter()
            .enumerate()
            .fold(0, |best, (i, &m)| if m > frame[best] { i } else { best });
        assert!((spectrogram.frequencies[loudest] - 1000.0).abs() < 1e-9);
    }
}
