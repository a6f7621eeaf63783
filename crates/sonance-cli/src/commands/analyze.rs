//! Analyze command implementation
//!
//! Reads a WAV file and reports its spectrum, fundamental, harmonic ratios
//! and formant peaks.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::process::ExitCode;

use sonance_engine::analysis::{compute_spectrum, fundamental_of, harmonic_ratios_of, pick_peaks};
use sonance_engine::{EngineConfig, EngineError, EngineResult};

use super::json_output::{error_codes, AnalysisReport, AnalyzeOutput, AnalyzeResult, JsonError};
use crate::input::load_config;
use crate::wav_io::{decode_wav, MonoAudio};

/// Run the analyze command
///
/// # Arguments
/// * `input_path` - WAV file to analyze
/// * `num_formants` - Overrides the configured formant count
/// * `config_path` - Optional engine config (JSON)
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    input_path: &str,
    num_formants: Option<usize>,
    config_path: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(input_path, num_formants, config_path)
    } else {
        run_human(input_path, num_formants, config_path)
    }
}

/// Analyzes a decoded buffer with the given config.
///
/// A buffer whose loudest bin is 0 Hz still yields a report; it just has no
/// fundamental and no harmonic ratios.
pub fn analyze_audio(audio: &MonoAudio, config: &EngineConfig) -> EngineResult<AnalysisReport> {
    let spectrum = compute_spectrum(&audio.samples, audio.sample_rate)?;
    let formants = pick_peaks(&spectrum, &config.peak_picking())?;

    let (fundamental_hz, harmonic_ratio_count) = match fundamental_of(&spectrum) {
        Ok(fundamental) => (
            Some(fundamental.frequency),
            harmonic_ratios_of(&spectrum)?.len(),
        ),
        Err(EngineError::InvalidFundamental { .. }) => (None, 0),
        Err(e) => return Err(e),
    };

    let num_samples = audio.samples.len();
    Ok(AnalysisReport {
        sample_rate: audio.sample_rate,
        num_samples,
        duration_seconds: num_samples as f64 / audio.sample_rate as f64,
        spectrum_bins: spectrum.len(),
        bin_resolution_hz: if num_samples == 0 {
            0.0
        } else {
            audio.sample_rate as f64 / num_samples as f64
        },
        peak_magnitude: spectrum.max_magnitude(),
        fundamental_hz,
        harmonic_ratio_count,
        formants,
    })
}

fn effective_config(config_path: Option<&str>, num_formants: Option<usize>) -> Result<EngineConfig> {
    let mut config = load_config(config_path)?;
    if let Some(n) = num_formants {
        config.num_formants = n;
        config.validate()?;
    }
    Ok(config)
}

/// Run analyze with human-readable (colored) output
fn run_human(
    input_path: &str,
    num_formants: Option<usize>,
    config_path: Option<&str>,
) -> Result<ExitCode> {
    let config = effective_config(config_path, num_formants)?;

    println!("{} {}", "Analyzing:".cyan().bold(), input_path);

    let data = fs::read(input_path).with_context(|| format!("Failed to read file: {}", input_path))?;
    let input_hash = blake3::hash(&data).to_hex().to_string();
    println!("{} {}", "Hash:".dimmed(), &input_hash[..16]);

    let audio = decode_wav(&data)?;
    if audio.source_channels > 1 {
        println!(
            "{} downmixed {} channels to mono",
            "Note:".yellow(),
            audio.source_channels
        );
    }

    let report = analyze_audio(&audio, &config)?;

    println!(
        "{} {} samples at {} Hz ({:.3} s)",
        "Buffer:".dimmed(),
        report.num_samples,
        report.sample_rate,
        report.duration_seconds
    );
    println!(
        "{} {} bins, {:.3} Hz resolution",
        "Spectrum:".dimmed(),
        report.spectrum_bins,
        report.bin_resolution_hz
    );
    match report.fundamental_hz {
        Some(f) => println!("{} {:.2} Hz", "Fundamental:".dimmed(), f),
        None => println!("{} {}", "Fundamental:".dimmed(), "none (0 Hz dominates)".yellow()),
    }
    println!(
        "{} {}",
        "Harmonic ratios:".dimmed(),
        report.harmonic_ratio_count
    );

    println!("\n{}", "Formants:".cyan().bold());
    if report.formants.is_empty() {
        println!("  {}", "(none above threshold)".dimmed());
    }
    for (i, formant) in report.formants.iter().enumerate() {
        println!(
            "  {:>2}. {:>10.2} Hz  magnitude {:.3}",
            i + 1,
            formant.frequency,
            formant.peak_magnitude
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Run analyze with machine-readable JSON output
fn run_json(
    input_path: &str,
    num_formants: Option<usize>,
    config_path: Option<&str>,
) -> Result<ExitCode> {
    let config = match effective_config(config_path, num_formants) {
        Ok(c) => c,
        Err(e) => return fail(JsonError::new(error_codes::CONFIG, format!("{:#}", e))),
    };

    let data = match fs::read(input_path) {
        Ok(d) => d,
        Err(e) => {
            return fail(
                JsonError::new(error_codes::FILE_READ, format!("Failed to read file: {}", e))
                    .with_file(input_path),
            )
        }
    };
    let input_hash = blake3::hash(&data).to_hex().to_string();

    let audio = match decode_wav(&data) {
        Ok(a) => a,
        Err(e) => {
            return fail(
                JsonError::new(error_codes::WAV_DECODE, format!("{:#}", e)).with_file(input_path),
            )
        }
    };

    let report = match analyze_audio(&audio, &config) {
        Ok(r) => r,
        Err(e) => return fail(JsonError::from_engine(&e).with_file(input_path)),
    };

    let output = AnalyzeOutput::success(AnalyzeResult {
        input: input_path.to_string(),
        input_hash,
        source_channels: audio.source_channels,
        report,
    });
    print_json(&output)?;
    Ok(ExitCode::SUCCESS)
}

fn fail(error: JsonError) -> Result<ExitCode> {
    print_json(&AnalyzeOutput::failure(vec![error]))?;
    Ok(ExitCode::from(1))
}

fn print_json(output: &AnalyzeOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(output)
        .with_context(|| format!("{}: failed to serialize output", error_codes::JSON_SERIALIZE))?;
    println!("{}", json);
    Ok(())
}
