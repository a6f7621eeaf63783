//! Resynth command implementation
//!
//! Analyzes a WAV file and writes a new one rendered from the analysis.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use tracing::warn;

use sonance_engine::rng::create_component_rng;
use sonance_engine::{resynthesize_with, FundamentalSource};

use crate::input::{load_config, resolve_seed};
use crate::wav_io::{read_wav, write_wav};

/// Run the resynth command
///
/// # Arguments
/// * `input_path` - WAV file to analyze
/// * `output_path` - Where to write the resynthesized WAV
/// * `detected` - Use the detected fundamental instead of the 0 Hz first bin
/// * `config_path` - Optional engine config (JSON)
/// * `seed` - Noise seed, overriding the config
pub fn run(
    input_path: &str,
    output_path: &str,
    detected: bool,
    config_path: Option<&str>,
    seed: Option<u32>,
) -> Result<ExitCode> {
    let config = load_config(config_path)?;
    let source = if detected {
        FundamentalSource::Detected
    } else {
        warn!("using the 0 Hz first bin as fundamental; pass --detected for a tonal result");
        FundamentalSource::LegacyFirstBin
    };

    println!("{} {}", "Resynthesizing:".cyan().bold(), input_path);
    let audio = read_wav(Path::new(input_path))?;

    let seed = resolve_seed(seed, &config);
    println!("{} {}", "Seed:".dimmed(), seed);
    let mut rng = create_component_rng(seed, "resynth");

    let options = config.resynthesis_options(source);
    let samples = resynthesize_with(&audio.samples, audio.sample_rate, &options, &mut rng)?;

    write_wav(Path::new(output_path), &samples, audio.sample_rate)?;
    println!(
        "{} {} ({} samples)",
        "Wrote:".green().bold(),
        output_path,
        samples.len()
    );
    Ok(ExitCode::SUCCESS)
}
