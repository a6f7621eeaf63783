//! Synth command implementation
//!
//! Renders one of the engine's sound classes to a WAV file.

use anyhow::{anyhow, bail, Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use sonance_engine::rng::create_component_rng;
use sonance_engine::{Harmonic, Resonance, SoundClass, SynthesisRequest};

use crate::input::{load_config, load_request, resolve_seed};
use crate::wav_io::write_wav;

/// Flags accepted by `synth`.
#[derive(Debug, Clone, Default)]
pub struct SynthArgs {
    pub kind: String,
    pub fundamental: Option<f64>,
    /// `order:amplitude` pairs
    pub harmonics: Vec<String>,
    /// `frequency:bandwidth` pairs
    pub formants: Vec<String>,
    pub duration: Option<f64>,
    pub sample_rate: Option<u32>,
    pub request: Option<String>,
    pub config: Option<String>,
    pub seed: Option<u32>,
    pub output: String,
}

/// Run the synth command
pub fn run(args: &SynthArgs) -> Result<ExitCode> {
    let class = SoundClass::from_name(&args.kind)
        .ok_or_else(|| anyhow!("Unknown sound kind: {}", args.kind))?;
    let config = load_config(args.config.as_deref())?;
    let request = build_request(args, config.sample_rate)?;

    println!(
        "{} {} ({:.3} s at {} Hz)",
        "Synthesizing:".cyan().bold(),
        class.as_str(),
        request.duration,
        request.sample_rate
    );

    let seed = resolve_seed(args.seed, &config);
    if class.uses_noise() {
        println!("{} {}", "Seed:".dimmed(), seed);
    }
    let mut rng = create_component_rng(seed, class.as_str());
    let samples = class.synthesize(&request, &mut rng)?;

    write_wav(Path::new(&args.output), &samples, request.sample_rate)?;
    println!(
        "{} {} ({} samples)",
        "Wrote:".green().bold(),
        args.output,
        samples.len()
    );
    Ok(ExitCode::SUCCESS)
}

/// Builds the request from `--request` (if any) with flags layered on top.
///
/// Without a request file the fundamental defaults to 220 Hz, the duration to
/// one second and the harmonics to a single unit partial.
pub fn build_request(args: &SynthArgs, default_sample_rate: u32) -> Result<SynthesisRequest> {
    let mut request = match &args.request {
        Some(path) => load_request(path)?,
        None => SynthesisRequest {
            fundamental: 220.0,
            harmonics: vec![Harmonic::new(1.0, 1.0)],
            formants: Vec::new(),
            duration: 1.0,
            sample_rate: default_sample_rate,
        },
    };

    if let Some(f) = args.fundamental {
        request.fundamental = f;
    }
    if let Some(d) = args.duration {
        request.duration = d;
    }
    if let Some(sr) = args.sample_rate {
        request.sample_rate = sr;
    }
    if !args.harmonics.is_empty() {
        request.harmonics = args
            .harmonics
            .iter()
            .map(|s| parse_pair(s, "harmonic").map(|(o, a)| Harmonic::new(o, a)))
            .collect::<Result<_>>()?;
    }
    if !args.formants.is_empty() {
        request.formants = args
            .formants
            .iter()
            .map(|s| parse_pair(s, "formant").map(|(f, b)| Resonance::new(f, b)))
            .collect::<Result<_>>()?;
    }
    Ok(request)
}

/// Parses `a:b` into two numbers.
fn parse_pair(text: &str, what: &str) -> Result<(f64, f64)> {
    let Some((a, b)) = text.split_once(':') else {
        bail!("Expected {} as A:B, got '{}'", what, text);
    };
    let a = a
        .trim()
        .parse()
        .with_context(|| format!("Invalid {} value '{}'", what, text))?;
    let b = b
        .trim()
        .parse()
        .with_context(|| format!("Invalid {} value '{}'", what, text))?;
    Ok((a, b))
}
