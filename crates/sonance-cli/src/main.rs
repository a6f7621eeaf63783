//! Sonance CLI - analyze and synthesize mono audio from the command line.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use sonance_cli::commands;
use sonance_cli::commands::synth::SynthArgs;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "SONANCE_LOG";

/// Sonance - spectral analysis and additive synthesis
#[derive(Parser)]
#[command(name = "sonance")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log engine internals at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a WAV file: spectrum, fundamental, harmonics and formants
    Analyze {
        /// Path to the WAV file
        #[arg(short, long)]
        input: String,

        /// Number of formants to detect (overrides the config)
        #[arg(long)]
        formants: Option<usize>,

        /// Path to an engine config file (JSON)
        #[arg(long)]
        config: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render a sound class to a WAV file
    Synth {
        /// Sound class to render
        #[arg(short, long, value_parser = ["harmonic", "formant", "vocal", "instrument", "effect", "nonverbal", "speech"])]
        kind: String,

        /// Fundamental frequency in Hz
        #[arg(short, long)]
        fundamental: Option<f64>,

        /// Harmonic as ORDER:AMPLITUDE (repeatable)
        #[arg(long = "harmonic")]
        harmonics: Vec<String>,

        /// Formant as FREQUENCY:BANDWIDTH (repeatable)
        #[arg(long = "formant")]
        formants: Vec<String>,

        /// Duration in seconds
        #[arg(short, long)]
        duration: Option<f64>,

        /// Sample rate in Hz
        #[arg(long)]
        sample_rate: Option<u32>,

        /// Synthesis request file (JSON); flags override its fields
        #[arg(long)]
        request: Option<String>,

        /// Path to an engine config file (JSON)
        #[arg(long)]
        config: Option<String>,

        /// Noise seed
        #[arg(long)]
        seed: Option<u32>,

        /// Output WAV path
        #[arg(short, long)]
        output: String,
    },

    /// Analyze a WAV file and render a new one from the analysis
    Resynth {
        /// Path to the input WAV file
        #[arg(short, long)]
        input: String,

        /// Output WAV path
        #[arg(short, long)]
        output: String,

        /// Use the detected fundamental instead of the 0 Hz first bin
        #[arg(long)]
        detected: bool,

        /// Path to an engine config file (JSON)
        #[arg(long)]
        config: Option<String>,

        /// Noise seed
        #[arg(long)]
        seed: Option<u32>,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            input,
            formants,
            config,
            json,
        } => commands::analyze::run(&input, formants, config.as_deref(), json),
        Commands::Synth {
            kind,
            fundamental,
            harmonics,
            formants,
            duration,
            sample_rate,
            request,
            config,
            seed,
            output,
        } => commands::synth::run(&SynthArgs {
            kind,
            fundamental,
            harmonics,
            formants,
            duration,
            sample_rate,
            request,
            config,
            seed,
            output,
        }),
        Commands::Resynth {
            input,
            output,
            detected,
            config,
            seed,
        } => commands::resynth::run(&input, &output, detected, config.as_deref(), seed),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
