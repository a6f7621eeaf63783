//! WAV reading and writing.
//!
//! Files are read into a single mono `f64` buffer (channels are averaged) and
//! written as mono 32-bit float.

use std::io::Cursor;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// A decoded WAV file.
#[derive(Debug, Clone, PartialEq)]
pub struct MonoAudio {
    /// Samples in `[-1, 1]` for integer sources; float sources pass through.
    pub samples: Vec<f64>,
    pub sample_rate: u32,
    /// Channel count of the source file before downmixing.
    pub source_channels: u16,
}

/// Decodes WAV bytes, downmixing to mono.
pub fn decode_wav(bytes: &[u8]) -> Result<MonoAudio> {
    let reader = hound::WavReader::new(Cursor::new(bytes)).context("Invalid WAV data")?;
    let spec = reader.spec();
    if spec.channels == 0 {
        bail!("WAV header declares zero channels");
    }

    let interleaved: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f64 / max_val))
                .collect::<Result<_, _>>()
                .context("Failed to decode integer samples")?
        }
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()
            .context("Failed to decode float samples")?,
    };

    let channels = spec.channels as usize;
    let samples = interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f64>() / channels as f64)
        .collect();

    Ok(MonoAudio {
        samples,
        sample_rate: spec.sample_rate,
        source_channels: spec.channels,
    })
}

/// Reads and decodes a WAV file.
pub fn read_wav(path: &Path) -> Result<MonoAudio> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    decode_wav(&bytes)
}

/// Writes a mono buffer as a 32-bit float WAV file.
pub fn write_wav(path: &Path, samples: &[f64], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create: {}", path.display()))?;
    for &sample in samples {
        writer.write_sample(sample as f32)?;
    }
    writer.finalize()?;
    Ok(())
}
