//! Loading engine configuration, synthesis requests and seeds.

use std::path::Path;

use anyhow::{Context, Result};
use sonance_engine::{EngineConfig, SynthesisRequest};

/// Loads an [`EngineConfig`] from a JSON file, or the defaults when no path
/// is given. The result is validated either way.
pub fn load_config(path: Option<&str>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(Path::new(path))
                .with_context(|| format!("Failed to read config: {}", path))?;
            EngineConfig::from_json(&text)
                .with_context(|| format!("Failed to parse config: {}", path))?
        }
        None => EngineConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Loads a [`SynthesisRequest`] from a JSON file.
pub fn load_request(path: &str) -> Result<SynthesisRequest> {
    let text = std::fs::read_to_string(Path::new(path))
        .with_context(|| format!("Failed to read request: {}", path))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse request: {}", path))
}

/// Picks the seed for a run: the flag wins over the config; with neither a
/// fresh random seed is drawn.
pub fn resolve_seed(flag: Option<u32>, config: &EngineConfig) -> u32 {
    flag.or(config.seed).unwrap_or_else(rand::random)
}
