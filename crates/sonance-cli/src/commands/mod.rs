//! CLI command implementations

pub mod analyze;
pub mod json_output;
pub mod resynth;
pub mod synth;
