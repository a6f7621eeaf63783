//! Sonance CLI library.
//!
//! Command implementations plus the WAV and config loading they share.

pub mod commands;
pub mod input;
pub mod wav_io;
