//! Sound composition: named sound classes, syllable sequencing, the
//! parametric controller and layered mixing, all built on [`primitives`].
//!
//! Functions that add noise take the random source as an argument and draw
//! from it in a fixed order, so a seeded generator reproduces the output.
//!
//! [`primitives`]: crate::primitives

mod control;
mod layers;
mod sound_classes;
mod syllabic;

pub use control::control_parameters;
pub use layers::generate_complex_acoustic_phenomena;
pub use sound_classes::{
    generate_synthetic_speech, synthesize_instrument_sound, synthesize_non_verbal_communication,
    synthesize_sound_effect, synthesize_vocal_sound, SoundClass,
};
pub use syllabic::generate_syllabic_sound;
