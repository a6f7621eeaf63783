//! Syllable sequencing by concatenation.

use crate::buffer::num_samples;
use crate::error::{EngineError, EngineResult};
use crate::types::{SyllableKind, SyllableSlot};

/// Concatenates vowel and consonant buffers in the order given by `structure`.
///
/// The output length is the sum of the referenced buffers' lengths.
/// `duration` and `sample_rate` are validated but do not resize anything;
/// each source buffer keeps its own length.
///
/// # Errors
/// `IndexOutOfRange` if a slot points past the end of its source list, and
/// `InvalidParameter` for a non-positive duration or zero sample rate.
pub fn generate_syllabic_sound(
    vowels: &[Vec<f64>],
    consonants: &[Vec<f64>],
    structure: &[SyllableSlot],
    duration: f64,
    sample_rate: u32,
) -> EngineResult<Vec<f64>> {
    num_samples(duration, sample_rate)?;

    let mut parts = Vec::with_capacity(structure.len());
    for slot in structure {
        let source = match slot.kind {
            SyllableKind::Vowel => vowels,
            SyllableKind::Consonant => consonants,
        };
        let part = source
            .get(slot.index)
            .ok_or_else(|| EngineError::IndexOutOfRange {
                kind: slot.kind.as_str().to_string(),
                index: slot.index,
                len: source.len(),
            })?;
        parts.push(part.as_slice());
    }

    Ok(parts.concat())
}
