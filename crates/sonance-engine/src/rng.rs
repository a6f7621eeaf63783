//! Seeded noise sources.
//!
//! Every engine function that draws noise takes `&mut R where R: Rng`, so the
//! caller owns the stream. A render that needs several independent noise
//! buffers (a vocal layer and its jitter, say) should give each part its own
//! stream keyed by name rather than share one generator, so adding or
//! reordering parts does not shift the noise of the others.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// PCG32 stream for a run seed.
pub fn create_rng(seed: u32) -> Pcg32 {
    Pcg32::seed_from_u64(u64::from(seed))
}

/// Seed of the stream named `key` under `run_seed`.
///
/// The first four bytes of `BLAKE3(run_seed_le || key)`, so distinct keys give
/// unrelated seeds and the same pair always gives the same seed.
pub fn derive_component_seed(run_seed: u32, key: &str) -> u32 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&run_seed.to_le_bytes());
    hasher.update(key.as_bytes());
    let [a, b, c, d, ..] = *hasher.finalize().as_bytes();
    u32::from_le_bytes([a, b, c, d])
}

/// PCG32 stream for the part named `key` of a run seeded with `run_seed`.
///
/// The CLI keys streams by sound class name (`"vocal"`, `"instrument"`) and by
/// command (`"resynth"`).
pub fn create_component_rng(run_seed: u32, key: &str) -> Pcg32 {
    create_rng(derive_component_seed(run_seed, key))
}
