//! Content-seeded randomness.
//!
//! Attention-check placement must be reproducible from the event log alone,
//! so the generator is derived from the session text and context sequence
//! number instead of an entropy source. ChaCha output is stable across
//! platforms and releases, which keeps old logs replayable.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// 64-bit seed: crc32 of the text in the high half, mixed with the sequence number.
pub fn seed_for(text: &str, seq: u64) -> u64 {
    let crc = u64::from(crc32fast::hash(text.as_bytes()));
    (crc << 32) ^ seq
}

pub fn seeded_rng(text: &str, seq: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed_for(text, seq))
}
