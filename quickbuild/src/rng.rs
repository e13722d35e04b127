//! Seed handling and RNG construction.
//!
//! Every run is driven by a single `u64` seed. When none is configured one is
//! drawn from OS entropy, and it is always reported so the run can be
//! replayed.

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

/// Create a deterministic RNG from a seed
pub fn create_seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Draw a fresh seed from OS entropy
pub fn fresh_seed() -> u64 {
    OsRng.next_u64()
}

/// Use the configured seed, or draw a fresh one
pub fn resolve_seed(configured: Option<u64>) -> u64 {
    configured.unwrap_or_else(fresh_seed)
}

/// Derive an independent seed for the `index`-th property of a suite.
///
/// Uses the SplitMix64 finalizer so neighbouring indices give unrelated
/// streams while the mapping stays stable across releases.
pub fn derive_seed(base: u64, index: u64) -> u64 {
    let mut z = base.wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
