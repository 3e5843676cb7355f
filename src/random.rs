//! Seedable random number generation.
//!
//! The engine never touches a process-wide RNG for sampling. Each
//! [`GenerationEngine`](crate::sim::GenerationEngine) owns one generator,
//! created here from an explicit seed.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Generator type owned by the engine.
pub type SimRng = StdRng;

/// Creates a deterministic generator from `seed`.
pub fn create_rng(seed: u64) -> SimRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub fn rng_from_option(seed: Option<u64>) -> SimRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
