//! Per-request random stream.
//!
//! Wraps `ChaCha8Rng` so the same seed yields the same plan on every
//! platform. A fresh `PlanRng` is created for each generation call and passed
//! down explicitly; nothing random lives in global state.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::GeneratorConfig;

/// Deterministic RNG owned by a single generation call.
///
/// Generation steps take `&mut impl Rng` and are handed `&mut rng.0`.
#[derive(Clone, Debug)]
pub struct PlanRng(pub ChaCha8Rng);

impl Default for PlanRng {
    fn default() -> Self {
        Self::from_seed_u64(GeneratorConfig::DEFAULT_SEED)
    }
}

impl PlanRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}
