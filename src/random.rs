//! Seedable random sources.
//!
//! Every driver threads one explicitly constructed generator through all of
//! its stochastic operator calls, so a fixed seed replays a run exactly
//! (up to the wall-clock cut-off).

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from `seed`.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
