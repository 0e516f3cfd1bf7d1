//! Helpers for tests across the workspace.

use rand::{rngs::StdRng, SeedableRng};

/// Create a new test rng with the given seed, or a fixed default seed when
/// `None` is given. Reproducible by construction.
pub fn make_test_rng(seed: Option<[u8; 32]>) -> StdRng {
    let seed = seed.unwrap_or([42u8; 32]);
    StdRng::from_seed(seed)
}
