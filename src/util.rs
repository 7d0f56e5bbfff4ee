use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use emath::{Pos2, pos2};

/// Deterministic pseudo-random pair in [-1, 1] derived from a seed.
/// Stable across runs, so spawn positions and sample data are reproducible.
pub fn stable_pair(seed: u64) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

/// Deterministic fraction in [0, 1] for a seed.
pub fn stable_fraction(seed: u64) -> f32 {
    let (x, _) = stable_pair(seed);
    (x + 1.0) * 0.5
}

/// Spawn position for a new node, jittered inside the default view window.
pub fn seed_position(id: u32) -> Pos2 {
    let (jx, jy) = stable_pair(u64::from(id));
    pos2(400.0 + jx * 300.0, 300.0 + jy * 200.0)
}
