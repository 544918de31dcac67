//! Random sampling helpers.
//!
//! Everything takes `&mut dyn RngCore` so renders can use the thread-local
//! generator while tests pass a seeded `StdRng`.

use std::f64::consts::TAU;

use rand::{Rng, RngCore};

/// Uniform f64 in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform point on a disk of `radius`, as polar `(theta, r)`.
///
/// Taking the square root of the radial sample keeps the density uniform
/// over the disk area.
pub fn sample_disk(rng: &mut dyn RngCore, radius: f64) -> (f64, f64) {
    let theta = gen_f64(rng) * TAU;
    let r = radius * gen_f64(rng).sqrt();
    (theta, r)
}
