//! Random sampling over a caller-supplied uniform source.
//!
//! Every sampler takes `&mut dyn RngCore` so a render can be driven by a
//! seeded generator and reproduced exactly.

use crate::Vec3;
use rand::{Rng, RngCore};

/// Squared-length floor for unit-sphere rejection sampling. Anything
/// smaller may underflow to zero when normalized.
const MIN_UNIT_SAMPLE_LENGTH_SQUARED: f64 = 1e-160;

/// Uniform double in [0, 1).
#[inline]
pub fn uniform(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform double in [lo, hi).
#[inline]
pub fn uniform_range(rng: &mut dyn RngCore, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * uniform(rng)
}

/// Vector with every component uniform in [0, 1).
pub fn random_vec3(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(uniform(rng), uniform(rng), uniform(rng))
}

/// Vector with every component uniform in [lo, hi).
pub fn random_vec3_range(rng: &mut dyn RngCore, lo: f64, hi: f64) -> Vec3 {
    Vec3::new(
        uniform_range(rng, lo, hi),
        uniform_range(rng, lo, hi),
        uniform_range(rng, lo, hi),
    )
}

/// Uniformly distributed direction on the unit sphere.
///
/// Rejection-samples the cube [-1, 1)^3 until the point falls inside the
/// unit ball, then normalizes.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_vec3_range(rng, -1.0, 1.0);
        let len_sq = p.length_squared();
        if MIN_UNIT_SAMPLE_LENGTH_SQUARED < len_sq && len_sq <= 1.0 {
            return p / len_sq.sqrt();
        }
    }
}

/// Uniform point strictly inside the unit disk on the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            uniform_range(rng, -1.0, 1.0),
            uniform_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Unit direction in the hemisphere around `normal`.
pub fn random_on_hemisphere(rng: &mut dyn RngCore, normal: Vec3) -> Vec3 {
    let on_unit_sphere = random_unit_vector(rng);
    if on_unit_sphere.dot(normal) > 0.0 {
        on_unit_sphere
    } else {
        -on_unit_sphere
    }
}
