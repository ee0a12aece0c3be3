//! Reflection, refraction and degeneracy helpers on `Vec3`.

use crate::Vec3;

/// Per-component magnitude below which a vector counts as zero.
pub const NEAR_ZERO_EPSILON: f64 = 1e-8;

/// Reflect a vector about a normal: `v - 2 (v . n) n`.
///
/// `n` is expected to be unit length.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with unit normal `n`.
///
/// `etai_over_etat` is the ratio of the incident medium's refractive index
/// to the transmitted medium's. Both `uv` and `n` must already be unit
/// length.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    // abs() keeps sqrt in its domain when |perp|^2 overshoots 1.0 slightly
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// True if every component's magnitude is below [`NEAR_ZERO_EPSILON`].
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.abs().cmplt(Vec3::splat(NEAR_ZERO_EPSILON)).all()
}
