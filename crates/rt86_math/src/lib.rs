//! Math primitives for rt86.
//!
//! Double precision throughout: `Vec3` is `glam::DVec3` and is used for
//! points, directions and RGB colors alike.

pub use glam::DVec3 as Vec3;

mod interval;
mod ray;
pub mod random;
mod vector;

pub use interval::Interval;
pub use random::{
    random_in_unit_disk, random_on_hemisphere, random_unit_vector, random_vec3,
    random_vec3_range, uniform, uniform_range,
};
pub use ray::Ray;
pub use vector::{near_zero, reflect, refract, NEAR_ZERO_EPSILON};

/// Color type alias (RGB, linear, nominally 0-1)
pub type Color = Vec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(b / a, Vec3::new(4.0, 2.5, 2.0));
        assert_eq!(2.0 * a, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(a.cross(b), Vec3::new(-3.0, 6.0, -3.0));
        assert_eq!(Vec3::new(3.0, 4.0, 0.0).length(), 5.0);
        assert_eq!(a.length_squared(), 14.0);
    }

    #[test]
    fn test_unit_has_length_one() {
        for v in [
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-1e-3, 4e-4, 2e-5),
            Vec3::new(1e6, -3e5, 7.0),
        ] {
            assert!((v.normalize().length() - 1.0).abs() < 1e-12);
        }
    }
}
