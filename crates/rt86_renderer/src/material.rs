//! Material trait for surface scattering.

use std::fmt;
use std::sync::Arc;

use crate::hittable::HitRecord;
use rand::RngCore;
use rt86_math::{near_zero, random_unit_vector, reflect, refract, uniform, Color, Ray};

/// Outgoing ray and the color it carries back.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Fraction of the scattered light's color that survives the bounce
    pub attenuation: Color,
    /// The outgoing ray
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync + fmt::Debug {
    /// Scatter an incoming ray.
    ///
    /// Returns `Some` if the ray scatters, or `None` if it is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore)
        -> Option<ScatterResult>;
}

/// Shared, read-only material referenced by any number of spheres.
pub type MaterialHandle = Arc<dyn Material>;

/// Diffuse material handle.
pub fn diffuse(albedo: Color) -> MaterialHandle {
    Arc::new(Lambertian::new(albedo))
}

/// Metallic material handle.
pub fn metallic(albedo: Color, fuzz: f64) -> MaterialHandle {
    Arc::new(Metal::new(albedo, fuzz))
}

/// Dielectric (glass-like) material handle.
pub fn dielectric(refraction_index: f64) -> MaterialHandle {
    Arc::new(Dielectric::new(refraction_index))
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror. Expected in [0, 1] but not clamped.
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self { albedo, fuzz }
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        // Fuzz is added to the unit reflection, not the raw one
        let reflected = reflect(ray_in.direction(), rec.normal).normalize();
        let scattered_dir = reflected + self.fuzz * random_unit_vector(rng);

        // Fuzz can push the ray below the surface; absorb it then
        if scattered_dir.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, scattered_dir),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Refractive index relative to the surrounding medium
    refraction_index: f64,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `refraction_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn new(refraction_index: f64) -> Self {
        Self { refraction_index }
    }

    /// Schlick's approximation for reflectance.
    pub fn reflectance(cosine: f64, refraction_index: f64) -> f64 {
        let r0 = ((1.0 - refraction_index) / (1.0 + refraction_index)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let ri = if rec.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = ri * sin_theta > 1.0;

        let direction = if cannot_refract || Self::reflectance(cos_theta, ri) > uniform(rng) {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, ri)
        };

        Some(ScatterResult {
            // Glass absorbs nothing
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}
