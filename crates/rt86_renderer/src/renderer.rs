//! Core path tracing integrator.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a bounce budget
//! - Sky gradient background
//! - Anti-aliasing via multi-sampling

use std::time::Instant;

use crate::{Camera, Hittable, ImageBuffer};
use log::{info, trace};
use rand::RngCore;
use rt86_math::{Color, Interval, Ray};
use serde::{Deserialize, Serialize};

/// Minimum hit distance; keeps bounced rays from re-hitting their own origin.
pub const SHADOW_ACNE_EPSILON: f64 = 0.001;

/// Sky color at the horizon.
pub const HORIZON_COLOR: Color = Color::new(1.0, 1.0, 1.0);

/// Sky color at the zenith.
pub const ZENITH_COLOR: Color = Color::new(0.5, 0.7, 1.0);

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 10,
            max_depth: 10,
        }
    }
}

/// Compute the color seen by a ray.
///
/// Traces the ray through the scene, bouncing off surfaces and multiplying
/// in each material's attenuation, until it escapes to the sky, is absorbed,
/// or `depth` bounces have been spent.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // Bounce budget exhausted: no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(SHADOW_ACNE_EPSILON, f64::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Vertical blend from white at the horizon to light blue at the zenith.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * HORIZON_COLOR + a * ZENITH_COLOR
}

/// Render a single pixel with multi-sampling.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    if config.samples_per_pixel == 0 {
        return Color::ZERO;
    }

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    pixel_color / config.samples_per_pixel as f64
}

/// Render the entire scene to an image buffer, one scanline at a time.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> ImageBuffer {
    let width = camera.image_width();
    let height = camera.image_height();
    info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        width, height, config.samples_per_pixel, config.max_depth
    );

    let start = Instant::now();
    let mut image = ImageBuffer::new(width, height);

    for y in 0..height {
        trace!("Scanline {} of {}", y + 1, height);
        for x in 0..width {
            let color = render_pixel(camera, world, x, y, config, rng);
            image.set(x, y, color);
        }
    }

    info!("Rendered in {:?}", start.elapsed());
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{dielectric, diffuse, metallic};
    use crate::{CameraSettings, Scene, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rt86_math::Vec3;

    fn single_sphere(material: crate::MaterialHandle) -> Scene {
        let mut scene = Scene::new();
        scene
            .add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, material))
            .unwrap();
        scene
    }

    #[test]
    fn test_sky_gradient_endpoints() {
        let up = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(sky_gradient(&up), Color::new(0.5, 0.7, 1.0));

        let down = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(sky_gradient(&down), Color::ONE);

        // Direction length does not matter
        let long_up = Ray::new(Vec3::ZERO, Vec3::new(0.0, 4.0, 0.0));
        assert_eq!(sky_gradient(&long_up), ZENITH_COLOR);
    }

    #[test]
    fn test_sky_gradient_horizon_midpoint() {
        let level = Ray::new(Vec3::ZERO, Vec3::X);
        let color = sky_gradient(&level);
        assert!((color - Color::new(0.75, 0.85, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_zero_depth_is_black() {
        let scene = single_sphere(diffuse(Color::ONE));
        let mut rng = StdRng::seed_from_u64(0);

        let at_sphere = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let at_sky = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(ray_color(&at_sphere, &scene, 0, &mut rng), Color::ZERO);
        assert_eq!(ray_color(&at_sky, &scene, 0, &mut rng), Color::ZERO);
        assert_eq!(ray_color(&at_sky, &Scene::new(), 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_empty_scene_returns_sky() {
        let scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(0);

        let up = Ray::new(Vec3::new(3.0, -2.0, 1.0), Vec3::Y);
        assert_eq!(ray_color(&up, &scene, 10, &mut rng), ZENITH_COLOR);

        let down = Ray::new(Vec3::ZERO, Vec3::NEG_Y);
        assert_eq!(ray_color(&down, &scene, 1, &mut rng), HORIZON_COLOR);
    }

    #[test]
    fn test_single_bounce_budget_hitting_surface_is_black() {
        let scene = single_sphere(diffuse(Color::ONE));
        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        // The hit uses the only bounce; the scattered ray has none left
        assert_eq!(ray_color(&ray, &scene, 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_mirror_attenuates_sky() {
        let albedo = Color::new(0.8, 0.6, 0.2);
        let scene = single_sphere(metallic(albedo, 0.0));
        let mut rng = StdRng::seed_from_u64(0);

        // Head-on: reflects straight back along +Z, a level ray to the sky
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let color = ray_color(&ray, &scene, 2, &mut rng);
        let expected = albedo * sky_gradient(&Ray::new(Vec3::ZERO, Vec3::Z));
        assert!((color - expected).length() < 1e-12);
    }

    #[test]
    fn test_glass_passes_sky_through() {
        let scene = single_sphere(dielectric(1.5));
        let mut rng = StdRng::seed_from_u64(3);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        // Whether the ray reflects or refracts it ends on a level sky color
        for _ in 0..20 {
            let color = ray_color(&ray, &scene, 10, &mut rng);
            assert!((color - Color::new(0.75, 0.85, 1.0)).length() < 1e-9);
        }
    }

    #[test]
    fn test_render_pixel_hits_sphere() {
        let scene = single_sphere(diffuse(Color::new(0.5, 0.5, 0.5)));
        let camera = CameraSettings::default()
            .with_resolution(10, 1.0)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0)
            .build()
            .unwrap();
        let config = RenderConfig {
            samples_per_pixel: 8,
            max_depth: 5,
        };
        let mut rng = StdRng::seed_from_u64(42);

        let color = render_pixel(&camera, &scene, 5, 5, &config, &mut rng);
        // Grey diffuse under a sky no brighter than white darkens the result
        assert!(color.length() > 0.0);
        assert!(color.max_element() <= 0.5 + 1e-12);
    }

    #[test]
    fn test_render_is_deterministic_per_seed() {
        let scene = single_sphere(metallic(Color::splat(0.9), 0.3));
        let camera = CameraSettings::default()
            .with_resolution(6, 1.5)
            .with_position(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .build()
            .unwrap();
        let config = RenderConfig {
            samples_per_pixel: 2,
            max_depth: 4,
        };

        let a = render(&camera, &scene, &config, &mut StdRng::seed_from_u64(5));
        let b = render(&camera, &scene, &config, &mut StdRng::seed_from_u64(5));
        assert_eq!(a.width, 6);
        assert_eq!(a.height, 4);
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn test_zero_samples_is_black() {
        let camera = CameraSettings::default().build().unwrap();
        let config = RenderConfig {
            samples_per_pixel: 0,
            max_depth: 10,
        };
        let mut rng = StdRng::seed_from_u64(0);
        let color = render_pixel(&camera, &Scene::new(), 0, 0, &config, &mut rng);
        assert_eq!(color, Color::ZERO);
    }
}
