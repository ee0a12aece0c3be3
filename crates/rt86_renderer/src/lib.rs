//! rt86 renderer - CPU Monte Carlo path tracing of spheres.
//!
//! A scene of spheres with diffuse, metallic and dielectric materials is
//! traced from a thin-lens camera; each pixel averages several jittered
//! samples of the recursive [`ray_color`] estimator.
//!
//! ```ignore
//! use rt86_renderer::{diffuse, render, CameraSettings, Color, RenderConfig, Scene, Sphere, Vec3};
//!
//! let mut scene = Scene::new();
//! scene.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, diffuse(Color::splat(0.5))))?;
//! let camera = CameraSettings::default().build()?;
//! let image = render(&camera, &scene, &RenderConfig::default(), &mut rand::thread_rng());
//! image.save("out.png")?;
//! ```

mod camera;
mod hittable;
mod material;
mod output;
mod renderer;
mod scene;
mod sphere;

pub use camera::{Camera, CameraError, CameraSettings};
pub use hittable::{HitRecord, Hittable};
pub use material::{
    dielectric, diffuse, metallic, Dielectric, Lambertian, Material, MaterialHandle, Metal,
    ScatterResult,
};
pub use output::{color_to_rgba, linear_to_gamma, ImageBuffer, OutputError};
pub use renderer::{
    ray_color, render, render_pixel, sky_gradient, RenderConfig, HORIZON_COLOR,
    SHADOW_ACNE_EPSILON, ZENITH_COLOR,
};
pub use scene::{Scene, SceneError};
pub use sphere::Sphere;

/// Re-export the math types the renderer API is built on
pub use rt86_math::{Color, Interval, Ray, Vec3};
