//! Camera for ray generation.
//!
//! [`CameraSettings`] holds the framing parameters a user edits;
//! [`Camera`] is the derived, immutable state used to generate rays.

use log::debug;
use rand::RngCore;
use rt86_math::{random_in_unit_disk, uniform, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Ray;

/// Errors raised when camera settings cannot produce a valid view.
#[derive(Debug, Error, PartialEq)]
pub enum CameraError {
    #[error("Aspect ratio must be finite and positive, got {0}")]
    InvalidAspectRatio(f64),

    #[error("Image width must be at least one pixel")]
    ZeroImageWidth,

    #[error("Vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f64),

    #[error("Focus distance must be finite and positive, got {0}")]
    InvalidFocusDistance(f64),

    #[error("Defocus angle must be finite, got {0}")]
    InvalidDefocusAngle(f64),

    #[error("look_from and look_at are the same point")]
    CoincidentLookAt,

    #[error("Up vector is parallel to the view direction")]
    DegenerateUp,
}

/// User-facing camera parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f64,
    /// Distance from camera to plane of perfect focus
    pub focus_distance: f64,
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: 4.0 / 3.0,
            image_width: 320,
            vfov: 20.0,
            defocus_angle: 0.6,
            focus_distance: 10.0,
            look_from: Vec3::new(13.0, 2.0, 3.0),
            look_at: Vec3::ZERO,
            vup: Vec3::Y,
        }
    }
}

impl CameraSettings {
    /// Set image width and aspect ratio; the height is derived.
    pub fn with_resolution(mut self, image_width: u32, aspect_ratio: f64) -> Self {
        self.image_width = image_width;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, defocus_angle: f64, focus_distance: f64) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_distance = focus_distance;
        self
    }

    /// Image height for these settings, never below one pixel.
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f64 / self.aspect_ratio) as u32).max(1)
    }

    /// Derive the camera.
    pub fn build(&self) -> Result<Camera, CameraError> {
        Camera::new(self)
    }
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    image_width: u32,
    image_height: u32,
    defocus_angle: f64,

    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    /// Derive viewport geometry and the camera basis from `settings`.
    pub fn new(settings: &CameraSettings) -> Result<Self, CameraError> {
        validate(settings)?;

        let image_width = settings.image_width;
        let image_height = settings.image_height();
        let center = settings.look_from;

        // Calculate viewport dimensions
        let theta = settings.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * settings.focus_distance;
        let viewport_width = viewport_height * (image_width as f64 / image_height as f64);

        // Calculate camera basis vectors
        let w = (settings.look_from - settings.look_at).normalize();
        let u = settings.vup.cross(w).normalize();
        let v = w.cross(u);

        // Viewport edges; v runs down the image
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        let pixel_delta_u = viewport_u / image_width as f64;
        let pixel_delta_v = viewport_v / image_height as f64;

        let viewport_upper_left =
            center - settings.focus_distance * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius = settings.focus_distance * (settings.defocus_angle / 2.0).to_radians().tan();

        debug!(
            "Camera {}x{} at {:?}, viewport {:.4}x{:.4}, defocus radius {:.4}",
            image_width, image_height, center, viewport_width, viewport_height, defocus_radius
        );

        Ok(Self {
            image_width,
            image_height,
            defocus_angle: settings.defocus_angle,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            u,
            v,
            w,
            defocus_disk_u: u * defocus_radius,
            defocus_disk_v: v * defocus_radius,
        })
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Eye position.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Orthonormal basis `(u, v, w)`: right, up, and backwards from the view.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// World position of the center of pixel (0, 0).
    pub fn pixel00_loc(&self) -> Vec3 {
        self.pixel00_loc
    }

    /// Per-pixel step vectors, horizontal then vertical.
    pub fn pixel_deltas(&self) -> (Vec3, Vec3) {
        (self.pixel_delta_u, self.pixel_delta_v)
    }

    /// Generate a jittered ray through pixel (i, j).
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f64) + offset.x) * self.pixel_delta_u
            + ((j as f64) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Vec3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}

fn validate(settings: &CameraSettings) -> Result<(), CameraError> {
    if !(settings.aspect_ratio.is_finite() && settings.aspect_ratio > 0.0) {
        return Err(CameraError::InvalidAspectRatio(settings.aspect_ratio));
    }
    if settings.image_width == 0 {
        return Err(CameraError::ZeroImageWidth);
    }
    if !(settings.vfov > 0.0 && settings.vfov < 180.0) {
        return Err(CameraError::InvalidFieldOfView(settings.vfov));
    }
    if !(settings.focus_distance.is_finite() && settings.focus_distance > 0.0) {
        return Err(CameraError::InvalidFocusDistance(settings.focus_distance));
    }
    if !settings.defocus_angle.is_finite() {
        return Err(CameraError::InvalidDefocusAngle(settings.defocus_angle));
    }

    let view = settings.look_from - settings.look_at;
    if view.length_squared() == 0.0 {
        return Err(CameraError::CoincidentLookAt);
    }
    if settings.vup.cross(view).length_squared() == 0.0 {
        return Err(CameraError::DegenerateUp);
    }
    Ok(())
}

/// Sample a random point in the square [-0.5, 0.5) x [-0.5, 0.5).
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(uniform(rng) - 0.5, uniform(rng) - 0.5, 0.0)
}
