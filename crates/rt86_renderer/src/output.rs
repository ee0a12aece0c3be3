//! Render target and the conversion from linear color to 8-bit pixels.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use log::info;
use rt86_math::{Color, Interval};
use thiserror::Error;

/// Errors raised when writing a finished image.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write image {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Channel values stay below 1.0 so 256 * x fits in a byte.
const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let to_byte = |c: f64| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z), 255]
}

/// Linear-color image, row-major from the top-left pixel.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Gamma-corrected 8-bit image.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let [r, g, b, _] = color_to_rgba(self.get(x, y));
            Rgb([r, g, b])
        })
    }

    /// Write the image; the format follows the file extension (png, ppm, ...).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let path = path.as_ref();
        self.to_rgb_image()
            .save(path)
            .map_err(|source| OutputError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 1e-12);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_color_to_rgba() {
        assert_eq!(color_to_rgba(Color::ZERO), [0, 0, 0, 255]);
        assert_eq!(color_to_rgba(Color::ONE), [255, 255, 255, 255]);
        // Over-bright and negative channels are clamped
        assert_eq!(color_to_rgba(Color::new(4.0, -1.0, 0.25)), [255, 0, 128, 255]);
    }

    #[test]
    fn test_image_buffer_get_set() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, Color::new(0.1, 0.2, 0.3));

        assert_eq!(image.pixels.len(), 6);
        assert_eq!(image.get(2, 1), Color::new(0.1, 0.2, 0.3));
        assert_eq!(image.pixels[5], Color::new(0.1, 0.2, 0.3));
        assert_eq!(image.get(0, 0), Color::ZERO);
    }

    #[test]
    fn test_save_and_reload() {
        let mut image = ImageBuffer::new(4, 3);
        image.set(1, 2, Color::ONE);

        let path = std::env::temp_dir().join(format!("rt86_output_{}.png", std::process::id()));
        image.save(&path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(reloaded.dimensions(), (4, 3));
        assert_eq!(reloaded.get_pixel(1, 2), &Rgb([255, 255, 255]));
        assert_eq!(reloaded.get_pixel(0, 0), &Rgb([0, 0, 0]));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_unknown_extension_fails() {
        let image = ImageBuffer::new(1, 1);
        let path = std::env::temp_dir().join("rt86_output.unknown_format");
        let err = image.save(&path).unwrap_err();
        assert!(err.to_string().contains("rt86_output.unknown_format"));
    }
}
