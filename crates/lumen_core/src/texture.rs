//! Image textures sampled by UV patterns and mesh texture coordinates.
//!
//! Images are decoded once through the `image` crate and stored as linear
//! RGB so that lookups during shading are plain indexing.

use std::path::Path;

use lumen_math::Color;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A decoded image in linear RGB, row-major with row 0 at the top.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Texture {
    /// Build a texture from raw linear pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> TextureResult<Self> {
        if width == 0 || height == 0 {
            return Err(TextureError::LoadError(format!(
                "texture has zero size ({width}x{height})"
            )));
        }
        if pixels.len() != width as usize * height as usize {
            return Err(TextureError::LoadError(format!(
                "expected {} pixels for {width}x{height}, got {}",
                width as usize * height as usize,
                pixels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A 1x1 texture.
    pub fn solid(color: Color) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![color],
        }
    }

    /// Decode an image file, converting sRGB to linear.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| {
            TextureError::LoadError(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = rgb
            .pixels()
            .map(|p| {
                Color::new(
                    srgb_to_linear(p[0]),
                    srgb_to_linear(p[1]),
                    srgb_to_linear(p[2]),
                )
            })
            .collect();

        log::debug!("Loaded texture: {} ({}x{})", path.display(), width, height);

        Self::from_pixels(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Nearest-neighbour lookup. `u` and `v` wrap into [0, 1); `v = 0` is
    /// the bottom row of the image.
    pub fn sample(&self, u: f64, v: f64) -> Color {
        let u = u.rem_euclid(1.0);
        let v = 1.0 - v.rem_euclid(1.0);

        let x = ((u * (self.width - 1) as f64).round() as u32).min(self.width - 1);
        let y = ((v * (self.height - 1) as f64).round() as u32).min(self.height - 1);

        self.pixels[(y * self.width + x) as usize]
    }
}

/// Convert sRGB byte value to linear float.
fn srgb_to_linear(value: u8) -> f64 {
    let v = value as f64 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}
