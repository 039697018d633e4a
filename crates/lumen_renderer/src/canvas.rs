//! Output image shared between render workers.
//!
//! Each channel of each pixel is an `AtomicU64` holding `f64` bits, so
//! workers write through `&Canvas` without locks and a viewer thread can
//! read a render in progress.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use lumen_math::{Color, Interval};

use crate::error::RenderResult;

pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<[AtomicU64; 3]>,
}

impl Canvas {
    /// Create a canvas filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        let count = width as usize * height as usize;
        let pixels = (0..count)
            .map(|_| {
                [
                    AtomicU64::new(0f64.to_bits()),
                    AtomicU64::new(0f64.to_bits()),
                    AtomicU64::new(0f64.to_bits()),
                ]
            })
            .collect();

        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Get the pixel at (x, y), or `None` outside the canvas.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        let px = &self.pixels[self.index(x, y)?];
        Some(Color::new(
            f64::from_bits(px[0].load(Ordering::Relaxed)),
            f64::from_bits(px[1].load(Ordering::Relaxed)),
            f64::from_bits(px[2].load(Ordering::Relaxed)),
        ))
    }

    /// Set the pixel at (x, y), clamping each channel to [0, 1]. Writes
    /// outside the canvas are dropped.
    pub fn set(&self, x: u32, y: u32, color: Color) {
        let Some(i) = self.index(x, y) else {
            return;
        };

        let px = &self.pixels[i];
        for (channel, value) in px.iter().zip(color.to_array()) {
            let value = if value.is_nan() { 0.0 } else { Interval::UNIT.clamp(value) };
            channel.store(value.to_bits(), Ordering::Relaxed);
        }
    }

    /// Snapshot of every pixel in row-major order.
    pub fn pixels(&self) -> Vec<Color> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter_map(|(x, y)| self.get(x, y))
            .collect()
    }

    /// Convert to an 8-bit image for encoding.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(color_to_rgba(self.get(x, y).unwrap_or(Color::ZERO)))
        })
    }

    /// Encode as PNG (or any format `image` infers from the extension).
    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        self.to_rgba_image().save(path)?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let channel = |c: f64| (Interval::UNIT.clamp(c) * 255.0).round() as u8;
    [channel(color.x), channel(color.y), channel(color.z), 255]
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
