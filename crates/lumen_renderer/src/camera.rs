//! Pinhole camera for ray generation.

use lumen_core::{SceneError, SceneResult};
use lumen_math::{view_transform, DMat4, DVec3, Mat4Ext, Ray};

/// A pinhole camera looking down -z in its own space, one unit from the
/// canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    // Image settings
    hsize: u32,
    vsize: u32,
    field_of_view: f64,

    // View transform and its cached inverse
    transform: DMat4,
    inverse: DMat4,

    // Cached computed values
    half_width: f64,
    half_height: f64,
    pixel_size: f64,
}

impl Camera {
    /// Create a camera with the given canvas size and horizontal field of
    /// view in radians.
    pub fn new(hsize: u32, vsize: u32, field_of_view: f64) -> Self {
        let half_view = (field_of_view / 2.0).tan();
        let aspect = hsize as f64 / vsize as f64;

        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        Self {
            hsize,
            vsize,
            field_of_view,
            transform: DMat4::IDENTITY,
            inverse: DMat4::IDENTITY,
            half_width,
            half_height,
            pixel_size: half_width * 2.0 / hsize as f64,
        }
    }

    /// Set the view transform.
    pub fn with_transform(mut self, transform: DMat4) -> SceneResult<Self> {
        self.inverse = transform.try_inverse().ok_or(SceneError::NonInvertible)?;
        self.transform = transform;
        Ok(self)
    }

    /// Set camera position.
    pub fn with_position(self, from: DVec3, to: DVec3, up: DVec3) -> SceneResult<Self> {
        self.with_transform(view_transform(from, to, up))
    }

    pub fn hsize(&self) -> u32 {
        self.hsize
    }

    pub fn vsize(&self) -> u32 {
        self.vsize
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    pub fn transform(&self) -> &DMat4 {
        &self.transform
    }

    /// Ray through the centre of pixel (px, py).
    pub fn ray_for_pixel(&self, px: u32, py: u32) -> Ray {
        self.ray_for_subpixel(px, py, 0.5, 0.5)
    }

    /// Ray through an offset within pixel (px, py), offsets in [0, 1).
    pub fn ray_for_subpixel(&self, px: u32, py: u32, ox: f64, oy: f64) -> Ray {
        let xoffset = (px as f64 + ox) * self.pixel_size;
        let yoffset = (py as f64 + oy) * self.pixel_size;

        // Camera looks toward -z, so +x is to the left
        let world_x = self.half_width - xoffset;
        let world_y = self.half_height - yoffset;

        let pixel = self
            .inverse
            .transform_point3(DVec3::new(world_x, world_y, -1.0));
        let origin = self.inverse.transform_point3(DVec3::ZERO);
        let direction = (pixel - origin).normalize();

        Ray::new(origin, direction)
    }
}
