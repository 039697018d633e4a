use glam::{DMat4, DVec3};

/// A ray in 3D space with an origin point and a direction vector.
///
/// The direction is not required to be normalized; shapes intersect rays
/// after transforming them into object space, which generally rescales the
/// direction, so `t` values stay comparable across spaces.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Apply a transform: the origin as a point (w=1), the direction as a
    /// vector (w=0).
    pub fn transform(&self, m: &DMat4) -> Ray {
        Ray::new(m.transform_point3(self.origin), m.transform_vector3(self.direction))
    }
}
