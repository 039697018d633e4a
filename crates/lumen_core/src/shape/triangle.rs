//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use lumen_math::{DVec2, DVec3, Ray, EPSILON};

/// A triangle, optionally carrying per-vertex normals (smooth shading) and
/// per-vertex texture coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    /// Vertices
    pub p1: DVec3,
    pub p2: DVec3,
    pub p3: DVec3,
    /// Edges from p1, precomputed for Möller-Trumbore
    e1: DVec3,
    e2: DVec3,
    /// Pre-computed face normal (unit length)
    normal: DVec3,
    /// Vertex normals, when smooth
    normals: Option<[DVec3; 3]>,
    /// Vertex texture coordinates
    texcoords: Option<[DVec2; 3]>,
}

impl Triangle {
    /// Create a flat-shaded triangle from three vertices.
    pub fn new(p1: DVec3, p2: DVec3, p3: DVec3) -> Self {
        let e1 = p2 - p1;
        let e2 = p3 - p1;
        let normal = e2.cross(e1).normalize_or_zero();

        Self {
            p1,
            p2,
            p3,
            e1,
            e2,
            normal,
            normals: None,
            texcoords: None,
        }
    }

    /// Create a triangle that interpolates vertex normals.
    pub fn smooth(p1: DVec3, p2: DVec3, p3: DVec3, n1: DVec3, n2: DVec3, n3: DVec3) -> Self {
        Self {
            normals: Some([n1, n2, n3]),
            ..Self::new(p1, p2, p3)
        }
    }

    /// Attach texture coordinates for p1, p2, p3.
    pub fn with_texcoords(mut self, t1: DVec2, t2: DVec2, t3: DVec2) -> Self {
        self.texcoords = Some([t1, t2, t3]);
        self
    }

    pub fn is_smooth(&self) -> bool {
        self.normals.is_some()
    }

    pub fn edges(&self) -> (DVec3, DVec3) {
        (self.e1, self.e2)
    }

    pub fn face_normal(&self) -> DVec3 {
        self.normal
    }

    pub fn vertices(&self) -> [DVec3; 3] {
        [self.p1, self.p2, self.p3]
    }

    /// Möller-Trumbore intersection, returning `(t, u, v)`.
    ///
    /// Rejects rays parallel to the plane (|det| < EPSILON) and hits whose
    /// barycentric coordinates fall outside the triangle.
    pub fn intersect(&self, ray: &Ray) -> Option<(f64, f64, f64)> {
        let dir_cross_e2 = ray.direction().cross(self.e2);
        let det = self.e1.dot(dir_cross_e2);

        // Ray is parallel to triangle
        if det.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / det;
        let p1_to_origin = ray.origin() - self.p1;
        let u = f * p1_to_origin.dot(dir_cross_e2);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let origin_cross_e1 = p1_to_origin.cross(self.e1);
        let v = f * ray.direction().dot(origin_cross_e1);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * self.e2.dot(origin_cross_e1);
        Some((t, u, v))
    }

    /// Normal at barycentric (u, v): the face normal, or the interpolated
    /// vertex normals for smooth triangles.
    pub fn normal_at(&self, uv: Option<(f64, f64)>) -> DVec3 {
        match (self.normals, uv) {
            (Some([n1, n2, n3]), Some((u, v))) => n2 * u + n3 * v + n1 * (1.0 - u - v),
            _ => self.normal,
        }
    }

    /// Texture coordinate at barycentric (u, v), if the triangle has any.
    pub fn texcoord_at(&self, u: f64, v: f64) -> Option<DVec2> {
        self.texcoords
            .map(|[t1, t2, t3]| t2 * u + t3 * v + t1 * (1.0 - u - v))
    }

    /// Bounding box of the three vertices.
    pub fn bounds(&self) -> lumen_math::Aabb {
        let min = self.p1.min(self.p2).min(self.p3);
        let max = self.p1.max(self.p2).max(self.p3);
        lumen_math::Aabb::from_points(min, max)
    }
}
