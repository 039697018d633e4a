//! Ray/shape intersections and the sorted list that holds them.

use std::ops::Deref;

use crate::arena::ShapeId;

/// One place where a ray meets a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Ray parameter of the intersection
    pub t: f64,
    /// The leaf shape that was hit
    pub object: ShapeId,
    /// Barycentric (u, v) for triangles
    pub uv: Option<(f64, f64)>,
    /// Triangle index within a mesh
    pub face: Option<usize>,
}

impl Intersection {
    pub fn new(t: f64, object: ShapeId) -> Self {
        Self {
            t,
            object,
            uv: None,
            face: None,
        }
    }

    /// An intersection carrying barycentric coordinates.
    pub fn with_uv(t: f64, object: ShapeId, u: f64, v: f64) -> Self {
        Self {
            t,
            object,
            uv: Some((u, v)),
            face: None,
        }
    }

    /// Tag the intersection with the mesh face it came from.
    pub fn on_face(mut self, face: usize) -> Self {
        self.face = Some(face);
        self
    }
}

/// Intersections kept sorted ascending by `t`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Intersections {
    items: Vec<Intersection>,
}

impl Intersections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from intersections in any order.
    pub fn from_unsorted(mut items: Vec<Intersection>) -> Self {
        sort_by_t(&mut items);
        Self { items }
    }

    /// The visible hit: the lowest non-negative `t`, or `None`.
    pub fn hit(&self) -> Option<&Intersection> {
        // Sorted, so the first non-negative entry is the smallest
        self.items.iter().find(|i| i.t >= 0.0)
    }

    pub fn into_vec(self) -> Vec<Intersection> {
        self.items
    }
}

impl Deref for Intersections {
    type Target = [Intersection];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl From<Vec<Intersection>> for Intersections {
    fn from(items: Vec<Intersection>) -> Self {
        Self::from_unsorted(items)
    }
}

pub(crate) fn sort_by_t(items: &mut [Intersection]) {
    items.sort_by(|a, b| a.t.total_cmp(&b.t));
}
