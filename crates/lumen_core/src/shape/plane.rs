//! The xz plane through the origin.

use lumen_math::{DVec3, Ray, EPSILON};

use crate::arena::ShapeId;
use crate::intersection::Intersection;

pub(super) fn intersect(id: ShapeId, ray: &Ray, xs: &mut Vec<Intersection>) {
    // Parallel (or coplanar) rays never register a hit
    if ray.direction().y.abs() < EPSILON {
        return;
    }

    let t = -ray.origin().y / ray.direction().y;
    xs.push(Intersection::new(t, id));
}

#[inline]
pub(super) fn normal_at(_p: DVec3) -> DVec3 {
    DVec3::Y
}
