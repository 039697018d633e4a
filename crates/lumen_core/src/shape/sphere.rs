//! Unit sphere centered at the origin.

use lumen_math::{DVec3, Ray};

use crate::arena::ShapeId;
use crate::intersection::Intersection;

/// Solve |o + t*d|^2 = 1. A tangent ray yields the same root twice.
pub(super) fn intersect(id: ShapeId, ray: &Ray, xs: &mut Vec<Intersection>) {
    let sphere_to_ray = ray.origin();
    let a = ray.direction().length_squared();
    let b = 2.0 * ray.direction().dot(sphere_to_ray);
    let c = sphere_to_ray.length_squared() - 1.0;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 || a == 0.0 {
        return;
    }

    let sqrtd = discriminant.sqrt();
    xs.push(Intersection::new((-b - sqrtd) / (2.0 * a), id));
    xs.push(Intersection::new((-b + sqrtd) / (2.0 * a), id));
}

#[inline]
pub(super) fn normal_at(p: DVec3) -> DVec3 {
    p
}
