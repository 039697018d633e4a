//! Radius-1 cylinder around the y axis, truncated to (min, max).

use lumen_math::{DVec3, Ray, EPSILON};

use crate::arena::ShapeId;
use crate::intersection::Intersection;

pub(super) fn intersect(
    id: ShapeId,
    ray: &Ray,
    min: f64,
    max: f64,
    closed: bool,
    xs: &mut Vec<Intersection>,
) {
    let (o, d) = (ray.origin(), ray.direction());
    let a = d.x * d.x + d.z * d.z;

    // Rays parallel to the y axis can only hit the caps
    if a.abs() >= EPSILON {
        let b = 2.0 * o.x * d.x + 2.0 * o.z * d.z;
        let c = o.x * o.x + o.z * o.z - 1.0;
        let discriminant = b * b - 4.0 * a * c;

        if discriminant < 0.0 {
            return;
        }

        let sqrtd = discriminant.sqrt();
        let mut t0 = (-b - sqrtd) / (2.0 * a);
        let mut t1 = (-b + sqrtd) / (2.0 * a);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        for t in [t0, t1] {
            let y = o.y + t * d.y;
            if min < y && y < max {
                xs.push(Intersection::new(t, id));
            }
        }
    }

    if closed {
        intersect_caps(id, ray, min, max, xs);
    }
}

fn intersect_caps(id: ShapeId, ray: &Ray, min: f64, max: f64, xs: &mut Vec<Intersection>) {
    let (o, d) = (ray.origin(), ray.direction());
    if d.y.abs() < EPSILON {
        return;
    }

    for cap in [min, max] {
        let t = (cap - o.y) / d.y;
        if within_radius(ray, t, 1.0) {
            xs.push(Intersection::new(t, id));
        }
    }
}

/// Whether the ray at `t` lies within `radius` of the y axis.
pub(super) fn within_radius(ray: &Ray, t: f64, radius: f64) -> bool {
    let p = ray.at(t);
    p.x * p.x + p.z * p.z <= radius * radius
}

pub(super) fn normal_at(p: DVec3, min: f64, max: f64) -> DVec3 {
    let dist = p.x * p.x + p.z * p.z;

    if dist < 1.0 && p.y >= max - EPSILON {
        DVec3::Y
    } else if dist < 1.0 && p.y <= min + EPSILON {
        DVec3::NEG_Y
    } else {
        DVec3::new(p.x, 0.0, p.z)
    }
}
