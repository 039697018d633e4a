//! Double-napped cone x² - y² + z² = 0, truncated to (min, max).

use lumen_math::{DVec3, Ray, EPSILON};

use super::cylinder::within_radius;
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
    let a = d.x * d.x - d.y * d.y + d.z * d.z;
    let b = 2.0 * o.x * d.x - 2.0 * o.y * d.y + 2.0 * o.z * d.z;
    let c = o.x * o.x - o.y * o.y + o.z * o.z;

    let mut push_wall = |t: f64| {
        let y = o.y + t * d.y;
        if min < y && y < max {
            xs.push(Intersection::new(t, id));
        }
    };

    if a.abs() < EPSILON {
        // Direction parallel to one of the cone's halves: the quadratic
        // collapses to a line, which crosses the other half once
        if b.abs() >= EPSILON {
            push_wall(-c / (2.0 * b));
        }
    } else {
        let discriminant = b * b - 4.0 * a * c;
        if discriminant >= 0.0 {
            let sqrtd = discriminant.sqrt();
            let mut t0 = (-b - sqrtd) / (2.0 * a);
            let mut t1 = (-b + sqrtd) / (2.0 * a);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            push_wall(t0);
            push_wall(t1);
        }
    }

    if closed && d.y.abs() >= EPSILON {
        // The cone's radius at a cap equals the cap's |y|
        for cap in [min, max] {
            let t = (cap - o.y) / d.y;
            if within_radius(ray, t, cap.abs()) {
                xs.push(Intersection::new(t, id));
            }
        }
    }
}

pub(super) fn normal_at(p: DVec3, min: f64, max: f64) -> DVec3 {
    let dist = p.x * p.x + p.z * p.z;

    if dist < max * max && p.y >= max - EPSILON {
        DVec3::Y
    } else if dist < min * min && p.y <= min + EPSILON {
        DVec3::NEG_Y
    } else {
        let mut y = dist.sqrt();
        if p.y > 0.0 {
            y = -y;
        }
        DVec3::new(p.x, y, p.z)
    }
}
