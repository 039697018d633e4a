//! Axis-aligned cube spanning [-1, 1] on every axis.

use lumen_math::{check_axis, DVec3, Ray};

use crate::arena::ShapeId;
use crate::intersection::Intersection;

/// Slab method: the largest entry and smallest exit across the three axes.
pub(super) fn intersect(id: ShapeId, ray: &Ray, xs: &mut Vec<Intersection>) {
    let (o, d) = (ray.origin(), ray.direction());
    let (xtmin, xtmax) = check_axis(-1.0, 1.0, o.x, d.x);
    let (ytmin, ytmax) = check_axis(-1.0, 1.0, o.y, d.y);
    let (ztmin, ztmax) = check_axis(-1.0, 1.0, o.z, d.z);

    let tmin = xtmin.max(ytmin).max(ztmin);
    let tmax = xtmax.min(ytmax).min(ztmax);

    if tmin > tmax {
        return;
    }

    xs.push(Intersection::new(tmin, id));
    xs.push(Intersection::new(tmax, id));
}

/// The face is the axis with the largest absolute coordinate.
pub(super) fn normal_at(p: DVec3) -> DVec3 {
    let (ax, ay, az) = (p.x.abs(), p.y.abs(), p.z.abs());
    let maxc = ax.max(ay).max(az);

    if maxc == ax {
        DVec3::new(p.x, 0.0, 0.0)
    } else if maxc == ay {
        DVec3::new(0.0, p.y, 0.0)
    } else {
        DVec3::new(0.0, 0.0, p.z)
    }
}
