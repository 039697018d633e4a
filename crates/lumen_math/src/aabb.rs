use crate::{Interval, Ray, EPSILON};
use glam::DVec3;

/// Axis-Aligned Bounding Box used to prune rays before visiting children.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
/// Unbounded shapes (planes, open cylinders) use infinite intervals.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

/// Intersect a ray with one slab of a box, returning the entry and exit `t`.
///
/// When the direction component is within `EPSILON` of zero the division is
/// replaced by a multiplication with a signed `f64::MAX`, which keeps the
/// interval ordering without dividing by zero.
pub fn check_axis(min: f64, max: f64, origin: f64, direction: f64) -> (f64, f64) {
    let tmin_numerator = min - origin;
    let tmax_numerator = max - origin;

    let (tmin, tmax) = if direction.abs() >= EPSILON {
        (tmin_numerator / direction, tmax_numerator / direction)
    } else {
        let substitute = f64::MAX.copysign(direction);
        (tmin_numerator * substitute, tmax_numerator * substitute)
    };

    if tmin > tmax {
        (tmax, tmin)
    } else {
        (tmin, tmax)
    }
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB from two corner points.
    pub fn from_points(a: DVec3, b: DVec3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));

        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Grow the box to include a point.
    pub fn add_point(&mut self, p: DVec3) {
        *self = Aabb::surrounding(self, &Aabb::from_points(p, p));
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    pub fn min_point(&self) -> DVec3 {
        DVec3::new(self.x.min, self.y.min, self.z.min)
    }

    pub fn max_point(&self) -> DVec3 {
        DVec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// The eight corners, min corner first and max corner last.
    pub fn corners(&self) -> [DVec3; 8] {
        let (lo, hi) = (self.min_point(), self.max_point());
        [
            DVec3::new(lo.x, lo.y, lo.z),
            DVec3::new(hi.x, lo.y, lo.z),
            DVec3::new(lo.x, hi.y, lo.z),
            DVec3::new(hi.x, hi.y, lo.z),
            DVec3::new(lo.x, lo.y, hi.z),
            DVec3::new(hi.x, lo.y, hi.z),
            DVec3::new(lo.x, hi.y, hi.z),
            DVec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// True if any axis contains nothing.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    /// True if every bound is a finite number.
    pub fn is_finite(&self) -> bool {
        self.min_point().is_finite() && self.max_point().is_finite()
    }

    pub fn contains_point(&self, p: DVec3) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }

    /// Slab test, returning the `(tmin, tmax)` span of the ray inside the box.
    ///
    /// The span may lie behind the ray origin; callers that only prune use
    /// `hit`.
    pub fn intersect(&self, r: &Ray) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }

        let (xtmin, xtmax) = check_axis(self.x.min, self.x.max, r.origin.x, r.direction.x);
        let (ytmin, ytmax) = check_axis(self.y.min, self.y.max, r.origin.y, r.direction.y);
        let (ztmin, ztmax) = check_axis(self.z.min, self.z.max, r.origin.z, r.direction.z);

        let tmin = xtmin.max(ytmin).max(ztmin);
        let tmax = xtmax.min(ytmax).min(ztmax);

        if tmin > tmax {
            None
        } else {
            Some((tmin, tmax))
        }
    }

    /// Test if a ray passes through this AABB at all.
    pub fn hit(&self, r: &Ray) -> bool {
        self.intersect(r).is_some()
    }

    /// Pad intervals to avoid zero-width AABBs (degenerate cases).
    fn pad_to_minimums(&mut self) {
        let delta = 0.0001;
        if self.x.size() < delta {
            self.x = self.x.expand(delta);
        }
        if self.y.size() < delta {
            self.y = self.y.expand(delta);
        }
        if self.z.size() < delta {
            self.z = self.z.expand(delta);
        }
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> DVec3 {
        DVec3::new(
            (self.x.min + self.x.max) * 0.5,
            (self.y.min + self.y.max) * 0.5,
            (self.z.min + self.z.max) * 0.5,
        )
    }

    /// Static constants
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };
}
