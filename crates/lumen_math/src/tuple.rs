//! Homogeneous tuples.
//!
//! Points and vectors share one representation, `(x, y, z, w)`, and are told
//! apart by `w`: 1 for points, 0 for vectors. Everywhere else in Lumen the
//! `w` component is implicit: points go through `DMat4::transform_point3`
//! and vectors through `DMat4::transform_vector3`, so translation only ever
//! moves positions.

use glam::{DVec3, DVec4};

/// Shared tolerance for floating point comparisons and parallelism checks.
pub const EPSILON: f64 = 1e-4;

/// A homogeneous `(x, y, z, w)` tuple.
pub type Tuple = DVec4;

/// Create a point (w = 1).
#[inline]
pub fn point(x: f64, y: f64, z: f64) -> Tuple {
    DVec4::new(x, y, z, 1.0)
}

/// Create a vector (w = 0).
#[inline]
pub fn vector(x: f64, y: f64, z: f64) -> Tuple {
    DVec4::new(x, y, z, 0.0)
}

/// Compare two scalars within `EPSILON`.
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Reflect `v` around the normal `n`.
#[inline]
pub fn reflect(v: DVec3, n: DVec3) -> DVec3 {
    v - n * 2.0 * v.dot(n)
}

/// Point/vector queries on homogeneous tuples.
pub trait TupleExt {
    fn is_point(&self) -> bool;
    fn is_vector(&self) -> bool;
}

impl TupleExt for Tuple {
    fn is_point(&self) -> bool {
        self.w == 1.0
    }

    fn is_vector(&self) -> bool {
        self.w == 0.0
    }
}
