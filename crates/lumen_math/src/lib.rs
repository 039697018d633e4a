// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod aabb;
mod interval;
mod matrix;
mod ray;
mod tuple;

pub use aabb::{check_axis, Aabb};
pub use interval::Interval;
pub use matrix::{
    rotation_x, rotation_y, rotation_z, scaling, shearing, translation, view_transform, Mat4Ext,
};
pub use ray::Ray;
pub use tuple::{approx_eq, point, reflect, vector, Tuple, TupleExt, EPSILON};

/// RGB color with components nominally in [0, 1].
pub type Color = DVec3;
