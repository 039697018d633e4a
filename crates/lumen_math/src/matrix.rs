// Matrix utilities for DMat4
//
// Extends glam::DMat4 with the cofactor machinery and transform builders the
// tracer needs. Multiplication, transposition and transform_point3 /
// transform_vector3 come straight from glam.

use crate::Aabb;
use glam::{DMat3, DMat4, DVec3, DVec4};

/// Extension trait for DMat4 to provide cofactor expansion and ray tracing utilities
pub trait Mat4Ext {
    /// Element at (row, col). glam stores columns, this reads like the math.
    fn at(&self, row: usize, col: usize) -> f64;

    /// The 3x3 matrix left after removing `row` and `col`.
    fn submatrix(&self, row: usize, col: usize) -> DMat3;

    /// Determinant of the submatrix at (row, col).
    fn minor(&self, row: usize, col: usize) -> f64;

    /// Minor with the sign flipped when row + col is odd.
    fn cofactor(&self, row: usize, col: usize) -> f64;

    /// Determinant by Laplace expansion along the first row.
    fn cofactor_determinant(&self) -> f64;

    /// Inverse computed from the cofactor matrix, or `None` if singular.
    fn try_inverse(&self) -> Option<DMat4>;

    /// Matrix that carries object-space normals to the parent space:
    /// the transpose of the inverse's upper 3x3. `None` if singular.
    fn normal_matrix(&self) -> Option<DMat3>;

    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl Mat4Ext for DMat4 {
    #[inline]
    fn at(&self, row: usize, col: usize) -> f64 {
        self.col(col)[row]
    }

    fn submatrix(&self, row: usize, col: usize) -> DMat3 {
        let mut rows = [[0.0; 3]; 3];
        let mut r_out = 0;
        for r in (0..4).filter(|&r| r != row) {
            let mut c_out = 0;
            for c in (0..4).filter(|&c| c != col) {
                rows[r_out][c_out] = self.at(r, c);
                c_out += 1;
            }
            r_out += 1;
        }
        // from_cols_array_2d reads columns, so transpose the row layout
        DMat3::from_cols_array_2d(&rows).transpose()
    }

    fn minor(&self, row: usize, col: usize) -> f64 {
        self.submatrix(row, col).determinant()
    }

    fn cofactor(&self, row: usize, col: usize) -> f64 {
        let minor = self.minor(row, col);
        if (row + col) % 2 == 1 {
            -minor
        } else {
            minor
        }
    }

    fn cofactor_determinant(&self) -> f64 {
        (0..4).map(|col| self.at(0, col) * self.cofactor(0, col)).sum()
    }

    fn try_inverse(&self) -> Option<DMat4> {
        let det = self.cofactor_determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }

        // Element (r, c) of the inverse is cofactor(c, r) / det, and glam
        // wants cols[c][r], which is cofactor(c, r) / det directly.
        let mut cols = [[0.0; 4]; 4];
        for (c, col) in cols.iter_mut().enumerate() {
            for (r, value) in col.iter_mut().enumerate() {
                *value = self.cofactor(c, r) / det;
            }
        }
        Some(DMat4::from_cols_array_2d(&cols))
    }

    fn normal_matrix(&self) -> Option<DMat3> {
        self.try_inverse()
            .map(|inverse| DMat3::from_mat4(inverse).transpose())
    }

    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        if aabb.is_empty() {
            return Aabb::EMPTY;
        }
        // Infinite extents times zero matrix entries would produce NaN
        if !aabb.is_finite() {
            return Aabb::UNIVERSE;
        }

        let corners = aabb.corners();
        let mut result_min = self.transform_point3(corners[0]);
        let mut result_max = result_min;

        for &corner in &corners[1..] {
            let transformed = self.transform_point3(corner);
            result_min = result_min.min(transformed);
            result_max = result_max.max(transformed);
        }

        Aabb::from_points(result_min, result_max)
    }
}

/// Translation by (x, y, z).
pub fn translation(x: f64, y: f64, z: f64) -> DMat4 {
    DMat4::from_translation(DVec3::new(x, y, z))
}

/// Non-uniform scale by (x, y, z).
pub fn scaling(x: f64, y: f64, z: f64) -> DMat4 {
    DMat4::from_scale(DVec3::new(x, y, z))
}

/// Rotation around the x axis (radians, right handed).
pub fn rotation_x(radians: f64) -> DMat4 {
    DMat4::from_rotation_x(radians)
}

/// Rotation around the y axis (radians, right handed).
pub fn rotation_y(radians: f64) -> DMat4 {
    DMat4::from_rotation_y(radians)
}

/// Rotation around the z axis (radians, right handed).
pub fn rotation_z(radians: f64) -> DMat4 {
    DMat4::from_rotation_z(radians)
}

/// Shear: each component moves in proportion to the other two.
/// `xy` is "x moved in proportion to y", and so on.
pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> DMat4 {
    DMat4::from_cols(
        DVec4::new(1.0, yx, zx, 0.0),
        DVec4::new(xy, 1.0, zy, 0.0),
        DVec4::new(xz, yz, 1.0, 0.0),
        DVec4::W,
    )
}

/// World-to-eye transform for an eye at `from` looking at `to`.
///
/// Builds the orthonormal basis (left, true up, -forward) and composes it
/// with a translation that moves the eye to the origin. When `up` is
/// parallel to the view direction the result is singular.
pub fn view_transform(from: DVec3, to: DVec3, up: DVec3) -> DMat4 {
    let forward = (to - from).normalize();
    let left = forward.cross(up.normalize());
    let true_up = left.cross(forward);

    let orientation = DMat4::from_cols(
        DVec4::new(left.x, true_up.x, -forward.x, 0.0),
        DVec4::new(left.y, true_up.y, -forward.y, 0.0),
        DVec4::new(left.z, true_up.z, -forward.z, 0.0),
        DVec4::W,
    );

    orientation * DMat4::from_translation(-from)
}
