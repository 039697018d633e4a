//! Constructive solid geometry: which child hits survive an operation.

use crate::arena::{ShapeArena, ShapeId};
use crate::intersection::Intersection;

/// Boolean operation combining a CSG node's left and right children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CsgOp {
    /// Everything inside either child
    Union,
    /// Only the overlap of both children
    Intersect,
    /// The left child with the right carved out
    Difference,
}

/// Whether a hit on one child survives the operation.
///
/// `left_hit` says which child was hit; `in_left`/`in_right` say whether the
/// ray is currently inside each child, before this hit is applied.
pub fn intersection_allowed(op: CsgOp, left_hit: bool, in_left: bool, in_right: bool) -> bool {
    match op {
        CsgOp::Union => (left_hit && !in_right) || (!left_hit && !in_left),
        CsgOp::Intersect => (left_hit && in_right) || (!left_hit && in_left),
        CsgOp::Difference => (left_hit && !in_right) || (!left_hit && in_left),
    }
}

/// Keep the hits that lie on the surface of the combined solid.
///
/// `xs` must be sorted by `t`. Inside-flags start false and toggle after
/// each hit on the matching child.
pub(crate) fn filter_intersections(
    arena: &ShapeArena,
    op: CsgOp,
    left: ShapeId,
    xs: &[Intersection],
) -> Vec<Intersection> {
    let mut in_left = false;
    let mut in_right = false;
    let mut result = Vec::new();

    for i in xs {
        let left_hit = arena.includes(left, i.object);

        if intersection_allowed(op, left_hit, in_left, in_right) {
            result.push(*i);
        }

        if left_hit {
            in_left = !in_left;
        } else {
            in_right = !in_right;
        }
    }

    result
}
