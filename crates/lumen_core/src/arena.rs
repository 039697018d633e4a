//! Scene graph storage.
//!
//! Every shape lives in one `ShapeArena` and is referred to by a copyable
//! [`ShapeId`]. Groups and CSG nodes list their members by id, and each
//! member points back at its owner through `Shape::parent`, so walking to
//! the root never needs shared ownership.

use std::ops::Index;

use lumen_math::{Aabb, DMat4, DVec3, Mat4Ext, Ray};

use crate::csg::{self, CsgOp};
use crate::error::{SceneError, SceneResult};
use crate::intersection::{self, Intersection, Intersections};
use crate::material::Material;
use crate::shape::{Shape, ShapeKind};

/// Index of a shape inside a [`ShapeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(usize);

impl ShapeId {
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Owner of every shape in a scene.
#[derive(Debug, Clone, Default)]
pub struct ShapeArena {
    shapes: Vec<Shape>,
}

impl ShapeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a shape and return its id. The shape starts unparented.
    pub fn insert(&mut self, mut shape: Shape) -> ShapeId {
        shape.parent = None;
        shape.root = false;
        self.shapes.push(shape);
        ShapeId(self.shapes.len() - 1)
    }

    /// Store a shape already flagged as a root object.
    pub(crate) fn insert_root(&mut self, shape: Shape) -> ShapeId {
        let id = self.insert(shape);
        self.shapes[id.0].root = true;
        id
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.shapes.iter().enumerate().map(|(i, s)| (ShapeId(i), s))
    }

    fn get_mut(&mut self, id: ShapeId) -> SceneResult<&mut Shape> {
        self.shapes.get_mut(id.0).ok_or(SceneError::UnknownShape(id))
    }

    fn check(&self, id: ShapeId) -> SceneResult<&Shape> {
        self.get(id).ok_or(SceneError::UnknownShape(id))
    }

    /// Fails when `id` is already owned by a group, a CSG node or a world.
    fn check_unowned(&self, id: ShapeId) -> SceneResult<()> {
        let shape = self.check(id)?;
        if shape.parent.is_some() || shape.root {
            return Err(SceneError::AlreadyParented(id));
        }
        Ok(())
    }

    /// Flag `id` as a root object. Roots can never gain a parent.
    pub(crate) fn mark_root(&mut self, id: ShapeId) -> SceneResult<()> {
        self.check_unowned(id)?;
        self.get_mut(id)?.root = true;
        Ok(())
    }

    /// Whether `id` is rendered directly as a root object.
    pub fn is_root(&self, id: ShapeId) -> bool {
        self.get(id).is_some_and(|shape| shape.root)
    }

    /// Attach `child` to `group`.
    ///
    /// The child must not already have a parent, must not be a root object
    /// and must not be the group or one of its ancestors. The group's bounds, and those of every
    /// ancestor, are recomputed.
    pub fn add_child(&mut self, group: ShapeId, child: ShapeId) -> SceneResult<()> {
        if !matches!(self.check(group)?.kind(), ShapeKind::Group { .. }) {
            return Err(SceneError::NotAGroup(group));
        }
        self.check_unowned(child)?;
        if self.includes(child, group) {
            return Err(SceneError::Cycle { group, child });
        }

        if let ShapeKind::Group { children } = self.get_mut(group)?.kind_mut() {
            children.push(child);
        }
        self.get_mut(child)?.parent = Some(group);
        self.refresh_bounds(group);
        Ok(())
    }

    /// Combine two unparented, non-root shapes into a new CSG node.
    pub fn csg(&mut self, op: CsgOp, left: ShapeId, right: ShapeId) -> SceneResult<ShapeId> {
        for id in [left, right] {
            self.check_unowned(id)?;
        }
        if left == right {
            return Err(SceneError::AlreadyParented(right));
        }

        let id = self.insert(Shape::csg(op, left, right));
        self.get_mut(left)?.parent = Some(id);
        self.get_mut(right)?.parent = Some(id);
        self.refresh_bounds(id);
        Ok(id)
    }

    /// Replace a shape's transform and refresh the bounds above it.
    pub fn set_transform(&mut self, id: ShapeId, transform: DMat4) -> SceneResult<()> {
        let shape = self.get_mut(id)?;
        shape.set_transform(transform)?;
        if let Some(parent) = shape.parent {
            self.refresh_bounds(parent);
        }
        Ok(())
    }

    /// Set the material of a shape and of everything below it.
    pub fn set_material(&mut self, id: ShapeId, material: Material) -> SceneResult<()> {
        let shape = self.get_mut(id)?;
        shape.set_material(material.clone());

        let members: Vec<ShapeId> = match shape.kind() {
            ShapeKind::Group { children } => children.clone(),
            ShapeKind::Csg { left, right, .. } => vec![*left, *right],
            _ => Vec::new(),
        };
        for member in members {
            self.set_material(member, material.clone())?;
        }
        Ok(())
    }

    /// Members of a group, or an empty slice for any other kind.
    pub fn children(&self, id: ShapeId) -> &[ShapeId] {
        match self.get(id).map(Shape::kind) {
            Some(ShapeKind::Group { children }) => children,
            _ => &[],
        }
    }

    pub fn parent(&self, id: ShapeId) -> Option<ShapeId> {
        self.get(id).and_then(Shape::parent)
    }

    /// Whether `id` is `ancestor` or lies somewhere below it.
    pub fn includes(&self, ancestor: ShapeId, id: ShapeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.parent(c);
        }
        false
    }

    /// Convert a world-space point into `id`'s object space, applying the
    /// root's inverse first and the shape's own inverse last.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this arena.
    pub fn world_to_object(&self, id: ShapeId, point: DVec3) -> DVec3 {
        let shape = &self[id];
        let point = match shape.parent {
            Some(parent) => self.world_to_object(parent, point),
            None => point,
        };
        shape.inverse().transform_point3(point)
    }

    /// Convert an object-space point back to world space.
    pub fn object_to_world(&self, id: ShapeId, point: DVec3) -> DVec3 {
        let shape = &self[id];
        let point = shape.transform().transform_point3(point);
        match shape.parent {
            Some(parent) => self.object_to_world(parent, point),
            None => point,
        }
    }

    /// Carry an object-space normal up to world space, normalising at each
    /// level.
    pub fn normal_to_world(&self, id: ShapeId, normal: DVec3) -> DVec3 {
        let shape = &self[id];
        let normal = (*shape.normal_matrix() * normal).normalize_or_zero();
        match shape.parent {
            Some(parent) => self.normal_to_world(parent, normal),
            None => normal,
        }
    }

    /// World-space surface normal of `id` at `world_point`, including any
    /// bump perturbation from the shape's material.
    pub fn normal_at(&self, id: ShapeId, world_point: DVec3, hit: &Intersection) -> DVec3 {
        let shape = &self[id];
        let local_point = self.world_to_object(id, world_point);
        let mut local_normal = shape.local_normal_at(local_point, hit);

        if let Some(perturbation) = &shape.material().perturbation {
            local_normal = perturbation.perturb(local_point, local_normal);
        }

        self.normal_to_world(id, local_normal)
    }

    /// All intersections of a ray (in `id`'s parent space) with `id` and
    /// its descendants, sorted by `t`.
    pub fn intersect(&self, id: ShapeId, ray: &Ray) -> Intersections {
        let mut xs = Vec::new();
        self.intersect_into(id, ray, &mut xs);
        Intersections::from_unsorted(xs)
    }

    /// Append unsorted intersections with `id` to `xs`.
    pub fn intersect_into(&self, id: ShapeId, ray: &Ray, xs: &mut Vec<Intersection>) {
        let shape = &self[id];
        let local_ray = ray.transform(shape.inverse());

        match shape.kind() {
            ShapeKind::Group { children } => {
                // Skip every member when the ray misses the group's box
                if !shape.bounds().hit(&local_ray) {
                    return;
                }
                for &child in children {
                    self.intersect_into(child, &local_ray, xs);
                }
            }
            ShapeKind::Csg { op, left, right } => {
                let mut local = Vec::new();
                self.intersect_into(*left, &local_ray, &mut local);
                self.intersect_into(*right, &local_ray, &mut local);
                intersection::sort_by_t(&mut local);
                xs.extend(csg::filter_intersections(self, *op, *left, &local));
            }
            _ => shape.local_intersect(id, &local_ray, xs),
        }
    }

    /// Bounds of `id` in its parent's space.
    pub fn parent_space_bounds(&self, id: ShapeId) -> Aabb {
        self[id].parent_space_bounds()
    }

    /// Bounds of `id` in world space.
    pub fn world_bounds(&self, id: ShapeId) -> Aabb {
        let mut bounds = self[id].parent_space_bounds();
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            bounds = self[ancestor].transform().transform_aabb(&bounds);
            current = self.parent(ancestor);
        }
        bounds
    }

    /// Recompute the bounds of a composite and of every composite above it.
    fn refresh_bounds(&mut self, id: ShapeId) {
        let mut current = Some(id);
        while let Some(c) = current {
            let bounds = match self[c].kind() {
                ShapeKind::Group { children } => children.iter().fold(Aabb::EMPTY, |acc, &m| {
                    Aabb::surrounding(&acc, &self.parent_space_bounds(m))
                }),
                ShapeKind::Csg { left, right, .. } => Aabb::surrounding(
                    &self.parent_space_bounds(*left),
                    &self.parent_space_bounds(*right),
                ),
                _ => self[c].bounds(),
            };
            self.shapes[c.0].bounds = bounds;
            current = self[c].parent;
        }
    }
}

impl Index<ShapeId> for ShapeArena {
    type Output = Shape;

    fn index(&self, id: ShapeId) -> &Shape {
        &self.shapes[id.0]
    }
}
