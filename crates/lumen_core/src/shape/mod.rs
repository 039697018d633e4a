//! Geometric primitives and the `Shape` record every arena slot holds.
//!
//! Each kind answers two questions in object space: where does a ray meet
//! it, and what is the surface normal at a point. Everything about world
//! space (transforms, parents, groups) lives in [`crate::arena`].

mod cone;
mod cube;
mod cylinder;
mod plane;
mod sphere;
mod triangle;

pub use triangle::Triangle;

use lumen_math::{Aabb, DMat3, DMat4, DVec2, DVec3, Interval, Mat4Ext, Ray};

use crate::arena::ShapeId;
use crate::csg::CsgOp;
use crate::error::{SceneError, SceneResult};
use crate::intersection::Intersection;
use crate::material::Material;
use crate::mesh::Mesh;

/// The closed set of shape kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Sphere,
    Plane,
    Cube,
    Cylinder { min: f64, max: f64, closed: bool },
    Cone { min: f64, max: f64, closed: bool },
    /// Flat or smooth, depending on whether vertex normals were given
    Triangle(Triangle),
    Mesh(Mesh),
    Group { children: Vec<ShapeId> },
    Csg { op: CsgOp, left: ShapeId, right: ShapeId },
}

impl ShapeKind {
    /// Groups and CSG nodes are never the object of an intersection.
    pub fn is_composite(&self) -> bool {
        matches!(self, ShapeKind::Group { .. } | ShapeKind::Csg { .. })
    }
}

/// A shape plus its transform, material, parent link and object-space
/// bounding box.
#[derive(Debug, Clone)]
pub struct Shape {
    kind: ShapeKind,
    transform: DMat4,
    inverse: DMat4,
    normal_matrix: DMat3,
    material: Material,
    pub(crate) parent: Option<ShapeId>,
    /// Rendered directly by a `World`, so no group or CSG node may own it
    pub(crate) root: bool,
    pub(crate) bounds: Aabb,
}

impl Shape {
    fn new(kind: ShapeKind) -> Self {
        let bounds = primitive_bounds(&kind);
        Self {
            kind,
            transform: DMat4::IDENTITY,
            inverse: DMat4::IDENTITY,
            normal_matrix: DMat3::IDENTITY,
            material: Material::default(),
            parent: None,
            root: false,
            bounds,
        }
    }

    pub fn sphere() -> Self {
        Self::new(ShapeKind::Sphere)
    }

    /// A sphere with the glass material.
    pub fn glass_sphere() -> Self {
        Self::sphere().with_material(Material::glass())
    }

    /// The xz plane.
    pub fn plane() -> Self {
        Self::new(ShapeKind::Plane)
    }

    /// Axis-aligned cube from -1 to 1.
    pub fn cube() -> Self {
        Self::new(ShapeKind::Cube)
    }

    /// Radius-1 cylinder along y, truncated to `(min, max)`.
    pub fn cylinder(min: f64, max: f64, closed: bool) -> SceneResult<Self> {
        check_extent(min, max)?;
        Ok(Self::new(ShapeKind::Cylinder { min, max, closed }))
    }

    /// Double-napped cone along y, truncated to `(min, max)`.
    pub fn cone(min: f64, max: f64, closed: bool) -> SceneResult<Self> {
        check_extent(min, max)?;
        Ok(Self::new(ShapeKind::Cone { min, max, closed }))
    }

    /// Infinite open cylinder.
    pub fn infinite_cylinder() -> Self {
        Self::new(ShapeKind::Cylinder {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            closed: false,
        })
    }

    /// Infinite open double cone.
    pub fn infinite_cone() -> Self {
        Self::new(ShapeKind::Cone {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            closed: false,
        })
    }

    pub fn triangle(p1: DVec3, p2: DVec3, p3: DVec3) -> Self {
        Self::new(ShapeKind::Triangle(Triangle::new(p1, p2, p3)))
    }

    pub fn smooth_triangle(
        p1: DVec3,
        p2: DVec3,
        p3: DVec3,
        n1: DVec3,
        n2: DVec3,
        n3: DVec3,
    ) -> Self {
        Self::new(ShapeKind::Triangle(Triangle::smooth(p1, p2, p3, n1, n2, n3)))
    }

    pub fn mesh(mesh: Mesh) -> Self {
        Self::new(ShapeKind::Mesh(mesh))
    }

    /// An empty group. Children are attached through the arena.
    pub fn group() -> Self {
        Self::new(ShapeKind::Group {
            children: Vec::new(),
        })
    }

    pub(crate) fn csg(op: CsgOp, left: ShapeId, right: ShapeId) -> Self {
        Self::new(ShapeKind::Csg { op, left, right })
    }

    /// Set the transform, caching its inverse and normal matrix.
    ///
    /// Fails with [`SceneError::NonInvertible`] for singular matrices.
    pub fn with_transform(mut self, transform: DMat4) -> SceneResult<Self> {
        self.set_transform(transform)?;
        Ok(self)
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub(crate) fn set_transform(&mut self, transform: DMat4) -> SceneResult<()> {
        let inverse = transform.try_inverse().ok_or(SceneError::NonInvertible)?;
        self.set_transform_pair(transform, inverse);
        Ok(())
    }

    /// Install a transform whose inverse the caller already knows.
    pub(crate) fn with_transform_pair(mut self, transform: DMat4, inverse: DMat4) -> Self {
        self.set_transform_pair(transform, inverse);
        self
    }

    fn set_transform_pair(&mut self, transform: DMat4, inverse: DMat4) {
        self.transform = transform;
        self.inverse = inverse;
        self.normal_matrix = DMat3::from_mat4(inverse).transpose();
    }

    pub(crate) fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    pub(crate) fn kind_mut(&mut self) -> &mut ShapeKind {
        &mut self.kind
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn transform(&self) -> &DMat4 {
        &self.transform
    }

    pub fn inverse(&self) -> &DMat4 {
        &self.inverse
    }

    /// Transpose of the inverse's upper 3x3.
    pub fn normal_matrix(&self) -> &DMat3 {
        &self.normal_matrix
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn parent(&self) -> Option<ShapeId> {
        self.parent
    }

    /// Object-space bounding box.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Bounding box in the parent's space.
    pub fn parent_space_bounds(&self) -> Aabb {
        self.transform.transform_aabb(&self.bounds)
    }

    /// Intersect an object-space ray with a primitive. Composite kinds are
    /// handled by the arena and contribute nothing here.
    pub(crate) fn local_intersect(&self, id: ShapeId, ray: &Ray, xs: &mut Vec<Intersection>) {
        match &self.kind {
            ShapeKind::Sphere => sphere::intersect(id, ray, xs),
            ShapeKind::Plane => plane::intersect(id, ray, xs),
            ShapeKind::Cube => cube::intersect(id, ray, xs),
            ShapeKind::Cylinder { min, max, closed } => {
                cylinder::intersect(id, ray, *min, *max, *closed, xs)
            }
            ShapeKind::Cone { min, max, closed } => cone::intersect(id, ray, *min, *max, *closed, xs),
            ShapeKind::Triangle(triangle) => {
                if let Some((t, u, v)) = triangle.intersect(ray) {
                    xs.push(Intersection::with_uv(t, id, u, v));
                }
            }
            ShapeKind::Mesh(mesh) => mesh.intersect(id, ray, xs),
            ShapeKind::Group { .. } | ShapeKind::Csg { .. } => {}
        }
    }

    /// Object-space normal at `p`. The hit supplies barycentric coordinates
    /// and the mesh face for triangle kinds.
    pub fn local_normal_at(&self, p: DVec3, hit: &Intersection) -> DVec3 {
        match &self.kind {
            ShapeKind::Sphere => sphere::normal_at(p),
            ShapeKind::Plane => plane::normal_at(p),
            ShapeKind::Cube => cube::normal_at(p),
            ShapeKind::Cylinder { min, max, .. } => cylinder::normal_at(p, *min, *max),
            ShapeKind::Cone { min, max, .. } => cone::normal_at(p, *min, *max),
            ShapeKind::Triangle(triangle) => triangle.normal_at(hit.uv),
            ShapeKind::Mesh(mesh) => mesh.normal_at(hit.face, hit.uv),
            ShapeKind::Group { .. } | ShapeKind::Csg { .. } => DVec3::ZERO,
        }
    }

    /// Surface texture coordinate at a hit, for triangles and mesh faces
    /// that carry them.
    pub fn texcoord_at(&self, hit: &Intersection) -> Option<DVec2> {
        let (u, v) = hit.uv?;
        match &self.kind {
            ShapeKind::Triangle(triangle) => triangle.texcoord_at(u, v),
            ShapeKind::Mesh(mesh) => mesh.texcoord_at(hit.face?, u, v),
            _ => None,
        }
    }
}

fn check_extent(min: f64, max: f64) -> SceneResult<()> {
    if min > max || min.is_nan() || max.is_nan() {
        return Err(SceneError::InvalidBounds { min, max });
    }
    Ok(())
}

/// Object-space bounds of a primitive. Composite kinds start empty and are
/// grown by the arena as members are attached.
fn primitive_bounds(kind: &ShapeKind) -> Aabb {
    let unit = Interval::new(-1.0, 1.0);
    match kind {
        ShapeKind::Sphere | ShapeKind::Cube => Aabb::new(unit, unit, unit),
        ShapeKind::Plane => Aabb::new(Interval::UNIVERSE, Interval::new(0.0, 0.0), Interval::UNIVERSE),
        ShapeKind::Cylinder { min, max, .. } => Aabb::new(unit, Interval::new(*min, *max), unit),
        ShapeKind::Cone { min, max, .. } => {
            let r = min.abs().max(max.abs());
            let radius = Interval::new(-r, r);
            Aabb::new(radius, Interval::new(*min, *max), radius)
        }
        ShapeKind::Triangle(triangle) => triangle.bounds(),
        ShapeKind::Mesh(mesh) => mesh.bounds(),
        ShapeKind::Group { .. } | ShapeKind::Csg { .. } => Aabb::EMPTY,
    }
}
