//! The world: a shape arena, the root objects to render, and the lights.

use lumen_math::{scaling, Aabb, Color, DVec3, Ray};

use crate::arena::{ShapeArena, ShapeId};
use crate::error::SceneResult;
use crate::intersection::{Intersection, Intersections};
use crate::light::Light;
use crate::material::Material;
use crate::shape::{Shape, ShapeKind};

/// A complete scene ready to render.
///
/// Shapes that are members of a group or CSG node are reached through
/// their owner; only root objects are intersected directly.
#[derive(Clone, Debug, Default)]
pub struct World {
    /// Scene name, used in log output
    pub name: String,
    shapes: ShapeArena,
    objects: Vec<ShapeId>,
    lights: Vec<Light>,
}

impl World {
    /// Create an empty world.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The canonical two-sphere world with one white point light.
    pub fn default_scene() -> Self {
        let mut world = Self::new("default");
        world.add_light(Light::point(DVec3::new(-10.0, 10.0, -10.0), Color::ONE));

        let outer = Material::new("outer", Color::new(0.8, 1.0, 0.6))
            .with_diffuse(0.7)
            .with_specular(0.2);
        world.add_object(Shape::sphere().with_material(outer));

        world.add_object(
            Shape::sphere().with_transform_pair(scaling(0.5, 0.5, 0.5), scaling(2.0, 2.0, 2.0)),
        );
        world
    }

    /// Store a shape and render it as a root object.
    pub fn add_object(&mut self, shape: Shape) -> ShapeId {
        let id = self.shapes.insert_root(shape);
        self.objects.push(id);
        id
    }

    /// Render an existing, unparented shape as a root object.
    pub fn add_root(&mut self, id: ShapeId) -> SceneResult<()> {
        self.shapes.mark_root(id)?;
        self.objects.push(id);
        Ok(())
    }

    /// Attach `child` to `group`. A root object cannot become a member.
    pub fn add_child(&mut self, group: ShapeId, child: ShapeId) -> SceneResult<()> {
        self.shapes.add_child(group, child)
    }

    pub fn add_light(&mut self, light: impl Into<Light>) {
        self.lights.push(light.into());
    }

    pub fn shapes(&self) -> &ShapeArena {
        &self.shapes
    }

    /// Mutable access for building groups, CSG and transforms.
    pub fn shapes_mut(&mut self) -> &mut ShapeArena {
        &mut self.shapes
    }

    pub fn objects(&self) -> &[ShapeId] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut Vec<Light> {
        &mut self.lights
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Get total triangle count across all shapes.
    pub fn total_triangle_count(&self) -> usize {
        self.shapes
            .iter()
            .map(|(_, shape)| match shape.kind() {
                ShapeKind::Triangle(_) => 1,
                ShapeKind::Mesh(mesh) => mesh.triangle_count(),
                _ => 0,
            })
            .sum()
    }

    /// All intersections of a world-space ray, sorted by `t`.
    pub fn intersect(&self, ray: &Ray) -> Intersections {
        let mut xs: Vec<Intersection> = Vec::new();
        for &id in &self.objects {
            self.shapes.intersect_into(id, ray, &mut xs);
        }
        Intersections::from_unsorted(xs)
    }

    /// World-space bounding box of every root object.
    pub fn world_bounds(&self) -> Aabb {
        self.objects.iter().fold(Aabb::EMPTY, |acc, &id| {
            Aabb::surrounding(&acc, &self.shapes.world_bounds(id))
        })
    }
}
