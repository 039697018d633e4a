//! Lumen Core - Scene description for the Lumen ray tracer.
//!
//! This crate provides:
//!
//! - **Shapes**: spheres, planes, cubes, cylinders, cones, triangles and meshes
//! - **Scene graph**: `ShapeArena` with groups, CSG and parent-aware space conversion
//! - **Appearance**: Phong materials, patterns, UV mapping, textures, bump mapping
//! - **Lights** and the `World` that ties everything together
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{Light, Shape, World};
//! use lumen_math::{translation, Color, DVec3};
//!
//! let mut world = World::new("example");
//! world.add_light(Light::point(DVec3::new(-10.0, 10.0, -10.0), Color::ONE));
//! world.add_object(Shape::sphere().with_transform(translation(0.0, 1.0, 0.0))?);
//! ```

pub mod arena;
pub mod csg;
pub mod error;
pub mod intersection;
pub mod light;
pub mod material;
pub mod mesh;
pub mod noise;
pub mod pattern;
pub mod perturb;
pub mod shape;
pub mod texture;
pub mod uv;
pub mod world;

// Re-export commonly used types
pub use arena::{ShapeArena, ShapeId};
pub use csg::{intersection_allowed, CsgOp};
pub use error::{SceneError, SceneResult};
pub use intersection::{Intersection, Intersections};
pub use light::{AreaLight, Light, PointLight};
pub use material::Material;
pub use mesh::{Face, FaceVertex, Mesh};
pub use pattern::{Pattern, PatternKind};
pub use perturb::Perturbation;
pub use shape::{Shape, ShapeKind, Triangle};
pub use texture::{Texture, TextureError, TextureResult};
pub use uv::{cube_face, cube_uv, CubeFace, UvMapping, UvPattern};
pub use world::World;
