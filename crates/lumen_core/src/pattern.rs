//! Procedural colour patterns.
//!
//! A pattern has its own transform, applied after the shape's: world point
//! to object space through the arena, then object to pattern space through
//! the pattern's cached inverse.

use lumen_math::{Color, DMat4, DVec3, Mat4Ext};

use crate::arena::{ShapeArena, ShapeId};
use crate::error::{SceneError, SceneResult};
use crate::uv::{cube_face, cube_uv, UvMapping, UvPattern};

#[derive(Debug, Clone, PartialEq)]
pub enum PatternKind {
    Solid(Color),
    /// Alternates along x every unit
    Stripe(Color, Color),
    /// Linear blend along x, repeating every unit
    Gradient(Color, Color),
    /// Concentric rings in xz
    Ring(Color, Color),
    /// 3D checkerboard
    Checkers(Color, Color),
    /// Average of two patterns, each with its own transform
    Blend(Box<Pattern>, Box<Pattern>),
    /// A UV pattern projected through a mapping
    TextureMap { pattern: UvPattern, mapping: UvMapping },
    /// One UV pattern per cube face, ordered left, front, right, back, up, down
    CubeMap(Box<[UvPattern; 6]>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    kind: PatternKind,
    transform: DMat4,
    inverse: DMat4,
}

impl Pattern {
    pub fn new(kind: PatternKind) -> Self {
        Self {
            kind,
            transform: DMat4::IDENTITY,
            inverse: DMat4::IDENTITY,
        }
    }

    pub fn solid(color: Color) -> Self {
        Self::new(PatternKind::Solid(color))
    }

    pub fn stripe(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Stripe(a, b))
    }

    pub fn gradient(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Gradient(a, b))
    }

    pub fn ring(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Ring(a, b))
    }

    pub fn checkers(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Checkers(a, b))
    }

    pub fn blend(a: Pattern, b: Pattern) -> Self {
        Self::new(PatternKind::Blend(Box::new(a), Box::new(b)))
    }

    pub fn texture_map(pattern: UvPattern, mapping: UvMapping) -> Self {
        Self::new(PatternKind::TextureMap { pattern, mapping })
    }

    pub fn cube_map(faces: [UvPattern; 6]) -> Self {
        Self::new(PatternKind::CubeMap(Box::new(faces)))
    }

    pub fn with_transform(mut self, transform: DMat4) -> SceneResult<Self> {
        self.inverse = transform.try_inverse().ok_or(SceneError::NonInvertible)?;
        self.transform = transform;
        Ok(self)
    }

    pub fn kind(&self) -> &PatternKind {
        &self.kind
    }

    pub fn transform(&self) -> &DMat4 {
        &self.transform
    }

    /// Colour at a point already in pattern space.
    pub fn pattern_at(&self, p: DVec3) -> Color {
        match &self.kind {
            PatternKind::Solid(c) => *c,
            PatternKind::Stripe(a, b) => {
                if p.x.floor().rem_euclid(2.0) == 0.0 {
                    *a
                } else {
                    *b
                }
            }
            PatternKind::Gradient(a, b) => *a + (*b - *a) * (p.x - p.x.floor()),
            PatternKind::Ring(a, b) => {
                if (p.x * p.x + p.z * p.z).sqrt().floor().rem_euclid(2.0) == 0.0 {
                    *a
                } else {
                    *b
                }
            }
            PatternKind::Checkers(a, b) => {
                let sum = p.x.floor() + p.y.floor() + p.z.floor();
                if sum.rem_euclid(2.0) == 0.0 {
                    *a
                } else {
                    *b
                }
            }
            PatternKind::Blend(a, b) => (a.sub_pattern_at(p) + b.sub_pattern_at(p)) * 0.5,
            PatternKind::TextureMap { pattern, mapping } => pattern.color_at(mapping.map(p)),
            PatternKind::CubeMap(faces) => {
                let face = cube_face(p);
                faces[face.index()].color_at(cube_uv(face, p))
            }
        }
    }

    /// Colour of a nested pattern, applying its own transform first.
    fn sub_pattern_at(&self, p: DVec3) -> Color {
        self.pattern_at(self.inverse.transform_point3(p))
    }

    /// Colour on shape `id` at a world-space point.
    pub fn pattern_at_shape(&self, arena: &ShapeArena, id: ShapeId, world_point: DVec3) -> Color {
        let object_point = arena.world_to_object(id, world_point);
        self.sub_pattern_at(object_point)
    }
}
