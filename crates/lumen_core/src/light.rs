//! Light sources.

use lumen_math::{Aabb, Color, DVec3};
use rand::Rng;

use crate::arena::{ShapeArena, ShapeId};
use crate::error::{SceneError, SceneResult};

/// A light with no extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: DVec3,
    pub intensity: Color,
}

/// A box-shaped light that produces soft shadows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaLight {
    pub bounds: Aabb,
    pub intensity: Color,
    /// Shadow rays cast per shading point when soft shadows are on
    pub samples: u32,
}

impl AreaLight {
    /// An area light filling the world-space bounding box of a shape.
    pub fn from_shape(
        arena: &ShapeArena,
        id: ShapeId,
        intensity: Color,
        samples: u32,
    ) -> SceneResult<Self> {
        if arena.get(id).is_none() {
            return Err(SceneError::UnknownShape(id));
        }

        let bounds = arena.world_bounds(id);
        if bounds.is_empty() || !bounds.is_finite() {
            return Err(SceneError::InvalidLight(format!(
                "shape {id:?} has no finite bounding box"
            )));
        }

        Ok(Self {
            bounds,
            intensity,
            samples,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Point(PointLight),
    Area(AreaLight),
}

impl Light {
    pub fn point(position: DVec3, intensity: Color) -> Self {
        Light::Point(PointLight {
            position,
            intensity,
        })
    }

    pub fn intensity(&self) -> Color {
        match self {
            Light::Point(l) => l.intensity,
            Light::Area(l) => l.intensity,
        }
    }

    /// Representative position: the point itself, or the box centre.
    pub fn position(&self) -> DVec3 {
        match self {
            Light::Point(l) => l.position,
            Light::Area(l) => l.bounds.centroid(),
        }
    }

    /// Points to shade and shadow-test against.
    ///
    /// Point lights, and area lights with soft shadows off, give their
    /// single position. Soft area lights give `samples` uniform points
    /// inside the box.
    pub fn sample_positions<R: Rng>(&self, soft: bool, rng: &mut R) -> Vec<DVec3> {
        match self {
            Light::Area(area) if soft => {
                let (lo, hi) = (area.bounds.min_point(), area.bounds.max_point());
                (0..area.samples)
                    .map(|_| {
                        DVec3::new(
                            lo.x + rng.gen::<f64>() * (hi.x - lo.x),
                            lo.y + rng.gen::<f64>() * (hi.y - lo.y),
                            lo.z + rng.gen::<f64>() * (hi.z - lo.z),
                        )
                    })
                    .collect()
            }
            _ => vec![self.position()],
        }
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<AreaLight> for Light {
    fn from(light: AreaLight) -> Self {
        Light::Area(light)
    }
}
