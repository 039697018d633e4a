//! Surface materials for the Phong model.

use std::sync::Arc;

use lumen_math::{Color, DVec3};

use crate::arena::{ShapeArena, ShapeId};
use crate::intersection::Intersection;
use crate::pattern::Pattern;
use crate::perturb::Perturbation;
use crate::texture::Texture;

/// Phong surface parameters plus reflection and refraction.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Name used in diagnostics
    pub name: String,

    /// Base colour, used when there is no pattern or texture
    pub color: Color,

    /// Procedural colour, overriding `color`
    pub pattern: Option<Pattern>,

    /// Image sampled at mesh/triangle texture coordinates, overriding both
    pub texture: Option<Arc<Texture>>,

    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,

    /// Mirror reflectance (0-1)
    pub reflective: f64,

    /// Transmittance (0-1)
    pub transparency: f64,

    pub refractive_index: f64,

    /// Light emitted regardless of incoming light
    pub emissive: Color,

    /// Whether this surface blocks shadow rays
    pub casts_shadow: bool,

    /// Bump mapping applied to the object-space normal
    pub perturbation: Option<Perturbation>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: Color::ONE,
            pattern: None,
            texture: None,
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
            reflective: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
            emissive: Color::ZERO,
            casts_shadow: true,
            perturbation: None,
        }
    }
}

impl Material {
    /// Create a new material with just a name and colour.
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            ..Default::default()
        }
    }

    /// Clear glass: fully transparent with index 1.5.
    pub fn glass() -> Self {
        Self {
            name: "glass".to_string(),
            transparency: 1.0,
            refractive_index: 1.5,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_ambient(mut self, ambient: f64) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_diffuse(mut self, diffuse: f64) -> Self {
        self.diffuse = diffuse;
        self
    }

    pub fn with_specular(mut self, specular: f64) -> Self {
        self.specular = specular;
        self
    }

    pub fn with_shininess(mut self, shininess: f64) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_reflective(mut self, reflective: f64) -> Self {
        self.reflective = reflective;
        self
    }

    pub fn with_transparency(mut self, transparency: f64, refractive_index: f64) -> Self {
        self.transparency = transparency;
        self.refractive_index = refractive_index;
        self
    }

    pub fn with_emissive(mut self, emissive: Color) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_casts_shadow(mut self, casts_shadow: bool) -> Self {
        self.casts_shadow = casts_shadow;
        self
    }

    pub fn with_perturbation(mut self, perturbation: Perturbation) -> Self {
        self.perturbation = Some(perturbation);
        self
    }

    /// Check if this material emits light.
    pub fn is_emissive(&self) -> bool {
        self.emissive.length_squared() > 0.0
    }

    /// Surface colour of shape `id` at a world-space point.
    ///
    /// A texture wins when the hit carries texture coordinates, then the
    /// pattern, then the flat colour.
    pub fn color_at(
        &self,
        arena: &ShapeArena,
        id: ShapeId,
        world_point: DVec3,
        hit: &Intersection,
    ) -> Color {
        if let Some(texture) = &self.texture {
            if let Some(uv) = arena.get(id).and_then(|shape| shape.texcoord_at(hit)) {
                return texture.sample(uv.x, uv.y);
            }
        }

        match &self.pattern {
            Some(pattern) => pattern.pattern_at_shape(arena, id, world_point),
            None => self.color,
        }
    }
}
