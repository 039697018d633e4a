//! Errors raised while building a scene.
//!
//! Only construction can fail. Intersection and shading treat degenerate
//! math as "no intersection" and never return these.

use thiserror::Error;

use crate::arena::ShapeId;
use crate::texture::TextureError;

/// Errors that can occur while authoring a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Transform is not invertible")]
    NonInvertible,

    #[error("Invalid bounds: minimum {min} exceeds maximum {max}")]
    InvalidBounds { min: f64, max: f64 },

    #[error("Shape {0:?} is not a group")]
    NotAGroup(ShapeId),

    #[error("Shape {0:?} already has a parent")]
    AlreadyParented(ShapeId),

    #[error("Adding {child:?} to {group:?} would create a cycle")]
    Cycle { group: ShapeId, child: ShapeId },

    #[error("Unknown shape {0:?}")]
    UnknownShape(ShapeId),

    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("Invalid light: {0}")]
    InvalidLight(String),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),
}

pub type SceneResult<T> = Result<T, SceneError>;
