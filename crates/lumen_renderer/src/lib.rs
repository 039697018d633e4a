//! Lumen Renderer - CPU Whitted ray tracing
//!
//! Turns a [`lumen_core::World`] and a [`Camera`] into pixels:
//! - Phong shading with hard or soft shadows
//! - Recursive reflection and refraction with Fresnel blending
//! - Stratified anti-aliasing
//! - Bucketed parallel rendering on a rayon pool, with live preview
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::World;
//! use lumen_renderer::{render_to_file, Camera, RenderConfig};
//!
//! let world = World::default_scene();
//! let camera = Camera::new(320, 240, std::f64::consts::FRAC_PI_3);
//! render_to_file(&world, &camera, &RenderConfig::default(), "out.png")?;
//! ```

pub mod bucket;
pub mod camera;
pub mod canvas;
pub mod config;
pub mod error;
pub mod lint;
pub mod renderer;
pub mod shading;
pub mod stats;

pub use bucket::{generate_buckets, render_bucket, Bucket};
pub use camera::Camera;
pub use canvas::{color_to_rgba, Canvas};
pub use config::{RenderConfig, DEFAULT_BUCKET_SIZE};
pub use error::{RenderError, RenderResult};
pub use lint::{lint, Diagnostic, Severity, MAX_ANTIALIAS_SAMPLES};
pub use renderer::{render, render_live, render_pixel, render_to_canvas, render_to_file, LiveRender};
pub use shading::{lighting, prepare_computations, schlick, Computations, Shader};
pub use stats::{RayCounter, RenderStats};

/// Re-export the math types renderer users need
pub use lumen_math::{Color, DVec3};
