//! Pre-render checks on the world, camera and configuration.
//!
//! Errors stop a render before any worker starts; warnings are logged and
//! the render proceeds.

use std::f64::consts::PI;
use std::fmt;

use lumen_core::{Light, World};

use crate::camera::Camera;
use crate::config::RenderConfig;

/// Largest anti-aliasing grid edge accepted; the grid costs n² rays a pixel.
pub const MAX_ANTIALIAS_SAMPLES: u32 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Warning => write!(f, "warning: {}", self.message),
            Severity::Error => write!(f, "error: {}", self.message),
        }
    }
}

/// Check everything a render depends on.
pub fn lint(world: &World, camera: &Camera, config: &RenderConfig) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    lint_camera(camera, &mut out);
    lint_config(config, &mut out);
    lint_lights(world, config, &mut out);
    lint_materials(world, &mut out);
    out
}

fn lint_camera(camera: &Camera, out: &mut Vec<Diagnostic>) {
    if camera.hsize() == 0 || camera.vsize() == 0 {
        out.push(Diagnostic::error(format!(
            "camera canvas is {}x{}; both dimensions must be positive",
            camera.hsize(),
            camera.vsize()
        )));
    }

    let fov = camera.field_of_view();
    let fov_ok = fov > 0.0 && fov < PI;
    if !fov_ok {
        out.push(Diagnostic::error(format!(
            "field of view {fov} must lie strictly between 0 and pi radians"
        )));
    }
}

fn lint_config(config: &RenderConfig, out: &mut Vec<Diagnostic>) {
    if config.antialias_samples == 0 {
        out.push(Diagnostic::error("antialias_samples must be at least 1"));
    } else if config.antialias_samples > MAX_ANTIALIAS_SAMPLES {
        out.push(Diagnostic::error(format!(
            "antialias_samples {} exceeds the limit of {MAX_ANTIALIAS_SAMPLES} per axis",
            config.antialias_samples
        )));
    }
    if config.parallelism == 0 {
        out.push(Diagnostic::error("parallelism must be at least 1"));
    }
    if config.bucket_size == 0 {
        out.push(Diagnostic::error("bucket_size must be at least 1"));
    }
    let min_ok = config.min_contribution >= 0.0 && config.min_contribution.is_finite();
    if !min_ok {
        out.push(Diagnostic::error(format!(
            "min_contribution {} must be finite and non-negative",
            config.min_contribution
        )));
    }
    if config.max_depth == 0 {
        out.push(Diagnostic::warning(
            "max_depth is 0; reflection and refraction are disabled",
        ));
    }
}

fn lint_lights(world: &World, config: &RenderConfig, out: &mut Vec<Diagnostic>) {
    if world.lights().is_empty() {
        out.push(Diagnostic::warning(
            "scene has no lights; only ambient and emissive terms will show",
        ));
    }

    let mut has_area = false;
    for (i, light) in world.lights().iter().enumerate() {
        if let Light::Area(area) = light {
            has_area = true;
            if area.samples == 0 {
                out.push(Diagnostic::error(format!("area light {i} has zero samples")));
            }
        }
    }

    if config.soft_shadows && !has_area {
        out.push(Diagnostic::warning(
            "soft_shadows is on but the scene has no area lights",
        ));
    }
}

fn lint_materials(world: &World, out: &mut Vec<Diagnostic>) {
    for (id, shape) in world.shapes().iter() {
        let m = shape.material();
        let name = if m.name.is_empty() {
            format!("shape {}", id.index())
        } else {
            format!("material '{}' on shape {}", m.name, id.index())
        };

        if m.refractive_index.is_nan() || m.refractive_index <= 0.0 {
            out.push(Diagnostic::error(format!(
                "{name} has refractive index {}; it must be positive",
                m.refractive_index
            )));
        }
        if !(0.0..=1.0).contains(&m.reflective) {
            out.push(Diagnostic::warning(format!(
                "{name} has reflective {} outside [0, 1]",
                m.reflective
            )));
        }
        if !(0.0..=1.0).contains(&m.transparency) {
            out.push(Diagnostic::warning(format!(
                "{name} has transparency {} outside [0, 1]",
                m.transparency
            )));
        }
        if m.transparency > 0.0 && m.refractive_index == 1.0 {
            out.push(Diagnostic::warning(format!(
                "{name} is transparent with refractive index 1.0; it will not bend light"
            )));
        }
    }
}
