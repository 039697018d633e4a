//! Render settings.
//!
//! Everything here can be loaded from JSON; missing fields take their
//! defaults.

use lumen_math::Color;
use serde::{Deserialize, Serialize};

use crate::error::RenderResult;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum reflection/refraction recursion depth
    pub max_depth: u32,
    /// Anti-aliasing samples per pixel axis (n gives n*n rays per pixel)
    pub antialias_samples: u32,
    /// Sample area lights at many points instead of their centre
    pub soft_shadows: bool,
    /// Worker thread count
    pub parallelism: usize,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
    /// Colour of rays that hit nothing, linear RGB
    pub background: [f64; 3],
    /// Secondary rays whose accumulated weight falls below this are skipped
    pub min_contribution: f64,
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            antialias_samples: 1,
            soft_shadows: false,
            parallelism: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            bucket_size: DEFAULT_BUCKET_SIZE,
            background: [0.0; 3],
            min_contribution: 0.001,
        }
    }
}

impl RenderConfig {
    /// Parse a JSON document.
    pub fn from_json(json: &str) -> RenderResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> RenderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn background(&self) -> Color {
        Color::from_array(self.background)
    }

    /// Set recursion depth.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set anti-aliasing samples per axis.
    pub fn with_antialias(mut self, samples: u32) -> Self {
        self.antialias_samples = samples;
        self
    }

    pub fn with_soft_shadows(mut self, soft: bool) -> Self {
        self.soft_shadows = soft;
        self
    }

    pub fn with_parallelism(mut self, threads: usize) -> Self {
        self.parallelism = threads;
        self
    }

    pub fn with_bucket_size(mut self, size: u32) -> Self {
        self.bucket_size = size;
        self
    }

    /// Set background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color.to_array();
        self
    }

    pub fn with_min_contribution(mut self, min: f64) -> Self {
        self.min_contribution = min;
        self
    }
}
