//! Per-render ray counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Ray counts for one render, shared by every worker.
#[derive(Debug, Default)]
pub struct RayCounter {
    camera: AtomicU64,
    shadow: AtomicU64,
    reflection: AtomicU64,
    refraction: AtomicU64,
}

impl RayCounter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn camera_ray(&self) {
        self.camera.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn shadow_ray(&self) {
        self.shadow.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn reflection_ray(&self) {
        self.reflection.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn refraction_ray(&self) {
        self.refraction.fetch_add(1, Ordering::Relaxed);
    }

    /// Freeze the counts into a report.
    pub fn snapshot(&self, elapsed: Duration, buckets: usize, threads: usize) -> RenderStats {
        RenderStats {
            camera_rays: self.camera.load(Ordering::Relaxed),
            shadow_rays: self.shadow.load(Ordering::Relaxed),
            reflection_rays: self.reflection.load(Ordering::Relaxed),
            refraction_rays: self.refraction.load(Ordering::Relaxed),
            elapsed,
            buckets,
            threads,
        }
    }
}

/// Summary of a finished render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub camera_rays: u64,
    pub shadow_rays: u64,
    pub reflection_rays: u64,
    pub refraction_rays: u64,
    pub elapsed: Duration,
    pub buckets: usize,
    pub threads: usize,
}

impl RenderStats {
    pub fn total_rays(&self) -> u64 {
        self.camera_rays + self.shadow_rays + self.reflection_rays + self.refraction_rays
    }
}
