//! Render entry points.
//!
//! Every render lints its inputs first, then traces buckets in parallel on
//! a dedicated rayon pool, writing into a shared [`Canvas`].

use std::path::Path;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use lumen_core::World;
use lumen_math::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket};
use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::lint::{lint, Diagnostic};
use crate::shading::Shader;
use crate::stats::{RayCounter, RenderStats};

/// Seed for the RNG of pixel (x, y), so soft shadows come out the same on
/// every run regardless of which thread draws the pixel.
fn pixel_seed(x: u32, y: u32) -> u64 {
    (((y as u64) << 32) | x as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Render a single pixel, averaging `antialias_samples²` stratified rays.
pub fn render_pixel(
    world: &World,
    camera: &Camera,
    config: &RenderConfig,
    counter: &RayCounter,
    x: u32,
    y: u32,
) -> Color {
    let n = config.antialias_samples.max(1);
    let mut rng = StdRng::seed_from_u64(pixel_seed(x, y));
    let shader = Shader::new(world, config, counter);

    let mut pixel_color = Color::ZERO;
    for sy in 0..n {
        for sx in 0..n {
            let ox = (sx as f64 + 0.5) / n as f64;
            let oy = (sy as f64 + 0.5) / n as f64;
            let ray = camera.ray_for_subpixel(x, y, ox, oy);
            counter.camera_ray();
            pixel_color += shader.color_at(&ray, config.max_depth, 1.0, &mut rng);
        }
    }

    let per_axis = f64::from(n);
    pixel_color / (per_axis * per_axis)
}

/// Check the inputs, logging warnings and failing on errors.
fn validate(world: &World, camera: &Camera, config: &RenderConfig) -> RenderResult<()> {
    let (errors, warnings): (Vec<Diagnostic>, Vec<Diagnostic>) =
        lint(world, camera, config).into_iter().partition(Diagnostic::is_error);

    for warning in &warnings {
        log::warn!("{warning}");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(RenderError::InvalidConfig(errors))
    }
}

/// Render into an existing canvas, which must match the camera size.
///
/// Pixels become visible in the canvas as soon as their bucket writes
/// them, so another thread may read it while this runs.
pub fn render_to_canvas(
    world: &World,
    camera: &Camera,
    config: &RenderConfig,
    canvas: &Canvas,
) -> RenderResult<RenderStats> {
    validate(world, camera, config)?;

    if canvas.width() != camera.hsize() || canvas.height() != camera.vsize() {
        return Err(RenderError::InvalidConfig(vec![Diagnostic::error(format!(
            "canvas is {}x{} but the camera renders {}x{}",
            canvas.width(),
            canvas.height(),
            camera.hsize(),
            camera.vsize()
        ))]));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.parallelism)
        .thread_name(|i| format!("lumen-render-{i}"))
        .build()?;
    log::debug!("Built render pool with {} threads", pool.current_num_threads());

    let buckets = generate_buckets(camera.hsize(), camera.vsize(), config.bucket_size);
    log::info!(
        "Rendering '{}' at {}x{}: {} buckets on {} threads",
        world.name,
        camera.hsize(),
        camera.vsize(),
        buckets.len(),
        config.parallelism
    );

    let counter = RayCounter::new();
    let start = Instant::now();

    pool.install(|| {
        buckets.par_iter().for_each(|bucket| {
            render_bucket(bucket, world, camera, config, &counter, canvas);
        });
    });

    let stats = counter.snapshot(start.elapsed(), buckets.len(), config.parallelism);
    log::info!(
        "Finished '{}' in {:.2?}: {} rays ({} camera, {} shadow, {} reflection, {} refraction)",
        world.name,
        stats.elapsed,
        stats.total_rays(),
        stats.camera_rays,
        stats.shadow_rays,
        stats.reflection_rays,
        stats.refraction_rays
    );

    Ok(stats)
}

/// Render the whole image into a new canvas.
pub fn render(
    world: &World,
    camera: &Camera,
    config: &RenderConfig,
) -> RenderResult<(Canvas, RenderStats)> {
    let canvas = Canvas::new(camera.hsize(), camera.vsize());
    let stats = render_to_canvas(world, camera, config, &canvas)?;
    Ok((canvas, stats))
}

/// Render and encode straight to an image file.
pub fn render_to_file(
    world: &World,
    camera: &Camera,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> RenderResult<RenderStats> {
    let (canvas, stats) = render(world, camera, config)?;
    canvas.save_png(path)?;
    Ok(stats)
}

/// A render running on a background thread.
#[derive(Debug)]
pub struct LiveRender {
    canvas: Arc<Canvas>,
    handle: JoinHandle<RenderResult<RenderStats>>,
}

impl LiveRender {
    /// The canvas being filled; poll it for progressive display.
    pub fn canvas(&self) -> &Arc<Canvas> {
        &self.canvas
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the render to finish.
    pub fn join(self) -> RenderResult<RenderStats> {
        self.handle.join().map_err(|_| RenderError::WorkerPanicked)?
    }
}

/// Start a render in the background and return immediately.
///
/// Configuration errors are reported here, before any thread starts.
pub fn render_live(
    world: Arc<World>,
    camera: Camera,
    config: RenderConfig,
) -> RenderResult<LiveRender> {
    validate(&world, &camera, &config)?;

    let canvas = Arc::new(Canvas::new(camera.hsize(), camera.vsize()));
    let target = Arc::clone(&canvas);
    let handle = std::thread::Builder::new()
        .name("lumen-live".to_string())
        .spawn(move || render_to_canvas(&world, &camera, &config, &target))?;

    Ok(LiveRender { canvas, handle })
}
