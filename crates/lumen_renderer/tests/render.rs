//! End-to-end renders through the public API.

use std::f64::consts::FRAC_PI_3;
use std::sync::Arc;

use lumen_core::{AreaLight, CsgOp, Light, Material, Shape, World};
use lumen_math::{scaling, translation, Color, DVec3};
use lumen_renderer::{render, render_live, Camera, RenderConfig, RenderError, Severity};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn camera(width: u32, height: u32) -> Camera {
    Camera::new(width, height, FRAC_PI_3)
        .with_position(DVec3::new(0.0, 1.5, -5.0), DVec3::new(0.0, 0.5, 0.0), DVec3::Y)
        .unwrap()
}

/// Reflection, refraction, CSG and soft shadows in one frame.
fn busy_world() -> World {
    let mut world = World::new("busy");
    world.add_object(
        Shape::plane().with_material(Material::new("floor", Color::splat(0.8)).with_reflective(0.3)),
    );
    world.add_object(
        Shape::glass_sphere()
            .with_transform(translation(0.0, 1.0, 0.0))
            .unwrap()
            .with_material(Material::glass().with_reflective(0.5)),
    );

    let shapes = world.shapes_mut();
    let a = shapes.insert(Shape::cube());
    let b = shapes.insert(Shape::sphere().with_transform(scaling(1.3, 1.3, 1.3)).unwrap());
    let rounded = shapes.csg(CsgOp::Intersect, a, b).unwrap();
    shapes
        .set_transform(rounded, translation(-2.0, 1.0, 1.0) * scaling(0.7, 0.7, 0.7))
        .unwrap();
    world.add_root(rounded).unwrap();

    let panel = world.shapes_mut().insert(
        Shape::cube()
            .with_transform(translation(-3.0, 6.0, -3.0) * scaling(0.5, 0.05, 0.5))
            .unwrap(),
    );
    let light = AreaLight::from_shape(world.shapes(), panel, Color::ONE, 4).unwrap();
    world.add_light(light);
    world
}

fn config() -> RenderConfig {
    RenderConfig::default()
        .with_max_depth(4)
        .with_antialias(2)
        .with_soft_shadows(true)
        .with_bucket_size(8)
}

#[test]
fn test_render_is_idempotent() {
    init_logging();
    let world = busy_world();
    let camera = camera(40, 30);

    let (first, _) = render(&world, &camera, &config()).unwrap();
    let (second, _) = render(&world, &camera, &config()).unwrap();
    assert_eq!(first.pixels(), second.pixels());
}

#[test]
fn test_output_independent_of_thread_count() {
    init_logging();
    let world = busy_world();
    let camera = camera(40, 30);

    let (single, single_stats) = render(&world, &camera, &config().with_parallelism(1)).unwrap();
    let (many, many_stats) = render(&world, &camera, &config().with_parallelism(4)).unwrap();

    assert_eq!(single.pixels(), many.pixels());
    assert_eq!(single_stats.total_rays(), many_stats.total_rays());
    assert_eq!(many_stats.threads, 4);
}

#[test]
fn test_output_independent_of_bucket_size() {
    let world = busy_world();
    let camera = camera(24, 16);

    let (small, _) = render(&world, &camera, &config().with_bucket_size(3)).unwrap();
    let (large, _) = render(&world, &camera, &config().with_bucket_size(64)).unwrap();
    assert_eq!(small.pixels(), large.pixels());
}

#[test]
fn test_every_pixel_is_written_and_clamped() {
    let world = busy_world();
    let camera = camera(17, 11);
    let (canvas, stats) = render(&world, &camera, &config()).unwrap();

    assert_eq!(canvas.pixels().len(), 17 * 11);
    assert!(canvas
        .pixels()
        .iter()
        .all(|c| c.min_element() >= 0.0 && c.max_element() <= 1.0));
    assert_eq!(stats.camera_rays, 17 * 11 * 4);
    assert!(stats.shadow_rays > 0);
    assert!(stats.reflection_rays > 0);
    assert!(stats.refraction_rays > 0);
}

#[test]
fn test_zero_sized_camera_fails_fast() {
    let world = World::default_scene();
    let err = render(&world, &Camera::new(0, 10, FRAC_PI_3), &RenderConfig::default()).unwrap_err();

    match err {
        RenderError::InvalidConfig(diagnostics) => {
            assert!(diagnostics.iter().all(|d| d.severity == Severity::Error));
            assert!(!diagnostics.is_empty());
        }
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn test_config_from_json_renders() {
    let config = RenderConfig::from_json(r#"{ "max_depth": 2, "parallelism": 2, "background": [0.1, 0.2, 0.3] }"#)
        .unwrap();
    let world = World::new("empty");
    let (canvas, _) = render(&world, &camera(4, 4), &config).unwrap();
    assert_eq!(canvas.get(0, 0), Some(Color::new(0.1, 0.2, 0.3)));
}

#[test]
fn test_live_render_matches_blocking_render() {
    init_logging();
    let mut world = World::default_scene();
    world.add_light(Light::point(DVec3::new(5.0, 5.0, -5.0), Color::splat(0.3)));
    let camera = camera(32, 24);
    let config = RenderConfig::default().with_parallelism(2);

    let (expected, _) = render(&world, &camera, &config).unwrap();

    let live = render_live(Arc::new(world), camera, config).unwrap();
    let canvas = Arc::clone(live.canvas());
    assert_eq!(canvas.width(), 32);
    let stats = live.join().unwrap();

    assert_eq!(canvas.pixels(), expected.pixels());
    assert_eq!(stats.camera_rays, 32 * 24);
}

#[test]
fn test_live_render_rejects_bad_config_up_front() {
    let world = Arc::new(World::default_scene());
    let result = render_live(world, camera(8, 8), RenderConfig::default().with_bucket_size(0));
    assert!(matches!(result, Err(RenderError::InvalidConfig(_))));
}
