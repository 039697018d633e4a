//! Render a small showcase scene to a PNG.
//!
//! Run with: cargo run --release --example render_scene -- [output.png] [config.json]

use std::env;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4};
use std::fs;

use anyhow::{Context, Result};
use lumen_core::{
    AreaLight, CsgOp, Face, Light, Material, Mesh, Pattern, Perturbation, Shape, UvMapping, UvPattern,
    World,
};
use lumen_math::{rotation_x, rotation_y, scaling, translation, Color, DVec3};
use lumen_renderer::{render_to_file, Camera, RenderConfig};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let output = args.get(1).map(String::as_str).unwrap_or("render.png");

    let config = match args.get(2) {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading render config {path}"))?;
            RenderConfig::from_json(&json)?
        }
        None => RenderConfig::default()
            .with_max_depth(5)
            .with_antialias(2)
            .with_soft_shadows(true),
    };

    let world = build_scene()?;
    let camera = Camera::new(640, 360, FRAC_PI_3).with_position(
        DVec3::new(0.0, 2.5, -7.0),
        DVec3::new(0.0, 0.8, 0.0),
        DVec3::Y,
    )?;

    let stats = render_to_file(&world, &camera, &config, output)?;
    println!(
        "Rendered {} rays in {:.2?} -> {}",
        stats.total_rays(),
        stats.elapsed,
        output
    );
    Ok(())
}

fn build_scene() -> Result<World> {
    let mut world = World::new("showcase");

    // Checkered, slightly reflective floor
    let floor = Material::new("floor", Color::ONE)
        .with_pattern(Pattern::checkers(Color::splat(0.9), Color::splat(0.2)))
        .with_reflective(0.15)
        .with_specular(0.0);
    world.add_object(Shape::plane().with_material(floor));

    // Glass ball
    world.add_object(
        Shape::glass_sphere()
            .with_transform(translation(0.0, 1.0, 0.0))?
            .with_material(
                Material::glass()
                    .with_color(Color::splat(0.1))
                    .with_reflective(0.9)
                    .with_diffuse(0.1)
                    .with_shininess(300.0),
            ),
    );

    // A cube with a spherical bite taken out
    let shapes = world.shapes_mut();
    let cube = shapes.insert(Shape::cube().with_material(
        Material::new("cube", Color::new(0.8, 0.3, 0.2)).with_perturbation(Perturbation::Noise {
            scale: 0.3,
            frequency: 4.0,
        }),
    ));
    let bite = shapes.insert(
        Shape::sphere()
            .with_transform(translation(0.6, 0.6, -0.6) * scaling(0.9, 0.9, 0.9))?
            .with_material(Material::new("bite", Color::new(0.9, 0.8, 0.3))),
    );
    let carved = shapes.csg(CsgOp::Difference, cube, bite)?;
    shapes.set_transform(carved, translation(-2.5, 1.0, 1.0) * rotation_y(FRAC_PI_4))?;
    world.add_root(carved)?;

    // A group of capped cylinders and a cone
    let columns = world.shapes_mut().insert(Shape::group());
    for (i, x) in [-0.6, 0.6].into_iter().enumerate() {
        let column = world.shapes_mut().insert(
            Shape::cylinder(0.0, 1.5, true)?
                .with_transform(translation(x, 0.0, 0.0) * scaling(0.25, 1.0, 0.25))?
                .with_material(Material::new(format!("column-{i}"), Color::new(0.3, 0.5, 0.8))),
        );
        world.add_child(columns, column)?;
    }
    let roof = world.shapes_mut().insert(
        Shape::cone(-1.0, 0.0, true)?
            .with_transform(translation(0.0, 2.5, 0.0))?
            .with_material(Material::new("roof", Color::new(0.7, 0.7, 0.2))),
    );
    world.add_child(columns, roof)?;
    world
        .shapes_mut()
        .set_transform(columns, translation(2.5, 0.0, 1.5))?;
    world.add_root(columns)?;

    // Smooth-shaded pyramid mesh
    world.add_object(Shape::mesh(pyramid()?).with_transform(
        translation(1.2, 0.0, -2.0) * rotation_y(0.3) * scaling(0.6, 0.8, 0.6),
    )?);

    // Globe with a spherical checker map
    world.add_object(
        Shape::sphere()
            .with_transform(
                translation(-1.2, 0.5, -2.2) * rotation_x(-FRAC_PI_2 / 3.0) * scaling(0.5, 0.5, 0.5),
            )?
            .with_material(Material::new("globe", Color::ONE).with_pattern(Pattern::texture_map(
                UvPattern::Checkers {
                    width: 16.0,
                    height: 8.0,
                    a: Color::new(0.1, 0.5, 0.1),
                    b: Color::splat(0.95),
                },
                UvMapping::Spherical,
            ))),
    );

    // Soft key light from a thin panel, plus a dim fill
    let panel = world.shapes_mut().insert(
        Shape::cube().with_transform(translation(-4.0, 8.0, -6.0) * scaling(1.0, 0.05, 1.0))?,
    );
    let key = AreaLight::from_shape(world.shapes(), panel, Color::splat(0.9), 16)?;
    world.add_light(key);
    world.add_light(Light::point(DVec3::new(6.0, 6.0, -4.0), Color::splat(0.2)));

    Ok(world)
}

fn pyramid() -> Result<Mesh> {
    let positions = [
        DVec3::new(-1.0, 0.0, -1.0),
        DVec3::new(1.0, 0.0, -1.0),
        DVec3::new(1.0, 0.0, 1.0),
        DVec3::new(-1.0, 0.0, 1.0),
        DVec3::new(0.0, 1.5, 0.0),
    ];
    let faces = [
        Face::from_positions(&[0, 1, 4]),
        Face::from_positions(&[1, 2, 4]),
        Face::from_positions(&[2, 3, 4]),
        Face::from_positions(&[3, 0, 4]),
        Face::from_positions(&[3, 2, 1, 0]),
    ];
    Mesh::from_faces(&positions, &[], &[], &faces).context("building pyramid mesh")
}
