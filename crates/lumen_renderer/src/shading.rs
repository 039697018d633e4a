//! Whitted shading: Phong direct light, shadows, reflection and refraction.

use lumen_core::{Intersection, Light, Material, ShapeId, World};
use lumen_math::{reflect, Color, DVec3, Ray, EPSILON};
use rand::Rng;

use crate::config::RenderConfig;
use crate::stats::RayCounter;

/// Everything shading needs to know about one hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Computations {
    pub t: f64,
    pub object: ShapeId,
    pub hit: Intersection,
    pub point: DVec3,
    pub eyev: DVec3,
    /// Surface normal, flipped to face the eye
    pub normalv: DVec3,
    /// Whether the eye is inside the object
    pub inside: bool,
    /// Nudged along the normal, for shadow and reflection rays
    pub over_point: DVec3,
    /// Nudged against the normal, for refraction rays
    pub under_point: DVec3,
    pub reflectv: DVec3,
    /// Refractive index being left
    pub n1: f64,
    /// Refractive index being entered
    pub n2: f64,
}

/// Precompute the shading state for `hit`. `xs` is the full sorted list
/// the hit came from, used to find the media on either side.
pub fn prepare_computations(
    world: &World,
    hit: &Intersection,
    ray: &Ray,
    xs: &[Intersection],
) -> Computations {
    let point = ray.at(hit.t);
    let eyev = -ray.direction;
    let mut normalv = world.shapes().normal_at(hit.object, point, hit);

    let inside = normalv.dot(eyev) < 0.0;
    if inside {
        normalv = -normalv;
    }

    let (n1, n2) = refractive_indices(world, hit, xs);

    Computations {
        t: hit.t,
        object: hit.object,
        hit: *hit,
        point,
        eyev,
        normalv,
        inside,
        over_point: point + normalv * EPSILON,
        under_point: point - normalv * EPSILON,
        reflectv: reflect(ray.direction, normalv),
        n1,
        n2,
    }
}

/// Walk the intersections up to `hit`, tracking which objects the ray is
/// inside, to find the refractive index on each side of the hit.
fn refractive_indices(world: &World, hit: &Intersection, xs: &[Intersection]) -> (f64, f64) {
    let index_of = |containers: &[ShapeId]| {
        containers
            .last()
            .map(|&id| world.shapes()[id].material().refractive_index)
            .unwrap_or(1.0)
    };

    let mut containers: Vec<ShapeId> = Vec::new();
    let mut n1 = 1.0;

    for i in xs {
        let is_hit = i == hit;
        if is_hit {
            n1 = index_of(&containers);
        }

        match containers.iter().position(|&id| id == i.object) {
            Some(pos) => {
                containers.remove(pos);
            }
            None => containers.push(i.object),
        }

        if is_hit {
            return (n1, index_of(&containers));
        }
    }

    (n1, 1.0)
}

/// Phong reflection for one light.
///
/// `samples` are the light positions to average over; `intensity` is the
/// unshadowed fraction of them. With zero intensity only ambient and
/// emission remain.
#[allow(clippy::too_many_arguments)]
pub fn lighting(
    material: &Material,
    surface: Color,
    light: &Light,
    samples: &[DVec3],
    point: DVec3,
    eyev: DVec3,
    normalv: DVec3,
    intensity: f64,
) -> Color {
    let effective = surface * light.intensity();
    let ambient = effective * material.ambient;

    if intensity <= 0.0 || samples.is_empty() {
        return ambient + material.emissive;
    }

    let mut sum = Color::ZERO;
    for &position in samples {
        let lightv = (position - point).normalize_or_zero();
        let light_dot_normal = lightv.dot(normalv);
        if light_dot_normal < 0.0 {
            continue;
        }

        sum += effective * material.diffuse * light_dot_normal;

        let reflectv = reflect(-lightv, normalv);
        let reflect_dot_eye = reflectv.dot(eyev);
        if reflect_dot_eye > 0.0 {
            let factor = reflect_dot_eye.powf(material.shininess);
            sum += light.intensity() * material.specular * factor;
        }
    }

    ambient + sum / samples.len() as f64 * intensity + material.emissive
}

/// Schlick's approximation of the Fresnel reflectance.
pub fn schlick(comps: &Computations) -> f64 {
    let mut cos = comps.eyev.dot(comps.normalv);

    if comps.n1 > comps.n2 {
        let n = comps.n1 / comps.n2;
        let sin2_t = n * n * (1.0 - cos * cos);
        if sin2_t > 1.0 {
            return 1.0;
        }
        cos = (1.0 - sin2_t).sqrt();
    }

    let r0 = ((comps.n1 - comps.n2) / (comps.n1 + comps.n2)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cos).powi(5)
}

/// Traces rays through one world for one render.
pub struct Shader<'a> {
    world: &'a World,
    config: &'a RenderConfig,
    counter: &'a RayCounter,
}

impl<'a> Shader<'a> {
    pub fn new(world: &'a World, config: &'a RenderConfig, counter: &'a RayCounter) -> Self {
        Self {
            world,
            config,
            counter,
        }
    }

    /// Colour seen along `ray`. `remaining` bounds further recursion and
    /// `weight` is how much this ray contributes to the final pixel.
    pub fn color_at<R: Rng>(&self, ray: &Ray, remaining: u32, weight: f64, rng: &mut R) -> Color {
        let xs = self.world.intersect(ray);
        match xs.hit() {
            Some(hit) => {
                let comps = prepare_computations(self.world, hit, ray, &xs);
                self.shade_hit(&comps, remaining, weight, rng)
            }
            None => self.config.background(),
        }
    }

    /// Direct light from every light plus reflected and refracted light.
    pub fn shade_hit<R: Rng>(
        &self,
        comps: &Computations,
        remaining: u32,
        weight: f64,
        rng: &mut R,
    ) -> Color {
        let shape = &self.world.shapes()[comps.object];
        let material = shape.material();
        let surface_color =
            material.color_at(self.world.shapes(), comps.object, comps.over_point, &comps.hit);

        let mut surface = Color::ZERO;
        for light in self.world.lights() {
            let samples = light.sample_positions(self.config.soft_shadows, rng);
            let intensity = self.intensity_at(&samples, comps.over_point);
            surface += lighting(
                material,
                surface_color,
                light,
                &samples,
                comps.over_point,
                comps.eyev,
                comps.normalv,
                intensity,
            );
        }

        let reflected = self.reflected_color(comps, remaining, weight, rng);
        let refracted = self.refracted_color(comps, remaining, weight, rng);

        if material.reflective > 0.0 && material.transparency > 0.0 {
            let reflectance = schlick(comps);
            surface + reflected * reflectance + refracted * (1.0 - reflectance)
        } else {
            surface + reflected + refracted
        }
    }

    /// Fraction of `samples` visible from `point`.
    pub fn intensity_at(&self, samples: &[DVec3], point: DVec3) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let visible = samples
            .iter()
            .filter(|&&position| !self.is_shadowed(position, point))
            .count();
        visible as f64 / samples.len() as f64
    }

    /// Whether shadow-casting geometry lies between `point` and the light.
    pub fn is_shadowed(&self, light_position: DVec3, point: DVec3) -> bool {
        self.counter.shadow_ray();

        let v = light_position - point;
        let distance = v.length();
        let ray = Ray::new(point, v.normalize_or_zero());

        let xs = self.world.intersect(&ray);
        let shapes = self.world.shapes();
        xs.iter()
            .filter(|i| i.t >= 0.0)
            .find(|i| shapes[i.object].material().casts_shadow)
            .is_some_and(|i| i.t < distance)
    }

    pub fn reflected_color<R: Rng>(
        &self,
        comps: &Computations,
        remaining: u32,
        weight: f64,
        rng: &mut R,
    ) -> Color {
        let reflective = self.world.shapes()[comps.object].material().reflective;
        if remaining == 0 || reflective == 0.0 {
            return Color::ZERO;
        }

        let weight = weight * reflective;
        if weight < self.config.min_contribution {
            return Color::ZERO;
        }

        self.counter.reflection_ray();
        let ray = Ray::new(comps.over_point, comps.reflectv);
        self.color_at(&ray, remaining - 1, weight, rng) * reflective
    }

    pub fn refracted_color<R: Rng>(
        &self,
        comps: &Computations,
        remaining: u32,
        weight: f64,
        rng: &mut R,
    ) -> Color {
        let transparency = self.world.shapes()[comps.object].material().transparency;
        if remaining == 0 || transparency == 0.0 {
            return Color::ZERO;
        }

        // Snell's law; no transmitted ray under total internal reflection
        let n_ratio = comps.n1 / comps.n2;
        let cos_i = comps.eyev.dot(comps.normalv);
        let sin2_t = n_ratio * n_ratio * (1.0 - cos_i * cos_i);
        if sin2_t > 1.0 {
            return Color::ZERO;
        }

        let weight = weight * transparency;
        if weight < self.config.min_contribution {
            return Color::ZERO;
        }

        let cos_t = (1.0 - sin2_t).sqrt();
        let direction = comps.normalv * (n_ratio * cos_i - cos_t) - comps.eyev * n_ratio;

        self.counter.refraction_ray();
        let ray = Ray::new(comps.under_point, direction);
        self.color_at(&ray, remaining - 1, weight, rng) * transparency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{AreaLight, Pattern, Shape, ShapeArena};
    use lumen_math::{scaling, translation};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn approx(a: Color, b: Color) -> bool {
        (a - b).abs().max_element() < EPSILON
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0)
    }

    fn config() -> RenderConfig {
        RenderConfig::default().with_max_depth(5)
    }

    fn point_light(x: f64, y: f64, z: f64) -> Light {
        Light::point(DVec3::new(x, y, z), Color::ONE)
    }

    fn phong(eyev: DVec3, light: Light, intensity: f64) -> Color {
        let m = Material::default();
        lighting(
            &m,
            m.color,
            &light,
            &[light.position()],
            DVec3::ZERO,
            eyev,
            DVec3::NEG_Z,
            intensity,
        )
    }

    // -- lighting --

    #[test]
    fn test_eye_between_light_and_surface() {
        let c = phong(DVec3::NEG_Z, point_light(0.0, 0.0, -10.0), 1.0);
        assert!(approx(c, Color::splat(1.9)));
    }

    #[test]
    fn test_eye_offset_45_degrees() {
        let k = 2f64.sqrt() / 2.0;
        let c = phong(DVec3::new(0.0, k, -k), point_light(0.0, 0.0, -10.0), 1.0);
        assert!(approx(c, Color::splat(1.0)));
    }

    #[test]
    fn test_light_offset_45_degrees() {
        let c = phong(DVec3::NEG_Z, point_light(0.0, 10.0, -10.0), 1.0);
        assert!(approx(c, Color::splat(0.7364)));
    }

    #[test]
    fn test_eye_in_reflection_path() {
        let k = 2f64.sqrt() / 2.0;
        let c = phong(DVec3::new(0.0, -k, -k), point_light(0.0, 10.0, -10.0), 1.0);
        assert!(approx(c, Color::splat(1.6364)));
    }

    #[test]
    fn test_light_behind_surface() {
        let c = phong(DVec3::NEG_Z, point_light(0.0, 0.0, 10.0), 1.0);
        assert!(approx(c, Color::splat(0.1)));
    }

    #[test]
    fn test_surface_in_shadow() {
        let c = phong(DVec3::NEG_Z, point_light(0.0, 0.0, -10.0), 0.0);
        assert!(approx(c, Color::splat(0.1)));
    }

    #[test]
    fn test_emissive_survives_shadow() {
        let m = Material::default().with_emissive(Color::new(0.5, 0.0, 0.0));
        let light = point_light(0.0, 0.0, -10.0);
        let c = lighting(&m, m.color, &light, &[], DVec3::ZERO, DVec3::NEG_Z, DVec3::NEG_Z, 0.0);
        assert!(approx(c, Color::new(0.6, 0.1, 0.1)));
    }

    #[test]
    fn test_lighting_with_pattern_color() {
        let mut arena = ShapeArena::new();
        let s = arena.insert(Shape::sphere());
        let m = Material::default()
            .with_pattern(Pattern::stripe(Color::ONE, Color::ZERO))
            .with_ambient(1.0)
            .with_diffuse(0.0)
            .with_specular(0.0);
        let light = point_light(0.0, 0.0, -10.0);
        let hit = Intersection::new(0.0, s);

        let at = |x: f64| {
            let p = DVec3::new(x, 0.0, 0.0);
            let surface = m.color_at(&arena, s, p, &hit);
            lighting(&m, surface, &light, &[light.position()], p, DVec3::NEG_Z, DVec3::NEG_Z, 1.0)
        };
        assert!(approx(at(0.9), Color::ONE));
        assert!(approx(at(1.1), Color::ZERO));
    }

    #[test]
    fn test_lighting_averages_area_samples() {
        let m = Material::default();
        let light = point_light(0.0, 0.0, -10.0);
        // One sample straight ahead, one behind the surface
        let samples = [DVec3::new(0.0, 0.0, -10.0), DVec3::new(0.0, 0.0, 10.0)];
        let c = lighting(&m, m.color, &light, &samples, DVec3::ZERO, DVec3::NEG_Z, DVec3::NEG_Z, 1.0);
        assert!(approx(c, Color::splat(0.1 + 1.8 / 2.0)));
    }

    // -- computations --

    #[test]
    fn test_hit_outside() {
        let w = World::default_scene();
        let r = Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Z);
        let xs = w.intersect(&r);
        let comps = prepare_computations(&w, xs.hit().unwrap(), &r, &xs);

        assert_eq!(comps.t, 4.0);
        assert!(approx(comps.point, DVec3::new(0.0, 0.0, -1.0)));
        assert!(approx(comps.eyev, DVec3::NEG_Z));
        assert!(approx(comps.normalv, DVec3::NEG_Z));
        assert!(!comps.inside);
    }

    #[test]
    fn test_hit_inside() {
        let mut w = World::new("inside");
        w.add_object(Shape::sphere());
        let r = Ray::new(DVec3::ZERO, DVec3::Z);
        let xs = w.intersect(&r);
        let comps = prepare_computations(&w, xs.hit().unwrap(), &r, &xs);

        assert!(approx(comps.point, DVec3::new(0.0, 0.0, 1.0)));
        assert!(approx(comps.normalv, DVec3::NEG_Z));
        assert!(comps.inside);
    }

    #[test]
    fn test_over_and_under_point() {
        let mut w = World::new("offsets");
        w.add_object(
            Shape::glass_sphere()
                .with_transform(translation(0.0, 0.0, 1.0))
                .unwrap(),
        );
        let r = Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Z);
        let xs = w.intersect(&r);
        let comps = prepare_computations(&w, xs.hit().unwrap(), &r, &xs);

        assert!(comps.over_point.z < -EPSILON / 2.0);
        assert!(comps.point.z > comps.over_point.z);
        assert!(comps.under_point.z > EPSILON / 2.0);
        assert!(comps.point.z < comps.under_point.z);
    }

    #[test]
    fn test_reflection_vector() {
        let mut w = World::new("plane");
        w.add_object(Shape::plane());
        let k = 2f64.sqrt() / 2.0;
        let r = Ray::new(DVec3::new(0.0, 1.0, -1.0), DVec3::new(0.0, -k, k));
        let xs = w.intersect(&r);
        let comps = prepare_computations(&w, xs.hit().unwrap(), &r, &xs);
        assert!(approx(comps.reflectv, DVec3::new(0.0, k, k)));
    }

    #[test]
    fn test_n1_n2_at_each_intersection() {
        let mut w = World::new("nested glass");
        let a = Shape::glass_sphere()
            .with_transform(scaling(2.0, 2.0, 2.0))
            .unwrap()
            .with_material(Material::glass().with_transparency(1.0, 1.5));
        let b = Shape::glass_sphere()
            .with_transform(translation(0.0, 0.0, -0.25))
            .unwrap()
            .with_material(Material::glass().with_transparency(1.0, 2.0));
        let c = Shape::glass_sphere()
            .with_transform(translation(0.0, 0.0, 0.25))
            .unwrap()
            .with_material(Material::glass().with_transparency(1.0, 2.5));
        w.add_object(a);
        w.add_object(b);
        w.add_object(c);

        let r = Ray::new(DVec3::new(0.0, 0.0, -4.0), DVec3::Z);
        let xs = w.intersect(&r);
        let expected = [
            (1.0, 1.5),
            (1.5, 2.0),
            (2.0, 2.5),
            (2.5, 2.5),
            (2.5, 1.5),
            (1.5, 1.0),
        ];
        assert_eq!(xs.len(), 6);
        for (i, (n1, n2)) in expected.into_iter().enumerate() {
            let comps = prepare_computations(&w, &xs[i], &r, &xs);
            assert_eq!((comps.n1, comps.n2), (n1, n2), "intersection {i}");
        }
    }

    // -- schlick --

    fn glass_world() -> World {
        let mut w = World::new("glass");
        w.add_object(Shape::glass_sphere());
        w
    }

    #[test]
    fn test_schlick_total_internal_reflection() {
        let w = glass_world();
        let k = 2f64.sqrt() / 2.0;
        let r = Ray::new(DVec3::new(0.0, 0.0, k), DVec3::Y);
        let xs = w.intersect(&r);
        let comps = prepare_computations(&w, &xs[1], &r, &xs);
        assert_eq!(schlick(&comps), 1.0);
    }

    #[test]
    fn test_schlick_perpendicular() {
        let w = glass_world();
        let r = Ray::new(DVec3::ZERO, DVec3::Y);
        let xs = w.intersect(&r);
        let comps = prepare_computations(&w, &xs[1], &r, &xs);
        assert!((schlick(&comps) - 0.04).abs() < EPSILON);
    }

    #[test]
    fn test_schlick_small_angle_n2_greater() {
        let w = glass_world();
        let r = Ray::new(DVec3::new(0.0, 0.99, -2.0), DVec3::Z);
        let xs = w.intersect(&r);
        let comps = prepare_computations(&w, &xs[0], &r, &xs);
        assert!((schlick(&comps) - 0.48873).abs() < EPSILON);
    }

    // -- world shading --

    #[test]
    fn test_shading_an_intersection() {
        let w = World::default_scene();
        let counter = RayCounter::new();
        let config = config();
        let shader = Shader::new(&w, &config, &counter);

        let r = Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Z);
        let xs = w.intersect(&r);
        let comps = prepare_computations(&w, &xs[0], &r, &xs);
        let c = shader.shade_hit(&comps, 5, 1.0, &mut rng());
        assert!(approx(c, Color::new(0.38066, 0.47583, 0.2855)));
    }

    #[test]
    fn test_shading_from_inside() {
        let mut w = World::default_scene();
        w.lights_mut()[0] = Light::point(DVec3::new(0.0, 0.25, 0.0), Color::ONE);
        let counter = RayCounter::new();
        let config = config();
        let shader = Shader::new(&w, &config, &counter);

        let r = Ray::new(DVec3::ZERO, DVec3::Z);
        let xs = w.intersect(&r);
        let hit = *xs.hit().unwrap();
        let comps = prepare_computations(&w, &hit, &r, &xs);
        let c = shader.shade_hit(&comps, 5, 1.0, &mut rng());
        assert!(approx(c, Color::splat(0.90498)));
    }

    #[test]
    fn test_shade_hit_in_shadow() {
        let mut w = World::new("shadowed");
        w.add_light(point_light(0.0, 0.0, -10.0));
        w.add_object(Shape::sphere());
        let s2 = w.add_object(Shape::sphere().with_transform(translation(0.0, 0.0, 10.0)).unwrap());
        let counter = RayCounter::new();
        let config = config();
        let shader = Shader::new(&w, &config, &counter);

        let r = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::Z);
        let i = Intersection::new(4.0, s2);
        let comps = prepare_computations(&w, &i, &r, &[i]);
        let c = shader.shade_hit(&comps, 5, 1.0, &mut rng());
        assert!(approx(c, Color::splat(0.1)));
    }

    #[test]
    fn test_color_when_ray_misses() {
        let w = World::default_scene();
        let counter = RayCounter::new();
        let config = config().with_background(Color::new(0.2, 0.3, 0.4));
        let shader = Shader::new(&w, &config, &counter);

        let c = shader.color_at(&Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Y), 5, 1.0, &mut rng());
        assert_eq!(c, Color::new(0.2, 0.3, 0.4));
    }

    #[test]
    fn test_color_when_ray_hits() {
        let w = World::default_scene();
        let counter = RayCounter::new();
        let config = config();
        let shader = Shader::new(&w, &config, &counter);

        let c = shader.color_at(&Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Z), 5, 1.0, &mut rng());
        assert!(approx(c, Color::new(0.38066, 0.47583, 0.2855)));
    }

    #[test]
    fn test_color_with_intersection_behind_ray() {
        let mut w = World::default_scene();
        let ids = w.objects().to_vec();
        for id in ids {
            let m = w.shapes()[id].material().clone().with_ambient(1.0);
            w.shapes_mut().set_material(id, m).unwrap();
        }
        let inner_color = w.shapes()[w.objects()[1]].material().color;

        let counter = RayCounter::new();
        let config = config();
        let shader = Shader::new(&w, &config, &counter);
        let c = shader.color_at(&Ray::new(DVec3::new(0.0, 0.0, 0.75), DVec3::NEG_Z), 5, 1.0, &mut rng());
        assert_eq!(c, inner_color);
    }

    // -- shadows --

    fn shadowed(point: DVec3) -> bool {
        let w = World::default_scene();
        let counter = RayCounter::new();
        let config = config();
        let shader = Shader::new(&w, &config, &counter);
        shader.is_shadowed(DVec3::new(-10.0, 10.0, -10.0), point)
    }

    #[test]
    fn test_no_shadow_when_nothing_collinear() {
        assert!(!shadowed(DVec3::new(0.0, 10.0, 0.0)));
    }

    #[test]
    fn test_shadow_when_object_between() {
        assert!(shadowed(DVec3::new(10.0, -10.0, 10.0)));
    }

    #[test]
    fn test_no_shadow_when_object_behind_light() {
        assert!(!shadowed(DVec3::new(-20.0, 20.0, -20.0)));
    }

    #[test]
    fn test_no_shadow_when_object_behind_point() {
        assert!(!shadowed(DVec3::new(-2.0, 2.0, -2.0)));
    }

    #[test]
    fn test_non_casting_objects_do_not_shadow() {
        let mut w = World::default_scene();
        let ids = w.objects().to_vec();
        for id in ids {
            let m = w.shapes()[id].material().clone().with_casts_shadow(false);
            w.shapes_mut().set_material(id, m).unwrap();
        }
        let counter = RayCounter::new();
        let config = config();
        let shader = Shader::new(&w, &config, &counter);
        assert!(!shader.is_shadowed(DVec3::new(-10.0, 10.0, -10.0), DVec3::new(10.0, -10.0, 10.0)));
    }

    #[test]
    fn test_intensity_with_area_light() {
        let mut w = World::new("area");
        w.add_object(Shape::cube().with_transform(scaling(0.1, 5.0, 5.0)).unwrap());

        let counter = RayCounter::new();
        let config = config();
        let shader = Shader::new(&w, &config, &counter);

        // Half the samples are behind the wall
        let samples = [DVec3::new(-5.0, 0.0, 0.0), DVec3::new(5.0, 10.0, 0.0)];
        let f = shader.intensity_at(&samples, DVec3::new(2.0, 0.0, 0.0));
        assert!((f - 0.5).abs() < EPSILON);
        assert_eq!(counter.snapshot(Default::default(), 0, 1).shadow_rays, 2);
    }

    #[test]
    fn test_soft_shadow_samples_area_light() {
        let mut w = World::new("soft");
        let panel = w.shapes_mut().insert(
            Shape::cube()
                .with_transform(translation(0.0, 5.0, 0.0) * scaling(1.0, 0.01, 1.0))
                .unwrap(),
        );
        let light = AreaLight::from_shape(w.shapes(), panel, Color::ONE, 8).unwrap();
        w.add_light(light);
        w.add_object(Shape::plane());

        let counter = RayCounter::new();
        let config = config().with_soft_shadows(true);
        let shader = Shader::new(&w, &config, &counter);

        let c = shader.color_at(&Ray::new(DVec3::new(0.0, 1.0, -1.0), DVec3::new(0.0, -1.0, 1.0).normalize()), 5, 1.0, &mut rng());
        assert!(c.x > 0.1);
        assert_eq!(counter.snapshot(Default::default(), 0, 1).shadow_rays, 8);
    }

    // -- reflection --

    #[test]
    fn test_reflected_color_nonreflective() {
        let mut w = World::default_scene();
        let inner = w.objects()[1];
        let m = w.shapes()[inner].material().clone().with_ambient(1.0);
        w.shapes_mut().set_material(inner, m).unwrap();

        let counter = RayCounter::new();
        let config = config();
        let shader = Shader::new(&w, &config, &counter);

        let r = Ray::new(DVec3::ZERO, DVec3::Z);
        let i = Intersection::new(1.0, inner);
        let comps = prepare_computations(&w, &i, &r, &[i]);
        assert_eq!(shader.reflected_color(&comps, 5, 1.0, &mut rng()), Color::ZERO);
    }

    fn reflective_plane_world(material: Material) -> (World, ShapeId) {
        let mut w = World::default_scene();
        let plane = w.add_object(
            Shape::plane()
                .with_material(material)
                .with_transform(translation(0.0, -1.0, 0.0))
                .unwrap(),
        );
        (w, plane)
    }

    fn plane_comps(w: &World, plane: ShapeId) -> Computations {
        let k = 2f64.sqrt() / 2.0;
        let r = Ray::new(DVec3::new(0.0, 0.0, -3.0), DVec3::new(0.0, -k, k));
        let i = Intersection::new(2f64.sqrt(), plane);
        prepare_computations(w, &i, &r, &[i])
    }

    #[test]
    fn test_reflected_color_reflective() {
        let (w, plane) = reflective_plane_world(Material::default().with_reflective(0.5));
        let counter = RayCounter::new();
        let config = config();
        let shader = Shader::new(&w, &config, &counter);

        let c = shader.reflected_color(&plane_comps(&w, plane), 5, 1.0, &mut rng());
        assert!((c - Color::new(0.19032, 0.2379, 0.14274)).abs().max_element() < 1e-3);
    }

    #[test]
    fn test_shade_hit_with_reflection() {
        let (w, plane) = reflective_plane_world(Material::default().with_reflective(0.5));
        let counter = RayCounter::new();
        let config = config();
        let shader = Shader::new(&w, &config, &counter);

        let c = shader.shade_hit(&plane_comps(&w, plane), 5, 1.0, &mut rng());
        assert!((c - Color::new(0.87677, 0.92436, 0.82918)).abs().max_element() < 1e-3);
    }

    #[test]
    fn test_reflected_color_at_max_depth() {
        let (w, plane) = reflective_plane_world(Material::default().with_reflective(0.5));
        let counter = RayCounter::new();
        let config = config();
        let shader = Shader::new(&w, &config, &counter);

        assert_eq!(
            shader.reflected_color(&plane_comps(&w, plane), 0, 1.0, &mut rng()),
            Color::ZERO
        );
    }

    #[test]
    fn test_low_contribution_stops_recursion() {
        let (w, plane) = reflective_plane_world(Material::default().with_reflective(0.5));
        let counter = RayCounter::new();
        let config = config().with_min_contribution(0.6);
        let shader = Shader::new(&w, &config, &counter);

        assert_eq!(
            shader.reflected_color(&plane_comps(&w, plane), 5, 1.0, &mut rng()),
            Color::ZERO
        );
        assert_eq!(counter.snapshot(Default::default(), 0, 1).reflection_rays, 0);
    }

    #[test]
    fn test_mutually_reflective_surfaces_terminate() {
        let mut w = World::new("mirrors");
        w.add_light(point_light(0.0, 0.0, 0.0));
        let mirror = Material::default().with_reflective(1.0);
        w.add_object(
            Shape::plane()
                .with_material(mirror.clone())
                .with_transform(translation(0.0, -1.0, 0.0))
                .unwrap(),
        );
        w.add_object(
            Shape::plane()
                .with_material(mirror)
                .with_transform(translation(0.0, 1.0, 0.0))
                .unwrap(),
        );

        let counter = RayCounter::new();
        let config = config();
        let shader = Shader::new(&w, &config, &counter);
        let c = shader.color_at(&Ray::new(DVec3::ZERO, DVec3::Y), 5, 1.0, &mut rng());
        assert!(c.is_finite());
        assert_eq!(counter.snapshot(Default::default(), 0, 1).reflection_rays, 5);
    }

    // -- refraction --

    #[test]
    fn test_refracted_color_opaque() {
        let w = World::default_scene();
        let counter = RayCounter::new();
        let config = config();
        let shader = Shader::new(&w, &config, &counter);

        let r = Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Z);
        let xs = w.intersect(&r);
        let comps = prepare_computations(&w, &xs[0], &r, &xs);
        assert_eq!(shader.refracted_color(&comps, 5, 1.0, &mut rng()), Color::ZERO);
    }

    fn transparent_default_world() -> World {
        let mut w = World::default_scene();
        let outer = w.objects()[0];
        let m = w.shapes()[outer].material().clone().with_transparency(1.0, 1.5);
        w.shapes_mut().set_material(outer, m).unwrap();
        w
    }

    #[test]
    fn test_refracted_color_at_max_depth() {
        let w = transparent_default_world();
        let counter = RayCounter::new();
        let config = config();
        let shader = Shader::new(&w, &config, &counter);

        let r = Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Z);
        let xs = w.intersect(&r);
        let comps = prepare_computations(&w, &xs[0], &r, &xs);
        assert_eq!(shader.refracted_color(&comps, 0, 1.0, &mut rng()), Color::ZERO);
    }

    #[test]
    fn test_refracted_color_total_internal_reflection() {
        let w = transparent_default_world();
        let counter = RayCounter::new();
        let config = config();
        let shader = Shader::new(&w, &config, &counter);

        let k = 2f64.sqrt() / 2.0;
        let r = Ray::new(DVec3::new(0.0, 0.0, k), DVec3::Y);
        let xs = w.intersect(&r);
        // Inside the outer sphere, looking at its far side
        let outer = w.objects()[0];
        let exit = xs.iter().find(|i| i.object == outer && i.t > 0.0).unwrap();
        let comps = prepare_computations(&w, exit, &r, &xs);
        assert_eq!(shader.refracted_color(&comps, 5, 1.0, &mut rng()), Color::ZERO);
    }

    fn glass_floor_world(floor: Material) -> (World, ShapeId) {
        let mut w = World::default_scene();
        let floor = w.add_object(
            Shape::plane()
                .with_material(floor)
                .with_transform(translation(0.0, -1.0, 0.0))
                .unwrap(),
        );
        let ball = Material::new("ball", Color::new(1.0, 0.0, 0.0)).with_ambient(0.5);
        w.add_object(
            Shape::sphere()
                .with_material(ball)
                .with_transform(translation(0.0, -3.5, -0.5))
                .unwrap(),
        );
        (w, floor)
    }

    #[test]
    fn test_shade_hit_with_transparent_material() {
        let (w, floor) = glass_floor_world(Material::default().with_transparency(0.5, 1.5));
        let counter = RayCounter::new();
        let config = config();
        let shader = Shader::new(&w, &config, &counter);

        let c = shader.shade_hit(&plane_comps(&w, floor), 5, 1.0, &mut rng());
        assert!((c - Color::new(0.93642, 0.68642, 0.68642)).abs().max_element() < 1e-3);
    }

    #[test]
    fn test_shade_hit_with_reflective_transparent_material() {
        let (w, floor) = glass_floor_world(
            Material::default()
                .with_reflective(0.5)
                .with_transparency(0.5, 1.5),
        );
        let counter = RayCounter::new();
        let config = config();
        let shader = Shader::new(&w, &config, &counter);

        let c = shader.shade_hit(&plane_comps(&w, floor), 5, 1.0, &mut rng());
        assert!((c - Color::new(0.93391, 0.69643, 0.69243)).abs().max_element() < 1e-3);
    }
}
