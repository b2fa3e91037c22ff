//! Recursive radiance estimator.
//!
//! Each call follows one bounce: intersect, cut off past the depth cap and
//! on untraced materials, play Russian roulette past the roulette depth, then sample the next
//! direction from the material and recurse.

use crate::{
    gen_f32,
    material::{Color, Material},
    scene::Scene,
    RenderConfig,
};
use rand::RngCore;
use std::f32::consts::PI;
use tracer_math::{Ray, Vec3, VectorExt};

/// Estimate the radiance arriving along `ray`.
///
/// Rays that miss everything see a black background. Children are spawned
/// with `ttl` one higher than `ray`, so recursion never runs deeper than
/// `config.max_depth` bounces.
pub fn trace(ray: &Ray, scene: &Scene, config: &RenderConfig, rng: &mut dyn RngCore) -> Color {
    let Some(hit) = scene.intersect(ray) else {
        return Color::ZERO;
    };

    let depth = ray.ttl() + 1;
    if depth > config.max_depth {
        return Color::ZERO;
    }

    let object = &scene.objects()[hit.index];
    if !object.material.is_traced() {
        return Color::ZERO;
    }

    let point = ray.at(hit.distance);
    let normal = object.shape.outward_normal(point);
    let oriented_normal = if normal.dot(ray.direction()) < 0.0 {
        normal
    } else {
        -normal
    };
    let mut albedo = object.color;

    // Russian roulette: survive with probability of the brightest channel,
    // and boost the survivors to compensate
    if depth > config.roulette_depth {
        let survival = albedo.max_channel();
        if gen_f32(rng) < survival {
            albedo /= survival;
        } else {
            return object.emission;
        }
    }

    match object.material {
        Material::Diffuse => {
            let direction = sample_cosine_hemisphere(oriented_normal, rng);
            let bounce = Ray::new(point, direction, depth);
            object.emission + albedo * trace(&bounce, scene, config, rng)
        }
        Material::Specular => {
            let bounce = Ray::new(point, ray.direction().mirror(normal), depth);
            object.emission + albedo * trace(&bounce, scene, config, rng)
        }
        Material::Refractive | Material::None => Color::ZERO,
    }
}

/// Cosine-weighted direction in the hemisphere around the unit vector `normal`.
fn sample_cosine_hemisphere(normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let r1 = 2.0 * PI * gen_f32(rng);
    let r2 = gen_f32(rng);
    let r2s = r2.sqrt();

    let (u, v) = normal.orthonormal_basis();
    let mut direction = u * r1.cos() * r2s + v * r1.sin() * r2s + normal * (1.0 - r2).sqrt();
    direction.norm();
    direction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneObject;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn shell(material: Material, emission: Color, color: Color) -> SceneObject {
        SceneObject::sphere("shell", Vec3::ZERO, 10.0, emission, color, material)
    }

    fn average(samples: usize, mut sample: impl FnMut() -> Color) -> Color {
        let mut sum = Color::ZERO;
        for _ in 0..samples {
            sum += sample();
        }
        sum / samples as f32
    }

    #[test]
    fn test_miss_is_black() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = RenderConfig::default();

        let empty = Scene::new();
        assert_eq!(trace(&Ray::default(), &empty, &config, &mut rng), Color::ZERO);

        let scene = Scene::from_objects(vec![SceneObject::sphere(
            "light",
            Vec3::new(0.0, 50.0, 0.0),
            1.0,
            Color::ONE,
            Color::ONE,
            Material::Diffuse,
        )]);
        assert_eq!(trace(&Ray::default(), &scene, &config, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_enclosed_mirror_terminates() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = RenderConfig::default();
        let scene = Scene::from_objects(vec![shell(Material::Specular, Color::ZERO, Color::ONE)]);

        // Every bounce hits the shell again and roulette never kills a white
        // mirror, so only the depth cap ends the path
        let ray = Ray::primary(Vec3::ZERO, Vec3::new(0.3, 0.4, -0.866).normalize());
        assert_eq!(trace(&ray, &scene, &config, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_depth_cap_counts_bounces() {
        let mut rng = StdRng::seed_from_u64(42);
        let scene = Scene::from_objects(vec![shell(Material::Specular, Color::splat(0.1), Color::ONE)]);

        for max_depth in [1, 7, 20] {
            let config = RenderConfig::default().with_depth(max_depth, 5);
            let radiance = trace(&Ray::primary(Vec3::ZERO, Vec3::X), &scene, &config, &mut rng);

            // One emission per bounce, exactly max_depth of them
            let expected = 0.1 * max_depth as f32;
            assert!(
                (radiance - Color::splat(expected)).abs().max_element() < 1e-4,
                "depth {max_depth}: {radiance}"
            );
        }
    }

    #[test]
    fn test_ttl_at_cap() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = RenderConfig::default();
        let emission = Color::new(0.5, 0.25, 0.125);
        let scene = Scene::from_objects(vec![shell(Material::Specular, emission, Color::ONE)]);

        let last = Ray::new(Vec3::ZERO, Vec3::Y, config.max_depth - 1);
        assert_eq!(trace(&last, &scene, &config, &mut rng), emission);

        let past = Ray::new(Vec3::ZERO, Vec3::Y, config.max_depth);
        assert_eq!(trace(&past, &scene, &config, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_untraced_materials_are_black() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = RenderConfig::default();

        for material in [Material::Refractive, Material::None] {
            // Dark albedo so roulette would usually fail and return emission
            let scene = Scene::from_objects(vec![shell(material, Color::ONE, Color::splat(0.01))]);
            for ttl in [0, config.roulette_depth, config.max_depth - 1] {
                let ray = Ray::new(Vec3::ZERO, Vec3::Z, ttl);
                for _ in 0..50 {
                    assert_eq!(trace(&ray, &scene, &config, &mut rng), Color::ZERO, "{material:?}");
                }
            }
        }
    }

    #[test]
    fn test_roulette_on_black_surface_returns_emission() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = RenderConfig::default();
        let emission = Color::new(0.3, 0.2, 0.1);
        let scene = Scene::from_objects(vec![shell(Material::Diffuse, emission, Color::ZERO)]);

        // Past the roulette depth a black surface never survives
        let ray = Ray::new(Vec3::ZERO, Vec3::Z, config.roulette_depth);
        for _ in 0..100 {
            assert_eq!(trace(&ray, &scene, &config, &mut rng), emission);
        }
    }

    #[test]
    fn test_specular_follows_mirror_direction() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = RenderConfig::default();
        let scene = Scene::from_objects(vec![
            // Mirror floor at y = 0 (top of a huge sphere)
            SceneObject::sphere(
                "floor",
                Vec3::new(0.0, -1000.0, 0.0),
                1000.0,
                Color::ZERO,
                Color::new(0.5, 0.5, 0.5),
                Material::Specular,
            ),
            // Light only reachable by the reflected ray
            SceneObject::sphere(
                "light",
                Vec3::new(10.0, 10.0, 0.0),
                1.0,
                Color::new(4.0, 2.0, 1.0),
                Color::ZERO,
                Material::Diffuse,
            ),
        ]);

        let ray = Ray::primary(Vec3::new(0.0, 10.0, 0.0), Vec3::new(1.0, -2.0, 0.0).normalize());
        let radiance = trace(&ray, &scene, &config, &mut rng);
        assert!((radiance - Color::new(2.0, 1.0, 0.5)).abs().max_element() < 1e-4);
    }

    #[test]
    fn test_cosine_hemisphere_samples() {
        let mut rng = StdRng::seed_from_u64(42);
        let normal = Vec3::new(0.2, -0.5, 0.8).normalize();
        let count = 20_000;

        let mut mean_cos = 0.0;
        for _ in 0..count {
            let d = sample_cosine_hemisphere(normal, &mut rng);
            assert!((d.length() - 1.0).abs() < 1e-4);
            let cos = d.dot(normal);
            assert!(cos >= -1e-5);
            mean_cos += cos / count as f32;
        }

        // E[cos θ] under a cosine-weighted distribution is 2/3
        assert!((mean_cos - 2.0 / 3.0).abs() < 0.01, "mean cos {mean_cos}");
    }

    #[test]
    fn test_roulette_keeps_mean() {
        let scene = Scene::from_objects(vec![
            shell(Material::Diffuse, Color::splat(0.1), Color::splat(0.5)),
            SceneObject::sphere(
                "ball",
                Vec3::new(0.0, -6.0, 0.0),
                3.0,
                Color::ZERO,
                Color::new(0.8, 0.6, 0.4),
                Material::Diffuse,
            ),
        ]);
        let ray = Ray::primary(Vec3::ZERO, Vec3::NEG_Y);
        let samples = 20_000;

        let early = RenderConfig::default().with_depth(20, 2);
        let default = RenderConfig::default().with_depth(20, 5);
        // Roulette only starts past the cap, i.e. never
        let never = RenderConfig::default().with_depth(20, 20);

        let mut rng = StdRng::seed_from_u64(1);
        let reference = average(samples, || trace(&ray, &scene, &never, &mut rng));

        for (seed, config) in [(2, &early), (3, &default)] {
            let mut rng = StdRng::seed_from_u64(seed);
            let estimate = average(samples, || trace(&ray, &scene, config, &mut rng));
            let error = (estimate - reference).abs().max_element();
            assert!(
                error < 0.01,
                "roulette depth {}: {estimate} vs {reference}",
                config.roulette_depth
            );
        }
    }

    #[test]
    fn test_diffuse_sphere_under_light() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut rng = StdRng::seed_from_u64(42);
        let config = RenderConfig::default();
        let scene = Scene::from_objects(vec![
            SceneObject::sphere("white", Vec3::ZERO, 1.0, Color::ZERO, Color::ONE, Material::Diffuse),
            SceneObject::sphere(
                "light",
                Vec3::new(0.0, 5.0, 0.0),
                1.5,
                Color::new(1.0, 0.9, 0.7),
                Color::ONE,
                Material::Diffuse,
            ),
        ]);

        let origin = Vec3::new(0.0, 4.0, 4.0);
        let ray = Ray::primary(origin, (-origin).normalize());
        assert_eq!(scene.intersect(&ray).map(|hit| hit.index), Some(0));

        let mean = average(4_000, || {
            let radiance = trace(&ray, &scene, &config, &mut rng);
            assert!(radiance.is_finite());
            radiance
        });
        log::debug!("diffuse sphere radiance: {mean}");

        let clamped = mean.clamp(Color::ZERO, Color::ONE);
        assert!(clamped.min_element() > 0.0, "{mean}");
        assert!(clamped.max_element() <= 1.0);
    }
}
