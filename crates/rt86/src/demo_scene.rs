//! The reference scene: a grey ground, one large mirror, and a jittered
//! grid of small random spheres.

use rand::RngCore;
use rt86_math::{random_vec3, random_vec3_range, uniform, uniform_range};
use rt86_renderer::{
    dielectric, diffuse, metallic, Color, MaterialHandle, Scene, SceneError, Sphere, Vec3,
};

const SMALL_RADIUS: f64 = 0.2;

/// Small spheres closer than this to the mirror's base are skipped.
const MIRROR_CLEARANCE: f64 = 0.9;

pub fn reference_scene(rng: &mut dyn RngCore) -> Result<Scene, SceneError> {
    let mut scene = Scene::with_capacity(10)?;

    scene.add(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        diffuse(Color::splat(0.5)),
    ))?;

    scene.add(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        metallic(Color::new(0.7, 0.6, 0.5), 0.0),
    ))?;

    // Glass is shared; the other small-sphere materials are unique
    let glass = dielectric(1.5);
    let mirror_base = Vec3::new(4.0, SMALL_RADIUS, 0.0);

    for a in -5..5 {
        for b in -5..5 {
            let choose_mat = uniform(rng);
            let center = Vec3::new(
                a as f64 + 0.9 * uniform(rng),
                SMALL_RADIUS,
                b as f64 + 0.9 * uniform(rng),
            );

            if (center - mirror_base).length() <= MIRROR_CLEARANCE {
                continue;
            }

            let material: MaterialHandle = if choose_mat < 0.8 {
                diffuse(random_vec3(rng) * random_vec3(rng))
            } else if choose_mat < 0.95 {
                metallic(random_vec3_range(rng, 0.5, 1.0), uniform_range(rng, 0.0, 0.5))
            } else {
                glass.clone()
            };
            scene.add(Sphere::new(center, SMALL_RADIUS, material))?;
        }
    }

    Ok(scene)
}
