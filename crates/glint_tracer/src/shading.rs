//! Local shading: shadow factors and the Phong diffuse/specular terms.

use std::f64::consts::TAU;

use glint_math::{Point, Ray, Vector};
use glint_scene::material::{AMBIENT_STRENGTH, SPECULAR_EXPONENT};
use glint_scene::{Color, Light, Material, Model, ModelKind, Scene};
use rand::RngCore;

use crate::intersect::intersect_model;
use crate::random::sample_disk;
use crate::tracer::TraceStats;

/// Lowest shadow factor; fully shadowed surfaces are never black.
pub const SHADOW_FLOOR: f64 = 0.1;

/// Offset of shadow ray origins along the surface normal.
pub const SHADOW_BIAS: f64 = 1e-3;

/// Monte Carlo samples taken on an area light once it might be occluded.
pub const SHADOW_SAMPLES: usize = 20;

/// Silhouette points tested before sampling an area light.
pub const SILHOUETTE_CHECKS: usize = 8;

/// Silhouette points sit this far out relative to the light radius.
const SILHOUETTE_SCALE: f64 = 1.2;

/// Slack on the occluder-vs-light distance comparison.
const OCCLUSION_SLACK: f64 = 1e-5;

/// True if some model other than `near` (and any light sphere) blocks the
/// segment from `origin` to `light_point`.
pub fn is_in_shadow(
    scene: &Scene,
    near: &Model,
    origin: Point,
    light_point: Point,
    stats: &mut TraceStats,
) -> bool {
    stats.shadow_rays += 1;
    let shadow_ray = Ray::between(origin, light_point);
    let light_distance = light_point.distance_squared(&origin);

    scene
        .models()
        .iter()
        .filter(|m| !std::ptr::eq(*m, near) && m.kind() != ModelKind::Light)
        .filter_map(|m| intersect_model(&shadow_ray, m))
        .any(|hit| hit.point.distance_squared(&origin) < light_distance - OCCLUSION_SLACK)
}

/// Fraction of the light visible from `point`, in `[SHADOW_FLOOR, 1]`.
///
/// Point lights give a binary answer. Area lights first check
/// `SILHOUETTE_CHECKS` points just outside their rim; only if one of those is
/// blocked are `SHADOW_SAMPLES` random disk samples traced.
pub fn shadow_factor(
    scene: &Scene,
    near: &Model,
    point: Point,
    normal: Vector,
    to_light: Vector,
    rng: &mut dyn RngCore,
    stats: &mut TraceStats,
) -> f64 {
    let light = scene.light();
    let origin = point + normal * SHADOW_BIAS;

    let factor = if light.radius > 0.0 {
        area_light_visibility(scene, light, near, origin, to_light, rng, stats)
    } else if is_in_shadow(scene, near, origin, light.position, stats) {
        0.0
    } else {
        1.0
    };

    factor.max(SHADOW_FLOOR)
}

fn area_light_visibility(
    scene: &Scene,
    light: &Light,
    near: &Model,
    origin: Point,
    to_light: Vector,
    rng: &mut dyn RngCore,
    stats: &mut TraceStats,
) -> f64 {
    let axis = to_light.perpendicular().normalize();

    let step = TAU / SILHOUETTE_CHECKS as f64;
    let mut rim = axis * (light.radius * SILHOUETTE_SCALE);
    let mut maybe_shadowed = false;
    for _ in 0..SILHOUETTE_CHECKS {
        rim = rim.rotate(to_light, step);
        if is_in_shadow(scene, near, origin, light.position + rim, stats) {
            maybe_shadowed = true;
            break;
        }
    }

    if !maybe_shadowed {
        return 1.0;
    }

    let mut occluded = 0usize;
    for _ in 0..SHADOW_SAMPLES {
        let (theta, r) = sample_disk(rng, light.radius);
        let sample = light.position + axis.rotate(to_light, theta) * r;
        if is_in_shadow(scene, near, origin, sample, stats) {
            occluded += 1;
        }
    }

    1.0 - occluded as f64 / SHADOW_SAMPLES as f64
}

/// Diffuse term: surface color modulated by the light color, scaled by
/// `max(AMBIENT_STRENGTH, n.l)` and the shadow factor.
pub fn diffuse(
    material: &Material,
    light: &Light,
    normal: Vector,
    to_light: Vector,
    shadow: f64,
) -> Color {
    let strength = normal.dot(to_light).max(AMBIENT_STRENGTH);
    material
        .diffuse
        .multiply(light.color)
        .scale(strength * shadow)
}

/// White Phong highlight of the light reflected about `normal`, seen along
/// `view`. Black unless the reflection points towards the viewer.
pub fn specular(
    material: &Material,
    normal: Vector,
    to_light: Vector,
    view: Vector,
    shadow: f64,
) -> Color {
    if material.shininess <= 0.0 {
        return Color::BLACK;
    }

    let reflected = (normal * (2.0 * normal.dot(to_light)) - to_light).normalize();
    let r_dot_v = reflected.dot(view);
    if r_dot_v <= 0.0 {
        return Color::BLACK;
    }
    Color::WHITE.scale(material.shininess * r_dot_v.powf(SPECULAR_EXPONENT) * shadow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_scene::Camera;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scene_with(light_radius: f64, blocker: Model) -> Scene {
        let camera = Camera::looking_down_z(Point::new(0.0, 5.0, 30.0), 1.0).unwrap();
        let light = Light::new(Point::new(0.0, 20.0, 0.0), light_radius, Color::WHITE).unwrap();
        let floor = Model::rect_xz(
            Point::new(-50.0, 0.0, -50.0),
            100.0,
            100.0,
            Material::default(),
        );

        let mut scene = Scene::new(camera, light);
        scene.fill(light, vec![floor, blocker]);
        scene
    }

    // Square blocker centered over the origin, halfway up to the light
    fn scene_with_blocker(light_radius: f64, blocker_size: f64) -> Scene {
        let half = blocker_size / 2.0;
        let blocker = Model::rect_xz(
            Point::new(-half, 10.0, -half),
            blocker_size,
            blocker_size,
            Material::default(),
        );
        scene_with(light_radius, blocker)
    }

    fn floor_shadow(scene: &Scene, at: Point, seed: u64) -> f64 {
        let floor = &scene.models()[0];
        let to_light = (scene.light().position - at).normalize();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut stats = TraceStats::default();
        shadow_factor(scene, floor, at, Vector::Y, to_light, &mut rng, &mut stats)
    }

    #[test]
    fn test_point_light_fully_occluded_hits_floor() {
        let scene = scene_with_blocker(0.0, 4.0);
        assert_eq!(floor_shadow(&scene, Point::new(0.3, 0.0, 0.2), 1), SHADOW_FLOOR);
        assert_eq!(floor_shadow(&scene, Point::new(30.0, 0.0, 0.2), 1), 1.0);
    }

    #[test]
    fn test_area_light_umbra_and_lit_region() {
        // Blocker much wider than the light: the center is in full umbra
        let scene = scene_with_blocker(1.0, 20.0);
        assert_eq!(floor_shadow(&scene, Point::new(0.3, 0.0, 0.2), 3), SHADOW_FLOOR);

        // Far from the blocker every silhouette check is clear
        assert_eq!(floor_shadow(&scene, Point::new(45.0, 0.0, 45.0), 3), 1.0);
    }

    #[test]
    fn test_area_light_penumbra() {
        // Blocker covering only the -x half of the light as seen from the floor
        let blocker = Model::rect_xz(
            Point::new(-20.0, 10.0, -10.0),
            20.0,
            20.0,
            Material::default(),
        );
        let scene = scene_with(2.0, blocker);
        let factor = floor_shadow(&scene, Point::new(0.3, 0.0, 0.2), 11);
        assert!(factor > SHADOW_FLOOR && factor < 1.0, "factor {}", factor);
    }

    #[test]
    fn test_light_sphere_and_self_do_not_shadow() {
        let scene = scene_with_blocker(0.0, 4.0);
        let blocker = &scene.models()[1];
        // Point on top of the blocker, which is skipped as the near model
        let top = Point::new(0.0, 10.0, 0.0);
        let to_light = (scene.light().position - top).normalize();
        let mut rng = StdRng::seed_from_u64(5);
        let mut stats = TraceStats::default();
        let factor = shadow_factor(&scene, blocker, top, Vector::Y, to_light, &mut rng, &mut stats);
        assert_eq!(factor, 1.0);
        assert!(stats.shadow_rays >= 1);
    }

    #[test]
    fn test_diffuse_floor_and_full_strength() {
        let m = Material::diffuse(Color::RED);
        let light = Light::new(Point::ORIGIN, 0.0, Color::WHITE).unwrap();

        let lit = diffuse(&m, &light, Vector::Y, Vector::Y, 1.0);
        assert_eq!(lit, Color::RED);

        // Facing away clamps to the ambient strength
        let away = diffuse(&m, &light, Vector::Y, -Vector::Y, 1.0);
        assert_eq!(away, Color::RED.scale(0.1));

        let tinted = Light::new(Point::ORIGIN, 0.0, Color::new(0x808080)).unwrap();
        assert_eq!(
            diffuse(&m, &tinted, Vector::Y, Vector::Y, 1.0),
            Color::from_channels(128, 0, 0)
        );
    }

    #[test]
    fn test_specular_highlight() {
        let shiny = Material::new(Color::RED, 0.0, 1.0);
        // Mirror configuration: view along the reflected light
        let l = Vector::new(1.0, 1.0, 0.0).normalize();
        let view = Vector::new(-1.0, 1.0, 0.0).normalize();
        let highlight = specular(&shiny, Vector::Y, l, view, 1.0);
        assert!(highlight.r() >= 254 && highlight.r() == highlight.b());

        // Away from the reflection the highlight falls off sharply
        let off = specular(&shiny, Vector::Y, l, Vector::Y, 1.0);
        assert!(off.r() < 10);

        // Reflection pointing away from the viewer
        assert_eq!(specular(&shiny, Vector::Y, l, -view, 1.0), Color::BLACK);

        let dull = Material::diffuse(Color::RED);
        assert_eq!(specular(&dull, Vector::Y, l, view, 1.0), Color::BLACK);
    }
}
