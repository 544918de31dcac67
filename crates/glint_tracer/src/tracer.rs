//! Recursive Whitted tracer.
//!
//! Each call finds the nearest hit over all models, shades it against the
//! scene's single light and, for reflective materials with depth budget
//! left, follows exactly one mirror bounce.

use glint_math::Ray;
use glint_scene::{Color, Model, ModelKind, Scene};
use rand::RngCore;

use crate::camera::PrimaryRay;
use crate::intersect::{intersect_model, intersect_model_primary, Hit};
use crate::shading::{diffuse, shadow_factor, specular};

/// Deepest reflection bounce followed.
pub const MAX_DEPTH: u32 = 3;

/// Sky color returned for rays that hit nothing, before light tinting.
pub const BACKGROUND: Color = Color::new(0xA7ECFF);

/// Offset of reflection ray origins along the oriented normal.
pub const REFLECTION_BIAS: f64 = 1e-5;

/// Fraction of the reflected color a mirror passes on.
pub const REFLECTANCE: f64 = 0.95;

/// Counters gathered while tracing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Camera and reflection rays traced
    pub rays: u64,
    /// Shadow rays cast toward the light
    pub shadow_rays: u64,
    /// Deepest recursion level reached
    pub max_depth: u32,
}

impl TraceStats {
    pub fn merge(&mut self, other: &TraceStats) {
        self.rays += other.rays;
        self.shadow_rays += other.shadow_rays;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceOptions {
    pub background: Color,
    pub max_depth: u32,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            background: BACKGROUND,
            max_depth: MAX_DEPTH,
        }
    }
}

/// Read-only view of a scene that turns rays into colors.
///
/// A `Tracer` borrows the scene immutably, so any number of render threads
/// can share one.
#[derive(Debug, Clone, Copy)]
pub struct Tracer<'a> {
    scene: &'a Scene,
    options: TraceOptions,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self::with_options(scene, TraceOptions::default())
    }

    pub fn with_options(scene: &'a Scene, options: TraceOptions) -> Self {
        Self { scene, options }
    }

    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    pub fn options(&self) -> &TraceOptions {
        &self.options
    }

    /// Color seen along an arbitrary ray.
    pub fn trace(&self, ray: &Ray, rng: &mut dyn RngCore, stats: &mut TraceStats) -> Color {
        self.trace_recursive(ray, 0, rng, stats)
    }

    /// Color seen along a camera ray.
    ///
    /// The first intersection may use the sorted-triangle fast path; every
    /// bounce after it scans models in full.
    pub fn trace_primary(
        &self,
        ray: &PrimaryRay,
        rng: &mut dyn RngCore,
        stats: &mut TraceStats,
    ) -> Color {
        stats.rays += 1;
        let hit = self.nearest_hit(ray.as_ray(), |model| intersect_model_primary(ray, model));
        self.shade(ray.as_ray(), hit, 0, rng, stats)
    }

    fn trace_recursive(
        &self,
        ray: &Ray,
        depth: u32,
        rng: &mut dyn RngCore,
        stats: &mut TraceStats,
    ) -> Color {
        stats.rays += 1;
        stats.max_depth = stats.max_depth.max(depth);
        let hit = self.nearest_hit(ray, |model| intersect_model(ray, model));
        self.shade(ray, hit, depth, rng, stats)
    }

    /// Linear scan over the scene's models keeping the closest hit.
    ///
    /// Once a hit is known, a model is skipped when its bounding sphere lies
    /// entirely past that hit along the ray.
    fn nearest_hit<F>(&self, ray: &Ray, intersect: F) -> Option<Hit<'a>>
    where
        F: Fn(&'a Model) -> Option<Hit<'a>>,
    {
        let mut nearest: Option<Hit<'a>> = None;

        for model in self.scene.models() {
            if let Some(best) = &nearest {
                let center = model.center();
                let radius = model.bounding_radius();
                let behind = (best.point - center).dot(ray.direction) < 0.0;
                if behind && center.distance_squared(&best.point) > radius * radius {
                    continue;
                }
            }

            if let Some(hit) = intersect(model) {
                if nearest.map_or(true, |best| hit.distance_squared < best.distance_squared) {
                    nearest = Some(hit);
                }
            }
        }

        nearest
    }

    fn shade(
        &self,
        ray: &Ray,
        hit: Option<Hit<'a>>,
        depth: u32,
        rng: &mut dyn RngCore,
        stats: &mut TraceStats,
    ) -> Color {
        let light = self.scene.light();

        let Some(hit) = hit else {
            return self.options.background.multiply(light.color);
        };
        if hit.model.kind() == ModelKind::Light {
            return light.color;
        }

        let normal = if hit.normal.dot(ray.direction) > 0.0 {
            -hit.normal
        } else {
            hit.normal
        };

        let towards_light = light.position - hit.point;
        let light_distance = towards_light.norm();
        let to_light = if light_distance > 0.0 {
            towards_light.normalize()
        } else {
            normal
        };

        let shadow = shadow_factor(
            self.scene,
            hit.model,
            hit.point,
            normal,
            to_light,
            rng,
            stats,
        );

        let mut color = diffuse(hit.material, light, normal, to_light, shadow);

        if hit.material.is_reflective() && depth < self.options.max_depth {
            let bounce = Ray::new(
                hit.point + normal * REFLECTION_BIAS,
                ray.direction.reflect(normal),
            );
            let reflected = self
                .trace_recursive(&bounce, depth + 1, rng, stats)
                .scale(REFLECTANCE);
            color = color.blend(reflected, hit.material.reflexivity);
        }

        let view = -ray.direction.normalize();
        color = color.add(specular(hit.material, normal, to_light, view, shadow));

        color.scale(light.attenuation.factor(light_distance))
    }
}

/// Color seen along `ray`, sampling area lights with the thread-local RNG.
pub fn trace_ray(scene: &Scene, ray: &Ray) -> Color {
    trace_ray_with_rng(scene, ray, &mut rand::thread_rng())
}

pub fn trace_ray_with_rng(scene: &Scene, ray: &Ray, rng: &mut dyn RngCore) -> Color {
    let mut stats = TraceStats::default();
    Tracer::new(scene).trace(ray, rng, &mut stats)
}
