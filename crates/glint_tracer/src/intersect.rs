//! Ray intersection tests against triangles, spheres and whole models.

use glint_math::{Interval, Point, Ray, Vector};
use glint_scene::{Material, Model, ModelKind, Triangle};

use crate::camera::PrimaryRay;

/// Below this determinant the ray is treated as parallel to a triangle.
pub const PARALLEL_EPSILON: f64 = 1e-8;

/// Minimum ray parameter for a triangle hit.
pub const MIN_HIT_DISTANCE: f64 = 1e-6;

/// Tolerance when matching a primary ray origin against a sort origin.
const SORT_ORIGIN_TOLERANCE: f64 = 1e-9;

/// Record of a ray-model intersection.
#[derive(Clone, Copy)]
pub struct Hit<'a> {
    /// Point of intersection
    pub point: Point,
    /// Unit surface normal, not yet oriented against the ray
    pub normal: Vector,
    pub material: &'a Material,
    pub model: &'a Model,
    /// Squared distance from the ray origin
    pub distance_squared: f64,
}

impl<'a> Hit<'a> {
    /// True if this hit belongs to `model`.
    pub fn is_on(&self, model: &Model) -> bool {
        std::ptr::eq(self.model, model)
    }
}

impl std::fmt::Debug for Hit<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hit")
            .field("point", &self.point)
            .field("normal", &self.normal)
            .field("material", self.material)
            .field("kind", &self.model.kind())
            .field("distance_squared", &self.distance_squared)
            .finish()
    }
}

/// Möller–Trumbore ray-triangle test.
///
/// Returns the ray parameter of the hit. Hits closer than
/// `MIN_HIT_DISTANCE` along the ray are rejected.
pub fn ray_triangle(ray: &Ray, triangle: &Triangle) -> Option<f64> {
    let e1 = triangle.b - triangle.a;
    let e2 = triangle.c - triangle.a;

    let h = ray.direction.cross(e2);
    let det = e1.dot(h);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }

    let s = ray.origin - triangle.a;
    let u = s.dot(h) / det;
    if !Interval::UNIT.contains(u) {
        return None;
    }

    let q = s.cross(e1);
    let v = ray.direction.dot(q) / det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = e2.dot(q) / det;
    if t < MIN_HIT_DISTANCE {
        return None;
    }
    Some(t)
}

/// Ray-sphere test returning the smallest positive root.
pub fn ray_sphere(ray: &Ray, center: Point, radius: f64) -> Option<f64> {
    let l = ray.origin - center;
    let a = ray.direction.norm_squared();
    if a == 0.0 {
        return None;
    }
    let b = 2.0 * l.dot(ray.direction);
    let c = l.norm_squared() - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t1 = (-b - sqrt_d) / (2.0 * a);
    let t2 = (-b + sqrt_d) / (2.0 * a);

    if t1 > 0.0 {
        Some(t1)
    } else if t2 > 0.0 {
        Some(t2)
    } else {
        None
    }
}

/// True when the ray cannot touch the model's bounding sphere.
///
/// Rejects rays whose line passes farther than the bounding radius from the
/// center, and rays whose origin is past the sphere along the direction.
pub fn misses_bounds(ray: &Ray, model: &Model) -> bool {
    let center = model.center();
    let radius = model.bounding_radius();

    if ray.distance_to_point(center) > radius {
        return true;
    }

    let direction = ray.direction.normalize();
    let to_projection = ray.projection_point(center) - ray.origin;
    to_projection.dot(direction) + radius < 0.0
}

/// Nearest intersection of `ray` with `model`, scanning every triangle.
pub fn intersect_model<'a>(ray: &Ray, model: &'a Model) -> Option<Hit<'a>> {
    intersect(ray, model, false)
}

/// Nearest intersection of a camera ray with `model`.
///
/// When the model's triangles are sorted for this ray's origin the scan stops
/// at the first accepted triangle.
pub fn intersect_model_primary<'a>(ray: &PrimaryRay, model: &'a Model) -> Option<Hit<'a>> {
    let sorted_here = model
        .sort_origin()
        .is_some_and(|o| o.approx_eq(&ray.origin(), SORT_ORIGIN_TOLERANCE));
    intersect(ray.as_ray(), model, sorted_here)
}

fn intersect<'a>(ray: &Ray, model: &'a Model, first_hit: bool) -> Option<Hit<'a>> {
    match model.kind() {
        ModelKind::Sphere | ModelKind::Light => {
            let t = ray_sphere(ray, model.center(), model.bounding_radius())?;
            let point = ray.at(t);
            let outward = point - model.center();
            let normal = if outward.norm_squared() == 0.0 {
                -ray.direction.normalize()
            } else {
                outward.normalize()
            };
            Some(Hit {
                point,
                normal,
                material: model.material(0),
                model,
                distance_squared: point.distance_squared(&ray.origin),
            })
        }
        ModelKind::Generic => {
            if misses_bounds(ray, model) {
                return None;
            }

            let mut nearest: Option<(f64, Point, &Triangle)> = None;
            for triangle in model.triangles() {
                let Some(t) = ray_triangle(ray, triangle) else {
                    continue;
                };
                let point = ray.at(t);
                let d2 = point.distance_squared(&ray.origin);
                if nearest.map_or(true, |(best, _, _)| d2 < best) {
                    nearest = Some((d2, point, triangle));
                    if first_hit {
                        break;
                    }
                }
            }

            nearest.map(|(distance_squared, point, triangle)| Hit {
                point,
                normal: triangle.normal(),
                material: model.material(triangle.material),
                model,
                distance_squared,
            })
        }
    }
}
