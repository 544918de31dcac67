use crate::{Point, Vector};

/// A line in 3D space with an origin and a direction.
///
/// The direction is not required to be normalized; shadow rays carry the
/// full displacement towards the light sample.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point,
    pub direction: Vector,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self { origin, direction }
    }

    /// Ray from `from` towards `to`, direction left unnormalized.
    pub fn between(from: Point, to: Point) -> Self {
        Self::new(from, to - from)
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }

    /// Perpendicular distance from `p` to the infinite line through the ray.
    ///
    /// Returns 0 for points on the line and for degenerate (zero) directions.
    pub fn distance_to_point(&self, p: Point) -> f64 {
        let to_point = p - self.origin;
        // Normal of the plane that contains the line and is perpendicular to
        // the plane holding both the line and p
        let n = self.direction.cross(self.direction.cross(to_point));
        if n.norm_squared() == 0.0 {
            return 0.0;
        }
        to_point.dot(n).abs() / n.norm()
    }

    /// Orthogonal projection of `p` onto the line.
    pub fn projection_point(&self, p: Point) -> Point {
        let d2 = self.direction.norm_squared();
        if d2 == 0.0 {
            return self.origin;
        }
        let t = (p - self.origin).dot(self.direction) / d2;
        self.at(t)
    }
}
