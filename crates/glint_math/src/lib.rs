//! Geometry kernel for glint.
//!
//! Value types only: vectors with a cached squared norm, points, rays
//! (lines with an origin and a direction), planes and scalar intervals.

// Re-export glam for crates that need raw component math
pub use glam::DVec3;

mod interval;
mod plane;
mod ray;
mod vector;

pub use interval::Interval;
pub use plane::Plane;
pub use ray::Ray;
pub use vector::{Point, Vector};

/// Tolerance used for approximate comparisons throughout the kernel.
pub const EPSILON: f64 = 1e-9;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_vector_round_trip() {
        let a = Point::new(1.0, 2.0, 3.0);
        let b = Point::new(4.0, 6.0, 3.0);
        let v = Vector::from_points(a, b);

        assert_eq!(v.norm_squared(), 25.0);
        assert_eq!(a + v, b);
    }
}
