use crate::{Point, Vector};

/// Plane `a x + b y + c z + d = 0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plane {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Plane {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Plane through `point` with the given (not necessarily unit) normal.
    pub fn from_point_normal(point: Point, normal: Vector) -> Self {
        let d = -(normal.x() * point.x + normal.y() * point.y + normal.z() * point.z);
        Self::new(normal.x(), normal.y(), normal.z(), d)
    }

    /// Plane through three points, oriented by `(b - a) x (c - a)`.
    pub fn from_points(a: Point, b: Point, c: Point) -> Self {
        let normal = (b - a).cross(c - a);
        Self::from_point_normal(a, normal)
    }

    /// The plane normal `(a, b, c)`.
    pub fn normal(&self) -> Vector {
        Vector::new(self.a, self.b, self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_from_points() {
        let plane = Plane::from_points(
            Point::new(0.0, 0.0, 2.0),
            Point::new(1.0, 0.0, 2.0),
            Point::new(0.0, 1.0, 2.0),
        );
        assert_eq!(plane, Plane::new(0.0, 0.0, 1.0, -2.0));
        assert_eq!(plane.normal(), Vector::Z);

        let tilted =
            Plane::from_point_normal(Point::new(1.0, 1.0, 0.0), Vector::new(2.0, 0.0, 0.0));
        assert_eq!(tilted.d, -2.0);
    }
}
