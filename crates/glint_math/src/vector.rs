//! Vectors and points.
//!
//! `Vector` caches its squared norm; every constructor and derived vector
//! recomputes it. `Point` is a plain position: translating a point always
//! yields a new point.

use glam::DVec3;
use std::ops::{Add, Mul, Neg, Sub};

/// A direction or displacement in 3D space.
///
/// Components are private so the cached squared norm can never go stale.
#[derive(Debug, Clone, Copy)]
pub struct Vector {
    x: f64,
    y: f64,
    z: f64,
    norm_squared: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        norm_squared: 0.0,
    };
    pub const X: Vector = Vector {
        x: 1.0,
        y: 0.0,
        z: 0.0,
        norm_squared: 1.0,
    };
    pub const Y: Vector = Vector {
        x: 0.0,
        y: 1.0,
        z: 0.0,
        norm_squared: 1.0,
    };
    pub const Z: Vector = Vector {
        x: 0.0,
        y: 0.0,
        z: 1.0,
        norm_squared: 1.0,
    };

    /// Create a vector from its components.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            norm_squared: x * x + y * y + z * z,
        }
    }

    /// The vector pointing from `a` to `b`.
    #[inline]
    pub fn from_points(a: Point, b: Point) -> Self {
        Self::from(b.as_dvec3() - a.as_dvec3())
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Cached squared length.
    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.norm_squared
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_squared.sqrt()
    }

    #[inline]
    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Unit vector with the same direction.
    ///
    /// The input must be nonzero. Debug builds assert this; release builds
    /// hand back the zero vector unchanged.
    pub fn normalize(self) -> Self {
        debug_assert!(self.norm_squared > 0.0, "cannot normalize a zero vector");
        if self.norm_squared == 0.0 {
            return Self::ZERO;
        }

        let norm = self.norm();
        Self {
            x: self.x / norm,
            y: self.y / norm,
            z: self.z / norm,
            norm_squared: 1.0,
        }
    }

    #[inline]
    pub fn scale(self, scalar: f64) -> Self {
        Self::from(self.as_dvec3() * scalar)
    }

    #[inline]
    pub fn dot(self, other: Vector) -> f64 {
        self.as_dvec3().dot(other.as_dvec3())
    }

    #[inline]
    pub fn cross(self, other: Vector) -> Self {
        Self::from(self.as_dvec3().cross(other.as_dvec3()))
    }

    /// An arbitrary vector perpendicular to `self` (not normalized).
    ///
    /// Crosses with the world X axis, or with the world Y axis when `self` is
    /// parallel to X.
    pub fn perpendicular(self) -> Self {
        let candidate = self.cross(Vector::X);
        if candidate.norm_squared <= crate::EPSILON * self.norm_squared.max(1.0) {
            self.cross(Vector::Y)
        } else {
            candidate
        }
    }

    /// Rotate by `angle` radians around `axis`.
    ///
    /// Computes `v cos(angle) + (v x axis) sin(angle)`, which is only a true
    /// rotation when `self` is perpendicular to `axis`. The axis does not need
    /// to be normalized.
    pub fn rotate(self, axis: Vector, angle: f64) -> Self {
        let axis = axis.normalize();
        self.scale(angle.cos()) + self.cross(axis).scale(angle.sin())
    }

    /// Mirror `self` about a unit normal: `v - 2 (v.n) n`.
    #[inline]
    pub fn reflect(self, normal: Vector) -> Self {
        self + normal.scale(-2.0 * self.dot(normal))
    }

    /// Component-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Vector, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }
}

impl Default for Vector {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Exact component equality; the cached norm is not compared.
impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }
}

impl From<DVec3> for Vector {
    #[inline]
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<[f64; 3]> for Vector {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl Add for Vector {
    type Output = Vector;

    #[inline]
    fn add(self, other: Vector) -> Vector {
        Vector::from(self.as_dvec3() + other.as_dvec3())
    }
}

impl Sub for Vector {
    type Output = Vector;

    #[inline]
    fn sub(self, other: Vector) -> Vector {
        Vector::from(self.as_dvec3() - other.as_dvec3())
    }
}

impl Neg for Vector {
    type Output = Vector;

    #[inline]
    fn neg(self) -> Vector {
        Vector {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            norm_squared: self.norm_squared,
        }
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    #[inline]
    fn mul(self, scalar: f64) -> Vector {
        self.scale(scalar)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    #[inline]
    fn mul(self, v: Vector) -> Vector {
        v.scale(self)
    }
}

/// A position in 3D space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    #[inline]
    pub fn distance_squared(&self, other: &Point) -> f64 {
        self.as_dvec3().distance_squared(other.as_dvec3())
    }

    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// A new point displaced by `v`.
    #[inline]
    pub fn translate(&self, v: Vector) -> Point {
        Point::from(self.as_dvec3() + v.as_dvec3())
    }

    /// Mean of a set of points, or `None` when the set is empty.
    pub fn centroid<'a, I>(points: I) -> Option<Point>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut sum = DVec3::ZERO;
        let mut count = 0usize;
        for p in points {
            sum += p.as_dvec3();
            count += 1;
        }

        if count == 0 {
            None
        } else {
            Some(Point::from(sum / count as f64))
        }
    }

    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }
}

impl From<DVec3> for Point {
    #[inline]
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<[f64; 3]> for Point {
    fn from(p: [f64; 3]) -> Self {
        Self::new(p[0], p[1], p[2])
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    #[inline]
    fn add(self, v: Vector) -> Point {
        self.translate(v)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    #[inline]
    fn sub(self, v: Vector) -> Point {
        self.translate(-v)
    }
}

/// Point difference: `b - a` is the vector from `a` to `b`.
impl Sub<Point> for Point {
    type Output = Vector;

    #[inline]
    fn sub(self, other: Point) -> Vector {
        Vector::from_points(other, self)
    }
}
