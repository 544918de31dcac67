use glint_math::{Plane, Point, Vector};

/// A triangle owning its three vertices.
///
/// `material` indexes into the materials of the model that owns the triangle.
/// The normal follows the winding `(b - a) x (c - a)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
    pub material: u8,
}

impl Triangle {
    pub fn new(a: Point, b: Point, c: Point, material: u8) -> Self {
        Self { a, b, c, material }
    }

    /// Unit normal of the supporting plane. Degenerate triangles yield the
    /// zero vector.
    pub fn normal(&self) -> Vector {
        let n = self.plane().normal();
        if n.norm_squared() == 0.0 {
            Vector::ZERO
        } else {
            n.normalize()
        }
    }

    pub fn centroid(&self) -> Point {
        Point::new(
            (self.a.x + self.b.x + self.c.x) / 3.0,
            (self.a.y + self.b.y + self.c.y) / 3.0,
            (self.a.z + self.b.z + self.c.z) / 3.0,
        )
    }

    pub fn vertices(&self) -> [Point; 3] {
        [self.a, self.b, self.c]
    }

    /// Move every vertex by `v`.
    pub fn translate(&mut self, v: Vector) {
        self.a = self.a + v;
        self.b = self.b + v;
        self.c = self.c + v;
    }

    /// Supporting plane of the triangle.
    pub fn plane(&self) -> Plane {
        Plane::from_points(self.a, self.b, self.c)
    }
}
