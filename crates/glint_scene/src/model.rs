//! Triangle models and their builders.
//!
//! A model owns its triangles and materials. Every builder computes a center
//! and a bounding radius that encloses all vertices, which the tracer uses to
//! reject rays before testing individual triangles.

use std::f64::consts::PI;

use glint_math::{Point, Vector};

use crate::{Light, Material, SceneError, SceneResult, Triangle};

/// Latitude divisions of a tessellated sphere.
pub const SPHERE_LAT_DIVS: usize = 20;
/// Longitude divisions of a tessellated sphere.
pub const SPHERE_LON_DIVS: usize = 20;

/// Maximum number of materials a model can index with a `u8` slot.
pub const MAX_MATERIALS: usize = 256;

/// How the tracer intersects a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Triangle mesh, tested triangle by triangle.
    Generic,
    /// Analytic sphere of radius `bounding_radius` around `center`.
    Sphere,
    /// Emissive sphere standing in for the light source.
    Light,
}

#[derive(Debug, Clone)]
pub struct Model {
    materials: Vec<Material>,
    triangles: Vec<Triangle>,
    center: Point,
    bounding_radius: f64,
    kind: ModelKind,
    /// Viewpoint the triangles are currently sorted for, if any
    sort_origin: Option<Point>,
}

impl Model {
    /// Generic mesh from triangles and the materials they index.
    ///
    /// The center is the mean of all vertices and the bounding radius the
    /// largest vertex distance from it. An empty material list gets a single
    /// default material.
    ///
    /// # Panics
    ///
    /// Panics if a triangle references a material slot that does not exist.
    pub fn from_triangles(
        triangles: Vec<Triangle>,
        mut materials: Vec<Material>,
    ) -> SceneResult<Self> {
        if triangles.is_empty() {
            return Err(SceneError::NoGeometry("model has no triangles".to_string()));
        }
        if materials.len() > MAX_MATERIALS {
            return Err(SceneError::TooManyMaterials(materials.len()));
        }
        if materials.is_empty() {
            materials.push(Material::default());
        }

        assert!(
            triangles
                .iter()
                .all(|t| (t.material as usize) < materials.len()),
            "triangle material slot out of range ({} materials)",
            materials.len()
        );

        let vertices: Vec<Point> = triangles.iter().flat_map(|t| t.vertices()).collect();
        let center = Point::centroid(&vertices).unwrap_or(Point::ORIGIN);
        let bounding_radius = vertices
            .iter()
            .map(|v| v.distance(&center))
            .fold(0.0, f64::max);

        log::debug!(
            "Built model: {} triangles, {} materials, radius {:.3}",
            triangles.len(),
            materials.len(),
            bounding_radius
        );

        Ok(Self {
            materials,
            triangles,
            center,
            bounding_radius,
            kind: ModelKind::Generic,
            sort_origin: None,
        })
    }

    /// Sphere intersected analytically.
    ///
    /// The surface is also tessellated into `SPHERE_LAT_DIVS` by
    /// `SPHERE_LON_DIVS` cells so it can be exported and sorted like a mesh.
    pub fn sphere(center: Point, radius: f64, material: Material) -> Self {
        let mut points = Vec::with_capacity((SPHERE_LAT_DIVS + 1) * SPHERE_LON_DIVS);
        for i in 0..=SPHERE_LAT_DIVS {
            // Polar angle from 0 to PI
            let theta = PI * i as f64 / SPHERE_LAT_DIVS as f64;
            for j in 0..SPHERE_LON_DIVS {
                let phi = 2.0 * PI * j as f64 / SPHERE_LON_DIVS as f64;
                points.push(Point::new(
                    center.x + radius * theta.sin() * phi.cos(),
                    center.y + radius * theta.sin() * phi.sin(),
                    center.z + radius * theta.cos(),
                ));
            }
        }

        let mut triangles = Vec::with_capacity(SPHERE_LAT_DIVS * SPHERE_LON_DIVS * 2);
        for i in 0..SPHERE_LAT_DIVS {
            for j in 0..SPHERE_LON_DIVS {
                let curr = i * SPHERE_LON_DIVS + j;
                let next = curr + SPHERE_LON_DIVS;
                let right = (j + 1) % SPHERE_LON_DIVS;
                let curr_right = i * SPHERE_LON_DIVS + right;
                let next_right = (i + 1) * SPHERE_LON_DIVS + right;

                triangles.push(Triangle::new(
                    points[curr],
                    points[next],
                    points[next_right],
                    0,
                ));
                triangles.push(Triangle::new(
                    points[curr],
                    points[next_right],
                    points[curr_right],
                    0,
                ));
            }
        }

        Self {
            materials: vec![material],
            triangles,
            center,
            bounding_radius: radius,
            kind: ModelKind::Sphere,
            sort_origin: None,
        }
    }

    /// Emissive sphere wrapping a light source.
    pub fn light(light: &Light) -> Self {
        let mut model = Self::sphere(light.position, light.radius, Material::diffuse(light.color));
        model.kind = ModelKind::Light;
        model
    }

    /// Rectangle in a plane of constant z, spanning `width` along x and
    /// `height` along y from `origin`.
    pub fn rect_xy(origin: Point, width: f64, height: f64, material: Material) -> Self {
        let Point { x, y, z } = origin;
        let p1 = Point::new(x + width, y, z);
        let p2 = Point::new(x, y + height, z);
        let p3 = Point::new(x + width, y + height, z);

        Self::rectangle(
            [
                Triangle::new(origin, p1, p2, 0),
                Triangle::new(p1, p2, p3, 0),
            ],
            Point::new(x + width / 2.0, y + height / 2.0, z),
            width,
            height,
            material,
        )
    }

    /// Rectangle in a plane of constant y, spanning `width` along x and
    /// `height` along z from `origin`.
    pub fn rect_xz(origin: Point, width: f64, height: f64, material: Material) -> Self {
        let Point { x, y, z } = origin;
        let p1 = Point::new(x + width, y, z);
        let p2 = Point::new(x, y, z + height);
        let p3 = Point::new(x + width, y, z + height);

        Self::rectangle(
            [
                Triangle::new(origin, p2, p1, 0),
                Triangle::new(p1, p2, p3, 0),
            ],
            Point::new(x + width / 2.0, y, z + height / 2.0),
            width,
            height,
            material,
        )
    }

    /// Rectangle in a plane of constant x, spanning `width` along z and
    /// `height` along y from `origin`.
    pub fn rect_yz(origin: Point, width: f64, height: f64, material: Material) -> Self {
        let Point { x, y, z } = origin;
        let p1 = Point::new(x, y, z + width);
        let p2 = Point::new(x, y + height, z);
        let p3 = Point::new(x, y + height, z + width);

        Self::rectangle(
            [
                Triangle::new(origin, p1, p2, 0),
                Triangle::new(p1, p2, p3, 0),
            ],
            Point::new(x, y + height / 2.0, z + width / 2.0),
            width,
            height,
            material,
        )
    }

    fn rectangle(
        triangles: [Triangle; 2],
        center: Point,
        width: f64,
        height: f64,
        material: Material,
    ) -> Self {
        Self {
            materials: vec![material],
            triangles: triangles.to_vec(),
            center,
            bounding_radius: (width / 2.0).hypot(height / 2.0),
            kind: ModelKind::Generic,
            sort_origin: None,
        }
    }

    /// Axis-aligned box with a corner at `origin`.
    pub fn cuboid(origin: Point, width: f64, height: f64, depth: f64, material: Material) -> Self {
        let Point { x, y, z } = origin;
        let points = [
            Point::new(x, y, z),
            Point::new(x + width, y, z),
            Point::new(x, y + height, z),
            Point::new(x + width, y + height, z),
            Point::new(x, y, z + depth),
            Point::new(x + width, y, z + depth),
            Point::new(x, y + height, z + depth),
            Point::new(x + width, y + height, z + depth),
        ];

        // Two triangles per face: front, back, left, right, bottom, top
        const FACES: [[usize; 3]; 12] = [
            [0, 1, 2],
            [1, 2, 3],
            [4, 5, 6],
            [5, 6, 7],
            [0, 2, 4],
            [2, 4, 6],
            [1, 5, 7],
            [1, 3, 7],
            [0, 1, 4],
            [5, 4, 1],
            [2, 3, 6],
            [3, 6, 7],
        ];

        let triangles = FACES
            .iter()
            .map(|f| Triangle::new(points[f[0]], points[f[1]], points[f[2]], 0))
            .collect();

        Self {
            materials: vec![material],
            triangles,
            center: Point::new(x + width / 2.0, y + height / 2.0, z + depth / 2.0),
            bounding_radius: (width * width + height * height + depth * depth).sqrt() / 2.0,
            kind: ModelKind::Generic,
            sort_origin: None,
        }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn bounding_radius(&self) -> f64 {
        self.bounding_radius
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Material in slot `index`.
    ///
    /// # Panics
    ///
    /// Panics if the slot does not exist.
    #[inline]
    pub fn material(&self, index: u8) -> &Material {
        &self.materials[index as usize]
    }

    /// Viewpoint the triangles were last sorted for.
    pub fn sort_origin(&self) -> Option<Point> {
        self.sort_origin
    }

    /// Replace every material with `material`.
    pub fn set_material(&mut self, material: Material) {
        self.materials.clear();
        self.materials.push(material);
        for t in &mut self.triangles {
            t.material = 0;
        }
    }

    /// Move the model by `v`. Any triangle sort order is forgotten.
    pub fn translate(&mut self, v: Vector) {
        self.center = self.center + v;
        for t in &mut self.triangles {
            t.translate(v);
        }
        self.sort_origin = None;
    }

    /// Scale the model about its center. Negative factors are ignored.
    pub fn scale(&mut self, factor: f64) {
        if factor.is_nan() || factor < 0.0 {
            log::warn!("Ignoring invalid scale factor {}", factor);
            return;
        }

        let center = self.center;
        let scale_point = |p: Point| center + (p - center).scale(factor);
        for t in &mut self.triangles {
            t.a = scale_point(t.a);
            t.b = scale_point(t.b);
            t.c = scale_point(t.c);
        }
        self.bounding_radius *= factor;
        self.sort_origin = None;
    }

    /// Sort triangles by the squared distance from `viewpoint` to their
    /// centroids, nearest first.
    pub fn sort_triangles(&mut self, viewpoint: Point) {
        let mut keyed: Vec<(f64, Triangle)> = self
            .triangles
            .iter()
            .map(|t| (t.centroid().distance_squared(&viewpoint), *t))
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

        self.triangles = keyed.into_iter().map(|(_, t)| t).collect();
        self.sort_origin = Some(viewpoint);
    }

    /// Approximate heap and inline size in bytes.
    pub fn memory_footprint(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.triangles.capacity() * std::mem::size_of::<Triangle>()
            + self.materials.capacity() * std::mem::size_of::<Material>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn assert_enclosed(model: &Model) {
        for t in model.triangles() {
            for v in t.vertices() {
                assert!(
                    v.distance(&model.center()) <= model.bounding_radius() + 1e-9,
                    "vertex {:?} outside bounding radius",
                    v
                );
            }
        }
    }

    #[test]
    fn test_sphere_tessellation() {
        let sphere = Model::sphere(Point::new(1.0, 2.0, 3.0), 5.0, Material::default());
        assert_eq!(sphere.kind(), ModelKind::Sphere);
        assert_eq!(sphere.triangles().len(), SPHERE_LAT_DIVS * SPHERE_LON_DIVS * 2);
        assert_eq!(sphere.bounding_radius(), 5.0);
        for t in sphere.triangles() {
            for v in t.vertices() {
                assert!((v.distance(&sphere.center()) - 5.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_rectangles() {
        let xy = Model::rect_xy(Point::ORIGIN, 4.0, 2.0, Material::default());
        assert_eq!(xy.center(), Point::new(2.0, 1.0, 0.0));
        assert_eq!(xy.triangles().len(), 2);
        assert!((xy.bounding_radius() - 5.0_f64.sqrt()).abs() < 1e-12);
        assert_enclosed(&xy);

        let xz = Model::rect_xz(Point::ORIGIN, 4.0, 2.0, Material::default());
        assert_eq!(xz.center(), Point::new(2.0, 0.0, 1.0));
        assert_enclosed(&xz);

        let yz = Model::rect_yz(Point::ORIGIN, 4.0, 2.0, Material::default());
        assert_eq!(yz.center(), Point::new(0.0, 1.0, 2.0));
        assert_enclosed(&yz);
        for t in yz.triangles() {
            assert_eq!(t.normal().y(), 0.0);
            assert_eq!(t.normal().z(), 0.0);
        }
    }

    #[test]
    fn test_cuboid() {
        let cube = Model::cuboid(Point::ORIGIN, 2.0, 2.0, 2.0, Material::default());
        assert_eq!(cube.triangles().len(), 12);
        assert_eq!(cube.center(), Point::new(1.0, 1.0, 1.0));
        assert!((cube.bounding_radius() - 3.0_f64.sqrt()).abs() < 1e-12);
        assert_enclosed(&cube);
    }

    #[test]
    fn test_from_triangles() {
        let tris = vec![
            Triangle::new(
                Point::new(-1.0, 0.0, 0.0),
                Point::new(1.0, 0.0, 0.0),
                Point::new(0.0, 3.0, 0.0),
                1,
            ),
            Triangle::new(
                Point::new(-1.0, 0.0, 0.0),
                Point::new(1.0, 0.0, 0.0),
                Point::new(0.0, -3.0, 0.0),
                0,
            ),
        ];
        let model = Model::from_triangles(
            tris,
            vec![Material::diffuse(Color::RED), Material::diffuse(Color::BLUE)],
        )
        .unwrap();

        assert_eq!(model.kind(), ModelKind::Generic);
        assert!(model.center().approx_eq(&Point::ORIGIN, 1e-12));
        assert_eq!(model.bounding_radius(), 3.0);
        assert_eq!(model.material(model.triangles()[0].material).diffuse, Color::BLUE);
        assert_enclosed(&model);
    }

    #[test]
    fn test_from_triangles_errors() {
        assert!(matches!(
            Model::from_triangles(Vec::new(), Vec::new()),
            Err(SceneError::NoGeometry(_))
        ));

        let tri = Triangle::new(
            Point::ORIGIN,
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            0,
        );
        let materials = vec![Material::default(); MAX_MATERIALS + 1];
        assert!(matches!(
            Model::from_triangles(vec![tri], materials),
            Err(SceneError::TooManyMaterials(257))
        ));

        // An empty material list gets a default slot
        let model = Model::from_triangles(vec![tri], Vec::new()).unwrap();
        assert_eq!(model.materials().len(), 1);
    }

    #[test]
    #[should_panic]
    fn test_from_triangles_bad_slot() {
        let tri = Triangle::new(
            Point::ORIGIN,
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            3,
        );
        let _ = Model::from_triangles(vec![tri], vec![Material::default()]);
    }

    #[test]
    fn test_translate() {
        let mut rect = Model::rect_xy(Point::ORIGIN, 2.0, 2.0, Material::default());
        rect.sort_triangles(Point::new(0.0, 0.0, 10.0));
        rect.translate(Vector::new(0.0, 0.0, -5.0));

        assert_eq!(rect.center(), Point::new(1.0, 1.0, -5.0));
        assert_eq!(rect.triangles()[0].a.z, -5.0);
        assert_eq!(rect.sort_origin(), None);
        assert_enclosed(&rect);
    }

    #[test]
    fn test_scale() {
        let mut cube = Model::cuboid(Point::ORIGIN, 2.0, 2.0, 2.0, Material::default());
        let radius = cube.bounding_radius();
        cube.scale(2.0);
        assert!((cube.bounding_radius() - 2.0 * radius).abs() < 1e-12);
        assert_eq!(cube.center(), Point::new(1.0, 1.0, 1.0));
        assert_enclosed(&cube);

        let before = cube.triangles().to_vec();
        cube.scale(-1.0);
        assert_eq!(cube.triangles(), before.as_slice());
    }

    #[test]
    fn test_sort_triangles() {
        let mut cube = Model::cuboid(Point::ORIGIN, 2.0, 2.0, 2.0, Material::default());
        let eye = Point::new(1.0, 1.0, 10.0);
        cube.sort_triangles(eye);

        let distances: Vec<f64> = cube
            .triangles()
            .iter()
            .map(|t| t.centroid().distance_squared(&eye))
            .collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(cube.sort_origin(), Some(eye));
    }

    #[test]
    fn test_light_model() {
        let light = Light::new(Point::new(0.0, 5.0, 0.0), 1.0, Color::YELLOW).unwrap();
        let model = Model::light(&light);
        assert_eq!(model.kind(), ModelKind::Light);
        assert_eq!(model.material(0).diffuse, Color::YELLOW);
        assert_eq!(model.bounding_radius(), 1.0);
        assert!(model.memory_footprint() > std::mem::size_of::<Model>());
    }
}
