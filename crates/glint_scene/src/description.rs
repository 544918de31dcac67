//! JSON scene descriptions.
//!
//! ```json
//! {
//!   "camera": { "position": [0, 0, 20], "front": [0, 0, -1], "up": [0, 1, 0], "fov_degrees": 60 },
//!   "light": { "position": [0, 10, 0], "radius": 1.5, "color": "#FFFFFF" },
//!   "materials": { "mirror": { "color": "#C0C0C0", "reflexivity": 1.0 } },
//!   "models": [
//!     { "type": "sphere", "center": [0, 0, 0], "radius": 5, "material": { "color": "#FF0000" } },
//!     { "type": "rect_xz", "origin": [-50, -5, -50], "width": 100, "height": 100, "material": "mirror" },
//!     { "type": "obj", "path": "teapot.obj", "translate": [10, 0, 0], "scale": 2 }
//!   ]
//! }
//! ```
//!
//! Colors are `"#RRGGBB"` strings, packed integers or `[r, g, b]` unit floats.
//! OBJ paths are resolved relative to the description file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use glint_math::{Point, Vector};

use crate::{obj, Camera, Color, Light, Material, Model, Scene, SceneError, SceneResult};

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColorDesc {
    Hex(String),
    Packed(u32),
    Rgb([f64; 3]),
}

impl ColorDesc {
    pub fn to_color(&self) -> SceneResult<Color> {
        match self {
            ColorDesc::Hex(s) => {
                let digits = s.trim_start_matches('#');
                if digits.len() != 6 {
                    return Err(SceneError::Configuration(format!("invalid color '{}'", s)));
                }
                u32::from_str_radix(digits, 16)
                    .map(Color::new)
                    .map_err(|_| SceneError::Configuration(format!("invalid color '{}'", s)))
            }
            ColorDesc::Packed(packed) => Ok(Color::new(*packed)),
            ColorDesc::Rgb([r, g, b]) => Ok(Color::from_rgb(*r, *g, *b)),
        }
    }
}

fn default_fov() -> f64 {
    90.0
}

fn default_up() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraDesc {
    pub position: [f64; 3],
    pub front: [f64; 3],
    #[serde(default = "default_up")]
    pub up: [f64; 3],
    #[serde(default = "default_fov")]
    pub fov_degrees: f64,
}

fn default_white() -> ColorDesc {
    ColorDesc::Packed(0xFFFFFF)
}

fn default_attenuation() -> [f64; 3] {
    [1.0, 0.0, 0.0]
}

#[derive(Debug, Clone, Deserialize)]
pub struct LightDesc {
    pub position: [f64; 3],
    #[serde(default)]
    pub radius: f64,
    #[serde(default = "default_white")]
    pub color: ColorDesc,
    /// `[constant, linear, quadratic]`
    #[serde(default = "default_attenuation")]
    pub attenuation: [f64; 3],
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaterialDesc {
    #[serde(default = "default_white")]
    pub color: ColorDesc,
    #[serde(default)]
    pub reflexivity: f64,
    #[serde(default)]
    pub shininess: f64,
}

impl MaterialDesc {
    pub fn to_material(&self) -> SceneResult<Material> {
        Ok(Material::new(
            self.color.to_color()?,
            self.reflexivity,
            self.shininess,
        ))
    }
}

/// A material given inline or by name from the `materials` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MaterialRef {
    Named(String),
    Inline(MaterialDesc),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDesc {
    Sphere {
        center: [f64; 3],
        radius: f64,
    },
    Box {
        origin: [f64; 3],
        width: f64,
        height: f64,
        depth: f64,
    },
    RectXy {
        origin: [f64; 3],
        width: f64,
        height: f64,
    },
    RectXz {
        origin: [f64; 3],
        width: f64,
        height: f64,
    },
    RectYz {
        origin: [f64; 3],
        width: f64,
        height: f64,
    },
    Obj {
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelDesc {
    #[serde(flatten)]
    pub shape: ShapeDesc,
    /// Required for primitives; overrides the MTL materials of OBJ models
    #[serde(default)]
    pub material: Option<MaterialRef>,
    #[serde(default)]
    pub translate: Option<[f64; 3]>,
    #[serde(default)]
    pub scale: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SceneDescription {
    pub camera: CameraDesc,
    pub light: LightDesc,
    #[serde(default)]
    pub materials: HashMap<String, MaterialDesc>,
    #[serde(default)]
    pub models: Vec<ModelDesc>,
}

impl SceneDescription {
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the scene. Relative OBJ paths are joined onto `base_dir`.
    pub fn build(&self, base_dir: &Path) -> SceneResult<Scene> {
        let camera = Camera::new(
            Point::from(self.camera.position),
            Vector::from(self.camera.front),
            Vector::from(self.camera.up),
            self.camera.fov_degrees.to_radians(),
        )?;

        let [constant, linear, quadratic] = self.light.attenuation;
        let light = Light::new(
            Point::from(self.light.position),
            self.light.radius,
            self.light.color.to_color()?,
        )?
        .with_attenuation(constant, linear, quadratic);

        let models = self
            .models
            .iter()
            .map(|desc| self.build_model(desc, base_dir))
            .collect::<SceneResult<Vec<_>>>()?;

        if models.is_empty() {
            log::warn!("Scene description has no models");
        }

        let mut scene = Scene::new(camera, light);
        scene.fill(light, models);
        Ok(scene)
    }

    fn resolve_material(&self, material: Option<&MaterialRef>) -> SceneResult<Option<Material>> {
        match material {
            None => Ok(None),
            Some(MaterialRef::Inline(desc)) => desc.to_material().map(Some),
            Some(MaterialRef::Named(name)) => self
                .materials
                .get(name)
                .ok_or_else(|| SceneError::UnknownMaterial(name.clone()))?
                .to_material()
                .map(Some),
        }
    }

    fn build_model(&self, desc: &ModelDesc, base_dir: &Path) -> SceneResult<Model> {
        let material = self.resolve_material(desc.material.as_ref())?;
        let primitive = material.unwrap_or_default();

        let mut model = match &desc.shape {
            ShapeDesc::Sphere { center, radius } => {
                Model::sphere(Point::from(*center), *radius, primitive)
            }
            ShapeDesc::Box {
                origin,
                width,
                height,
                depth,
            } => Model::cuboid(Point::from(*origin), *width, *height, *depth, primitive),
            ShapeDesc::RectXy {
                origin,
                width,
                height,
            } => Model::rect_xy(Point::from(*origin), *width, *height, primitive),
            ShapeDesc::RectXz {
                origin,
                width,
                height,
            } => Model::rect_xz(Point::from(*origin), *width, *height, primitive),
            ShapeDesc::RectYz {
                origin,
                width,
                height,
            } => Model::rect_yz(Point::from(*origin), *width, *height, primitive),
            ShapeDesc::Obj { path } => {
                let mut model = obj::load_obj(base_dir.join(path))?;
                if let Some(m) = material {
                    model.set_material(m);
                }
                model
            }
        };

        if let Some(factor) = desc.scale {
            model.scale(factor);
        }
        if let Some(offset) = desc.translate {
            model.translate(Vector::from(offset));
        }
        Ok(model)
    }
}

/// Read and build a scene description file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<Scene> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let description = SceneDescription::from_json(&json)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let scene = description.build(base_dir)?;
    log::debug!(
        "Loaded scene {}: {} models, {} triangles",
        path.display(),
        scene.models().len(),
        scene.triangle_count()
    );
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelKind;

    const SCENE: &str = r##"{
        "camera": { "position": [0, 0, 20], "front": [0, 0, -1], "fov_degrees": 60 },
        "light": { "position": [0, 10, 0], "radius": 1.5, "color": "#FFFFFF", "attenuation": [1, 0.01, 0] },
        "materials": { "mirror": { "color": [0.75, 0.75, 0.75], "reflexivity": 1.0 } },
        "models": [
            { "type": "sphere", "center": [0, 0, 0], "radius": 5, "material": { "color": "#FF0000", "shininess": 0.5 } },
            { "type": "rect_xz", "origin": [-50, -5, -50], "width": 100, "height": 100, "material": "mirror" },
            { "type": "box", "origin": [0, 0, 0], "width": 1, "height": 1, "depth": 1,
              "material": { "color": 255 }, "translate": [10, 0, 0], "scale": 2 }
        ]
    }"##;

    #[test]
    fn test_build_scene() {
        let scene = SceneDescription::from_json(SCENE)
            .unwrap()
            .build(Path::new("."))
            .unwrap();

        assert!((scene.camera().fov() - 60f64.to_radians()).abs() < 1e-12);
        assert_eq!(scene.camera().up(), Vector::Y);
        assert_eq!(scene.light().radius, 1.5);
        assert_eq!(scene.light().attenuation.linear, 0.01);

        let models = scene.models();
        assert_eq!(models.len(), 4);
        assert_eq!(models[0].kind(), ModelKind::Sphere);
        assert_eq!(models[0].material(0).diffuse, Color::RED);
        assert_eq!(models[0].material(0).shininess, 0.5);
        assert_eq!(models[1].material(0).reflexivity, 1.0);
        assert_eq!(models[2].material(0).diffuse, Color::BLUE);
        assert_eq!(models[2].center(), Point::new(10.5, 0.5, 0.5));
        assert!((models[2].bounding_radius() - 3.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(models[3].kind(), ModelKind::Light);
    }

    #[test]
    fn test_unknown_material() {
        let json = r#"{
            "camera": { "position": [0, 0, 0], "front": [0, 0, -1] },
            "light": { "position": [0, 10, 0] },
            "models": [ { "type": "sphere", "center": [0, 0, 0], "radius": 1, "material": "gold" } ]
        }"#;
        let result = SceneDescription::from_json(json).unwrap().build(Path::new("."));
        assert!(matches!(result, Err(SceneError::UnknownMaterial(name)) if name == "gold"));
    }

    #[test]
    fn test_invalid_camera_is_configuration_error() {
        let json = r#"{
            "camera": { "position": [0, 0, 0], "front": [0, 1, -1], "up": [0, 1, 0] },
            "light": { "position": [0, 10, 0] }
        }"#;
        let result = SceneDescription::from_json(json).unwrap().build(Path::new("."));
        assert!(matches!(result, Err(SceneError::Configuration(_))));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            SceneDescription::from_json("{ \"camera\": 3 }"),
            Err(SceneError::Json(_))
        ));
    }

    #[test]
    fn test_color_desc() {
        assert_eq!(ColorDesc::Hex("#A7ECFF".into()).to_color().unwrap(), Color::new(0xA7ECFF));
        assert_eq!(ColorDesc::Hex("00ff00".into()).to_color().unwrap(), Color::LIME);
        assert!(ColorDesc::Hex("#12".into()).to_color().is_err());
        assert!(ColorDesc::Hex("#GGGGGG".into()).to_color().is_err());
        assert_eq!(ColorDesc::Rgb([0.0, 0.0, 1.0]).to_color().unwrap(), Color::BLUE);
    }

    #[test]
    fn test_load_scene_with_obj() {
        let dir = std::env::temp_dir().join(format!("glint_desc_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("tri.obj"), "v 0 0 0\nv 2 0 0\nv 0 2 0\nf 1 2 3\n").unwrap();
        fs::write(
            dir.join("scene.json"),
            r##"{
                "camera": { "position": [0, 0, 10], "front": [0, 0, -1] },
                "light": { "position": [0, 10, 0] },
                "models": [ { "type": "obj", "path": "tri.obj", "material": { "color": "#00FF00" } } ]
            }"##,
        )
        .unwrap();

        let scene = load_scene(dir.join("scene.json")).unwrap();
        assert_eq!(scene.models().len(), 2);
        assert_eq!(scene.models()[0].material(0).diffuse, Color::LIME);
        fs::remove_dir_all(&dir).ok();
    }
}
