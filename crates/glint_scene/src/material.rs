//! Surface materials.

use crate::Color;

/// Diffuse floor for faces turned away from the light.
pub const AMBIENT_STRENGTH: f64 = 0.1;

/// Phong exponent of every specular highlight.
pub const SPECULAR_EXPONENT: f64 = 32.0;

/// Surface appearance shared by the triangles of a model.
///
/// `reflexivity` blends the mirrored color into the diffuse color (0 is fully
/// diffuse, 1 a perfect mirror). `shininess` scales the white specular
/// highlight.
///
/// `ambient`, `specular` and `specular_exponent` hold the MTL `Ka`, `Ks` and
/// `Ns` values for export. Shading always uses [`AMBIENT_STRENGTH`], white and
/// [`SPECULAR_EXPONENT`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse: Color,
    pub ambient: f64,
    pub specular: Color,
    pub specular_exponent: f64,
    pub reflexivity: f64,
    pub shininess: f64,
}

impl Material {
    /// Reflexivity and shininess are clamped to [0, 1].
    pub fn new(diffuse: Color, reflexivity: f64, shininess: f64) -> Self {
        Self {
            diffuse,
            ambient: AMBIENT_STRENGTH,
            specular: Color::WHITE,
            specular_exponent: SPECULAR_EXPONENT,
            reflexivity: reflexivity.clamp(0.0, 1.0),
            shininess: shininess.clamp(0.0, 1.0),
        }
    }

    /// Plain diffuse material with no reflection or highlight.
    pub fn diffuse(color: Color) -> Self {
        Self::new(color, 0.0, 0.0)
    }

    pub fn is_reflective(&self) -> bool {
        self.reflexivity > 0.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse(Color::WHITE)
    }
}
