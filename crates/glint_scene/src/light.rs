use glint_math::Point;

use crate::{Color, SceneError, SceneResult};

/// Distance falloff `1 / (constant + linear d + quadratic d^2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub constant: f64,
    pub linear: f64,
    pub quadratic: f64,
}

impl Attenuation {
    pub fn new(constant: f64, linear: f64, quadratic: f64) -> Self {
        Self {
            constant,
            linear,
            quadratic,
        }
    }

    /// Attenuation factor at `distance` from the light.
    pub fn factor(&self, distance: f64) -> f64 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

impl Default for Attenuation {
    /// No falloff.
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

/// The single light source of a scene.
///
/// A radius of zero makes a point light with hard shadows; a positive radius
/// makes a spherical area light sampled for soft shadows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Point,
    pub radius: f64,
    pub color: Color,
    pub attenuation: Attenuation,
}

impl Light {
    pub fn new(position: Point, radius: f64, color: Color) -> SceneResult<Self> {
        if radius.is_nan() || radius < 0.0 {
            return Err(SceneError::Configuration(format!(
                "light radius must be non-negative, got {}",
                radius
            )));
        }

        Ok(Self {
            position,
            radius,
            color,
            attenuation: Attenuation::default(),
        })
    }

    pub fn with_attenuation(mut self, constant: f64, linear: f64, quadratic: f64) -> Self {
        self.attenuation = Attenuation::new(constant, linear, quadratic);
        self
    }

    pub fn is_point(&self) -> bool {
        self.radius == 0.0
    }
}
