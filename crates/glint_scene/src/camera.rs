//! Scene camera with an orthonormal basis and discrete movement.

use glint_math::{Point, Vector, EPSILON};

use crate::{SceneError, SceneResult};

/// Distance covered by one translation step.
pub const MOVE_STEP: f64 = 4.0;

/// Angle covered by one rotation step (15 degrees).
pub const ROTATION_STEP: f64 = 15.0 * std::f64::consts::PI / 180.0;

/// One discrete camera movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    RotateLeft,
    RotateRight,
    RotateUp,
    RotateDown,
}

/// Pinhole camera.
///
/// `front`, `up` and `right` are unit vectors forming an orthonormal basis,
/// with `right = front x up`. `fov` is the horizontal field of view in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Point,
    front: Vector,
    up: Vector,
    right: Vector,
    fov: f64,
}

impl Camera {
    /// Create a camera. `front` and `up` must be nonzero and perpendicular.
    pub fn new(position: Point, front: Vector, up: Vector, fov: f64) -> SceneResult<Self> {
        if front.norm_squared() == 0.0 || up.norm_squared() == 0.0 {
            return Err(SceneError::Configuration(
                "camera front and up must be nonzero".to_string(),
            ));
        }
        if front.dot(up).abs() > EPSILON * front.norm() * up.norm() {
            return Err(SceneError::Configuration(
                "camera front and up must be perpendicular".to_string(),
            ));
        }
        if !(fov > 0.0 && fov < std::f64::consts::PI) {
            return Err(SceneError::Configuration(format!(
                "camera field of view must be in (0, pi), got {}",
                fov
            )));
        }

        let front = front.normalize();
        let up = up.normalize();
        Ok(Self {
            position,
            front,
            up,
            right: front.cross(up).normalize(),
            fov,
        })
    }

    /// Camera looking down the negative z axis with y up.
    pub fn looking_down_z(position: Point, fov: f64) -> SceneResult<Self> {
        Self::new(position, Vector::new(0.0, 0.0, -1.0), Vector::Y, fov)
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn front(&self) -> Vector {
        self.front
    }

    pub fn up(&self) -> Vector {
        self.up
    }

    pub fn right(&self) -> Vector {
        self.right
    }

    pub fn fov(&self) -> f64 {
        self.fov
    }

    /// Apply one movement step.
    pub fn process_movement(&mut self, movement: CameraMovement) {
        match movement {
            CameraMovement::Forward => self.position = self.position + self.front * MOVE_STEP,
            CameraMovement::Backward => self.position = self.position - self.front * MOVE_STEP,
            CameraMovement::Right => self.position = self.position + self.right * MOVE_STEP,
            CameraMovement::Left => self.position = self.position - self.right * MOVE_STEP,
            CameraMovement::Up => self.position = self.position + self.up * MOVE_STEP,
            CameraMovement::Down => self.position = self.position - self.up * MOVE_STEP,
            CameraMovement::RotateRight => self.yaw(ROTATION_STEP),
            CameraMovement::RotateLeft => self.yaw(-ROTATION_STEP),
            CameraMovement::RotateUp => self.pitch(-ROTATION_STEP),
            CameraMovement::RotateDown => self.pitch(ROTATION_STEP),
        }
    }

    // Rotate front about up; front stays perpendicular to up
    fn yaw(&mut self, angle: f64) {
        self.front = self.front.rotate(self.up, angle).normalize();
        self.right = self.front.cross(self.up).normalize();
    }

    // Rotate front about right; front stays perpendicular to right
    fn pitch(&mut self, angle: f64) {
        self.front = self.front.rotate(self.right, angle).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}
