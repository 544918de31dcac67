//! Scene data model for glint.
//!
//! Colors, materials, triangle models, the light source and the camera,
//! plus the collaborators that build scenes: primitive builders, OBJ/MTL
//! import and export, JSON scene descriptions and a built-in demo room.

mod camera;
mod color;
mod error;
mod light;
mod scene;
mod triangle;

pub mod demo;
pub mod description;
pub mod material;
pub mod model;
pub mod obj;

pub use camera::{Camera, CameraMovement, MOVE_STEP, ROTATION_STEP};
pub use color::Color;
pub use description::{load_scene, SceneDescription};
pub use error::{SceneError, SceneResult};
pub use light::{Attenuation, Light};
pub use material::Material;
pub use model::{Model, ModelKind};
pub use scene::Scene;
pub use triangle::Triangle;
