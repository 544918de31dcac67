use thiserror::Error;

/// Errors raised while building or loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Invalid scene configuration: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OBJ load error: {0}")]
    ObjLoad(#[from] tobj::LoadError),

    #[error("Scene description error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No geometry found: {0}")]
    NoGeometry(String),

    #[error("Too many materials: {0} (a model holds at most 256)")]
    TooManyMaterials(usize),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),
}

pub type SceneResult<T> = Result<T, SceneError>;
