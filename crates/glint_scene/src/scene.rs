//! Scene container: camera, light and the models to trace.

use crate::{Camera, Light, Model, ModelKind};

/// A complete scene.
///
/// Models are kept in tracing order. The synthetic light sphere built from
/// `light` is always part of the model list; models added later are inserted
/// before it.
#[derive(Debug, Clone)]
pub struct Scene {
    camera: Camera,
    models: Vec<Model>,
    light: Light,
}

impl Scene {
    /// Scene with no geometry apart from the light sphere.
    pub fn new(camera: Camera, light: Light) -> Self {
        Self {
            camera,
            models: vec![Model::light(&light)],
            light,
        }
    }

    /// Replace the light and every model, then append the light sphere.
    pub fn fill(&mut self, light: Light, models: Vec<Model>) {
        self.light = light;
        self.models = models;
        self.models.push(Model::light(&light));

        log::debug!(
            "Scene filled: {} models, ~{} KiB",
            self.models.len(),
            self.memory_footprint() / 1024
        );
    }

    /// Add models ahead of the light sphere.
    pub fn add_models(&mut self, models: impl IntoIterator<Item = Model>) {
        let at = self
            .models
            .iter()
            .position(|m| m.kind() == ModelKind::Light)
            .unwrap_or(self.models.len());
        self.models.splice(at..at, models);
    }

    /// Order models by the squared distance of their centers from the camera.
    pub fn sort_models(&mut self) {
        let eye = self.camera.position();
        self.models.sort_by(|a, b| {
            let da = a.center().distance_squared(&eye);
            let db = b.center().distance_squared(&eye);
            da.total_cmp(&db)
        });
    }

    /// Sort every model's triangles for the current camera position.
    pub fn sort_triangles_for_camera(&mut self) {
        let eye = self.camera.position();
        for model in &mut self.models {
            model.sort_triangles(eye);
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera access for movement between frames.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn light(&self) -> &Light {
        &self.light
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// Models excluding the synthetic light sphere.
    pub fn geometry(&self) -> impl Iterator<Item = &Model> {
        self.models.iter().filter(|m| m.kind() != ModelKind::Light)
    }

    pub fn triangle_count(&self) -> usize {
        self.models.iter().map(|m| m.triangles().len()).sum()
    }

    /// Approximate size of the scene in bytes.
    pub fn memory_footprint(&self) -> usize {
        std::mem::size_of::<Self>()
            + self
                .models
                .iter()
                .map(Model::memory_footprint)
                .sum::<usize>()
    }
}
