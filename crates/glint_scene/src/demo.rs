//! Built-in demo room used when no scene file is given.

use glint_math::Point;

use crate::{Camera, Color, Light, Material, Model, Scene, SceneResult};

/// Two spheres inside a closed 200 x 150 x 200 room, lit by a small area
/// light, seen from the origin looking down -z.
pub fn demo_room() -> SceneResult<Scene> {
    let camera = Camera::looking_down_z(Point::ORIGIN, 120f64.to_radians())?;
    let light = Light::new(Point::new(5.0, 5.0, 5.0), 2.0, Color::WHITE)?;

    let models = vec![
        Model::sphere(
            Point::new(15.0, 0.0, -20.0),
            7.5,
            Material::new(Color::RED, 1.0, 0.5),
        ),
        Model::sphere(
            Point::new(-15.0, 0.0, -20.0),
            7.5,
            Material::new(Color::BLUE, 0.2, 0.5),
        ),
        Model::rect_xy(
            Point::new(-100.0, -75.0, -100.0),
            200.0,
            150.0,
            Material::new(Color::RED.scale(0.9), 0.0, 0.1),
        ),
        Model::rect_yz(
            Point::new(100.0, -75.0, -100.0),
            200.0,
            150.0,
            Material::diffuse(Color::GREEN),
        ),
        Model::rect_yz(
            Point::new(-100.0, -75.0, -100.0),
            200.0,
            150.0,
            Material::diffuse(Color::GREEN),
        ),
        Model::rect_xz(
            Point::new(-100.0, 75.0, -100.0),
            200.0,
            200.0,
            Material::diffuse(Color::BLUE),
        ),
        Model::rect_xz(
            Point::new(-100.0, -75.0, -100.0),
            200.0,
            200.0,
            Material::diffuse(Color::BLUE),
        ),
        Model::rect_xy(
            Point::new(-100.0, -75.0, 100.0),
            200.0,
            150.0,
            Material::diffuse(Color::RED),
        ),
    ];

    let mut scene = Scene::new(camera, light);
    scene.fill(light, models);
    Ok(scene)
}
