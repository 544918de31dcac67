//! Pinhole projection from a scene camera to per-pixel rays.

use glint_math::{Point, Ray, Vector};
use glint_scene::Camera;

/// A ray leaving the camera position.
///
/// Only a `Viewport` can create one, so holding a `PrimaryRay` proves the
/// origin is the camera position. That is what allows the sorted-triangle
/// fast path in `intersect_model_primary`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimaryRay {
    ray: Ray,
}

impl PrimaryRay {
    pub fn as_ray(&self) -> &Ray {
        &self.ray
    }

    pub fn origin(&self) -> Point {
        self.ray.origin
    }

    pub fn direction(&self) -> Vector {
        self.ray.direction
    }
}

/// Image plane one unit in front of the camera.
///
/// The viewport width is `2 tan(fov / 2)` and its height follows the image
/// aspect ratio. Pixel (0, 0) is the top-left corner.
#[derive(Debug, Clone)]
pub struct Viewport {
    origin: Point,
    upper_left: Point,
    pixel_delta_u: Vector,
    pixel_delta_v: Vector,
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(camera: &Camera, width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);

        let viewport_width = 2.0 * (camera.fov() / 2.0).tan();
        let viewport_height = viewport_width * height as f64 / width as f64;

        // Horizontal span along right, vertical span downwards along -up
        let viewport_u = camera.right() * viewport_width;
        let viewport_v = camera.up() * -viewport_height;

        let center = camera.position() + camera.front();
        let upper_left = center - viewport_u * 0.5 - viewport_v * 0.5;

        Self {
            origin: camera.position(),
            upper_left,
            pixel_delta_u: viewport_u * (1.0 / width as f64),
            pixel_delta_v: viewport_v * (1.0 / height as f64),
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Ray through continuous image coordinates, `(0, 0)` being the top-left
    /// corner of the image and `(width, height)` the bottom-right.
    pub fn ray_at(&self, x: f64, y: f64) -> PrimaryRay {
        let target = self.upper_left + self.pixel_delta_u * x + self.pixel_delta_v * y;
        PrimaryRay {
            ray: Ray::new(self.origin, (target - self.origin).normalize()),
        }
    }

    /// Ray through the center of pixel `(x, y)`.
    pub fn primary_ray(&self, x: u32, y: u32) -> PrimaryRay {
        self.ray_at(x as f64 + 0.5, y as f64 + 0.5)
    }

    /// Rays through an `n` by `n` grid of sub-pixel centers.
    ///
    /// `n == 0` is treated as 1.
    pub fn sub_pixel_rays(&self, x: u32, y: u32, n: u32) -> impl Iterator<Item = PrimaryRay> + '_ {
        let n = n.max(1);
        let step = 1.0 / n as f64;
        (0..n * n).map(move |i| {
            let sx = (i % n) as f64;
            let sy = (i / n) as f64;
            self.ray_at(
                x as f64 + (sx + 0.5) * step,
                y as f64 + (sy + 0.5) * step,
            )
        })
    }
}
