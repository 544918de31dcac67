//! glint tracer - recursive Whitted-style ray tracing on the CPU.
//!
//! Camera rays come from a pinhole [`Viewport`]. Every ray is intersected
//! against all models (with bounding-sphere pruning), shaded with Phong
//! diffuse and specular terms under hard or soft shadows, and bounced off
//! reflective materials up to [`MAX_DEPTH`] times. Frames render in
//! center-out buckets on rayon's pool.

mod bucket;
mod camera;
mod random;
mod renderer;
mod tracer;

pub mod intersect;
pub mod shading;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{PrimaryRay, Viewport};
pub use intersect::Hit;
pub use random::{gen_f64, sample_disk};
pub use renderer::{
    render, render_pixel, ImageBuffer, RenderConfig, RenderError, RenderOutput, RenderResult,
};
pub use tracer::{
    trace_ray, trace_ray_with_rng, TraceOptions, TraceStats, Tracer, BACKGROUND, MAX_DEPTH,
    REFLECTANCE, REFLECTION_BIAS,
};
