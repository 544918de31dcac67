//! Frame rendering: configuration, pixel sampling and parallel dispatch.

use std::path::Path;
use std::time::Instant;

use glint_scene::{Color, Scene};
use rand::RngCore;
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::camera::Viewport;
use crate::tracer::{TraceOptions, TraceStats, Tracer, BACKGROUND, MAX_DEPTH};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Sub-pixel grid edge; each pixel averages `n * n` rays
    pub samples_per_pixel: u32,
    pub bucket_size: u32,
    /// Color of rays that escape the scene, before light tinting
    pub background: Color,
    /// Deepest reflection bounce
    pub max_depth: u32,
    /// Worker threads, 0 for the rayon default
    pub threads: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            samples_per_pixel: 1,
            bucket_size: DEFAULT_BUCKET_SIZE,
            background: BACKGROUND,
            max_depth: MAX_DEPTH,
            threads: 0,
        }
    }
}

impl RenderConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_samples(mut self, samples_per_pixel: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self
    }

    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "image size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples per pixel must be at least 1".to_string(),
            ));
        }
        if self.bucket_size == 0 {
            return Err(RenderError::InvalidConfig(
                "bucket size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn trace_options(&self) -> TraceOptions {
        TraceOptions {
            background: self.background,
            max_depth: self.max_depth,
        }
    }
}

/// Average of an `samples` x `samples` grid of camera rays through pixel
/// `(x, y)`.
pub fn render_pixel(
    tracer: &Tracer<'_>,
    viewport: &Viewport,
    x: u32,
    y: u32,
    samples: u32,
    rng: &mut dyn RngCore,
    stats: &mut TraceStats,
) -> Color {
    let colors: Vec<Color> = viewport
        .sub_pixel_rays(x, y, samples)
        .map(|ray| tracer.trace_primary(&ray, rng, stats))
        .collect();
    Color::average(&colors)
}

/// Rendered frame of packed colors, row-major from the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let i = i as u32;
            self.set(bucket.x + i % bucket.width, bucket.y + i / bucket.width, *color);
        }
    }

    /// Interleaved 8-bit RGB bytes.
    pub fn to_rgb(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.channels()).collect()
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        let path = path.as_ref();
        let img = image::RgbImage::from_raw(self.width, self.height, self.to_rgb())
            .ok_or_else(|| {
                RenderError::InvalidConfig(format!(
                    "{}x{} buffer size mismatch",
                    self.width, self.height
                ))
            })?;
        img.save(path)?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Output of a full render.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub image: ImageBuffer,
    pub stats: TraceStats,
}

/// Render the scene from its camera.
///
/// Buckets run in parallel on rayon's pool (or a dedicated pool when
/// `config.threads > 0`). Each worker samples area lights with its own
/// thread-local generator.
pub fn render(scene: &Scene, config: &RenderConfig) -> RenderResult<RenderOutput> {
    config.validate()?;

    let viewport = Viewport::new(scene.camera(), config.width, config.height);
    let tracer = Tracer::with_options(scene, config.trace_options());
    let buckets = generate_buckets(config.width, config.height, config.bucket_size);

    log::debug!(
        "Rendering {}x{}: {} buckets of {}px, {}x{} samples, {} models, {} triangles",
        config.width,
        config.height,
        buckets.len(),
        config.bucket_size,
        config.samples_per_pixel,
        config.samples_per_pixel,
        scene.models().len(),
        scene.triangle_count()
    );

    let start = Instant::now();
    let run = || -> Vec<BucketResult> {
        buckets
            .par_iter()
            .map(|bucket| {
                let mut rng = rand::thread_rng();
                render_bucket(bucket, &tracer, &viewport, config.samples_per_pixel, &mut rng)
            })
            .collect()
    };

    let results = if config.threads > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()?;
        pool.install(run)
    } else {
        run()
    };

    let mut image = ImageBuffer::new(config.width, config.height);
    let mut stats = TraceStats::default();
    for result in &results {
        image.write_bucket(result);
        stats.merge(&result.stats);
    }

    let elapsed = start.elapsed();
    log::info!(
        "Rendered {}x{} in {:.2}s ({} rays, {} shadow rays, depth {})",
        config.width,
        config.height,
        elapsed.as_secs_f64(),
        stats.rays,
        stats.shadow_rays,
        stats.max_depth
    );

    Ok(RenderOutput { image, stats })
}
