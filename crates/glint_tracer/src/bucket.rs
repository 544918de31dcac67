//! Bucket-based tile rendering.
//!
//! The image is cut into tiles (buckets) that render independently. Rayon's
//! work-stealing pool hands each idle worker the next unclaimed bucket.

use glint_scene::Color;
use rand::RngCore;

use crate::camera::Viewport;
use crate::renderer::render_pixel;
use crate::tracer::{TraceStats, Tracer};

/// A rectangular region of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of the top-left corner
    pub x: u32,
    /// Y coordinate of the top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Position in render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Default bucket edge in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Split an image into buckets ordered from the center outwards.
///
/// Edge buckets are clipped to the image. A `bucket_size` of 0 is treated
/// as 1.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = size.min(width - x);
            let bh = size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
            x += size;
        }
        y += size;
    }

    sort_spiral(&mut buckets, width, height);
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f64 + b.width as f64 / 2.0;
        let by = b.y as f64 + b.height as f64 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Pixels of one rendered bucket, row-major within the bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    pub pixels: Vec<Color>,
    pub stats: TraceStats,
}

/// Render every pixel of `bucket` with `samples` x `samples` supersampling.
pub fn render_bucket(
    bucket: &Bucket,
    tracer: &Tracer<'_>,
    viewport: &Viewport,
    samples: u32,
    rng: &mut dyn RngCore,
) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count());
    let mut stats = TraceStats::default();

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = render_pixel(
                tracer,
                viewport,
                bucket.x + local_x,
                bucket.y + local_y,
                samples,
                rng,
                &mut stats,
            );
            pixels.push(color);
        }
    }

    BucketResult {
        bucket: *bucket,
        pixels,
        stats,
    }
}
