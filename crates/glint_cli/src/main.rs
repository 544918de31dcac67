use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glint_scene::{demo, load_scene, obj, Model, Scene};
use glint_tracer::{render, RenderConfig};

mod cli;

use cli::Args;

fn build_scene(args: &Args) -> Result<Scene> {
    let mut scene = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene given, using the demo room");
            demo::demo_room().context("failed to build the demo room")?
        }
    };

    for m in &args.moves {
        scene.camera_mut().process_movement((*m).into());
    }
    if !args.moves.is_empty() {
        let camera = scene.camera();
        log::debug!(
            "Camera at {:?} looking along {:?}",
            camera.position(),
            camera.front()
        );
    }

    scene.sort_models();
    if args.sort_triangles {
        scene.sort_triangles_for_camera();
    }

    log::debug!(
        "Scene: {} models, {} triangles, ~{} KiB",
        scene.models().len(),
        scene.triangle_count(),
        scene.memory_footprint() / 1024
    );
    Ok(scene)
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let scene = build_scene(&args)?;

    if let Some(path) = &args.export_obj {
        let models: Vec<&Model> = scene.geometry().collect();
        obj::save_obj(&models, path)
            .with_context(|| format!("failed to export {}", path.display()))?;
    }

    let config = RenderConfig::default()
        .with_size(args.width, args.height)
        .with_samples(args.samples)
        .with_bucket_size(args.bucket_size)
        .with_threads(args.threads);

    let start = Instant::now();
    let output = render(&scene, &config).context("render failed")?;
    output
        .image
        .save_png(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    log::info!(
        "Done in {:.2}s, {} rays per second",
        start.elapsed().as_secs_f64(),
        (output.stats.rays as f64 / start.elapsed().as_secs_f64().max(1e-9)) as u64
    );
    Ok(())
}
