use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_scene::CameraMovement;
use log::LevelFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Camera steps applied before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Move {
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

impl From<Move> for CameraMovement {
    fn from(m: Move) -> Self {
        match m {
            Move::Forward => CameraMovement::Forward,
            Move::Backward => CameraMovement::Backward,
            Move::Left => CameraMovement::Left,
            Move::Right => CameraMovement::Right,
            Move::Up => CameraMovement::Up,
            Move::Down => CameraMovement::Down,
            Move::RotateLeft => CameraMovement::RotateLeft,
            Move::RotateRight => CameraMovement::RotateRight,
            Move::RotateUp => CameraMovement::RotateUp,
            Move::RotateDown => CameraMovement::RotateDown,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Recursive Whitted-style ray tracer")]
pub struct Args {
    /// JSON scene description; the built-in demo room when omitted
    pub scene: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "600")]
    pub height: u32,

    /// Supersampling grid edge (each pixel averages n x n rays)
    #[arg(long, short = 's', default_value = "1")]
    pub samples: u32,

    /// Bucket edge in pixels
    #[arg(long, default_value_t = glint_tracer::DEFAULT_BUCKET_SIZE)]
    pub bucket_size: u32,

    /// Worker threads, 0 for one per core
    #[arg(long, short = 'j', default_value = "0")]
    pub threads: usize,

    /// Output PNG path
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Sort triangles by distance from the camera before rendering
    #[arg(long)]
    pub sort_triangles: bool,

    /// Comma separated camera moves applied in order
    #[arg(long = "move", value_enum, value_delimiter = ',')]
    pub moves: Vec<Move>,

    /// Also write the scene geometry as OBJ (with a companion .mtl)
    #[arg(long)]
    pub export_obj: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["glint"]);
        assert!(args.scene.is_none());
        assert_eq!((args.width, args.height), (800, 600));
        assert_eq!(args.samples, 1);
        assert_eq!(args.bucket_size, glint_tracer::DEFAULT_BUCKET_SIZE);
        assert!(args.moves.is_empty());
    }

    #[test]
    fn test_full_command_line() {
        let args = Args::parse_from([
            "glint",
            "room.json",
            "--width",
            "64",
            "--samples",
            "3",
            "--move",
            "forward,rotate-left",
            "--sort-triangles",
            "--export-obj",
            "room.obj",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.scene, Some(PathBuf::from("room.json")));
        assert_eq!(args.width, 64);
        assert_eq!(args.samples, 3);
        assert_eq!(args.moves, vec![Move::Forward, Move::RotateLeft]);
        assert!(args.sort_triangles);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }
}
