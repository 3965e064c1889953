//! ARKit capture viewer
//!
//! Loads the point cloud, plane anchors, detected objects and camera path of
//! one capture, builds the scene and walks (or flies) through it.
//!
//! ```text
//! arkit_viewer --data-dir data --prefix spotmeka --mode flight
//! arkit_viewer --config viewer.json --headless-frames 600
//! ```
//!
//! Controls: click to capture the mouse, WASD or arrows to move, Space to
//! jump (ground mode), R/F to rise and sink (flight mode), Escape to release.

use anyhow::{Context, Result};
use arscene_io::{load_dataset, DatasetPaths, RowPolicy};
use arscene_scene::SceneBuilder;
use arscene_visualization::{
    run_headless, show_scene, HeadlessRenderer, MovementMode, ViewerConfig,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "arkit_viewer", about = "First-person viewer for ARKit captures")]
struct Opts {
    /// JSON viewer configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding <prefix>_points.csv, _anchors.csv, _camera.csv, _objects.csv
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[arg(long, default_value = "spotmeka")]
    prefix: String,

    #[arg(long)]
    points: Option<PathBuf>,
    #[arg(long)]
    anchors: Option<PathBuf>,
    #[arg(long)]
    camera: Option<PathBuf>,
    #[arg(long)]
    objects: Option<PathBuf>,

    /// Capture metres to scene units
    #[arg(long)]
    scale: Option<f32>,
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Fail on the first malformed row instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Render this many frames without a window, then exit
    #[arg(long)]
    headless_frames: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Ground,
    Flight,
}

impl From<Mode> for MovementMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Ground => MovementMode::Ground,
            Mode::Flight => MovementMode::Flight,
        }
    }
}

fn resolve_config(opts: &Opts) -> Result<ViewerConfig> {
    let mut config = match &opts.config {
        Some(path) => {
            let mut config = ViewerConfig::from_json_file(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            if let Some(mode) = opts.mode {
                config.movement.mode = mode.into();
            }
            config
        }
        None => ViewerConfig::for_mode(opts.mode.map(Into::into).unwrap_or_default()),
    };

    if let Some(dir) = &opts.data_dir {
        config.dataset = DatasetPaths::with_prefix(dir, &opts.prefix);
    }
    let overrides = [
        (&opts.points, &mut config.dataset.points),
        (&opts.anchors, &mut config.dataset.anchors),
        (&opts.camera, &mut config.dataset.camera),
        (&opts.objects, &mut config.dataset.objects),
    ];
    for (flag, path) in overrides {
        if let Some(flag) = flag {
            *path = flag.clone();
        }
    }

    if let Some(scale) = opts.scale {
        config.scene.scale = scale;
    }
    if opts.strict {
        config.row_policy = RowPolicy::Strict;
    }
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let opts = Opts::parse();
    let config = resolve_config(&opts)?;

    let dataset = match load_dataset(&config.dataset, config.row_policy).await {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("failed to load capture: {}", e);
            return Err(e).context("loading capture");
        }
    };
    if dataset.report.total_skipped() > 0 {
        warn!("{} malformed rows skipped", dataset.report.total_skipped());
    }

    let scene = SceneBuilder::new(&config.scene).build(&dataset);

    match opts.headless_frames {
        Some(frames) => {
            let renderer = run_headless(scene, &config, frames, HeadlessRenderer::new())?;
            info!("rendered {} frames headless", renderer.frames);
        }
        None => show_scene(scene, &config)?,
    }
    Ok(())
}
