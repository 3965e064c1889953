//! First-person viewing of arscene scenes
//!
//! This crate provides the interactive side of the viewer:
//! - Movement integration in ground (gravity) and flight modes
//! - Key bindings and pointer-lock mouse look
//! - Perspective camera
//! - A render loop that drives any [`FrameRenderer`], windowed or headless
//! - A wgpu backend drawing points, lines and lit triangles

pub mod camera;
pub mod config;
pub mod controls;
pub mod draw_list;
pub mod gpu_renderer;
pub mod movement;
pub mod render_loop;
pub mod viewer;

pub use camera::Camera;
pub use config::{ViewerConfig, WindowConfig};
pub use controls::{apply_key, key_action, KeyAction, PointerLockControls, LOOK_SENSITIVITY};
pub use draw_list::{DrawList, SceneVertex};
pub use gpu_renderer::{CameraUniform, GpuRenderer, RenderConfig};
pub use movement::{Intent, MovementConfig, MovementIntent, MovementMode, ViewerState};
pub use render_loop::{FrameContext, FrameRenderer, HeadlessRenderer, RenderLoop};
pub use viewer::InteractiveViewer;

use arscene_core::Result;
use arscene_scene::Scene;
use std::sync::Arc;
use winit::window::Window;

/// Show a built scene in an interactive window drawn with wgpu
pub fn show_scene(scene: Scene, config: &ViewerConfig) -> Result<()> {
    let render = config.render.clone();
    show_scene_with(scene, config, move |window| GpuRenderer::new(window, render))
}

/// Show a built scene with a renderer created for the opened window
pub fn show_scene_with<R, F>(scene: Scene, config: &ViewerConfig, make_renderer: F) -> Result<()>
where
    R: FrameRenderer,
    F: FnOnce(Arc<Window>) -> Result<R>,
{
    let render_loop = RenderLoop::new(scene, config, 0.0);
    InteractiveViewer::new(render_loop, config.window.clone()).run(make_renderer)
}

/// Drive `frames` frames at 60 Hz without a window; returns the renderer
pub fn run_headless<R: FrameRenderer>(
    scene: Scene,
    config: &ViewerConfig,
    frames: u64,
    mut renderer: R,
) -> Result<R> {
    let mut render_loop = RenderLoop::new(scene, config, 0.0);
    render_loop.resize(config.window.width, config.window.height, &mut renderer);
    for i in 1..=frames {
        let now = i as f64 / 60.0;
        render_loop.frame(now, now * 1000.0, &mut renderer)?;
    }
    Ok(renderer)
}
