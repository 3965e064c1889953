//! Per-frame driver: input state, movement, decorations, drawing
//!
//! The loop owns the scene and everything input mutates. Drawing is behind
//! [`FrameRenderer`], so the same loop runs in a window or headless.

use crate::camera::Camera;
use crate::config::ViewerConfig;
use crate::controls::{apply_key, PointerLockControls};
use crate::movement::{MovementConfig, ViewerState};
use arscene_core::{Aabb, Point3f, Result};
use arscene_scene::Scene;
use nalgebra::Matrix4;
use tracing::debug;
use winit::keyboard::KeyCode;

/// What a renderer needs to know about the eye for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub eye: Point3f,
    /// The "click to look around" overlay is showing
    pub overlay_visible: bool,
}

/// Draws a scene; implemented by GPU backends and by [`HeadlessRenderer`]
pub trait FrameRenderer {
    fn resize(&mut self, width: u32, height: u32);

    fn render(&mut self, scene: &Scene, frame: &FrameContext) -> Result<()>;
}

/// Renderer that draws nothing and remembers what it was asked to draw
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub size: (u32, u32),
    pub last_frame: Option<FrameContext>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameRenderer for HeadlessRenderer {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn render(&mut self, scene: &Scene, frame: &FrameContext) -> Result<()> {
        if self.frames % 60 == 0 {
            debug!(
                "frame {}: {} nodes, eye at ({:.1}, {:.1}, {:.1})",
                self.frames,
                scene.nodes.len(),
                frame.eye.x,
                frame.eye.y,
                frame.eye.z
            );
        }
        self.frames += 1;
        self.last_frame = Some(*frame);
        Ok(())
    }
}

pub struct RenderLoop {
    scene: Scene,
    camera: Camera,
    viewer: ViewerState,
    controls: PointerLockControls,
    movement: MovementConfig,
    colliders: Vec<Aabb>,
    frames: u64,
}

impl RenderLoop {
    /// Set up the loop with the viewer spawned at `now` seconds
    pub fn new(scene: Scene, config: &ViewerConfig, now: f64) -> Self {
        Self {
            scene,
            camera: config.camera.clone(),
            viewer: ViewerState::spawn(&config.movement, now),
            controls: PointerLockControls::new(),
            movement: config.movement.clone(),
            colliders: Vec::new(),
            frames: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn viewer(&self) -> &ViewerState {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut ViewerState {
        &mut self.viewer
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controls(&self) -> &PointerLockControls {
        &self.controls
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Boxes the viewer can stand on in ground mode
    pub fn set_colliders(&mut self, colliders: Vec<Aabb>) {
        self.colliders = colliders;
    }

    pub fn lock(&mut self) -> bool {
        self.controls.lock()
    }

    pub fn unlock(&mut self) -> bool {
        self.controls.unlock()
    }

    pub fn handle_key(&mut self, code: KeyCode, pressed: bool) -> bool {
        apply_key(&mut self.viewer, &self.movement, code, pressed)
    }

    pub fn mouse_motion(&mut self, dx: f64, dy: f64) {
        self.controls.look(&mut self.viewer, dx, dy);
    }

    pub fn resize<R: FrameRenderer + ?Sized>(&mut self, width: u32, height: u32, renderer: &mut R) {
        self.camera.resize(width, height);
        renderer.resize(width, height);
    }

    pub fn frame_context(&self) -> FrameContext {
        FrameContext {
            view: self.camera.view_matrix(&self.viewer),
            projection: self.camera.projection_matrix(),
            eye: Camera::eye(&self.viewer),
            overlay_visible: self.controls.overlay_visible(),
        }
    }

    /// Advance one frame. `now` drives movement in seconds, `wall_ms` drives
    /// decorations in wall-clock milliseconds.
    pub fn frame<R: FrameRenderer + ?Sized>(
        &mut self,
        now: f64,
        wall_ms: f64,
        renderer: &mut R,
    ) -> Result<()> {
        if self.controls.is_locked() {
            self.viewer.integrate(&self.movement, now, &self.colliders);
        }
        self.scene.animate(wall_ms);

        let frame = self.frame_context();
        renderer.render(&self.scene, &frame)?;
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::Intent;
    use approx::assert_relative_eq;
    use arscene_core::Error;

    const FRAME: f64 = 1.0 / 60.0;

    struct FailingRenderer;

    impl FrameRenderer for FailingRenderer {
        fn resize(&mut self, _width: u32, _height: u32) {}

        fn render(&mut self, _scene: &Scene, _frame: &FrameContext) -> Result<()> {
            Err(Error::Visualization("device lost".to_string()))
        }
    }

    fn render_loop() -> RenderLoop {
        RenderLoop::new(Scene::default(), &ViewerConfig::ground_walk(), 0.0)
    }

    #[test]
    fn test_spawns_on_the_floor() {
        let lp = render_loop();
        assert_eq!(lp.viewer().position(), Point3f::new(0.0, 10.0, 0.0));
        assert!(lp.controls().overlay_visible());
    }

    #[test]
    fn test_unlocked_viewer_is_frozen() {
        let mut lp = render_loop();
        let mut renderer = HeadlessRenderer::new();
        lp.handle_key(KeyCode::KeyW, true);
        for i in 1..=30 {
            lp.frame(i as f64 * FRAME, 0.0, &mut renderer).unwrap();
        }
        assert_eq!(lp.viewer().position(), Point3f::new(0.0, 10.0, 0.0));
        assert_eq!(renderer.frames, 30);
        assert!(renderer.last_frame.unwrap().overlay_visible);
    }

    #[test]
    fn test_locked_viewer_walks_forward() {
        let mut lp = render_loop();
        let mut renderer = HeadlessRenderer::new();
        lp.lock();
        lp.handle_key(KeyCode::KeyW, true);
        for i in 1..=30 {
            lp.frame(i as f64 * FRAME, 0.0, &mut renderer).unwrap();
        }
        assert!(lp.viewer().position().z < 0.0);
        assert!(lp.viewer().intent.contains(Intent::Forward));

        let frame = renderer.last_frame.unwrap();
        assert!(!frame.overlay_visible);
        assert_relative_eq!(frame.eye, lp.viewer().position());
    }

    #[test]
    fn test_relock_after_long_pause_is_bounded() {
        let mut lp = render_loop();
        let mut renderer = HeadlessRenderer::new();
        lp.lock();
        lp.handle_key(KeyCode::KeyW, true);
        lp.unlock();
        lp.frame(100.0, 0.0, &mut renderer).unwrap();
        lp.lock();
        lp.frame(200.0, 0.0, &mut renderer).unwrap();
        // A single 0.1 s step from rest: 80 units/s for 0.1 s
        assert_relative_eq!(lp.viewer().position().z, -8.0, epsilon = 1e-4);
    }

    #[test]
    fn test_mouse_look_needs_lock() {
        let mut lp = render_loop();
        lp.mouse_motion(0.0, 50.0);
        assert_eq!(lp.viewer().pitch, 0.0);
        lp.lock();
        lp.mouse_motion(0.0, 50.0);
        assert_relative_eq!(lp.viewer().pitch, -0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_resize_reaches_camera_and_renderer() {
        let mut lp = render_loop();
        let mut renderer = HeadlessRenderer::new();
        lp.resize(640, 480, &mut renderer);
        assert_eq!(renderer.size, (640, 480));
        assert_relative_eq!(lp.camera().aspect_ratio, 640.0 / 480.0);

        lp.resize(640, 0, &mut renderer);
        assert_relative_eq!(lp.camera().aspect_ratio, 640.0 / 480.0);
    }

    #[test]
    fn test_renderer_error_propagates() {
        let mut lp = render_loop();
        let err = lp.frame(FRAME, 0.0, &mut FailingRenderer).unwrap_err();
        assert!(matches!(err, Error::Visualization(_)));
        assert_eq!(lp.frames(), 0);
    }

    #[test]
    fn test_renderer_as_trait_object() {
        let mut lp = render_loop();
        let mut renderer: Box<dyn FrameRenderer> = Box::new(HeadlessRenderer::new());
        lp.frame(FRAME, 0.0, renderer.as_mut()).unwrap();
        assert_eq!(lp.frames(), 1);
    }
}
