//! Windowed host for the render loop

use crate::config::WindowConfig;
use crate::render_loop::{FrameRenderer, RenderLoop};
use arscene_core::{Error, Result};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{error, info, warn};
use winit::{
    dpi::LogicalSize,
    event::{DeviceEvent, ElementState, Event, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowBuilder},
};

const OVERLAY_HINT: &str = "click to look around";

/// Interactive first-person viewer
pub struct InteractiveViewer {
    render_loop: RenderLoop,
    window: WindowConfig,
}

impl InteractiveViewer {
    pub fn new(render_loop: RenderLoop, window: WindowConfig) -> Self {
        Self {
            render_loop,
            window,
        }
    }

    /// Open the window, build the renderer for it and drive the loop until
    /// the window closes or the renderer fails
    pub fn run<R, F>(mut self, make_renderer: F) -> Result<()>
    where
        R: FrameRenderer,
        F: FnOnce(Arc<Window>) -> Result<R>,
    {
        info!("starting viewer: {}", self.window.title);

        let event_loop = EventLoop::new()
            .map_err(|e| Error::Visualization(format!("Failed to create event loop: {}", e)))?;
        let window = WindowBuilder::new()
            .with_title(overlay_title(&self.window.title, true))
            .with_inner_size(LogicalSize::new(self.window.width, self.window.height))
            .build(&event_loop)
            .map_err(|e| Error::Visualization(format!("Failed to create window: {}", e)))?;
        let window = Arc::new(window);
        let mut renderer = make_renderer(Arc::clone(&window))?;

        let size = window.inner_size();
        self.render_loop.resize(size.width, size.height, &mut renderer);

        let start = Instant::now();
        let title = self.window.title.clone();
        let render_loop = &mut self.render_loop;
        let mut failure = None;

        window.request_redraw();
        event_loop
            .run(|event, target| {
                target.set_control_flow(ControlFlow::Poll);

                match event {
                    Event::WindowEvent { event, .. } => match event {
                        WindowEvent::CloseRequested => target.exit(),
                        WindowEvent::Resized(new_size) => {
                            render_loop.resize(new_size.width, new_size.height, &mut renderer);
                        }
                        WindowEvent::Focused(false) => {
                            if render_loop.unlock() {
                                set_pointer_lock(&window, &title, false);
                            }
                        }
                        WindowEvent::MouseInput {
                            state: ElementState::Pressed,
                            button: MouseButton::Left,
                            ..
                        } => {
                            if render_loop.lock() {
                                set_pointer_lock(&window, &title, true);
                            }
                        }
                        WindowEvent::KeyboardInput { event, .. } => {
                            if let PhysicalKey::Code(code) = event.physical_key {
                                let pressed = event.state == ElementState::Pressed;
                                if code == KeyCode::Escape {
                                    if pressed && render_loop.unlock() {
                                        set_pointer_lock(&window, &title, false);
                                    }
                                } else {
                                    render_loop.handle_key(code, pressed);
                                }
                            }
                        }
                        WindowEvent::RedrawRequested => {
                            let now = start.elapsed().as_secs_f64();
                            if let Err(e) = render_loop.frame(now, wall_clock_ms(), &mut renderer) {
                                error!("Render error: {}", e);
                                failure = Some(e);
                                target.exit();
                                return;
                            }
                            window.request_redraw();
                        }
                        _ => {}
                    },
                    Event::DeviceEvent {
                        event: DeviceEvent::MouseMotion { delta },
                        ..
                    } => render_loop.mouse_motion(delta.0, delta.1),
                    _ => {}
                }
            })
            .map_err(|e| Error::Visualization(format!("Event loop error: {}", e)))?;

        info!("viewer closed after {} frames", self.render_loop.frames());
        failure.map_or(Ok(()), Err)
    }
}

fn wall_clock_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

fn overlay_title(title: &str, overlay_visible: bool) -> String {
    if overlay_visible {
        format!("{} ({})", title, OVERLAY_HINT)
    } else {
        title.to_string()
    }
}

/// Grab and hide the cursor, or give it back
fn set_pointer_lock(window: &Window, title: &str, locked: bool) {
    let grab = if locked {
        window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
    } else {
        window.set_cursor_grab(CursorGrabMode::None)
    };
    if let Err(e) = grab {
        warn!("cursor grab unavailable: {}", e);
    }
    window.set_cursor_visible(!locked);
    window.set_title(&overlay_title(title, !locked));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_title() {
        assert_eq!(overlay_title("capture", false), "capture");
        assert_eq!(overlay_title("capture", true), "capture (click to look around)");
    }

    #[test]
    fn test_wall_clock_is_positive() {
        assert!(wall_clock_ms() > 0.0);
    }
}
