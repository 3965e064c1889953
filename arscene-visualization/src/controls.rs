//! Keyboard mapping and pointer-lock mouse look

use crate::movement::{Intent, MovementConfig, MovementMode, ViewerState};
use std::f32::consts::FRAC_PI_2;
use tracing::debug;
use winit::keyboard::KeyCode;

/// Radians of rotation per pixel of mouse motion
pub const LOOK_SENSITIVITY: f32 = 0.002;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Intent),
    Jump,
}

/// Movement binding for a physical key. Jump only exists on the ground,
/// up and down only in flight.
pub fn key_action(code: KeyCode, mode: MovementMode) -> Option<KeyAction> {
    let action = match code {
        KeyCode::KeyW | KeyCode::ArrowUp => KeyAction::Move(Intent::Forward),
        KeyCode::KeyS | KeyCode::ArrowDown => KeyAction::Move(Intent::Backward),
        KeyCode::KeyA | KeyCode::ArrowLeft => KeyAction::Move(Intent::Left),
        KeyCode::KeyD | KeyCode::ArrowRight => KeyAction::Move(Intent::Right),
        KeyCode::Space if mode == MovementMode::Ground => KeyAction::Jump,
        KeyCode::KeyR if mode == MovementMode::Flight => KeyAction::Move(Intent::Up),
        KeyCode::KeyF if mode == MovementMode::Flight => KeyAction::Move(Intent::Down),
        _ => return None,
    };
    Some(action)
}

/// Apply a key transition to the viewer. Returns false for unbound keys.
pub fn apply_key(
    viewer: &mut ViewerState,
    config: &MovementConfig,
    code: KeyCode,
    pressed: bool,
) -> bool {
    match key_action(code, config.mode) {
        Some(KeyAction::Move(intent)) => {
            viewer.intent.set(intent, pressed);
            true
        }
        Some(KeyAction::Jump) => {
            if pressed {
                viewer.jump(config);
            }
            true
        }
        None => false,
    }
}

/// Mouse capture state. While locked, mouse motion turns the viewer and
/// the movement integrator runs; while unlocked the start overlay shows.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerLockControls {
    locked: bool,
    pub sensitivity: f32,
}

impl PointerLockControls {
    pub fn new() -> Self {
        Self {
            locked: false,
            sensitivity: LOOK_SENSITIVITY,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn overlay_visible(&self) -> bool {
        !self.locked
    }

    /// Returns true if the state changed
    pub fn lock(&mut self) -> bool {
        let changed = !self.locked;
        if changed {
            debug!("pointer locked");
        }
        self.locked = true;
        changed
    }

    /// Returns true if the state changed
    pub fn unlock(&mut self) -> bool {
        let changed = self.locked;
        if changed {
            debug!("pointer released");
        }
        self.locked = false;
        changed
    }

    /// Turn the viewer by a mouse delta in pixels; ignored while unlocked
    pub fn look(&self, viewer: &mut ViewerState, dx: f64, dy: f64) {
        if !self.locked {
            return;
        }
        viewer.pose.rotate_y(-(dx as f32) * self.sensitivity);
        viewer.pitch = (viewer.pitch - dy as f32 * self.sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
    }
}

impl Default for PointerLockControls {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use arscene_core::Point3f;

    #[test]
    fn test_wasd_and_arrows_share_bindings() {
        for mode in [MovementMode::Ground, MovementMode::Flight] {
            assert_eq!(key_action(KeyCode::KeyW, mode), key_action(KeyCode::ArrowUp, mode));
            assert_eq!(key_action(KeyCode::KeyS, mode), key_action(KeyCode::ArrowDown, mode));
            assert_eq!(key_action(KeyCode::KeyA, mode), key_action(KeyCode::ArrowLeft, mode));
            assert_eq!(key_action(KeyCode::KeyD, mode), key_action(KeyCode::ArrowRight, mode));
        }
        assert_eq!(
            key_action(KeyCode::KeyA, MovementMode::Ground),
            Some(KeyAction::Move(Intent::Left))
        );
    }

    #[test]
    fn test_mode_specific_keys() {
        assert_eq!(key_action(KeyCode::Space, MovementMode::Ground), Some(KeyAction::Jump));
        assert_eq!(key_action(KeyCode::Space, MovementMode::Flight), None);
        assert_eq!(
            key_action(KeyCode::KeyR, MovementMode::Flight),
            Some(KeyAction::Move(Intent::Up))
        );
        assert_eq!(
            key_action(KeyCode::KeyF, MovementMode::Flight),
            Some(KeyAction::Move(Intent::Down))
        );
        assert_eq!(key_action(KeyCode::KeyR, MovementMode::Ground), None);
        assert_eq!(key_action(KeyCode::KeyQ, MovementMode::Ground), None);
    }

    #[test]
    fn test_apply_key_press_and_release() {
        let config = MovementConfig::default();
        let mut viewer = ViewerState::spawn(&config, 0.0);
        assert!(apply_key(&mut viewer, &config, KeyCode::KeyW, true));
        assert!(viewer.intent.contains(Intent::Forward));
        assert!(apply_key(&mut viewer, &config, KeyCode::ArrowUp, false));
        assert!(viewer.intent.is_empty());
        assert!(!apply_key(&mut viewer, &config, KeyCode::KeyZ, true));
    }

    #[test]
    fn test_space_jumps_when_grounded() {
        let config = MovementConfig::default();
        let mut viewer = ViewerState::spawn(&config, 0.0);
        viewer.grounded = true;
        apply_key(&mut viewer, &config, KeyCode::Space, true);
        assert_eq!(viewer.velocity.y, config.jump_impulse);
        apply_key(&mut viewer, &config, KeyCode::Space, false);
        assert_eq!(viewer.velocity.y, config.jump_impulse);
    }

    #[test]
    fn test_lock_transitions() {
        let mut controls = PointerLockControls::new();
        assert!(controls.overlay_visible());
        assert!(controls.lock());
        assert!(!controls.lock());
        assert!(!controls.overlay_visible());
        assert!(controls.unlock());
        assert!(!controls.unlock());
    }

    #[test]
    fn test_look_only_while_locked() {
        let mut controls = PointerLockControls::new();
        let mut viewer = ViewerState::new(Point3f::origin(), 0.0);
        controls.look(&mut viewer, 100.0, 100.0);
        assert_eq!(viewer.pitch, 0.0);

        controls.lock();
        controls.look(&mut viewer, 100.0, 0.0);
        assert_relative_eq!(viewer.pose.rotation.angle(), 0.2, epsilon = 1e-5);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut controls = PointerLockControls::new();
        controls.lock();
        let mut viewer = ViewerState::new(Point3f::origin(), 0.0);
        controls.look(&mut viewer, 0.0, -10_000.0);
        assert_eq!(viewer.pitch, FRAC_PI_2);
        controls.look(&mut viewer, 0.0, 10_000.0);
        assert_eq!(viewer.pitch, -FRAC_PI_2);
    }
}
