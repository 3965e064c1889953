//! First-person movement integrator
//!
//! Held keys become movement intents; every frame the intents are turned
//! into a damped velocity that moves the viewer in its own yaw frame. In
//! ground mode gravity pulls the viewer down onto a floor height and onto
//! any collider below it; in flight mode the vertical axis is driven by
//! intents and damped like the horizontal ones.

use arscene_core::{Aabb, Point3f, Pose, Ray, Vector3f};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementMode {
    /// Gravity, floor clamp and jumping
    #[default]
    Ground,
    /// Free vertical movement, no gravity
    Flight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub mode: MovementMode,
    /// Fraction of velocity removed per second
    pub damping: f32,
    pub acceleration: f32,
    pub gravity: f32,
    pub mass: f32,
    pub jump_impulse: f32,
    pub floor_height: f32,
    /// Length of the downward collision probe
    pub ray_length: f32,
    /// Upper bound on a single frame step in seconds; `None` never clamps
    pub max_delta: Option<f32>,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            mode: MovementMode::Ground,
            damping: 10.0,
            acceleration: 800.0,
            gravity: 9.8,
            mass: 100.0,
            jump_impulse: 350.0,
            floor_height: 10.0,
            ray_length: 10.0,
            max_delta: Some(0.1),
        }
    }
}

impl MovementConfig {
    pub fn flight() -> Self {
        Self {
            mode: MovementMode::Flight,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl Intent {
    pub const ALL: [Intent; 6] = [
        Intent::Forward,
        Intent::Backward,
        Intent::Left,
        Intent::Right,
        Intent::Up,
        Intent::Down,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// The set of currently held movement intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct MovementIntent(u8);

impl MovementIntent {
    pub fn new() -> Self {
        Self(0)
    }

    /// Press sets, release clears; the last event for an intent wins
    pub fn set(&mut self, intent: Intent, active: bool) {
        if active {
            self.0 |= intent.bit();
        } else {
            self.0 &= !intent.bit();
        }
    }

    pub fn with(mut self, intent: Intent) -> Self {
        self.set(intent, true);
        self
    }

    pub fn contains(&self, intent: Intent) -> bool {
        self.0 & intent.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    fn axis(&self, positive: Intent, negative: Intent) -> f32 {
        self.contains(positive) as u8 as f32 - self.contains(negative) as u8 as f32
    }

    /// Unit (or zero) direction in the viewer frame: `x` left, `y` down,
    /// `z` forward. The vertical component is only used in flight mode.
    pub fn direction(&self, mode: MovementMode) -> Vector3f {
        let vertical = match mode {
            MovementMode::Flight => self.axis(Intent::Down, Intent::Up),
            MovementMode::Ground => 0.0,
        };
        let dir = Vector3f::new(
            self.axis(Intent::Left, Intent::Right),
            vertical,
            self.axis(Intent::Forward, Intent::Backward),
        );
        dir.try_normalize(f32::EPSILON).unwrap_or_else(Vector3f::zeros)
    }
}

/// Everything the integrator mutates
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    /// Position and yaw; local -Z is forward
    pub pose: Pose,
    /// Look pitch, applied to the camera but not to movement
    pub pitch: f32,
    pub velocity: Vector3f,
    pub intent: MovementIntent,
    pub grounded: bool,
    /// Time of the last integrated frame, in seconds
    pub prev_time: f64,
}

impl ViewerState {
    pub fn new(position: Point3f, now: f64) -> Self {
        Self {
            pose: Pose::at(position),
            pitch: 0.0,
            velocity: Vector3f::zeros(),
            intent: MovementIntent::new(),
            grounded: false,
            prev_time: now,
        }
    }

    /// Start standing on the floor in ground mode, at the origin otherwise
    pub fn spawn(config: &MovementConfig, now: f64) -> Self {
        let y = match config.mode {
            MovementMode::Ground => config.floor_height,
            MovementMode::Flight => 0.0,
        };
        Self::new(Point3f::new(0.0, y, 0.0), now)
    }

    pub fn position(&self) -> Point3f {
        self.pose.position()
    }

    /// Jump if standing on something; any jump press leaves the ground
    pub fn jump(&mut self, config: &MovementConfig) {
        if self.grounded {
            self.velocity.y += config.jump_impulse;
        }
        self.grounded = false;
    }

    /// Advance the viewer to `now` (seconds). Returns the step used.
    pub fn integrate(&mut self, config: &MovementConfig, now: f64, colliders: &[Aabb]) -> f32 {
        let mut delta = ((now - self.prev_time) as f32).max(0.0);
        if let Some(max) = config.max_delta {
            delta = delta.min(max);
        }

        let damp = config.damping * delta;
        self.velocity.x -= self.velocity.x * damp;
        self.velocity.z -= self.velocity.z * damp;
        match config.mode {
            MovementMode::Ground => self.velocity.y -= config.gravity * config.mass * delta,
            MovementMode::Flight => self.velocity.y -= self.velocity.y * damp,
        }

        let dir = self.intent.direction(config.mode);
        let push = config.acceleration * delta;
        if self.intent.contains(Intent::Forward) || self.intent.contains(Intent::Backward) {
            self.velocity.z -= dir.z * push;
        }
        if self.intent.contains(Intent::Left) || self.intent.contains(Intent::Right) {
            self.velocity.x -= dir.x * push;
        }
        if config.mode == MovementMode::Flight
            && (self.intent.contains(Intent::Up) || self.intent.contains(Intent::Down))
        {
            self.velocity.y -= dir.y * push;
        }

        if config.mode == MovementMode::Ground && self.standing_on(colliders, config.ray_length) {
            self.velocity.y = self.velocity.y.max(0.0);
            self.grounded = true;
        }

        self.pose.translate_local(&(self.velocity * delta));

        if config.mode == MovementMode::Ground && self.pose.translation.y < config.floor_height {
            self.velocity.y = 0.0;
            self.pose.translation.y = config.floor_height;
            self.grounded = true;
        }

        self.prev_time = now;
        delta
    }

    fn standing_on(&self, colliders: &[Aabb], ray_length: f32) -> bool {
        if colliders.is_empty() {
            return false;
        }
        let origin = self.position() - Vector3f::new(0.0, ray_length, 0.0);
        let ray = Ray::new(origin, -Vector3f::y(), 0.0, ray_length);
        colliders.iter().any(|c| ray.intersect_aabb(c).is_some())
    }
}
