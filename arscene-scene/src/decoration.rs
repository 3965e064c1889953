//! Idle animation of scene nodes between frames
//!
//! Nothing is registered by default; the lists exist so a scene can opt in
//! to spinning point layers or hue-cycling materials.

use crate::scene::{NodeKind, Scene};
use arscene_core::{Rgb, UnitQuaternion};
use std::f64::consts::TAU;

/// Wall-clock milliseconds to animation time
pub const TIME_SCALE: f64 = 0.00005;

/// A material whose hue drifts with time from a base HSL color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueCycle {
    pub node: usize,
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decorations {
    /// Indices of point layers that spin about Y
    pub spinning: Vec<usize>,
    pub hue_cycles: Vec<HueCycle>,
}

impl Decorations {
    pub fn is_empty(&self) -> bool {
        self.spinning.is_empty() && self.hue_cycles.is_empty()
    }
}

/// Animation angle for the spinning node at `index`; the first four turn one
/// way at increasing rates, the rest turn the other way.
///
/// `time` stays `f64` until the angle is wrapped to one turn, so epoch-sized
/// times keep their sub-second resolution.
pub fn spin_angle(index: usize, time: f64) -> f32 {
    let turn = (time * (index + 1) as f64).rem_euclid(TAU) as f32;
    if index < 4 {
        turn
    } else {
        -turn
    }
}

/// Hue after drifting by `time` whole turns, wrapped to `[0, 1)`
pub fn cycled_hue(hue: f32, time: f64) -> f32 {
    (hue as f64 + time).rem_euclid(1.0) as f32
}

impl Scene {
    /// Advance idle decorations to `wall_ms`
    pub fn animate(&mut self, wall_ms: f64) {
        if self.decorations.is_empty() {
            return;
        }
        let time = wall_ms * TIME_SCALE;

        for &index in &self.decorations.spinning {
            if let Some(node) = self.nodes.get_mut(index) {
                if matches!(node.kind, NodeKind::Points(_)) {
                    let angle = spin_angle(index, time);
                    node.pose.rotation = UnitQuaternion::from_euler_angles(0.0, angle, 0.0);
                }
            }
        }

        for cycle in &self.decorations.hue_cycles {
            if let Some(node) = self.nodes.get_mut(cycle.node) {
                node.material.color = Rgb::from_hsl(
                    cycled_hue(cycle.hue, time),
                    cycle.saturation,
                    cycle.lightness,
                );
            }
        }
    }
}
