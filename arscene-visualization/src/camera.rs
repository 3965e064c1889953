//! Perspective camera driven by the first-person viewer

use crate::movement::ViewerState;
use arscene_core::{Point3f, UnitQuaternion, Vector3f};
use nalgebra::{Isometry3, Matrix4, Perspective3, Translation3};
use serde::{Deserialize, Serialize};

/// A perspective camera whose pose follows a [`ViewerState`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            fov,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Track the drawable size; a zero height keeps the previous aspect
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    /// World orientation of the eye: yaw from the viewer pose, then pitch
    pub fn orientation(viewer: &ViewerState) -> UnitQuaternion<f32> {
        viewer.pose.rotation * UnitQuaternion::from_axis_angle(&Vector3f::x_axis(), viewer.pitch)
    }

    pub fn eye(viewer: &ViewerState) -> Point3f {
        viewer.position()
    }

    /// Unit vector the eye looks along
    pub fn look_direction(viewer: &ViewerState) -> Vector3f {
        Self::orientation(viewer) * -Vector3f::z()
    }

    /// Get the view matrix
    pub fn view_matrix(&self, viewer: &ViewerState) -> Matrix4<f32> {
        let eye = Isometry3::from_parts(
            Translation3::from(viewer.pose.translation),
            Self::orientation(viewer),
        );
        eye.inverse().to_homogeneous()
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let perspective = Perspective3::new(
            self.aspect_ratio,
            self.fov.to_radians(),
            self.near,
            self.far,
        );
        perspective.into_inner()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(75.0, 16.0 / 9.0, 1.0, 1000.0)
    }
}
