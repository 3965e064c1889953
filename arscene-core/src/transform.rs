//! 3D transformation utilities

use nalgebra::{Isometry3, Matrix4, Point3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D transformation that can be applied to points and meshes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    pub fn translation(translation: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    pub fn rotation(rotation: UnitQuaternion<f32>) -> Self {
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    pub fn uniform_scaling(scale: f32) -> Self {
        Self {
            matrix: Matrix4::new_scaling(scale),
        }
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Apply the linear part of the transformation to a vector
    pub fn transform_vector(&self, vector: &Vector3<f32>) -> Vector3<f32> {
        self.matrix.fixed_view::<3, 3>(0, 0) * vector
    }

    /// Compose this transformation with another (`self` applied last)
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

impl From<Isometry3<f32>> for Transform3D {
    fn from(isometry: Isometry3<f32>) -> Self {
        Self {
            matrix: isometry.to_homogeneous(),
        }
    }
}

/// Position and orientation of a scene node or of the viewer.
///
/// Rotations and translations through the `*_local` methods act in the
/// node's own frame, the way a scene-graph object is nudged by controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub translation: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
}

impl Pose {
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
        }
    }

    pub fn at(position: Point3<f32>) -> Self {
        Self {
            translation: position.coords,
            rotation: UnitQuaternion::identity(),
        }
    }

    pub fn position(&self) -> Point3<f32> {
        Point3::from(self.translation)
    }

    pub fn set_position(&mut self, position: Point3<f32>) {
        self.translation = position.coords;
    }

    /// Rotate about the local X axis
    pub fn rotate_x(&mut self, angle: f32) {
        self.rotation *= UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angle);
    }

    /// Rotate about the local Y axis
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation *= UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle);
    }

    /// Move along the local axes
    pub fn translate_local(&mut self, offset: &Vector3<f32>) {
        self.translation += self.rotation * offset;
    }

    pub fn isometry(&self) -> Isometry3<f32> {
        Isometry3::from_parts(Translation3::from(self.translation), self.rotation)
    }

    pub fn to_transform(&self) -> Transform3D {
        Transform3D::from(self.isometry())
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}
