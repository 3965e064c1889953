//! Core data structures and traits for arscene
//!
//! This crate provides the geometric vocabulary shared by the loader, the
//! scene builder and the viewer: points, point clouds, triangle meshes,
//! poses, colors and bounding volumes.

pub mod point;
pub mod point_cloud;
pub mod mesh;
pub mod traits;
pub mod transform;
pub mod color;
pub mod bounds;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use mesh::*;
pub use traits::*;
pub use transform::*;
pub use color::*;
pub use bounds::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix4, UnitQuaternion};
