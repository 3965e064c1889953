//! Scene construction from ARKit capture data
//!
//! Turns a loaded [`arscene_io::Dataset`] into static geometry:
//! - A point cloud colored by height
//! - Thin boxes for detected plane anchors, cubes for detected objects
//! - The device camera trajectory
//! - An optional jittered ground plane
//!
//! The scene is built once; only the idle decorations touch it afterwards.

pub mod config;
pub mod scene;
pub mod point_cloud;
pub mod anchors;
pub mod camera_path;
pub mod ground;
pub mod decoration;
pub mod builder;

pub use builder::SceneBuilder;
pub use camera_path::Polyline;
pub use config::*;
pub use decoration::{Decorations, HueCycle};
pub use ground::GroundPlane;
pub use point_cloud::{height_color, PointCloudLayer};
pub use scene::{names, Material, NodeKind, Scene, SceneNode};
