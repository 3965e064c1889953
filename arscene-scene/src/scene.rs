//! The static scene produced by the builder

use crate::camera_path::Polyline;
use crate::config::Atmosphere;
use crate::decoration::Decorations;
use crate::ground::GroundPlane;
use crate::point_cloud::PointCloudLayer;
use arscene_core::{Aabb, Pose, Rgb, TriangleMesh};

/// Surface appearance of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Rgb,
    /// Use per-vertex colors instead of `color`
    pub vertex_colors: bool,
    pub opacity: f32,
    pub transparent: bool,
    /// Screen size of point primitives, only meaningful for point layers
    pub point_size: Option<f32>,
}

impl Material {
    pub fn solid(color: Rgb) -> Self {
        Self {
            color,
            vertex_colors: false,
            opacity: 1.0,
            transparent: false,
            point_size: None,
        }
    }

    pub fn translucent(color: Rgb, opacity: f32) -> Self {
        Self {
            opacity,
            transparent: true,
            ..Self::solid(color)
        }
    }

    pub fn vertex_colored() -> Self {
        Self {
            vertex_colors: true,
            ..Self::solid(Rgb::WHITE)
        }
    }
}

/// Geometry carried by a node
#[derive(Debug, Clone)]
pub enum NodeKind {
    Points(PointCloudLayer),
    Mesh(TriangleMesh),
    Polyline(Polyline),
    /// Wireframe outline of a box
    BoxHelper(Aabb),
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    pub pose: Pose,
    pub material: Material,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, kind: NodeKind, material: Material) -> Self {
        Self {
            name: name.into(),
            kind,
            pose: Pose::identity(),
            material,
        }
    }

    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    pub fn mesh(&self) -> Option<&TriangleMesh> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }
}

/// Node name prefixes
pub mod names {
    pub const POINT_CLOUD: &str = "point_cloud";
    pub const POINT_CLOUD_BOUNDS: &str = "point_cloud_bounds";
    pub const ANCHOR: &str = "anchor";
    pub const OBJECT: &str = "object";
    pub const CAMERA_PATH: &str = "camera_path";
    pub const GROUND: &str = "ground";
}

/// A fully built scene: visible nodes plus the layers kept aside
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub atmosphere: Atmosphere,
    pub nodes: Vec<SceneNode>,
    /// Built ground plane; also present in `nodes` only when attached
    pub ground: Option<GroundPlane>,
    pub decorations: Decorations,
}

impl Scene {
    pub fn node(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Nodes named `<prefix>/<index>` in insertion order
    pub fn nodes_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a SceneNode> + 'a {
        self.nodes.iter().filter(move |n| {
            n.name
                .strip_prefix(prefix)
                .map_or(false, |rest| rest.starts_with('/'))
        })
    }

    pub fn point_cloud(&self) -> Option<&PointCloudLayer> {
        self.nodes.iter().find_map(|n| match &n.kind {
            NodeKind::Points(layer) => Some(layer),
            _ => None,
        })
    }

    pub fn camera_path(&self) -> Option<&Polyline> {
        self.nodes.iter().find_map(|n| match &n.kind {
            NodeKind::Polyline(path) => Some(path),
            _ => None,
        })
    }
}
