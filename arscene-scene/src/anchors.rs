//! Plane anchor and object boxes

use crate::config::{ObjectSizing, SceneConfig};
use crate::scene::{names, Material, NodeKind, SceneNode};
use arscene_core::{Pose, Rgb, TriangleMesh};
use arscene_io::{AnchorRecord, ObjectRecord, PlaneOrientation};
use std::f32::consts::FRAC_PI_2;

pub const ANCHOR_COLOR: u32 = 0x7a7978;
pub const OBJECT_COLOR: u32 = 0xee0979;

/// A thin box spanning the anchor's scaled width and length.
///
/// Vertical anchors are stood up with a quarter turn about X. The recorded
/// quaternion is only applied when the config asks for it.
pub fn anchor_node(index: usize, record: &AnchorRecord, config: &SceneConfig) -> SceneNode {
    let scale = config.scale;
    let mesh = TriangleMesh::cuboid(
        record.width * scale,
        config.anchor_thickness,
        record.length * scale,
    );

    let mut pose = Pose::at(record.position() * scale);
    if record.orientation == PlaneOrientation::Vertical {
        pose.rotate_x(-FRAC_PI_2);
    }
    if config.apply_anchor_rotation {
        if let Some(rotation) = record.rotation() {
            pose.rotation *= rotation;
        }
    }

    SceneNode::new(
        format!("{}/{}", names::ANCHOR, index),
        NodeKind::Mesh(mesh),
        Material::translucent(Rgb::from_hex(ANCHOR_COLOR), 0.7),
    )
    .with_pose(pose)
}

/// A box marking a detected object
pub fn object_node(index: usize, record: &ObjectRecord, config: &SceneConfig) -> SceneNode {
    let scale = config.scale;
    let mesh = match config.object_sizing {
        ObjectSizing::Fixed(edge) => TriangleMesh::cuboid(edge, edge, edge),
        ObjectSizing::FromRecord { height } => {
            TriangleMesh::cuboid(record.width * scale, height, record.length * scale)
        }
    };

    SceneNode::new(
        format!("{}/{}", names::OBJECT, index),
        NodeKind::Mesh(mesh),
        Material::translucent(Rgb::from_hex(OBJECT_COLOR), 0.8),
    )
    .with_pose(Pose::at(record.position() * scale))
}
