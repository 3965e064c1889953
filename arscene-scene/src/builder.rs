//! One-shot conversion of a loaded dataset into a scene

use crate::anchors::{anchor_node, object_node, ANCHOR_COLOR};
use crate::camera_path::Polyline;
use crate::config::SceneConfig;
use crate::ground::GroundPlane;
use crate::point_cloud::PointCloudLayer;
use crate::scene::{names, Material, NodeKind, Scene, SceneNode};
use arscene_core::Rgb;
use arscene_io::Dataset;
use tracing::{debug, info};

pub struct SceneBuilder<'a> {
    config: &'a SceneConfig,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(config: &'a SceneConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, dataset: &Dataset) -> Scene {
        self.build_with_ground(dataset, GroundPlane::build(&self.config.ground))
    }

    /// Build with a ground plane produced elsewhere, e.g. from a custom RNG
    pub fn build_with_ground(&self, dataset: &Dataset, ground: GroundPlane) -> Scene {
        let config = self.config;
        let mut nodes = Vec::new();

        let layer = PointCloudLayer::build(
            &dataset.points,
            config.scale,
            config.seed_height_range_at_origin,
        );
        debug!("floor height {}", layer.min_height);
        let bounds = layer.bounds;
        nodes.push(SceneNode::new(
            names::POINT_CLOUD,
            NodeKind::Points(layer),
            Material {
                opacity: 0.9,
                point_size: Some(1.0),
                ..Material::vertex_colored()
            },
        ));
        nodes.push(SceneNode::new(
            names::POINT_CLOUD_BOUNDS,
            NodeKind::BoxHelper(bounds),
            Material::solid(Rgb::from_hex(ANCHOR_COLOR)),
        ));

        nodes.extend(
            dataset
                .anchors
                .iter()
                .enumerate()
                .map(|(i, a)| anchor_node(i, a, config)),
        );
        nodes.extend(
            dataset
                .objects
                .iter()
                .enumerate()
                .map(|(i, o)| object_node(i, o, config)),
        );

        let path = Polyline::from_camera_path(&dataset.camera_path, config.scale, config.camera_path_style);
        debug!("camera path length {:.1}", path.length());
        nodes.push(SceneNode::new(
            names::CAMERA_PATH,
            NodeKind::Polyline(path),
            Material::solid(Rgb::WHITE),
        ));

        if config.ground.attach {
            nodes.push(ground.to_node());
        }

        info!(
            "scene built: {} points, {} anchors, {} objects, {} camera samples",
            dataset.points.len(),
            dataset.anchors.len(),
            dataset.objects.len(),
            dataset.camera_path.len()
        );

        Scene {
            atmosphere: config.atmosphere,
            nodes,
            ground: Some(ground),
            decorations: Default::default(),
        }
    }
}
