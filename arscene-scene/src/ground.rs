//! Jittered, pastel-colored ground plane

use crate::config::GroundPlaneConfig;
use crate::scene::{names, Material, NodeKind, SceneNode};
use arscene_core::{Rgb, Transform3D, Transformable, TriangleMesh, UnitQuaternion, Vector3f};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::FRAC_PI_2;

/// The ground mesh with one independent color per triangle corner
#[derive(Debug, Clone)]
pub struct GroundPlane {
    pub mesh: TriangleMesh,
}

impl GroundPlane {
    /// Build from the config's seed, or from entropy when unseeded
    pub fn build(config: &GroundPlaneConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::build_with_rng(config, &mut rng)
    }

    pub fn build_with_rng<R: Rng>(config: &GroundPlaneConfig, rng: &mut R) -> Self {
        let mut mesh =
            TriangleMesh::plane_grid(config.size, config.size, config.segments, config.segments);
        mesh.transform(&Transform3D::rotation(UnitQuaternion::from_axis_angle(
            &Vector3f::x_axis(),
            -FRAC_PI_2,
        )));

        let jitter = config.horizontal_jitter;
        for v in &mut mesh.vertices {
            v.x += sample_between(rng, -jitter, jitter);
            v.y += config.vertical_offset + sample_between(rng, 0.0, config.vertical_span);
            v.z += sample_between(rng, -jitter, jitter);
        }

        // Every triangle gets its own corners so colors do not blend across faces
        let mut mesh = mesh.to_non_indexed();
        let colors = (0..mesh.vertex_count())
            .map(|_| {
                Rgb::from_hsl(
                    config.hue_min + sample_between(rng, 0.0, config.hue_span),
                    config.saturation,
                    config.lightness_min + sample_between(rng, 0.0, config.lightness_span),
                )
            })
            .collect();
        mesh.set_colors(colors);

        Self { mesh }
    }

    pub fn to_node(&self) -> SceneNode {
        SceneNode::new(
            names::GROUND,
            NodeKind::Mesh(self.mesh.clone()),
            Material::vertex_colored(),
        )
    }
}

/// Uniform sample between `a` and `b`, in either order
fn sample_between<R: Rng>(rng: &mut R, a: f32, b: f32) -> f32 {
    rng.gen_range(a.min(b)..=a.max(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> GroundPlaneConfig {
        GroundPlaneConfig {
            size: 200.0,
            segments: 10,
            seed: Some(7),
            ..GroundPlaneConfig::default()
        }
    }

    #[test]
    fn test_default_plane_is_fully_deindexed() {
        let plane = GroundPlane::build(&GroundPlaneConfig {
            seed: Some(1),
            ..GroundPlaneConfig::default()
        });
        assert_eq!(plane.mesh.vertex_count(), 100 * 100 * 2 * 3);
        assert_eq!(plane.mesh.face_count(), 100 * 100 * 2);
        assert_eq!(plane.mesh.colors.as_ref().map(Vec::len), Some(60_000));
    }

    #[test]
    fn test_vertices_stay_within_jitter_band() {
        let config = small();
        let plane = GroundPlane::build(&config);
        let half = config.size / 2.0 + config.horizontal_jitter;
        for v in &plane.mesh.vertices {
            assert!(v.x.abs() <= half + 1e-3 && v.z.abs() <= half + 1e-3);
            assert!(v.y >= -200.0 - 1e-3 && v.y <= -198.0 + 1e-3);
        }
    }

    #[test]
    fn test_colors_are_blue_pastels() {
        let plane = GroundPlane::build(&small());
        for c in plane.mesh.colors.as_ref().unwrap() {
            for channel in c.to_array() {
                assert!((0.56..=1.0 + 1e-6).contains(&channel), "channel {}", channel);
            }
            assert!(c.b + 1e-6 >= c.r && c.b + 1e-6 >= c.g);
        }
    }

    #[test]
    fn test_seed_makes_plane_reproducible() {
        let a = GroundPlane::build(&small());
        let b = GroundPlane::build(&small());
        assert_eq!(a.mesh.vertices, b.mesh.vertices);
        assert_eq!(a.mesh.colors, b.mesh.colors);
    }

    #[test]
    fn test_negative_spans_sample_below_the_minimum() {
        let config = GroundPlaneConfig {
            horizontal_jitter: -10.0,
            vertical_span: -2.0,
            hue_span: -0.3,
            lightness_span: -0.25,
            ..small()
        };
        let plane = GroundPlane::build(&config);
        let half = config.size / 2.0 + 10.0;
        for v in &plane.mesh.vertices {
            assert!(v.x.abs() <= half + 1e-3 && v.z.abs() <= half + 1e-3);
            assert!(v.y >= -202.0 - 1e-3 && v.y <= -200.0 + 1e-3);
        }
        assert_eq!(plane.mesh.colors.as_ref().map(Vec::len), Some(plane.mesh.vertex_count()));
    }
}
