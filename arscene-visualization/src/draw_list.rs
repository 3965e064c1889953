//! Scene flattening into world-space vertex lists
//!
//! GPU backends upload these as-is: one list per primitive topology.

use arscene_core::{Aabb, Point3f, Pose, Rgb, TriangleMesh, Vector3f};
use arscene_scene::{CameraPathStyle, HemisphereLight, Material, NodeKind, Scene};
use bytemuck::{Pod, Zeroable};

/// Vertex shared by every pipeline
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl SceneVertex {
    pub fn new(position: Point3f, color: Rgb, alpha: f32) -> Self {
        Self {
            position: [position.x, position.y, position.z],
            color: [color.r, color.g, color.b, alpha],
        }
    }

    /// Vertex buffer layout descriptor
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SceneVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Color
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Everything visible in a scene, grouped by topology
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub points: Vec<SceneVertex>,
    /// Pairs of vertices, one pair per segment
    pub lines: Vec<SceneVertex>,
    /// Triples of vertices with lighting already applied
    pub triangles: Vec<SceneVertex>,
    /// Triangles of transparent materials, drawn last without depth writes
    pub translucent: Vec<SceneVertex>,
}

impl DrawList {
    pub fn from_scene(scene: &Scene) -> Self {
        let mut list = Self::default();
        let light = &scene.atmosphere.light;

        for node in &scene.nodes {
            let alpha = node.material.opacity.clamp(0.0, 1.0);
            let iso = node.pose.isometry();
            let world = |p: &Point3f| iso.transform_point(p);
            match &node.kind {
                NodeKind::Points(layer) => {
                    list.points.extend(layer.cloud.points.iter().map(|p| {
                        let color = if node.material.vertex_colors {
                            p.color
                        } else {
                            node.material.color
                        };
                        SceneVertex::new(world(&p.position), color, alpha)
                    }));
                }
                NodeKind::Polyline(path) => {
                    let color = node.material.color;
                    match path.style {
                        CameraPathStyle::Line => {
                            for (a, b) in path.segments() {
                                list.lines.push(SceneVertex::new(world(&a), color, alpha));
                                list.lines.push(SceneVertex::new(world(&b), color, alpha));
                            }
                        }
                        CameraPathStyle::Points => {
                            list.points.extend(
                                path.points
                                    .iter()
                                    .map(|p| SceneVertex::new(world(p), color, alpha)),
                            );
                        }
                    }
                }
                NodeKind::BoxHelper(aabb) => {
                    for (a, b) in box_edges(aabb) {
                        list.lines.push(SceneVertex::new(world(&a), node.material.color, alpha));
                        list.lines.push(SceneVertex::new(world(&b), node.material.color, alpha));
                    }
                }
                NodeKind::Mesh(mesh) => {
                    let out = if node.material.transparent {
                        &mut list.translucent
                    } else {
                        &mut list.triangles
                    };
                    push_mesh(out, mesh, &node.pose, &node.material, light);
                }
            }
        }
        list
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
            && self.lines.is_empty()
            && self.triangles.is_empty()
            && self.translucent.is_empty()
    }
}

/// The twelve edges of a box outline
fn box_edges(aabb: &Aabb) -> impl Iterator<Item = (Point3f, Point3f)> {
    let (lo, hi) = (aabb.min, aabb.max);
    let corner = move |i: usize| {
        Point3f::new(
            if i & 1 == 0 { lo.x } else { hi.x },
            if i & 2 == 0 { lo.y } else { hi.y },
            if i & 4 == 0 { lo.z } else { hi.z },
        )
    };
    // Corners differing in exactly one bit share an edge
    (0..8usize).flat_map(move |i| {
        [1usize, 2, 4]
            .into_iter()
            .filter(move |bit| i & bit == 0)
            .map(move |bit| (corner(i), corner(i | bit)))
    })
}

/// Flat-shaded, de-indexed triangles lit by the hemisphere light
fn push_mesh(
    out: &mut Vec<SceneVertex>,
    mesh: &TriangleMesh,
    pose: &Pose,
    material: &Material,
    light: &HemisphereLight,
) {
    let iso = pose.isometry();
    let colors = mesh
        .colors
        .as_ref()
        .filter(|c| material.vertex_colors && c.len() == mesh.vertices.len());
    let alpha = material.opacity.clamp(0.0, 1.0);

    for face in &mesh.faces {
        let corners = face.map(|i| iso.transform_point(&mesh.vertices[i]));
        let normal = (corners[1] - corners[0])
            .cross(&(corners[2] - corners[0]))
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3f::y);
        let shade = hemisphere(light, &normal);

        for (corner, &index) in corners.iter().zip(face) {
            let base = colors.map_or(material.color, |c| c[index]);
            let lit = Rgb::new(base.r * shade.r, base.g * shade.g, base.b * shade.b);
            out.push(SceneVertex::new(*corner, lit, alpha));
        }
    }
}

/// Sky color for normals facing up, ground color facing down
pub fn hemisphere(light: &HemisphereLight, normal: &Vector3f) -> Rgb {
    let w = 0.5 * normal.y + 0.5;
    let mix = |g: f32, s: f32| (g + (s - g) * w) * light.intensity;
    Rgb::new(
        mix(light.ground.r, light.sky.r),
        mix(light.ground.g, light.sky.g),
        mix(light.ground.b, light.sky.b),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use arscene_core::UnitQuaternion;
    use arscene_scene::{names, Polyline, SceneNode};

    fn light() -> HemisphereLight {
        HemisphereLight {
            sky: Rgb::new(1.0, 1.0, 1.0),
            ground: Rgb::new(0.0, 0.0, 0.0),
            intensity: 1.0,
            position: [0.0, 1.0, 0.0],
        }
    }

    #[test]
    fn test_box_helper_has_twelve_edges() {
        let aabb = Aabb::new(Point3f::new(-1.0, 0.0, -1.0), Point3f::new(1.0, 2.0, 1.0));
        let edges: Vec<_> = box_edges(&aabb).collect();
        assert_eq!(edges.len(), 12);
        for (a, b) in edges {
            assert_relative_eq!((b - a).norm(), 2.0);
        }
    }

    #[test]
    fn test_mesh_pose_and_opacity_are_applied() {
        let mut scene = Scene::default();
        scene.atmosphere.light = light();
        let mut pose = Pose::at(Point3f::new(10.0, 0.0, 0.0));
        pose.rotation = UnitQuaternion::from_euler_angles(0.0, std::f32::consts::FRAC_PI_2, 0.0);
        scene.nodes.push(
            SceneNode::new(
                "anchor/0",
                NodeKind::Mesh(TriangleMesh::cuboid(2.0, 0.1, 2.0)),
                Material::translucent(Rgb::new(0.0, 1.0, 0.0), 0.5),
            )
            .with_pose(pose),
        );

        let list = DrawList::from_scene(&scene);
        assert!(list.points.is_empty() && list.lines.is_empty() && list.triangles.is_empty());
        assert_eq!(list.translucent.len(), 12 * 3);
        for v in &list.translucent {
            assert!((v.position[0] - 10.0).abs() <= 1.0 + 1e-5);
            assert_eq!(v.color[3], 0.5);
            assert_eq!(v.color[0], 0.0);
        }
        // The upward face is fully lit by the sky, the downward one is black
        let greens: Vec<f32> = list.translucent.iter().map(|v| v.color[1]).collect();
        assert!(greens.iter().any(|g| (g - 1.0).abs() < 1e-5));
        assert!(greens.iter().any(|g| g.abs() < 1e-5));
    }

    #[test]
    fn test_camera_path_styles() {
        let points = vec![
            Point3f::origin(),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 1.0),
        ];
        let mut scene = Scene::default();
        scene.nodes.push(SceneNode::new(
            names::CAMERA_PATH,
            NodeKind::Polyline(Polyline {
                points: points.clone(),
                style: CameraPathStyle::Line,
            }),
            Material::solid(Rgb::new(1.0, 0.0, 0.0)),
        ));
        let lines = DrawList::from_scene(&scene);
        assert_eq!(lines.lines.len(), 4);
        assert_eq!(lines.lines[3].position, [1.0, 0.0, 1.0]);

        scene.nodes[0].kind = NodeKind::Polyline(Polyline {
            points,
            style: CameraPathStyle::Points,
        });
        let dots = DrawList::from_scene(&scene);
        assert!(dots.lines.is_empty());
        assert_eq!(dots.points.len(), 3);
        assert_eq!(dots.points[0].color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_hemisphere_mixes_sky_and_ground() {
        let side = hemisphere(&light(), &Vector3f::x());
        assert_relative_eq!(side.r, 0.5);
        let down = hemisphere(&light(), &-Vector3f::y());
        assert_relative_eq!(down.g, 0.0);
    }
}
