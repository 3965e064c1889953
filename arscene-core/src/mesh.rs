//! Mesh data structures and functionality

use crate::color::Rgb;
use crate::point::*;
use crate::traits::Transformable;
use crate::transform::Transform3D;
use serde::{Deserialize, Serialize};

/// A triangle mesh with vertices and faces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub normals: Option<Vec<Vector3f>>,
    pub colors: Option<Vec<Rgb>>,
}

impl TriangleMesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            normals: None,
            colors: None,
        }
    }

    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            normals: None,
            colors: None,
        }
    }

    /// Axis-aligned box centered on the origin with the given full extents.
    ///
    /// Each side gets its own four vertices so flat normals stay per face.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);
        // (normal, u axis, v axis) for each side
        let sides: [(Vector3f, Vector3f, Vector3f); 6] = [
            (Vector3f::x(), -Vector3f::z(), Vector3f::y()),
            (-Vector3f::x(), Vector3f::z(), Vector3f::y()),
            (Vector3f::y(), Vector3f::x(), -Vector3f::z()),
            (-Vector3f::y(), Vector3f::x(), Vector3f::z()),
            (Vector3f::z(), Vector3f::x(), Vector3f::y()),
            (-Vector3f::z(), -Vector3f::x(), Vector3f::y()),
        ];
        let half = Vector3f::new(hx, hy, hz);

        let mut mesh = Self::new();
        let mut normals = Vec::with_capacity(24);
        for (n, u, v) in sides {
            let center = n.component_mul(&half);
            let du = u.component_mul(&half);
            let dv = v.component_mul(&half);
            let base = mesh.vertices.len();
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                mesh.vertices.push(Point3f::from(center + du * su + dv * sv));
                normals.push(n);
            }
            mesh.faces.push([base, base + 1, base + 2]);
            mesh.faces.push([base, base + 2, base + 3]);
        }
        mesh.normals = Some(normals);
        mesh
    }

    /// Regular grid in the XY plane facing +Z, centered on the origin.
    ///
    /// Vertices are laid out row by row from the top edge, `(segments_x + 1)`
    /// per row.
    pub fn plane_grid(width: f32, height: f32, segments_x: usize, segments_y: usize) -> Self {
        let segments_x = segments_x.max(1);
        let segments_y = segments_y.max(1);
        let cols = segments_x + 1;
        let rows = segments_y + 1;
        let step_x = width / segments_x as f32;
        let step_y = height / segments_y as f32;

        let mut vertices = Vec::with_capacity(cols * rows);
        for iy in 0..rows {
            let y = height * 0.5 - iy as f32 * step_y;
            for ix in 0..cols {
                let x = ix as f32 * step_x - width * 0.5;
                vertices.push(Point3f::new(x, y, 0.0));
            }
        }

        let mut faces = Vec::with_capacity(segments_x * segments_y * 2);
        for iy in 0..segments_y {
            for ix in 0..segments_x {
                let a = ix + cols * iy;
                let b = ix + cols * (iy + 1);
                let c = (ix + 1) + cols * (iy + 1);
                let d = (ix + 1) + cols * iy;
                faces.push([a, b, d]);
                faces.push([b, c, d]);
            }
        }

        let mut mesh = Self::from_vertices_and_faces(vertices, faces);
        mesh.normals = Some(vec![Vector3f::z(); cols * rows]);
        mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Expand the index buffer so every face owns its three vertices.
    ///
    /// Per-vertex attributes are duplicated alongside.
    pub fn to_non_indexed(&self) -> Self {
        let corners = self.faces.iter().flat_map(|f| f.iter().copied());
        let vertices = corners.clone().map(|i| self.vertices[i]).collect();
        let normals = self
            .normals
            .as_ref()
            .map(|n| corners.clone().map(|i| n[i]).collect());
        let colors = self
            .colors
            .as_ref()
            .map(|c| corners.clone().map(|i| c[i]).collect());
        let faces = (0..self.faces.len())
            .map(|f| [3 * f, 3 * f + 1, 3 * f + 2])
            .collect();

        Self {
            vertices,
            faces,
            normals,
            colors,
        }
    }

    /// Calculate face normals
    pub fn calculate_face_normals(&self) -> Vec<Vector3f> {
        self.faces
            .iter()
            .map(|face| {
                let v0 = self.vertices[face[0]];
                let edge1 = self.vertices[face[1]] - v0;
                let edge2 = self.vertices[face[2]] - v0;
                edge1.cross(&edge2).normalize()
            })
            .collect()
    }

    /// Set vertex colors, ignored unless there is one color per vertex
    pub fn set_colors(&mut self, colors: Vec<Rgb>) {
        if colors.len() == self.vertices.len() {
            self.colors = Some(colors);
        }
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformable for TriangleMesh {
    fn transform(&mut self, transform: &Transform3D) {
        for v in &mut self.vertices {
            *v = transform.transform_point(v);
        }
        if let Some(normals) = &mut self.normals {
            for n in normals.iter_mut() {
                *n = transform.transform_vector(n).normalize();
            }
        }
    }
}
