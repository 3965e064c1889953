//! Core traits for arscene

use crate::{bounds::Aabb, mesh::*, point::*, point_cloud::*, transform::Transform3D};

/// Trait for drawable/renderable objects
pub trait Drawable {
    /// Axis-aligned bounds of the object, degenerate at the origin when empty
    fn bounding_box(&self) -> Aabb;

    fn center(&self) -> Point3f {
        self.bounding_box().center()
    }
}

/// Trait for objects that can be transformed
pub trait Transformable {
    /// Apply a transformation to the object
    fn transform(&mut self, transform: &Transform3D);
}

fn bounds_or_origin<'a>(points: impl IntoIterator<Item = &'a Point3f>) -> Aabb {
    Aabb::from_points(points).unwrap_or_else(|| Aabb::new(Point3f::origin(), Point3f::origin()))
}

impl<T> Drawable for PointCloud<T>
where
    T: Clone + Copy,
    Point3f: From<T>,
{
    fn bounding_box(&self) -> Aabb {
        let positions: Vec<Point3f> = self.points.iter().map(|p| Point3f::from(*p)).collect();
        bounds_or_origin(&positions)
    }
}

impl Drawable for TriangleMesh {
    fn bounding_box(&self) -> Aabb {
        bounds_or_origin(&self.vertices)
    }
}
