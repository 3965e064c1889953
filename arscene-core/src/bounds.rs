//! Bounding volumes and ray queries

use crate::point::*;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3f,
    pub max: Point3f,
}

impl Aabb {
    pub fn new(min: Point3f, max: Point3f) -> Self {
        Self { min, max }
    }

    /// Box of the given full extents centered on `center`
    pub fn from_center_size(center: Point3f, size: Vector3f) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Tightest box around the points, `None` when the iterator is empty
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3f>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut aabb = Self::new(first, first);
        for p in iter {
            aabb.expand_to(p);
        }
        Some(aabb)
    }

    pub fn expand_to(&mut self, p: &Point3f) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    pub fn center(&self) -> Point3f {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn size(&self) -> Vector3f {
        self.max - self.min
    }

    pub fn contains(&self, p: &Point3f) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }
}

/// Sphere enclosing a set of points, centered on their bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    pub center: Point3f,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn from_points(points: &[Point3f]) -> Option<Self> {
        let center = Aabb::from_points(points)?.center();
        let radius = points
            .iter()
            .map(|p| nalgebra::distance_squared(&center, p))
            .fold(0.0f32, f32::max)
            .sqrt();
        Some(Self { center, radius })
    }
}

/// A ray limited to `[near, far]` along its direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3f,
    pub direction: Vector3f,
    pub near: f32,
    pub far: f32,
}

impl Ray {
    pub fn new(origin: Point3f, direction: Vector3f, near: f32, far: f32) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            near,
            far,
        }
    }

    /// Distance along the ray to the first hit with `aabb`, slab method
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<f32> {
        let mut t_min = self.near;
        let mut t_max = self.far;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let dir = self.direction[axis];
            if dir.abs() < f32::EPSILON {
                if origin < aabb.min[axis] || origin > aabb.max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir;
            let mut t0 = (aabb.min[axis] - origin) * inv;
            let mut t1 = (aabb.max[axis] - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_aabb_from_points() {
        let points = [
            Point3f::new(1.0, -2.0, 3.0),
            Point3f::new(-1.0, 4.0, 0.0),
        ];
        let aabb = Aabb::from_points(&points).unwrap();
        assert_eq!(aabb.min, Point3f::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Point3f::new(1.0, 4.0, 3.0));
        assert_eq!(aabb.center(), Point3f::new(0.0, 1.0, 1.5));
        assert!(Aabb::from_points(&Vec::<Point3f>::new()).is_none());
    }

    #[test]
    fn test_bounding_sphere_covers_points() {
        let points = [
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(2.0, 0.0, 0.0),
            Point3f::new(1.0, 1.0, 0.0),
        ];
        let sphere = BoundingSphere::from_points(&points).unwrap();
        assert_eq!(sphere.center, Point3f::new(1.0, 0.5, 0.0));
        for p in &points {
            assert!(nalgebra::distance(&sphere.center, p) <= sphere.radius + 1e-6);
        }
    }

    #[test]
    fn test_downward_ray_hits_box_below() {
        let floor = Aabb::from_center_size(Point3f::origin(), Vector3f::new(10.0, 1.0, 10.0));
        let ray = Ray::new(Point3f::new(0.0, 5.0, 0.0), -Vector3f::y(), 0.0, 10.0);
        assert_relative_eq!(ray.intersect_aabb(&floor).unwrap(), 4.5);

        let short = Ray::new(Point3f::new(0.0, 5.0, 0.0), -Vector3f::y(), 0.0, 2.0);
        assert!(short.intersect_aabb(&floor).is_none());

        let beside = Ray::new(Point3f::new(20.0, 5.0, 0.0), -Vector3f::y(), 0.0, 10.0);
        assert!(beside.intersect_aabb(&floor).is_none());
    }
}
