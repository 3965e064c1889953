//! Height-colored point cloud layer

use arscene_core::{Aabb, BoundingSphere, ColoredPoint3f, ColoredPointCloud3f, Drawable, Point3f, Rgb};
use arscene_io::PointSample;
use tracing::debug;

/// Scaled, colored points with their bounds and height range
#[derive(Debug, Clone)]
pub struct PointCloudLayer {
    pub cloud: ColoredPointCloud3f,
    positions: Vec<[f32; 3]>,
    colors: Vec<Rgb>,
    pub min_height: f32,
    pub max_height: f32,
    pub bounds: Aabb,
    pub bounding_sphere: Option<BoundingSphere>,
}

impl PointCloudLayer {
    /// Scale the samples and color each by its normalised height.
    ///
    /// With `seed_at_origin` the height range starts as `[0, 0]`, so it
    /// contains 0 even when every point is above or below it.
    pub fn build(samples: &[PointSample], scale: f32, seed_at_origin: bool) -> Self {
        let scaled: Vec<Point3f> = samples.iter().map(|s| s.position() * scale).collect();

        let (min_height, max_height) = height_range(&scaled, seed_at_origin);
        debug!("point cloud height range [{}, {}]", min_height, max_height);

        let cloud: ColoredPointCloud3f = scaled
            .iter()
            .map(|p| ColoredPoint3f::new(*p, height_color(p.y, min_height, max_height)))
            .collect();

        let bounds = cloud.bounding_box();
        let bounding_sphere = BoundingSphere::from_points(&scaled);
        let positions = cloud.position_buffer();
        let colors = cloud.color_buffer();

        Self {
            cloud,
            positions,
            colors,
            min_height,
            max_height,
            bounds,
            bounding_sphere,
        }
    }

    pub fn len(&self) -> usize {
        self.cloud.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cloud.is_empty()
    }

    /// Flat `x, y, z` position attribute
    pub fn position_attribute(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Flat `r, g, b` color attribute parallel to the positions
    pub fn color_attribute(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }
}

fn height_range(points: &[Point3f], seed_at_origin: bool) -> (f32, f32) {
    let seed = if seed_at_origin {
        0.0
    } else {
        points.first().map_or(0.0, |p| p.y)
    };
    points
        .iter()
        .fold((seed, seed), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)))
}

/// Green at `min`, blue at `max`, red always zero.
///
/// A collapsed range maps every height to green.
pub fn height_color(y: f32, min: f32, max: f32) -> Rgb {
    let range = max - min;
    let t = if range > 0.0 {
        ((y - min) / range).clamp(0.0, 1.0)
    } else {
        0.0
    };
    Rgb::new(0.0, 1.0 - t, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn samples(ys: &[f32]) -> Vec<PointSample> {
        ys.iter().map(|&y| PointSample::new(0.0, y, 0.0)).collect()
    }

    #[test]
    fn test_two_point_gradient() {
        let layer = PointCloudLayer::build(&samples(&[0.0, 2.0]), 50.0, true);
        assert_eq!(layer.min_height, 0.0);
        assert_eq!(layer.max_height, 100.0);
        assert_eq!(layer.cloud[0].color, Rgb::new(0.0, 1.0, 0.0));
        assert_eq!(layer.cloud[1].color, Rgb::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_range_contains_origin_and_every_point() {
        let layer = PointCloudLayer::build(&samples(&[1.0, 3.0, 2.0]), 50.0, true);
        assert_eq!(layer.min_height, 0.0);
        assert!(layer.max_height >= 0.0);
        for p in layer.cloud.iter() {
            assert!(layer.min_height <= p.position.y && p.position.y <= layer.max_height);
        }

        let below = PointCloudLayer::build(&samples(&[-1.0, -3.0]), 50.0, true);
        assert_eq!(below.min_height, -150.0);
        assert_eq!(below.max_height, 0.0);
    }

    #[test]
    fn test_unseeded_range_is_tight() {
        let layer = PointCloudLayer::build(&samples(&[1.0, 3.0]), 50.0, false);
        assert_eq!(layer.min_height, 50.0);
        assert_eq!(layer.max_height, 150.0);
        assert_eq!(layer.cloud[0].color, Rgb::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_flat_cloud_gets_constant_color() {
        let layer = PointCloudLayer::build(&samples(&[0.0, 0.0, 0.0]), 50.0, true);
        for p in layer.cloud.iter() {
            assert_eq!(p.color, Rgb::new(0.0, 1.0, 0.0));
            assert!(p.color.g.is_finite());
        }
    }

    #[test]
    fn test_red_channel_always_zero() {
        let layer = PointCloudLayer::build(&samples(&[-2.0, 0.5, 1.0, 4.0]), 100.0, true);
        assert!(layer.cloud.iter().all(|p| p.color.r == 0.0));
        let mid = height_color(50.0, 0.0, 100.0);
        assert_relative_eq!(mid.g, 0.5);
        assert_relative_eq!(mid.b, 0.5);
    }

    #[test]
    fn test_attributes_are_flat_and_parallel() {
        let pts = vec![PointSample::new(1.0, 2.0, 3.0), PointSample::new(-1.0, 0.0, 1.0)];
        let layer = PointCloudLayer::build(&pts, 50.0, true);
        assert_eq!(layer.position_attribute().to_vec(), vec![50.0, 100.0, 150.0, -50.0, 0.0, 50.0]);
        assert_eq!(layer.color_attribute().len(), layer.position_attribute().len());
        assert_eq!(layer.bounds.min, Point3f::new(-50.0, 0.0, 50.0));
        let sphere = layer.bounding_sphere.unwrap();
        assert_eq!(sphere.center, Point3f::new(0.0, 50.0, 100.0));
    }

    #[test]
    fn test_empty_cloud() {
        let layer = PointCloudLayer::build(&[], 50.0, true);
        assert!(layer.is_empty());
        assert!(layer.bounding_sphere.is_none());
        assert_eq!((layer.min_height, layer.max_height), (0.0, 0.0));
    }
}
