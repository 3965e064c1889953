//! Device camera trajectory

use crate::config::CameraPathStyle;
use arscene_core::Point3f;
use arscene_io::CameraPathPoint;

/// Scaled camera positions in capture order
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point3f>,
    pub style: CameraPathStyle,
}

impl Polyline {
    pub fn from_camera_path(path: &[CameraPathPoint], scale: f32, style: CameraPathStyle) -> Self {
        Self {
            points: path.iter().map(|p| p.position() * scale).collect(),
            style,
        }
    }

    /// Connected segments; empty for the point style or fewer than two points
    pub fn segments(&self) -> impl Iterator<Item = (Point3f, Point3f)> + '_ {
        let connected = self.style == CameraPathStyle::Line;
        self.points
            .windows(2)
            .filter(move |_| connected)
            .map(|w| (w[0], w[1]))
    }

    /// Total length of the trajectory in scene units
    pub fn length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|w| nalgebra::distance(&w[0], &w[1]))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn path() -> Vec<CameraPathPoint> {
        vec![
            CameraPathPoint { x: 0.0, y: 0.0, z: 0.0 },
            CameraPathPoint { x: 1.0, y: 0.0, z: 0.0 },
            CameraPathPoint { x: 1.0, y: 0.0, z: 1.0 },
        ]
    }

    #[test]
    fn test_line_keeps_capture_order() {
        let line = Polyline::from_camera_path(&path(), 50.0, CameraPathStyle::Line);
        assert_eq!(line.points[1], Point3f::new(50.0, 0.0, 0.0));
        let segments: Vec<_> = line.segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1], (Point3f::new(50.0, 0.0, 0.0), Point3f::new(50.0, 0.0, 50.0)));
        assert_relative_eq!(line.length(), 100.0);
    }

    #[test]
    fn test_point_style_has_no_segments() {
        let dots = Polyline::from_camera_path(&path(), 100.0, CameraPathStyle::Points);
        assert_eq!(dots.points.len(), 3);
        assert_eq!(dots.segments().count(), 0);
    }
}
