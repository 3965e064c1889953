//! Typed rows of the four capture sources

use crate::table::Row;
use arscene_core::{Point3f, UnitQuaternion, Vector3f};
use nalgebra::Quaternion;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A record type that can be read from a header-named table row
pub trait FromRow: Sized {
    /// Columns that must be present in the header
    const COLUMNS: &'static [&'static str];

    fn from_row(row: &Row<'_>) -> Result<Self, String>;
}

/// One point of the captured point cloud, in source units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl PointSample {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn position(&self) -> Point3f {
        Point3f::new(self.x, self.y, self.z)
    }
}

impl FromRow for PointSample {
    const COLUMNS: &'static [&'static str] = &["x", "y", "z"];

    fn from_row(row: &Row<'_>) -> Result<Self, String> {
        Ok(Self::new(row.float("x")?, row.float("y")?, row.float("z")?))
    }
}

/// Orientation tag of a detected plane anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaneOrientation {
    Horizontal,
    Vertical,
}

impl PlaneOrientation {
    pub fn tag(&self) -> &'static str {
        match self {
            PlaneOrientation::Horizontal => "HorizontalPlaneAnchor",
            PlaneOrientation::Vertical => "VerticalPlaneAnchor",
        }
    }
}

impl FromStr for PlaneOrientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HorizontalPlaneAnchor" => Ok(PlaneOrientation::Horizontal),
            "VerticalPlaneAnchor" => Ok(PlaneOrientation::Vertical),
            other => Err(format!("unknown plane orientation '{}'", other)),
        }
    }
}

impl fmt::Display for PlaneOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A detected plane anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorRecord {
    pub pos_x: f32,
    pub pos_y: f32,
    pub pos_z: f32,
    pub rot_w: f32,
    pub rot_x: f32,
    pub rot_y: f32,
    pub rot_z: f32,
    pub width: f32,
    pub length: f32,
    pub orientation: PlaneOrientation,
}

impl AnchorRecord {
    pub fn position(&self) -> Point3f {
        Point3f::new(self.pos_x, self.pos_y, self.pos_z)
    }

    /// The recorded orientation, `None` if the quaternion is all zeros
    pub fn rotation(&self) -> Option<UnitQuaternion<f32>> {
        let q = Quaternion::new(self.rot_w, self.rot_x, self.rot_y, self.rot_z);
        UnitQuaternion::try_new(q, f32::EPSILON)
    }
}

impl FromRow for AnchorRecord {
    const COLUMNS: &'static [&'static str] = &[
        "pos_x", "pos_y", "pos_z", "rot_w", "rot_x", "rot_y", "rot_z", "width", "length",
        "orientation",
    ];

    fn from_row(row: &Row<'_>) -> Result<Self, String> {
        Ok(Self {
            pos_x: row.float("pos_x")?,
            pos_y: row.float("pos_y")?,
            pos_z: row.float("pos_z")?,
            rot_w: row.float("rot_w")?,
            rot_x: row.float("rot_x")?,
            rot_y: row.float("rot_y")?,
            rot_z: row.float("rot_z")?,
            width: row.float("width")?,
            length: row.float("length")?,
            orientation: row.text("orientation")?.parse()?,
        })
    }
}

/// A detected object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub pos_x: f32,
    pub pos_y: f32,
    pub pos_z: f32,
    pub width: f32,
    pub length: f32,
}

impl ObjectRecord {
    pub fn position(&self) -> Point3f {
        Point3f::new(self.pos_x, self.pos_y, self.pos_z)
    }
}

impl FromRow for ObjectRecord {
    const COLUMNS: &'static [&'static str] = &["pos_x", "pos_y", "pos_z", "width", "length"];

    fn from_row(row: &Row<'_>) -> Result<Self, String> {
        Ok(Self {
            pos_x: row.float("pos_x")?,
            pos_y: row.float("pos_y")?,
            pos_z: row.float("pos_z")?,
            width: row.float("width")?,
            length: row.float("length")?,
        })
    }
}

/// One sample of the device camera trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPathPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl CameraPathPoint {
    pub fn position(&self) -> Point3f {
        Point3f::new(self.x, self.y, self.z)
    }

    pub fn offset_from(&self, other: &CameraPathPoint) -> Vector3f {
        self.position() - other.position()
    }
}

impl FromRow for CameraPathPoint {
    const COLUMNS: &'static [&'static str] = &["x", "y", "z"];

    fn from_row(row: &Row<'_>) -> Result<Self, String> {
        Ok(Self {
            x: row.float("x")?,
            y: row.float("y")?,
            z: row.float("z")?,
        })
    }
}
