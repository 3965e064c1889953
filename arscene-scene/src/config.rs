//! Scene construction parameters

use arscene_core::Rgb;
use serde::{Deserialize, Serialize};

/// How object boxes are sized
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectSizing {
    /// A cube of this edge length regardless of the record's footprint
    Fixed(f32),
    /// Scaled `width × height × length` from the record, with a fixed height
    FromRecord { height: f32 },
}

impl Default for ObjectSizing {
    fn default() -> Self {
        ObjectSizing::Fixed(10.0)
    }
}

/// Geometry used for the device camera trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraPathStyle {
    #[default]
    Line,
    Points,
}

/// Parameters of the decorative ground plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundPlaneConfig {
    /// Add the plane to the visible nodes; it is built either way
    pub attach: bool,
    pub size: f32,
    pub segments: usize,
    /// Horizontal jitter amplitude, each of x and z moves by `[-j, j)`
    pub horizontal_jitter: f32,
    /// Vertical offset range, y moves by `[offset, offset + span)`
    pub vertical_offset: f32,
    pub vertical_span: f32,
    pub hue_min: f32,
    pub hue_span: f32,
    pub saturation: f32,
    pub lightness_min: f32,
    pub lightness_span: f32,
    /// Fixed RNG seed; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for GroundPlaneConfig {
    fn default() -> Self {
        Self {
            attach: false,
            size: 2000.0,
            segments: 100,
            horizontal_jitter: 10.0,
            vertical_offset: -200.0,
            vertical_span: 2.0,
            hue_min: 0.5,
            hue_span: 0.3,
            saturation: 0.75,
            lightness_min: 0.75,
            lightness_span: 0.25,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fog {
    pub color: Rgb,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HemisphereLight {
    pub sky: Rgb,
    pub ground: Rgb,
    pub intensity: f32,
    pub position: [f32; 3],
}

/// Background, fog and lighting handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Atmosphere {
    pub background: Rgb,
    pub fog: Option<Fog>,
    pub light: HemisphereLight,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            background: Rgb::from_hex(0x1c1c1c),
            fog: Some(Fog {
                color: Rgb::from_hex(0xcccccc),
                near: 0.0,
                far: 750.0,
            }),
            light: HemisphereLight {
                sky: Rgb::from_hex(0xeeeeff),
                ground: Rgb::from_hex(0x777788),
                intensity: 0.75,
                position: [0.5, 1.0, 0.75],
            },
        }
    }
}

/// Everything the scene builder needs besides the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Capture units to scene units
    pub scale: f32,
    /// Start the height range at 0 so it always contains the origin
    pub seed_height_range_at_origin: bool,
    pub anchor_thickness: f32,
    /// Apply the recorded anchor quaternion on top of the vertical flip
    pub apply_anchor_rotation: bool,
    pub object_sizing: ObjectSizing,
    pub camera_path_style: CameraPathStyle,
    pub ground: GroundPlaneConfig,
    pub atmosphere: Atmosphere,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            scale: 50.0,
            seed_height_range_at_origin: true,
            anchor_thickness: 0.1,
            apply_anchor_rotation: false,
            object_sizing: ObjectSizing::default(),
            camera_path_style: CameraPathStyle::default(),
            ground: GroundPlaneConfig::default(),
            atmosphere: Atmosphere::default(),
        }
    }
}
