//! Top-level viewer configuration
//!
//! The ground-walk and flight viewers differ only in their presets; both run
//! the same loop.

use crate::camera::Camera;
use crate::gpu_renderer::RenderConfig;
use crate::movement::{MovementConfig, MovementMode};
use arscene_core::{Error, Result};
use arscene_io::{DatasetPaths, RowPolicy};
use arscene_scene::{CameraPathStyle, SceneConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "arscene viewer".to_string(),
            width: 1200,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub dataset: DatasetPaths,
    pub row_policy: RowPolicy,
    pub scene: SceneConfig,
    pub movement: MovementConfig,
    pub camera: Camera,
    pub window: WindowConfig,
    pub render: RenderConfig,
}

impl ViewerConfig {
    /// Walk the capture at scale 50 with gravity
    pub fn ground_walk() -> Self {
        Self::default()
    }

    /// Fly through the capture at scale 100, camera path drawn as points
    pub fn flight() -> Self {
        Self {
            scene: SceneConfig {
                scale: 100.0,
                camera_path_style: CameraPathStyle::Points,
                ..SceneConfig::default()
            },
            movement: MovementConfig::flight(),
            ..Self::default()
        }
    }

    pub fn for_mode(mode: MovementMode) -> Self {
        match mode {
            MovementMode::Ground => Self::ground_walk(),
            MovementMode::Flight => Self::flight(),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| Error::InvalidData(format!("invalid viewer config: {}", e)))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }
}
