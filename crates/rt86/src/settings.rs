//! Render settings, optionally loaded from a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rt86_renderer::{CameraSettings, RenderConfig};
use serde::{Deserialize, Serialize};

/// Everything the driver needs to produce one image.
///
/// Missing fields fall back to the reference scene's values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub camera: CameraSettings,
    pub render: RenderConfig,
    /// Fixed seed for a reproducible render; random when absent
    pub seed: Option<u64>,
    /// Output file, format chosen by extension
    pub output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            camera: CameraSettings::default(),
            render: RenderConfig::default(),
            seed: None,
            output: PathBuf::from("rt86.png"),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
