//! Viewer configuration with RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration load/save failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Window settings.
    pub window: WindowConfig,
    /// Camera settings.
    pub camera: CameraConfig,
    /// Planet settings.
    pub planet: PlanetSettings,
    /// Texture file locations.
    pub textures: TextureConfig,
    /// Log level override (e.g. "debug", "info", "warn").
    pub log_level: String,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Tellus".to_string(),
        }
    }
}

/// Orbit camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Initial camera position.
    pub position: [f32; 3],
    /// Minimum orbit distance from the planet center.
    pub min_distance: f32,
    /// Maximum orbit distance from the planet center.
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 25.0,
            position: [12.0, 5.0, 4.0],
            min_distance: 1.5,
            max_distance: 60.0,
        }
    }
}

/// Planet geometry and motion settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetSettings {
    /// Icosphere subdivision level.
    pub subdivisions: u32,
    /// Atmosphere shell scale relative to the surface.
    pub atmosphere_scale: f32,
    /// Surface rotation in radians per second.
    pub rotation_rate: f32,
}

impl Default for PlanetSettings {
    fn default() -> Self {
        Self {
            subdivisions: 5,
            atmosphere_scale: 1.04,
            rotation_rate: 0.1,
        }
    }
}

/// Texture file locations. Missing files fall back to procedural
/// placeholders so the viewer runs without assets on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextureConfig {
    /// Day albedo image path.
    pub day: PathBuf,
    /// Night emissive image path.
    pub night: PathBuf,
    /// Specular/cloud mask image path (specular in R, clouds in G).
    pub specular_clouds: PathBuf,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            day: PathBuf::from("assets/day.jpg"),
            night: PathBuf::from("assets/night.jpg"),
            specular_clouds: PathBuf::from("assets/specular_clouds.jpg"),
        }
    }
}

impl ViewerConfig {
    /// Load from a RON file, falling back to defaults when the file does not
    /// exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_startup_view() {
        let config = ViewerConfig::default();
        assert_eq!(config.camera.position, [12.0, 5.0, 4.0]);
        assert_eq!(config.camera.fov_degrees, 25.0);
        assert_eq!(config.planet.atmosphere_scale, 1.04);
        assert_eq!(config.planet.rotation_rate, 0.1);
    }

    #[test]
    fn test_partial_ron_fills_in_defaults() {
        let config: ViewerConfig =
            ron::from_str("(window: (width: 1920, height: 1080))").expect("partial config parses");
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.window.title, "Tellus");
        assert_eq!(config.planet.subdivisions, 5);
    }

    #[test]
    fn test_round_trip() {
        let config = ViewerConfig::default();
        let text = ron::to_string(&config).expect("serialize");
        let back: ViewerConfig = ron::from_str(&text).expect("deserialize");
        assert_eq!(config, back);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = ViewerConfig::load_or_default(Path::new("/nonexistent/tellus.ron"))
            .expect("missing file is not an error");
        assert_eq!(config, ViewerConfig::default());
    }
}
