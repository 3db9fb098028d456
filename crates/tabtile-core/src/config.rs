// ABOUTME: Application configuration handling.
// ABOUTME: Loads and saves engine tuning from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Limits applied while a split handle is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeSettings {
    /// Smallest share (percent) a child may be dragged down to
    pub min_size: f32,
    /// Largest share (percent) a child may be dragged up to
    pub max_size: f32,
}

impl Default for ResizeSettings {
    fn default() -> Self {
        Self {
            min_size: 10.0,
            max_size: 90.0,
        }
    }
}

/// Edge band used to classify where a dragged tab is dropped
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropZoneSettings {
    /// Upper bound on the edge band, in the same units as the pane size
    pub max_edge: f32,
    /// Edge band as a fraction of the pane's width and height
    pub edge_ratio: f32,
}

impl Default for DropZoneSettings {
    fn default() -> Self {
        Self {
            max_edge: 100.0,
            edge_ratio: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceSettings {
    /// Storage key the layout blob is saved under
    pub key: String,
    /// Overrides the platform state directory
    pub state_dir: Option<PathBuf>,
}

impl Default for PersistenceSettings {
    fn default() -> Self {
        Self {
            key: "tab-layout".to_string(),
            state_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub resize: ResizeSettings,
    pub drop_zone: DropZoneSettings,
    pub persistence: PersistenceSettings,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl Config {
    /// `<config dir>/tabtile/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tabtile").join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Ok(toml::from_str(&std::fs::read_to_string(path)?)?)
    }

    /// Load `path`, writing the defaults there first if it does not exist yet.
    pub fn load_or_init(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::load(path);
        }
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}
