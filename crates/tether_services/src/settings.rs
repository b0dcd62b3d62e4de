//! Settings management

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading settings from disk.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Engine settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub simulation: SimulationSettings,
    pub scripting: ScriptingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub tick_rate_hz: u32,
    /// Number of frames the runtime simulates before shutting down.
    pub frames: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptingSettings {
    /// Skip entities whose script class is not registered instead of
    /// failing runtime start.
    pub skip_missing_classes: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60,
            frames: 120,
        }
    }
}

impl Default for ScriptingSettings {
    fn default() -> Self {
        Self {
            skip_missing_classes: true,
        }
    }
}

impl Settings {
    pub fn from_json(source: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let source = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&source)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let source = serde_json::to_string_pretty(self)?;
        std::fs::write(path, source)?;
        Ok(())
    }
}
