use crate::error::{Result, ShortlistError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

const CONFIG_FILENAME: &str = "config.json";

/// CLI-side settings, stored as config.json next to the project store.
/// Tracks which saved project commands operate on between invocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortlistConfig {
    #[serde(default)]
    pub active_project: Option<Uuid>,
}

impl ShortlistConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ShortlistError::Io)?;
        let config: ShortlistConfig =
            serde_json::from_str(&content).map_err(ShortlistError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ShortlistError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ShortlistError::Serialization)?;
        fs::write(config_path, content).map_err(ShortlistError::Io)?;
        Ok(())
    }
}
