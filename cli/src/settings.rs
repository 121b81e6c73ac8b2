use std::path::Path;

use anyhow::Context;
use gemline_core::GameConfig;
use serde::{Deserialize, Serialize};

/// Settings file layout, game options live under a `[game]` table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameConfig,
}

impl Settings {
    /// Loads settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading settings from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
