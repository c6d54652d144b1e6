use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use sweeper_core::{GameConfig, Options, Preset};

/// Contents of the optional TOML settings file.
///
/// ```toml
/// preset = "intermediate"
/// seed = 1234
///
/// [options]
/// recursive_chord = false
/// ```
///
/// A `[board]` table with `width`, `height` and `mines` takes precedence over `preset`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub preset: Option<Preset>,
    pub board: Option<GameConfig>,
    pub options: Options,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read settings from {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn game_config(&self) -> GameConfig {
        self.board
            .or_else(|| self.preset.map(Preset::config))
            .unwrap_or_default()
    }
}
