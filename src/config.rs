// Game settings, read from an optional JSON file

use anyhow::{Context, Result};
use glam::Vec2;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Startup settings
///
/// Every field is optional in the file; missing ones take the defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub title: String,

    /// Root of the `maps/` and `textures/` directories
    pub asset_dir: PathBuf,
    /// Map file name inside `maps/`
    pub map: String,
    /// World units per map pixel
    pub map_scale: f32,
    /// Layer whose tiles block movement
    pub wall_layer: String,

    /// Character spritesheet inside `textures/`
    pub player_sheet: String,
    pub player_scale: f32,
    /// World units moved per tick while a direction key is held
    pub player_speed: f32,
    /// Collision box (width, height) in world units
    pub player_hitbox: [f32; 2],

    /// Play the die sequence over time instead of holding its last frame
    pub death_playback: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            title: "My Game".to_string(),
            asset_dir: PathBuf::from("assets"),
            map: "dungeon.json".to_string(),
            map_scale: 3.0,
            wall_layer: "Bricks".to_string(),
            player_sheet: "character1_universal.png".to_string(),
            player_scale: 1.0,
            player_speed: 5.0,
            player_hitbox: [32.0, 48.0],
            death_playback: false,
        }
    }
}

impl GameConfig {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid config")
    }

    /// Read settings from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("In {}", path.display()))
    }

    /// Settings for this run
    ///
    /// An explicit path must exist. Otherwise `config.json` is used if
    /// present, else the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                info!("Loading config from {}", path.display());
                Self::from_file(path)
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                info!("Loading config from {}", DEFAULT_CONFIG_FILE);
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => {
                info!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn player_hitbox(&self) -> Vec2 {
        Vec2::from(self.player_hitbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();

        assert_eq!((config.window_width, config.window_height), (1280, 720));
        assert_eq!(config.title, "My Game");
        assert_eq!(config.map_scale, 3.0);
        assert_eq!(config.wall_layer, "Bricks");
        assert_eq!(config.player_speed, 5.0);
        assert_eq!(config.player_hitbox(), Vec2::new(32.0, 48.0));
        assert!(!config.death_playback);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "map_scale": 2.0, "death_playback": true }"#).unwrap();

        assert_eq!(config.map_scale, 2.0);
        assert!(config.death_playback);
        assert_eq!(config.map, "dungeon.json");
        assert_eq!(config.player_sheet, "character1_universal.png");
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(GameConfig::from_json("{}").unwrap(), GameConfig::default());
    }

    #[test]
    fn test_invalid_json() {
        assert!(GameConfig::from_json(r#"{ "map_scale": "big" }"#).is_err());
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let path = std::env::temp_dir().join("dungeon_walker_no_such_config.json");
        assert!(GameConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "dungeon_walker_config_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "title": "Dungeon", "player_speed": 3.5 }"#).unwrap();

        let config = GameConfig::load(Some(&path)).unwrap();
        assert_eq!(config.title, "Dungeon");
        assert_eq!(config.player_speed, 3.5);

        std::fs::remove_file(&path).unwrap();
    }
}
