// Tile map data as stored on disk

use crate::engine::assets::{AssetLoader, AssetType};
use anyhow::{Context, Result};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Object group holding the player start position
pub const SPAWN_GROUP: &str = "Sprite Positions";

/// Tile map errors
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Failed to parse map: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Map has no layer named {0:?}")]
    MissingLayer(String),

    #[error("Map has no spawn point in object group {0:?}")]
    MissingSpawn(String),
}

/// Single tile placement within a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TilePosition {
    /// Column in tiles
    pub x: u32,
    /// Row in tiles, counted from the top of the map
    pub y: u32,
    /// Tile index into the tileset
    pub id: u32,
}

/// A named tile layer
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TileLayer {
    pub name: String,
    pub positions: Vec<TilePosition>,
}

/// A map object and its free-form properties
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MapObject {
    #[serde(default)]
    pub name: String,
    /// Any JSON value; only numeric ones are read as coordinates
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

impl MapObject {
    /// A property as a number, None if absent or not numeric
    pub fn number(&self, key: &str) -> Option<f32> {
        self.properties
            .get(key)
            .and_then(serde_json::Value::as_f64)
            .map(|value| value as f32)
    }
}

/// A named group of map objects
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObjectGroup {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<MapObject>,
}

/// Tile map metadata, layers and object groups
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TileMap {
    /// Size of a tile in pixels
    pub tile_size: u32,
    /// Map width in tiles
    pub map_width: u32,
    /// Map height in tiles
    pub map_height: u32,
    /// Tileset texture name
    pub tileset: String,
    /// Layers in draw order
    pub layers: Vec<TileLayer>,
    #[serde(default)]
    pub objects: Vec<ObjectGroup>,
}

impl TileMap {
    /// Parse a map from its JSON text
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a map from the maps directory
    pub fn load(loader: &AssetLoader, name: &str) -> Result<Self> {
        let json = loader.load_string(AssetType::Map, name)?;
        Self::from_json(&json).with_context(|| format!("Invalid map {name}"))
    }

    /// Find an object group by name
    pub fn object_group(&self, name: &str) -> Option<&ObjectGroup> {
        self.objects.iter().find(|group| group.name == name)
    }

    /// World position of the player start: the `X`/`Y` properties of the
    /// first object in the spawn group, multiplied by `scale`
    pub fn spawn_point(&self, scale: f32) -> Result<Vec2, MapError> {
        let missing = || MapError::MissingSpawn(SPAWN_GROUP.to_string());

        let object = self
            .object_group(SPAWN_GROUP)
            .and_then(|group| group.objects.first())
            .ok_or_else(missing)?;
        let x = object.number("X").ok_or_else(missing)?;
        let y = object.number("Y").ok_or_else(missing)?;

        Ok(Vec2::new(x * scale, y * scale))
    }

    /// World-space center of the tile at (`x`, `row`)
    ///
    /// Rows count down from the top of the map, world y points up.
    pub fn tile_center(&self, x: u32, row: u32, scale: f32) -> Vec2 {
        let ts = self.tile_size as f32 * scale;
        Vec2::new(
            (x as f32 + 0.5) * ts,
            (self.map_height as f32 - row as f32 - 0.5) * ts,
        )
    }

    /// World-space size of one tile
    pub fn scaled_tile_size(&self, scale: f32) -> Vec2 {
        Vec2::splat(self.tile_size as f32 * scale)
    }

    /// World-space size of the whole map
    pub fn world_size(&self, scale: f32) -> Vec2 {
        let ts = self.tile_size as f32 * scale;
        Vec2::new(self.map_width as f32 * ts, self.map_height as f32 * ts)
    }
}
