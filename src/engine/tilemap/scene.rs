// Scene built from a tile map: placed tile sprites grouped by layer

use super::map::{MapError, TileMap};
use crate::engine::assets::{SheetRegion, SpriteSheet};
use glam::Vec2;
use log::{info, warn};

/// A placed tile, ready to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSprite {
    /// World-space center
    pub position: Vec2,
    /// World-space size
    pub size: Vec2,
    /// Region of the tileset to draw
    pub region: SheetRegion,
}

/// A layer's tile sprites, in map order
#[derive(Debug, Clone)]
pub struct SceneLayer {
    pub name: String,
    pub tiles: Vec<TileSprite>,
}

/// All tile layers of a map, placed in world space
#[derive(Debug, Clone)]
pub struct Scene {
    layers: Vec<SceneLayer>,
}

impl Scene {
    /// Place every tile of `map` in world space
    ///
    /// Tiles whose id falls outside `tileset` are skipped with a warning.
    pub fn from_tilemap(map: &TileMap, tileset: &SpriteSheet, scale: f32) -> Self {
        let size = map.scaled_tile_size(scale);
        let layers: Vec<SceneLayer> = map
            .layers
            .iter()
            .map(|layer| {
                let tiles = layer
                    .positions
                    .iter()
                    .filter_map(|tile| {
                        let Some(region) = tileset.tile(tile.id, map.tile_size) else {
                            warn!(
                                "Tile id {} at ({}, {}) in layer {:?} is outside the tileset",
                                tile.id, tile.x, tile.y, layer.name
                            );
                            return None;
                        };
                        Some(TileSprite {
                            position: map.tile_center(tile.x, tile.y, scale),
                            size,
                            region,
                        })
                    })
                    .collect();
                SceneLayer {
                    name: layer.name.clone(),
                    tiles,
                }
            })
            .collect();

        let scene = Self { layers };
        info!(
            "Scene built: {} layers, {} tiles",
            scene.layers.len(),
            scene.tile_count()
        );
        scene
    }

    /// Layers in draw order
    pub fn layers(&self) -> &[SceneLayer] {
        &self.layers
    }

    /// Find a layer by name
    pub fn layer(&self, name: &str) -> Option<&SceneLayer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    /// The layer whose tiles block movement
    pub fn walls(&self, name: &str) -> Result<&SceneLayer, MapError> {
        self.layer(name)
            .ok_or_else(|| MapError::MissingLayer(name.to_string()))
    }

    /// Total number of placed tiles
    pub fn tile_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.tiles.len()).sum()
    }
}
