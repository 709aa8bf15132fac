// The running game: map, walls, player and key handling

use anyhow::Result;
use glam::Vec2;
use log::{debug, info};
use std::path::Path;

use crate::config::GameConfig;
use crate::engine::assets::{AssetLoader, AssetType, SpriteSheet};
use crate::engine::input::{Action, InputEvent};
use crate::engine::physics::PhysicsWorld;
use crate::engine::renderer::{Sprite, TextureHandle};
use crate::engine::tilemap::{Scene, TileMap};

use super::player::{AnimationError, CharacterSheetLayout, DeathPhase, Facing, PlayerSprite};

/// GPU textures the draw list refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameTextures {
    pub tileset: TextureHandle,
    pub player: TextureHandle,
}

/// One dungeon with one walking character
pub struct Game {
    scene: Scene,
    physics: PhysicsWorld,
    player: PlayerSprite,
    textures: GameTextures,

    /// World units per tick while a direction key is held
    speed: f32,
    death_playback: bool,
}

impl Game {
    /// Load the configured map and sheets from disk
    ///
    /// `upload` turns an image path into a texture handle.
    pub fn load<F>(config: &GameConfig, loader: &AssetLoader, mut upload: F) -> Result<Self>
    where
        F: FnMut(&Path) -> Result<TextureHandle>,
    {
        let map = TileMap::load(loader, &config.map)?;
        let tileset = loader.sheet(&map.tileset)?;
        let player_sheet = loader.sheet(&config.player_sheet)?;

        let textures = GameTextures {
            tileset: upload(loader.resolve_path(AssetType::Texture, &map.tileset).as_path())?,
            player: upload(
                loader
                    .resolve_path(AssetType::Texture, &config.player_sheet)
                    .as_path(),
            )?,
        };

        Self::new(config, &map, &tileset, &player_sheet, textures)
    }

    /// Build the scene, walls and player from an already loaded map
    pub fn new(
        config: &GameConfig,
        map: &TileMap,
        tileset: &SpriteSheet,
        player_sheet: &SpriteSheet,
        textures: GameTextures,
    ) -> Result<Self> {
        let scene = Scene::from_tilemap(map, tileset, config.map_scale);

        let mut physics = PhysicsWorld::new();
        for tile in &scene.walls(&config.wall_layer)?.tiles {
            physics.add_wall(tile.position, tile.size);
        }

        let spawn = map.spawn_point(config.map_scale)?;
        physics.add_player(spawn, config.player_hitbox());

        let player = PlayerSprite::from_sheet(
            &CharacterSheetLayout::universal(),
            player_sheet,
            config.player_scale,
            spawn,
        );

        let world = map.world_size(config.map_scale);
        info!(
            "Map loaded: {}x{} world units, {} walls, player at ({}, {})",
            world.x,
            world.y,
            physics.wall_count(),
            spawn.x,
            spawn.y
        );

        Ok(Self {
            scene,
            physics,
            player,
            textures,
            speed: config.player_speed,
            death_playback: config.death_playback,
        })
    }

    /// Apply a key edge from the input manager
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(action) => self.on_action_pressed(action),
            InputEvent::Released(action) => self.on_action_released(action),
        }
    }

    pub fn on_action_pressed(&mut self, action: Action) {
        let velocity = &mut self.player.body.velocity;
        match action {
            Action::MoveUp => velocity.y = self.speed,
            Action::MoveLeft => velocity.x = -self.speed,
            Action::MoveDown => velocity.y = -self.speed,
            Action::MoveRight => velocity.x = self.speed,
            Action::Die => {
                *velocity = Vec2::ZERO;
                if self.death_playback {
                    self.player.restart_death();
                } else {
                    self.player.set_facing(Facing::Dying);
                }
            }
        }
    }

    pub fn on_action_released(&mut self, action: Action) {
        match action {
            Action::MoveUp | Action::MoveDown => self.player.body.velocity.y = 0.0,
            Action::MoveLeft | Action::MoveRight => self.player.body.velocity.x = 0.0,
            // A running playback owns the facing until it finishes
            Action::Die if self.death_playback => {}
            Action::Die => self.player.set_facing(Facing::Dying),
        }
    }

    /// Whether the die sequence is being played back
    pub fn is_playing_death(&self) -> bool {
        self.death_playback && self.player.facing() == Facing::Dying
    }

    /// Advance one fixed tick: movement, then animation
    pub fn update(&mut self, delta_time: f32) -> Result<(), AnimationError> {
        if self.is_playing_death() {
            if let DeathPhase::Finished = self.player.play_death(delta_time)? {
                debug!(target: self.player.log_target(), "Die sequence finished");
            }
            return Ok(());
        }

        let body = &mut self.player.body;
        let target = self.physics.move_player(body.position, body.velocity);
        self.physics.step();
        body.position = self.physics.player_position().unwrap_or(target);

        self.player.update_animation(delta_time)
    }

    /// Everything to draw this frame: tile layers in map order, then the player
    pub fn draw_list(&self) -> Vec<Sprite> {
        let mut sprites = Vec::with_capacity(self.scene.tile_count() + 1);

        for layer in self.scene.layers() {
            sprites.extend(layer.tiles.iter().map(|tile| {
                Sprite::from_region(tile.position, tile.size, &tile.region, self.textures.tileset)
            }));
        }

        let body = &self.player.body;
        if let Some(frame) = &body.frame {
            sprites.push(Sprite::from_region(
                body.position,
                body.size,
                frame,
                self.textures.player,
            ));
        }

        sprites
    }
}
