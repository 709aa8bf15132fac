// Player sprite entity

use glam::Vec2;

use super::animation::{AnimatedPlayer, AnimationError, DeathPhase, DeathPlayback, SpriteBody};
use super::facing::Facing;
use super::frames::{CharacterSheetLayout, FrameTable};
use crate::engine::assets::SpriteSheet;

/// Log target used when none is given
pub const DEFAULT_LOG_TARGET: &str = "player";

/// The walking player: body, frames and animation state
#[derive(Debug, Clone)]
pub struct PlayerSprite {
    /// Position, velocity, scale and what is displayed
    pub body: SpriteBody,
    /// Frame sequences, fixed after construction
    frames: FrameTable,
    /// Facing and frame cursor
    animation: AnimatedPlayer,
    /// Timer for the die sequence
    death: DeathPlayback,
    /// Where this sprite's log records go
    log_target: String,
}

impl PlayerSprite {
    /// Create a sprite without any frames
    ///
    /// Animating it fails until frames are supplied, see [`PlayerSprite::with_frames`].
    pub fn new(scale: f32, position: Vec2) -> Self {
        Self {
            body: SpriteBody::new(position, scale),
            frames: FrameTable::new(),
            animation: AnimatedPlayer::new(),
            death: DeathPlayback::new(),
            log_target: DEFAULT_LOG_TARGET.to_string(),
        }
    }

    /// Create a sprite whose frames are sliced from a character sheet
    pub fn from_sheet(
        layout: &CharacterSheetLayout,
        sheet: &SpriteSheet,
        scale: f32,
        position: Vec2,
    ) -> Self {
        Self::new(scale, position).with_frames(layout.slice(sheet))
    }

    pub fn with_frames(mut self, frames: FrameTable) -> Self {
        self.frames = frames;
        self
    }

    /// Send this sprite's log records to another target
    #[allow(dead_code)]
    pub fn with_log_target(mut self, target: impl Into<String>) -> Self {
        self.log_target = target.into();
        self
    }

    pub fn log_target(&self) -> &str {
        &self.log_target
    }

    pub fn facing(&self) -> Facing {
        self.animation.facing()
    }

    /// Replace the facing unconditionally
    pub fn set_facing(&mut self, facing: Facing) {
        self.animation.set_facing(facing);
    }

    /// Start the die sequence from its first frame
    pub fn restart_death(&mut self) {
        self.animation.set_facing(Facing::Dying);
        self.animation.rewind();
        self.death.reset();
    }

    /// Pick the frame to display after movement
    pub fn update_animation(&mut self, delta_time: f32) -> Result<(), AnimationError> {
        self.animation
            .update(&self.frames, &mut self.body, delta_time, &self.log_target)
    }

    /// Advance the die sequence by `delta_time` seconds
    pub fn play_death(&mut self, delta_time: f32) -> Result<DeathPhase, AnimationError> {
        self.death
            .tick(&mut self.animation, &self.frames, &mut self.body, delta_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::animation::DEFAULT_DELTA_TIME;
    use crate::game::player::facing::SequenceKind;

    fn universal_player(x: f32, y: f32) -> PlayerSprite {
        PlayerSprite::from_sheet(
            &CharacterSheetLayout::universal(),
            &SpriteSheet::new(832, 1344),
            1.0,
            Vec2::new(x, y),
        )
    }

    #[test]
    fn test_new_player_defaults() {
        let player = PlayerSprite::new(2.0, Vec2::new(10.0, 20.0));
        assert_eq!(player.facing(), Facing::Right);
        assert_eq!(player.body.position, Vec2::new(10.0, 20.0));
        assert_eq!(player.body.scale, Vec2::splat(2.0));
        assert!(player.body.frame.is_none());
        assert_eq!(player.log_target(), DEFAULT_LOG_TARGET);
    }

    #[test]
    fn test_frameless_player_cannot_stand() {
        let mut player = PlayerSprite::new(1.0, Vec2::ZERO);
        assert_eq!(
            player.update_animation(DEFAULT_DELTA_TIME),
            Err(AnimationError::MissingFrames(SequenceKind::StandRight))
        );
    }

    #[test]
    fn test_first_update_shows_standing_frame() {
        let mut player = universal_player(300.0, 200.0);
        player.update_animation(DEFAULT_DELTA_TIME).unwrap();

        let frame = player.body.frame.unwrap();
        assert_eq!((frame.x, frame.y), (0, 704));
        assert_eq!(player.body.size, Vec2::new(64.0, 64.0));
    }

    #[test]
    fn test_walking_down_uses_down_row() {
        let mut player = universal_player(300.0, 200.0);
        player.body.velocity = Vec2::new(0.0, -5.0);
        player.update_animation(DEFAULT_DELTA_TIME).unwrap();

        assert_eq!(player.facing(), Facing::Down);
        let frame = player.body.frame.unwrap();
        assert_eq!((frame.x, frame.y), (64, 640));
    }

    #[test]
    fn test_restart_death_rewinds() {
        let mut player = universal_player(300.0, 200.0);
        player.body.velocity = Vec2::new(5.0, 0.0);
        player.update_animation(DEFAULT_DELTA_TIME).unwrap();
        assert_eq!(player.body.frame.unwrap().x, 64);

        player.restart_death();
        assert_eq!(player.facing(), Facing::Dying);

        let phase = player.play_death(0.01).unwrap();
        assert_eq!(phase, DeathPhase::Playing { frame: 0 });
        assert_eq!(player.body.frame.unwrap().y, 1280);
    }

    #[test]
    fn test_custom_log_target() {
        let player = PlayerSprite::new(1.0, Vec2::ZERO).with_log_target("hero");
        assert_eq!(player.log_target(), "hero");
    }
}
