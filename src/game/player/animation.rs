// Player animation state machine
//
// Frames advance with distance walked rather than with time: a new frame is
// shown every `TEXTURE_CHANGE_DISTANCE` world units, or immediately when the
// walking direction changes. Standing still shows the standing frame of the
// current facing.

use glam::Vec2;
use log::warn;

use super::facing::{Facing, SequenceKind};
use super::frames::{Frame, FrameTable};

/// Distance in world units between two walk frames
pub const TEXTURE_CHANGE_DISTANCE: f32 = 20.0;

/// Delta time assumed when the caller has none (60 FPS)
pub const DEFAULT_DELTA_TIME: f32 = 1.0 / 60.0;

/// Die frame shown while dead and not moving
pub const DIE_REST_FRAME: usize = 5;

/// Time each die frame stays on screen during death playback (seconds)
pub const DEATH_FRAME_DELAY: f32 = 0.1;

/// Pause after the last die frame before the sprite stands up again (seconds)
pub const DEATH_HOLD_DELAY: f32 = 2.0;

/// Animation setup errors
///
/// These are configuration defects: the sprite was animated before all the
/// frame sequences it needs were registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnimationError {
    #[error("animation update on a sprite without a list of {0} frames")]
    MissingFrames(SequenceKind),

    #[error("{sequence} frame {index} requested but only {len} frames are registered")]
    FrameOutOfRange {
        sequence: SequenceKind,
        index: usize,
        len: usize,
    },
}

/// Positional and display state the animation reads and writes
#[derive(Debug, Clone)]
pub struct SpriteBody {
    /// Center in world space
    pub position: Vec2,
    /// Movement per tick in world units
    pub velocity: Vec2,
    /// Scale factors (x, y)
    pub scale: Vec2,
    /// Display size in world units
    pub size: Vec2,
    /// Frame currently displayed
    pub frame: Option<Frame>,
}

impl SpriteBody {
    pub fn new(position: Vec2, scale: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            scale: Vec2::splat(scale),
            size: Vec2::ZERO,
            frame: None,
        }
    }

    /// Recompute the display size from the current frame
    ///
    /// Height is derived from the horizontal scale as well. Returns false if
    /// no frame is set.
    fn refresh_size(&mut self) -> bool {
        match self.frame {
            Some(frame) => {
                self.size = frame.native_size() * self.scale.x;
                true
            }
            None => false,
        }
    }
}

/// Facing, frame cursor and checkpoint of an animated player
#[derive(Debug, Clone)]
pub struct AnimatedPlayer {
    facing: Facing,
    cur_index: usize,
    checkpoint: Vec2,
}

impl Default for AnimatedPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimatedPlayer {
    pub fn new() -> Self {
        Self {
            facing: Facing::default(),
            cur_index: 0,
            checkpoint: Vec2::ZERO,
        }
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Replace the facing unconditionally
    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }

    /// Move the cursor back to the first frame
    pub fn rewind(&mut self) {
        self.cur_index = 0;
    }

    /// Pick the frame to display for this tick
    ///
    /// `_delta_time` is accepted for call-site symmetry with the death
    /// playback; frame changes here are driven by distance only.
    pub fn update(
        &mut self,
        frames: &FrameTable,
        body: &mut SpriteBody,
        _delta_time: f32,
        log_target: &str,
    ) -> Result<(), AnimationError> {
        let distance = body.position.distance(self.checkpoint);
        let direction_changed = self.select_facing(frames, body.velocity);

        if body.velocity == Vec2::ZERO {
            body.frame = Some(self.standing_frame(frames)?);
        } else if direction_changed || distance >= TEXTURE_CHANGE_DISTANCE {
            self.checkpoint = body.position;

            let kind = self.facing.moving_sequence();
            let sequence = frames.get(kind);
            if sequence.is_empty() {
                return Err(AnimationError::MissingFrames(kind));
            }

            self.cur_index += 1;
            if self.cur_index >= sequence.len() {
                self.cur_index = 0;
            }
            body.frame = Some(sequence[self.cur_index]);
        }

        if !body.refresh_size() {
            warn!(target: log_target, "no frame set after animation update");
        }

        Ok(())
    }

    /// Switch facing from a single-axis velocity, returns true on a switch
    fn select_facing(&mut self, frames: &FrameTable, velocity: Vec2) -> bool {
        let Some(facing) = Facing::from_velocity(velocity.x, velocity.y) else {
            return false;
        };

        if facing != self.facing && frames.has_frames(facing.moving_sequence()) {
            self.facing = facing;
            return true;
        }
        false
    }

    fn standing_frame(&self, frames: &FrameTable) -> Result<Frame, AnimationError> {
        let (kind, index) = match self.facing {
            Facing::Dying => (SequenceKind::Die, DIE_REST_FRAME),
            facing @ (Facing::Down | Facing::Left | Facing::Right | Facing::Up) => {
                (facing.standing_sequence(), 0)
            }
        };

        let sequence = frames.get(kind);
        if sequence.is_empty() {
            return Err(AnimationError::MissingFrames(kind));
        }
        sequence
            .get(index)
            .copied()
            .ok_or(AnimationError::FrameOutOfRange {
                sequence: kind,
                index,
                len: sequence.len(),
            })
    }
}

/// Where a death playback currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathPhase {
    /// Showing the die frame with this index
    Playing { frame: usize },
    /// All die frames shown, waiting before standing up
    Holding,
    /// Facing reset to down, playback done
    Finished,
}

/// Non-blocking die sequence: one frame per `DEATH_FRAME_DELAY`, then a
/// `DEATH_HOLD_DELAY` pause, then back to facing down
#[derive(Debug, Clone, Default)]
pub struct DeathPlayback {
    elapsed: f32,
}

impl DeathPlayback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget accumulated time
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Advance the playback by `delta_time` seconds
    pub fn tick(
        &mut self,
        animation: &mut AnimatedPlayer,
        frames: &FrameTable,
        body: &mut SpriteBody,
        delta_time: f32,
    ) -> Result<DeathPhase, AnimationError> {
        let die = frames.get(SequenceKind::Die);
        if die.is_empty() {
            return Err(AnimationError::MissingFrames(SequenceKind::Die));
        }

        self.elapsed += delta_time;

        if animation.cur_index >= die.len() {
            if self.elapsed < DEATH_HOLD_DELAY {
                return Ok(DeathPhase::Holding);
            }
            self.elapsed = 0.0;
            animation.cur_index = 0;
            animation.facing = Facing::Down;
            return Ok(DeathPhase::Finished);
        }

        let index = animation.cur_index;
        body.frame = Some(die[index]);
        body.velocity = Vec2::ZERO;
        body.refresh_size();

        if self.elapsed >= DEATH_FRAME_DELAY {
            self.elapsed -= DEATH_FRAME_DELAY;
            animation.cur_index += 1;
        }

        Ok(DeathPhase::Playing { frame: index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::SpriteSheet;
    use approx::assert_relative_eq;

    const LOG: &str = "test";

    /// Nine sequences with distinct frames so tests can tell them apart
    fn full_table() -> FrameTable {
        let sheet = SpriteSheet::new(1024, 1024);
        let mut table = FrameTable::new();
        let kinds = [
            SequenceKind::StandDown,
            SequenceKind::StandUp,
            SequenceKind::StandLeft,
            SequenceKind::StandRight,
            SequenceKind::WalkDown,
            SequenceKind::WalkUp,
            SequenceKind::WalkLeft,
            SequenceKind::WalkRight,
            SequenceKind::Die,
        ];
        for (row, kind) in kinds.iter().enumerate() {
            let count = match kind {
                SequenceKind::StandDown
                | SequenceKind::StandUp
                | SequenceKind::StandLeft
                | SequenceKind::StandRight => 1,
                SequenceKind::Die => 6,
                _ => 4,
            };
            table.set(*kind, sheet.row(row as u32 * 64, 64, 64, count));
        }
        table
    }

    fn frame_of(table: &FrameTable, kind: SequenceKind, index: usize) -> Frame {
        table.get(kind)[index]
    }

    fn body_at(x: f32, y: f32) -> SpriteBody {
        SpriteBody::new(Vec2::new(x, y), 1.0)
    }

    const WALKING: [Facing; 4] = [Facing::Right, Facing::Left, Facing::Down, Facing::Up];

    #[test]
    fn test_single_axis_velocity_changes_facing() {
        let table = full_table();
        let cases = [
            (Vec2::new(1.0, 0.0), Facing::Right),
            (Vec2::new(-1.0, 0.0), Facing::Left),
            (Vec2::new(0.0, -1.0), Facing::Down),
            (Vec2::new(0.0, 1.0), Facing::Up),
        ];

        for start in WALKING.into_iter().chain([Facing::Dying]) {
            for (velocity, expected) in cases {
                let mut anim = AnimatedPlayer::new();
                anim.set_facing(start);

                let changed = anim.select_facing(&table, velocity);
                assert_eq!(anim.facing(), expected);
                assert_eq!(changed, start != expected, "{start:?} -> {expected:?}");
            }
        }
    }

    #[test]
    fn test_facing_unchanged_without_walk_frames() {
        let mut table = full_table();
        table.set(SequenceKind::WalkUp, Vec::new());

        let mut anim = AnimatedPlayer::new();
        assert!(!anim.select_facing(&table, Vec2::new(0.0, 3.0)));
        assert_eq!(anim.facing(), Facing::Right);
    }

    #[test]
    fn test_diagonal_velocity_keeps_facing() {
        let table = full_table();
        let mut anim = AnimatedPlayer::new();
        anim.set_facing(Facing::Up);

        assert!(!anim.select_facing(&table, Vec2::new(5.0, 5.0)));
        assert_eq!(anim.facing(), Facing::Up);
    }

    #[test]
    fn test_single_axis_move_leaves_dying() {
        let table = full_table();
        let mut anim = AnimatedPlayer::new();
        anim.set_facing(Facing::Dying);
        let mut body = body_at(0.0, 0.0);
        body.velocity = Vec2::new(0.0, 5.0);

        anim.update(&table, &mut body, DEFAULT_DELTA_TIME, LOG).unwrap();

        assert_eq!(anim.facing(), Facing::Up);
        assert_eq!(anim.cur_index, 1);
        assert_eq!(body.frame, Some(frame_of(&table, SequenceKind::WalkUp, 1)));
    }

    #[test]
    fn test_diagonal_move_while_dying_cycles_die_frames() {
        let table = full_table();
        let die_len = table.get(SequenceKind::Die).len();
        let mut anim = AnimatedPlayer::new();
        anim.set_facing(Facing::Dying);
        let mut body = body_at(0.0, 0.0);
        body.velocity = Vec2::new(5.0, 5.0);

        // Each step covers about 21 units, past the threshold
        for step in 1..=die_len {
            body.position = Vec2::splat(15.0 * step as f32);
            anim.update(&table, &mut body, DEFAULT_DELTA_TIME, LOG).unwrap();

            let expected = step % die_len;
            assert_eq!(anim.facing(), Facing::Dying);
            assert_eq!(anim.cur_index, expected);
            assert_eq!(body.frame, Some(frame_of(&table, SequenceKind::Die, expected)));
        }
    }

    #[test]
    fn test_zero_velocity_shows_standing_frame() {
        let table = full_table();

        for facing in WALKING {
            let mut anim = AnimatedPlayer::new();
            anim.set_facing(facing);
            let mut body = body_at(100.0, 100.0);

            anim.update(&table, &mut body, DEFAULT_DELTA_TIME, LOG).unwrap();

            assert_eq!(
                body.frame,
                Some(frame_of(&table, facing.standing_sequence(), 0))
            );
            assert_eq!(anim.cur_index, 0);
            assert_eq!(anim.checkpoint, Vec2::ZERO);
        }
    }

    #[test]
    fn test_dying_at_rest_shows_fixed_die_frame() {
        let table = full_table();
        let mut anim = AnimatedPlayer::new();
        anim.set_facing(Facing::Dying);
        let mut body = body_at(0.0, 0.0);

        for dt in [0.0, DEFAULT_DELTA_TIME, 5.0] {
            anim.update(&table, &mut body, dt, LOG).unwrap();
            assert_eq!(body.frame, Some(frame_of(&table, SequenceKind::Die, 5)));
            assert_eq!(anim.cur_index, 0);
        }
    }

    #[test]
    fn test_dying_ignores_prior_cursor() {
        let table = full_table();
        let mut anim = AnimatedPlayer::new();
        let mut body = body_at(30.0, 0.0);
        body.velocity = Vec2::new(1.0, 0.0);
        anim.update(&table, &mut body, DEFAULT_DELTA_TIME, LOG).unwrap();
        assert_eq!(anim.cur_index, 1);

        anim.set_facing(Facing::Dying);
        body.velocity = Vec2::ZERO;
        anim.update(&table, &mut body, DEFAULT_DELTA_TIME, LOG).unwrap();
        assert_eq!(body.frame, Some(frame_of(&table, SequenceKind::Die, 5)));
    }

    #[test]
    fn test_short_die_sequence_is_out_of_range() {
        let mut table = full_table();
        let short = table.get(SequenceKind::Die)[..3].to_vec();
        table.set(SequenceKind::Die, short);

        let mut anim = AnimatedPlayer::new();
        anim.set_facing(Facing::Dying);
        let mut body = body_at(0.0, 0.0);

        assert_eq!(
            anim.update(&table, &mut body, DEFAULT_DELTA_TIME, LOG),
            Err(AnimationError::FrameOutOfRange {
                sequence: SequenceKind::Die,
                index: 5,
                len: 3
            })
        );
    }

    #[test]
    fn test_threshold_crossing_advances_cursor() {
        let table = full_table();
        let mut anim = AnimatedPlayer::new();
        let mut body = body_at(0.0, 0.0);
        body.velocity = Vec2::new(1.0, 0.0);

        body.position = Vec2::new(25.0, 0.0);
        anim.update(&table, &mut body, DEFAULT_DELTA_TIME, LOG).unwrap();

        assert_eq!(anim.checkpoint, Vec2::new(25.0, 0.0));
        assert_eq!(anim.cur_index, 1);
        assert_eq!(body.frame, Some(frame_of(&table, SequenceKind::WalkRight, 1)));
    }

    #[test]
    fn test_sustained_walk_advances_once_per_threshold_and_wraps() {
        let table = full_table();
        let walk_len = table.get(SequenceKind::WalkRight).len();
        let mut anim = AnimatedPlayer::new();
        let mut body = body_at(0.0, 0.0);
        body.velocity = Vec2::new(5.0, 0.0);

        let mut advances = 0;
        let mut last_index = anim.cur_index;
        // 5 units per tick, 20 unit threshold: one advance every 4 ticks
        for _ in 0..(4 * (walk_len + 1)) {
            body.position += body.velocity;
            anim.update(&table, &mut body, DEFAULT_DELTA_TIME, LOG).unwrap();
            if anim.cur_index != last_index {
                assert_eq!(anim.cur_index, (last_index + 1) % walk_len);
                advances += 1;
                last_index = anim.cur_index;
            }
        }

        assert_eq!(advances, walk_len + 1);
        assert_eq!(anim.cur_index, 1);
    }

    #[test]
    fn test_direction_change_advances_immediately() {
        let table = full_table();
        let mut anim = AnimatedPlayer::new();
        let mut body = body_at(1.0, 0.0);
        body.velocity = Vec2::new(-1.0, 0.0);

        anim.update(&table, &mut body, DEFAULT_DELTA_TIME, LOG).unwrap();

        assert_eq!(anim.facing(), Facing::Left);
        assert_eq!(anim.cur_index, 1);
        assert_eq!(anim.checkpoint, Vec2::new(1.0, 0.0));
        assert_eq!(body.frame, Some(frame_of(&table, SequenceKind::WalkLeft, 1)));
    }

    #[test]
    fn test_cursor_carries_over_into_a_shorter_sequence() {
        let mut table = full_table();
        let two = table.get(SequenceKind::WalkUp)[..2].to_vec();
        table.set(SequenceKind::WalkUp, two);

        let mut anim = AnimatedPlayer::new();
        let mut body = body_at(0.0, 0.0);
        body.velocity = Vec2::new(1.0, 0.0);
        for step in 1..=3 {
            body.position = Vec2::new(25.0 * step as f32, 0.0);
            anim.update(&table, &mut body, DEFAULT_DELTA_TIME, LOG).unwrap();
        }
        assert_eq!(anim.cur_index, 3);

        body.velocity = Vec2::new(0.0, 1.0);
        anim.update(&table, &mut body, DEFAULT_DELTA_TIME, LOG).unwrap();
        assert_eq!(anim.facing(), Facing::Up);
        assert_eq!(anim.cur_index, 0);
    }

    #[test]
    fn test_missing_walk_left_frames_fail() {
        let mut table = full_table();
        table.set(SequenceKind::WalkLeft, Vec::new());

        let mut anim = AnimatedPlayer::new();
        anim.set_facing(Facing::Left);
        let mut body = body_at(-25.0, 0.0);
        body.velocity = Vec2::new(-1.0, 0.0);

        assert_eq!(
            anim.update(&table, &mut body, DEFAULT_DELTA_TIME, LOG),
            Err(AnimationError::MissingFrames(SequenceKind::WalkLeft))
        );
    }

    #[test]
    fn test_missing_standing_frames_fail() {
        let mut table = full_table();
        table.set(SequenceKind::StandRight, Vec::new());

        let mut anim = AnimatedPlayer::new();
        let mut body = body_at(0.0, 0.0);

        assert_eq!(
            anim.update(&table, &mut body, DEFAULT_DELTA_TIME, LOG),
            Err(AnimationError::MissingFrames(SequenceKind::StandRight))
        );
    }

    #[test]
    fn test_update_is_idempotent_under_threshold() {
        let table = full_table();
        let mut anim = AnimatedPlayer::new();
        let mut body = body_at(25.0, 0.0);
        body.velocity = Vec2::new(1.0, 0.0);
        anim.update(&table, &mut body, DEFAULT_DELTA_TIME, LOG).unwrap();

        body.position = Vec2::new(30.0, 0.0);
        anim.update(&table, &mut body, DEFAULT_DELTA_TIME, LOG).unwrap();
        let first = (body.frame, anim.cur_index);

        anim.update(&table, &mut body, DEFAULT_DELTA_TIME, LOG).unwrap();
        assert_eq!((body.frame, anim.cur_index), first);
    }

    #[test]
    fn test_no_frame_leaves_size_untouched() {
        let table = full_table();
        let mut anim = AnimatedPlayer::new();
        let mut body = body_at(5.0, 0.0);
        body.velocity = Vec2::new(1.0, 0.0);
        body.size = Vec2::new(7.0, 9.0);

        anim.update(&table, &mut body, DEFAULT_DELTA_TIME, LOG).unwrap();

        assert!(body.frame.is_none());
        assert_eq!(body.size, Vec2::new(7.0, 9.0));
    }

    #[test]
    fn test_size_uses_horizontal_scale_for_both_axes() {
        // Vertical scale is ignored when sizing: kept on purpose, pinned here.
        let table = full_table();
        let mut anim = AnimatedPlayer::new();
        let mut body = body_at(0.0, 0.0);
        body.scale = Vec2::new(2.0, 0.5);

        anim.update(&table, &mut body, DEFAULT_DELTA_TIME, LOG).unwrap();

        assert_relative_eq!(body.size.x, 128.0);
        assert_relative_eq!(body.size.y, 128.0);
    }

    #[test]
    fn test_death_playback_steps_through_frames() {
        let table = full_table();
        let mut anim = AnimatedPlayer::new();
        anim.set_facing(Facing::Dying);
        let mut body = body_at(0.0, 0.0);
        body.velocity = Vec2::new(5.0, 0.0);
        let mut death = DeathPlayback::new();

        let phase = death.tick(&mut anim, &table, &mut body, 0.05).unwrap();
        assert_eq!(phase, DeathPhase::Playing { frame: 0 });
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.frame, Some(frame_of(&table, SequenceKind::Die, 0)));

        // Crossing the frame delay moves on to the next frame
        death.tick(&mut anim, &table, &mut body, 0.06).unwrap();
        assert_eq!(anim.cur_index, 1);
        let phase = death.tick(&mut anim, &table, &mut body, 0.01).unwrap();
        assert_eq!(phase, DeathPhase::Playing { frame: 1 });
    }

    #[test]
    fn test_death_playback_holds_then_faces_down() {
        let table = full_table();
        let mut anim = AnimatedPlayer::new();
        anim.set_facing(Facing::Dying);
        let mut body = body_at(0.0, 0.0);
        let mut death = DeathPlayback::new();

        for expected in 0..6 {
            let phase = death
                .tick(&mut anim, &table, &mut body, DEATH_FRAME_DELAY)
                .unwrap();
            assert_eq!(phase, DeathPhase::Playing { frame: expected });
        }
        assert_eq!(anim.cur_index, 6);

        let phase = death.tick(&mut anim, &table, &mut body, 1.0).unwrap();
        assert_eq!(phase, DeathPhase::Holding);
        assert_eq!(anim.facing(), Facing::Dying);

        let phase = death.tick(&mut anim, &table, &mut body, 1.0).unwrap();
        assert_eq!(phase, DeathPhase::Finished);
        assert_eq!(anim.facing(), Facing::Down);
        assert_eq!(anim.cur_index, 0);
    }

    #[test]
    fn test_death_playback_needs_die_frames() {
        let mut table = full_table();
        table.set(SequenceKind::Die, Vec::new());
        let mut anim = AnimatedPlayer::new();
        let mut body = body_at(0.0, 0.0);

        assert_eq!(
            DeathPlayback::new().tick(&mut anim, &table, &mut body, 0.1),
            Err(AnimationError::MissingFrames(SequenceKind::Die))
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AnimationError::MissingFrames(SequenceKind::WalkLeft);
        assert_eq!(
            err.to_string(),
            "animation update on a sprite without a list of walk left frames"
        );
    }
}
