// Frame table: ordered frame sequences per facing / activity

use std::collections::HashMap;

use super::facing::SequenceKind;
use crate::engine::assets::{SheetRegion, SpriteSheet};

/// A single displayable frame of a spritesheet
pub type Frame = SheetRegion;

/// All frame sequences of one animated sprite
#[derive(Debug, Clone, Default)]
pub struct FrameTable {
    sequences: HashMap<SequenceKind, Vec<Frame>>,
}

impl FrameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the frames of a sequence
    pub fn set(&mut self, kind: SequenceKind, frames: Vec<Frame>) {
        self.sequences.insert(kind, frames);
    }

    /// Builder-style variant of [`FrameTable::set`]
    pub fn with(mut self, kind: SequenceKind, frames: Vec<Frame>) -> Self {
        self.set(kind, frames);
        self
    }

    /// Frames of a sequence, empty if never registered
    pub fn get(&self, kind: SequenceKind) -> &[Frame] {
        self.sequences.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_frames(&self, kind: SequenceKind) -> bool {
        !self.get(kind).is_empty()
    }
}

/// Where each sequence lives on a character spritesheet
#[derive(Debug, Clone)]
pub struct CharacterSheetLayout {
    /// Width of each frame in pixels
    pub frame_width: u32,
    /// Height of each frame in pixels
    pub frame_height: u32,
    /// Frames per walk row
    pub walk_frames: u32,
    /// Frames in the die row
    pub die_frames: u32,
    /// Pixel y of each walk row
    pub walk_up_y: u32,
    pub walk_left_y: u32,
    pub walk_down_y: u32,
    pub walk_right_y: u32,
    /// Pixel y of the die row
    pub die_y: u32,
}

impl CharacterSheetLayout {
    /// Layout of the "universal" character sheets (64x64 frames)
    pub fn universal() -> Self {
        Self {
            frame_width: 64,
            frame_height: 64,
            walk_frames: 9,
            die_frames: 6,
            walk_up_y: 512,
            walk_left_y: 576,
            walk_down_y: 640,
            walk_right_y: 704,
            die_y: 1280,
        }
    }

    /// Slice a sheet into a full frame table
    ///
    /// Standing sequences reuse the first frame of the matching walk row.
    pub fn slice(&self, sheet: &SpriteSheet) -> FrameTable {
        let row = |y| sheet.row(y, self.frame_width, self.frame_height, self.walk_frames);
        let walk_up = row(self.walk_up_y);
        let walk_left = row(self.walk_left_y);
        let walk_down = row(self.walk_down_y);
        let walk_right = row(self.walk_right_y);
        let die = sheet.row(self.die_y, self.frame_width, self.frame_height, self.die_frames);

        let first = |frames: &[Frame]| frames.first().copied().into_iter().collect::<Vec<_>>();

        FrameTable::new()
            .with(SequenceKind::StandUp, first(&walk_up[..]))
            .with(SequenceKind::StandLeft, first(&walk_left[..]))
            .with(SequenceKind::StandDown, first(&walk_down[..]))
            .with(SequenceKind::StandRight, first(&walk_right[..]))
            .with(SequenceKind::WalkUp, walk_up)
            .with(SequenceKind::WalkLeft, walk_left)
            .with(SequenceKind::WalkDown, walk_down)
            .with(SequenceKind::WalkRight, walk_right)
            .with(SequenceKind::Die, die)
    }
}

impl Default for CharacterSheetLayout {
    fn default() -> Self {
        Self::universal()
    }
}
