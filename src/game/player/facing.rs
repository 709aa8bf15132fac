// Player facing / activity state

use std::fmt;

/// Which directional animation (or the dying sequence) is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Down,
    Left,
    #[default]
    Right,
    Up,
    Dying,
}

impl Facing {
    /// Frame sequence used while moving in this state
    pub fn moving_sequence(self) -> SequenceKind {
        match self {
            Self::Down => SequenceKind::WalkDown,
            Self::Left => SequenceKind::WalkLeft,
            Self::Right => SequenceKind::WalkRight,
            Self::Up => SequenceKind::WalkUp,
            Self::Dying => SequenceKind::Die,
        }
    }

    /// Frame sequence used while standing still in this state
    pub fn standing_sequence(self) -> SequenceKind {
        match self {
            Self::Down => SequenceKind::StandDown,
            Self::Left => SequenceKind::StandLeft,
            Self::Right => SequenceKind::StandRight,
            Self::Up => SequenceKind::StandUp,
            Self::Dying => SequenceKind::Die,
        }
    }

    /// Facing implied by a single-axis velocity, None for diagonal or zero
    pub fn from_velocity(vx: f32, vy: f32) -> Option<Facing> {
        match (vx, vy) {
            (x, y) if x > 0.0 && y == 0.0 => Some(Self::Right),
            (x, y) if x < 0.0 && y == 0.0 => Some(Self::Left),
            (x, y) if y < 0.0 && x == 0.0 => Some(Self::Down),
            (x, y) if y > 0.0 && x == 0.0 => Some(Self::Up),
            _ => None,
        }
    }
}

/// One of the nine frame sequences a player sprite carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    StandDown,
    StandUp,
    StandLeft,
    StandRight,
    WalkDown,
    WalkUp,
    WalkLeft,
    WalkRight,
    Die,
}

impl SequenceKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::StandDown => "stand down",
            Self::StandUp => "stand up",
            Self::StandLeft => "stand left",
            Self::StandRight => "stand right",
            Self::WalkDown => "walk down",
            Self::WalkUp => "walk up",
            Self::WalkLeft => "walk left",
            Self::WalkRight => "walk right",
            Self::Die => "die",
        }
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
