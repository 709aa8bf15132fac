// Player system
//
// - Facing / activity state and the frame sequences it selects
// - Frame table sliced from a character spritesheet
// - Distance-driven animation state machine and the timed die sequence
// - The player sprite entity tying it together

mod animation;
mod facing;
mod frames;
mod sprite;

// Re-export commonly used types
pub use animation::{AnimationError, DeathPhase};
pub use facing::Facing;
pub use frames::CharacterSheetLayout;
pub use sprite::PlayerSprite;

#[allow(unused_imports)]
pub use animation::DEFAULT_DELTA_TIME;
