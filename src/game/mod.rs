// Game logic
//
// - `player`: the animated character and its frame sequences
// - `dungeon`: map, walls and key handling around the player

mod dungeon;
mod player;

pub use dungeon::Game;
