// Tile maps
//
// - `map`: the JSON map file (layers of tile positions, object groups)
// - `scene`: tiles placed in world space, ready to draw and collide with

mod map;
mod scene;

pub use map::TileMap;
pub use scene::Scene;

#[allow(unused_imports)]
pub use map::MapError;
