// Engine modules: assets, input, physics, rendering, tile maps and loop timing

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
pub mod tilemap;
