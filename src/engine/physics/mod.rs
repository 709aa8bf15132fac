// Physics system using rapier2d

mod body;
mod collision;
mod world;

pub use world::PhysicsWorld;
