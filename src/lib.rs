pub mod assets;
pub mod camera;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod map;
pub mod movement;
pub mod pathfinding;
pub mod renderer;

/// Cell edge in world pixels used by the bundled map exports.
pub const DEFAULT_TILE_SIZE: f32 = 32.0;
