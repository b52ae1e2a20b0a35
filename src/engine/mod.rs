//! Frame loop glue: owns the level, camera and renderer.

mod engine;
mod input;

pub use engine::Engine;
pub use input::InputCmd;
