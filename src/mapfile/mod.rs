//! Level files: JSON decoding (`raw`) and validation into a
//! [`world::Level`](crate::world::Level) (`loader`).

pub mod loader;
pub mod raw;

pub use loader::{LevelLimits, LoadError, load_level, parse_level};
pub use raw::RawError;
