mod camera;
mod geometry;
mod locate;

pub use geometry::{Level, NO_SECTOR, Sector, SectorId, Wall};

pub use camera::Camera;

pub use locate::LocateError;
