mod camera;
pub mod geometry;
mod map;

pub use camera::Camera;

pub use map::{Sector, SectorId, Wall, WallId, World};
