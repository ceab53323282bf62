//! Text level files → [`World`](crate::world::World).

mod loader;
mod raw;

pub use loader::{Level, Spawn, build_level, load_level, parse_level, read_level};
pub use raw::{LevelError, RawCamera, RawLevel, RawSector, RawWall, read_raw_level};
