// ──────────────────────────────────────────────────────────────────────────
// level/loader.rs
//
//  *   RawLevel   (level::raw)   ──>   world::World  + spawn pose
//
// Cross-record checks live here; `raw` only checks shape and counts.
// ──────────────────────────────────────────────────────────────────────────

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use glam::{Vec2, vec2};
use log::{debug, info, warn};

use super::raw::{LevelError, RawLevel, read_raw_level};
use crate::world::{Camera, Sector, SectorId, Wall, WallId, World};

/// Where and facing which way the level wants the camera to start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spawn {
    pub pos: Vec2,
    pub yaw: f32,
}

/// A validated, render-ready level.
#[derive(Clone, Debug)]
pub struct Level {
    pub name: String,
    pub world: World,
    pub spawn: Spawn,
}

impl Level {
    /// Camera at the spawn point, eye `eye_height` above the floor of the
    /// sector containing it.
    pub fn camera(&self, eye_height: f32) -> Camera {
        Camera::spawn(&self.world, self.spawn.pos, self.spawn.yaw, eye_height)
    }
}

/*====================================================================*/
/*                       Public API                                   */
/*====================================================================*/

pub fn load_level(path: impl AsRef<Path>) -> Result<Level, LevelError> {
    let path = path.as_ref();
    info!("loading level {}", path.display());
    read_level(BufReader::new(File::open(path)?))
}

pub fn read_level<R: BufRead>(reader: R) -> Result<Level, LevelError> {
    build_level(read_raw_level(reader)?)
}

pub fn parse_level(text: &str) -> Result<Level, LevelError> {
    read_level(text.as_bytes())
}

/// Validate cross references and convert to world types.
pub fn build_level(raw: RawLevel) -> Result<Level, LevelError> {
    let n_sectors = raw.sectors.len();
    let n_walls = raw.walls.len();

    /*----- 1. Sectors ---------------------------------------------------*/
    let mut sectors = Vec::with_capacity(n_sectors);
    for (idx, rs) in raw.sectors.iter().enumerate() {
        if rs.wall_count == 0 {
            return Err(LevelError::EmptySector { sector: idx });
        }
        let end = rs.wall_start + rs.wall_count;
        if end > n_walls {
            return Err(LevelError::WallRange {
                sector: idx,
                start: rs.wall_start,
                end,
                walls: n_walls,
            });
        }
        if rs.floor_z >= rs.ceil_z {
            warn!(
                "sector {idx} (id {}): floor {} is not below ceiling {}",
                rs.id, rs.floor_z, rs.ceil_z
            );
        }
        sectors.push(Sector {
            id: idx as SectorId,
            tag: rs.id,
            first_wall: rs.wall_start as WallId,
            wall_count: rs.wall_count as u16,
            floor_z: rs.floor_z,
            ceil_z: rs.ceil_z,
        });
    }

    /*----- 2. Walls -----------------------------------------------------*/
    let mut walls = Vec::with_capacity(n_walls);
    let mut portals = 0;
    for (idx, rw) in raw.walls.iter().enumerate() {
        let a = vec2(rw.ax, rw.ay);
        let b = vec2(rw.bx, rw.by);
        let wall = match rw.portal {
            0 => Wall::solid(a, b),
            p if (p as usize) <= n_sectors => {
                portals += 1;
                Wall::portal(a, b, (p - 1) as SectorId)
            }
            p => {
                return Err(LevelError::PortalTarget {
                    wall: idx,
                    target: p,
                    sectors: n_sectors,
                });
            }
        };
        walls.push(wall);
    }

    debug!(
        "level '{}': {} sectors, {} walls ({} portals)",
        raw.name, n_sectors, n_walls, portals
    );

    Ok(Level {
        name: raw.name,
        world: World::new(sectors, walls),
        spawn: Spawn {
            pos: vec2(raw.camera.x, raw.camera.y),
            yaw: raw.camera.yaw,
        },
    })
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    // Two 4×4 rooms side by side, joined through x = 4.
    const TWO_ROOMS: &str = "\
two rooms
2
0 4 10 0.0 4.0
4 4 20 0.5 3.0
8
0 0 4 0 0
4 0 4 4 2
4 4 0 4 0
0 4 0 0 0
4 0 8 0 0
8 0 8 4 0
8 4 4 4 0
4 4 4 0 1
6 2 0
";

    #[test]
    fn builds_world_and_spawn() {
        let lvl = parse_level(TWO_ROOMS).unwrap();
        assert_eq!(lvl.name, "two rooms");
        assert_eq!(lvl.world.sectors.len(), 2);
        assert_eq!(lvl.world.walls.len(), 8);

        let s1 = lvl.world.sector(1).unwrap();
        assert_eq!((s1.id, s1.tag), (1, 20));
        assert_eq!(s1.wall_ids(), 4..8);

        assert_eq!(lvl.world.wall(0).portal, None);
        assert_eq!(lvl.world.wall(1).portal, Some(1));
        assert_eq!(lvl.world.wall(7).portal, Some(0));
        assert_eq!(lvl.spawn.pos, vec2(6.0, 2.0));
    }

    #[test]
    fn camera_starts_in_the_spawn_sector() {
        let lvl = parse_level(TWO_ROOMS).unwrap();
        let cam = lvl.camera(1.5);
        assert_eq!(cam.sector, 1);
        assert!((cam.z - 2.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_empty_sector() {
        let bad = TWO_ROOMS.replace("4 4 20 0.5 3.0", "4 0 20 0.5 3.0");
        assert!(matches!(
            parse_level(&bad),
            Err(LevelError::EmptySector { sector: 1 })
        ));
    }

    #[test]
    fn rejects_wall_range_past_the_end() {
        let bad = TWO_ROOMS.replace("4 4 20 0.5 3.0", "6 4 20 0.5 3.0");
        assert!(matches!(
            parse_level(&bad),
            Err(LevelError::WallRange { sector: 1, end: 10, walls: 8, .. })
        ));
    }

    #[test]
    fn rejects_dangling_portal() {
        let bad = TWO_ROOMS.replace("4 0 4 4 2", "4 0 4 4 3");
        assert!(matches!(
            parse_level(&bad),
            Err(LevelError::PortalTarget { wall: 1, target: 3, sectors: 2 })
        ));
    }

    #[test]
    fn inverted_heights_are_accepted() {
        let odd = TWO_ROOMS.replace("4 4 20 0.5 3.0", "4 4 20 3.0 0.5");
        assert!(parse_level(&odd).is_ok());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_level(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, LevelError::Io(_)));
    }
}
