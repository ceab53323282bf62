use glam::Vec2;
use std::ops::Range;

use super::geometry::side_of;

pub type SectorId = u16;
pub type WallId = u16;

/// Runtime snapshot of one map (immutable after load).
#[derive(Clone, Debug, Default)]
pub struct World {
    pub sectors: Vec<Sector>,
    pub walls: Vec<Wall>,
}

/*--------------------------- walls ----------------------------------*/

/// Directed boundary edge `a → b` of a sector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wall {
    pub a: Vec2,
    pub b: Vec2,
    /// Sector visible through this edge; `None` for a solid wall.
    pub portal: Option<SectorId>,
}

impl Wall {
    pub fn solid(a: Vec2, b: Vec2) -> Self {
        Self { a, b, portal: None }
    }

    pub fn portal(a: Vec2, b: Vec2, to: SectorId) -> Self {
        Self {
            a,
            b,
            portal: Some(to),
        }
    }

    #[inline]
    pub fn is_portal(&self) -> bool {
        self.portal.is_some()
    }
}

/*--------------------------- sectors --------------------------------*/

/// Convex room.  Walls are wound counter-clockwise (interior on the left).
#[derive(Clone, Debug, PartialEq)]
pub struct Sector {
    pub id: SectorId,
    /// Numeric id as written in the level file.
    pub tag: u32,
    pub first_wall: WallId,
    pub wall_count: u16,
    pub floor_z: f32,
    pub ceil_z: f32,
}

impl Sector {
    #[inline]
    pub fn wall_ids(&self) -> Range<WallId> {
        self.first_wall..self.first_wall + self.wall_count
    }
}

// ──────────────────────────────────────────────────────────────────────────
//                       World – public helpers
// ──────────────────────────────────────────────────────────────────────────
impl World {
    pub fn new(sectors: Vec<Sector>, walls: Vec<Wall>) -> Self {
        Self { sectors, walls }
    }

    #[inline]
    pub fn sector(&self, id: SectorId) -> Option<&Sector> {
        self.sectors.get(id as usize)
    }

    #[inline]
    pub fn wall(&self, id: WallId) -> &Wall {
        &self.walls[id as usize]
    }

    /// Walls of `sector` in stored order, paired with their arena ids.
    pub fn walls_of<'a>(
        &'a self,
        sector: &'a Sector,
    ) -> impl Iterator<Item = (WallId, &'a Wall)> + 'a {
        sector.wall_ids().map(move |id| (id, self.wall(id)))
    }

    /// Strict half-plane test: `p` must lie left of every wall.  A point on
    /// an edge counts as outside.
    pub fn inside(&self, p: Vec2, sector: &Sector) -> bool {
        self.walls_of(sector).all(|(_, w)| side_of(p, w.a, w.b) > 0.0)
    }

    /// First sector (ascending id) containing `p`.
    pub fn locate(&self, p: Vec2) -> Option<SectorId> {
        self.sectors
            .iter()
            .find(|s| self.inside(p, s))
            .map(|s| s.id)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
