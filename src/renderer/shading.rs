//! Flat colours: one stable colour per (wall, sector) pair, darkened with
//! distance.

use super::Rgba;
use crate::world::{SectorId, WallId};

/// Mix two small ids into 32 well-spread bits.
#[inline]
fn mix(wall: u32, sector: u32) -> u32 {
    let mut h = wall.wrapping_mul(0x9E37_79B1) ^ sector.wrapping_mul(0x85EB_CA77);
    h ^= h >> 15;
    h = h.wrapping_mul(0x2C1B_3C6D);
    h ^= h >> 12;
    h = h.wrapping_mul(0x297A_2D39);
    h ^ (h >> 15)
}

#[inline]
fn pack(r: u32, g: u32, b: u32) -> Rgba {
    (r << 16) | (g << 8) | b
}

#[inline]
fn channels(c: Rgba) -> (u32, u32, u32) {
    ((c >> 16) & 0xFF, (c >> 8) & 0xFF, c & 0xFF)
}

/// Identifying colour of wall `wall` as seen from `sector`.
///
/// Channels stay in `0x40..=0xFF` so walls remain visible through the fog.
pub fn wall_colour(wall: WallId, sector: SectorId) -> Rgba {
    let h = mix(wall as u32, sector as u32);
    let lift = |v: u32| 0x40 + v % 0xC0;
    pack(lift(h & 0xFF), lift((h >> 8) & 0xFF), lift((h >> 16) & 0xFF))
}

/// Floor colour of a sector: a dim, grey-biased variant of its hash.
pub fn floor_colour(sector: SectorId) -> Rgba {
    let (r, g, b) = channels(wall_colour(WallId::MAX, sector));
    pack((r + 0x50) / 3, (g + 0x50) / 3, (b + 0x50) / 3)
}

/// Ceiling colour of a sector; darker than its floor.
pub fn ceiling_colour(sector: SectorId) -> Rgba {
    let (r, g, b) = channels(wall_colour(WallId::MAX - 1, sector));
    pack(r / 5, g / 5, b / 5)
}

/// Distance darkening: every channel scaled by `1 / (1 + fog·depth²)`.
///
/// Truncates, so no channel can ever get brighter.
pub fn shade(colour: Rgba, depth: f32, fog_density: f32) -> Rgba {
    let k = (1.0 / (1.0 + fog_density * depth * depth)).clamp(0.0, 1.0);
    let (r, g, b) = channels(colour);
    let dim = |v: u32| (v as f32 * k) as u32;
    pack(dim(r), dim(g), dim(b))
}
