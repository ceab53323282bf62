use glam::{Vec2, vec2};

use super::geometry::{normalize_angle, rotate};
use super::map::{SectorId, World};

/// Player view-point in world space.
///
/// * Only **yaw** is simulated – the view never tilts up/down.
/// * `z` is the absolute eye height, re-based whenever the camera changes
///   sector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
    pub z: f32,
    /// Radians in `(-π, π]`; 0 looks along world +Y, positive turns left.
    pub yaw: f32,
    pub sector: SectorId,
}

impl Camera {
    pub fn new(pos: Vec2, z: f32, yaw: f32, sector: SectorId) -> Self {
        Self {
            pos,
            z,
            yaw: normalize_angle(yaw),
            sector,
        }
    }

    /// Place a camera at a spawn point, resolving its sector immediately.
    ///
    /// Falls back to sector 0 when the point is outside every sector.
    pub fn spawn(world: &World, pos: Vec2, yaw: f32, eye_height: f32) -> Self {
        let sector = world.locate(pos).unwrap_or(0);
        let floor = world.sector(sector).map_or(0.0, |s| s.floor_z);
        Self::new(pos, floor + eye_height, yaw, sector)
    }

    /// Transform a world point into camera-local coords:
    ///  .x = lateral offset (+ right)
    ///  .y = depth along the view direction
    #[inline]
    pub fn to_cam(&self, p: Vec2) -> Vec2 {
        rotate(p - self.pos, self.yaw)
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the camera looks.
    #[inline(always)]
    pub fn forward(&self) -> Vec2 {
        let (s, c) = self.yaw.sin_cos();
        vec2(-s, c)
    }

    /// Unit vector pointing to the camera's right.
    #[inline(always)]
    pub fn right(&self) -> Vec2 {
        let (s, c) = self.yaw.sin_cos();
        vec2(c, s)
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Move by `forward` units along the view and `side` units to the right.
    pub fn step(&mut self, forward: f32, side: f32) {
        self.pos += self.forward() * forward + self.right() * side;
    }

    /// Rotate around Z (positive = turn left).
    pub fn turn(&mut self, delta_yaw: f32) {
        self.yaw = normalize_angle(self.yaw + delta_yaw);
    }

    /*──────────────────────── sector locator ────────────────────────*/

    /// Re-pin `sector` after the camera moved.
    ///
    /// Only scans when the position left the recorded sector.  On a change the
    /// eye height is re-based to the new floor.  Returns `true` if the sector
    /// changed; a camera outside every sector keeps its old one.
    pub fn relocate(&mut self, world: &World, eye_height: f32) -> bool {
        if let Some(current) = world.sector(self.sector) {
            if world.inside(self.pos, current) {
                return false;
            }
        }

        let Some(found) = world.locate(self.pos) else {
            return false;
        };
        if found == self.sector {
            return false;
        }

        log::debug!("camera entered sector {} (was {})", found, self.sector);
        self.sector = found;
        if let Some(s) = world.sector(found) {
            self.z = s.floor_z + eye_height;
        }
        true
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
