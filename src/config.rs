//! Tunables shared by the renderer, the locator and the viewer.

use std::f32::consts::FRAC_PI_2;

use crate::renderer::Rgba;

/// Upper bound on sectors a level may declare (and the traversal may queue).
pub const MAX_SECTORS: usize = 64;
/// Upper bound on walls a level may declare.
pub const MAX_WALLS: usize = 512;

#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    /// Horizontal field of view in radians.
    pub hfov: f32,
    /// Vertical focal length as a fraction of the screen height; `1.0` makes
    /// the focal length equal the height.
    pub vertical_scale: f32,
    /// Eye height above the floor of the camera's sector.
    pub eye_height: f32,
    /// Distance darkening: channels scale by `1 / (1 + fog_density·depth²)`.
    pub fog_density: f32,
    /// Length of the finite segments standing in for view rays.
    pub ray_length: f32,
    /// Most sectors the portal walk will queue in one frame.
    pub max_sectors: usize,
    pub background: Rgba,
    /// Minimap pixels per world unit.
    pub minimap_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            hfov: FRAC_PI_2,
            vertical_scale: 1.0,
            eye_height: 1.5,
            fog_density: 0.01,
            ray_length: 1_000.0,
            max_sectors: MAX_SECTORS,
            background: 0x00_20_20_20,
            minimap_scale: 16.0,
        }
    }
}

impl RenderConfig {
    #[inline]
    pub fn half_fov(&self) -> f32 {
        self.hfov * 0.5
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}
