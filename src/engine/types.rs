use crate::config::RenderConfig;

/// Constants that depend on the *frame-buffer*, not on the map.
///
/// Rows are counted **from the bottom** (row 0 is the lowest scan-line);
/// [`Screen::to_buffer_row`] flips them for the row-major pixel buffer.
#[derive(Clone, Copy, Debug)]
pub struct Screen {
    pub w: usize,
    pub h: usize,
    pub half_h: f32, // pre-derived for speed
    pub half_fov: f32,
    pub focal_y: f32,
}

impl Screen {
    pub fn new(cfg: &RenderConfig) -> Self {
        Self {
            w: cfg.width,
            h: cfg.height,
            half_h: cfg.height as f32 * 0.5,
            half_fov: cfg.half_fov(),
            focal_y: cfg.height as f32 * cfg.vertical_scale,
        }
    }

    /// Continuous column for a bearing; `+half_fov` maps to 0, `-half_fov`
    /// to `w`.
    #[inline]
    pub fn bearing_to_column(&self, bearing: f32) -> f32 {
        (self.half_fov - bearing) / (2.0 * self.half_fov) * self.w as f32
    }

    /// Inverse of [`Screen::bearing_to_column`].
    #[inline]
    pub fn column_to_bearing(&self, x: f32) -> f32 {
        self.half_fov - x / self.w as f32 * (2.0 * self.half_fov)
    }

    /// Inclusive range of columns touched by the bearing interval, clamped to
    /// the screen.  `None` when the interval covers no column.
    pub fn column_span(&self, b0: f32, b1: f32) -> Option<(usize, usize)> {
        let c0 = self.bearing_to_column(b0);
        let c1 = self.bearing_to_column(b1);
        let (lo, hi) = if c0 <= c1 { (c0, c1) } else { (c1, c0) };
        if !lo.is_finite() || !hi.is_finite() {
            return None;
        }

        let first = lo.floor().max(0.0);
        let last = (hi.ceil() - 1.0).min(self.w as f32 - 1.0);
        (first <= last).then(|| (first as usize, last as usize))
    }

    /// Screen row (from the bottom) of world height `z` at `depth`.
    #[inline]
    pub fn row_of(&self, z: f32, eye_z: f32, depth: f32) -> f32 {
        self.half_h + (z - eye_z) * self.focal_y / depth
    }

    /// Bottom-up row → top-down buffer row.
    #[inline]
    pub fn to_buffer_row(&self, row: i32) -> usize {
        (self.h as i32 - 1 - row) as usize
    }
}
