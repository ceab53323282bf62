//! ---------------------------------------------------------------------------
//! Classic software (CPU) column renderer
//!
//! * Fills a `Vec<u32>` frame-buffer in **0x00RRGGBB** format.
//! * Relies on the portal walk to feed *front-to-back* spans through the
//!   occlusion buffers, so no Z-buffer is needed.
//! ---------------------------------------------------------------------------

use super::{Renderer, Rgba};

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

#[derive(Default)]
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl Software {
    /// Finished pixels of the current frame.
    pub fn pixels(&self) -> &[Rgba] {
        &self.scratch
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.scratch[y * self.width + x]
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize, clear: Rgba) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }
        self.scratch.fill(clear);
    }

    fn draw_column(&mut self, x: usize, y_top: usize, y_bot: usize, colour: Rgba) {
        if x >= self.width || self.height == 0 {
            return;
        }
        let y_bot = y_bot.min(self.height - 1);
        for y in y_top..=y_bot {
            self.scratch[y * self.width + x] = colour;
        }
    }

    /// Integer Bresenham line-drawing algorithm.  Runs in `i64` so any pair
    /// of `i32` endpoints is safe; cost is still the line's length.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, colour: Rgba) {
        let (mut x0, mut y0) = (i64::from(x0), i64::from(y0));
        let (x1, y1) = (i64::from(x1), i64::from(y1));
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            if (0..self.width as i64).contains(&x0) && (0..self.height as i64).contains(&y0) {
                self.scratch[y0 as usize * self.width + x0 as usize] = colour;
            }
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
