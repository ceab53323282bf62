//! Rendering abstraction layer.
//!
//! *The engine never touches a pixel buffer directly.*  It walks the portal
//! graph, decides which vertical spans are visible and hands them to a type
//! that implements [`Renderer`].
//!
//! * [`Software`] is the CPU back-end that owns a `0x00RRGGBB` scratch buffer.
//! * The minimap ([`draw_minimap`]) only needs line drawing, so it goes
//!   through the same trait.

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// A render target that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize, clear: Rgba);

    /// Fill rows `y_top ..= y_bot` (top-down buffer rows) of column `x`.
    fn draw_column(&mut self, x: usize, y_top: usize, y_bot: usize, colour: Rgba);

    /// Draw a line between two buffer pixels; off-screen pixels are dropped.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, colour: Rgba);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// `submit(&[Rgba], w, h)` is run exactly once per frame; the viewer
    /// passes `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

mod minimap;
pub mod shading;
mod software;

pub use minimap::draw_minimap;
pub use software::Software;
