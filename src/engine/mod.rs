//! Portal-traversal renderer.
//!
//! Per frame: [`frame::render_frame`] re-pins the camera's sector, the
//! [`visibility`] walk collects clipped walls front-to-back by sector, and
//! [`columns`] fills each wall's screen columns against the occlusion
//! buffers.

pub mod clip;
pub mod columns;
pub mod frame;
pub mod types;
pub mod visibility;

pub use frame::{FrameStats, RenderContext, render_frame, render_view};
