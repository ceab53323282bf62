//! Sector/portal software rasterizer.
//!
//! A level is a set of convex sectors joined by portal walls.  Each frame the
//! engine walks the portal graph outward from the camera's sector and draws
//! walls, steps, floors and ceilings column by column into a [`Renderer`].
//!
//! [`Renderer`]: renderer::Renderer

pub mod config;
pub mod engine;
pub mod level;
pub mod renderer;
pub mod sim;
pub mod world;
