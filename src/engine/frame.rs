use super::{
    columns::{Occlusion, rasterize_wall},
    types::Screen,
    visibility::collect_visible_walls,
};
use crate::{
    config::RenderConfig,
    renderer::Renderer,
    world::{Camera, World},
};

/// Everything one frame reads: level, view-point, tunables and the derived
/// screen constants.  Passed by reference into every stage.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub world: &'a World,
    pub camera: &'a Camera,
    pub config: &'a RenderConfig,
    pub screen: Screen,
}

impl<'a> RenderContext<'a> {
    pub fn new(world: &'a World, camera: &'a Camera, config: &'a RenderConfig) -> Self {
        Self {
            world,
            camera,
            config,
            screen: Screen::new(config),
        }
    }
}

/// What one frame did, for the viewer's stats line and for tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub sectors_visited: usize,
    pub walls_visible: usize,
    pub columns_drawn: usize,
}

/// Re-pin the camera's sector, then draw the view.
///
/// The caller still owns `end_frame`.
pub fn render_frame<R: Renderer>(
    world: &World,
    camera: &mut Camera,
    config: &RenderConfig,
    target: &mut R,
) -> FrameStats {
    camera.relocate(world, config.eye_height);
    let ctx = RenderContext::new(world, camera, config);
    render_view(&ctx, target)
}

/// Draw the first-person view for a camera whose sector is already known.
///
/// Occlusion buffers and the visibility queue live only for this call.
pub fn render_view<R: Renderer>(ctx: &RenderContext, target: &mut R) -> FrameStats {
    let screen = &ctx.screen;
    target.begin_frame(screen.w, screen.h, ctx.config.background);

    let vis = collect_visible_walls(ctx);
    let mut occ = Occlusion::new(screen.w, screen.h);

    let mut columns_drawn = 0;
    for vw in &vis.walls {
        columns_drawn += rasterize_wall(ctx, &mut occ, vw, target);
    }

    FrameStats {
        sectors_visited: vis.sectors.len(),
        walls_visible: vis.walls.len(),
        columns_drawn,
    }
}
