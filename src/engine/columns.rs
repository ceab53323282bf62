//! Per-column rasterization of visible walls against the occlusion buffers.
//!
//! Rows are bottom-up inside this module.  For column `x` the rows
//! `floor_y[x] ..= ceil_y[x]` are still unpainted; a column is closed once
//! `floor_y[x] > ceil_y[x]`.

use glam::Vec2;

use super::clip::{on_segment, ray_end};
use super::frame::RenderContext;
use super::visibility::VisibleWall;
use crate::{
    renderer::{
        Renderer, Rgba,
        shading::{ceiling_colour, floor_colour, shade, wall_colour},
    },
    world::geometry::intersect_segments,
};

/// Per-column bookkeeping standing in for a depth buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Occlusion {
    /// Depth of the solid wall drawn in the column; `INFINITY` when unset.
    pub nearest_depth: Vec<f32>,
    /// Lowest unpainted row, counted from the bottom.
    pub floor_y: Vec<i32>,
    /// Highest unpainted row.
    pub ceil_y: Vec<i32>,
}

impl Occlusion {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            nearest_depth: vec![f32::INFINITY; w],
            floor_y: vec![0; w],
            ceil_y: vec![h as i32 - 1; w],
        }
    }

    #[inline]
    pub fn is_open(&self, x: usize) -> bool {
        self.floor_y[x] <= self.ceil_y[x]
    }

    /// Clamp a projected row into the open interval of column `x`.
    #[inline]
    fn clamp_row(&self, x: usize, row: f32) -> i32 {
        (row.floor() as i32).clamp(self.floor_y[x], self.ceil_y[x])
    }
}

/// Emit bottom-up rows `lo ..= hi` of column `x`, if non-empty.
fn paint<R: Renderer>(ctx: &RenderContext, target: &mut R, x: usize, lo: i32, hi: i32, c: Rgba) {
    if lo > hi {
        return;
    }
    let s = &ctx.screen;
    target.draw_column(x, s.to_buffer_row(hi), s.to_buffer_row(lo), c);
}

/// Rasterize one visible wall.  Returns the number of columns it touched.
pub fn rasterize_wall<R: Renderer>(
    ctx: &RenderContext,
    occ: &mut Occlusion,
    vw: &VisibleWall,
    target: &mut R,
) -> usize {
    let screen = &ctx.screen;
    let cw = &vw.clipped;
    let Some((x_first, x_last)) = screen.column_span(cw.bearing_a, cw.bearing_b) else {
        return 0;
    };
    let Some(sector) = ctx.world.sector(vw.sector) else {
        return 0;
    };
    let back = vw.portal.and_then(|id| ctx.world.sector(id));

    let base = wall_colour(vw.wall, vw.sector);
    let floor_c = floor_colour(vw.sector);
    let ceil_c = ceiling_colour(vw.sector);
    let eye_z = ctx.camera.z;

    let mut drawn = 0;
    // Screen right to left.
    for x in (x_first..=x_last).rev() {
        if !occ.is_open(x) {
            continue;
        }

        /* 1. depth along this column's ray ------------------------------*/
        // Centre rays of the span's outer columns can pass beside the
        // segment; the line through it does not count.
        let bearing = screen.column_to_bearing(x as f32 + 0.5);
        let ray = ray_end(bearing, ctx.config.ray_length);
        let Some(hit) = intersect_segments(Vec2::ZERO, ray, cw.a, cw.b)
            .filter(|&h| on_segment(h, cw.a, cw.b))
        else {
            continue;
        };
        let depth = hit.y;
        if !depth.is_finite() || depth <= 0.0 {
            continue;
        }

        /* 2. nearer solid wall already here -----------------------------*/
        if depth >= occ.nearest_depth[x] {
            continue;
        }

        /* 3. project this sector's floor and ceiling --------------------*/
        let floor_row = occ.clamp_row(x, screen.row_of(sector.floor_z, eye_z, depth));
        let ceil_row = occ
            .clamp_row(x, screen.row_of(sector.ceil_z, eye_z, depth))
            .max(floor_row);
        let wall_c = shade(base, depth, ctx.config.fog_density);

        paint(ctx, target, x, occ.floor_y[x], floor_row - 1, floor_c);
        paint(ctx, target, x, ceil_row + 1, occ.ceil_y[x], ceil_c);

        match back {
            /* 4. solid: fill the span and close the column --------------*/
            None => {
                paint(ctx, target, x, floor_row, ceil_row, wall_c);
                occ.nearest_depth[x] = depth;
                occ.floor_y[x] = ceil_row + 1;
                occ.ceil_y[x] = floor_row - 1;
            }

            /* 5. portal: paint the steps, keep the opening --------------*/
            Some(next) => {
                let next_floor = occ.clamp_row(x, screen.row_of(next.floor_z, eye_z, depth));
                let next_ceil = occ.clamp_row(x, screen.row_of(next.ceil_z, eye_z, depth));

                let open_lo = next_floor.max(floor_row);
                let open_hi = next_ceil.min(ceil_row);

                // lower step: the neighbour's floor is higher
                let lower_end = open_lo.min(ceil_row + 1);
                paint(ctx, target, x, floor_row, lower_end - 1, wall_c);
                // upper step: the neighbour's ceiling is lower
                paint(ctx, target, x, (open_hi + 1).max(lower_end), ceil_row, wall_c);

                occ.floor_y[x] = open_lo;
                occ.ceil_y[x] = open_hi;
            }
        }
        drawn += 1;
    }
    drawn
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::RenderConfig,
        engine::clip::ClippedWall,
        world::{Camera, Sector, Wall, World},
    };
    use glam::vec2;

    /// Remembers the order columns arrive in.
    #[derive(Default)]
    struct Recorder {
        columns: Vec<usize>,
    }

    impl Renderer for Recorder {
        fn begin_frame(&mut self, _w: usize, _h: usize, _clear: Rgba) {
            self.columns.clear();
        }

        fn draw_column(&mut self, x: usize, _y_top: usize, _y_bot: usize, _colour: Rgba) {
            if self.columns.last() != Some(&x) {
                self.columns.push(x);
            }
        }

        fn draw_line(&mut self, _x0: i32, _y0: i32, _x1: i32, _y1: i32, _colour: Rgba) {}

        fn end_frame<F>(&mut self, _submit: F)
        where
            F: FnOnce(&[Rgba], usize, usize),
        {
        }
    }

    fn room() -> World {
        let sector = Sector {
            id: 0,
            tag: 1,
            first_wall: 0,
            wall_count: 1,
            floor_z: 0.0,
            ceil_z: 3.0,
        };
        World::new(vec![sector], vec![Wall::solid(vec2(-1.0, 5.0), vec2(1.0, 5.0))])
    }

    /// Solid wall 5 units ahead, from camera-space x = -1 to 1, claiming the
    /// bearing span `[-half_span, half_span]`.
    fn ahead(half_span: f32) -> VisibleWall {
        VisibleWall {
            wall: 0,
            sector: 0,
            portal: None,
            clipped: ClippedWall {
                a: vec2(-1.0, 5.0),
                b: vec2(1.0, 5.0),
                bearing_a: half_span,
                bearing_b: -half_span,
            },
        }
    }

    #[test]
    fn columns_arrive_right_to_left() {
        let world = room();
        let cam = Camera::new(Vec2::ZERO, 1.5, 0.0, 0);
        let cfg = RenderConfig::default().with_size(64, 48);
        let ctx = RenderContext::new(&world, &cam, &cfg);

        let mut rec = Recorder::default();
        let mut occ = Occlusion::new(cfg.width, cfg.height);
        let drawn = rasterize_wall(&ctx, &mut occ, &ahead(0.19), &mut rec);

        assert!(drawn > 1);
        assert_eq!(rec.columns.len(), drawn);
        assert!(rec.columns.windows(2).all(|w| w[0] > w[1]), "{:?}", rec.columns);
    }

    #[test]
    fn rays_beside_the_segment_paint_nothing() {
        let world = room();
        let cam = Camera::new(Vec2::ZERO, 1.5, 0.0, 0);
        let cfg = RenderConfig::default().with_size(64, 48);
        let ctx = RenderContext::new(&world, &cam, &cfg);

        // The segment subtends columns ~24..40; the claimed span is wider.
        let mut rec = Recorder::default();
        let mut occ = Occlusion::new(cfg.width, cfg.height);
        let drawn = rasterize_wall(&ctx, &mut occ, &ahead(0.5), &mut rec);

        assert_eq!(drawn, 16);
        assert_eq!(rec.columns, (24..40).rev().collect::<Vec<_>>());
        for x in (11..24).chain(40..53) {
            assert!(occ.is_open(x), "column {x}");
            assert!(occ.nearest_depth[x].is_infinite(), "column {x}");
        }
    }

    #[test]
    fn fresh_buffers_are_open_everywhere() {
        let occ = Occlusion::new(4, 10);
        assert!((0..4).all(|x| occ.is_open(x)));
        assert_eq!(occ.floor_y, vec![0; 4]);
        assert_eq!(occ.ceil_y, vec![9; 4]);
        assert!(occ.nearest_depth.iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn clamp_row_stays_inside_the_open_interval() {
        let mut occ = Occlusion::new(1, 10);
        occ.floor_y[0] = 2;
        occ.ceil_y[0] = 6;
        assert_eq!(occ.clamp_row(0, -40.0), 2);
        assert_eq!(occ.clamp_row(0, 4.7), 4);
        assert_eq!(occ.clamp_row(0, 1e9), 6);
        assert_eq!(occ.clamp_row(0, f32::NAN), 2);
    }

    #[test]
    fn closed_column_is_not_open() {
        let mut occ = Occlusion::new(1, 10);
        occ.floor_y[0] = 6;
        occ.ceil_y[0] = 5;
        assert!(!occ.is_open(0));
    }
}
