//! Top-down debug view: every solid wall of every sector, centred on the
//! camera.  Ignores portals, the view frustum and occlusion.

use bitflags::bitflags;
use glam::{DVec2, Vec2, dvec2};

use super::{Renderer, Rgba};
use crate::{
    config::RenderConfig,
    world::{Camera, World},
};

const WALL_COLOUR: Rgba = 0x00_E0_E0_E0;
const CAMERA_COLOUR: Rgba = 0x00_30_FF_30;

/// Cohen–Sutherland settles in four passes; more means NaN-like input.
const MAX_CLIP_PASSES: usize = 8;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Outcode: u8 {
        const LEFT  = 1 << 0;
        const RIGHT = 1 << 1;
        const ABOVE = 1 << 2;
        const BELOW = 1 << 3;
    }
}

/// Draw the minimap into a freshly cleared frame.  The caller still owns
/// `end_frame`.
pub fn draw_minimap<R: Renderer>(world: &World, camera: &Camera, cfg: &RenderConfig, target: &mut R) {
    target.begin_frame(cfg.width, cfg.height, cfg.background);
    if cfg.width == 0 || cfg.height == 0 {
        return;
    }

    // Screen maths in f64 so far-away walls stay finite and ordered.
    let centre = dvec2(cfg.width as f64, cfg.height as f64) * 0.5;
    let bounds = dvec2(cfg.width as f64 - 1.0, cfg.height as f64 - 1.0);
    let scale = f64::from(cfg.minimap_scale);
    // world is y-up, the buffer is y-down
    let to_screen = |p: Vec2| -> DVec2 {
        let d = (p.as_dvec2() - camera.pos.as_dvec2()) * scale;
        dvec2(centre.x + d.x, centre.y - d.y)
    };

    for sector in &world.sectors {
        for (_, wall) in world.walls_of(sector) {
            if wall.is_portal() {
                continue;
            }
            draw_clipped(target, to_screen(wall.a), to_screen(wall.b), bounds, WALL_COLOUR);
        }
    }

    // camera marker + facing
    let c = to_screen(camera.pos);
    let (dx, dy) = (dvec2(2.0, 0.0), dvec2(0.0, 2.0));
    draw_clipped(target, c - dx, c + dx, bounds, CAMERA_COLOUR);
    draw_clipped(target, c - dy, c + dy, bounds, CAMERA_COLOUR);
    let f = to_screen(camera.pos + camera.forward());
    draw_clipped(target, c, f, bounds, CAMERA_COLOUR);
}

/*──────────────────────────── Line clipping ──────────────────────────*/

fn draw_clipped<R: Renderer>(target: &mut R, a: DVec2, b: DVec2, bounds: DVec2, colour: Rgba) {
    let Some((a, b)) = clip_to_rect(a, b, bounds) else {
        return;
    };
    // Inside `[0, bounds]`, so the casts cannot saturate.
    let (a, b) = (a.round().clamp(DVec2::ZERO, bounds), b.round().clamp(DVec2::ZERO, bounds));
    target.draw_line(a.x as i32, a.y as i32, b.x as i32, b.y as i32, colour);
}

/// Cohen–Sutherland against `[0, max.x] × [0, max.y]`.
fn clip_to_rect(mut a: DVec2, mut b: DVec2, max: DVec2) -> Option<(DVec2, DVec2)> {
    if !(a.is_finite() && b.is_finite()) {
        return None;
    }

    let outcode = |p: DVec2| {
        let mut code = Outcode::empty();
        code.set(Outcode::LEFT, p.x < 0.0);
        code.set(Outcode::RIGHT, p.x > max.x);
        code.set(Outcode::ABOVE, p.y < 0.0);
        code.set(Outcode::BELOW, p.y > max.y);
        code
    };

    let (mut code_a, mut code_b) = (outcode(a), outcode(b));
    for _ in 0..MAX_CLIP_PASSES {
        if (code_a | code_b).is_empty() {
            return Some((a, b));
        }
        if code_a.intersects(code_b) {
            return None;
        }

        // The outside endpoint is strictly across the edge from the other
        // one, so the divisor below is never zero.
        let out = if code_a.is_empty() { code_b } else { code_a };
        let d = b - a;
        let p = if out.contains(Outcode::LEFT) {
            dvec2(0.0, a.y + (0.0 - a.x) * (d.y / d.x))
        } else if out.contains(Outcode::RIGHT) {
            dvec2(max.x, a.y + (max.x - a.x) * (d.y / d.x))
        } else if out.contains(Outcode::ABOVE) {
            dvec2(a.x + (0.0 - a.y) * (d.x / d.y), 0.0)
        } else {
            dvec2(a.x + (max.y - a.y) * (d.x / d.y), max.y)
        };

        if out == code_a {
            a = p;
            code_a = outcode(a);
        } else {
            b = p;
            code_b = outcode(b);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;
    use crate::{
        renderer::Software,
        world::{Sector, Wall},
    };

    #[test]
    fn draws_solid_walls_but_not_portals() {
        // One wall across the view and one portal below the camera.
        let walls = vec![
            Wall::solid(vec2(-2.0, 2.0), vec2(2.0, 2.0)),
            Wall::portal(vec2(2.0, -2.0), vec2(-2.0, -2.0), 0),
        ];
        let sector = Sector {
            id: 0,
            tag: 1,
            first_wall: 0,
            wall_count: 2,
            floor_z: 0.0,
            ceil_z: 3.0,
        };
        let world = World::new(vec![sector], walls);
        let cam = Camera::new(Vec2::ZERO, 1.5, 0.0, 0);
        let cfg = RenderConfig {
            minimap_scale: 10.0,
            ..RenderConfig::default().with_size(100, 100)
        };

        let mut sw = Software::default();
        draw_minimap(&world, &cam, &cfg, &mut sw);

        // solid wall at world y = 2 → buffer row 50 - 20
        assert_eq!(sw.pixel(50, 30), WALL_COLOUR);
        assert_eq!(sw.pixel(35, 30), WALL_COLOUR);
        // portal at world y = -2 is skipped
        assert_eq!(sw.pixel(50, 70), cfg.background);
        // camera marker at the centre
        assert_eq!(sw.pixel(50, 50), CAMERA_COLOUR);
    }

    fn one_wall_world(a: Vec2, b: Vec2) -> World {
        let sector = Sector {
            id: 0,
            tag: 1,
            first_wall: 0,
            wall_count: 1,
            floor_z: 0.0,
            ceil_z: 3.0,
        };
        World::new(vec![sector], vec![Wall::solid(a, b)])
    }

    #[test]
    fn huge_wall_is_clipped_to_the_buffer() {
        let world = one_wall_world(vec2(-1e30, -1.0), vec2(1e30, -1.0));
        let cam = Camera::new(Vec2::ZERO, 1.5, 0.0, 0);
        let cfg = RenderConfig {
            minimap_scale: 10.0,
            ..RenderConfig::default().with_size(100, 100)
        };

        let mut sw = Software::default();
        draw_minimap(&world, &cam, &cfg, &mut sw);

        // world y = -1 → buffer row 50 + 10, edge to edge
        for x in 0..100 {
            assert_eq!(sw.pixel(x, 60), WALL_COLOUR, "column {x}");
            assert_eq!(sw.pixel(x, 59), cfg.background, "column {x}");
            assert_eq!(sw.pixel(x, 61), cfg.background, "column {x}");
        }
    }

    #[test]
    fn clip_to_rect_keeps_rejects_and_trims() {
        let max = dvec2(9.0, 9.0);
        let inside = (dvec2(1.0, 1.0), dvec2(8.0, 5.0));
        assert_eq!(clip_to_rect(inside.0, inside.1, max), Some(inside));

        // entirely left of the rect
        assert_eq!(clip_to_rect(dvec2(-5.0, 0.0), dvec2(-1.0, 9.0), max), None);

        // diagonal through the whole rect
        let (a, b) = clip_to_rect(dvec2(-10.0, -10.0), dvec2(20.0, 20.0), max).unwrap();
        assert_eq!((a, b), (dvec2(0.0, 0.0), dvec2(9.0, 9.0)));

        let nan = dvec2(f64::NAN, 1.0);
        assert_eq!(clip_to_rect(nan, dvec2(1.0, 1.0), max), None);
    }
}
