//! 2-D vector helpers shared by the world model and the renderer.
//!
//! Everything works on [`glam::Vec2`]; world space and camera space use the
//! same type.  Angles are radians, rotation is **clockwise-positive** so that
//! `rotate(p - eye, yaw)` lands a point in camera space.

use glam::{Vec2, vec2};
use std::f32::consts::{PI, TAU};

/// Below this the two lines are treated as parallel.
const PARALLEL_EPS: f32 = 1e-6;

/// Rotate `v` clockwise by `angle` radians.
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    vec2(v.x * c + v.y * s, -v.x * s + v.y * c)
}

#[inline]
pub fn translate(v: Vec2, offset: Vec2) -> Vec2 {
    v + offset
}

#[inline]
pub fn scale(v: Vec2, factor: f32) -> Vec2 {
    v * factor
}

/// Wrap an angle into `(-π, π]`.
#[inline]
pub fn normalize_angle(a: f32) -> f32 {
    a - TAU * ((a - PI) / TAU).ceil()
}

/// Intersection of line `p1→p2` with line `p3→p4`.
///
/// The hit is accepted when the parameter along **either** segment lies in
/// `[0, 1]`.  Callers intersect walls against view rays stored as long
/// finite segments, so requiring both would reject hits on the wall's far
/// side of the ray's end.
///
/// Returns `None` for (near-)parallel lines or when neither parameter is in
/// range.
pub fn intersect_segments(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let denom = d1.perp_dot(d2);
    if denom.abs() < PARALLEL_EPS {
        return None;
    }

    let w = p3 - p1;
    let t = w.perp_dot(d2) / denom; // along p1→p2
    let u = w.perp_dot(d1) / denom; // along p3→p4

    let in_unit = |v: f32| (0.0..=1.0).contains(&v);
    if !(in_unit(t) || in_unit(u)) {
        return None;
    }

    let hit = p1 + d1 * t;
    hit.is_finite().then_some(hit)
}

/// Signed doubled area of `(p, a, b)`, positive when `p` lies left of `a→b`.
#[inline]
pub fn side_of(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    -((p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x))
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
