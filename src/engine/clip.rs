//! Horizontal frustum clipping of camera-space wall segments.

use glam::{Vec2, vec2};
use std::f32::consts::FRAC_PI_2;

use crate::world::geometry::{intersect_segments, normalize_angle};

/// Slack when checking that a boundary crossing lies on the wall.
const CLIP_EPS: f32 = 1e-3;

/// A wall segment after frustum clipping, still in camera space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClippedWall {
    pub a: Vec2,
    pub b: Vec2,
    pub bearing_a: f32,
    pub bearing_b: f32,
}

/// Horizontal angle of a camera-space point; 0 straight ahead, positive to
/// the left.
#[inline]
pub fn bearing(p: Vec2) -> f32 {
    normalize_angle(p.y.atan2(p.x) - FRAC_PI_2)
}

/// Far end of a view ray at `bearing`, `length` units from the eye.
#[inline]
pub fn ray_end(bearing: f32, length: f32) -> Vec2 {
    let (s, c) = bearing.sin_cos();
    vec2(-s, c) * length
}

/// Whether `h`, a point on the line through `a` and `b`, lies on the
/// segment itself (within `CLIP_EPS`).
#[inline]
pub fn on_segment(h: Vec2, a: Vec2, b: Vec2) -> bool {
    h.cmpge(a.min(b) - CLIP_EPS).all() && h.cmple(a.max(b) + CLIP_EPS).all()
}

/// Clip a camera-space segment to `[-half_fov, half_fov]`.
///
/// Returns `None` when the segment is behind the eye, entirely outside one
/// edge of the view, or when clipping hits a degenerate intersection.
pub fn clip_to_fov(a: Vec2, b: Vec2, half_fov: f32, ray_length: f32) -> Option<ClippedWall> {
    if a.y < 0.0 && b.y < 0.0 {
        return None;
    }

    let bearing_a = bearing(a);
    let bearing_b = bearing(b);
    if (bearing_a > half_fov && bearing_b > half_fov)
        || (bearing_a < -half_fov && bearing_b < -half_fov)
    {
        return None;
    }

    let clip_end = |p: Vec2, bp: f32| -> Option<(Vec2, f32)> {
        let edge = if bp > half_fov {
            half_fov
        } else if bp < -half_fov {
            -half_fov
        } else {
            return Some((p, bp));
        };
        let cross = |e: f32| {
            intersect_segments(a, b, Vec2::ZERO, ray_end(e, ray_length))
                .filter(|&h| h.y > 0.0 && on_segment(h, a, b))
        };
        // Behind the eye the segment can reach the view through either edge.
        let hit = match cross(edge) {
            Some(h) => h,
            None if p.y <= 0.0 => cross(-edge)?,
            None => return None,
        };
        Some((hit, bearing(hit)))
    };

    // A moved endpoint must land in front of the eye, on the wall itself.
    let (a, bearing_a) = clip_end(a, bearing_a)?;
    let (b, bearing_b) = clip_end(b, bearing_b)?;

    if a.y < 0.0 && b.y < 0.0 {
        return None;
    }

    Some(ClippedWall {
        a,
        b,
        bearing_a,
        bearing_b,
    })
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
