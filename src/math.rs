//! Small 2-D helpers shared by the locator and the portal renderer.
//!
//! Camera-space convention used throughout the crate:
//!  * `x` = lateral offset (+ right)
//!  * `y` = depth along the view direction
//!
//! View angles are measured from the forward axis, **positive to the left**.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Determinants smaller than this are treated as parallel segments.
const PARALLEL_EPS: f32 = 1e-6;

/// Intersection point of segments `a0→a1` and `b0→b1`, if they cross.
///
/// Parallel (or degenerate) pairs and crossings outside either segment's
/// `[0, 1]` parameter range yield `None`.
pub fn intersect_segments(a0: Vec2, a1: Vec2, b0: Vec2, b1: Vec2) -> Option<Vec2> {
    let da = a0 - a1;
    let db = b0 - b1;
    let d = da.perp_dot(db);
    if d.abs() < PARALLEL_EPS {
        return None;
    }

    let ab = a0 - b0;
    let t = ab.perp_dot(db) / d;
    let u = ab.perp_dot(da) / d;
    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }

    Some(a0 + (a1 - a0) * t)
}

/// Wrap any angle into `(-π, π]`.
///
/// Values already inside the interval come back bit-for-bit unchanged.
pub fn normalize_angle(a: f32) -> f32 {
    let mut r = a - TAU * ((a - PI) / TAU).ceil();
    // rounding can land one ulp outside the interval
    if r <= -PI {
        r += TAU;
    }
    if r > PI {
        r -= TAU;
    }
    r
}

/// Map a view angle in `[-hfov/2, +hfov/2]` to a screen column.
///
/// Columns sit on a flat projection plane, `tan(angle) / tan(hfov/2)`, so
/// they are evenly spaced on screen rather than in angle space for any
/// field of view. `+hfov/2` lands on column 0, `-hfov/2` on `width - 1`;
/// anything outside the field of view sticks to the nearest edge.
pub fn angle_to_screen_column(angle: f32, hfov: f32, width: usize) -> i32 {
    let half_fov = hfov * 0.5;
    let a = angle.clamp(-half_fov, half_fov);
    let x = (width as f32 * 0.5) * (1.0 - a.tan() / half_fov.tan());
    (x as i32).clamp(0, width as i32 - 1)
}

/// Sign of `(p - a) × (b - a)`.
///
/// For a counter-clockwise polygon the interior gives negative values,
/// `0` means `p` lies on the line through `a` and `b`.
#[inline]
pub fn point_side(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (p - a).perp_dot(b - a)
}

/// Rotate `v` counter-clockwise by `angle` radians.
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}
