//! Flat colours and multiplicative shading.

use glam::Vec2;
use serde::Deserialize;

use crate::renderer::Rgba;

/// Shade of the first and last column of a solid wall span. Brighter than
/// any [`wall_shade`] so wall corners stand out.
pub const EDGE_SHADE: f32 = 1.0;

/// Brightest orientation shade, for walls running due west.
const WALL_SHADE_MAX: f32 = 239.0;

/// Surface colours in 0xAARRGGBB.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Palette {
    pub clear: Rgba,
    pub floor: Rgba,
    pub ceiling: Rgba,
    pub wall: Rgba,
    /// step face between this ceiling and a lower neighbouring ceiling
    pub upper: Rgba,
    /// step face between this floor and a higher neighbouring floor
    pub lower: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            clear: 0xFF_000000,
            floor: 0xFF_0000FF,
            ceiling: 0xFF_FFFF00,
            wall: 0xFF_D0D0D0,
            upper: 0xFF_00FF00,
            lower: 0xFF_FF0000,
        }
    }
}

/// Scale the colour channels of `c` by `s` (clamped to `[0, 1]`); alpha is
/// left untouched.
#[inline]
pub fn shade(c: Rgba, s: f32) -> Rgba {
    let s = s.clamp(0.0, 1.0);
    let ch = |shift: u32| -> u32 {
        let v = ((c >> shift) & 0xFF) as f32 * s;
        (v as u32).min(0xFF) << shift
    };
    (c & 0xFF_000000) | ch(16) | ch(8) | ch(0)
}

/// Orientation-dependent shade for a wall running `a → b`.
///
/// Walls facing different directions get slightly different brightness,
/// between `207/255` and `239/255`.
pub fn wall_shade(a: Vec2, b: Vec2) -> f32 {
    let d = b - a;
    let darken = 16.0 * (d.x.atan2(d.y).sin() + 1.0);
    (WALL_SHADE_MAX - darken) / 255.0
}
