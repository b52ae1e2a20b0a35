use glam::{Vec2, vec2};

use crate::math::normalize_angle;
use crate::world::geometry::{NO_SECTOR, SectorId};

/// Player view-point in world space.
///
/// * Only **yaw** (heading) is simulated, there is no pitch.
/// * `sin`/`cos` of the heading are cached; every angle change goes through
///   [`Camera::set_angle`] so the cache can never go stale.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub pos: Vec2,
    /// last sector known to contain `pos`
    pub sector: SectorId,
    angle: f32, // radians (0 = east, counter-clockwise), kept in (-π, π]
    sin: f32,
    cos: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 0.0, NO_SECTOR)
    }
}

impl Camera {
    pub fn new(pos: Vec2, angle: f32, sector: SectorId) -> Self {
        let mut cam = Self {
            pos,
            sector,
            angle: 0.0,
            sin: 0.0,
            cos: 1.0,
        };
        cam.set_angle(angle);
        cam
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Cached `(sin, cos)` of the heading.
    #[inline]
    pub fn sin_cos(&self) -> (f32, f32) {
        (self.sin, self.cos)
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = normalize_angle(angle);
        (self.sin, self.cos) = self.angle.sin_cos();
    }

    /// Rotate around Z-axis (positive = turn left).
    pub fn turn(&mut self, delta: f32) {
        self.set_angle(self.angle + delta);
    }

    /// Transform a world point into camera-local coords:
    ///  .x = lateral offset (+ right)
    ///  .y = depth along forward axis
    #[inline]
    pub fn to_cam(&self, p: Vec2) -> Vec2 {
        let d = p - self.pos;
        vec2(
            d.x * self.sin - d.y * self.cos,
            d.x * self.cos + d.y * self.sin,
        )
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the camera looks.
    #[inline(always)]
    pub fn forward(&self) -> Vec2 {
        vec2(self.cos, self.sin)
    }

    /// Unit vector pointing to the camera's right.
    #[inline(always)]
    pub fn right(&self) -> Vec2 {
        vec2(self.sin, -self.cos)
    }

    /// Move by `forward` units and `side` (strafe, + right).
    pub fn step(&mut self, forward: f32, side: f32) {
        self.pos += self.forward() * forward + self.right() * side;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn forward_and_right_are_orthonormal() {
        let cam = Camera::new(Vec2::ZERO, 0.3, 1);
        let f = cam.forward();
        let r = cam.right();
        assert!((f.length() - 1.0).abs() < 1e-5);
        assert!((r.length() - 1.0).abs() < 1e-5);
        assert!(f.dot(r).abs() < 1e-5);
    }

    #[test]
    fn to_cam_axes_align() {
        let cam = Camera::new(Vec2::ZERO, 0.0, 1);
        // straight ahead at (10, 0) → (lateral=0, forward=10)
        assert!((cam.to_cam(vec2(10.0, 0.0)) - vec2(0.0, 10.0)).length() < 1e-5);
        // (0, -5) is on the right when facing east
        assert!((cam.to_cam(vec2(0.0, -5.0)) - vec2(5.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn to_cam_rotated_yaw() {
        let cam = Camera::new(vec2(1.0, 1.0), FRAC_PI_2, 1);
        assert!((cam.to_cam(vec2(1.0, 11.0)) - vec2(0.0, 10.0)).length() < 1e-5);
    }

    #[test]
    fn turning_refreshes_cached_trig() {
        let mut cam = Camera::new(Vec2::ZERO, 0.0, 1);
        cam.turn(FRAC_PI_2);
        let (s, c) = cam.sin_cos();
        assert!((s - 1.0).abs() < 1e-6);
        assert!(c.abs() < 1e-6);

        cam.turn(PI * 3.0);
        assert!(cam.angle() > -PI && cam.angle() <= PI);
        let (s, c) = cam.sin_cos();
        assert!((s - cam.angle().sin()).abs() < 1e-6);
        assert!((c - cam.angle().cos()).abs() < 1e-6);
    }

    #[test]
    fn step_moves_along_heading() {
        let mut cam = Camera::new(Vec2::ZERO, FRAC_PI_2, 1);
        cam.step(2.0, 0.0);
        assert!((cam.pos - vec2(0.0, 2.0)).length() < 1e-5);
        cam.step(0.0, 1.0);
        assert!((cam.pos - vec2(1.0, 2.0)).length() < 1e-5);
    }
}
