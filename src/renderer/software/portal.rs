//! Sector graph walk and per-column wall rasterisation.
//!
//! Each sector is drawn at most once per frame, clipped to the column
//! window of the portal it was reached through. Portal walls shrink the
//! per-column clip bands so farther sectors stay inside the opening.

use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

use super::{
    PortalSpan, Software,
    shade::{EDGE_SHADE, shade, wall_shade},
};
use crate::{
    config::ViewConfig,
    math::{angle_to_screen_column, intersect_segments, normalize_angle, rotate},
    renderer::{RenderError, Rgba},
    world::{Camera, Level, Sector, Wall},
};

/// Depths closer to zero than this project far off-screen.
const DEPTH_EPS: f32 = 1e-6;
const HUGE_SCALE: f32 = 1e10;

/*──────────────────────── per-frame constants ────────────────────────*/

/// Left and right frustum edges in camera space, near → far.
struct Frustum {
    near_l: Vec2,
    far_l: Vec2,
    near_r: Vec2,
    far_r: Vec2,
}

/// Projection state shared by every wall of the frame.
struct Viewer {
    hfov: f32,
    half_fov: f32,
    near: f32,
    vscale: f32, // vfov * screen height
    half_h: f32,
    view_z: f32,
    frustum: Frustum,
}

impl Viewer {
    fn new(view: &ViewConfig, height: usize, floor_h: f32) -> Self {
        let hfov = view.hfov();
        let half_fov = hfov * 0.5;
        let dl = rotate(Vec2::Y, half_fov);
        let dr = rotate(Vec2::Y, -half_fov);
        Self {
            hfov,
            half_fov,
            near: view.near,
            vscale: view.vfov * height as f32,
            half_h: height as f32 * 0.5,
            view_z: floor_h + view.eye_height,
            frustum: Frustum {
                near_l: dl * view.near,
                far_l: dl * view.far,
                near_r: dr * view.near,
                far_r: dr * view.far,
            },
        }
    }

    /// Pixels per world unit of height at camera-space `depth`.
    #[inline]
    fn scale(&self, depth: f32) -> f32 {
        if depth.abs() < DEPTH_EPS {
            HUGE_SCALE
        } else {
            self.vscale / depth
        }
    }

    #[inline]
    fn screen_y(&self, z: f32, scale: f32) -> f32 {
        self.half_h + (z - self.view_z) * scale
    }
}

/// View angle of a camera-space point, positive to the left.
#[inline]
fn view_angle(p: Vec2) -> f32 {
    normalize_angle(p.y.atan2(p.x) - FRAC_PI_2)
}

/*──────────────────────── per-wall data ──────────────────────────────*/

/// Everything the column loop needs for one visible wall.
struct Edge {
    /* unclamped endpoint columns: the interpolation domain */
    tx_l: i32,
    tx_r: i32,
    /* drawn columns, inside the portal window */
    x_l: i32,
    x_r: i32,
    /* clipped endpoints in camera space */
    left: Vec2,
    right: Vec2,
    shade: f32,
}

impl Edge {
    /// Progress of column `x` across the unclamped span.
    #[inline]
    fn progress(&self, x: i32) -> f32 {
        let span = self.tx_r - self.tx_l;
        if span == 0 {
            0.0
        } else {
            (x - self.tx_l) as f32 / span as f32
        }
    }
}

/// Projected screen heights at the left / right endpoint.
#[derive(Clone, Copy)]
struct Heights {
    floor: [f32; 2],
    ceil: [f32; 2],
}

impl Heights {
    fn new(sector: &Sector, edge: &Edge, v: &Viewer) -> Self {
        let (scale_l, scale_r) = (v.scale(edge.left.y), v.scale(edge.right.y));
        Self {
            floor: [
                v.screen_y(sector.floor_h, scale_l),
                v.screen_y(sector.floor_h, scale_r),
            ],
            ceil: [
                v.screen_y(sector.ceil_h, scale_l),
                v.screen_y(sector.ceil_h, scale_r),
            ],
        }
    }
}

/// Interpolate `pair` at `t` and clamp the row into `[lo, hi]`.
#[inline]
fn row_at(pair: [f32; 2], t: f32, lo: i32, hi: i32) -> i32 {
    let y = pair[0] + (pair[1] - pair[0]) * t;
    if y.is_nan() {
        return lo;
    }
    (y.floor() as i32).clamp(lo, hi)
}

/*──────────────────────── traversal ──────────────────────────────────*/

impl Software {
    pub(super) fn walk_portals(&mut self, level: &Level, camera: &Camera) -> Result<(), RenderError> {
        let start = level
            .sector(camera.sector)
            .ok_or(RenderError::NoSector(camera.sector))?;
        let viewer = Viewer::new(&self.view, self.height, start.floor_h);

        self.drawn.clear();
        self.drawn.resize(level.id_bound(), false);
        self.worklist.clear();
        self.push_span(PortalSpan {
            sector: start.id,
            x0: 0,
            x1: self.width as i32 - 1,
        })?;

        // LIFO: the portal found last is entered first
        while let Some(entry) = self.worklist.pop() {
            let Some(drawn) = self.drawn.get_mut(entry.sector as usize) else {
                continue;
            };
            if *drawn {
                continue;
            }
            *drawn = true;

            let Some(sector) = level.sector(entry.sector) else {
                continue;
            };
            for wall in &sector.walls {
                self.draw_wall(level, sector, wall, camera, &viewer, entry)?;
            }
        }
        Ok(())
    }

    fn push_span(&mut self, span: PortalSpan) -> Result<(), RenderError> {
        if self.worklist.len() >= self.worklist_capacity {
            return Err(RenderError::WorklistOverflow {
                capacity: self.worklist_capacity,
            });
        }
        self.worklist.push(span);
        Ok(())
    }

    fn draw_wall(
        &mut self,
        level: &Level,
        sector: &Sector,
        wall: &Wall,
        camera: &Camera,
        viewer: &Viewer,
        window: PortalSpan,
    ) -> Result<(), RenderError> {
        let Some(edge) = self.project_wall(wall, camera, viewer, window) else {
            return Ok(());
        };

        let own = Heights::new(sector, &edge, viewer);
        let neighbour = wall.portal().and_then(|id| level.sector(id));
        let far = neighbour.map(|n| Heights::new(n, &edge, viewer));

        for x in edge.x_l..=edge.x_r {
            // only solid walls get highlighted corners
            let s = if far.is_none() && (x == edge.x_l || x == edge.x_r) {
                EDGE_SHADE
            } else {
                edge.shade
            };
            self.draw_column(x, edge.progress(x), own, far, s);
        }

        if let Some(next) = neighbour {
            self.push_span(PortalSpan {
                sector: next.id,
                x0: edge.x_l,
                x1: edge.x_r,
            })?;
        }
        Ok(())
    }

    /// Camera-space transform, frustum clip and column mapping of one wall.
    fn project_wall(
        &self,
        wall: &Wall,
        camera: &Camera,
        v: &Viewer,
        window: PortalSpan,
    ) -> Option<Edge> {
        let (a, b) = wall.endpoints();
        // seen from inside a counter-clockwise sector a wall runs right → left
        let mut pl = camera.to_cam(b);
        let mut pr = camera.to_cam(a);
        if pl.y <= 0.0 && pr.y <= 0.0 {
            return None;
        }

        let mut al = view_angle(pl);
        let mut ar = view_angle(pr);

        // clip unless provably inside the frustum
        let inside = pl.y >= v.near
            && pr.y >= v.near
            && al.abs() <= v.half_fov
            && ar.abs() <= v.half_fov;
        if !inside {
            let f = &v.frustum;
            let il = intersect_segments(pr, pl, f.near_l, f.far_l);
            let ir = intersect_segments(pr, pl, f.near_r, f.far_r);
            if let Some(p) = il {
                pl = p;
                al = view_angle(p);
            }
            if let Some(p) = ir {
                pr = p;
                ar = view_angle(p);
            }
        }

        // back-facing
        if al < ar {
            return None;
        }
        if (al < -v.half_fov && ar < -v.half_fov) || (al > v.half_fov && ar > v.half_fov) {
            return None;
        }

        let tx_l = angle_to_screen_column(al, v.hfov, self.width);
        let tx_r = angle_to_screen_column(ar, v.hfov, self.width);
        if tx_l > window.x1 || tx_r < window.x0 {
            return None;
        }

        Some(Edge {
            tx_l,
            tx_r,
            x_l: tx_l.clamp(window.x0, window.x1),
            x_r: tx_r.clamp(window.x0, window.x1),
            left: pl,
            right: pr,
            shade: wall_shade(a, b),
        })
    }

    /*──────────────────────── column rendering ───────────────────────*/

    /// Draw one column of a wall and, for portals, narrow its clip band.
    fn draw_column(&mut self, x: i32, t: f32, own: Heights, far: Option<Heights>, s: f32) {
        let col = x as usize;
        if self.clip_bands.closed[col] {
            return;
        }
        let lo = self.clip_bands.lo[col];
        let hi = self.clip_bands.hi[col];
        let p = self.palette;

        let yf = row_at(own.floor, t, lo, hi);
        let yc = row_at(own.ceil, t, lo, hi);

        self.vline(col, lo, yf - 1, p.floor);
        self.vline(col, yc + 1, hi, p.ceiling);

        let Some(far) = far else {
            self.vline(col, yf, yc, shade(p.wall, s));
            return;
        };

        // the opening through the portal is [nyf, nyc], empty when nyf > nyc
        let nyf = row_at(far.floor, t, lo - 1, hi + 1).max(yf).min(yc + 1);
        let nyc = row_at(far.ceil, t, lo - 1, hi + 1).min(yc).max(yf - 1);

        // step faces between the two ceilings / the two floors
        self.vline(col, nyc + 1, yc, shade(p.upper, s));
        self.vline(col, yf, nyf - 1, shade(p.lower, s));

        if nyf > nyc {
            // nothing behind this portal shows in this column
            let row = nyc.max(lo);
            self.clip_bands.lo[col] = row;
            self.clip_bands.hi[col] = row;
            self.clip_bands.closed[col] = true;
            return;
        }
        debug_assert!(nyf >= lo && nyc <= hi);
        self.clip_bands.lo[col] = nyf;
        self.clip_bands.hi[col] = nyc;
    }

    /// Fill rows `y0..=y1` of column `col`; empty when `y0 > y1`.
    #[inline]
    fn vline(&mut self, col: usize, y0: i32, y1: i32, c: Rgba) {
        let y0 = y0.max(0);
        let y1 = y1.min(self.height as i32 - 1);
        if y0 > y1 {
            return;
        }
        let w = self.width;
        for y in y0 as usize..=y1 as usize {
            self.scratch[y * w + col] = c;
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mapfile::{LevelLimits, parse_level},
        renderer::{Palette, Renderer},
        world::{Camera, NO_SECTOR},
    };
    use glam::{ivec2, vec2};
    use std::f32::consts::FRAC_PI_4;

    const W: usize = 160;
    const H: usize = 120;

    /// Room 1 opens east into room 2, which has a raised floor and a
    /// lowered ceiling.
    const TWO_ROOMS: &str = r#"{
        "sectors": [
            [1, 0.0, 4.0, [[0,0,10,0,0], [10,0,10,10,2], [10,10,0,10,0], [0,10,0,0,0]]],
            [2, 1.0, 3.0, [[10,0,20,0,0], [20,0,20,10,0], [20,10,10,10,0], [10,10,10,0,1]]]
        ]
    }"#;

    /// Room 1 opens east into 2 and north into 3.
    const CORNER: &str = r#"{
        "sectors": [
            [1, 0.0, 4.0, [[0,0,10,0,0], [10,0,10,10,2], [10,10,0,10,3], [0,10,0,0,0]]],
            [2, 0.0, 4.0, [[10,0,20,0,0], [20,0,20,10,0], [20,10,10,10,0], [10,10,10,0,1]]],
            [3, 0.0, 4.0, [[0,10,10,10,1], [10,10,10,20,0], [10,20,0,20,0], [0,20,0,10,0]]]
        ]
    }"#;

    fn level(text: &str) -> Level {
        parse_level("test", text, &LevelLimits::default()).unwrap()
    }

    fn render(sw: &mut Software, lvl: &Level, cam: &Camera) -> Result<Vec<Rgba>, RenderError> {
        sw.begin_frame(W, H);
        sw.draw_level(lvl, cam)?;
        let mut out = Vec::new();
        sw.end_frame(|fb, _, _| out.extend_from_slice(fb));
        Ok(out)
    }

    fn column(fb: &[Rgba], x: usize) -> Vec<Rgba> {
        (0..H).map(|y| fb[y * W + x]).collect()
    }

    fn rgb(c: Rgba) -> (u32, u32, u32) {
        ((c >> 16) & 0xFF, (c >> 8) & 0xFF, c & 0xFF)
    }

    fn is_grey(c: Rgba) -> bool {
        let (r, g, b) = rgb(c);
        r == g && g == b && r > 0x40
    }

    fn is_green(c: Rgba) -> bool {
        let (r, g, b) = rgb(c);
        r == 0 && b == 0 && g > 0
    }

    fn is_red(c: Rgba) -> bool {
        let (r, g, b) = rgb(c);
        g == 0 && b == 0 && r > 0
    }

    fn facing_portal() -> Camera {
        Camera::new(vec2(2.0, 5.0), 0.0, 1)
    }

    #[test]
    fn portal_span_shows_the_neighbour_behind_its_steps() {
        let lvl = level(TWO_ROOMS);
        let mut sw = Software::default();
        let fb = render(&mut sw, &lvl, &facing_portal()).unwrap();
        let p = Palette::default();

        let mid = column(&fb, W / 2);
        assert!(mid.iter().any(|&c| is_green(c)), "upper step missing");
        assert!(mid.iter().any(|&c| is_red(c)), "lower step missing");
        assert!(mid.iter().any(|&c| is_grey(c)), "far wall missing");
        assert!(mid.contains(&p.floor));
        assert!(mid.contains(&p.ceiling));
        assert!(!mid.contains(&p.clear));

        // bottom to top: floor, lower step, ..., upper step, ceiling
        let first_red = mid.iter().position(|&c| is_red(c)).unwrap();
        let first_green = mid.iter().position(|&c| is_green(c)).unwrap();
        assert!(first_red < first_green);
        assert_eq!(mid[0], p.floor);
        assert_eq!(mid[H - 1], p.ceiling);
    }

    #[test]
    fn columns_outside_the_portal_show_a_solid_wall() {
        let lvl = level(TWO_ROOMS);
        let mut sw = Software::default();
        let fb = render(&mut sw, &lvl, &facing_portal()).unwrap();

        for x in [0, 5, W - 6, W - 1] {
            let col = column(&fb, x);
            assert!(col.iter().any(|&c| is_grey(c)), "column {x} has no wall");
            assert!(!col.iter().any(|&c| is_green(c) || is_red(c)));
            assert!(!col.contains(&sw.palette().clear));
        }
    }

    #[test]
    fn same_input_renders_identical_frames() {
        let lvl = level(TWO_ROOMS);
        let cam = Camera::new(vec2(3.3, 6.1), 0.4, 1);
        let mut sw = Software::default();
        let a = render(&mut sw, &lvl, &cam).unwrap();
        let b = render(&mut sw, &lvl, &cam).unwrap();
        let c = render(&mut Software::default(), &lvl, &cam).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn clip_bands_only_shrink() {
        let lvl = level(TWO_ROOMS);
        let mut sw = Software::default();
        for step in 0..12 {
            let cam = Camera::new(vec2(1.5 + step as f32 * 0.6, 4.0), -0.6 + step as f32 * 0.1, 1);
            render(&mut sw, &lvl, &cam).unwrap();
            let bands = sw.clip_bands();
            for x in 0..W {
                assert!(bands.lo[x] >= 0);
                assert!(bands.hi[x] <= H as i32 - 1);
                assert!(bands.lo[x] <= bands.hi[x], "column {x} inverted");
            }
        }

        render(&mut sw, &lvl, &facing_portal()).unwrap();
        let bands = sw.clip_bands();
        // narrowed behind the portal, untouched beside it
        assert!(bands.lo[W / 2] > 0 && bands.hi[W / 2] < H as i32 - 1);
        assert_eq!((bands.lo[0], bands.hi[0]), (0, H as i32 - 1));
    }

    #[test]
    fn worklist_overflow_is_reported() {
        let lvl = level(CORNER);
        let cam = Camera::new(vec2(2.0, 2.0), FRAC_PI_4, 1);

        let mut tiny = Software::new(ViewConfig::default(), Palette::default(), 1);
        assert_eq!(
            render(&mut tiny, &lvl, &cam).unwrap_err(),
            RenderError::WorklistOverflow { capacity: 1 }
        );

        let mut roomy = Software::new(ViewConfig::default(), Palette::default(), 2);
        assert!(render(&mut roomy, &lvl, &cam).is_ok());
    }

    #[test]
    fn unknown_camera_sector_is_an_error() {
        let lvl = level(TWO_ROOMS);
        let cam = Camera::new(vec2(2.0, 5.0), 0.0, 0);
        let mut sw = Software::default();
        assert_eq!(
            render(&mut sw, &lvl, &cam).unwrap_err(),
            RenderError::NoSector(0)
        );
    }

    #[test]
    fn wall_behind_the_camera_is_skipped() {
        let lvl = level(TWO_ROOMS);
        let cam = facing_portal();
        let v = Viewer::new(&ViewConfig::default(), H, 0.0);
        let mut sw = Software::default();
        sw.begin_frame(W, H);
        let window = PortalSpan {
            sector: 1,
            x0: 0,
            x1: W as i32 - 1,
        };
        let west = &lvl.sector(1).unwrap().walls[3];
        assert!(sw.project_wall(west, &cam, &v, window).is_none());
        let portal = &lvl.sector(1).unwrap().walls[1];
        let edge = sw.project_wall(portal, &cam, &v, window).unwrap();
        assert!(edge.x_l < (W / 2) as i32 && edge.x_r > (W / 2) as i32);
        // the far side of the same portal faces away
        let back = &lvl.sector(2).unwrap().walls[3];
        assert!(sw.project_wall(back, &cam, &v, window).is_none());
    }

    /*──────── corner highlight ────────*/

    const SQUARE: &str = r#"{
        "sectors": [
            [1, 0.0, 4.0, [[0,0,10,0,0], [10,0,10,10,0], [10,10,0,10,0], [0,10,0,0,0]]]
        ]
    }"#;

    fn red(c: Rgba) -> u32 {
        rgb(c).0
    }

    #[test]
    fn solid_wall_corners_are_brighter_than_their_faces() {
        let lvl = level(SQUARE);
        let cam = Camera::new(vec2(5.0, 5.0), 0.3, 1);
        let mut sw = Software::default();
        let fb = render(&mut sw, &lvl, &cam).unwrap();
        let wall = sw.palette().wall;

        // the horizon row crosses walls only
        let row: Vec<Rgba> = (0..W).map(|x| fb[(H / 2) * W + x]).collect();
        assert!(row.iter().all(|&c| is_grey(c)));

        let bright = red(shade(wall, EDGE_SHADE));
        assert_eq!(red(row[0]), bright);
        assert_eq!(red(row[W - 1]), bright);
        assert!(red(row[W / 2]) < bright);
        // two visible walls: at most four corner columns
        assert!(row.iter().filter(|&&c| red(c) == bright).count() <= 4);
    }

    #[test]
    fn portal_steps_are_not_highlighted() {
        let lvl = level(TWO_ROOMS);
        let mut sw = Software::default();
        let fb = render(&mut sw, &lvl, &facing_portal()).unwrap();
        let p = *sw.palette();
        let full_upper = shade(p.upper, EDGE_SHADE);
        let full_lower = shade(p.lower, EDGE_SHADE);
        assert!(fb.iter().any(|&c| is_green(c)));
        assert!(!fb.contains(&full_upper));
        assert!(!fb.contains(&full_lower));
    }

    /*──────── closed columns ────────*/

    /// Room 2 sits entirely above room 1's ceiling.
    const HIGH_NEIGHBOUR: &str = r#"{
        "sectors": [
            [1, 0.0, 4.0, [[0,0,10,0,0], [10,0,10,10,2], [10,10,0,10,0], [0,10,0,0,0]]],
            [2, 5.0, 6.0, [[10,0,20,0,0], [20,0,20,10,0], [20,10,10,10,0], [10,10,10,0,1]]]
        ]
    }"#;

    #[test]
    fn portal_with_nothing_visible_closes_its_columns() {
        let lvl = level(HIGH_NEIGHBOUR);
        let mut sw = Software::default();
        let fb = render(&mut sw, &lvl, &facing_portal()).unwrap();
        let p = *sw.palette();

        let mid = column(&fb, W / 2);
        assert!(!mid.iter().any(|&c| is_grey(c)), "far room leaked through");
        assert!(mid.iter().any(|&c| is_red(c)));
        assert!(!mid.contains(&p.clear));

        let bands = sw.clip_bands();
        assert!(bands.is_closed(W / 2));
        assert!(bands.lo[W / 2] <= bands.hi[W / 2]);
        assert!(!bands.is_closed(0));
    }

    #[test]
    fn open_portal_keeps_its_columns_open() {
        let lvl = level(TWO_ROOMS);
        let mut sw = Software::default();
        render(&mut sw, &lvl, &facing_portal()).unwrap();
        assert!(sw.clip_bands().closed.iter().all(|&c| !c));
    }

    #[test]
    fn begin_frame_follows_the_requested_size() {
        let mut sw = Software::default();
        sw.begin_frame(W, H);
        assert_eq!(sw.size(), (W, H));
        sw.begin_frame(80, 40);
        assert_eq!(sw.size(), (80, 40));
        assert_eq!(sw.pixels().len(), 80 * 40);
        assert_eq!(sw.clip_bands().hi, vec![39; 80]);
        assert!(sw.pixels().iter().all(|&c| c == sw.palette().clear));
    }

    /*──────── frustum clipping ────────*/

    fn project(wall: Wall, cam: &Camera) -> Option<Edge> {
        let v = Viewer::new(&ViewConfig::default(), H, 0.0);
        let mut sw = Software::default();
        sw.begin_frame(W, H);
        let window = PortalSpan {
            sector: 1,
            x0: 0,
            x1: W as i32 - 1,
        };
        sw.project_wall(&wall, cam, &v, window)
    }

    fn solid(a: (i32, i32), b: (i32, i32)) -> Wall {
        Wall {
            a: ivec2(a.0, a.1),
            b: ivec2(b.0, b.1),
            portal: NO_SECTOR,
        }
    }

    fn near(x: f32, y: f32) -> bool {
        (x - y).abs() < 1e-4
    }

    #[test]
    fn wall_crossing_the_left_edge_is_cut_there() {
        let cam = facing_portal();
        let edge = project(solid((10, 5), (10, 20)), &cam).unwrap();
        assert!(near(view_angle(edge.left), FRAC_PI_4));
        assert!((edge.left - vec2(-8.0, 8.0)).length() < 1e-3);
        assert_eq!(edge.tx_l, 0);
        // the visible endpoint is untouched
        assert_eq!(edge.right, cam.to_cam(vec2(10.0, 5.0)));
        assert!((edge.tx_r - W as i32 / 2).abs() <= 1);
    }

    #[test]
    fn wall_crossing_the_right_edge_is_cut_there() {
        let cam = facing_portal();
        let edge = project(solid((10, -10), (10, 5)), &cam).unwrap();
        assert!(near(view_angle(edge.right), -FRAC_PI_4));
        assert!((edge.right - vec2(8.0, 8.0)).length() < 1e-3);
        assert_eq!(edge.tx_r, W as i32 - 1);
        assert_eq!(edge.left, cam.to_cam(vec2(10.0, 5.0)));
    }

    #[test]
    fn wall_reaching_behind_the_camera_is_clipped_not_dropped() {
        let cam = facing_portal();
        let wall = solid((10, 9), (-2, 9));
        assert!(cam.to_cam(vec2(-2.0, 9.0)).y < 0.0);

        let edge = project(wall, &cam).unwrap();
        assert!(edge.left.y > 0.0);
        assert!(near(view_angle(edge.left), FRAC_PI_4));
        assert!((edge.left - vec2(-4.0, 4.0)).length() < 1e-3);
        assert_eq!(edge.tx_l, 0);
        // atan(4 / 8) to the left: a quarter of the way across
        assert!((edge.tx_r - W as i32 / 4).abs() <= 1);
    }

    #[test]
    fn endpoint_inside_the_near_distance_still_projects() {
        let view = ViewConfig::default();
        let cam = Camera::new(vec2(9.99995, 5.0), 0.0, 1);
        let edge = project(solid((10, 5), (20, 12)), &cam).unwrap();

        assert!(edge.right.y > 0.0 && edge.right.y < view.near);
        assert_eq!(edge.right, cam.to_cam(vec2(10.0, 5.0)));
        assert_eq!(edge.left, cam.to_cam(vec2(20.0, 12.0)));
        assert!((edge.tx_r - W as i32 / 2).abs() <= 1);
        assert!(edge.tx_l < edge.tx_r);

        let v = Viewer::new(&view, H, 0.0);
        let near_scale = v.scale(edge.right.y);
        assert!(near_scale.is_finite() && near_scale > v.scale(edge.left.y));
    }

    #[test]
    fn wall_outside_one_side_of_the_view_is_dropped() {
        let cam = facing_portal();
        // both ends far to the left of the 45 degree edge
        assert!(project(solid((4, 20), (3, 30)), &cam).is_none());
    }
}
