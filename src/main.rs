//! Top-down 2-D level viewer.
//!
//! ```bash
//! cargo run --release --bin raycast_rs -- assets/level.json
//! ```
//!
//! Solid walls are white, portals cyan, the start pose is a red tick.

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;
use log::info;
use minifb::{Key, Window, WindowOptions};
use simplelog::TermLogger;

use raycast_rs::{
    mapfile::{LevelLimits, load_level},
    world::Level,
};

const WIDTH: usize = 1024;
const HEIGHT: usize = 768;

const SOLID: u32 = 0x00_FFFFFF;
const PORTAL: u32 = 0x00_00C0C0;
const START: u32 = 0x00_FF4040;

#[derive(Parser, Debug)]
#[command(about = "2-D overview of a sector/portal level")]
struct Opts {
    /// Level file (JSON)
    level: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    TermLogger::init(
        log::LevelFilter::Info,
        simplelog::ConfigBuilder::default().build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let level = load_level(&opts.level, &LevelLimits::default())?;
    info!("{}: {} sectors", level.name, level.sector_count());

    let buffer = rasterise(&level);

    let mut window = Window::new(&level.name, WIDTH, HEIGHT, WindowOptions::default())?;
    window.set_target_fps(30);
    while window.is_open() && !window.is_key_down(Key::Escape) {
        window.update_with_buffer(&buffer, WIDTH, HEIGHT)?;
    }
    Ok(())
}

/// Draw every wall of `level`, scaled to fit the window.
fn rasterise(level: &Level) -> Vec<u32> {
    let mut buffer = vec![0u32; WIDTH * HEIGHT];

    // ─────────── map‑space → screen‑space transform ────────────
    let (min, max) = level
        .sectors()
        .flat_map(|s| s.walls.iter().flat_map(|w| [w.a, w.b]))
        .fold((Vec2::MAX, Vec2::MIN), |(lo, hi), v| {
            (lo.min(v.as_vec2()), hi.max(v.as_vec2()))
        });
    if min.x > max.x {
        return buffer;
    }

    let size = (max - min).max(Vec2::ONE);
    let scale = (WIDTH as f32 / size.x).min(HEIGHT as f32 / size.y) * 0.9; // 10 % margin
    let offset = (Vec2::new(WIDTH as f32, HEIGHT as f32) - size * scale) / 2.0;

    let to_screen = |p: Vec2| -> (i32, i32) {
        let s = (p - min) * scale + offset;
        (s.x as i32, HEIGHT as i32 - s.y as i32) // north is up
    };

    // portals after solids so shared edges show as openings
    for portals in [false, true] {
        for sector in level.sectors() {
            for wall in sector.walls.iter().filter(|w| w.is_portal() == portals) {
                let (a, b) = wall.endpoints();
                let (x0, y0) = to_screen(a);
                let (x1, y1) = to_screen(b);
                let colour = if portals { PORTAL } else { SOLID };
                draw_line(&mut buffer, WIDTH, HEIGHT, x0, y0, x1, y1, colour);
            }
        }
    }

    if let Some((pos, angle)) = level.start {
        let (x0, y0) = to_screen(pos);
        let (x1, y1) = to_screen(pos + Vec2::from_angle(angle) * (12.0 / scale));
        draw_line(&mut buffer, WIDTH, HEIGHT, x0, y0, x1, y1, START);
    }
    buffer
}

/// Integer Bresenham line‑drawing algorithm.
#[allow(clippy::too_many_arguments)]
fn draw_line(
    buf: &mut [u32],
    w: usize,
    h: usize,
    mut x0: i32,
    mut y0: i32,
    x1: i32,
    y1: i32,
    colour: u32,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if (0..w as i32).contains(&x0) && (0..h as i32).contains(&y0) {
            buf[y0 as usize * w + x0 as usize] = colour;
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_covers_both_endpoints() {
        let (w, h) = (8, 8);
        let mut buf = vec![0u32; w * h];
        draw_line(&mut buf, w, h, 1, 1, 6, 3, 7);
        assert_eq!(buf[w + 1], 7);
        assert_eq!(buf[3 * w + 6], 7);
        assert_eq!(buf.iter().filter(|&&c| c == 7).count(), 6);
    }

    #[test]
    fn off_screen_points_are_skipped() {
        let (w, h) = (4, 4);
        let mut buf = vec![0u32; w * h];
        draw_line(&mut buf, w, h, -3, 0, 6, 0, 1);
        assert_eq!(&buf[..4], &[1, 1, 1, 1]);
    }
}
