//! First-person viewer for a sector/portal level.
//!
//! ```bash
//! cargo run --release -- assets/level.json --scale 2
//! ```
//!
//! Arrows / WASD move and turn, Alt + ←/→ strafes, Esc quits.

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use minifb::{Key, Scale, Window, WindowOptions};
use simplelog::TermLogger;

use raycast_rs::{
    config::Config,
    engine::{Engine, InputCmd},
    mapfile::load_level,
    renderer::flip_vertical,
};

#[derive(Parser, Debug)]
#[command(about = "Software portal renderer")]
struct Opts {
    /// Level file (JSON)
    level: PathBuf,

    /// Config file (JSON); defaults apply to anything missing
    #[arg(long)]
    config: Option<PathBuf>,

    /// Internal frame-buffer width
    #[arg(long)]
    width: Option<usize>,

    /// Internal frame-buffer height
    #[arg(long)]
    height: Option<usize>,

    /// Window scale: 1, 2 or 4
    #[arg(long, default_value_t = 2)]
    scale: u8,
}

fn window_scale(n: u8) -> anyhow::Result<Scale> {
    Ok(match n {
        1 => Scale::X1,
        2 => Scale::X2,
        4 => Scale::X4,
        _ => anyhow::bail!("unsupported --scale {n} (use 1, 2 or 4)"),
    })
}

fn read_input(win: &Window) -> InputCmd {
    let mut cmd = InputCmd::default();

    if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
        cmd.forward += 1.0;
    }
    if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
        cmd.forward -= 1.0;
    }

    let alt = win.is_key_down(Key::LeftAlt) || win.is_key_down(Key::RightAlt);
    if alt {
        /* Alt + ←/→  = strafe */
        if win.is_key_down(Key::Left) {
            cmd.strafe -= 1.0;
        }
        if win.is_key_down(Key::Right) {
            cmd.strafe += 1.0;
        }
    } else {
        /* plain ←/→   = turn   */
        if win.is_key_down(Key::Left) {
            cmd.turn += 1.0;
        }
        if win.is_key_down(Key::Right) {
            cmd.turn -= 1.0;
        }
    }

    if win.is_key_down(Key::A) {
        cmd.strafe -= 1.0;
    }
    if win.is_key_down(Key::D) {
        cmd.strafe += 1.0;
    }
    cmd
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    TermLogger::init(
        log::LevelFilter::Info,
        simplelog::ConfigBuilder::default()
            .set_time_level(log::LevelFilter::Trace)
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut config = match &opts.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(w) = opts.width {
        config.screen.width = w;
    }
    if let Some(h) = opts.height {
        config.screen.height = h;
    }
    config.validate()?;

    let level = load_level(&opts.level, &config.limits)
        .with_context(|| format!("loading {}", opts.level.display()))?;
    let title = format!("raycast_rs: {}", level.name);

    let (w, h) = (config.screen.width, config.screen.height);
    let mut engine = Engine::software(level, config);
    info!(
        "start at {} in sector {}",
        engine.camera.pos, engine.camera.sector
    );

    let mut win = Window::new(
        &title,
        w,
        h,
        WindowOptions {
            scale: window_scale(opts.scale)?,
            ..WindowOptions::default()
        },
    )?;
    win.set_target_fps(60);

    let mut present = vec![0u32; w * h];

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();
    let mut last_tick = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt = now.duration_since(last_tick).as_secs_f32();
        last_tick = now;

        engine.tick(&read_input(&win), dt);

        let t0 = Instant::now();
        let frame = engine.render_frame(|fb, fw, _| {
            flip_vertical(fb, &mut present, fw);
            acc_time += t0.elapsed();
            acc_frames += 1;
        });
        match frame {
            Ok(()) => win.update_with_buffer(&present, w, h)?,
            Err(e) => {
                warn!("frame skipped: {e}");
                win.update();
            }
        }

        if last_print.elapsed() >= Duration::from_secs(3) && acc_frames > 0 {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            info!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
