use log::{debug, warn};

use crate::{
    config::{Config, ScreenConfig},
    engine::InputCmd,
    renderer::{RenderError, Renderer, Rgba, Software},
    world::{Camera, Level, NO_SECTOR},
};

/// Longest step a single tick may simulate, in seconds.
const MAX_DT: f32 = 0.1;

pub struct Engine<R: Renderer> {
    pub renderer: R,
    pub level: Level,
    pub camera: Camera,
    pub config: Config,
    /* last camera state known to be inside the level */
    accepted: Camera,
}

impl Engine<Software> {
    /// Engine with the software backend configured from `config`.
    pub fn software(level: Level, config: Config) -> Self {
        let renderer = Software::new(config.view, config.palette, config.capacity.render_worklist);
        Self::new(renderer, level, config)
    }
}

impl<R: Renderer> Engine<R> {
    pub fn new(renderer: R, level: Level, config: Config) -> Self {
        let camera = start_camera(&level);
        Self {
            renderer,
            level,
            camera,
            config,
            accepted: camera,
        }
    }

    /// Apply one tick of input and re-attribute the camera to a sector.
    ///
    /// A move that leaves every reachable sector is undone: position and
    /// sector go back to the last accepted state, the heading is kept.
    pub fn tick(&mut self, cmd: &InputCmd, dt: f32) {
        let dt = dt.clamp(0.0, MAX_DT);
        let cmd = cmd.clamped();
        if cmd.is_idle() {
            return;
        }
        let m = self.config.movement;

        self.camera.turn(cmd.turn * m.turn_speed * dt);
        self.camera
            .step(cmd.forward * m.move_speed * dt, cmd.strafe * m.move_speed * dt);
        self.relocate();
    }

    fn relocate(&mut self) {
        let from = self.accepted.sector;
        let capacity = self.config.capacity.locate_worklist;
        match self.level.locate(from, self.camera.pos, capacity) {
            Ok(id) => {
                if id != from {
                    debug!("camera moved from sector {from} to {id}");
                }
                self.camera.sector = id;
                self.accepted = self.camera;
            }
            Err(e) => {
                warn!("rejected move to {}: {e}", self.camera.pos);
                self.camera.pos = self.accepted.pos;
                self.camera.sector = self.accepted.sector;
            }
        }
    }

    /// Render one frame at the configured size and hand it to `submit`.
    ///
    /// On error nothing is submitted.
    pub fn render_frame<F>(&mut self, submit: F) -> Result<(), RenderError>
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        let ScreenConfig { width, height } = self.config.screen;
        self.renderer.begin_frame(width, height);
        self.renderer.draw_level(&self.level, &self.camera)?;
        self.renderer.end_frame(submit);
        Ok(())
    }
}

/// Start pose from the level file, else the centroid of the lowest-id
/// sector facing east.
fn start_camera(level: &Level) -> Camera {
    let first = level.sectors().next();
    let (pos, angle) = level
        .start
        .or_else(|| first.map(|s| (s.centroid(), 0.0)))
        .unwrap_or_default();

    let sector = match level.sector_at(pos) {
        Some(id) => id,
        None => {
            let fallback = first.map_or(NO_SECTOR, |s| s.id);
            warn!("start {pos} is outside every sector, assuming sector {fallback}");
            fallback
        }
    };
    Camera::new(pos, angle, sector)
}

/*──────────────────────────────── Tests ───────────────────────────────*/
