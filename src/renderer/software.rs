//! ---------------------------------------------------------------------------
//! Software (CPU) portal renderer
//!
//! * Fills an internal `Vec<u32>` frame-buffer in **0xAARRGGBB** format,
//!   row 0 at the bottom.
//! * Walks the sector graph through portals, nearest sector first, so no
//!   Z-buffer is needed: per-column clip bands only ever shrink.
//! ---------------------------------------------------------------------------

mod portal;
mod shade;

pub use shade::{EDGE_SHADE, Palette, shade, wall_shade};

use crate::{
    config::ViewConfig,
    renderer::{RenderError, Renderer, Rgba},
    world::{Camera, Level},
};

/// Per-column visible band `[lo, hi]` (inclusive rows).
///
/// A column whose portal hides everything behind it is `closed`; its
/// `lo`/`hi` stay ordered but no row of it is drawable any more.
#[derive(Clone, Debug, Default)]
pub struct ClipBands {
    pub lo: Vec<i32>,
    pub hi: Vec<i32>,
    pub closed: Vec<bool>,
}

impl ClipBands {
    fn reset(&mut self, width: usize, height: usize) {
        self.lo.clear();
        self.lo.resize(width, 0);
        self.hi.clear();
        self.hi.resize(width, height as i32 - 1);
        self.closed.clear();
        self.closed.resize(width, false);
    }

    #[inline]
    pub fn is_closed(&self, x: usize) -> bool {
        self.closed.get(x).copied().unwrap_or(true)
    }
}

/// One pending sector: draw `sector` inside columns `x0..=x1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PortalSpan {
    pub sector: u16,
    pub x0: i32,
    pub x1: i32,
}

/// Portal-walking column renderer.
pub struct Software {
    scratch: Vec<Rgba>,
    /* clip bands survive across sectors */
    clip_bands: ClipBands,
    /* one flag per sector id, reset every frame */
    drawn: Vec<bool>,
    worklist: Vec<PortalSpan>,
    worklist_capacity: usize,
    view: ViewConfig,
    palette: Palette,
    width: usize,
    height: usize,
}

impl Default for Software {
    fn default() -> Self {
        Self::new(ViewConfig::default(), Palette::default(), 64)
    }
}

impl Software {
    pub fn new(view: ViewConfig, palette: Palette, worklist_capacity: usize) -> Self {
        Self {
            scratch: Vec::new(),
            clip_bands: ClipBands::default(),
            drawn: Vec::new(),
            worklist: Vec::with_capacity(worklist_capacity),
            worklist_capacity,
            view,
            palette,
            width: 0,
            height: 0,
        }
    }

    /// The last frame, row 0 at the bottom.
    pub fn pixels(&self) -> &[Rgba] {
        &self.scratch
    }

    /// Clip bands as left by the last `draw_level`.
    pub fn clip_bands(&self) -> &ClipBands {
        &self.clip_bands
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }
        self.scratch.fill(self.palette.clear);

        // fully open clips at start of frame
        self.clip_bands.reset(w, h);
    }

    fn draw_level(&mut self, level: &Level, camera: &Camera) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }
        self.walk_portals(level, camera)
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}
