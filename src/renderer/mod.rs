//! Rendering abstraction layer.
//!
//! *The rest of the engine never touches a pixel buffer directly.*
//! It hands the level and camera to a type implementing [`Renderer`] and
//! receives the finished frame through the `end_frame` closure.
//!
//! Frames are row-major with **row 0 at the bottom** of the screen
//! (y grows upward). Presentation layers with a top-left origin can use
//! [`flip_vertical`] on the way out.

use thiserror::Error;

use crate::world::{Camera, Level, SectorId};

/// Pixel format of the software frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

/// A frame that could not be completed. The buffer content is undefined
/// and should not be presented.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    #[error("portal worklist overflow (capacity {capacity})")]
    WorklistOverflow { capacity: usize },

    #[error("camera sector {0} is not part of the level")]
    NoSector(SectorId),
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Rasterise everything visible from `camera` into the internal buffer.
    fn draw_level(&mut self, level: &Level, camera: &Camera) -> Result<(), RenderError>;

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// `submit(&[Rgba], w, h)` is run exactly once per frame.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Copy `src` into `dst` with the row order reversed.
pub fn flip_vertical(src: &[Rgba], dst: &mut [Rgba], width: usize) {
    debug_assert_eq!(src.len(), dst.len());
    if width == 0 {
        return;
    }
    for (d, s) in dst.chunks_exact_mut(width).zip(src.chunks_exact(width).rev()) {
        d.copy_from_slice(s);
    }
}

pub mod software;

pub use software::{ClipBands, Palette, Software};
