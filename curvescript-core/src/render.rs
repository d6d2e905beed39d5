/// Contract between the interpreter and whatever draws the edge buffer.
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::geometry::EdgeBuffer;

/// 8-bit RGB drawing colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const RED: Color = Color::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot encode image {path:?}: {message}")]
    ImageEncoding { path: PathBuf, message: String },

    #[error("{0}")]
    Backend(String),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Canvas operations the interpreter drives on `display` and `save`.
///
/// A session clears the canvas once when it starts and again after every
/// `display` or `save`. The edge buffer is never modified by a renderer.
pub trait Renderer {
    fn clear(&mut self);

    fn draw_segments(&mut self, edges: &EdgeBuffer, color: Color) -> RenderResult<()>;

    fn present(&mut self) -> RenderResult<()>;

    fn save(&mut self, path: &Path) -> RenderResult<()>;

    /// Release or flush output before the process exits
    fn finish(&mut self) -> RenderResult<()> {
        Ok(())
    }
}
