/// Terminal presentation and image persistence for the canvas
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use curvescript_core::{Color, EdgeBuffer, RenderError, RenderResult, Renderer};
use log::debug;
use std::io::Write;
use std::path::Path;

use crate::canvas::Canvas;

/// Character used for any cell that covers a lit pixel
const LIT_CELL: char = '#';

/// Renderer that rasterizes onto a [`Canvas`], prints it as coloured ASCII
/// on `present`, and encodes it with `image` on `save`.
pub struct TerminalRenderer<W: Write> {
    canvas: Canvas,
    out: W,
    cols: usize,
    rows: usize,
}

impl<W: Write> TerminalRenderer<W> {
    /// `cols` x `rows` is the character grid the canvas is shrunk onto
    pub fn new(canvas: Canvas, out: W, cols: usize, rows: usize) -> Self {
        Self {
            canvas,
            out,
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// First lit pixel inside the block of pixels a cell covers
    fn cell_color(&self, col: usize, row: usize, block_w: usize, block_h: usize) -> Option<Color> {
        let x_end = ((col + 1) * block_w).min(self.canvas.width());
        let y_end = ((row + 1) * block_h).min(self.canvas.height());
        (row * block_h..y_end)
            .flat_map(|y| (col * block_w..x_end).map(move |x| (x, y)))
            .find_map(|(x, y)| self.canvas.get_row_major(x, y))
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear(&mut self) {
        self.canvas.clear();
    }

    fn draw_segments(&mut self, edges: &EdgeBuffer, color: Color) -> RenderResult<()> {
        self.canvas.draw_edges(edges, color);
        Ok(())
    }

    fn present(&mut self) -> RenderResult<()> {
        let block_w = self.canvas.width().div_ceil(self.cols).max(1);
        let block_h = self.canvas.height().div_ceil(self.rows).max(1);
        let cols = self.canvas.width().div_ceil(block_w);
        let rows = self.canvas.height().div_ceil(block_h);
        debug!("presenting {}x{} canvas as {cols}x{rows} cells", self.canvas.width(), self.canvas.height());

        for row in 0..rows {
            for col in 0..cols {
                match self.cell_color(col, row, block_w, block_h) {
                    Some(c) => {
                        self.out.queue(SetForegroundColor(TermColor::Rgb {
                            r: c.r,
                            g: c.g,
                            b: c.b,
                        }))?;
                        self.out.queue(Print(LIT_CELL))?;
                    }
                    None => {
                        self.out.queue(Print(' '))?;
                    }
                }
            }
            self.out.queue(Print('\n'))?;
        }
        self.out.queue(ResetColor)?;
        self.out.flush()?;
        Ok(())
    }

    fn save(&mut self, path: &Path) -> RenderResult<()> {
        self.canvas
            .to_image()
            .save(path)
            .map_err(|e| RenderError::ImageEncoding {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    fn finish(&mut self) -> RenderResult<()> {
        self.out.queue(ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}
