/// Pixel canvas with integer line rasterization
use curvescript_core::{Color, EdgeBuffer};
use image::{Rgb, RgbImage};
use nalgebra::Point3;

pub const DEFAULT_WIDTH: usize = 500;
pub const DEFAULT_HEIGHT: usize = 500;
/// Largest accepted width or height, in pixels
pub const MAX_SIDE: usize = 8192;

/// Fixed-size RGB surface. `(0, 0)` is the bottom-left pixel and y grows
/// upward; storage is row-major from the top row down.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Option<Color>>,
}

impl Canvas {
    /// Both sides are clamped to `1..=MAX_SIDE`
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.clamp(1, MAX_SIDE);
        let height = height.clamp(1, MAX_SIDE);
        Self {
            width,
            height,
            pixels: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.pixels.fill(None);
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        let row = self.height - 1 - y as usize;
        Some(row * self.width + x as usize)
    }

    /// Colour at canvas coordinates, `None` if unlit or off-canvas
    pub fn get(&self, x: i64, y: i64) -> Option<Color> {
        self.index(x, y).and_then(|i| self.pixels[i])
    }

    /// Colour at storage position (row 0 is the top of the image)
    pub(crate) fn get_row_major(&self, col: usize, row: usize) -> Option<Color> {
        self.pixels[row * self.width + col]
    }

    pub fn plot(&mut self, x: i64, y: i64, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = Some(color);
        }
    }

    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_some()).count()
    }

    /// Bresenham line between two pixel positions, inclusive
    pub fn draw_line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.plot(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Rasterize every segment of the buffer, ignoring z
    pub fn draw_edges(&mut self, edges: &EdgeBuffer, color: Color) {
        for (p0, p1) in edges.segments() {
            if let Some((a, b)) = self.clip(p0, p1) {
                self.draw_line(
                    a.0.round() as i64,
                    a.1.round() as i64,
                    b.0.round() as i64,
                    b.1.round() as i64,
                    color,
                );
            }
        }
    }

    /// Liang-Barsky clip of a segment to a one-pixel margin around the canvas
    fn clip(&self, p0: &Point3<f32>, p1: &Point3<f32>) -> Option<((f64, f64), (f64, f64))> {
        let (x0, y0) = (p0.x as f64, p0.y as f64);
        let (x1, y1) = (p1.x as f64, p1.y as f64);
        if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
            return None;
        }

        let (dx, dy) = (x1 - x0, y1 - y0);
        let (min_x, min_y) = (-1.0, -1.0);
        let (max_x, max_y) = (self.width as f64, self.height as f64);
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

        for (p, q) in [
            (-dx, x0 - min_x),
            (dx, max_x - x0),
            (-dy, y0 - min_y),
            (dy, max_y - y0),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        Some((
            (x0 + t0 * dx, y0 + t0 * dy),
            (x0 + t1 * dx, y0 + t1 * dy),
        ))
    }

    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |col, row| {
            let c = self
                .get_row_major(col as usize, row as usize)
                .unwrap_or(Color::BLACK);
            Rgb([c.r, c.g, c.b])
        })
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_and_vertical() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_line(0, 0, 9, 0, Color::RED);
        canvas.draw_line(5, 0, 5, 9, Color::RED);
        assert_eq!(canvas.lit_pixels(), 10 + 9);
        assert_eq!(canvas.get(9, 0), Some(Color::RED));
        assert_eq!(canvas.get(5, 9), Some(Color::RED));
    }

    #[test]
    fn test_diagonal_both_directions() {
        let mut canvas = Canvas::new(8, 8);
        canvas.draw_line(7, 7, 0, 0, Color::RED);
        for i in 0..8 {
            assert_eq!(canvas.get(i, i), Some(Color::RED));
        }
        assert_eq!(canvas.lit_pixels(), 8);
    }

    #[test]
    fn test_origin_is_bottom_left() {
        let mut canvas = Canvas::new(4, 4);
        canvas.plot(0, 0, Color::RED);
        let image = canvas.to_image();
        assert_eq!(image.get_pixel(0, 3), &Rgb([255, 0, 0]));
        assert_eq!(image.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_clipping() {
        let mut canvas = Canvas::new(10, 10);
        let mut edges = EdgeBuffer::new();
        edges.add_edge(Point3::new(-1.0e9, 5.0, 0.0), Point3::new(1.0e9, 5.0, 0.0));
        edges.add_edge(Point3::new(20.0, 20.0, 0.0), Point3::new(30.0, 40.0, 0.0));
        edges.add_edge(Point3::new(f32::NAN, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0));
        canvas.draw_edges(&edges, Color::RED);

        assert_eq!(canvas.lit_pixels(), 10);
        for x in 0..10 {
            assert_eq!(canvas.get(x, 5), Some(Color::RED));
        }
    }

    #[test]
    fn test_oversized_canvas_is_clamped() {
        let canvas = Canvas::new(usize::MAX, 0);
        assert_eq!(canvas.width(), MAX_SIDE);
        assert_eq!(canvas.height(), 1);
        assert_eq!(canvas.to_image().dimensions(), (MAX_SIDE as u32, 1));
    }

    #[test]
    fn test_clear() {
        let mut canvas = Canvas::new(3, 3);
        canvas.draw_line(0, 0, 2, 2, Color::RED);
        canvas.clear();
        assert_eq!(canvas.lit_pixels(), 0);
    }
}
