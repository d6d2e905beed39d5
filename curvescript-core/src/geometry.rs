/// Edge buffer: points consumed pairwise as line-segment endpoints
use nalgebra::{Matrix4, Point3};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeBuffer {
    points: Vec<Point3<f32>>,
}

impl EdgeBuffer {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn add_edge(&mut self, p0: Point3<f32>, p1: Point3<f32>) {
        self.points.push(p0);
        self.points.push(p1);
    }

    /// Append a connected point sequence as `points.len() - 1` segments
    pub fn add_polyline(&mut self, points: &[Point3<f32>]) {
        self.points.reserve(points.len().saturating_sub(1) * 2);
        for pair in points.windows(2) {
            self.add_edge(pair[0], pair[1]);
        }
    }

    /// Multiply every point by `matrix` (points as column vectors)
    pub fn apply(&mut self, matrix: &Matrix4<f32>) {
        for point in &mut self.points {
            *point = matrix.transform_point(point);
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = (&Point3<f32>, &Point3<f32>)> + '_ {
        self.points.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }

    pub fn segment_count(&self) -> usize {
        self.points.len() / 2
    }

    pub fn points(&self) -> &[Point3<f32>] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
