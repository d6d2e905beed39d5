/// Curve tessellation.
///
/// Every generator returns `steps + 1` points in the z = 0 plane that form
/// `steps` connected segments. Nothing here touches the transform state;
/// callers append the result to an [`EdgeBuffer`](crate::EdgeBuffer).
use nalgebra::{Matrix4, Point2, Point3, Vector4};
use std::f32::consts::TAU;

/// Cubic curve families accepted by [`cubic`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// Endpoints with tangent handles: `[p0, handle0, p1, handle1]`
    Hermite,
    /// Four Bezier control points
    Bezier,
}

impl CurveKind {
    /// Basis matrix turning a geometry vector into `[a, b, c, d]` of
    /// `a*t^3 + b*t^2 + c*t + d`.
    #[rustfmt::skip]
    fn basis(self) -> Matrix4<f32> {
        match self {
            // geometry: [p0, p1, r0, r1]
            CurveKind::Hermite => Matrix4::new(
                2.0, -2.0, 1.0, 1.0,
                -3.0, 3.0, -2.0, -1.0,
                0.0, 0.0, 1.0, 0.0,
                1.0, 0.0, 0.0, 0.0,
            ),
            CurveKind::Bezier => Matrix4::new(
                -1.0, 3.0, -3.0, 1.0,
                3.0, -6.0, 3.0, 0.0,
                -3.0, 3.0, 0.0, 0.0,
                1.0, 0.0, 0.0, 0.0,
            ),
        }
    }

    /// Per-axis geometry vectors for the four control points
    fn geometry(self, control: &[Point2<f32>; 4]) -> (Vector4<f32>, Vector4<f32>) {
        let [a, b, c, d] = *control;
        match self {
            CurveKind::Hermite => {
                let (p0, p1) = (a, c);
                let (r0, r1) = (b - a, d - c);
                (
                    Vector4::new(p0.x, p1.x, r0.x, r1.x),
                    Vector4::new(p0.y, p1.y, r0.y, r1.y),
                )
            }
            CurveKind::Bezier => (
                Vector4::new(a.x, b.x, c.x, d.x),
                Vector4::new(a.y, b.y, c.y, d.y),
            ),
        }
    }
}

/// Circle of radius `r` around `(cx, cy)`, closed: the last point is the first.
///
/// Fewer than 3 segments cannot enclose anything, so `steps` is raised to 3.
pub fn circle(cx: f32, cy: f32, r: f32, steps: usize) -> Vec<Point3<f32>> {
    let steps = steps.max(3);
    (0..=steps)
        .map(|k| {
            // k == steps wraps to angle 0 so the loop closes exactly
            let theta = TAU * (k % steps) as f32 / steps as f32;
            Point3::new(cx + r * theta.cos(), cy + r * theta.sin(), 0.0)
        })
        .collect()
}

/// Cubic Hermite or Bezier curve through the given control points
pub fn cubic(kind: CurveKind, control: &[Point2<f32>; 4], steps: usize) -> Vec<Point3<f32>> {
    let steps = steps.max(1);
    let basis = kind.basis();
    let (gx, gy) = kind.geometry(control);
    let (cx, cy) = (basis * gx, basis * gy);

    (0..=steps)
        .map(|k| {
            let t = k as f32 / steps as f32;
            Point3::new(horner(&cx, t), horner(&cy, t), 0.0)
        })
        .collect()
}

pub fn hermite(control: &[Point2<f32>; 4], steps: usize) -> Vec<Point3<f32>> {
    cubic(CurveKind::Hermite, control, steps)
}

pub fn bezier(control: &[Point2<f32>; 4], steps: usize) -> Vec<Point3<f32>> {
    cubic(CurveKind::Bezier, control, steps)
}

fn horner(coefs: &Vector4<f32>, t: f32) -> f32 {
    ((coefs[0] * t + coefs[1]) * t + coefs[2]) * t + coefs[3]
}
