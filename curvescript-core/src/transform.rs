/// 3D transformation matrices and the running transform state
use nalgebra::{Matrix4, Vector3};

/// Axis of a rotation command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Rotation matrix about this axis (angle in radians)
    pub fn rotation(self, radians: f32) -> Matrix4<f32> {
        match self {
            Axis::X => Transform::rotation_x(radians),
            Axis::Y => Transform::rotation_y(radians),
            Axis::Z => Transform::rotation_z(radians),
        }
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    pub fn identity() -> Matrix4<f32> {
        Matrix4::identity()
    }

    pub fn rotation_x(radians: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(radians, 0.0, 0.0))
    }

    pub fn rotation_y(radians: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, radians, 0.0))
    }

    pub fn rotation_z(radians: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, 0.0, radians))
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }
}

/// The running transform of an interpreter session.
///
/// Every operation composes on the right (`current := current * m`), so the
/// matrix issued last is the first one applied to a column-vector point.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformState {
    current: Matrix4<f32>,
}

impl TransformState {
    pub fn new() -> Self {
        Self {
            current: Matrix4::identity(),
        }
    }

    pub fn reset(&mut self) {
        self.current = Matrix4::identity();
    }

    pub fn compose_with(&mut self, m: &Matrix4<f32>) {
        self.current *= m;
    }

    pub fn current(&self) -> &Matrix4<f32> {
        &self.current
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new()
    }
}
