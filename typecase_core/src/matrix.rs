//! Column-major 4×4 affine matrices for per-line placement.
//!
//! Storage follows the OpenGL convention: elements `0..4` are the first
//! column, and the translation lives in elements `12`, `13`, `14`.

use std::ops::Mul;

/// Column-major 4×4 matrix of `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4(pub [f64; 16]);

impl Mat4 {
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        let mut m = Self::IDENTITY;
        m.0[12] = x;
        m.0[13] = y;
        m.0[14] = z;
        m
    }

    pub fn scaling(x: f64, y: f64, z: f64) -> Self {
        let mut m = Self::IDENTITY;
        m.0[0] = x;
        m.0[5] = y;
        m.0[10] = z;
        m
    }

    /// Orthographic projection onto the `[-1, 1]` clip cube.
    pub fn orthographic(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        let mut m = Self::IDENTITY;
        m.0[0] = 2.0 / (right - left);
        m.0[5] = 2.0 / (top - bottom);
        m.0[10] = -2.0 / (far - near);
        m.0[12] = -(right + left) / (right - left);
        m.0[13] = -(top + bottom) / (top - bottom);
        m.0[14] = -(far + near) / (far - near);
        m
    }

    /// Default placement of the `index`-th string in a multi-line layout:
    /// identity shifted down by `index` line heights.
    pub fn line_offset(index: usize, line_height: i32) -> Self {
        Self::translation(0.0, -(index as f64) * f64::from(line_height), 0.0)
    }

    /// Transform the point `(x, y, 0, 1)`, keeping `x`, `y`, `z`.
    pub fn transform_point(&self, x: f64, y: f64) -> [f32; 3] {
        let m = &self.0;
        [
            (m[0] * x + m[4] * y + m[12]) as f32,
            (m[1] * x + m[5] * y + m[13]) as f32,
            (m[2] * x + m[6] * y + m[14]) as f32,
        ]
    }

    /// Narrow to `f32` columns for uniform upload.
    pub fn to_cols_f32(&self) -> [[f32; 4]; 4] {
        let m = &self.0;
        std::array::from_fn(|c| std::array::from_fn(|r| m[c * 4 + r] as f32))
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f64; 16]> for Mat4 {
    fn from(m: [f64; 16]) -> Self {
        Self(m)
    }
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let (a, b) = (&self.0, &rhs.0);
        Self(std::array::from_fn(|i| {
            let (col, row) = (i / 4, i % 4);
            (0..4).map(|k| a[k * 4 + row] * b[col * 4 + k]).sum()
        }))
    }
}
