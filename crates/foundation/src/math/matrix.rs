use std::ops::Mul;

use super::Vec3;

/// Row-major 4x4 matrix. Element `(r, c)` lives at `m[r * 4 + c]`; points are
/// column vectors multiplied on the right.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    pub m: [f64; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub fn from_rows(m: [f64; 16]) -> Self {
        Self { m }
    }

    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.m[row * 4 + col]
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        let mut out = Self::IDENTITY;
        out.m[3] = x;
        out.m[7] = y;
        out.m[11] = z;
        out
    }

    pub fn translation_by(v: Vec3) -> Self {
        Self::translation(v.x, v.y, v.z)
    }

    /// Counter-clockwise rotation about +X.
    pub fn rotation_x(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::from_rows([
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, -s, 0.0, //
            0.0, s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Counter-clockwise rotation about +Z.
    pub fn rotation_z(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::from_rows([
            c, -s, 0.0, 0.0, //
            s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Matrix whose columns are the given axes and translation.
    pub fn from_basis(x_axis: Vec3, y_axis: Vec3, z_axis: Vec3, origin: Vec3) -> Self {
        Self::from_rows([
            x_axis.x, y_axis.x, z_axis.x, origin.x, //
            x_axis.y, y_axis.y, z_axis.y, origin.y, //
            x_axis.z, y_axis.z, z_axis.z, origin.z, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0] * p.x + m[1] * p.y + m[2] * p.z + m[3],
            m[4] * p.x + m[5] * p.y + m[6] * p.z + m[7],
            m[8] * p.x + m[9] * p.y + m[10] * p.z + m[11],
        )
    }

    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0] * v.x + m[1] * v.y + m[2] * v.z,
            m[4] * v.x + m[5] * v.y + m[6] * v.z,
            m[8] * v.x + m[9] * v.y + m[10] * v.z,
        )
    }

    /// Applies the transpose of the upper 3x3. For a rigid transform this
    /// maps eye-space directions back to world space.
    pub fn transpose_transform_vector(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0] * v.x + m[4] * v.y + m[8] * v.z,
            m[1] * v.x + m[5] * v.y + m[9] * v.z,
            m[2] * v.x + m[6] * v.y + m[10] * v.z,
        )
    }

    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(self.m[3], self.m[7], self.m[11])
    }

    /// Inverse of a rotation plus translation. Not valid for scaled matrices.
    pub fn rigid_inverse(&self) -> Self {
        let t = self.translation_part();
        let inv_t = -self.transpose_transform_vector(t);
        let m = &self.m;
        Self::from_rows([
            m[0], m[4], m[8], inv_t.x, //
            m[1], m[5], m[9], inv_t.y, //
            m[2], m[6], m[10], inv_t.z, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Eye position of a modelview matrix, in world coordinates.
    pub fn extract_eye_point(&self) -> Vec3 {
        -self.transpose_transform_vector(self.translation_part())
    }

    /// World-space viewing direction of a modelview matrix (eye-space -Z).
    pub fn extract_forward_vector(&self) -> Vec3 {
        Vec3::new(-self.m[8], -self.m[9], -self.m[10])
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [0.0; 16];
        for r in 0..4 {
            for c in 0..4 {
                out[r * 4 + c] = (0..4).map(|k| self.m[r * 4 + k] * rhs.m[k * 4 + c]).sum();
            }
        }
        Mat4 { m: out }
    }
}
