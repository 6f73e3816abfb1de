//! Matrices de rotación 3x3 (row-major)

use super::{Quaternion, Vector3};

/// Matriz 3x3 almacenada por filas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    pub m: [[f64; 3]; 3],
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix3 {
    pub const IDENTITY: Matrix3 = Matrix3 {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    pub const fn new(m: [[f64; 3]; 3]) -> Self {
        Self { m }
    }

    /// Producto matriz-vector `self * v`
    pub fn mul_vec(&self, v: Vector3) -> Vector3 {
        let m = &self.m;
        Vector3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    /// Producto `self * other`
    pub fn mul(&self, other: &Matrix3) -> Matrix3 {
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.m[i][k] * other.m[k][j]).sum();
            }
        }
        Matrix3::new(out)
    }

    /// Multiplica por la izquierda en el sitio: `self = other * self`
    pub fn left_multiply_assign(&mut self, other: &Matrix3) {
        *self = other.mul(self);
    }

    pub fn transpose(&self) -> Matrix3 {
        let m = &self.m;
        Matrix3::new([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    pub fn rotation_x(radians: f64) -> Matrix3 {
        let (s, c) = radians.sin_cos();
        Matrix3::new([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]])
    }

    pub fn rotation_y(radians: f64) -> Matrix3 {
        let (s, c) = radians.sin_cos();
        Matrix3::new([[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]])
    }

    pub fn rotation_z(radians: f64) -> Matrix3 {
        let (s, c) = radians.sin_cos();
        Matrix3::new([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Rotación de `radians` alrededor de `axis` (fórmula de Rodrigues).
    ///
    /// Devuelve la identidad si el eje es nulo.
    pub fn from_axis_angle(axis: Vector3, radians: f64) -> Matrix3 {
        let u = match axis.normalized() {
            Some(u) => u,
            None => return Matrix3::IDENTITY,
        };
        let (s, c) = radians.sin_cos();
        let t = 1.0 - c;
        Matrix3::new([
            [c + u.x * u.x * t, u.x * u.y * t - u.z * s, u.x * u.z * t + u.y * s],
            [u.x * u.y * t + u.z * s, c + u.y * u.y * t, u.y * u.z * t - u.x * s],
            [u.z * u.x * t - u.y * s, u.y * u.z * t + u.x * s, c + u.z * u.z * t],
        ])
    }

    /// Rotación equivalente a un vector de rotación (eje * ángulo en radianes)
    pub fn from_rotation_vector(rotation: Vector3) -> Matrix3 {
        Matrix3::from_axis_angle(rotation, rotation.length())
    }

    /// Convierte una matriz de rotación en un cuaternión unitario
    pub fn to_quaternion(&self) -> Quaternion {
        let m = &self.m;
        let trace = m[0][0] + m[1][1] + m[2][2];

        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Quaternion::new(
                0.25 * s,
                (m[2][1] - m[1][2]) / s,
                (m[0][2] - m[2][0]) / s,
                (m[1][0] - m[0][1]) / s,
            )
        } else if m[0][0] > m[1][1] && m[0][0] > m[2][2] {
            let s = (1.0 + m[0][0] - m[1][1] - m[2][2]).sqrt() * 2.0;
            Quaternion::new(
                (m[2][1] - m[1][2]) / s,
                0.25 * s,
                (m[0][1] + m[1][0]) / s,
                (m[0][2] + m[2][0]) / s,
            )
        } else if m[1][1] > m[2][2] {
            let s = (1.0 + m[1][1] - m[0][0] - m[2][2]).sqrt() * 2.0;
            Quaternion::new(
                (m[0][2] - m[2][0]) / s,
                (m[0][1] + m[1][0]) / s,
                0.25 * s,
                (m[1][2] + m[2][1]) / s,
            )
        } else {
            let s = (1.0 + m[2][2] - m[0][0] - m[1][1]).sqrt() * 2.0;
            Quaternion::new(
                (m[1][0] - m[0][1]) / s,
                (m[0][2] + m[2][0]) / s,
                (m[1][2] + m[2][1]) / s,
                0.25 * s,
            )
        };

        q.normalized()
    }
}
