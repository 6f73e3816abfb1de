//! Cuaterniones de rotación y ángulos de Euler

use super::{Matrix3, Vector3};
use core::f64::consts::FRAC_PI_2;

/// Ángulos de Euler (convención ZYX) en radianes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    /// Rotación alrededor de X
    pub roll: f64,
    /// Rotación alrededor de Y
    pub pitch: f64,
    /// Rotación alrededor de Z
    pub yaw: f64,
}

impl EulerAngles {
    pub const fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Interpreta un vector como `(roll, pitch, yaw)`
    pub const fn from_vector(v: Vector3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    pub const fn to_vector(self) -> Vector3 {
        Vector3::new(self.roll, self.pitch, self.yaw)
    }

    /// Devuelve los ángulos en grados
    pub fn to_degrees(self) -> EulerAngles {
        EulerAngles::new(
            self.roll.to_degrees(),
            self.pitch.to_degrees(),
            self.yaw.to_degrees(),
        )
    }
}

/// Cuaternión `w + xi + yj + zk`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion::new(1.0, 0.0, 0.0, 0.0);

    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Cuaternión puro `(0, v)`
    pub const fn from_vector(v: Vector3) -> Self {
        Self::new(0.0, v.x, v.y, v.z)
    }

    /// Parte vectorial `(x, y, z)`
    pub const fn vector(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Rotación de `radians` alrededor de un eje unitario
    pub fn from_axis_angle(axis: Vector3, radians: f64) -> Self {
        let (s, c) = (radians * 0.5).sin_cos();
        Self::new(c, s * axis.x, s * axis.y, s * axis.z)
    }

    /// Convierte ángulos de Euler a cuaternión (fórmula del producto de semiángulos)
    pub fn from_euler(angles: EulerAngles) -> Self {
        let (sr, cr) = (angles.roll * 0.5).sin_cos();
        let (sp, cp) = (angles.pitch * 0.5).sin_cos();
        let (sy, cy) = (angles.yaw * 0.5).sin_cos();

        Self::new(
            cy * cr * cp + sy * sr * sp,
            cy * sr * cp - sy * cr * sp,
            cy * cr * sp + sy * sr * cp,
            sy * cr * cp - cy * sr * sp,
        )
    }

    /// Convierte el cuaternión a ángulos de Euler
    pub fn to_euler(&self) -> EulerAngles {
        let (w, x, y, z) = (self.w, self.x, self.y, self.z);

        // Roll (rotación en X)
        let sinr_cosp = 2.0 * (w * x + y * z);
        let cosr_cosp = 1.0 - 2.0 * (x * x + y * y);
        let roll = sinr_cosp.atan2(cosr_cosp);

        // Pitch (rotación en Y), saturado en los polos
        let sinp = 2.0 * (w * y - z * x);
        let pitch = if sinp.abs() >= 1.0 {
            sinp.signum() * FRAC_PI_2
        } else {
            sinp.asin()
        };

        // Yaw (rotación en Z)
        let siny_cosp = 2.0 * (w * z + x * y);
        let cosy_cosp = 1.0 - 2.0 * (y * y + z * z);
        let yaw = siny_cosp.atan2(cosy_cosp);

        EulerAngles::new(roll, pitch, yaw)
    }

    /// Producto de Hamilton `self ⊗ other` (no conmutativo)
    pub fn mul(&self, other: &Quaternion) -> Quaternion {
        Quaternion::new(
            self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
        )
    }

    /// Compone dos rotaciones: primero `other`, después `self`
    pub fn compose(&self, other: &Quaternion) -> Quaternion {
        self.mul(other)
    }

    pub fn conjugate(&self) -> Quaternion {
        Quaternion::new(self.w, -self.x, -self.y, -self.z)
    }

    pub fn norm(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Normaliza el cuaternión; devuelve la identidad si la norma es casi nula
    pub fn normalized(&self) -> Quaternion {
        let n = self.norm();
        if n < 1e-12 {
            Quaternion::IDENTITY
        } else {
            Quaternion::new(self.w / n, self.x / n, self.y / n, self.z / n)
        }
    }

    /// Rota un vector: `q ⊗ (0, v) ⊗ q*`
    pub fn rotate(&self, v: Vector3) -> Vector3 {
        self.mul(&Quaternion::from_vector(v))
            .mul(&self.conjugate())
            .vector()
    }

    /// Calcula la matriz de rotación equivalente
    pub fn to_rotation_matrix(&self) -> Matrix3 {
        let (qw, qx, qy, qz) = (self.w, self.x, self.y, self.z);
        let (qw2, qx2, qy2, qz2) = (qw * qw, qx * qx, qy * qy, qz * qz);

        Matrix3::new([
            [
                qw2 + qx2 - qy2 - qz2,
                2.0 * (qx * qy - qw * qz),
                2.0 * (qx * qz + qw * qy),
            ],
            [
                2.0 * (qx * qy + qw * qz),
                qw2 - qx2 + qy2 - qz2,
                2.0 * (qy * qz - qw * qx),
            ],
            [
                2.0 * (qx * qz - qw * qy),
                2.0 * (qy * qz + qw * qx),
                qw2 - qx2 - qy2 + qz2,
            ],
        ])
    }

    /// Compara dos cuaterniones como rotaciones (`q` y `-q` son equivalentes)
    pub fn approx_eq(&self, other: &Quaternion, tolerance: f64) -> bool {
        let dot = self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z;
        1.0 - dot.abs() <= tolerance
    }
}
