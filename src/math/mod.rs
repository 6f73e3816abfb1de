//! Primitivas matemáticas: vectores, matrices de rotación y cuaterniones
//!
//! Todas las operaciones son funciones puras con nombre explícito
//! (`add`, `scale`, `mul_vec`, `compose`, `rotate`...), sin E/S.

mod matrix;
mod quaternion;
mod vector;

pub use matrix::Matrix3;
pub use quaternion::{EulerAngles, Quaternion};
pub use vector::Vector3;

/// Factor para convertir grados a radianes
pub const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;
/// Factor para convertir radianes a grados
pub const RAD_TO_DEG: f64 = 180.0 / core::f64::consts::PI;
