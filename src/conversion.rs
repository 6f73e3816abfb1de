//! Funciones de conversión para datos del sensor MPU6050
//!
//! Convierte las lecturas crudas (enteros de 16 bits big-endian) a unidades
//! físicas: m/s² para el acelerómetro, grados/segundo para el giroscopio y
//! grados Celsius para la temperatura.

use crate::math::Vector3;
use crate::types::{AccelFullScale, GyroFullScale, RAW_FULL_SCALE};

/// Sensibilidad del sensor de temperatura (LSB/°C)
pub const TEMP_SENSITIVITY: f64 = 340.0;
/// Desplazamiento del sensor de temperatura (°C)
pub const TEMP_OFFSET: f64 = 36.53;

/// Decodifica tres enteros big-endian consecutivos
#[inline]
pub fn be_i16_triplet(data: &[u8; 6]) -> [i16; 3] {
    [
        i16::from_be_bytes([data[0], data[1]]),
        i16::from_be_bytes([data[2], data[3]]),
        i16::from_be_bytes([data[4], data[5]]),
    ]
}

/// Escala una lectura cruda al fondo de escala indicado
///
/// `raw = 32767` devuelve exactamente `full_scale`.
#[inline]
pub fn raw_to_units(raw: [i16; 3], full_scale: f64) -> Vector3 {
    Vector3::new(
        raw[0] as f64 / RAW_FULL_SCALE * full_scale,
        raw[1] as f64 / RAW_FULL_SCALE * full_scale,
        raw[2] as f64 / RAW_FULL_SCALE * full_scale,
    )
}

/// Convierte datos brutos de acelerómetro a m/s² según la escala configurada
pub fn accel_raw_to_mss(raw: [i16; 3], scale: AccelFullScale) -> Vector3 {
    raw_to_units(raw, scale.full_scale())
}

/// Convierte datos brutos de giroscopio a grados/segundo según la escala configurada
pub fn gyro_raw_to_dps(raw: [i16; 3], scale: GyroFullScale) -> Vector3 {
    raw_to_units(raw, scale.full_scale())
}

/// Convierte datos brutos de temperatura a grados Celsius
pub fn temp_raw_to_celsius(raw: i16) -> f64 {
    raw as f64 / TEMP_SENSITIVITY + TEMP_OFFSET
}
