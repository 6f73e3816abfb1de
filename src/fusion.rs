//! Estimación de orientación a partir del giroscopio y del acelerómetro
//!
//! Dos estrategias detrás de `OrientationEstimator`:
//!
//! - `ComplementaryFilter`: integra el giroscopio y corrige roll y pitch con
//!   la inclinación medida por el acelerómetro. El yaw sólo se integra.
//! - `GyroIntegrator`: compone rotaciones incrementales del giroscopio en una
//!   matriz. No hay corrección del acelerómetro, así que la deriva crece sin
//!   límite.
//!
//! La orientación se expresa como la rotación cuerpo → mundo (convención
//! ZYX). Las velocidades angulares llegan en °/s.

use crate::config::FusionConfig;
use crate::math::{EulerAngles, Matrix3, Quaternion, Vector3, DEG_TO_RAD};

/// Estimador de orientación actualizado una vez por ciclo
pub trait OrientationEstimator {
    /// Incorpora una muestra (giroscopio en °/s, acelerómetro en m/s², `dt` en s)
    fn update(&mut self, gyro: Vector3, accel: Vector3, dt: f64) -> Quaternion;

    /// Orientación actual cuerpo → mundo
    fn orientation(&self) -> Quaternion;

    /// Expresa un vector del marco del sensor en el marco del mundo
    fn to_world(&self, body: Vector3) -> Vector3;

    /// Vuelve a la orientación identidad
    fn reset(&mut self);
}

/// Filtro complementario sobre ángulos de Euler
#[derive(Debug, Clone)]
pub struct ComplementaryFilter {
    config: FusionConfig,
    angles: EulerAngles,
    quaternion: Quaternion,
}

impl Default for ComplementaryFilter {
    fn default() -> Self {
        Self::new(FusionConfig::default())
    }
}

impl ComplementaryFilter {
    pub fn new(config: FusionConfig) -> Self {
        Self {
            config,
            angles: EulerAngles::default(),
            quaternion: Quaternion::IDENTITY,
        }
    }

    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    /// Ángulos de Euler acumulados (radianes)
    pub fn angles(&self) -> EulerAngles {
        self.angles
    }

    /// Roll y pitch deducidos sólo del acelerómetro
    pub fn accel_angles(&self, accel: Vector3) -> (f64, f64) {
        let pitch = (-accel.x).atan2((accel.y * accel.y + accel.z * accel.z).sqrt());
        let sign = if accel.z < 0.0 { -1.0 } else { 1.0 };
        let roll = accel
            .y
            .atan2(sign * (accel.z * accel.z + self.config.mu * accel.x * accel.x).sqrt());
        (roll, pitch)
    }
}

impl OrientationEstimator for ComplementaryFilter {
    fn update(&mut self, gyro: Vector3, accel: Vector3, dt: f64) -> Quaternion {
        let delta = gyro.scale(DEG_TO_RAD * dt);
        let (roll_acc, pitch_acc) = self.accel_angles(accel);
        let alpha = self.config.alpha;

        self.angles.roll = alpha * (self.angles.roll + delta.x) + (1.0 - alpha) * roll_acc;
        self.angles.pitch = alpha * (self.angles.pitch + delta.y) + (1.0 - alpha) * pitch_acc;
        self.angles.yaw += delta.z;

        self.quaternion = Quaternion::from_euler(self.angles);
        log::trace!("Orientación: {:?}", self.angles.to_degrees());
        self.quaternion
    }

    fn orientation(&self) -> Quaternion {
        self.quaternion
    }

    fn to_world(&self, body: Vector3) -> Vector3 {
        self.quaternion.rotate(body)
    }

    fn reset(&mut self) {
        self.angles = EulerAngles::default();
        self.quaternion = Quaternion::IDENTITY;
    }
}

/// Integración pura del giroscopio sobre una matriz de rotación
///
/// Guarda la matriz mundo → cuerpo; cada ciclo la multiplica por la
/// izquierda por la traspuesta del incremento `gyro * dt`.
#[derive(Debug, Clone, Default)]
pub struct GyroIntegrator {
    world_to_body: Matrix3,
}

impl GyroIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matriz mundo → cuerpo acumulada
    pub fn matrix(&self) -> Matrix3 {
        self.world_to_body
    }
}

impl OrientationEstimator for GyroIntegrator {
    fn update(&mut self, gyro: Vector3, _accel: Vector3, dt: f64) -> Quaternion {
        let increment = Matrix3::from_rotation_vector(gyro.scale(DEG_TO_RAD * dt));
        self.world_to_body.left_multiply_assign(&increment.transpose());
        self.orientation()
    }

    fn orientation(&self) -> Quaternion {
        self.world_to_body.transpose().to_quaternion()
    }

    fn to_world(&self, body: Vector3) -> Vector3 {
        self.world_to_body.transpose().mul_vec(body)
    }

    fn reset(&mut self) {
        self.world_to_body = Matrix3::IDENTITY;
    }
}
