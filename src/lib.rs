//! Biblioteca Rust para el sensor de movimiento InvenSense MPU6050
//!
//! Esta biblioteca proporciona una interfaz para controlar el sensor MPU6050,
//! un IMU de 6 ejes con giroscopio y acelerómetro, junto con la estimación de
//! orientación y la doble integración de la aceleración lineal.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

// Importaciones internas
pub mod base;
pub mod bitfield;
pub mod calibration;
pub mod config;
pub mod controls;
pub mod conversion;
pub mod device;
pub mod fusion;
pub mod integrator;
pub mod interface;
pub mod math;
pub mod navigation;
pub mod register;
pub mod sampling;
pub mod storage;
pub mod types;

// Re-exports públicos
pub use base::{ImuSource, SystemTimeSource, TimeSource};
pub use calibration::{calibrate, CalibrationOffset, CalibrationParameters};
pub use config::{FusionConfig, RetryPolicy, SensorConfig};
pub use controls::SampleRate;
pub use device::{MotionSample, Mpu6050, Mpu6050Error};
pub use fusion::{ComplementaryFilter, GyroIntegrator, OrientationEstimator};
pub use integrator::Integrator;
pub use math::{EulerAngles, Matrix3, Quaternion, Vector3};
pub use navigation::{NavigationSample, Navigator, NavigatorConfig};
pub use sampling::{CancelFlag, SamplingLoop};
pub use storage::{CalibrationStore, StorageError};
pub use types::{AccelFullScale, DlpfSetting, GyroFullScale};

use crate::interface::I2cInterface;

/// Crea un nuevo dispositivo MPU6050 usando el bus I2C
pub fn new_i2c_device<I, D>(i2c: I, address: u8, delay: D) -> Mpu6050<I2cInterface<I>, D>
where
    I: I2c,
    D: DelayNs,
{
    let interface = I2cInterface::new(i2c, address);
    Mpu6050::new(interface, delay)
}
