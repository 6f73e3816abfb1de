//! Calibración del acelerómetro y giroscopio en reposo
//!
//! Con el sensor quieto se toman muestras a intervalos fijos, se descartan
//! las primeras (estabilización) y se promedian las siguientes. El offset del
//! acelerómetro es la media menos la gravedad esperada; el del giroscopio es
//! la media directamente. El procedimiento no detecta movimiento: si el
//! sensor se mueve durante la calibración los offsets serán erróneos.

use crate::base::ImuSource;
use crate::device::{Mpu6050, Mpu6050Error};
use crate::interface::Interface;
use crate::math::Vector3;
use crate::types::gravity::GRAVITY_MSS;
use embedded_hal::delay::DelayNs;
use serde::{Deserialize, Serialize};

/// Muestras descartadas antes de acumular
pub const WARMUP_ITERATIONS: usize = 100;
/// Muestras acumuladas por defecto
pub const ITERATIONS: usize = 10_000;
/// Periodo de muestreo por defecto (µs)
pub const PERIOD_US: u32 = 2_000;

/// Offsets de calibración restados a cada lectura
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalibrationOffset {
    /// Offset del acelerómetro (m/s²)
    #[serde(rename = "accelOffset")]
    pub accel: Vector3,
    /// Offset del giroscopio (°/s)
    #[serde(rename = "gyroOffset")]
    pub gyro: Vector3,
}

impl CalibrationOffset {
    pub const fn new(accel: Vector3, gyro: Vector3) -> Self {
        Self { accel, gyro }
    }
}

/// Parámetros del procedimiento de calibración
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationParameters {
    /// Número de muestras promediadas
    pub samples: usize,
    /// Número de muestras descartadas al inicio
    pub warmup: usize,
    /// Espera entre muestras (µs)
    pub period_us: u32,
    /// Gravedad esperada en el marco del sensor (m/s²)
    pub gravity: Vector3,
}

impl Default for CalibrationParameters {
    fn default() -> Self {
        Self {
            samples: ITERATIONS,
            warmup: WARMUP_ITERATIONS,
            period_us: PERIOD_US,
            gravity: Vector3::new(0.0, 0.0, GRAVITY_MSS),
        }
    }
}

impl CalibrationParameters {
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    pub fn with_period_us(mut self, period_us: u32) -> Self {
        self.period_us = period_us;
        self
    }

    pub fn with_gravity(mut self, gravity: Vector3) -> Self {
        self.gravity = gravity;
        self
    }
}

/// Acumulador de medias
#[derive(Debug, Clone, Copy, Default)]
struct MeanAccumulator {
    accel: Vector3,
    gyro: Vector3,
    count: usize,
}

impl MeanAccumulator {
    fn add(&mut self, accel: Vector3, gyro: Vector3) {
        self.accel = self.accel.add(accel);
        self.gyro = self.gyro.add(gyro);
        self.count += 1;
    }

    fn means(&self) -> (Vector3, Vector3) {
        if self.count == 0 {
            return (Vector3::ZERO, Vector3::ZERO);
        }
        let n = self.count as f64;
        (self.accel.scale(1.0 / n), self.gyro.scale(1.0 / n))
    }
}

/// Calcula los offsets a partir de una fuente de muestras en reposo
///
/// No modifica la fuente: las muestras se toman tal y como llegan.
pub fn collect_offsets<S: ImuSource>(
    source: &mut S,
    parameters: &CalibrationParameters,
) -> Result<CalibrationOffset, Mpu6050Error> {
    if parameters.samples == 0 {
        return Err(Mpu6050Error::InvalidParameter);
    }

    for _ in 0..parameters.warmup {
        source.read_motion()?;
        source.wait_us(parameters.period_us);
    }

    let mut accumulator = MeanAccumulator::default();
    for _ in 0..parameters.samples {
        let (accel, gyro) = source.read_motion()?;
        accumulator.add(accel, gyro);
        source.wait_us(parameters.period_us);
    }

    let (accel_mean, gyro_mean) = accumulator.means();
    Ok(CalibrationOffset::new(accel_mean.sub(parameters.gravity), gyro_mean))
}

/// Calibra el acelerómetro y giroscopio e instala los offsets en el driver
///
/// El sensor debe estar quieto durante toda la calibración.
pub fn calibrate<I, D>(
    device: &mut Mpu6050<I, D>,
    parameters: &CalibrationParameters,
) -> Result<CalibrationOffset, Mpu6050Error>
where
    I: Interface,
    D: DelayNs,
{
    log::info!(
        "Calibrando con {} muestras ({} descartadas)...",
        parameters.samples,
        parameters.warmup
    );
    let previous = device.offsets();
    device.clear_offsets();

    let offsets = match collect_offsets(device, parameters) {
        Ok(offsets) => offsets,
        Err(e) => {
            // los offsets anteriores siguen en vigor
            device.set_offsets(previous);
            log::warn!("Calibración interrumpida: {}", e);
            return Err(e);
        }
    };
    device.set_offsets(offsets);

    log::info!("Offset acelerómetro: {:?}", offsets.accel);
    log::info!("Offset giroscopio: {:?}", offsets.gyro);
    Ok(offsets)
}
