//! Funcionalidades y traits base para módulos del sensor

use crate::device::{Mpu6050, Mpu6050Error};
use crate::interface::Interface;
use crate::math::Vector3;
use embedded_hal::delay::DelayNs;
use std::time::{Duration, Instant};

/// Trait para obtener un timestamp monotónico en microsegundos y esperar.
/// Permite sustituir el reloj del sistema por uno simulado en las pruebas.
pub trait TimeSource {
    /// Retorna el timestamp (en microsegundos)
    fn get_timestamp_us(&self) -> u64;

    /// Bloquea durante `us` microsegundos
    fn sleep_us(&self, us: u64);
}

/// Implementación por defecto usando el reloj monotónico del sistema.
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn get_timestamp_us(&self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }

    fn sleep_us(&self, us: u64) {
        std::thread::sleep(Duration::from_micros(us));
    }
}

/// Fuente de muestras inerciales corregidas
///
/// La implementa el driver y cualquier fuente sintética usada en pruebas.
pub trait ImuSource {
    /// Devuelve `(aceleración en m/s², velocidad angular en °/s)`
    fn read_motion(&mut self) -> Result<(Vector3, Vector3), Mpu6050Error>;

    /// Espera bloqueante entre muestras
    fn wait_us(&mut self, us: u32);
}

impl<I, D> ImuSource for Mpu6050<I, D>
where
    I: Interface,
    D: DelayNs,
{
    fn read_motion(&mut self) -> Result<(Vector3, Vector3), Mpu6050Error> {
        self.read_both()
    }

    fn wait_us(&mut self, us: u32) {
        self.delay_us(us);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_time_source_is_monotonic() {
        let ts = SystemTimeSource::new();
        let t0 = ts.get_timestamp_us();
        ts.sleep_us(2_000);
        let t1 = ts.get_timestamp_us();
        assert!(t1 >= t0 + 2_000);
    }
}
