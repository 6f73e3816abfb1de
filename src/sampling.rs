//! Bucle de muestreo de periodo fijo con cancelación cooperativa

use crate::base::{ImuSource, TimeSource};
use crate::device::Mpu6050Error;
use crate::fusion::OrientationEstimator;
use crate::navigation::{NavigationSample, Navigator};
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Periodo por defecto del bucle (µs)
pub const DEFAULT_PERIOD_US: u64 = 5_000;

/// Bandera de cancelación compartida entre hilos
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Booleano subyacente, para registrarlo en manejadores de señales
    pub fn as_atomic(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Cancela al recibir SIGINT (Ctrl+C)
    pub fn register_sigint(&self) -> std::io::Result<signal_hook::SigId> {
        signal_hook::flag::register(signal_hook::consts::SIGINT, self.as_atomic())
    }

    /// Lanza un hilo que cancela al leer una línea de la entrada estándar
    ///
    /// Una entrada cerrada (EOF, `/dev/null`) no cancela; queda SIGINT.
    pub fn watch_stdin(&self) -> JoinHandle<()> {
        let flag = self.clone();
        std::thread::spawn(move || {
            flag.cancel_on_line(std::io::stdin().lock());
        })
    }

    /// Cancela si `reader` entrega una línea; devuelve si se canceló
    fn cancel_on_line<R: BufRead>(&self, mut reader: R) -> bool {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(n) if n > 0 => {
                log::debug!("Entrada recibida, deteniendo el bucle");
                self.cancel();
                true
            }
            Ok(_) => {
                log::debug!("Entrada estándar cerrada, se ignora");
                false
            }
            Err(e) => {
                log::warn!("Error leyendo stdin: {}", e);
                false
            }
        }
    }
}

/// Bucle de periodo fijo que alimenta un `Navigator`
pub struct SamplingLoop<T> {
    time: T,
    period_us: u64,
    cancel: CancelFlag,
    max_ticks: Option<u64>,
}

impl<T: TimeSource> SamplingLoop<T> {
    pub fn new(time: T, cancel: CancelFlag) -> Self {
        Self {
            time,
            period_us: DEFAULT_PERIOD_US,
            cancel,
            max_ticks: None,
        }
    }

    pub fn with_period_us(mut self, period_us: u64) -> Self {
        self.period_us = period_us;
        self
    }

    /// Limita el número de ciclos (sin límite por defecto)
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    pub fn period_us(&self) -> u64 {
        self.period_us
    }

    /// Ejecuta el bucle hasta la cancelación o hasta `max_ticks`
    ///
    /// `dt` de cada ciclo es el tiempo real transcurrido desde el anterior.
    /// Devuelve el número de ciclos procesados o el primer error del sensor.
    pub fn run<S, E, F>(
        &mut self,
        source: &mut S,
        navigator: &mut Navigator<E>,
        mut sink: F,
    ) -> Result<u64, Mpu6050Error>
    where
        S: ImuSource,
        E: OrientationEstimator,
        F: FnMut(&NavigationSample),
    {
        let mut ticks: u64 = 0;
        let mut last = self.time.get_timestamp_us();
        log::info!("Bucle de muestreo iniciado (periodo {} µs)", self.period_us);

        while !self.cancel.is_cancelled() {
            if self.max_ticks.map_or(false, |max| ticks >= max) {
                break;
            }

            let now = self.time.get_timestamp_us();
            let elapsed = now.saturating_sub(last);
            if elapsed < self.period_us {
                self.time.sleep_us(self.period_us - elapsed);
                continue;
            }
            last = now;

            let (accel, gyro) = source.read_motion()?;
            let sample = navigator.update(accel, gyro, elapsed as f64 / 1_000_000.0);
            sink(&sample);
            ticks += 1;
        }

        log::info!("Bucle de muestreo detenido tras {} ciclos", ticks);
        Ok(ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fusion::GyroIntegrator;
    use crate::math::Vector3;
    use crate::navigation::NavigatorConfig;
    use crate::types::gravity::GRAVITY_MSS;
    use std::cell::Cell;

    /// Reloj simulado que avanza al dormir
    struct FakeClock {
        now: Cell<u64>,
    }

    impl TimeSource for FakeClock {
        fn get_timestamp_us(&self) -> u64 {
            self.now.get()
        }

        fn sleep_us(&self, us: u64) {
            self.now.set(self.now.get() + us);
        }
    }

    struct Still {
        reads: u32,
        fail_after: Option<u32>,
    }

    impl ImuSource for Still {
        fn read_motion(&mut self) -> Result<(Vector3, Vector3), Mpu6050Error> {
            if self.fail_after.map_or(false, |n| self.reads >= n) {
                return Err(Mpu6050Error::SensorUnavailable {
                    attempts: 1,
                    last_error: "bus".into(),
                });
            }
            self.reads += 1;
            Ok((Vector3::new(0.0, 0.0, GRAVITY_MSS + 1.0), Vector3::ZERO))
        }

        fn wait_us(&mut self, _us: u32) {}
    }

    fn clock() -> FakeClock {
        FakeClock { now: Cell::new(1_000) }
    }

    #[test]
    fn test_fixed_period_ticks() {
        let mut source = Still { reads: 0, fail_after: None };
        let mut nav = Navigator::new(GyroIntegrator::new(), NavigatorConfig::default());
        let mut dts = Vec::new();
        let mut sampling = SamplingLoop::new(clock(), CancelFlag::new()).with_max_ticks(10);

        let ticks = sampling.run(&mut source, &mut nav, |s| dts.push(s.dt)).unwrap();

        assert_eq!(ticks, 10);
        assert_eq!(source.reads, 10);
        assert!(dts.iter().all(|dt| (dt - 0.005).abs() < 1e-12));
    }

    #[test]
    fn test_stops_on_cancel() {
        let mut source = Still { reads: 0, fail_after: None };
        let mut nav = Navigator::new(GyroIntegrator::new(), NavigatorConfig::default());
        let cancel = CancelFlag::new();
        let mut sampling = SamplingLoop::new(clock(), cancel.clone());

        let mut seen = 0;
        let ticks = sampling
            .run(&mut source, &mut nav, |_| {
                seen += 1;
                if seen == 3 {
                    cancel.cancel();
                }
            })
            .unwrap();

        assert_eq!(ticks, 3);
        assert!(sampling.cancel_flag().is_cancelled());
    }

    #[test]
    fn test_already_cancelled_does_nothing() {
        let mut source = Still { reads: 0, fail_after: None };
        let mut nav = Navigator::new(GyroIntegrator::new(), NavigatorConfig::default());
        let cancel = CancelFlag::new();
        cancel.cancel();
        let mut sampling = SamplingLoop::new(clock(), cancel);
        assert_eq!(sampling.run(&mut source, &mut nav, |_| {}).unwrap(), 0);
        assert_eq!(source.reads, 0);
    }

    #[test]
    fn test_line_on_stdin_cancels() {
        let flag = CancelFlag::new();
        assert!(flag.cancel_on_line(std::io::Cursor::new("\n")));
        assert!(flag.is_cancelled());
    }

    #[test]
    fn test_closed_stdin_does_not_cancel() {
        let flag = CancelFlag::new();
        assert!(!flag.cancel_on_line(std::io::Cursor::new("")));
        assert!(!flag.is_cancelled());
    }

    #[test]
    fn test_sensor_error_stops_loop() {
        let mut source = Still { reads: 0, fail_after: Some(2) };
        let mut nav = Navigator::new(GyroIntegrator::new(), NavigatorConfig::default());
        let mut sampling = SamplingLoop::new(clock(), CancelFlag::new());
        let result = sampling.run(&mut source, &mut nav, |_| {});
        assert!(matches!(result, Err(Mpu6050Error::SensorUnavailable { .. })));
        assert_eq!(source.reads, 2);
    }
}
