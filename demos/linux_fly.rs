//! Navegación inercial en tiempo real: orientación, velocidad y posición
//!
//! Usa la calibración guardada (o calibra y la guarda si no existe), y
//! ejecuta el bucle de 5 ms hasta pulsar Enter o Ctrl+C.
//!
//! Para ejecutar: cargo run --example linux_fly --features linux [-- --matrix]

mod common;

use common::{init_logging, load_calibration, open_device, LinuxMpu6050};
use mpu6050_rs::{
    calibrate, CalibrationParameters, CalibrationStore, CancelFlag, ComplementaryFilter,
    GyroIntegrator, Navigator, NavigatorConfig, OrientationEstimator, SamplingLoop, SensorConfig,
    SystemTimeSource,
};
use std::error::Error;

/// Ciclos entre impresiones (1 s a 200 Hz)
const PRINT_EVERY: u64 = 200;

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let mut device = open_device(&SensorConfig::default())?;

    let store = CalibrationStore::default();
    if !load_calibration(&mut device, &store)? {
        println!("Sin calibración: deja el sensor quieto...");
        let offsets = calibrate(&mut device, &CalibrationParameters::default())?;
        store.save(&offsets)?;
    }

    let config =
        NavigatorConfig::default().with_range_deadzones(device.accel_range(), device.gyro_range());

    if std::env::args().any(|arg| arg == "--matrix") {
        fly(&mut device, Navigator::new(GyroIntegrator::new(), config))
    } else {
        fly(&mut device, Navigator::new(ComplementaryFilter::default(), config))
    }
}

fn fly<E: OrientationEstimator>(
    device: &mut LinuxMpu6050,
    mut navigator: Navigator<E>,
) -> Result<(), Box<dyn Error>> {
    let cancel = CancelFlag::new();
    cancel.register_sigint()?;
    let _stdin = cancel.watch_stdin();

    let mut sampling = SamplingLoop::new(SystemTimeSource::new(), cancel);
    println!("Pulsa Enter para detener");

    let mut tick: u64 = 0;
    let ticks = sampling.run(device, &mut navigator, |sample| {
        tick += 1;
        if tick % PRINT_EVERY == 0 {
            let angles = sample.orientation.to_euler().to_degrees();
            println!(
                "rpy = ({:7.2}, {:7.2}, {:7.2})°  v = ({:.3}, {:.3}, {:.3}) m/s  p = ({:.3}, {:.3}, {:.3}) m",
                angles.roll,
                angles.pitch,
                angles.yaw,
                sample.velocity.x,
                sample.velocity.y,
                sample.velocity.z,
                sample.position.x,
                sample.position.y,
                sample.position.z
            );
        }
    })?;

    println!("{} ciclos procesados", ticks);
    Ok(())
}
