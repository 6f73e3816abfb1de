//! Calibra el sensor en reposo y guarda los offsets en mpu6050config.json
//!
//! Para ejecutar: cargo run --example linux_calibrate --features linux

mod common;

use common::{init_logging, open_device};
use mpu6050_rs::{calibrate, CalibrationParameters, CalibrationStore, SensorConfig};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let config = SensorConfig::default();
    let mut device = open_device(&config)?;

    let parameters = CalibrationParameters::default();
    let seconds = (parameters.samples + parameters.warmup) as f64 * parameters.period_us as f64 / 1e6;
    println!("Deja el sensor quieto y nivelado (~{:.0} s)...", seconds);

    let offsets = calibrate(&mut device, &parameters)?;

    let store = CalibrationStore::default();
    store.save(&offsets)?;

    let (accel, gyro) = device.read_both()?;
    println!("Guardado en {}", store.path().display());
    println!("Lectura corregida: a = {:?}, w = {:?}", accel, gyro);
    Ok(())
}
