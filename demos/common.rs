//! Utilidades comunes para los ejemplos

#![allow(dead_code)]

use linux_embedded_hal::{Delay, I2cdev};
use mpu6050_rs::interface::I2cInterface;
use mpu6050_rs::register::address;
use mpu6050_rs::{CalibrationStore, Mpu6050, Mpu6050Error, SensorConfig};
use std::error::Error;

/// Bus I2C por defecto en una Raspberry Pi
pub const I2C_BUS: &str = "/dev/i2c-1";

pub type LinuxMpu6050 = Mpu6050<I2cInterface<I2cdev>, Delay>;

/// Inicializa env_logger con nivel `info` salvo que RUST_LOG diga otra cosa
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Abre el bus (primer argumento o `I2C_BUS`) e inicializa el sensor
pub fn open_device(config: &SensorConfig) -> Result<LinuxMpu6050, Box<dyn Error>> {
    let bus = std::env::args()
        .skip(1)
        .find(|arg| arg.starts_with("/dev/"))
        .unwrap_or_else(|| I2C_BUS.to_string());

    let i2c = I2cdev::new(&bus)?;
    let mut device = mpu6050_rs::new_i2c_device(i2c, address::DEFAULT, Delay);
    device.initialize_with(config)?;
    log::info!("Sensor listo en {} ({:.0} Hz)", bus, config.output_rate());
    Ok(device)
}

/// Instala la calibración guardada; devuelve `false` si no había ninguna
pub fn load_calibration(
    device: &mut LinuxMpu6050,
    store: &CalibrationStore,
) -> Result<bool, Box<dyn Error>> {
    match store.load()? {
        Some(offsets) => {
            device.set_offsets(offsets);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Helper para manejar errores en los ejemplos
pub fn handle_error<T>(result: Result<T, Mpu6050Error>) -> T {
    match result {
        Ok(val) => val,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
