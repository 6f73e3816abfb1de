//! Lectura básica del MPU6050 en Linux
//!
//! Para ejecutar: cargo run --example linux_basic --features linux [-- /dev/i2c-N]

mod common;

use common::{handle_error, init_logging, load_calibration, open_device};
use mpu6050_rs::{AccelFullScale, CalibrationStore, GyroFullScale, SampleRate, SensorConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() {
    init_logging();
    println!("MPU6050 - Ejemplo básico");

    // Flag para controlar la ejecución del programa
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        println!("\nDeteniendo el programa...");
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error al configurar el manejador de Ctrl+C");

    let config = SensorConfig::default()
        .with_accel_range(AccelFullScale::Fs4G)
        .with_gyro_range(GyroFullScale::Fs250Dps)
        .with_sample_rate_divisor(SampleRate::Hz100.to_divider());

    let mut device = match open_device(&config) {
        Ok(device) => device,
        Err(e) => {
            eprintln!("Error al inicializar el dispositivo: {}", e);
            return;
        }
    };

    match load_calibration(&mut device, &CalibrationStore::default()) {
        Ok(true) => println!("Calibración cargada"),
        Ok(false) => println!("Sin calibración guardada, lecturas en bruto"),
        Err(e) => eprintln!("Error al cargar la calibración: {}", e),
    }

    println!(
        "Tasa de muestreo: {:.1} Hz",
        handle_error(device.get_sample_rate())
    );
    println!("Leyendo datos. Presiona Ctrl+C para detener...");

    while running.load(Ordering::SeqCst) {
        match device.read_all() {
            Ok(sample) => {
                let a = sample.accel;
                let g = sample.gyro;
                println!("Aceleración: x={:.3}, y={:.3}, z={:.3} m/s²", a.x, a.y, a.z);
                println!("Giroscopio: x={:.2}°/s, y={:.2}°/s, z={:.2}°/s", g.x, g.y, g.z);
                println!("Temperatura: {:.2}°C", sample.temperature);
            }
            Err(e) => eprintln!("Error al leer el sensor: {}", e),
        }
        println!("-------------------");
        thread::sleep(Duration::from_millis(200));
    }

    println!("Ejemplo finalizado");
}
