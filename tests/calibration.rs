//! Calibración completa sobre el driver simulado

mod common;

use common::mock_device;
use mpu6050_rs::types::gravity::GRAVITY_MSS;
use mpu6050_rs::{calibrate, CalibrationOffset, CalibrationParameters, Mpu6050Error, Vector3};

#[test]
fn test_calibration_centers_readings() {
    let (mut device, interface, delay) = mock_device();
    interface.set_accel_raw([120, -80, 16384]);
    interface.set_gyro_raw([10, -5, 3]);

    let params = CalibrationParameters::default()
        .with_samples(200)
        .with_warmup(10);
    let offsets = calibrate(&mut device, &params).unwrap();

    assert_eq!(device.offsets(), offsets);
    assert!(offsets.gyro.x > 0.0 && offsets.gyro.y < 0.0);
    assert_eq!(interface.read_count(), 210);
    assert_eq!(delay.elapsed_ns.get(), 210 * 2_000_000);

    let (accel, gyro) = device.read_both().unwrap();
    assert!(accel.sub(Vector3::new(0.0, 0.0, GRAVITY_MSS)).length() < 1e-9);
    assert!(gyro.length() < 1e-9);
}

#[test]
fn test_calibration_ignores_previous_offsets() {
    let (mut device, interface, _) = mock_device();
    interface.set_accel_raw([0, 0, 16384]);
    device.set_offsets(CalibrationOffset::new(
        Vector3::new(100.0, 100.0, 100.0),
        Vector3::new(5.0, 5.0, 5.0),
    ));

    let params = CalibrationParameters::default().with_samples(20).with_warmup(0);
    let offsets = calibrate(&mut device, &params).unwrap();

    assert_eq!(offsets.gyro, Vector3::ZERO);
    assert!(offsets.accel.z.abs() < 1e-3);
}

#[test]
fn test_calibration_sideways_gravity() {
    let (mut device, interface, _) = mock_device();
    interface.set_accel_raw([16384, 0, 0]);

    let params = CalibrationParameters::default()
        .with_samples(10)
        .with_warmup(0)
        .with_gravity(Vector3::new(GRAVITY_MSS, 0.0, 0.0));
    let offsets = calibrate(&mut device, &params).unwrap();

    assert!(offsets.accel.length() < 1e-3);
}

#[test]
fn test_calibration_propagates_sensor_failure() {
    let (device, interface, _) = mock_device();
    let mut device = device.with_retry_policy(mpu6050_rs::RetryPolicy::Bounded { max_attempts: 2 });
    interface.fail_next_reads(5);

    let params = CalibrationParameters::default().with_samples(10).with_warmup(0);
    let result = calibrate(&mut device, &params);

    assert!(matches!(
        result,
        Err(Mpu6050Error::SensorUnavailable { attempts: 2, .. })
    ));
    assert_eq!(device.offsets(), CalibrationOffset::default());
}

#[test]
fn test_failed_calibration_keeps_previous_offsets() {
    let (device, interface, _) = mock_device();
    let mut device = device.with_retry_policy(mpu6050_rs::RetryPolicy::Bounded { max_attempts: 2 });
    let previous = CalibrationOffset::new(Vector3::new(0.1, 0.2, 0.3), Vector3::new(1.0, 2.0, 3.0));
    device.set_offsets(previous);
    interface.fail_next_reads(5);

    let params = CalibrationParameters::default().with_samples(10).with_warmup(0);
    assert!(calibrate(&mut device, &params).is_err());

    assert_eq!(device.offsets(), previous);
}

#[test]
fn test_zero_samples_is_invalid() {
    let (mut device, _, _) = mock_device();
    let params = CalibrationParameters::default().with_samples(0);
    assert_eq!(
        calibrate(&mut device, &params),
        Err(Mpu6050Error::InvalidParameter)
    );
}
