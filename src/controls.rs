//! Controles básicos para el sensor MPU6050: interrupciones, energía y reloj

use crate::device::{Mpu6050, Mpu6050Error};
use crate::interface::Interface;
use crate::register::fields;
use crate::types::{ClockSource, DlpfSetting, WakeControl};
use embedded_hal::delay::DelayNs;

/// Configuración de la tasa de muestreo con el DLPF activo (base 1 kHz)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleRate {
    /// 1000Hz (divider = 0)
    Hz1000,
    /// 500Hz (divider = 1)
    Hz500,
    /// 250Hz (divider = 3)
    Hz250,
    /// 200Hz (divider = 4) - Ciclo de 5 ms del bucle de navegación
    Hz200,
    /// 100Hz (divider = 9)
    Hz100,
    /// 50Hz (divider = 19)
    Hz50,
    /// Tasa personalizada (especificar divider)
    Custom(u8),
}

impl SampleRate {
    /// Convierte la enumeración a un valor de divider
    pub fn to_divider(&self) -> u8 {
        match self {
            SampleRate::Hz1000 => 0,
            SampleRate::Hz500 => 1,
            SampleRate::Hz250 => 3,
            SampleRate::Hz200 => 4,
            SampleRate::Hz100 => 9,
            SampleRate::Hz50 => 19,
            SampleRate::Custom(div) => *div,
        }
    }

    /// Calcula la frecuencia real en Hz para una configuración del DLPF
    pub fn to_frequency(&self, dlpf: DlpfSetting) -> f64 {
        dlpf.base_sample_rate() / (1.0 + self.to_divider() as f64)
    }
}

/// Ejes que pueden ponerse en standby de forma individual
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandbyAxis {
    AccelX,
    AccelY,
    AccelZ,
    GyroX,
    GyroY,
    GyroZ,
}

impl StandbyAxis {
    fn field(&self) -> crate::bitfield::BoolField {
        match self {
            StandbyAxis::AccelX => fields::STBY_XA,
            StandbyAxis::AccelY => fields::STBY_YA,
            StandbyAxis::AccelZ => fields::STBY_ZA,
            StandbyAxis::GyroX => fields::STBY_XG,
            StandbyAxis::GyroY => fields::STBY_YG,
            StandbyAxis::GyroZ => fields::STBY_ZG,
        }
    }
}

/// Implementaciones de control básico para MPU6050
impl<I, D> Mpu6050<I, D>
where
    I: Interface,
    D: DelayNs,
{
    /// Configura la tasa de muestreo
    pub fn set_sample_rate(&mut self, rate: SampleRate) -> Result<(), Mpu6050Error> {
        self.set_sample_rate_divisor(rate.to_divider())
    }

    /// Obtiene la tasa de muestreo actual en Hz
    pub fn get_sample_rate(&mut self) -> Result<f64, Mpu6050Error> {
        let divider = self.get_sample_rate_divisor()?;
        let dlpf = self.get_dlpf()?;
        Ok(SampleRate::Custom(divider).to_frequency(dlpf))
    }

    /// Configura la interrupción de datos listos (data ready)
    pub fn configure_data_ready_interrupt(&mut self, enable: bool) -> Result<(), Mpu6050Error> {
        self.set_field(&fields::DATA_RDY_EN, enable)
    }

    pub fn is_data_ready_interrupt_enabled(&mut self) -> Result<bool, Mpu6050Error> {
        self.get_field(&fields::DATA_RDY_EN)
    }

    /// Configura la interrupción de desbordamiento del FIFO
    pub fn configure_fifo_overflow_interrupt(&mut self, enable: bool) -> Result<(), Mpu6050Error> {
        self.set_field(&fields::FIFO_OFLOW_EN, enable)
    }

    pub fn is_fifo_overflow_interrupt_enabled(&mut self) -> Result<bool, Mpu6050Error> {
        self.get_field(&fields::FIFO_OFLOW_EN)
    }

    /// Configura la interrupción del maestro I2C
    pub fn configure_i2c_master_interrupt(&mut self, enable: bool) -> Result<(), Mpu6050Error> {
        self.set_field(&fields::I2C_MST_INT_EN, enable)
    }

    pub fn is_i2c_master_interrupt_enabled(&mut self) -> Result<bool, Mpu6050Error> {
        self.get_field(&fields::I2C_MST_INT_EN)
    }

    /// Activa el modo ciclo (despierta a la frecuencia de `set_wake_control`)
    pub fn set_cycle(&mut self, cycle: bool) -> Result<(), Mpu6050Error> {
        self.set_field(&fields::CYCLE, cycle)
    }

    pub fn get_cycle(&mut self) -> Result<bool, Mpu6050Error> {
        self.get_field(&fields::CYCLE)
    }

    /// Desactiva el sensor de temperatura
    pub fn set_thermometer_disabled(&mut self, disabled: bool) -> Result<(), Mpu6050Error> {
        self.set_field(&fields::TEMP_DIS, disabled)
    }

    pub fn is_thermometer_disabled(&mut self) -> Result<bool, Mpu6050Error> {
        self.get_field(&fields::TEMP_DIS)
    }

    pub fn set_clock_source(&mut self, source: ClockSource) -> Result<(), Mpu6050Error> {
        self.set_field(&fields::CLKSEL, source)
    }

    pub fn get_clock_source(&mut self) -> Result<ClockSource, Mpu6050Error> {
        self.get_field(&fields::CLKSEL)
    }

    /// Frecuencia de despertar en modo ciclo
    pub fn set_wake_control(&mut self, wake: WakeControl) -> Result<(), Mpu6050Error> {
        self.set_field(&fields::LP_WAKE_CTRL, wake)
    }

    pub fn get_wake_control(&mut self) -> Result<WakeControl, Mpu6050Error> {
        self.get_field(&fields::LP_WAKE_CTRL)
    }

    /// Pone un eje en standby o lo reactiva
    pub fn set_standby(&mut self, axis: StandbyAxis, standby: bool) -> Result<(), Mpu6050Error> {
        self.set_field(&axis.field(), standby)
    }

    pub fn is_standby(&mut self, axis: StandbyAxis) -> Result<bool, Mpu6050Error> {
        self.get_field(&axis.field())
    }
}
