use crate::bitfield::{BitfieldError, Field};
use crate::calibration::CalibrationOffset;
use crate::config::{RetryPolicy, SensorConfig};
use crate::conversion::{accel_raw_to_mss, be_i16_triplet, gyro_raw_to_dps, temp_raw_to_celsius};
use crate::interface::Interface;
use crate::math::Vector3;
use crate::register::{fields, registers, values};
use crate::types::{AccelFullScale, ClockSource, DlpfSetting, ExtSync, GyroFullScale};
use embedded_hal::delay::DelayNs;
use thiserror::Error;

/// Tiempo de espera tras un reset (ms)
const RESET_SETTLE_MS: u32 = 100;

pub struct Mpu6050<I, D> {
    pub(crate) interface: I,
    pub(crate) base_state: BaseState,
    pub(crate) delay: D,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Mpu6050Error {
    /// Fallo del bus en una operación de configuración
    #[error("error de interfaz: {0}")]
    Interface(String),
    /// Se agotaron los reintentos de lectura
    #[error("sensor no disponible tras {attempts} intentos: {last_error}")]
    SensorUnavailable { attempts: u32, last_error: String },
    /// Un campo contiene un valor sin símbolo asociado
    #[error("valor {raw:#04x} no válido en el registro {register:#04x}")]
    Decode { register: u8, raw: u8 },
    /// WHO_AM_I no corresponde a un MPU6050
    #[error("WHO_AM_I inesperado: {0:#04x}")]
    WhoAmIError(u8),
    #[error("parámetro inválido")]
    InvalidParameter,
}

impl Mpu6050Error {
    pub fn from_error<E: core::fmt::Debug>(error: E) -> Self {
        Mpu6050Error::Interface(format!("{:?}", error))
    }
}

impl From<BitfieldError> for Mpu6050Error {
    fn from(error: BitfieldError) -> Self {
        match error {
            BitfieldError::UnknownValue { register, raw } => Mpu6050Error::Decode { register, raw },
        }
    }
}

/// Estado base del dispositivo MPU6050
#[derive(Debug, Clone, Default)]
pub struct BaseState {
    pub accel_fullscale: AccelFullScale,
    pub gyro_fullscale: GyroFullScale,
    pub offsets: CalibrationOffset,
    pub retry: RetryPolicy,
}

/// Muestra completa leída en una sola ráfaga
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionSample {
    /// Aceleración corregida (m/s²)
    pub accel: Vector3,
    /// Temperatura (°C)
    pub temperature: f64,
    /// Velocidad angular corregida (°/s)
    pub gyro: Vector3,
}

impl<I: Clone, D: Clone> Clone for Mpu6050<I, D> {
    fn clone(&self) -> Self {
        Self {
            interface: self.interface.clone(),
            base_state: self.base_state.clone(),
            delay: self.delay.clone(),
        }
    }
}

impl<I, D> Mpu6050<I, D>
where
    I: Interface,
    D: DelayNs,
{
    /// Crea el driver
    ///
    /// No accede al bus; las escalas en caché son las de encendido hasta
    /// llamar a `configure` o `sync_ranges`.
    pub fn new(interface: I, delay: D) -> Self {
        Self {
            interface,
            base_state: BaseState::default(),
            delay,
        }
    }

    /// Sustituye la política de reintentos
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.base_state.retry = policy;
        self
    }

    /// Política de reintentos de las lecturas en ráfaga
    pub fn set_retry_policy(&mut self, policy: RetryPolicy) {
        self.base_state.retry = policy;
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.base_state.retry
    }

    /// Lee un registro
    pub fn read_reg(&mut self, reg: u8) -> Result<u8, Mpu6050Error> {
        let mut data = [0u8];
        self.interface
            .read_reg(reg, &mut data)
            .map_err(Mpu6050Error::from_error)?;
        Ok(data[0])
    }

    /// Lee varios registros consecutivos
    pub fn read_regs(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Mpu6050Error> {
        self.interface
            .read_reg(reg, data)
            .map_err(Mpu6050Error::from_error)
    }

    /// Escribe un registro
    pub fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Mpu6050Error> {
        self.interface
            .write_reg(reg, &[value])
            .map_err(Mpu6050Error::from_error)
    }

    /// Modifica bits específicos de un registro (lectura-modificación-escritura)
    pub fn modify_reg<F>(&mut self, reg: u8, f: F) -> Result<(), Mpu6050Error>
    where
        F: FnOnce(u8) -> u8,
    {
        let value = self.read_reg(reg)?;
        let new_value = f(value);
        self.write_reg(reg, new_value)
    }

    /// Lee un campo de bits del dispositivo
    pub fn get_field<F: Field>(&mut self, field: &F) -> Result<F::Value, Mpu6050Error> {
        let byte = self.read_reg(field.register())?;
        Ok(field.decode(byte)?)
    }

    /// Escribe un campo de bits conservando el resto del registro
    pub fn set_field<F: Field>(&mut self, field: &F, value: F::Value) -> Result<(), Mpu6050Error> {
        self.modify_reg(field.register(), |byte| field.encode(byte, value))
    }

    /// Lectura en ráfaga con reintentos según la política configurada
    fn read_regs_retrying(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Mpu6050Error> {
        let mut attempts: u32 = 0;
        loop {
            attempts = attempts.saturating_add(1);
            match self.interface.read_reg(reg, data) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    if !self.base_state.retry.allows_retry(attempts) {
                        log::error!("Lectura de {:#04x} abandonada tras {} intentos", reg, attempts);
                        return Err(Mpu6050Error::SensorUnavailable {
                            attempts,
                            last_error: format!("{:?}", e),
                        });
                    }
                    if attempts == 1 {
                        log::warn!("Fallo al leer {:#04x}, reintentando: {:?}", reg, e);
                    } else {
                        log::trace!("Reintento {} de lectura de {:#04x}: {:?}", attempts, reg, e);
                    }
                }
            }
        }
    }

    /// Reinicia el dispositivo y las rutas de señal
    ///
    /// Tras el reset el sensor vuelve a ±2 g y ±250 °/s; las escalas en caché
    /// se ajustan a esos valores.
    pub fn reset(&mut self) -> Result<(), Mpu6050Error> {
        self.set_field(&fields::DEVICE_RESET, true)?;
        self.base_state.accel_fullscale = AccelFullScale::default();
        self.base_state.gyro_fullscale = GyroFullScale::default();
        self.delay.delay_ms(RESET_SETTLE_MS);

        self.modify_reg(registers::SIGNAL_PATH_RESET, |val| {
            let val = fields::GYRO_RESET.encode(val, true);
            let val = fields::ACCEL_RESET.encode(val, true);
            fields::TEMP_RESET.encode(val, true)
        })?;
        self.delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }

    /// Saca al dispositivo del modo sleep
    pub fn enable(&mut self) -> Result<(), Mpu6050Error> {
        self.set_sleep(false)
    }

    /// Activa o desactiva el modo sleep
    pub fn set_sleep(&mut self, sleep: bool) -> Result<(), Mpu6050Error> {
        self.set_field(&fields::SLEEP, sleep)
    }

    /// Indica si el dispositivo está en modo sleep
    pub fn is_sleeping(&mut self) -> Result<bool, Mpu6050Error> {
        self.get_field(&fields::SLEEP)
    }

    /// Aplica una configuración completa
    pub fn configure(&mut self, config: &SensorConfig) -> Result<(), Mpu6050Error> {
        self.set_sample_rate_divisor(config.sample_rate_divisor)?;
        self.set_accel_range(config.accel_range)?;
        self.set_gyro_range(config.gyro_range)?;
        self.set_dlpf(config.dlpf)?;
        self.set_ext_sync(config.ext_sync)?;
        log::debug!(
            "Configuración aplicada: {:?} ({} Hz)",
            config,
            config.output_rate()
        );
        Ok(())
    }

    /// Reset, comprobación de WHO_AM_I, despertar y configuración por defecto
    pub fn initialize(&mut self) -> Result<(), Mpu6050Error> {
        self.initialize_with(&SensorConfig::default())
    }

    pub fn initialize_with(&mut self, config: &SensorConfig) -> Result<(), Mpu6050Error> {
        self.reset()?;

        let whoami = self.get_whoami()?;
        if whoami & values::WHO_AM_I_MASK != values::WHO_AM_I {
            return Err(Mpu6050Error::WhoAmIError(whoami));
        }

        self.enable()?;
        self.set_clock_source(ClockSource::PllXGyro)?;
        self.configure(config)?;
        log::info!("MPU6050 inicializado (WHO_AM_I = {:#04x})", whoami);
        Ok(())
    }

    /// Lee el identificador del dispositivo (WHO_AM_I)
    pub fn get_whoami(&mut self) -> Result<u8, Mpu6050Error> {
        self.read_reg(registers::WHO_AM_I)
    }

    /// Divisor de la frecuencia de muestreo (SMPLRT_DIV)
    pub fn set_sample_rate_divisor(&mut self, divisor: u8) -> Result<(), Mpu6050Error> {
        self.write_reg(registers::SMPLRT_DIV, divisor)
    }

    /// Lee el divisor de la frecuencia de muestreo
    pub fn get_sample_rate_divisor(&mut self) -> Result<u8, Mpu6050Error> {
        self.read_reg(registers::SMPLRT_DIV)
    }

    /// Configura la escala del acelerómetro y la guarda como escala activa
    pub fn set_accel_range(&mut self, range: AccelFullScale) -> Result<(), Mpu6050Error> {
        self.set_field(&fields::AFS_SEL, range)?;
        self.base_state.accel_fullscale = range;
        Ok(())
    }

    /// Lee la escala del acelerómetro configurada en el dispositivo
    pub fn get_accel_range(&mut self) -> Result<AccelFullScale, Mpu6050Error> {
        self.get_field(&fields::AFS_SEL)
    }

    /// Configura la escala del giroscopio y la guarda como escala activa
    pub fn set_gyro_range(&mut self, range: GyroFullScale) -> Result<(), Mpu6050Error> {
        self.set_field(&fields::FS_SEL, range)?;
        self.base_state.gyro_fullscale = range;
        Ok(())
    }

    /// Lee la escala del giroscopio configurada en el dispositivo
    pub fn get_gyro_range(&mut self) -> Result<GyroFullScale, Mpu6050Error> {
        self.get_field(&fields::FS_SEL)
    }

    /// Filtro paso bajo digital (DLPF_CFG)
    pub fn set_dlpf(&mut self, dlpf: DlpfSetting) -> Result<(), Mpu6050Error> {
        self.set_field(&fields::DLPF_CFG, dlpf)
    }

    /// Lee la configuración del filtro paso bajo
    pub fn get_dlpf(&mut self) -> Result<DlpfSetting, Mpu6050Error> {
        self.get_field(&fields::DLPF_CFG)
    }

    /// Sincronización externa (EXT_SYNC_SET)
    pub fn set_ext_sync(&mut self, ext_sync: ExtSync) -> Result<(), Mpu6050Error> {
        self.set_field(&fields::EXT_SYNC_SET, ext_sync)
    }

    /// Lee la configuración de sincronización externa
    pub fn get_ext_sync(&mut self) -> Result<ExtSync, Mpu6050Error> {
        self.get_field(&fields::EXT_SYNC_SET)
    }

    /// Lee las escalas del dispositivo y las guarda como escalas activas
    pub fn sync_ranges(&mut self) -> Result<(AccelFullScale, GyroFullScale), Mpu6050Error> {
        let accel = self.get_accel_range()?;
        let gyro = self.get_gyro_range()?;
        self.base_state.accel_fullscale = accel;
        self.base_state.gyro_fullscale = gyro;
        Ok((accel, gyro))
    }

    /// Escala activa del acelerómetro (sin acceder al bus)
    pub fn accel_range(&self) -> AccelFullScale {
        self.base_state.accel_fullscale
    }

    /// Escala activa del giroscopio (sin acceder al bus)
    pub fn gyro_range(&self) -> GyroFullScale {
        self.base_state.gyro_fullscale
    }

    /// Offsets de calibración activos
    pub fn offsets(&self) -> CalibrationOffset {
        self.base_state.offsets
    }

    /// Sustituye los offsets de calibración
    pub fn set_offsets(&mut self, offsets: CalibrationOffset) {
        self.base_state.offsets = offsets;
    }

    /// Elimina los offsets de calibración
    pub fn clear_offsets(&mut self) {
        self.base_state.offsets = CalibrationOffset::default();
    }

    /// Lee los valores crudos del acelerómetro (x, y, z)
    pub fn accel_read_hw_reg_data(&mut self) -> Result<[i16; 3], Mpu6050Error> {
        let mut accel_data = [0u8; 6];
        self.read_regs_retrying(registers::ACCEL_XOUT_H, &mut accel_data)?;
        Ok(be_i16_triplet(&accel_data))
    }

    /// Lee los valores crudos del giroscopio (x, y, z)
    pub fn gyro_read_hw_reg_data(&mut self) -> Result<[i16; 3], Mpu6050Error> {
        let mut gyro_data = [0u8; 6];
        self.read_regs_retrying(registers::GYRO_XOUT_H, &mut gyro_data)?;
        Ok(be_i16_triplet(&gyro_data))
    }

    /// Lee el valor crudo de temperatura
    pub fn temperature_read_hw_reg_data(&mut self) -> Result<i16, Mpu6050Error> {
        let mut temp_data = [0u8; 2];
        self.read_regs_retrying(registers::TEMP_OUT_H, &mut temp_data)?;
        Ok(i16::from_be_bytes(temp_data))
    }

    /// Lee la ráfaga completa de 14 bytes (acelerómetro, temperatura, giroscopio)
    pub fn motion_read_hw_reg_data(
        &mut self,
    ) -> Result<[u8; registers::MOTION_BURST_LEN], Mpu6050Error> {
        let mut data = [0u8; registers::MOTION_BURST_LEN];
        self.read_regs_retrying(registers::ACCEL_XOUT_H, &mut data)?;
        Ok(data)
    }

    fn correct_accel(&self, raw: [i16; 3]) -> Vector3 {
        accel_raw_to_mss(raw, self.base_state.accel_fullscale).sub(self.base_state.offsets.accel)
    }

    fn correct_gyro(&self, raw: [i16; 3]) -> Vector3 {
        gyro_raw_to_dps(raw, self.base_state.gyro_fullscale).sub(self.base_state.offsets.gyro)
    }

    /// Aceleración corregida en m/s²
    pub fn read_accelerometer(&mut self) -> Result<Vector3, Mpu6050Error> {
        let raw = self.accel_read_hw_reg_data()?;
        Ok(self.correct_accel(raw))
    }

    /// Velocidad angular corregida en grados/segundo
    pub fn read_gyroscope(&mut self) -> Result<Vector3, Mpu6050Error> {
        let raw = self.gyro_read_hw_reg_data()?;
        Ok(self.correct_gyro(raw))
    }

    /// Temperatura en grados Celsius
    pub fn read_temperature(&mut self) -> Result<f64, Mpu6050Error> {
        let raw = self.temperature_read_hw_reg_data()?;
        Ok(temp_raw_to_celsius(raw))
    }

    /// Acelerómetro y giroscopio de una misma ráfaga
    pub fn read_both(&mut self) -> Result<(Vector3, Vector3), Mpu6050Error> {
        let sample = self.read_all()?;
        Ok((sample.accel, sample.gyro))
    }

    /// Acelerómetro, temperatura y giroscopio de una misma ráfaga
    pub fn read_all(&mut self) -> Result<MotionSample, Mpu6050Error> {
        let data = self.motion_read_hw_reg_data()?;

        let accel = [data[0], data[1], data[2], data[3], data[4], data[5]];
        let temp = i16::from_be_bytes([data[6], data[7]]);
        let gyro = [data[8], data[9], data[10], data[11], data[12], data[13]];

        let sample = MotionSample {
            accel: self.correct_accel(be_i16_triplet(&accel)),
            temperature: temp_raw_to_celsius(temp),
            gyro: self.correct_gyro(be_i16_triplet(&gyro)),
        };
        log::trace!("Muestra: {:?}", sample);
        Ok(sample)
    }

    /// Espera bloqueante usando el retardo del dispositivo
    pub fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    /// Consume el driver y devuelve la interfaz y el retardo
    pub fn release(self) -> (I, D) {
        (self.interface, self.delay)
    }
}
