//! Estructuras de configuración del sensor, de los reintentos de bus y de la fusión

use crate::types::{AccelFullScale, DlpfSetting, ExtSync, GyroFullScale};

/// Configuración del sensor aplicada por `Mpu6050::configure`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorConfig {
    /// Divisor de la frecuencia de muestreo (SMPLRT_DIV)
    pub sample_rate_divisor: u8,
    pub accel_range: AccelFullScale,
    pub gyro_range: GyroFullScale,
    pub dlpf: DlpfSetting,
    pub ext_sync: ExtSync,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            sample_rate_divisor: 0,
            accel_range: AccelFullScale::Fs2G,
            gyro_range: GyroFullScale::Fs2000Dps,
            dlpf: DlpfSetting::Lp184Hz,
            ext_sync: ExtSync::Disabled,
        }
    }
}

impl SensorConfig {
    pub fn with_sample_rate_divisor(mut self, divisor: u8) -> Self {
        self.sample_rate_divisor = divisor;
        self
    }

    pub fn with_accel_range(mut self, range: AccelFullScale) -> Self {
        self.accel_range = range;
        self
    }

    pub fn with_gyro_range(mut self, range: GyroFullScale) -> Self {
        self.gyro_range = range;
        self
    }

    pub fn with_dlpf(mut self, dlpf: DlpfSetting) -> Self {
        self.dlpf = dlpf;
        self
    }

    pub fn with_ext_sync(mut self, ext_sync: ExtSync) -> Self {
        self.ext_sync = ext_sync;
        self
    }

    /// Frecuencia de salida en Hz: base / (1 + divisor)
    pub fn output_rate(&self) -> f64 {
        self.dlpf.base_sample_rate() / (1.0 + self.sample_rate_divisor as f64)
    }
}

/// Política de reintentos para las lecturas de muestras
///
/// Las lecturas fallidas se reintentan de inmediato. `Unbounded` no se rinde
/// nunca y bloquea el bucle de muestreo mientras el bus siga fallando.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Como máximo `max_attempts` intentos (incluido el primero)
    Bounded { max_attempts: u32 },
    /// Reintenta indefinidamente
    Unbounded,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::Bounded { max_attempts: 100 }
    }
}

impl RetryPolicy {
    /// Indica si se permite otro intento tras `attempts` intentos fallidos
    pub fn allows_retry(&self, attempts: u32) -> bool {
        match self {
            RetryPolicy::Bounded { max_attempts } => attempts < *max_attempts,
            RetryPolicy::Unbounded => true,
        }
    }
}

/// Parámetros del filtro complementario
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionConfig {
    /// Peso de la integración del giroscopio frente al ángulo del acelerómetro
    pub alpha: f64,
    /// Término de regularización del roll cerca de la vertical
    pub mu: f64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            alpha: 0.98,
            mu: 0.001,
        }
    }
}

impl FusionConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_mu(mut self, mu: f64) -> Self {
        self.mu = mu;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_rate() {
        let config = SensorConfig::default().with_sample_rate_divisor(4);
        assert_eq!(config.output_rate(), 200.0);
        let config = config.with_dlpf(DlpfSetting::Lp260Hz).with_sample_rate_divisor(7);
        assert_eq!(config.output_rate(), 1000.0);
    }

    #[test]
    fn test_retry_policy() {
        let policy = RetryPolicy::Bounded { max_attempts: 3 };
        assert!(policy.allows_retry(2));
        assert!(!policy.allows_retry(3));
        assert!(RetryPolicy::Unbounded.allows_retry(u32::MAX));
    }
}
