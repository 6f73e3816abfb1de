//! Definiciones de tipos y constantes comunes para el MPU6050

use crate::bitfield::field_value;

/// Valor crudo que corresponde al fondo de escala (`i16::MAX`)
pub const RAW_FULL_SCALE: f64 = i16::MAX as f64;

/// Valores de aceleración gravitacional en diferentes unidades
pub mod gravity {
    pub const GRAVITY_MSS: f64 = 9.80665;
    pub const GRAVITY_FPS2: f64 = 32.17405;
}

/// Escalas completas disponibles para el giroscopio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum GyroFullScale {
    /// ±250 dps
    #[default]
    Fs250Dps = 0,
    /// ±500 dps
    Fs500Dps = 1,
    /// ±1000 dps
    Fs1000Dps = 2,
    /// ±2000 dps
    Fs2000Dps = 3,
}
field_value!(GyroFullScale: Fs250Dps, Fs500Dps, Fs1000Dps, Fs2000Dps);

impl GyroFullScale {
    /// Fondo de escala en grados/segundo
    pub fn full_scale(&self) -> f64 {
        match self {
            GyroFullScale::Fs250Dps => 250.0,
            GyroFullScale::Fs500Dps => 500.0,
            GyroFullScale::Fs1000Dps => 1000.0,
            GyroFullScale::Fs2000Dps => 2000.0,
        }
    }

    /// Grados/segundo por cuenta
    pub fn scale_factor(&self) -> f64 {
        self.full_scale() / RAW_FULL_SCALE
    }
}

/// Escalas completas disponibles para el acelerómetro
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AccelFullScale {
    /// ±2g
    #[default]
    Fs2G = 0,
    /// ±4g
    Fs4G = 1,
    /// ±8g
    Fs8G = 2,
    /// ±16g
    Fs16G = 3,
}
field_value!(AccelFullScale: Fs2G, Fs4G, Fs8G, Fs16G);

impl AccelFullScale {
    /// Fondo de escala en m/s²
    pub fn full_scale(&self) -> f64 {
        let g = match self {
            AccelFullScale::Fs2G => 2.0,
            AccelFullScale::Fs4G => 4.0,
            AccelFullScale::Fs8G => 8.0,
            AccelFullScale::Fs16G => 16.0,
        };
        g * gravity::GRAVITY_MSS
    }

    /// m/s² por cuenta
    pub fn scale_factor(&self) -> f64 {
        self.full_scale() / RAW_FULL_SCALE
    }
}

/// Configuración del filtro paso bajo digital (DLPF_CFG, bits 2..0 de CONFIG)
///
/// El ancho de banda indicado es el del acelerómetro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum DlpfSetting {
    /// 260 Hz (filtro desactivado)
    #[default]
    Lp260Hz = 0,
    /// 184 Hz
    Lp184Hz = 1,
    /// 94 Hz
    Lp94Hz = 2,
    /// 44 Hz
    Lp44Hz = 3,
    /// 21 Hz
    Lp21Hz = 4,
    /// 10 Hz
    Lp10Hz = 5,
    /// 5 Hz
    Lp5Hz = 6,
    /// Reservado
    Reserved = 7,
}
field_value!(DlpfSetting: Lp260Hz, Lp184Hz, Lp94Hz, Lp44Hz, Lp21Hz, Lp10Hz, Lp5Hz, Reserved);

impl DlpfSetting {
    /// Indica si el giroscopio muestrea a 8 kHz con esta configuración
    pub fn is_disabled(&self) -> bool {
        matches!(self, DlpfSetting::Lp260Hz | DlpfSetting::Reserved)
    }

    /// Frecuencia base de muestreo en Hz
    pub fn base_sample_rate(&self) -> f64 {
        if self.is_disabled() {
            8000.0
        } else {
            1000.0
        }
    }
}

/// Fuente de sincronización externa (EXT_SYNC_SET, bits 5..3 de CONFIG)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ExtSync {
    #[default]
    Disabled = 0,
    TempOutL = 1,
    GyroXoutL = 2,
    GyroYoutL = 3,
    GyroZoutL = 4,
    AccelXoutL = 5,
    AccelYoutL = 6,
    AccelZoutL = 7,
}
field_value!(ExtSync: Disabled, TempOutL, GyroXoutL, GyroYoutL, GyroZoutL, AccelXoutL, AccelYoutL, AccelZoutL);

/// Fuente de reloj (CLKSEL, bits 2..0 de PWR_MGMT_1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ClockSource {
    /// Oscilador interno de 8 MHz
    #[default]
    Internal8MHz = 0,
    /// PLL con referencia del giroscopio X
    PllXGyro = 1,
    /// PLL con referencia del giroscopio Y
    PllYGyro = 2,
    /// PLL con referencia del giroscopio Z
    PllZGyro = 3,
    /// PLL con referencia externa de 32.768 kHz
    PllExt32kHz = 4,
    /// PLL con referencia externa de 19.2 MHz
    PllExt19MHz = 5,
    Reserved = 6,
    /// Detiene el reloj
    StopClock = 7,
}
field_value!(ClockSource: Internal8MHz, PllXGyro, PllYGyro, PllZGyro, PllExt32kHz, PllExt19MHz, Reserved, StopClock);

/// Frecuencia de despertar en modo ciclo (LP_WAKE_CTRL, bits 7..6 de PWR_MGMT_2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum WakeControl {
    #[default]
    Hz1_25 = 0,
    Hz5 = 1,
    Hz20 = 2,
    Hz40 = 3,
}
field_value!(WakeControl: Hz1_25, Hz5, Hz20, Hz40);

impl WakeControl {
    pub fn to_frequency(&self) -> f64 {
        match self {
            WakeControl::Hz1_25 => 1.25,
            WakeControl::Hz5 => 5.0,
            WakeControl::Hz20 => 20.0,
            WakeControl::Hz40 => 40.0,
        }
    }
}
