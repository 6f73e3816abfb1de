//! Definiciones de registros para el MPU6050
//!
//! `registers` contiene las direcciones absolutas y `fields` los
//! descriptores de los campos de bits empaquetados en ellas.

/// Direcciones I2C del dispositivo
pub mod address {
    /// AD0 a nivel bajo
    pub const DEFAULT: u8 = 0x68;
    /// AD0 a nivel alto
    pub const ALTERNATE: u8 = 0x69;
}

/// Direcciones de registro
pub mod registers {
    // Registros de configuración
    pub const SMPLRT_DIV: u8 = 0x19;
    pub const CONFIG: u8 = 0x1A;
    pub const GYRO_CONFIG: u8 = 0x1B;
    pub const ACCEL_CONFIG: u8 = 0x1C;

    // Registros de interrupción
    pub const INT_ENABLE: u8 = 0x38;

    // Registros de acelerómetro
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    pub const ACCEL_XOUT_L: u8 = 0x3C;
    pub const ACCEL_YOUT_H: u8 = 0x3D;
    pub const ACCEL_YOUT_L: u8 = 0x3E;
    pub const ACCEL_ZOUT_H: u8 = 0x3F;
    pub const ACCEL_ZOUT_L: u8 = 0x40;

    // Registros de temperatura
    pub const TEMP_OUT_H: u8 = 0x41;
    pub const TEMP_OUT_L: u8 = 0x42;

    // Registros de giroscopio
    pub const GYRO_XOUT_H: u8 = 0x43;
    pub const GYRO_XOUT_L: u8 = 0x44;
    pub const GYRO_YOUT_H: u8 = 0x45;
    pub const GYRO_YOUT_L: u8 = 0x46;
    pub const GYRO_ZOUT_H: u8 = 0x47;
    pub const GYRO_ZOUT_L: u8 = 0x48;

    // Registros de reset y energía
    pub const SIGNAL_PATH_RESET: u8 = 0x68;
    pub const PWR_MGMT_1: u8 = 0x6B;
    pub const PWR_MGMT_2: u8 = 0x6C;

    // Identificación
    pub const WHO_AM_I: u8 = 0x75;

    /// Longitud de la ráfaga acelerómetro + temperatura + giroscopio
    pub const MOTION_BURST_LEN: usize = 14;
}

/// Valores esperados en registros de identificación
pub mod values {
    /// Contenido de WHO_AM_I (bits 6..1) en un MPU6050
    pub const WHO_AM_I: u8 = 0x68;
    pub const WHO_AM_I_MASK: u8 = 0x7E;
}

/// Descriptores de campos de bits
pub mod fields {
    use super::registers::*;
    use crate::bitfield::{BoolField, EnumField};
    use crate::types::{AccelFullScale, ClockSource, DlpfSetting, ExtSync, GyroFullScale, WakeControl};

    // CONFIG
    pub const DLPF_CFG: EnumField<DlpfSetting> = EnumField::new(CONFIG, 0, 2);
    pub const EXT_SYNC_SET: EnumField<ExtSync> = EnumField::new(CONFIG, 3, 5);

    // GYRO_CONFIG / ACCEL_CONFIG
    pub const FS_SEL: EnumField<GyroFullScale> = EnumField::new(GYRO_CONFIG, 3, 4);
    pub const AFS_SEL: EnumField<AccelFullScale> = EnumField::new(ACCEL_CONFIG, 3, 4);

    // INT_ENABLE
    pub const FIFO_OFLOW_EN: BoolField = BoolField::new(INT_ENABLE, 4);
    pub const I2C_MST_INT_EN: BoolField = BoolField::new(INT_ENABLE, 3);
    pub const DATA_RDY_EN: BoolField = BoolField::new(INT_ENABLE, 0);

    // SIGNAL_PATH_RESET
    pub const GYRO_RESET: BoolField = BoolField::new(SIGNAL_PATH_RESET, 2);
    pub const ACCEL_RESET: BoolField = BoolField::new(SIGNAL_PATH_RESET, 1);
    pub const TEMP_RESET: BoolField = BoolField::new(SIGNAL_PATH_RESET, 0);

    // PWR_MGMT_1
    pub const DEVICE_RESET: BoolField = BoolField::new(PWR_MGMT_1, 7);
    pub const SLEEP: BoolField = BoolField::new(PWR_MGMT_1, 6);
    pub const CYCLE: BoolField = BoolField::new(PWR_MGMT_1, 5);
    pub const TEMP_DIS: BoolField = BoolField::new(PWR_MGMT_1, 3);
    pub const CLKSEL: EnumField<ClockSource> = EnumField::new(PWR_MGMT_1, 0, 2);

    // PWR_MGMT_2
    pub const LP_WAKE_CTRL: EnumField<WakeControl> = EnumField::new(PWR_MGMT_2, 6, 7);
    pub const STBY_XA: BoolField = BoolField::new(PWR_MGMT_2, 5);
    pub const STBY_YA: BoolField = BoolField::new(PWR_MGMT_2, 4);
    pub const STBY_ZA: BoolField = BoolField::new(PWR_MGMT_2, 3);
    pub const STBY_XG: BoolField = BoolField::new(PWR_MGMT_2, 2);
    pub const STBY_YG: BoolField = BoolField::new(PWR_MGMT_2, 1);
    pub const STBY_ZG: BoolField = BoolField::new(PWR_MGMT_2, 0);
}

#[cfg(test)]
mod tests {
    use super::fields::*;
    use crate::bitfield::{BoolField, EnumField, Field, FieldValue, RegisterByte};
    use core::fmt::Debug;

    const NOISE: [u8; 4] = [0x00, 0xFF, 0xA5, 0x5A];

    fn check_bool(field: &BoolField) {
        for noise in NOISE {
            for value in [true, false] {
                let mut reg = RegisterByte::new(field.register(), noise);
                reg.set(field, value);
                assert_eq!(reg.get(field), Ok(value), "{:?}", field);
                assert_eq!(reg.value & !field.mask(), noise & !field.mask(), "{:?}", field);
            }
        }
    }

    fn check_enum<T: FieldValue + PartialEq + Debug>(field: &EnumField<T>) {
        let variants = T::VARIANTS;
        for (i, a) in variants.iter().enumerate() {
            // valores crudos únicos y dentro del ancho del campo
            assert_eq!((a.to_raw() << field.min_bit()) & !field.mask(), 0, "{:?}", a);
            assert_eq!(a.to_raw() >> (field.max_bit() - field.min_bit() + 1), 0, "{:?}", a);
            for b in &variants[i + 1..] {
                assert_ne!(a.to_raw(), b.to_raw(), "{:?} / {:?}", a, b);
            }
        }

        for noise in NOISE {
            for &value in variants {
                let mut reg = RegisterByte::new(field.register(), noise);
                reg.set(field, value);
                assert_eq!(reg.get(field), Ok(value), "{:?}", value);
                assert_eq!(reg.value & !field.mask(), noise & !field.mask(), "{:?}", value);
            }
        }
    }

    #[test]
    fn test_every_bool_field() {
        for field in [
            FIFO_OFLOW_EN,
            I2C_MST_INT_EN,
            DATA_RDY_EN,
            GYRO_RESET,
            ACCEL_RESET,
            TEMP_RESET,
            DEVICE_RESET,
            SLEEP,
            CYCLE,
            TEMP_DIS,
            STBY_XA,
            STBY_YA,
            STBY_ZA,
            STBY_XG,
            STBY_YG,
            STBY_ZG,
        ] {
            check_bool(&field);
        }
    }

    #[test]
    fn test_every_enum_field() {
        check_enum(&DLPF_CFG);
        check_enum(&EXT_SYNC_SET);
        check_enum(&FS_SEL);
        check_enum(&AFS_SEL);
        check_enum(&CLKSEL);
        check_enum(&LP_WAKE_CTRL);
    }

    #[test]
    fn test_enum_fields_cover_their_width() {
        // 3 bits → 8 símbolos, 2 bits → 4 símbolos: todo valor crudo se decodifica
        assert_eq!(DLPF_CFG.mask().count_ones(), 3);
        for raw in 0..=0xFFu8 {
            let reg = RegisterByte::new(super::registers::CONFIG, raw);
            assert!(reg.get(&DLPF_CFG).is_ok());
            assert!(reg.get(&EXT_SYNC_SET).is_ok());
        }
    }
}
