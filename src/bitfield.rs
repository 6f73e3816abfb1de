//! Acceso a campos de bits empaquetados dentro de un registro de un byte
//!
//! Cada campo se describe con un descriptor constante (`BoolField` o
//! `EnumField<T>`) que conoce su registro y su máscara. Leer un campo extrae
//! sus bits; escribirlo sustituye sólo esos bits y conserva el resto del
//! byte intacto.

use core::marker::PhantomData;
use thiserror::Error;

/// Error al interpretar los bits de un campo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BitfieldError {
    /// El valor crudo no corresponde a ningún símbolo del campo
    #[error("valor {raw:#04x} sin correspondencia en el registro {register:#04x}")]
    UnknownValue { register: u8, raw: u8 },
}

/// Valor enumerado que puede almacenarse en un campo de bits
pub trait FieldValue: Copy + 'static {
    /// Todos los símbolos válidos del campo
    const VARIANTS: &'static [Self];

    /// Valor crudo (sin desplazar) del símbolo
    fn to_raw(self) -> u8;

    /// Busca el símbolo cuyo valor crudo es `raw`
    fn from_raw(raw: u8) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.to_raw() == raw)
    }
}

/// Implementa `FieldValue` para un enum `#[repr(u8)]` sin campos
macro_rules! field_value {
    ($ty:ident: $($variant:ident),+ $(,)?) => {
        impl $crate::bitfield::FieldValue for $ty {
            const VARIANTS: &'static [Self] = &[$($ty::$variant),+];

            fn to_raw(self) -> u8 {
                self as u8
            }
        }
    };
}
pub(crate) use field_value;

/// Descriptor de un campo de bits
pub trait Field {
    /// Tipo del valor almacenado
    type Value;

    /// Dirección del registro que contiene el campo
    fn register(&self) -> u8;

    /// Máscara de los bits del campo dentro del byte
    fn mask(&self) -> u8;

    /// Extrae el valor del campo a partir del byte completo
    fn decode(&self, byte: u8) -> Result<Self::Value, BitfieldError>;

    /// Devuelve `byte` con los bits del campo sustituidos por `value`
    fn encode(&self, byte: u8, value: Self::Value) -> u8;
}

/// Campo de un solo bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolField {
    register: u8,
    bit: u8,
}

impl BoolField {
    pub const fn new(register: u8, bit: u8) -> Self {
        assert!(bit <= 7, "bit fuera de rango");
        Self { register, bit }
    }

    pub const fn bit(&self) -> u8 {
        self.bit
    }
}

impl Field for BoolField {
    type Value = bool;

    fn register(&self) -> u8 {
        self.register
    }

    fn mask(&self) -> u8 {
        1 << self.bit
    }

    fn decode(&self, byte: u8) -> Result<bool, BitfieldError> {
        Ok(byte & self.mask() != 0)
    }

    fn encode(&self, byte: u8, value: bool) -> u8 {
        let cleared = byte & !self.mask();
        if value {
            cleared | self.mask()
        } else {
            cleared
        }
    }
}

/// Campo enumerado que ocupa los bits `[min_bit, max_bit]` (ambos incluidos)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumField<T> {
    register: u8,
    min_bit: u8,
    max_bit: u8,
    _value: PhantomData<T>,
}

impl<T: FieldValue> EnumField<T> {
    pub const fn new(register: u8, min_bit: u8, max_bit: u8) -> Self {
        assert!(min_bit <= max_bit && max_bit <= 7, "rango de bits inválido");
        Self {
            register,
            min_bit,
            max_bit,
            _value: PhantomData,
        }
    }

    pub const fn min_bit(&self) -> u8 {
        self.min_bit
    }

    pub const fn max_bit(&self) -> u8 {
        self.max_bit
    }
}

impl<T: FieldValue> Field for EnumField<T> {
    type Value = T;

    fn register(&self) -> u8 {
        self.register
    }

    fn mask(&self) -> u8 {
        (0xFFu8 >> (7 - (self.max_bit - self.min_bit))) << self.min_bit
    }

    fn decode(&self, byte: u8) -> Result<T, BitfieldError> {
        let raw = (byte & self.mask()) >> self.min_bit;
        T::from_raw(raw).ok_or(BitfieldError::UnknownValue {
            register: self.register,
            raw,
        })
    }

    fn encode(&self, byte: u8, value: T) -> u8 {
        (byte & !self.mask()) | ((value.to_raw() << self.min_bit) & self.mask())
    }
}

/// Copia en memoria de un registro de un byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterByte {
    pub address: u8,
    pub value: u8,
}

impl RegisterByte {
    pub const fn new(address: u8, value: u8) -> Self {
        Self { address, value }
    }

    /// Lee un campo de este registro
    pub fn get<F: Field>(&self, field: &F) -> Result<F::Value, BitfieldError> {
        debug_assert_eq!(field.register(), self.address);
        field.decode(self.value)
    }

    /// Escribe un campo de este registro conservando los demás bits
    pub fn set<F: Field>(&mut self, field: &F, value: F::Value) {
        debug_assert_eq!(field.register(), self.address);
        self.value = field.encode(self.value, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[repr(u8)]
    enum Mode {
        Off = 0,
        Slow = 1,
        Fast = 3,
    }
    field_value!(Mode: Off, Slow, Fast);

    const FLAG: BoolField = BoolField::new(0x10, 5);
    const MODE: EnumField<Mode> = EnumField::new(0x10, 3, 4);

    #[test]
    fn test_bool_field_preserves_other_bits() {
        let mut reg = RegisterByte::new(0x10, 0b1101_1011);
        reg.set(&FLAG, true);
        assert_eq!(reg.value, 0b1111_1011);
        assert!(reg.get(&FLAG).unwrap());
        reg.set(&FLAG, false);
        assert_eq!(reg.value, 0b1101_1011);
        assert!(!reg.get(&FLAG).unwrap());
    }

    #[test]
    fn test_enum_field_mask() {
        assert_eq!(MODE.mask(), 0b0001_1000);
        assert_eq!(EnumField::<Mode>::new(0x10, 0, 7).mask(), 0xFF);
        assert_eq!(EnumField::<Mode>::new(0x10, 6, 7).mask(), 0b1100_0000);
    }

    #[test]
    fn test_enum_field_every_symbol() {
        for &mode in Mode::VARIANTS {
            let mut reg = RegisterByte::new(0x10, 0b1010_0101);
            reg.set(&MODE, mode);
            assert_eq!(reg.get(&MODE), Ok(mode));
            assert_eq!(reg.value & !MODE.mask(), 0b1010_0101 & !MODE.mask());
        }
    }

    #[test]
    fn test_enum_field_unknown_value() {
        let reg = RegisterByte::new(0x10, 0b0001_0000);
        assert_eq!(
            reg.get(&MODE),
            Err(BitfieldError::UnknownValue {
                register: 0x10,
                raw: 2
            })
        );
    }
}
