//! Acceso al bus del MPU6050
//!
//! El driver sólo necesita escribir y leer bloques de registros consecutivos;
//! `Interface` abstrae eso para poder sustituir el bus real por un simulador.

use embedded_hal::i2c::I2c;
use thiserror::Error;

/// Bytes de datos admitidos en una escritura (sin contar la dirección)
pub const MAX_WRITE_LEN: usize = 16;

#[derive(Debug, Clone, Error)]
pub enum InterfaceError<E> {
    /// El bus I2C devolvió un error
    #[error("error de comunicación I2C: {0:?}")]
    I2cError(E),
    /// Escritura demasiado larga o lectura vacía
    #[error("parámetro inválido")]
    InvalidParameter,
}

/// Transporte de registros del sensor
pub trait Interface {
    type Error: core::fmt::Debug;

    /// Escribe `data` a partir del registro `reg` (autoincremento)
    fn write_reg(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Llena `data` leyendo a partir del registro `reg` (autoincremento)
    fn read_reg(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error>;
}

/// Sensor conectado a un bus `embedded_hal::i2c::I2c`
pub struct I2cInterface<I2C> {
    i2c: I2C,
    addr: u8,
}

impl<I2C: I2c> I2cInterface<I2C> {
    pub fn new(i2c: I2C, addr: u8) -> Self {
        Self { i2c, addr }
    }

    pub fn address(&self) -> u8 {
        self.addr
    }

    /// Devuelve el bus para cerrarlo o reutilizarlo
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Interface for I2cInterface<I2C> {
    type Error = InterfaceError<I2C::Error>;

    fn write_reg(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        if data.len() > MAX_WRITE_LEN {
            return Err(InterfaceError::InvalidParameter);
        }

        // dirección de registro seguida de los datos en una sola transacción
        let mut frame = [0u8; MAX_WRITE_LEN + 1];
        frame[0] = reg;
        frame[1..=data.len()].copy_from_slice(data);

        self.i2c
            .write(self.addr, &frame[..=data.len()])
            .map_err(InterfaceError::I2cError)
    }

    fn read_reg(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        if data.is_empty() {
            return Err(InterfaceError::InvalidParameter);
        }
        self.i2c
            .write_read(self.addr, &[reg], data)
            .map_err(InterfaceError::I2cError)
    }
}
