//! Mock interface implementation for testing the MPU6050 driver

#![allow(dead_code)]

use embedded_hal::delay::DelayNs;
use mpu6050_rs::interface::Interface;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const ACCEL_XOUT_H: u8 = 0x3B;
pub const TEMP_OUT_H: u8 = 0x41;
pub const GYRO_XOUT_H: u8 = 0x43;
pub const PWR_MGMT_1: u8 = 0x6B;
pub const WHO_AM_I: u8 = 0x75;

/// Records operations performed on the mock interface
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Read { address: u8, len: usize },
    Write { address: u8, values: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockError(pub &'static str);

#[derive(Debug)]
struct MockState {
    registers: [u8; 256],
    operations: Vec<Operation>,
    /// Number of upcoming reads that fail
    failing_reads: u32,
    failing_writes: u32,
    whoami: u8,
}

impl MockState {
    fn new() -> Self {
        let mut state = Self {
            registers: [0; 256],
            operations: Vec::new(),
            failing_reads: 0,
            failing_writes: 0,
            whoami: 0x68,
        };
        state.power_on();
        state
    }

    /// Power-on register values
    fn power_on(&mut self) {
        self.registers = [0; 256];
        self.registers[PWR_MGMT_1 as usize] = 0x40;
        self.registers[WHO_AM_I as usize] = self.whoami;
    }
}

/// Register-array mock with shared state (clones observe the same registers)
#[derive(Debug, Clone)]
pub struct MockInterface {
    state: Rc<RefCell<MockState>>,
}

impl MockInterface {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState::new())),
        }
    }

    pub fn register(&self, address: u8) -> u8 {
        self.state.borrow().registers[address as usize]
    }

    pub fn set_register(&self, address: u8, value: u8) {
        self.state.borrow_mut().registers[address as usize] = value;
    }

    pub fn set_whoami(&self, value: u8) {
        let mut state = self.state.borrow_mut();
        state.whoami = value;
        state.registers[WHO_AM_I as usize] = value;
    }

    fn set_triplet(&self, start: u8, values: [i16; 3]) {
        let mut state = self.state.borrow_mut();
        for (i, v) in values.iter().enumerate() {
            let [h, l] = v.to_be_bytes();
            state.registers[start as usize + 2 * i] = h;
            state.registers[start as usize + 2 * i + 1] = l;
        }
    }

    pub fn set_accel_raw(&self, values: [i16; 3]) {
        self.set_triplet(ACCEL_XOUT_H, values);
    }

    pub fn set_gyro_raw(&self, values: [i16; 3]) {
        self.set_triplet(GYRO_XOUT_H, values);
    }

    pub fn set_temp_raw(&self, value: i16) {
        let [h, l] = value.to_be_bytes();
        self.set_register(TEMP_OUT_H, h);
        self.set_register(TEMP_OUT_H + 1, l);
    }

    pub fn fail_next_reads(&self, count: u32) {
        self.state.borrow_mut().failing_reads = count;
    }

    pub fn fail_next_writes(&self, count: u32) {
        self.state.borrow_mut().failing_writes = count;
    }

    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    pub fn read_count(&self) -> usize {
        self.operations()
            .iter()
            .filter(|op| matches!(op, Operation::Read { .. }))
            .count()
    }

    pub fn writes_to(&self, address: u8) -> Vec<u8> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                Operation::Write { address: a, values } if a == address => values.first().copied(),
                _ => None,
            })
            .collect()
    }

    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }
}

impl Interface for MockInterface {
    type Error = MockError;

    fn write_reg(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        state.operations.push(Operation::Write {
            address: reg,
            values: data.to_vec(),
        });
        if state.failing_writes > 0 {
            state.failing_writes -= 1;
            return Err(MockError("write"));
        }

        if reg == PWR_MGMT_1 && data.first().map_or(false, |v| v & 0x80 != 0) {
            // DEVICE_RESET restores power-on values and self-clears
            state.power_on();
            return Ok(());
        }

        for (i, value) in data.iter().enumerate() {
            state.registers[reg as usize + i] = *value;
        }
        Ok(())
    }

    fn read_reg(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        state.operations.push(Operation::Read {
            address: reg,
            len: data.len(),
        });
        if state.failing_reads > 0 {
            state.failing_reads -= 1;
            return Err(MockError("read"));
        }

        let start = reg as usize;
        data.copy_from_slice(&state.registers[start..start + data.len()]);
        Ok(())
    }
}

/// Delay that only accumulates the requested time
#[derive(Debug, Clone, Default)]
pub struct MockDelay {
    pub elapsed_ns: Rc<Cell<u64>>,
}

impl MockDelay {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns.get() / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns.set(self.elapsed_ns.get() + ns as u64);
    }
}

/// Driver over a fresh mock; the returned handles share state with it
pub fn mock_device() -> (mpu6050_rs::Mpu6050<MockInterface, MockDelay>, MockInterface, MockDelay) {
    let interface = MockInterface::new();
    let delay = MockDelay::default();
    let device = mpu6050_rs::Mpu6050::new(interface.clone(), delay.clone());
    (device, interface, delay)
}
