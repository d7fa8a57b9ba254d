//! Register models for host tests.
//!
//! [`MockCounter16`] models the shadow register of the 16-bit units: a high
//! byte write sits in the shadow until the low byte write commits both, and a
//! high byte read returns what the previous low byte read latched. Code that
//! gets the byte order wrong produces wrong values against this model, just
//! like on the hardware.

use std::cell::{Cell, RefCell};

use crate::regs::{Counter16, Counter8};

/// One register access seen by a mock port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Control,
    Enable(bool),
    WriteHigh(u8),
    WriteLow(u8),
    ReadLow,
    ReadHigh,
    ClearOverflow,
}

#[derive(Debug, Default)]
pub struct MockCounter16 {
    count: Cell<u16>,
    write_shadow: u8,
    read_latch: u8,
    control_written: bool,
    enabled: bool,
    overflow: Cell<bool>,
    ticks_per_read: u16,
    ticks_per_poll: u16,
    log: RefCell<Vec<Access>>,
}

impl MockCounter16 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put the counter at `value` and fill the read latch with garbage, as
    /// if the unit had been running before the test looked at it.
    pub fn with_count(value: u16) -> Self {
        let mock = Self::new();
        mock.count.set(value);
        Self {
            read_latch: 0xA5,
            ..mock
        }
    }

    /// Advance the counter by `n` counts if the clock is connected.
    pub fn tick(&self, n: u32) {
        if !self.enabled {
            return;
        }
        let next = self.count.get() as u32 + n;
        if next > u16::MAX as u32 {
            self.overflow.set(true);
        }
        self.count.set(next as u16);
    }

    /// Let the counter advance by `n` after every byte read.
    pub fn set_ticks_per_read(&mut self, n: u16) {
        self.ticks_per_read = n;
    }

    /// Let the counter advance by `n` on every overflow flag poll.
    pub fn set_ticks_per_poll(&mut self, n: u16) {
        self.ticks_per_poll = n;
    }

    /// Live counter value, bypassing the byte registers.
    pub fn count(&self) -> u16 {
        self.count.get()
    }

    pub fn set_overflow(&self) {
        self.overflow.set(true);
    }

    pub fn control_written(&self) -> bool {
        self.control_written
    }

    pub fn take_log(&self) -> Vec<Access> {
        self.log.take()
    }

    fn record(&self, access: Access) {
        self.log.borrow_mut().push(access);
    }
}

unsafe impl Counter16 for MockCounter16 {
    fn write_control(&mut self) {
        self.record(Access::Control);
        self.control_written = true;
        self.enabled = false;
    }

    fn set_enabled(&mut self, on: bool) {
        self.record(Access::Enable(on));
        self.enabled = on;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn write_high(&mut self, value: u8) {
        self.record(Access::WriteHigh(value));
        self.write_shadow = value;
    }

    fn write_low(&mut self, value: u8) {
        self.record(Access::WriteLow(value));
        self.count.set(u16::from_be_bytes([self.write_shadow, value]));
    }

    fn read_low(&mut self) -> u8 {
        self.record(Access::ReadLow);
        let [high, low] = self.count.get().to_be_bytes();
        self.read_latch = high;
        self.tick(self.ticks_per_read as u32);
        low
    }

    fn read_high(&mut self) -> u8 {
        self.record(Access::ReadHigh);
        self.tick(self.ticks_per_read as u32);
        self.read_latch
    }

    fn overflow_pending(&self) -> bool {
        self.tick(self.ticks_per_poll as u32);
        self.overflow.get()
    }

    fn clear_overflow(&mut self) {
        self.record(Access::ClearOverflow);
        self.overflow.set(false);
    }
}

#[derive(Debug, Default)]
pub struct MockCounter8 {
    count: u8,
    period: u8,
    enabled: bool,
    overflow: bool,
    stop_requests: usize,
}

impl MockCounter8 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the counter by `n` counts if the clock is connected. The
    /// counter restarts at zero on the count after it matched the period.
    pub fn tick(&mut self, n: u32) {
        if !self.enabled {
            return;
        }
        for _ in 0..n {
            if self.count == self.period {
                self.count = 0;
                self.overflow = true;
            } else {
                self.count = self.count.wrapping_add(1);
            }
        }
    }

    /// How many times the clock was disconnected.
    pub fn stop_requests(&self) -> usize {
        self.stop_requests
    }
}

unsafe impl Counter8 for MockCounter8 {
    fn write_control(&mut self) {
        self.enabled = false;
    }

    fn set_enabled(&mut self, on: bool) {
        if !on {
            self.stop_requests += 1;
        }
        self.enabled = on;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn write_count(&mut self, value: u8) {
        self.count = value;
    }

    fn read_count(&mut self) -> u8 {
        self.count
    }

    fn write_period(&mut self, period: u8) {
        self.period = period;
    }

    fn read_period(&self) -> u8 {
        self.period
    }

    fn overflow_pending(&self) -> bool {
        self.overflow
    }

    fn clear_overflow(&mut self) {
        self.overflow = false;
    }
}
