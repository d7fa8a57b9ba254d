use embedded_hal::delay::DelayNs;

use crate::{config, regs::Counter16, timer16::Timer16};

/// Busy-wait delay on a 16-bit timer unit (Timer3 on the board).
///
/// Each wait preloads the counter so that it overflows after the wanted
/// number of counts, runs the timer and polls the overflow flag. The timer is
/// stopped between delays.
pub struct MsDelay<P> {
    timer: Timer16<P>,
}

impl<P: Counter16> MsDelay<P> {
    pub fn new(timer: Timer16<P>) -> Self {
        Self { timer }
    }

    pub fn release(self) -> Timer16<P> {
        self.timer
    }

    fn wait_ticks(&mut self, mut ticks: u32) {
        while ticks > 0 {
            let slice = ticks.min(0x1_0000);
            // A slice of 0x10000 truncates to 0, the preload for a full wrap.
            let [high, low] = config::preload(slice as u16).to_be_bytes();
            self.timer.stage_clear(high, low);
            self.timer.reset();
            self.timer.start();
            while !self.timer.overflow_pending() {}
            self.timer.stop();
            ticks -= slice;
        }
    }
}

impl<P: Counter16> DelayNs for MsDelay<P> {
    fn delay_ns(&mut self, ns: u32) {
        let ticks = (ns as u64 * config::TICKS_PER_MS as u64).div_ceil(1_000_000);
        self.wait_ticks(ticks.min(u32::MAX as u64) as u32);
    }

    fn delay_us(&mut self, us: u32) {
        let ticks = (us as u64 * config::TICKS_PER_MS as u64).div_ceil(1_000);
        self.wait_ticks(ticks.min(u32::MAX as u64) as u32);
    }

    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.wait_ticks(config::TICKS_PER_MS);
        }
    }
}
