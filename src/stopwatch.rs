use crate::{config, regs::Counter16, timer16::Timer16};

/// Interval measurement on a 16-bit timer unit (Timer1 on the board).
pub struct Stopwatch<P> {
    timer: Timer16<P>,
}

impl<P: Counter16> Stopwatch<P> {
    /// Wrap `timer`. Measurements count up from its clear value.
    pub fn new(timer: Timer16<P>) -> Self {
        Self { timer }
    }

    pub fn release(self) -> Timer16<P> {
        self.timer
    }

    /// Reset the counter and start measuring.
    pub fn begin(&mut self) {
        self.timer.reset();
        self.timer.start();
    }

    /// Counts since [`begin`](Self::begin), without stopping.
    pub fn lap(&mut self) -> u16 {
        self.elapsed()
    }

    /// Stop measuring and return the counts since [`begin`](Self::begin).
    pub fn end(&mut self) -> u16 {
        self.timer.stop();
        self.elapsed()
    }

    /// Whether the measured interval was too long for the counter.
    pub fn overflowed(&self) -> bool {
        self.timer.overflow_pending()
    }

    fn elapsed(&mut self) -> u16 {
        self.timer.read().wrapping_sub(self.timer.clear_value())
    }
}

/// Convert Timer1 counts to microseconds.
pub const fn micros(ticks: u16) -> u32 {
    ticks as u32 * config::TIMER1_PRESCALE.divider() / (config::CPU_HZ / 1_000_000)
}
