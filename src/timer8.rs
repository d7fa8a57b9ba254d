use crate::regs::Counter8;

/// An 8-bit timer unit with a period register.
///
/// The cadence is set by the period register, not by the clear value. Used
/// as the clock of the bit-bang serial transmitter, which wants the timer
/// started once during bring-up and never stopped: a restart shifts the
/// phase and bunches up consecutive bytes. See
/// [`into_free_running`](Self::into_free_running).
pub struct Timer8<P> {
    port: P,
    clear: u8,
}

impl<P: Counter8> Timer8<P> {
    /// Take ownership of `port` and initialize the timer.
    pub fn new(port: P) -> Self {
        let mut timer = Self { port, clear: 0 };
        timer.init();
        timer
    }

    /// Stop the timer, write the default control registers, reset the clear
    /// value to 0 and clear the counter.
    pub fn init(&mut self) {
        self.stop();
        self.port.write_control();
        self.clear = 0;
        self.clear();
    }

    /// Placeholder for control register customization. Does nothing yet.
    #[inline(always)]
    pub fn configure(&mut self) {}

    /// Set the value [`clear`](Self::clear) loads into the counter.
    pub fn set_clear(&mut self, value: u8) {
        self.clear = value;
    }

    pub fn clear_value(&self) -> u8 {
        self.clear
    }

    /// Program the period register.
    pub fn set_period(&mut self, period: u8) {
        self.port.write_period(period);
    }

    /// Period register as read back from the hardware.
    pub fn period(&self) -> u8 {
        self.port.read_period()
    }

    #[inline(always)]
    pub fn start(&mut self) {
        self.port.set_enabled(true);
    }

    #[inline(always)]
    pub fn stop(&mut self) {
        self.port.set_enabled(false);
    }

    #[inline(always)]
    pub fn is_running(&self) -> bool {
        self.port.is_enabled()
    }

    pub fn clear(&mut self) {
        self.port.write_count(self.clear);
    }

    /// Stop the timer, load the clear value and clear the match flag.
    pub fn reset(&mut self) {
        self.stop();
        self.clear();
        self.port.clear_overflow();
    }

    pub fn read(&mut self) -> u8 {
        self.port.read_count()
    }

    pub fn overflow_pending(&self) -> bool {
        self.port.overflow_pending()
    }

    pub fn clear_overflow(&mut self) {
        self.port.clear_overflow();
    }

    /// Start the timer for good.
    ///
    /// The returned handle has no way to stop, reset or re-initialize the
    /// timer.
    pub fn into_free_running(mut self) -> FreeRunning<P> {
        self.start();
        FreeRunning { port: self.port }
    }

    /// Stop the timer and give the register port back.
    pub fn release(mut self) -> P {
        self.stop();
        self.port
    }

    #[cfg(test)]
    pub(crate) fn port(&self) -> &P {
        &self.port
    }

    #[cfg(test)]
    pub(crate) fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }
}

/// A started [`Timer8`] that stays running.
pub struct FreeRunning<P> {
    port: P,
}

impl<P: Counter8> FreeRunning<P> {
    pub fn read(&mut self) -> u8 {
        self.port.read_count()
    }

    /// Program the period register. Takes effect without stopping the
    /// counter.
    pub fn set_period(&mut self, period: u8) {
        self.port.write_period(period);
    }

    pub fn period(&self) -> u8 {
        self.port.read_period()
    }

    #[inline(always)]
    pub fn is_running(&self) -> bool {
        self.port.is_enabled()
    }

    pub fn overflow_pending(&self) -> bool {
        self.port.overflow_pending()
    }

    pub fn clear_overflow(&mut self) {
        self.port.clear_overflow();
    }

    /// Wait for the start of the next period.
    pub fn wait_period(&mut self) {
        while !self.port.overflow_pending() {}
        self.port.clear_overflow();
    }

    #[cfg(test)]
    pub(crate) fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }
}
