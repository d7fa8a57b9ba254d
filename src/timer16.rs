use crate::{config, critical, regs::Counter16};

/// A 16-bit timer unit.
///
/// Owns the register port of one physical timer together with the clear
/// value the counter is reloaded with. The handle cannot be copied, so each
/// timer has exactly one owner.
///
/// The counter's high byte goes through a shadow register, and every
/// multi-byte access is sequenced here: [`clear`](Self::clear) writes high
/// then low, [`read`](Self::read) reads low then high.
pub struct Timer16<P> {
    port: P,
    clear_high: u8,
    clear_low: u8,
}

impl<P: Counter16> Timer16<P> {
    /// Take ownership of `port` and initialize the timer.
    ///
    /// The returned timer is stopped and holds the clear value 0.
    pub fn new(port: P) -> Self {
        let mut timer = Self {
            port,
            clear_high: 0,
            clear_low: 0,
        };
        timer.init();
        timer
    }

    /// Stop the timer, write the default control registers, reset the clear
    /// value to 0 and clear the counter.
    ///
    /// Does not start the timer.
    pub fn init(&mut self) {
        self.stop();
        self.port.write_control();
        self.clear_high = 0;
        self.clear_low = 0;
        self.clear();
    }

    /// Placeholder for control register customization. Does nothing yet.
    #[inline(always)]
    pub fn configure(&mut self) {}

    /// Set the clear value and load it into the counter.
    pub fn set_clear(&mut self, high: u8, low: u8) {
        self.stage_clear(high, low);
        self.clear();
    }

    /// Set the clear value without touching the counter. It takes effect on
    /// the next [`clear`](Self::clear) or [`reset`](Self::reset).
    pub fn stage_clear(&mut self, high: u8, low: u8) {
        self.clear_high = high;
        self.clear_low = low;
    }

    /// [`set_clear`](Self::set_clear) with both bytes given as one value.
    pub fn set_clear_value(&mut self, value: u16) {
        let [high, low] = value.to_be_bytes();
        self.set_clear(high, low);
    }

    /// Preload the counter so that it overflows after exactly `ticks`
    /// counts. `ticks` of 0 stands for 65536 counts.
    pub fn set_overflow_after(&mut self, ticks: u16) {
        self.set_clear_value(config::preload(ticks));
    }

    pub fn clear_value(&self) -> u16 {
        u16::from_be_bytes([self.clear_high, self.clear_low])
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

    /// Load the clear value into the counter.
    pub fn clear(&mut self) {
        // The high byte only reaches the counter when the low byte is
        // written, so it has to go first.
        self.port.write_high(self.clear_high);
        self.port.write_low(self.clear_low);
    }

    /// Stop the timer, load the clear value and clear the overflow flag.
    ///
    /// Does not restart the timer.
    pub fn reset(&mut self) {
        self.stop();
        self.clear();
        self.port.clear_overflow();
    }

    /// Current counter value.
    ///
    /// The counter keeps running between the two byte reads; the result is
    /// the value at the moment of the low byte read.
    pub fn read(&mut self) -> u16 {
        // Reading the low byte latches the high byte.
        let low = self.port.read_low();
        let high = self.port.read_high();
        u16::from_be_bytes([high, low])
    }

    /// [`clear`](Self::clear) with interrupts disabled, for timers that are
    /// also touched from an interrupt handler.
    pub fn clear_atomic(&mut self) {
        critical::with(|| self.clear());
    }

    /// [`read`](Self::read) with interrupts disabled, for timers that are
    /// also touched from an interrupt handler.
    pub fn read_atomic(&mut self) -> u16 {
        critical::with(|| self.read())
    }

    pub fn overflow_pending(&self) -> bool {
        self.port.overflow_pending()
    }

    pub fn clear_overflow(&mut self) {
        self.port.clear_overflow();
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Access, MockCounter16};

    fn timer() -> Timer16<MockCounter16> {
        Timer16::new(MockCounter16::with_count(0x1234))
    }

    #[test]
    fn init_leaves_timer_stopped_at_zero() {
        let mut t = timer();
        assert!(!t.is_running());
        assert!(t.port().control_written());
        assert_eq!(t.clear_value(), 0);
        assert_eq!(t.read(), 0);
    }

    #[test]
    fn init_sequence_is_stop_control_clear() {
        let t = timer();
        assert_eq!(
            t.port().take_log(),
            [
                Access::Enable(false),
                Access::Control,
                Access::WriteHigh(0),
                Access::WriteLow(0),
            ]
        );
    }

    #[test]
    fn init_forgets_previous_clear_value() {
        let mut t = timer();
        t.set_clear(0xAB, 0xCD);
        t.start();
        t.init();
        assert!(!t.is_running());
        assert_eq!(t.clear_value(), 0);
        assert_eq!(t.read(), 0);
    }

    #[test]
    fn set_clear_round_trips_through_the_shadow_register() {
        let mut t = timer();
        for (high, low) in [(0x00, 0x00), (0xFF, 0x00), (0x00, 0xFF), (0x12, 0x34), (0xFF, 0xFF)] {
            t.set_clear(high, low);
            t.clear();
            assert_eq!(t.read(), (high as u16) << 8 | low as u16);
        }
    }

    #[test]
    fn set_clear_applies_immediately() {
        let mut t = timer();
        t.set_clear(0xE0, 0xC0);
        assert_eq!(t.port().count(), 0xE0C0);
    }

    #[test]
    fn stage_clear_waits_for_the_next_clear() {
        let mut t = timer();
        t.stage_clear(0xE0, 0xC0);
        assert_eq!(t.port().count(), 0);
        assert_eq!(t.clear_value(), 0xE0C0);
        t.clear();
        assert_eq!(t.port().count(), 0xE0C0);
    }

    #[test]
    fn clear_writes_high_before_low() {
        let mut t = timer();
        t.stage_clear(0x56, 0x78);
        t.port().take_log();
        t.clear();
        assert_eq!(
            t.port().take_log(),
            [Access::WriteHigh(0x56), Access::WriteLow(0x78)]
        );
    }

    #[test]
    fn low_first_clear_leaves_stale_high_byte() {
        let mut port = MockCounter16::new();
        // Wrong order: the low write commits whatever sits in the shadow.
        port.write_low(0x78);
        port.write_high(0x56);
        assert_ne!(port.count(), 0x5678);
        assert_eq!(port.count(), 0x0078);
    }

    #[test]
    fn read_takes_low_byte_first() {
        let mut t = timer();
        t.port().take_log();
        t.read();
        assert_eq!(t.port().take_log(), [Access::ReadLow, Access::ReadHigh]);
    }

    #[test]
    fn read_is_consistent_while_the_counter_moves() {
        let mut t = timer();
        t.set_clear(0x12, 0xFF);
        t.start();
        t.port_mut().set_ticks_per_read(1);
        // Low byte rolls over between the two reads.
        assert_eq!(t.read(), 0x12FF);
        assert_eq!(t.port().count(), 0x1301);
    }

    #[test]
    fn high_first_read_misses_the_latch() {
        let mut port = MockCounter16::with_count(0x12FF);
        port.set_enabled(true);
        port.set_ticks_per_read(1);
        let high = port.read_high();
        let low = port.read_low();
        assert_ne!(u16::from_be_bytes([high, low]), 0x12FF);
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut t = timer();
        t.start();
        t.start();
        assert!(t.is_running());
        t.stop();
        t.stop();
        assert!(!t.is_running());
    }

    #[test]
    fn stopped_timer_does_not_count() {
        let mut t = timer();
        t.port().tick(100);
        assert_eq!(t.read(), 0);
    }

    #[test]
    fn reset_stops_clears_and_drops_the_flag() {
        let mut t = timer();
        t.set_clear(0xFF, 0x00);
        t.start();
        t.port().tick(0x200);
        assert!(t.overflow_pending());
        t.port().take_log();

        t.reset();

        assert!(!t.is_running());
        assert!(!t.overflow_pending());
        assert_eq!(t.read(), 0xFF00);
        assert_eq!(
            t.port().take_log()[..4],
            [
                Access::Enable(false),
                Access::WriteHigh(0xFF),
                Access::WriteLow(0x00),
                Access::ClearOverflow,
            ]
        );
    }

    #[test]
    fn reset_on_stopped_timer_has_same_outcome() {
        let mut t = timer();
        t.set_clear(0x01, 0x02);
        t.port().set_overflow();
        t.reset();
        assert!(!t.is_running());
        assert!(!t.overflow_pending());
        assert_eq!(t.read(), 0x0102);
    }

    #[test]
    fn counting_from_preload_wraps() {
        let mut t = timer();
        t.set_clear(0xFF, 0x00);
        t.start();
        t.port().tick(0x1F0);
        t.stop();
        assert_eq!(t.read(), (0xFF00u32 + 0x1F0) as u16);
        assert!(t.overflow_pending());
    }

    #[test]
    fn overflow_after_exact_tick_count() {
        let mut t = timer();
        t.set_overflow_after(1000);
        t.start();
        t.port().tick(999);
        assert!(!t.overflow_pending());
        t.port().tick(1);
        assert!(t.overflow_pending());
        assert_eq!(t.read(), 0);
    }

    #[test]
    fn atomic_variants_restore_interrupts() {
        let mut t = timer();
        t.set_clear(0x10, 0x20);
        t.port_mut().write_low(0xEE);
        t.clear_atomic();
        assert_eq!(t.read_atomic(), 0x1020);
        assert!(critical::is_enabled());
    }

    #[test]
    fn release_stops_the_timer() {
        let mut t = timer();
        t.start();
        let port = t.release();
        assert!(!port.is_enabled());
    }
}
