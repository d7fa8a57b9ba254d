//! Byte-level register ports of the timer units.
//!
//! These traits are the only place raw timer registers are touched. A port is
//! owned by exactly one [`Timer16`](crate::timer16::Timer16) or
//! [`Timer8`](crate::timer8::Timer8), which sequences the accesses; nothing
//! else in the crate calls the byte methods directly.

/// Register port of a 16-bit timer whose high byte goes through a shadow
/// register.
///
/// The hardware commits a written high byte to the counter only when the low
/// byte is written afterwards, and a read of the high byte returns the value
/// latched by the preceding read of the low byte.
///
/// # Safety
///
/// Every method must perform exactly the register access its name says, as a
/// volatile access that is neither merged with its neighbour into one wider
/// access nor reordered against it. Implementations that coalesce the two
/// counter bytes break the ordering the timer unit relies on.
pub unsafe trait Counter16 {
    /// Write the control registers with the unit's documented defaults,
    /// leaving the clock source disconnected.
    fn write_control(&mut self);

    /// Connect (`true`) or disconnect (`false`) the counting clock.
    fn set_enabled(&mut self, on: bool);

    /// Whether the counting clock is connected.
    fn is_enabled(&self) -> bool;

    /// Write the high byte of the counter into the shadow register.
    fn write_high(&mut self, value: u8);

    /// Write the low byte of the counter, committing the shadowed high byte.
    fn write_low(&mut self, value: u8);

    /// Read the low byte of the counter, latching the high byte.
    fn read_low(&mut self) -> u8;

    /// Read the high byte latched by the last [`read_low`](Self::read_low).
    fn read_high(&mut self) -> u8;

    /// Whether the overflow flag is set.
    fn overflow_pending(&self) -> bool;

    /// Clear the overflow flag.
    fn clear_overflow(&mut self);
}

/// Register port of an 8-bit timer with a period register.
///
/// # Safety
///
/// Every method must perform exactly the register access its name says, as a
/// volatile access.
pub unsafe trait Counter8 {
    /// Write the control registers with the unit's documented defaults,
    /// leaving the clock source disconnected.
    fn write_control(&mut self);

    /// Connect (`true`) or disconnect (`false`) the counting clock.
    fn set_enabled(&mut self, on: bool);

    /// Whether the counting clock is connected.
    fn is_enabled(&self) -> bool;

    fn write_count(&mut self, value: u8);

    fn read_count(&mut self) -> u8;

    /// Program the period register. The counter restarts from zero after
    /// matching it.
    fn write_period(&mut self, period: u8);

    fn read_period(&self) -> u8;

    /// Whether the period match flag is set.
    fn overflow_pending(&self) -> bool;

    fn clear_overflow(&mut self);
}
