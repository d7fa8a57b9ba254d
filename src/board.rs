//! Register ports of the ATmega2560 timer/counters and the four timer units
//! built on them.
//!
//! The 16-bit counters `TCNTn` are accessed one byte at a time through
//! `TCNTnL` (offset 0) and `TCNTnH` (offset 1). Both bytes share the `TEMP`
//! register: writing `TCNTnH` only fills `TEMP`, writing `TCNTnL` commits
//! `TEMP` to the high byte. Reading `TCNTnL` copies the high byte to `TEMP`,
//! reading `TCNTnH` returns `TEMP`.

use core::ptr;

use crate::{
    config,
    hal::pac::{TC1, TC2, TC3, TC5},
    regs::{Counter16, Counter8},
    timer8::Timer8,
    timer16::Timer16,
};

macro_rules! counter16 {
    (
        $(#[$attr:meta])*
        $Port:ident, $TC:ident, $tccra:ident, $tccrb:ident, $cs:ident,
        $tcnt:ident, $tifr:ident, $tov:ident, $prescale:expr
    ) => {
        $(#[$attr])*
        pub struct $Port {
            tc: $TC,
        }

        impl $Port {
            pub fn new(tc: $TC) -> Self {
                Self { tc }
            }

            fn tcnt_low(&self) -> *mut u8 {
                self.tc.$tcnt.as_ptr() as *mut u8
            }

            fn tcnt_high(&self) -> *mut u8 {
                self.tcnt_low().wrapping_add(1)
            }
        }

        unsafe impl Counter16 for $Port {
            fn write_control(&mut self) {
                // Normal mode, compare outputs disconnected, no clock source.
                self.tc.$tccra.reset();
                self.tc.$tccrb.reset();
            }

            fn set_enabled(&mut self, on: bool) {
                let cs = if on { $prescale.bits() } else { 0 };
                self.tc.$tccrb.modify(|_, w| w.$cs().bits(cs));
            }

            fn is_enabled(&self) -> bool {
                self.tc.$tccrb.read().$cs().bits() != 0
            }

            fn write_high(&mut self, value: u8) {
                // SAFETY: TCNTnH of the owned timer.
                unsafe { ptr::write_volatile(self.tcnt_high(), value) };
            }

            fn write_low(&mut self, value: u8) {
                // SAFETY: TCNTnL of the owned timer.
                unsafe { ptr::write_volatile(self.tcnt_low(), value) };
            }

            fn read_low(&mut self) -> u8 {
                // SAFETY: TCNTnL of the owned timer.
                unsafe { ptr::read_volatile(self.tcnt_low()) }
            }

            fn read_high(&mut self) -> u8 {
                // SAFETY: TCNTnH of the owned timer.
                unsafe { ptr::read_volatile(self.tcnt_high()) }
            }

            fn overflow_pending(&self) -> bool {
                self.tc.$tifr.read().$tov().bit_is_set()
            }

            fn clear_overflow(&mut self) {
                // Flags are cleared by writing a one, zeros leave the others alone.
                self.tc.$tifr.write(|w| w.$tov().set_bit());
            }
        }
    };
}

counter16!(
    /// TC5, backing Timer0.
    Tc5Port, TC5, tccr5a, tccr5b, cs5, tcnt5, tifr5, tov5, config::TIMER0_PRESCALE
);
counter16!(
    /// TC1, backing Timer1.
    Tc1Port, TC1, tccr1a, tccr1b, cs1, tcnt1, tifr1, tov1, config::TIMER1_PRESCALE
);
counter16!(
    /// TC3, backing Timer3.
    Tc3Port, TC3, tccr3a, tccr3b, cs3, tcnt3, tifr3, tov3, config::TIMER3_PRESCALE
);

/// TC2 in CTC mode, backing Timer2. `OCR2A` is the period register and the
/// compare match flag `OCF2A` marks the end of each period.
pub struct Tc2Port {
    tc: TC2,
}

impl Tc2Port {
    pub fn new(tc: TC2) -> Self {
        Self { tc }
    }
}

unsafe impl Counter8 for Tc2Port {
    fn write_control(&mut self) {
        self.tc.tccr2a.write(|w| w.wgm2().ctc());
        self.tc.tccr2b.reset();
    }

    fn set_enabled(&mut self, on: bool) {
        let cs = if on {
            config::TIMER2_PRESCALE.bits()
        } else {
            0
        };
        self.tc.tccr2b.modify(|_, w| w.cs2().bits(cs));
    }

    fn is_enabled(&self) -> bool {
        self.tc.tccr2b.read().cs2().bits() != 0
    }

    fn write_count(&mut self, value: u8) {
        self.tc.tcnt2.write(|w| unsafe { w.bits(value) });
    }

    fn read_count(&mut self) -> u8 {
        self.tc.tcnt2.read().bits()
    }

    fn write_period(&mut self, period: u8) {
        self.tc.ocr2a.write(|w| unsafe { w.bits(period) });
    }

    fn read_period(&self) -> u8 {
        self.tc.ocr2a.read().bits()
    }

    fn overflow_pending(&self) -> bool {
        self.tc.tifr2.read().ocf2a().bit_is_set()
    }

    fn clear_overflow(&mut self) {
        self.tc.tifr2.write(|w| w.ocf2a().set_bit());
    }
}

/// UART bit timing.
pub type Timer0 = Timer16<Tc5Port>;
/// Stopwatch.
pub type Timer1 = Timer16<Tc1Port>;
/// Bit-bang serial clock.
pub type Timer2 = Timer8<Tc2Port>;
/// Millisecond delay.
pub type Timer3 = Timer16<Tc3Port>;

/// The four timer units, initialized and stopped.
pub struct Timers {
    pub timer0: Timer0,
    pub timer1: Timer1,
    pub timer2: Timer2,
    pub timer3: Timer3,
}

impl Timers {
    pub fn new(tc1: TC1, tc2: TC2, tc3: TC3, tc5: TC5) -> Self {
        Self {
            timer0: Timer16::new(Tc5Port::new(tc5)),
            timer1: Timer16::new(Tc1Port::new(tc1)),
            timer2: Timer8::new(Tc2Port::new(tc2)),
            timer3: Timer16::new(Tc3Port::new(tc3)),
        }
    }
}
