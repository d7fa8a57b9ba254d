//! Compile-time timer configuration.
//!
//! Timer usage:
//!
//! | Unit   | Width  | Hardware | Consumer                    | Running        |
//! |--------|--------|----------|-----------------------------|----------------|
//! | Timer0 | 16 bit | TC5      | UART bit timing             | on demand      |
//! | Timer1 | 16 bit | TC1      | stopwatch                   | normally off   |
//! | Timer2 | 8 bit  | TC2, CTC | bit-bang serial clock       | always, once started |
//! | Timer3 | 16 bit | TC3      | millisecond delay           | on demand      |
//!
//! All units count the I/O clock through their prescaler. The 16-bit units
//! run in normal mode: count up from the clear value and set the overflow
//! flag on the wrap from `0xFFFF` to `0x0000`. Timer2 runs in CTC mode: count
//! up to the period register, then restart at zero and set the match flag.

/// CPU and I/O clock frequency.
pub const CPU_HZ: u32 = 16_000_000;

/// Clock select of the 16-bit units (`CSn2:0` in `TCCRnB`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Prescale {
    Direct = 0b001,
    Div8 = 0b010,
    Div64 = 0b011,
    Div256 = 0b100,
    Div1024 = 0b101,
}

impl Prescale {
    /// Value of the clock select field.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub const fn divider(self) -> u32 {
        match self {
            Prescale::Direct => 1,
            Prescale::Div8 => 8,
            Prescale::Div64 => 64,
            Prescale::Div256 => 256,
            Prescale::Div1024 => 1024,
        }
    }
}

/// Clock select of TC2 (`CS22:0` in `TCCR2B`). TC2 has its own divider
/// ladder with two extra steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Prescale2 {
    Direct = 0b001,
    Div8 = 0b010,
    Div32 = 0b011,
    Div64 = 0b100,
    Div128 = 0b101,
    Div256 = 0b110,
    Div1024 = 0b111,
}

impl Prescale2 {
    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub const fn divider(self) -> u32 {
        match self {
            Prescale2::Direct => 1,
            Prescale2::Div8 => 8,
            Prescale2::Div32 => 32,
            Prescale2::Div64 => 64,
            Prescale2::Div128 => 128,
            Prescale2::Div256 => 256,
            Prescale2::Div1024 => 1024,
        }
    }
}

/// Timer0: 2 MHz, 0.5 us per count. Overflows after 32.768 ms.
pub const TIMER0_PRESCALE: Prescale = Prescale::Div8;

/// Timer1: 250 kHz, 4 us per count. Overflows after 262.144 ms.
pub const TIMER1_PRESCALE: Prescale = Prescale::Div64;

/// Timer2: 16 MHz, 62.5 ns per count.
pub const TIMER2_PRESCALE: Prescale2 = Prescale2::Direct;

/// Timer3: 16 MHz, 62.5 ns per count. Overflows after 4.096 ms.
pub const TIMER3_PRESCALE: Prescale = Prescale::Direct;

/// Baud rate of the bit-bang serial transmitter clocked by Timer2.
pub const BITBANG_BAUD: u32 = 115_200;

/// Timer2 period register value for one bit-bang bit.
///
/// 115200 baud is 8.68 us per bit. The counter spends `period + 1` counts
/// per cycle: 138 counts of 62.5 ns is 8.625 us.
pub const BITBANG_PERIOD: u8 = (CPU_HZ / TIMER2_PRESCALE.divider() / BITBANG_BAUD - 1) as u8;

/// Timer3 counts per millisecond.
pub const TICKS_PER_MS: u32 = CPU_HZ / TIMER3_PRESCALE.divider() / 1000;

/// Clear value that makes a 16-bit unit overflow after exactly `ticks`
/// counts. `ticks` of 0 stands for the full 65536 counts.
pub const fn preload(ticks: u16) -> u16 {
    0u16.wrapping_sub(ticks)
}

const _: () = assert!(TICKS_PER_MS > 0 && TICKS_PER_MS <= 0x1_0000);
