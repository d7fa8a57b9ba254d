use nano_fmt::{Hex, NanoDisplay, NanoWrite};

use crate::{
    regs::{Counter16, Counter8},
    timer8::{FreeRunning, Timer8},
    timer16::Timer16,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Count {
    Byte(u8),
    Word(u16),
}

/// State of one timer unit at the time it was taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub unit: u8,
    pub running: bool,
    pub count: Count,
    pub overflow: bool,
}

impl Snapshot {
    pub fn of16<P: Counter16>(unit: u8, timer: &mut Timer16<P>) -> Self {
        Self {
            unit,
            running: timer.is_running(),
            count: Count::Word(timer.read()),
            overflow: timer.overflow_pending(),
        }
    }

    pub fn of8<P: Counter8>(unit: u8, timer: &mut Timer8<P>) -> Self {
        Self {
            unit,
            running: timer.is_running(),
            count: Count::Byte(timer.read()),
            overflow: timer.overflow_pending(),
        }
    }

    pub fn of_free_running<P: Counter8>(unit: u8, timer: &mut FreeRunning<P>) -> Self {
        Self {
            unit,
            running: timer.is_running(),
            count: Count::Byte(timer.read()),
            overflow: timer.overflow_pending(),
        }
    }
}

/// Renders as `T<unit> run=<0|1> cnt=0x<hex> ovf=<0|1>` and a line break.
impl NanoDisplay for Snapshot {
    fn fmt<F: NanoWrite>(self, f: &mut F) {
        "T".fmt(f);
        self.unit.fmt(f);
        " run=".fmt(f);
        self.running.fmt(f);
        " cnt=0x".fmt(f);
        match self.count {
            Count::Byte(v) => Hex(v).fmt(f),
            Count::Word(v) => Hex(v).fmt(f),
        }
        " ovf=".fmt(f);
        self.overflow.fmt(f);
        "\r\n".fmt(f);
    }
}
