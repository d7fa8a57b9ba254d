use crate::{config, hal};

pub use hal::clock::Clock;

/// Board clock rate.
pub type BoardClock = hal::clock::MHz16;

const _: () = assert!(<BoardClock as Clock>::FREQ == config::CPU_HZ);
