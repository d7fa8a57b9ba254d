#![cfg_attr(not(test), no_std)]

#[cfg(feature = "board")]
pub mod board;
#[cfg(feature = "board")]
pub mod clock;
pub mod config;
pub mod critical;
pub mod delay;
pub mod regs;
pub mod report;
pub mod stopwatch;
pub mod timer16;
pub mod timer8;
#[cfg(feature = "board")]
pub mod usart;

#[cfg(test)]
mod mock;

#[cfg(feature = "board")]
pub use atmega_hal as hal;

pub use timer8::{FreeRunning, Timer8};
pub use timer16::Timer16;
